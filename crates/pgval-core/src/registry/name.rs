use crate::error::ValueError;
use std::fmt;

///
/// TypeName
///
/// Parsed SQL type reference such as `varchar(20)`, `numeric(10, 2)` or
/// `int4[]`. The base name is lowercased; modifiers stay as strings and are
/// interpreted by the constructor that receives them.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TypeName {
    pub base: String,
    pub args: Vec<String>,
    pub array_dims: usize,
}

impl TypeName {
    pub fn parse(input: &str) -> Result<Self, ValueError> {
        let mut rest = input.trim();
        let mut array_dims = 0;
        while let Some(stripped) = rest.strip_suffix("[]") {
            rest = stripped.trim_end();
            array_dims += 1;
        }

        let (base, args) = match rest.find('(') {
            Some(open) => {
                let inner = rest[open + 1..]
                    .strip_suffix(')')
                    .ok_or_else(|| malformed(input, "unclosed modifier list"))?;
                let args = inner
                    .split(',')
                    .map(|arg| arg.trim().to_string())
                    .collect::<Vec<_>>();
                if args.iter().any(String::is_empty) {
                    return Err(malformed(input, "empty modifier"));
                }

                (&rest[..open], args)
            }
            None => (rest, Vec::new()),
        };

        let base = base.split_whitespace().collect::<Vec<_>>().join(" ");
        if base.is_empty() {
            return Err(malformed(input, "missing type name"));
        }

        Ok(Self {
            base: base.to_ascii_lowercase(),
            args,
            array_dims,
        })
    }

    /// Modifiers as borrowed slices, the form constructors take.
    #[must_use]
    pub fn arg_refs(&self) -> Vec<&str> {
        self.args.iter().map(String::as_str).collect()
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.base)?;
        if !self.args.is_empty() {
            write!(f, "({})", self.args.join(","))?;
        }
        for _ in 0..self.array_dims {
            write!(f, "[]")?;
        }

        Ok(())
    }
}

fn malformed(input: &str, reason: &str) -> ValueError {
    ValueError::registry(format!("malformed type name '{input}': {reason}"))
}

///
/// TESTS
///
