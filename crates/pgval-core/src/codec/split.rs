use crate::{
    codec::{
        escape::Quoting,
        hex::{HEX_PREFIX, decode_hex_literal},
    },
    error::{ErrorOrigin, ValueError},
};
use std::fmt;
use tracing::trace;

/// One tokenized element. `None` is an SQL NULL element.
pub type Element = Option<Vec<u8>>;

///
/// Dialect
///
/// Composite literal grammar, chosen by the leading delimiter.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Dialect {
    /// `{a,b,c}` with backslash escapes.
    Array,

    /// `(a,b,c)` with doubled-quote and backslash escapes.
    Row,
}

impl Dialect {
    #[must_use]
    pub const fn open(self) -> u8 {
        match self {
            Self::Array => b'{',
            Self::Row => b'(',
        }
    }

    #[must_use]
    pub const fn close(self) -> u8 {
        match self {
            Self::Array => b'}',
            Self::Row => b')',
        }
    }

    /// Escaping used when a child of this dialect is quoted.
    #[must_use]
    pub const fn quoting(self) -> Quoting {
        match self {
            Self::Array => Quoting::Array,
            Self::Row => Quoting::Row,
        }
    }

    /// Return the dialect selected by the first byte of `input`.
    #[must_use]
    pub const fn detect(input: &[u8]) -> Option<Self> {
        match input.first() {
            Some(b'{') => Some(Self::Array),
            Some(b'(') => Some(Self::Row),
            _ => None,
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Array => f.write_str("array"),
            Self::Row => f.write_str("row"),
        }
    }
}

/// Split a composite literal into its top-level elements.
///
/// Quoted and unquoted elements are unescaped. Nested `{...}` elements are
/// returned verbatim so the caller can split them again. Any element that
/// unescapes to a valid `\x` hex literal is returned hex-decoded.
pub fn split(input: &[u8]) -> Result<(Dialect, Vec<Element>), ValueError> {
    let dialect = match (Dialect::detect(input), input.first()) {
        (Some(dialect), _) => dialect,
        (None, Some(&other)) => {
            return Err(ValueError::format(
                ErrorOrigin::Tokenizer,
                format!(
                    "unknown leading delimiter '{}'",
                    char::from(other).escape_default()
                ),
            ));
        }
        (None, None) => {
            return Err(ValueError::format(
                ErrorOrigin::Tokenizer,
                "empty composite literal",
            ));
        }
    };

    if input.len() < 2 || input[input.len() - 1] != dialect.close() {
        return Err(ValueError::format(
            ErrorOrigin::Tokenizer,
            format!(
                "{dialect} literal must end with '{}'",
                char::from(dialect.close())
            ),
        ));
    }

    let body = &input[1..input.len() - 1];
    let elements = Tokenizer::new(body, dialect).run()?;

    Ok((dialect, elements))
}

/// Split a literal that must use `expected` as its dialect.
pub fn split_as(input: &[u8], expected: Dialect) -> Result<Vec<Element>, ValueError> {
    let (dialect, elements) = split(input)?;
    if dialect != expected {
        return Err(ValueError::format(
            ErrorOrigin::Tokenizer,
            format!("expected {expected} literal, found {dialect} literal"),
        ));
    }

    Ok(elements)
}

///
/// Tokenizer
///
/// Single-pass scanner over the body between the outer delimiters.
///

struct Tokenizer<'a> {
    body: &'a [u8],
    pos: usize,
    dialect: Dialect,
}

impl<'a> Tokenizer<'a> {
    const fn new(body: &'a [u8], dialect: Dialect) -> Self {
        Self {
            body,
            pos: 0,
            dialect,
        }
    }

    fn run(mut self) -> Result<Vec<Element>, ValueError> {
        let mut out = Vec::new();

        // `{}` is empty, but `()` is one NULL field.
        if self.dialect == Dialect::Array && self.body.iter().all(|&b| b == b' ') {
            return Ok(out);
        }

        loop {
            self.skip_spaces();

            let element = match self.peek() {
                None | Some(b',') => match self.dialect {
                    Dialect::Row => None,
                    Dialect::Array => return Err(self.error("empty array element")),
                },
                Some(b'{') => Some(self.bracketed()?),
                Some(b'"') => Some(self.quoted()?),
                Some(_) => self.bare()?,
            };
            let element = element.map(decode_hex_element);

            trace!(
                dialect = %self.dialect,
                index = out.len(),
                len = element.as_ref().map_or(0, Vec::len),
                null = element.is_none(),
                "tokenizer element"
            );
            out.push(element);

            self.skip_spaces();
            match self.peek() {
                None => break,
                Some(b',') => self.pos += 1,
                Some(other) => {
                    return Err(self.error(format!(
                        "unexpected '{}' after element",
                        char::from(other).escape_default()
                    )));
                }
            }
        }

        Ok(out)
    }

    fn peek(&self) -> Option<u8> {
        self.body.get(self.pos).copied()
    }

    fn skip_spaces(&mut self) {
        while self.peek() == Some(b' ') {
            self.pos += 1;
        }
    }

    fn error(&self, message: impl fmt::Display) -> ValueError {
        self.error_at(self.pos, message)
    }

    // Positions are reported relative to the full literal, opening delimiter included.
    fn error_at(&self, pos: usize, message: impl fmt::Display) -> ValueError {
        ValueError::format(
            ErrorOrigin::Tokenizer,
            format!("{} literal: {message} at byte {}", self.dialect, pos + 1),
        )
    }

    // Nested `{...}` element, returned raw including its braces.
    fn bracketed(&mut self) -> Result<Vec<u8>, ValueError> {
        let start = self.pos;
        let mut depth = 0usize;
        let mut in_quotes = false;

        while let Some(byte) = self.peek() {
            self.pos += 1;
            match byte {
                b'\\' => self.pos += 1,
                b'"' => in_quotes = !in_quotes,
                b'{' if !in_quotes => depth += 1,
                b'}' if !in_quotes => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(self.body[start..self.pos].to_vec());
                    }
                }
                _ => {}
            }
        }

        Err(self.error_at(start, "unterminated nested element"))
    }

    fn quoted(&mut self) -> Result<Vec<u8>, ValueError> {
        let start = self.pos;
        let mut out = Vec::new();
        self.pos += 1;

        loop {
            let Some(byte) = self.peek() else {
                return Err(self.error_at(start, "unterminated quoted element"));
            };
            self.pos += 1;

            match byte {
                b'\\' => {
                    let Some(escaped) = self.peek() else {
                        return Err(self.error_at(start, "unterminated quoted element"));
                    };
                    out.push(escaped);
                    self.pos += 1;
                }
                b'"' if self.dialect == Dialect::Row && self.peek() == Some(b'"') => {
                    out.push(b'"');
                    self.pos += 1;
                }
                b'"' => return Ok(out),
                _ => out.push(byte),
            }
        }
    }

    fn bare(&mut self) -> Result<Element, ValueError> {
        let mut out = Vec::new();
        let mut escaped = false;
        let mut keep = 0;

        while let Some(byte) = self.peek() {
            match (self.dialect, byte) {
                (_, b',') => break,
                (_, b'\\') => {
                    let Some(next) = self.body.get(self.pos + 1).copied() else {
                        return Err(self.error("dangling escape"));
                    };
                    out.push(next);
                    self.pos += 2;
                    escaped = true;
                    keep = out.len();
                    continue;
                }
                (Dialect::Array, b'"' | b'{' | b'}') | (Dialect::Row, b'"' | b')') => {
                    return Err(self.error(format!(
                        "unexpected '{}' in unquoted element",
                        char::from(byte)
                    )));
                }
                _ => {}
            }

            out.push(byte);
            self.pos += 1;
            if byte != b' ' {
                keep = out.len();
            }
        }

        // Array elements lose trailing blanks; row fields keep them.
        if self.dialect == Dialect::Array {
            out.truncate(keep);
            if !escaped && out.eq_ignore_ascii_case(b"NULL") {
                return Ok(None);
            }
        }

        Ok(Some(out))
    }
}

fn decode_hex_element(bytes: Vec<u8>) -> Vec<u8> {
    if bytes.starts_with(HEX_PREFIX)
        && let Ok(decoded) = decode_hex_literal(&bytes)
    {
        return decoded;
    }

    bytes
}

///
/// TESTS
///
