//! Built-in OID table: the PostgreSQL scalar types this crate decodes, their
//! array types, and the spellings accepted by name lookup.

use crate::{
    error::ValueError,
    registry::CodecOptions,
    types::{FloatWidth, IntWidth, TextLimit, array},
    value::{ToValue, TypeSpec},
};
use pgval_config::MAX_NUMERIC_SCALE;

///
/// Builtin
///
/// One built-in scalar type. `array_oid` is the OID of its one-dimensional
/// array type.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Builtin {
    pub oid: u32,
    pub name: &'static str,
    pub array_oid: u32,
    pub aliases: &'static [&'static str],
    factory: Factory,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Factory {
    Bool,
    Bytea,
    Int2,
    Int4,
    Int8,
    Float4,
    Float8,
    Text,
    BpChar,
    VarChar,
    Numeric,
    Timestamp,
}

macro_rules! builtin {
    ($oid:literal, $name:literal, $array:literal, $factory:ident $(, $alias:literal)* $(,)?) => {
        Builtin {
            oid: $oid,
            name: $name,
            array_oid: $array,
            aliases: &[$($alias),*],
            factory: Factory::$factory,
        }
    };
}

pub const BUILTINS: [Builtin; 15] = [
    builtin!(16, "bool", 1000, Bool, "boolean"),
    builtin!(17, "bytea", 1001, Bytea),
    builtin!(18, "char", 1002, BpChar),
    builtin!(20, "int8", 1016, Int8, "bigint", "bigserial", "serial8"),
    builtin!(21, "int2", 1005, Int2, "smallint", "smallserial", "serial2"),
    builtin!(23, "int4", 1007, Int4, "integer", "int", "serial", "serial4"),
    builtin!(25, "text", 1009, Text),
    builtin!(26, "oid", 1028, Int8),
    builtin!(700, "float4", 1021, Float4, "real"),
    builtin!(701, "float8", 1022, Float8, "double precision", "float"),
    builtin!(1042, "bpchar", 1014, BpChar, "character"),
    builtin!(1043, "varchar", 1015, VarChar, "character varying"),
    builtin!(1114, "timestamp", 1115, Timestamp, "timestamp without time zone"),
    builtin!(1184, "timestamptz", 1185, Timestamp, "timestamp with time zone"),
    builtin!(1700, "numeric", 1231, Numeric, "decimal"),
];

/// Built-in entry whose scalar or array OID is `oid`; the flag says which.
#[must_use]
pub(crate) fn by_oid(oid: u32) -> Option<(&'static Builtin, bool)> {
    BUILTINS.iter().find_map(|b| {
        if b.oid == oid {
            Some((b, false))
        } else if b.array_oid == oid {
            Some((b, true))
        } else {
            None
        }
    })
}

/// Built-in entry by canonical name, alias, or `_name` array spelling.
#[must_use]
pub(crate) fn by_name(name: &str) -> Option<(&'static Builtin, bool)> {
    let find = |name: &str| {
        BUILTINS
            .iter()
            .find(|b| b.name == name || b.aliases.iter().any(|alias| *alias == name))
    };

    find(name)
        .map(|b| (b, false))
        .or_else(|| name.strip_prefix('_').and_then(find).map(|b| (b, true)))
}

impl Builtin {
    /// Constructor for this type with modifiers applied; array entries wrap it.
    pub fn to_value(
        &self,
        args: &[&str],
        options: &CodecOptions,
        is_array: bool,
    ) -> Result<ToValue, ValueError> {
        let scalar = self.scalar(args, options)?;

        Ok(if is_array { array(scalar) } else { scalar })
    }

    fn scalar(&self, args: &[&str], options: &CodecOptions) -> Result<ToValue, ValueError> {
        let spec = match self.factory {
            Factory::Bool => {
                self.no_args(args)?;
                TypeSpec::Bool {
                    strict: options.strict_bool,
                }
            }
            Factory::Bytea => {
                self.no_args(args)?;
                TypeSpec::Bytes
            }
            Factory::Int2 => {
                self.no_args(args)?;
                TypeSpec::Int(IntWidth::Bits16)
            }
            Factory::Int4 => {
                self.no_args(args)?;
                TypeSpec::Int(IntWidth::Bits32)
            }
            Factory::Int8 => {
                self.no_args(args)?;
                TypeSpec::Int(IntWidth::Bits64)
            }
            Factory::Float4 => {
                self.no_args(args)?;
                TypeSpec::Float(FloatWidth::Bits32)
            }
            Factory::Float8 => {
                self.no_args(args)?;
                TypeSpec::Float(FloatWidth::Bits64)
            }
            Factory::Text => {
                self.no_args(args)?;
                TypeSpec::Text(TextLimit::Unbounded)
            }
            Factory::BpChar => match self.args::<1>(args)? {
                [Some(n)] => TypeSpec::Text(TextLimit::Char(self.length(n)?)),
                [None] => TypeSpec::Text(TextLimit::Unbounded),
            },
            Factory::VarChar => match self.args::<1>(args)? {
                [Some(n)] => TypeSpec::Text(TextLimit::VarChar(self.length(n)?)),
                [None] => TypeSpec::Text(TextLimit::Unbounded),
            },
            Factory::Numeric => {
                let [precision, scale] = self.args::<2>(args)?;
                let precision = precision.map(|p| self.number(p)).transpose()?;
                let scale = match scale {
                    Some(s) => self.number(s)?,
                    None => options.numeric_default_scale,
                };
                if scale > MAX_NUMERIC_SCALE {
                    return Err(ValueError::registry(format!(
                        "numeric scale {scale} exceeds {MAX_NUMERIC_SCALE}"
                    )));
                }

                TypeSpec::Numeric { precision, scale }
            }
            Factory::Timestamp => {
                // fractional-second precision is accepted and ignored
                if let [Some(p)] = self.args::<1>(args)? {
                    self.number(p)?;
                }
                TypeSpec::Timestamp
            }
        };

        Ok(ToValue::new(spec))
    }

    fn no_args(&self, args: &[&str]) -> Result<(), ValueError> {
        self.args::<0>(args).map(|_| ())
    }

    // Up to N modifiers, missing ones as None.
    fn args<'a, const N: usize>(&self, args: &[&'a str]) -> Result<[Option<&'a str>; N], ValueError> {
        if args.len() > N {
            return Err(ValueError::registry(format!(
                "type {} takes at most {N} modifiers, got {}",
                self.name,
                args.len()
            )));
        }

        Ok(std::array::from_fn(|idx| args.get(idx).copied()))
    }

    fn number(&self, arg: &str) -> Result<u32, ValueError> {
        arg.trim().parse().map_err(|_| {
            ValueError::registry(format!(
                "type {} modifier '{arg}' is not a non-negative integer",
                self.name
            ))
        })
    }

    fn length(&self, arg: &str) -> Result<usize, ValueError> {
        arg.trim().parse().map_err(|_| {
            ValueError::registry(format!(
                "type {} length '{arg}' is not a non-negative integer",
                self.name
            ))
        })
    }
}

///
/// TESTS
///
