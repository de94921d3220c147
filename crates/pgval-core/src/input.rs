use crate::{native::Native, value::Value, wire::WireValue};
use std::collections::BTreeMap;
use time::OffsetDateTime;

///
/// Input
///
/// Everything a value can be decoded from: host scalars, raw wire bytes,
/// lists for positional composites, maps for hstore, or another value.
///

#[derive(Clone, Debug, PartialEq)]
pub enum Input {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Text(String),
    Bytes(Vec<u8>),
    Time(OffsetDateTime),
    List(Vec<Self>),
    Map(BTreeMap<String, Self>),
    Value(Box<Value>),
}

impl Input {
    /// Build a list input from anything convertible.
    pub fn list<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Self>,
    {
        Self::List(items.into_iter().map(Into::into).collect())
    }

    /// Build a map input from key/value pairs.
    pub fn map<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Self>,
    {
        Self::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Short label for diagnostics.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::UInt(_) => "uint",
            Self::Float(_) => "float",
            Self::Text(_) => "text",
            Self::Bytes(_) => "bytes",
            Self::Time(_) => "time",
            Self::List(_) => "list",
            Self::Map(_) => "map",
            Self::Value(_) => "value",
        }
    }

    /// Replace a wrapped value with the input that reproduces it.
    #[must_use]
    pub fn resolve(self) -> Self {
        match self {
            Self::Value(value) => value.into_input(),
            other => other,
        }
    }
}

impl From<bool> for Input {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

macro_rules! impl_from_signed {
    ( $( $ty:ty ),* ) => {
        $(
            impl From<$ty> for Input {
                fn from(v: $ty) -> Self {
                    Self::Int(i64::from(v))
                }
            }
        )*
    };
}

macro_rules! impl_from_unsigned {
    ( $( $ty:ty ),* ) => {
        $(
            impl From<$ty> for Input {
                fn from(v: $ty) -> Self {
                    Self::UInt(u64::from(v))
                }
            }
        )*
    };
}

impl_from_signed!(i8, i16, i32, i64);
impl_from_unsigned!(u8, u16, u32, u64);

impl From<f32> for Input {
    fn from(v: f32) -> Self {
        Self::Float(f64::from(v))
    }
}

impl From<f64> for Input {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for Input {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for Input {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<&[u8]> for Input {
    fn from(v: &[u8]) -> Self {
        Self::Bytes(v.to_vec())
    }
}

impl From<Vec<u8>> for Input {
    fn from(v: Vec<u8>) -> Self {
        Self::Bytes(v)
    }
}

impl From<OffsetDateTime> for Input {
    fn from(v: OffsetDateTime) -> Self {
        Self::Time(v)
    }
}

impl From<Value> for Input {
    fn from(v: Value) -> Self {
        Self::Value(Box::new(v))
    }
}

impl<T: Into<Self>> From<Option<T>> for Input {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

impl From<BTreeMap<String, String>> for Input {
    fn from(v: BTreeMap<String, String>) -> Self {
        Self::map(v)
    }
}

impl From<BTreeMap<String, Option<String>>> for Input {
    fn from(v: BTreeMap<String, Option<String>>) -> Self {
        Self::map(v)
    }
}

impl From<Native> for Input {
    fn from(v: Native) -> Self {
        match v {
            Native::Null => Self::Null,
            Native::Bool(v) => Self::Bool(v),
            Native::Int(v) => Self::Int(v),
            Native::Float(v) => Self::Float(v),
            Native::Text(v) => Self::Text(v),
            Native::Bytes(v) => Self::Bytes(v),
            Native::Time(v) => Self::Time(v),
            Native::List(items) => Self::list(items),
            Native::Map(entries) => Self::map(entries),
        }
    }
}

impl From<WireValue> for Input {
    fn from(v: WireValue) -> Self {
        match v {
            WireValue::Null => Self::Null,
            WireValue::Bool(v) => Self::Bool(v),
            WireValue::Int(v) => Self::Int(v),
            WireValue::Float(v) => Self::Float(v),
            WireValue::Text(v) => Self::Text(v),
            WireValue::Bytes(v) => Self::Bytes(v),
            WireValue::Timestamp(v) => Self::Time(v),
        }
    }
}
