use std::collections::BTreeMap;
use time::OffsetDateTime;

///
/// Native
///
/// Host-side view of a value's content. NULL values report `Native::Null`.
///

#[derive(Clone, Debug, PartialEq)]
pub enum Native {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Bytes(Vec<u8>),
    Time(OffsetDateTime),
    List(Vec<Self>),
    Map(BTreeMap<String, Self>),
}

impl Native {
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(v) => Some(v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(v) => Some(v),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_time(&self) -> Option<OffsetDateTime> {
        match self {
            Self::Time(v) => Some(*v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&[Self]> {
        match self {
            Self::List(v) => Some(v),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_map(&self) -> Option<&BTreeMap<String, Self>> {
        match self {
            Self::Map(v) => Some(v),
            _ => None,
        }
    }
}

impl From<bool> for Native {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for Native {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for Native {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for Native {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for Native {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<OffsetDateTime> for Native {
    fn from(v: OffsetDateTime) -> Self {
        Self::Time(v)
    }
}
