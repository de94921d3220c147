mod constructor;


use crate::{
    error::{ErrorOrigin, ValueError},
    input::Input,
    native::Native,
    relation::Relation,
    types::{Array, Bool, Bytes, Enum, Float, HStore, Int, Numeric, Record, Row, Text, Timestamp},
    wire::WireValue,
};
use pgval_primitives::ValueKind;
use std::{fmt, sync::Arc};

pub use constructor::{ToValue, TypeSpec};

/// Raw encoding of every NULL value.
pub const NULL_SENTINEL: &[u8] = b"NULL";

///
/// ValueCodec
///
/// Contract shared by every value: NULL state, native view, textual and raw
/// encodings, and decoding from any [`Input`].
///
/// A failed `decode` leaves scalars unchanged. Composites decode children in
/// place and may be left partially updated.
///

pub trait ValueCodec {
    fn kind(&self) -> ValueKind;

    fn is_null(&self) -> bool;

    /// Host-side view; `Native::Null` when NULL.
    fn native(&self) -> Native;

    /// Wire literal; [`NULL_SENTINEL`] when NULL.
    fn encode(&self) -> Vec<u8>;

    /// Human-readable form; empty when NULL.
    fn text(&self) -> String {
        if self.is_null() {
            String::new()
        } else {
            String::from_utf8_lossy(&self.encode()).into_owned()
        }
    }

    fn decode(&mut self, input: Input) -> Result<(), ValueError>;

    /// Bind-parameter form handed to a database driver.
    fn to_wire(&self) -> WireValue;
}

///
/// IteratorValue
///
/// A value that is also an ordered sequence of child values.
///

pub trait IteratorValue: ValueCodec {
    fn values(&self) -> &[Value];

    fn values_mut(&mut self) -> &mut [Value];

    fn value_at(&self, idx: usize) -> Option<&Value> {
        self.values().get(idx)
    }

    fn value_at_mut(&mut self, idx: usize) -> Option<&mut Value> {
        self.values_mut().get_mut(idx)
    }

    fn len(&self) -> usize {
        self.values().len()
    }

    fn is_empty(&self) -> bool {
        self.values().is_empty()
    }

    /// Decode one more child from `input` and push it. Fixed-arity
    /// composites reject this with an arity error.
    fn append(&mut self, input: Input) -> Result<(), ValueError>;
}

///
/// MapValue
///
/// A value that is also a lookup from name to child content.
///

pub trait MapValue: ValueCodec {
    fn names(&self) -> Vec<&str>;

    /// Child content by name, `None` when the name is unknown.
    fn lookup(&self, name: &str) -> Option<Native>;

    /// Child content by name, a lookup error when the name is unknown.
    fn get(&self, name: &str) -> Result<Native, ValueError>;

    fn set(&mut self, name: &str, input: Input) -> Result<(), ValueError>;
}

///
/// RecordValue
///
/// Named, fixed-arity composite that may point back at its relation.
///

pub trait RecordValue: IteratorValue + MapValue {
    fn relation(&self) -> Option<&Arc<Relation>>;
}

///
/// Value
///
/// Closed set of concrete codecs.
///

#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Int(Int),
    Float(Float),
    Bool(Bool),
    Text(Text),
    Bytes(Bytes),
    Numeric(Numeric),
    Timestamp(Timestamp),
    Enum(Enum),
    Array(Array),
    Row(Row),
    Record(Record),
    HStore(HStore),
}

macro_rules! dispatch {
    ($value:expr, $inner:ident => $body:expr) => {
        match $value {
            Value::Int($inner) => $body,
            Value::Float($inner) => $body,
            Value::Bool($inner) => $body,
            Value::Text($inner) => $body,
            Value::Bytes($inner) => $body,
            Value::Numeric($inner) => $body,
            Value::Timestamp($inner) => $body,
            Value::Enum($inner) => $body,
            Value::Array($inner) => $body,
            Value::Row($inner) => $body,
            Value::Record($inner) => $body,
            Value::HStore($inner) => $body,
        }
    };
}

impl ValueCodec for Value {
    fn kind(&self) -> ValueKind {
        dispatch!(self, v => v.kind())
    }

    fn is_null(&self) -> bool {
        dispatch!(self, v => v.is_null())
    }

    fn native(&self) -> Native {
        dispatch!(self, v => v.native())
    }

    fn encode(&self) -> Vec<u8> {
        dispatch!(self, v => v.encode())
    }

    fn text(&self) -> String {
        dispatch!(self, v => v.text())
    }

    fn decode(&mut self, input: Input) -> Result<(), ValueError> {
        dispatch!(self, v => v.decode(input))
    }

    fn to_wire(&self) -> WireValue {
        dispatch!(self, v => v.to_wire())
    }
}

impl Value {
    /// Parameters of the type this value was built from.
    #[must_use]
    pub fn type_spec(&self) -> TypeSpec {
        match self {
            Self::Int(v) => TypeSpec::Int(v.width()),
            Self::Float(v) => TypeSpec::Float(v.width()),
            Self::Bool(v) => TypeSpec::Bool {
                strict: v.is_strict(),
            },
            Self::Text(v) => TypeSpec::Text(v.limit()),
            Self::Bytes(_) => TypeSpec::Bytes,
            Self::Numeric(v) => TypeSpec::Numeric {
                precision: v.precision(),
                scale: v.scale(),
            },
            Self::Timestamp(_) => TypeSpec::Timestamp,
            Self::Enum(v) => TypeSpec::Enum(v.labels().clone()),
            Self::Array(v) => TypeSpec::Array(v.element().clone()),
            Self::Row(v) => TypeSpec::Row(
                v.values()
                    .iter()
                    .map(|child| ToValue::new(child.type_spec()))
                    .collect(),
            ),
            Self::Record(v) => TypeSpec::Record(v.columns().clone()),
            Self::HStore(v) => TypeSpec::HStore {
                keep_null: v.keeps_null(),
            },
        }
    }

    /// Convert into the input that decodes back into an equal value.
    #[must_use]
    pub fn into_input(self) -> Input {
        if self.is_null() {
            return Input::Null;
        }

        match self {
            // Text keeps the inclusive bound of the literal parser.
            Self::Int(v) => v.get().map_or(Input::Null, |n| Input::Text(n.to_string())),
            Self::Bytes(v) => Input::Bytes(v.encode()),
            Self::Array(v) => Input::list(v.into_values()),
            Self::Row(v) => Input::list(v.into_values()),
            Self::Record(v) => Input::list(v.into_values()),
            Self::HStore(v) => Input::map(v.into_entries()),
            other => other.native().into(),
        }
    }

    #[must_use]
    pub fn as_iterator(&self) -> Option<&dyn IteratorValue> {
        match self {
            Self::Array(v) => Some(v),
            Self::Row(v) => Some(v),
            Self::Record(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_iterator_mut(&mut self) -> Option<&mut dyn IteratorValue> {
        match self {
            Self::Array(v) => Some(v),
            Self::Row(v) => Some(v),
            Self::Record(v) => Some(v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_map(&self) -> Option<&dyn MapValue> {
        match self {
            Self::Record(v) => Some(v),
            Self::HStore(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_map_mut(&mut self) -> Option<&mut dyn MapValue> {
        match self {
            Self::Record(v) => Some(v),
            Self::HStore(v) => Some(v),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_record(&self) -> Option<&Record> {
        match self {
            Self::Record(v) => Some(v),
            _ => None,
        }
    }

    pub const fn as_record_mut(&mut self) -> Option<&mut Record> {
        match self {
            Self::Record(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

pub(crate) fn mismatch(kind: ValueKind, input: &Input, origin: ErrorOrigin) -> ValueError {
    ValueError::type_mismatch(
        origin,
        format!("cannot decode {} input into {kind}", input.label()),
    )
}

pub(crate) fn utf8(bytes: Vec<u8>, origin: ErrorOrigin) -> Result<String, ValueError> {
    String::from_utf8(bytes)
        .map_err(|err| ValueError::format(origin, format!("input is not valid UTF-8: {err}")))
}
