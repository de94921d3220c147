use crate::{
    error::ValueError,
    input::Input,
    types::{
        Array, Bool, Bytes, Columns, Enum, EnumLabels, Float, FloatWidth, HStore, Int, IntWidth,
        Numeric, Record, Row, Text, TextLimit, Timestamp,
    },
    value::{Value, ValueCodec},
};
use pgval_primitives::ValueKind;
use std::sync::Arc;

///
/// TypeSpec
///
/// Parameters that fully describe one constructible type.
///

#[derive(Clone, Debug, PartialEq)]
pub enum TypeSpec {
    Int(IntWidth),
    Float(FloatWidth),
    Bool { strict: bool },
    Text(TextLimit),
    Bytes,
    Numeric { precision: Option<u32>, scale: u32 },
    Timestamp,
    Enum(EnumLabels),
    Array(ToValue),
    Row(Arc<[ToValue]>),
    Record(Columns),
    HStore { keep_null: bool },
}

impl TypeSpec {
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Int(_) => ValueKind::Int,
            Self::Float(_) => ValueKind::Float,
            Self::Bool { .. } => ValueKind::Bool,
            Self::Text(_) => ValueKind::Text,
            Self::Bytes => ValueKind::Bytes,
            Self::Numeric { .. } => ValueKind::Numeric,
            Self::Timestamp => ValueKind::Timestamp,
            Self::Enum(_) => ValueKind::Enum,
            Self::Array(_) => ValueKind::Array,
            Self::Row(_) => ValueKind::Row,
            Self::Record(_) => ValueKind::Record,
            Self::HStore { .. } => ValueKind::HStore,
        }
    }
}

///
/// ToValue
///
/// Constructor for fresh values of one parameterized type. Cheap to clone;
/// every call produces an independent instance.
///

#[derive(Clone, Debug, PartialEq)]
pub struct ToValue(Arc<TypeSpec>);

impl ToValue {
    #[must_use]
    pub fn new(spec: TypeSpec) -> Self {
        Self(Arc::new(spec))
    }

    #[must_use]
    pub fn spec(&self) -> &TypeSpec {
        &self.0
    }

    #[must_use]
    pub fn kind(&self) -> ValueKind {
        self.0.kind()
    }

    /// Build a NULL instance.
    #[must_use]
    pub fn null(&self) -> Value {
        match self.spec() {
            TypeSpec::Int(width) => Value::Int(Int::new(*width)),
            TypeSpec::Float(width) => Value::Float(Float::new(*width)),
            TypeSpec::Bool { strict } => Value::Bool(Bool::new(*strict)),
            TypeSpec::Text(limit) => Value::Text(Text::new(*limit)),
            TypeSpec::Bytes => Value::Bytes(Bytes::new()),
            TypeSpec::Numeric { precision, scale } => {
                Value::Numeric(Numeric::new(*precision, *scale))
            }
            TypeSpec::Timestamp => Value::Timestamp(Timestamp::new()),
            TypeSpec::Enum(labels) => Value::Enum(Enum::new(labels.clone())),
            TypeSpec::Array(element) => Value::Array(Array::new(element.clone())),
            TypeSpec::Row(elements) => Value::Row(Row::new(elements)),
            TypeSpec::Record(columns) => Value::Record(Record::new(columns.clone())),
            TypeSpec::HStore { keep_null } => Value::HStore(HStore::new(*keep_null)),
        }
    }

    /// Build an instance and decode `input` into it.
    pub fn make(&self, input: impl Into<Input>) -> Result<Value, ValueError> {
        let mut value = self.null();
        value.decode(input.into())?;

        Ok(value)
    }
}
