use crate::{
    error::{ErrorOrigin, ValueError},
    input::Input,
    native::Native,
    relation::Relation,
    types::{
        Columns,
        row::{PositionalKind, decode_positional, encode_positional, positional_native},
    },
    value::{IteratorValue, MapValue, RecordValue, Value, ValueCodec},
    wire::WireValue,
};
use pgval_primitives::ValueKind;
use std::sync::Arc;

///
/// Record
///
/// Row with named columns. Children are addressable by position or name,
/// and a record built from a relation keeps a reference back to it.
///

#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    columns: Columns,
    values: Vec<Value>,
    valid: bool,
    relation: Option<Arc<Relation>>,
}

impl Record {
    #[must_use]
    pub fn new(columns: Columns) -> Self {
        let values = columns.iter().map(|col| col.to_value().null()).collect();

        Self {
            columns,
            values,
            valid: false,
            relation: None,
        }
    }

    #[must_use]
    pub(crate) fn with_relation(mut self, relation: Arc<Relation>) -> Self {
        self.relation = Some(relation);
        self
    }

    #[must_use]
    pub const fn columns(&self) -> &Columns {
        &self.columns
    }

    #[must_use]
    pub fn value_by(&self, name: &str) -> Option<&Value> {
        self.columns.position(name).map(|idx| &self.values[idx])
    }

    pub fn value_by_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.columns
            .position(name)
            .map(move |idx| &mut self.values[idx])
    }

    #[must_use]
    pub fn into_values(self) -> Vec<Value> {
        self.values
    }

    /// Decode one result-set row, cell `i` into column `i`.
    pub fn scan_row<I>(&mut self, cells: I) -> Result<(), ValueError>
    where
        I: IntoIterator,
        I::Item: Into<Input>,
    {
        self.decode(Input::list(cells))
    }
}

impl ValueCodec for Record {
    fn kind(&self) -> ValueKind {
        ValueKind::Record
    }

    fn is_null(&self) -> bool {
        !self.valid
    }

    fn native(&self) -> Native {
        positional_native(&self.values, self.valid)
    }

    fn encode(&self) -> Vec<u8> {
        encode_positional(&self.values, self.valid)
    }

    fn decode(&mut self, input: Input) -> Result<(), ValueError> {
        let names = self.columns.names();
        self.valid = decode_positional(&mut self.values, input, PositionalKind::Record(&names))?;

        Ok(())
    }

    fn to_wire(&self) -> WireValue {
        if self.valid {
            WireValue::Text(self.text())
        } else {
            WireValue::Null
        }
    }
}

impl IteratorValue for Record {
    fn values(&self) -> &[Value] {
        &self.values
    }

    fn values_mut(&mut self) -> &mut [Value] {
        &mut self.values
    }

    fn append(&mut self, _input: Input) -> Result<(), ValueError> {
        Err(ValueError::arity(
            ErrorOrigin::Record,
            self.values.len(),
            self.values.len() + 1,
        ))
    }
}

impl MapValue for Record {
    fn names(&self) -> Vec<&str> {
        self.columns.names()
    }

    fn lookup(&self, name: &str) -> Option<Native> {
        self.value_by(name).map(ValueCodec::native)
    }

    fn get(&self, name: &str) -> Result<Native, ValueError> {
        self.lookup(name)
            .ok_or_else(|| ValueError::lookup(ErrorOrigin::Record, name))
    }

    fn set(&mut self, name: &str, input: Input) -> Result<(), ValueError> {
        let slot = self
            .value_by_mut(name)
            .ok_or_else(|| ValueError::lookup(ErrorOrigin::Record, name))?;
        slot.decode(input)
            .map_err(|err| err.with_context(format_args!(".{name}")))?;
        self.valid = true;

        Ok(())
    }
}

impl RecordValue for Record {
    fn relation(&self) -> Option<&Arc<Relation>> {
        self.relation.as_ref()
    }
}
