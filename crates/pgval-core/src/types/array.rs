use crate::{
    codec::{Dialect, Quoting, push_quoted, split_as},
    error::{ErrorOrigin, ValueError},
    input::Input,
    native::Native,
    value::{IteratorValue, NULL_SENTINEL, ToValue, Value, ValueCodec, mismatch},
    wire::WireValue,
};
use pgval_primitives::ValueKind;

///
/// Array
///
/// Variable-length homogeneous sequence; every child comes from `element`.
///

#[derive(Clone, Debug, PartialEq)]
pub struct Array {
    element: ToValue,
    values: Vec<Value>,
    valid: bool,
}

impl Array {
    #[must_use]
    pub const fn new(element: ToValue) -> Self {
        Self {
            element,
            values: Vec::new(),
            valid: false,
        }
    }

    #[must_use]
    pub const fn element(&self) -> &ToValue {
        &self.element
    }

    #[must_use]
    pub fn into_values(self) -> Vec<Value> {
        self.values
    }

    // Only a value built from the element type itself is taken as is; any
    // other value is re-decoded so width, length and label checks apply.
    fn child(&self, input: Input) -> Result<Value, ValueError> {
        match input {
            Input::Value(value) if value.type_spec() == *self.element.spec() => Ok(*value),
            other => self.element.make(other),
        }
    }

    fn children_from_list(&self, items: Vec<Input>) -> Result<Vec<Value>, ValueError> {
        items
            .into_iter()
            .enumerate()
            .map(|(idx, item)| {
                self.child(item)
                    .map_err(|err| err.with_context(format_args!("[{idx}]")))
            })
            .collect()
    }

    fn children_from_literal(&self, literal: &[u8]) -> Result<Vec<Value>, ValueError> {
        split_as(literal, Dialect::Array)?
            .into_iter()
            .enumerate()
            .map(|(idx, element)| {
                let child = match element {
                    Some(bytes) => self.element.make(bytes),
                    None => Ok(self.element.null()),
                };

                child.map_err(|err| err.with_context(format_args!("[{idx}]")))
            })
            .collect()
    }
}

impl ValueCodec for Array {
    fn kind(&self) -> ValueKind {
        ValueKind::Array
    }

    fn is_null(&self) -> bool {
        !self.valid
    }

    fn native(&self) -> Native {
        if !self.valid {
            return Native::Null;
        }

        Native::List(self.values.iter().map(ValueCodec::native).collect())
    }

    fn encode(&self) -> Vec<u8> {
        if !self.valid {
            return NULL_SENTINEL.to_vec();
        }

        let mut out = vec![Dialect::Array.open()];
        for (idx, child) in self.values.iter().enumerate() {
            if idx > 0 {
                out.push(b',');
            }
            if child.is_null() {
                out.extend_from_slice(NULL_SENTINEL);
            } else if child.kind().bare_in_array() {
                out.extend_from_slice(&child.encode());
            } else {
                push_quoted(&mut out, &child.encode(), Quoting::Array);
            }
        }
        out.push(Dialect::Array.close());

        out
    }

    fn decode(&mut self, input: Input) -> Result<(), ValueError> {
        let values = match input.resolve() {
            Input::Null => {
                self.values.clear();
                self.valid = false;
                return Ok(());
            }
            Input::List(items) => self.children_from_list(items)?,
            Input::Text(text) => self.children_from_literal(text.as_bytes())?,
            Input::Bytes(bytes) => self.children_from_literal(&bytes)?,
            other => return Err(mismatch(self.kind(), &other, ErrorOrigin::Array)),
        };

        self.values = values;
        self.valid = true;

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

impl IteratorValue for Array {
    fn values(&self) -> &[Value] {
        &self.values
    }

    fn values_mut(&mut self) -> &mut [Value] {
        &mut self.values
    }

    fn append(&mut self, input: Input) -> Result<(), ValueError> {
        let child = self
            .child(input)
            .map_err(|err| err.with_context(format_args!("[{}]", self.values.len())))?;
        self.values.push(child);
        self.valid = true;

        Ok(())
    }
}
