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
/// Row
///
/// Fixed-arity positional composite; child `i` comes from constructor `i`.
///

#[derive(Clone, Debug, PartialEq)]
pub struct Row {
    values: Vec<Value>,
    valid: bool,
}

impl Row {
    #[must_use]
    pub fn new(elements: &[ToValue]) -> Self {
        Self {
            values: elements.iter().map(ToValue::null).collect(),
            valid: false,
        }
    }

    #[must_use]
    pub fn into_values(self) -> Vec<Value> {
        self.values
    }

    /// Decode one result-set row, cell `i` into child `i`.
    pub fn scan_row<I>(&mut self, cells: I) -> Result<(), ValueError>
    where
        I: IntoIterator,
        I::Item: Into<Input>,
    {
        self.decode(Input::list(cells))
    }
}

impl ValueCodec for Row {
    fn kind(&self) -> ValueKind {
        ValueKind::Row
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
        self.valid = decode_positional(&mut self.values, input, PositionalKind::Row)?;

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

impl IteratorValue for Row {
    fn values(&self) -> &[Value] {
        &self.values
    }

    fn values_mut(&mut self) -> &mut [Value] {
        &mut self.values
    }

    fn append(&mut self, _input: Input) -> Result<(), ValueError> {
        Err(ValueError::arity(
            ErrorOrigin::Row,
            self.values.len(),
            self.values.len() + 1,
        ))
    }
}

///
/// PositionalKind
///
/// Which fixed-arity composite is decoding; picks the error origin and the
/// path segment used in error context.
///

#[derive(Clone, Copy)]
pub(crate) enum PositionalKind<'a> {
    Row,
    Record(&'a [&'a str]),
}

impl PositionalKind<'_> {
    const fn origin(self) -> ErrorOrigin {
        match self {
            Self::Row => ErrorOrigin::Row,
            Self::Record(_) => ErrorOrigin::Record,
        }
    }

    const fn kind(self) -> ValueKind {
        match self {
            Self::Row => ValueKind::Row,
            Self::Record(_) => ValueKind::Record,
        }
    }
}

fn context(kind: PositionalKind<'_>, idx: usize, err: ValueError) -> ValueError {
    let name = match kind {
        PositionalKind::Record(names) => names.get(idx).copied(),
        PositionalKind::Row => None,
    };

    match name {
        Some(name) => err.with_context(format_args!(".{name}")),
        None => err.with_context(format_args!("[{idx}]")),
    }
}

/// Decode `input` into fixed-arity children; returns the new validity flag.
pub(crate) fn decode_positional(
    values: &mut [Value],
    input: Input,
    kind: PositionalKind<'_>,
) -> Result<bool, ValueError> {
    let inputs: Vec<Input> = match input.resolve() {
        Input::Null => return Ok(false),
        Input::List(items) => items,
        Input::Text(text) => literal_inputs(text.as_bytes(), values.len())?,
        Input::Bytes(bytes) => literal_inputs(&bytes, values.len())?,
        other => return Err(mismatch(kind.kind(), &other, kind.origin())),
    };

    if inputs.len() != values.len() {
        return Err(ValueError::arity(kind.origin(), values.len(), inputs.len()));
    }

    for (idx, (slot, item)) in values.iter_mut().zip(inputs).enumerate() {
        slot.decode(item).map_err(|err| context(kind, idx, err))?;
    }

    Ok(true)
}

// `()` splits into one NULL field; a zero-arity composite reads it as empty.
fn literal_inputs(literal: &[u8], arity: usize) -> Result<Vec<Input>, ValueError> {
    if arity == 0 && literal.trim_ascii() == b"()" {
        return Ok(Vec::new());
    }

    Ok(split_as(literal, Dialect::Row)?
        .into_iter()
        .map(|element| element.map_or(Input::Null, Input::Bytes))
        .collect())
}

pub(crate) fn encode_positional(values: &[Value], valid: bool) -> Vec<u8> {
    if !valid {
        return NULL_SENTINEL.to_vec();
    }

    let mut out = vec![Dialect::Row.open()];
    for (idx, child) in values.iter().enumerate() {
        if idx > 0 {
            out.push(b',');
        }
        if child.is_null() {
            continue;
        }
        if child.kind().is_bare_numeric() {
            out.extend_from_slice(&child.encode());
        } else {
            push_quoted(&mut out, &child.encode(), Quoting::Row);
        }
    }
    out.push(Dialect::Row.close());

    out
}

pub(crate) fn positional_native(values: &[Value], valid: bool) -> Native {
    if !valid {
        return Native::Null;
    }

    Native::List(values.iter().map(ValueCodec::native).collect())
}
