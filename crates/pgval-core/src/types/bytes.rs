use crate::{
    codec::hex::{HEX_PREFIX, decode_hex_literal, encode_hex_literal},
    error::{ErrorOrigin, ValueError},
    input::Input,
    native::Native,
    value::{NULL_SENTINEL, ValueCodec, mismatch},
    wire::WireValue,
};
use pgval_primitives::ValueKind;

///
/// Bytes
///
/// `bytea` value. The raw encoding is the `\x` hex literal. Input that is a
/// valid hex literal is decoded; any other input bytes are stored as given.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Bytes {
    value: Option<Vec<u8>>,
}

impl Bytes {
    #[must_use]
    pub const fn new() -> Self {
        Self { value: None }
    }

    #[must_use]
    pub fn get(&self) -> Option<&[u8]> {
        self.value.as_deref()
    }
}

impl ValueCodec for Bytes {
    fn kind(&self) -> ValueKind {
        ValueKind::Bytes
    }

    fn is_null(&self) -> bool {
        self.value.is_none()
    }

    fn native(&self) -> Native {
        self.value.clone().map_or(Native::Null, Native::Bytes)
    }

    fn encode(&self) -> Vec<u8> {
        self.value
            .as_deref()
            .map_or_else(|| NULL_SENTINEL.to_vec(), encode_hex_literal)
    }

    fn text(&self) -> String {
        self.value
            .as_deref()
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
            .unwrap_or_default()
    }

    fn decode(&mut self, input: Input) -> Result<(), ValueError> {
        self.value = match input.resolve() {
            Input::Null => None,
            Input::Bytes(bytes) if bytes.starts_with(HEX_PREFIX) => {
                Some(decode_hex_literal(&bytes).unwrap_or(bytes))
            }
            Input::Bytes(bytes) => Some(bytes),
            other => return Err(mismatch(self.kind(), &other, ErrorOrigin::Scalar)),
        };

        Ok(())
    }

    fn to_wire(&self) -> WireValue {
        self.value.clone().map_or(WireValue::Null, WireValue::Bytes)
    }
}

///
/// TESTS
///
