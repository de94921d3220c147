use crate::{
    error::{ErrorOrigin, ValueError},
    input::Input,
    native::Native,
    value::{NULL_SENTINEL, ValueCodec, mismatch},
    wire::WireValue,
};
use pgval_primitives::ValueKind;
use tracing::debug;

///
/// Bool
///
/// Boolean value. In lenient mode any text not starting with `t` or `1`
/// reads as false; strict mode accepts only the PostgreSQL literal set.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Bool {
    strict: bool,
    value: Option<bool>,
}

impl Bool {
    #[must_use]
    pub const fn new(strict: bool) -> Self {
        Self {
            strict,
            value: None,
        }
    }

    #[must_use]
    pub const fn is_strict(&self) -> bool {
        self.strict
    }

    #[must_use]
    pub const fn get(&self) -> Option<bool> {
        self.value
    }

    fn parse(&self, bytes: &[u8]) -> Result<bool, ValueError> {
        if self.strict {
            return parse_strict(bytes);
        }

        match bytes.first() {
            Some(b't' | b'1') => Ok(true),
            Some(b'f' | b'0') => Ok(false),
            _ => {
                debug!(
                    input = %String::from_utf8_lossy(bytes),
                    "unrecognized boolean text read as false"
                );
                Ok(false)
            }
        }
    }
}

fn parse_strict(bytes: &[u8]) -> Result<bool, ValueError> {
    let word = String::from_utf8_lossy(bytes).trim().to_ascii_lowercase();

    match word.as_str() {
        "t" | "true" | "y" | "yes" | "on" | "1" => Ok(true),
        "f" | "false" | "n" | "no" | "off" | "0" => Ok(false),
        _ => Err(ValueError::format(
            ErrorOrigin::Scalar,
            format!("invalid boolean literal '{word}'"),
        )),
    }
}

impl ValueCodec for Bool {
    fn kind(&self) -> ValueKind {
        ValueKind::Bool
    }

    fn is_null(&self) -> bool {
        self.value.is_none()
    }

    fn native(&self) -> Native {
        self.value.map_or(Native::Null, Native::Bool)
    }

    fn encode(&self) -> Vec<u8> {
        match self.value {
            None => NULL_SENTINEL.to_vec(),
            Some(true) => b"t".to_vec(),
            Some(false) => b"f".to_vec(),
        }
    }

    fn decode(&mut self, input: Input) -> Result<(), ValueError> {
        self.value = match input.resolve() {
            Input::Null => None,
            Input::Bool(b) => Some(b),
            Input::Int(n) => Some(n == 1),
            Input::UInt(n) => Some(n == 1),
            Input::Text(text) => Some(self.parse(text.as_bytes())?),
            Input::Bytes(bytes) => Some(self.parse(&bytes)?),
            other => return Err(mismatch(self.kind(), &other, ErrorOrigin::Scalar)),
        };

        Ok(())
    }

    fn to_wire(&self) -> WireValue {
        self.value.map_or(WireValue::Null, WireValue::Bool)
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    fn lenient(input: impl Into<Input>) -> Option<bool> {
        let mut value = Bool::new(false);
        value.decode(input.into()).expect("lenient decode never fails on text");

        value.get()
    }

    #[test]
    fn lenient_reads_first_byte() {
        assert_eq!(lenient("t"), Some(true));
        assert_eq!(lenient("true"), Some(true));
        assert_eq!(lenient("1"), Some(true));
        assert_eq!(lenient("f"), Some(false));
        assert_eq!(lenient(b"0".as_slice()), Some(false));
    }

    #[test]
    fn lenient_reads_unrecognized_text_as_false() {
        assert_eq!(lenient("yes"), Some(false));
        assert_eq!(lenient("TRUE"), Some(false));
        assert_eq!(lenient(""), Some(false));
    }

    #[test]
    fn native_inputs() {
        assert_eq!(lenient(true), Some(true));
        assert_eq!(lenient(1_i64), Some(true));
        assert_eq!(lenient(2_i64), Some(false));
        assert_eq!(lenient(Input::Null), None);
    }

    #[test]
    fn strict_accepts_postgres_literals() {
        let mut value = Bool::new(true);

        value.decode(Input::from("Yes")).expect("yes is a boolean literal");
        assert_eq!(value.get(), Some(true));

        value.decode(Input::from("off")).expect("off is a boolean literal");
        assert_eq!(value.get(), Some(false));
    }

    #[test]
    fn strict_rejects_unrecognized_text() {
        let mut value = Bool::new(true);
        let err = value
            .decode(Input::from("maybe"))
            .expect_err("strict mode rejects maybe");

        assert!(err.is_format());
    }

    #[test]
    fn float_input_is_type_mismatch() {
        let mut value = Bool::new(false);
        let err = value.decode(Input::Float(1.0)).expect_err("float is not a bool input");

        assert!(err.is_type_mismatch());
    }

    #[test]
    fn encodes_as_t_and_f() {
        let mut value = Bool::new(false);
        value.decode(Input::Bool(true)).expect("decodes");
        assert_eq!(value.encode(), b"t".to_vec());
        assert_eq!(value.text(), "t");

        value.decode(Input::Bool(false)).expect("decodes");
        assert_eq!(value.encode(), b"f".to_vec());
    }
}
