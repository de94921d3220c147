use crate::{
    error::{ErrorOrigin, ValueError},
    input::Input,
    native::Native,
    value::{NULL_SENTINEL, ValueCodec, mismatch, utf8},
    wire::WireValue,
};
use pgval_primitives::ValueKind;

///
/// Numeric
///
/// Arbitrary precision decimal kept as its literal text. Float input is
/// rendered at the declared scale; text input is validated and kept verbatim.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Numeric {
    precision: Option<u32>,
    scale: u32,
    value: Option<String>,
}

impl Numeric {
    #[must_use]
    pub const fn new(precision: Option<u32>, scale: u32) -> Self {
        Self {
            precision,
            scale,
            value: None,
        }
    }

    #[must_use]
    pub const fn precision(&self) -> Option<u32> {
        self.precision
    }

    #[must_use]
    pub const fn scale(&self) -> u32 {
        self.scale
    }

    #[must_use]
    pub fn get(&self) -> Option<&str> {
        self.value.as_deref()
    }

    fn from_float(&self, x: f64) -> String {
        if x.is_nan() {
            "NaN".to_string()
        } else if x.is_infinite() {
            if x > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
        } else {
            format!("{x:.prec$}", prec = self.scale as usize)
        }
    }
}

/// Return whether `text` is a decimal literal PostgreSQL accepts for `numeric`.
#[must_use]
pub fn is_numeric_literal(text: &str) -> bool {
    if ["NaN", "Infinity", "+Infinity", "-Infinity"]
        .iter()
        .any(|special| special.eq_ignore_ascii_case(text))
    {
        return true;
    }

    let bytes = text.as_bytes();
    let mut pos = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));

    let int_digits = count_digits(&bytes[pos..]);
    pos += int_digits;

    let mut frac_digits = 0;
    if bytes.get(pos) == Some(&b'.') {
        pos += 1;
        frac_digits = count_digits(&bytes[pos..]);
        pos += frac_digits;
    }
    if int_digits + frac_digits == 0 {
        return false;
    }

    if matches!(bytes.get(pos), Some(b'e' | b'E')) {
        pos += 1;
        pos += usize::from(matches!(bytes.get(pos), Some(b'+' | b'-')));
        let exp_digits = count_digits(&bytes[pos..]);
        if exp_digits == 0 {
            return false;
        }
        pos += exp_digits;
    }

    pos == bytes.len()
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

fn validated(text: String) -> Result<String, ValueError> {
    if is_numeric_literal(&text) {
        Ok(text)
    } else {
        Err(ValueError::format(
            ErrorOrigin::Scalar,
            format!("invalid numeric literal '{text}'"),
        ))
    }
}

impl ValueCodec for Numeric {
    fn kind(&self) -> ValueKind {
        ValueKind::Numeric
    }

    fn is_null(&self) -> bool {
        self.value.is_none()
    }

    fn native(&self) -> Native {
        self.value.clone().map_or(Native::Null, Native::Text)
    }

    fn encode(&self) -> Vec<u8> {
        self.value
            .as_ref()
            .map_or_else(|| NULL_SENTINEL.to_vec(), |s| s.as_bytes().to_vec())
    }

    fn decode(&mut self, input: Input) -> Result<(), ValueError> {
        self.value = match input.resolve() {
            Input::Null => None,
            Input::Float(x) => Some(self.from_float(x)),
            Input::Int(n) => Some(n.to_string()),
            Input::UInt(n) => Some(n.to_string()),
            Input::Text(text) => Some(validated(text)?),
            Input::Bytes(bytes) => Some(validated(utf8(bytes, ErrorOrigin::Scalar)?)?),
            other => return Err(mismatch(self.kind(), &other, ErrorOrigin::Scalar)),
        };

        Ok(())
    }

    fn to_wire(&self) -> WireValue {
        self.value.clone().map_or(WireValue::Null, WireValue::Text)
    }
}

///
/// TESTS
///
