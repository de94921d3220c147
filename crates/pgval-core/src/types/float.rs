use crate::{
    error::{ErrorOrigin, ValueError},
    input::Input,
    native::Native,
    value::{NULL_SENTINEL, ValueCodec, mismatch, utf8},
    wire::WireValue,
};
use pgval_primitives::ValueKind;

///
/// FloatWidth
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum FloatWidth {
    Bits32,
    Bits64,
}

impl FloatWidth {
    #[must_use]
    pub const fn bits(self) -> u32 {
        match self {
            Self::Bits32 => 32,
            Self::Bits64 => 64,
        }
    }

    fn check(self, x: f64) -> Result<f64, ValueError> {
        if self == Self::Bits32 && x.is_finite() && x.abs() > f64::from(f32::MAX) {
            return Err(ValueError::range(
                ErrorOrigin::Scalar,
                format!("value {x} out of range for 32-bit float"),
            ));
        }

        Ok(x)
    }
}

///
/// Float
///
/// Floating point value. Always stored at 64-bit precision; the width only
/// bounds the accepted magnitude and the precision of the raw encoding.
///

#[derive(Clone, Debug, PartialEq)]
pub struct Float {
    width: FloatWidth,
    value: Option<f64>,
}

impl Float {
    #[must_use]
    pub const fn new(width: FloatWidth) -> Self {
        Self { width, value: None }
    }

    #[must_use]
    pub const fn width(&self) -> FloatWidth {
        self.width
    }

    #[must_use]
    pub const fn get(&self) -> Option<f64> {
        self.value
    }

    fn parse(&self, text: &str) -> Result<f64, ValueError> {
        let x: f64 = text.parse().map_err(|_| {
            ValueError::format(
                ErrorOrigin::Scalar,
                format!("invalid float literal '{text}'"),
            )
        })?;

        self.width.check(x)
    }
}

impl ValueCodec for Float {
    fn kind(&self) -> ValueKind {
        ValueKind::Float
    }

    fn is_null(&self) -> bool {
        self.value.is_none()
    }

    fn native(&self) -> Native {
        self.value.map_or(Native::Null, Native::Float)
    }

    fn encode(&self) -> Vec<u8> {
        match (self.value, self.width) {
            (None, _) => NULL_SENTINEL.to_vec(),
            (Some(x), FloatWidth::Bits32) => format_single(x).into_bytes(),
            (Some(x), FloatWidth::Bits64) => format_double(x).into_bytes(),
        }
    }

    // The textual form is single precision for both widths.
    fn text(&self) -> String {
        self.value.map(format_single).unwrap_or_default()
    }

    fn decode(&mut self, input: Input) -> Result<(), ValueError> {
        self.value = match input.resolve() {
            Input::Null => None,
            Input::Float(x) => Some(self.width.check(x)?),
            Input::Text(text) => Some(self.parse(&text)?),
            Input::Bytes(bytes) => Some(self.parse(&utf8(bytes, ErrorOrigin::Scalar)?)?),
            other => return Err(mismatch(self.kind(), &other, ErrorOrigin::Scalar)),
        };

        Ok(())
    }

    fn to_wire(&self) -> WireValue {
        self.value.map_or(WireValue::Null, WireValue::Float)
    }
}

fn format_special(x: f64) -> Option<&'static str> {
    if x.is_nan() {
        Some("NaN")
    } else if x == f64::INFINITY {
        Some("Infinity")
    } else if x == f64::NEG_INFINITY {
        Some("-Infinity")
    } else {
        None
    }
}

#[allow(clippy::cast_possible_truncation)]
fn format_single(x: f64) -> String {
    if let Some(special) = format_special(x) {
        return special.to_string();
    }
    if x.abs() > f64::from(f32::MAX) {
        return x.to_string();
    }

    (x as f32).to_string()
}

fn format_double(x: f64) -> String {
    format_special(x).map_or_else(|| x.to_string(), str::to_string)
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    fn decoded(width: FloatWidth, input: impl Into<Input>) -> Result<Float, ValueError> {
        let mut value = Float::new(width);
        value.decode(input.into())?;

        Ok(value)
    }

    #[test]
    fn float4_rejects_magnitude_above_single_max() {
        let err = decoded(FloatWidth::Bits32, 1e39_f64).expect_err("1e39 overflows float4");
        assert!(err.is_range());

        let err = decoded(FloatWidth::Bits32, "-1e39").expect_err("-1e39 overflows float4");
        assert!(err.is_range());
    }

    #[test]
    fn float4_keeps_full_precision_internally() {
        let value = decoded(FloatWidth::Bits32, 0.1_f64).expect("0.1 fits float4");

        assert_eq!(value.get(), Some(0.1));
        assert_eq!(value.native(), Native::Float(0.1));
    }

    #[test]
    fn text_form_is_single_precision_for_both_widths() {
        let double = decoded(FloatWidth::Bits64, 1.000_000_1_f64).expect("decodes");

        assert_eq!(double.text(), (1.000_000_1_f32).to_string());
        assert_eq!(double.encode(), b"1.0000001".to_vec());
    }

    #[test]
    fn raw_encoding_of_double_keeps_precision() {
        let value = decoded(FloatWidth::Bits64, 0.123_456_789_012_f64).expect("decodes");

        assert_eq!(value.encode(), b"0.123456789012".to_vec());
    }

    #[test]
    fn text_form_falls_back_to_double_outside_single_range() {
        let value = decoded(FloatWidth::Bits64, 1e300_f64).expect("float8 accepts 1e300");

        assert_eq!(value.text(), 1e300_f64.to_string());
    }

    #[test]
    fn special_values_use_postgres_spelling() {
        for (input, expected) in [("Infinity", "Infinity"), ("-Infinity", "-Infinity"), ("NaN", "NaN")] {
            let value = decoded(FloatWidth::Bits64, input).expect("special value parses");
            assert_eq!(value.text(), expected);
        }
    }

    #[test]
    fn integer_input_is_type_mismatch() {
        let err = decoded(FloatWidth::Bits64, 3_i32).expect_err("ints are not float inputs");

        assert!(err.is_type_mismatch());
    }

    #[test]
    fn garbage_text_is_format_error() {
        let err = decoded(FloatWidth::Bits64, "one point five").expect_err("not a float");

        assert!(err.is_format());
    }
}
