use crate::{
    error::{ErrorOrigin, ValueError},
    input::Input,
    native::Native,
    value::{NULL_SENTINEL, ValueCodec, mismatch, utf8},
    wire::WireValue,
};
use pgval_primitives::ValueKind;
use std::num::IntErrorKind;

///
/// IntWidth
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum IntWidth {
    Bits8,
    Bits16,
    Bits32,
    Bits64,
}

impl IntWidth {
    #[must_use]
    pub const fn bits(self) -> u32 {
        match self {
            Self::Bits8 => 8,
            Self::Bits16 => 16,
            Self::Bits32 => 32,
            Self::Bits64 => 64,
        }
    }

    /// Inclusive signed bounds of this width.
    #[must_use]
    pub const fn bounds(self) -> (i64, i64) {
        match self {
            Self::Bits8 => (i8::MIN as i64, i8::MAX as i64),
            Self::Bits16 => (i16::MIN as i64, i16::MAX as i64),
            Self::Bits32 => (i32::MIN as i64, i32::MAX as i64),
            Self::Bits64 => (i64::MIN, i64::MAX),
        }
    }

    /// Check a native integer against this width.
    ///
    /// Narrow widths accept values strictly below the signed maximum, so
    /// `i16::MAX` itself is rejected for a 16-bit column. 64-bit always fits.
    pub fn fit(self, n: i64) -> Result<i64, ValueError> {
        let (min, max) = self.bounds();
        if self == Self::Bits64 || (n >= min && n < max) {
            Ok(n)
        } else {
            Err(self.out_of_range(n))
        }
    }

    /// Check an unsigned native integer against this width.
    pub fn fit_unsigned(self, n: u64) -> Result<i64, ValueError> {
        match i64::try_from(n) {
            Ok(signed) if signed < i64::MAX => self.fit(signed),
            _ => Err(self.out_of_range(n)),
        }
    }

    /// Parse a decimal literal; the inclusive bounds apply here.
    pub fn parse(self, text: &str) -> Result<i64, ValueError> {
        let n: i64 = text.parse().map_err(|err: std::num::ParseIntError| match err.kind() {
            IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => self.out_of_range(text),
            _ => ValueError::format(
                ErrorOrigin::Scalar,
                format!("invalid integer literal '{text}'"),
            ),
        })?;

        let (min, max) = self.bounds();
        if n < min || n > max {
            return Err(self.out_of_range(n));
        }

        Ok(n)
    }

    fn out_of_range(self, n: impl std::fmt::Display) -> ValueError {
        ValueError::range(
            ErrorOrigin::Scalar,
            format!("value {n} out of range for {}-bit integer", self.bits()),
        )
    }
}

///
/// Int
///
/// Signed integer of a declared width, stored as `i64`.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Int {
    width: IntWidth,
    value: Option<i64>,
}

impl Int {
    #[must_use]
    pub const fn new(width: IntWidth) -> Self {
        Self { width, value: None }
    }

    #[must_use]
    pub const fn width(&self) -> IntWidth {
        self.width
    }

    #[must_use]
    pub const fn get(&self) -> Option<i64> {
        self.value
    }
}

impl ValueCodec for Int {
    fn kind(&self) -> ValueKind {
        ValueKind::Int
    }

    fn is_null(&self) -> bool {
        self.value.is_none()
    }

    fn native(&self) -> Native {
        self.value.map_or(Native::Null, Native::Int)
    }

    fn encode(&self) -> Vec<u8> {
        self.value
            .map_or_else(|| NULL_SENTINEL.to_vec(), |v| v.to_string().into_bytes())
    }

    fn decode(&mut self, input: Input) -> Result<(), ValueError> {
        self.value = match input.resolve() {
            Input::Null => None,
            Input::Int(n) => Some(self.width.fit(n)?),
            Input::UInt(n) => Some(self.width.fit_unsigned(n)?),
            Input::Text(text) => Some(self.width.parse(&text)?),
            Input::Bytes(bytes) => Some(self.width.parse(&utf8(bytes, ErrorOrigin::Scalar)?)?),
            other => return Err(mismatch(self.kind(), &other, ErrorOrigin::Scalar)),
        };

        Ok(())
    }

    fn to_wire(&self) -> WireValue {
        self.value.map_or(WireValue::Null, WireValue::Int)
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn decoded(width: IntWidth, input: impl Into<Input>) -> Result<Int, ValueError> {
        let mut value = Int::new(width);
        value.decode(input.into())?;

        Ok(value)
    }

    #[test]
    fn text_accepts_inclusive_bounds() {
        let max = decoded(IntWidth::Bits16, "32767").expect("32767 text fits int2");
        let min = decoded(IntWidth::Bits16, "-32768").expect("-32768 text fits int2");

        assert_eq!(max.get(), Some(32767));
        assert_eq!(min.get(), Some(-32768));
    }

    #[test]
    fn text_overflow_is_range_error() {
        let err = decoded(IntWidth::Bits16, "40000").expect_err("40000 overflows int2");
        assert!(err.is_range());

        let err = decoded(IntWidth::Bits64, "99999999999999999999").expect_err("overflows i64");
        assert!(err.is_range());
    }

    #[test]
    fn text_garbage_is_format_error() {
        let err = decoded(IntWidth::Bits32, "12a").expect_err("12a is not an integer");

        assert!(err.is_format());
    }

    #[test]
    fn native_exact_maximum_is_rejected_for_narrow_widths() {
        let err = decoded(IntWidth::Bits16, 32767_i64).expect_err("native max is out of range");
        assert!(err.is_range());

        let err = decoded(IntWidth::Bits8, 127_i64).expect_err("native max is out of range");
        assert!(err.is_range());

        let ok = decoded(IntWidth::Bits16, 32766_i64).expect("one below max fits");
        assert_eq!(ok.get(), Some(32766));
    }

    #[test]
    fn native_64_bit_always_fits() {
        let value = decoded(IntWidth::Bits64, i64::MAX).expect("i64::MAX fits int8");

        assert_eq!(value.native(), Native::Int(i64::MAX));
    }

    #[test]
    fn unsigned_input_must_be_below_i64_max() {
        let err = decoded(IntWidth::Bits64, u64::MAX).expect_err("u64::MAX cannot fit");
        assert!(err.is_range());

        let value = decoded(IntWidth::Bits32, 7_u32).expect("small unsigned fits");
        assert_eq!(value.get(), Some(7));
    }

    #[test]
    fn float_input_is_type_mismatch() {
        let err = decoded(IntWidth::Bits32, 1.5_f64).expect_err("float is not an int input");

        assert!(err.is_type_mismatch());
    }

    #[test]
    fn failed_decode_keeps_previous_value() {
        let mut value = decoded(IntWidth::Bits16, 5_i64).expect("5 fits");
        value
            .decode(Input::from("40000"))
            .expect_err("overflow must fail");

        assert_eq!(value.get(), Some(5));
    }

    #[test]
    fn null_encodes_as_sentinel_and_empty_text() {
        let value = decoded(IntWidth::Bits32, Input::Null).expect("null decodes");

        assert!(value.is_null());
        assert_eq!(value.encode(), NULL_SENTINEL.to_vec());
        assert_eq!(value.text(), "");
        assert_eq!(value.to_wire(), WireValue::Null);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]

        #[test]
        fn int4_accepts_exactly_below_max(n in any::<i64>()) {
            let result = decoded(IntWidth::Bits32, n);
            let fits = n >= i64::from(i32::MIN) && n < i64::from(i32::MAX);

            prop_assert_eq!(result.is_ok(), fits);
        }

        #[test]
        fn int8_text_roundtrip(n in any::<i64>()) {
            let value = decoded(IntWidth::Bits64, n).expect("every i64 fits int8");
            let again = decoded(IntWidth::Bits64, value.text()).expect("text form parses");

            prop_assert_eq!(again.get(), Some(n));
        }
    }
}
