use crate::{
    error::{ErrorOrigin, ValueError},
    input::Input,
    native::Native,
    value::{NULL_SENTINEL, ValueCodec, mismatch, utf8},
    wire::WireValue,
};
use pgval_primitives::ValueKind;

///
/// TextLimit
///
/// Length rule applied on decode. Lengths count characters, not bytes.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TextLimit {
    Unbounded,

    /// `character varying(n)`: longer input is truncated. Zero means no limit.
    VarChar(usize),

    /// `character(n)`: trailing blanks are trimmed, longer input is rejected,
    /// shorter input is blank-padded to `n`.
    Char(usize),
}

impl TextLimit {
    fn apply(self, text: String) -> Result<String, ValueError> {
        match self {
            Self::Unbounded | Self::VarChar(0) => Ok(text),
            Self::VarChar(n) => Ok(match text.char_indices().nth(n) {
                Some((cut, _)) => text[..cut].to_string(),
                None => text,
            }),
            Self::Char(n) => {
                let trimmed = text.trim_end_matches(' ');
                let len = trimmed.chars().count();
                if len > n {
                    return Err(ValueError::constraint(
                        ErrorOrigin::Scalar,
                        format!("value of length {len} too long for character({n})"),
                    ));
                }

                let mut padded = String::with_capacity(trimmed.len() + (n - len));
                padded.push_str(trimmed);
                padded.extend(std::iter::repeat_n(' ', n - len));

                Ok(padded)
            }
        }
    }
}

///
/// Text
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Text {
    limit: TextLimit,
    value: Option<String>,
}

impl Text {
    #[must_use]
    pub const fn new(limit: TextLimit) -> Self {
        Self { limit, value: None }
    }

    #[must_use]
    pub const fn limit(&self) -> TextLimit {
        self.limit
    }

    #[must_use]
    pub fn get(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

impl ValueCodec for Text {
    fn kind(&self) -> ValueKind {
        ValueKind::Text
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

    fn text(&self) -> String {
        self.value.clone().unwrap_or_default()
    }

    fn decode(&mut self, input: Input) -> Result<(), ValueError> {
        self.value = match input.resolve() {
            Input::Null => None,
            Input::Text(text) => Some(self.limit.apply(text)?),
            Input::Bytes(bytes) => Some(self.limit.apply(utf8(bytes, ErrorOrigin::Scalar)?)?),
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
