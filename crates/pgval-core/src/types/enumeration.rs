use crate::{
    error::{ErrorOrigin, ValueError},
    input::Input,
    native::Native,
    value::{NULL_SENTINEL, ValueCodec, mismatch, utf8},
    wire::WireValue,
};
use derive_more::Deref;
use pgval_primitives::ValueKind;
use std::sync::Arc;

///
/// EnumLabels
///
/// Non-empty, shared label set of an enumerated type.
///

#[derive(Clone, Debug, Deref, Eq, PartialEq)]
pub struct EnumLabels(Arc<[String]>);

impl EnumLabels {
    pub fn new<I, S>(labels: I) -> Result<Self, ValueError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Arc<[String]> = labels.into_iter().map(Into::into).collect();
        if labels.is_empty() {
            return Err(ValueError::registry("enumeration needs at least one label"));
        }

        Ok(Self(labels))
    }

    #[must_use]
    pub fn contains_label(&self, label: &str) -> bool {
        self.0.iter().any(|l| l == label)
    }
}

///
/// Enum
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Enum {
    labels: EnumLabels,
    value: Option<String>,
}

impl Enum {
    #[must_use]
    pub const fn new(labels: EnumLabels) -> Self {
        Self {
            labels,
            value: None,
        }
    }

    #[must_use]
    pub const fn labels(&self) -> &EnumLabels {
        &self.labels
    }

    #[must_use]
    pub fn get(&self) -> Option<&str> {
        self.value.as_deref()
    }

    fn check(&self, label: String) -> Result<String, ValueError> {
        if self.labels.contains_label(&label) {
            Ok(label)
        } else {
            Err(ValueError::constraint(
                ErrorOrigin::Scalar,
                format!(
                    "'{label}' is not one of [{}]",
                    self.labels.join(", ")
                ),
            ))
        }
    }
}

impl ValueCodec for Enum {
    fn kind(&self) -> ValueKind {
        ValueKind::Enum
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
            Input::Text(text) => Some(self.check(text)?),
            Input::Bytes(bytes) => Some(self.check(utf8(bytes, ErrorOrigin::Scalar)?)?),
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

#[cfg(test)]
mod tests {
    use super::*;

    fn mood() -> Enum {
        Enum::new(EnumLabels::new(["sad", "ok", "happy"]).expect("labels are non-empty"))
    }

    #[test]
    fn accepts_declared_label() {
        let mut value = mood();
        value.decode(Input::from("ok")).expect("ok is a label");

        assert_eq!(value.get(), Some("ok"));
        assert_eq!(value.encode(), b"ok".to_vec());
    }

    #[test]
    fn membership_is_case_sensitive() {
        let mut value = mood();
        let err = value.decode(Input::from("OK")).expect_err("OK is not a label");

        assert!(err.is_constraint());
        assert!(err.message.contains("[sad, ok, happy]"));
    }

    #[test]
    fn empty_label_set_is_registry_error() {
        let err = EnumLabels::new(Vec::<String>::new()).expect_err("labels are required");

        assert!(err.is_registry());
    }

    #[test]
    fn labels_deref_to_slice() {
        let value = mood();

        assert_eq!(value.labels().len(), 3);
        assert_eq!(value.labels()[2], "happy");
    }
}
