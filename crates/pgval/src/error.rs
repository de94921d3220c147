use derive_more::Display;
use pgval_config::ConfigError;
use pgval_core::error::{ErrorClass, ErrorOrigin as CoreErrorOrigin, ValueError};
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

///
/// Error
/// Public error type with a stable kind + origin taxonomy.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize, ThisError)]
#[error("{message}")]
pub struct Error {
    pub kind: ErrorKind,
    pub origin: ErrorOrigin,
    pub message: String,
}

impl Error {
    pub fn new(kind: ErrorKind, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            kind,
            origin,
            message: message.into(),
        }
    }
}

impl From<ValueError> for Error {
    fn from(err: ValueError) -> Self {
        let kind = match err.class {
            ErrorClass::TypeMismatch => ErrorKind::Decode(DecodeErrorKind::TypeMismatch),
            ErrorClass::Range => ErrorKind::Decode(DecodeErrorKind::Range),
            ErrorClass::Format => ErrorKind::Decode(DecodeErrorKind::Format),
            ErrorClass::Arity => ErrorKind::Decode(DecodeErrorKind::Arity),
            ErrorClass::Constraint => ErrorKind::Decode(DecodeErrorKind::Constraint),
            ErrorClass::Lookup => ErrorKind::Lookup,
            ErrorClass::Registry if err.origin == CoreErrorOrigin::Config => ErrorKind::Config,
            ErrorClass::Registry => ErrorKind::Registry,
        };

        Self::new(kind, err.origin.into(), err.message)
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::new(ErrorKind::Config, ErrorOrigin::Config, err.to_string())
    }
}

///
/// ErrorKind
/// Public error taxonomy for callers.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum ErrorKind {
    Decode(DecodeErrorKind),

    /// Named child not declared by the record.
    Lookup,

    /// Unknown type or invalid constructor parameters.
    Registry,

    /// Configuration could not be read or is invalid.
    Config,
}

///
/// DecodeErrorKind
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum DecodeErrorKind {
    /// Input kind has no conversion rule for the target type.
    TypeMismatch,

    /// Number does not fit the declared width.
    Range,

    /// Text does not parse under the type's grammar.
    Format,

    /// Composite element count differs from the declared arity.
    Arity,

    /// Length or label constraint violated.
    Constraint,
}

///
/// ErrorOrigin
/// Public origin taxonomy for callers.
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
pub enum ErrorOrigin {
    Scalar,
    Tokenizer,
    Array,
    Row,
    Record,
    HStore,
    Registry,
    Config,
}

impl From<CoreErrorOrigin> for ErrorOrigin {
    fn from(origin: CoreErrorOrigin) -> Self {
        match origin {
            CoreErrorOrigin::Scalar => Self::Scalar,
            CoreErrorOrigin::Tokenizer => Self::Tokenizer,
            CoreErrorOrigin::Array => Self::Array,
            CoreErrorOrigin::Row => Self::Row,
            CoreErrorOrigin::Record => Self::Record,
            CoreErrorOrigin::HStore => Self::HStore,
            CoreErrorOrigin::Registry => Self::Registry,
            CoreErrorOrigin::Config => Self::Config,
        }
    }
}
