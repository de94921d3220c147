use std::fmt;
use thiserror::Error as ThisError;

///
/// ValueError
///
/// Structured codec error with a stable classification.
/// `class` says what went wrong, `origin` says which layer noticed it.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("{message}")]
pub struct ValueError {
    pub class: ErrorClass,
    pub origin: ErrorOrigin,
    pub message: String,
}

impl ValueError {
    pub fn new(class: ErrorClass, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            class,
            origin,
            message: message.into(),
        }
    }

    /// The input kind has no conversion rule for the target type.
    pub fn type_mismatch(origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self::new(ErrorClass::TypeMismatch, origin, message)
    }

    /// A numeric value does not fit the declared width.
    pub fn range(origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self::new(ErrorClass::Range, origin, message)
    }

    /// Textual input is not valid for the target syntax.
    pub fn format(origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self::new(ErrorClass::Format, origin, message)
    }

    /// A fixed-arity composite received the wrong number of elements.
    pub fn arity(origin: ErrorOrigin, expected: usize, found: usize) -> Self {
        Self::new(
            ErrorClass::Arity,
            origin,
            format!("expected {expected} elements, found {found}"),
        )
    }

    /// A value violates a declared constraint (length, enum membership).
    pub fn constraint(origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self::new(ErrorClass::Constraint, origin, message)
    }

    /// A named child does not exist.
    pub fn lookup(origin: ErrorOrigin, name: &str) -> Self {
        Self::new(
            ErrorClass::Lookup,
            origin,
            format!("no child named '{name}'"),
        )
    }

    /// Type resolution or constructor parameters failed.
    pub fn registry(message: impl Into<String>) -> Self {
        Self::new(ErrorClass::Registry, ErrorOrigin::Registry, message)
    }

    /// Prefix the message with a path segment such as `[2]` or `.age`.
    #[must_use]
    pub fn with_context(mut self, segment: impl fmt::Display) -> Self {
        self.message = format!("{segment}: {}", self.message);
        self
    }

    #[must_use]
    pub fn display_with_class(&self) -> String {
        format!("{}:{}: {}", self.origin, self.class, self.message)
    }

    #[must_use]
    pub const fn is_type_mismatch(&self) -> bool {
        matches!(self.class, ErrorClass::TypeMismatch)
    }

    #[must_use]
    pub const fn is_range(&self) -> bool {
        matches!(self.class, ErrorClass::Range)
    }

    #[must_use]
    pub const fn is_format(&self) -> bool {
        matches!(self.class, ErrorClass::Format)
    }

    #[must_use]
    pub const fn is_arity(&self) -> bool {
        matches!(self.class, ErrorClass::Arity)
    }

    #[must_use]
    pub const fn is_constraint(&self) -> bool {
        matches!(self.class, ErrorClass::Constraint)
    }

    #[must_use]
    pub const fn is_lookup(&self) -> bool {
        matches!(self.class, ErrorClass::Lookup)
    }

    #[must_use]
    pub const fn is_registry(&self) -> bool {
        matches!(self.class, ErrorClass::Registry)
    }
}

impl From<pgval_config::ConfigError> for ValueError {
    fn from(err: pgval_config::ConfigError) -> Self {
        Self::new(ErrorClass::Registry, ErrorOrigin::Config, err.to_string())
    }
}

///
/// ErrorClass
/// Error taxonomy for codec failures.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ErrorClass {
    TypeMismatch,
    Range,
    Format,
    Arity,
    Constraint,
    Lookup,
    Registry,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::TypeMismatch => "type_mismatch",
            Self::Range => "range",
            Self::Format => "format",
            Self::Arity => "arity",
            Self::Constraint => "constraint",
            Self::Lookup => "lookup",
            Self::Registry => "registry",
        };
        write!(f, "{label}")
    }
}

///
/// ErrorOrigin
/// Layer that detected the failure.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
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

impl fmt::Display for ErrorOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Scalar => "scalar",
            Self::Tokenizer => "tokenizer",
            Self::Array => "array",
            Self::Row => "row",
            Self::Record => "record",
            Self::HStore => "hstore",
            Self::Registry => "registry",
            Self::Config => "config",
        };
        write!(f, "{label}")
    }
}

///
/// TESTS
///
