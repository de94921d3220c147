#[macro_use]
mod macros;

use std::fmt::{self, Display};

///
/// ValueKind
///
/// Canonical value kind used for shared quoting and classification metadata.
///

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum ValueKind {
    Array,
    Bool,
    Bytes,
    Enum,
    Float,
    HStore,
    Int,
    Numeric,
    Record,
    Row,
    Text,
    Timestamp,
}

impl ValueKind {
    /// Return the full metadata descriptor for one value kind.
    #[must_use]
    pub const fn metadata(self) -> KindMetadata {
        value_kind_registry!(metadata_from_registry, self)
    }

    /// Return the stable lowercase label used in diagnostics.
    #[must_use]
    pub const fn label(self) -> &'static str {
        self.metadata().label
    }

    /// Return whether values of this kind are written without quotes
    /// regardless of the enclosing composite.
    #[must_use]
    pub const fn is_bare_numeric(self) -> bool {
        self.metadata().is_bare_numeric
    }

    /// Return whether an array literal writes this child unquoted.
    /// Row literals quote everything that is not bare numeric.
    #[must_use]
    pub const fn bare_in_array(self) -> bool {
        let metadata = self.metadata();

        metadata.is_bare_numeric || metadata.bare_in_array_only
    }
}

impl Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

///
/// KindMetadata
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct KindMetadata {
    pub label: &'static str,
    pub is_bare_numeric: bool,

    /// Nested arrays and timestamps stay unquoted inside `{..}` only.
    pub bare_in_array_only: bool,
}

/// Ordered list of all value kinds in registry order.
pub const ALL_VALUE_KINDS: [ValueKind; 12] = value_kind_registry!(all_kinds_from_registry);

///
/// TESTS
///
