use crate::ConfigError;
use serde::Deserialize;
use std::{collections::BTreeSet, fs, path::Path};

/// Largest scale PostgreSQL accepts for `numeric`.
pub const MAX_NUMERIC_SCALE: u32 = 1000;

///
/// Config
///
/// Root document of `pgval.toml`.
///

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Codec behaviour switches.
    #[serde(default)]
    pub codec: CodecConfig,

    /// Runtime type registrations, applied in document order.
    #[serde(default)]
    pub types: Vec<TypeConfig>,
}

impl Config {
    /// Load and validate configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::parse(&content)
    }

    /// Parse and validate configuration from a TOML string.
    pub fn parse(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;

        Ok(config)
    }

    /// Check cross-entry rules that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.codec.validate()?;

        let mut oids = BTreeSet::new();
        let mut names = BTreeSet::new();
        for ty in &self.types {
            ty.validate()?;

            if !oids.insert(ty.oid) {
                return Err(ConfigError::invalid(format!("duplicate type oid {}", ty.oid)));
            }
            if !names.insert(ty.name.as_str()) {
                return Err(ConfigError::invalid(format!(
                    "duplicate type name '{}'",
                    ty.name
                )));
            }
        }

        Ok(())
    }

    /// Find a registration by type name.
    #[must_use]
    pub fn type_named(&self, name: &str) -> Option<&TypeConfig> {
        self.types.iter().find(|ty| ty.name == name)
    }
}

///
/// CodecConfig
///

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct CodecConfig {
    /// Reject boolean text outside the PostgreSQL literal set instead of reading it as false.
    #[serde(default)]
    pub strict_bool: bool,

    /// Keep `key => NULL` pairs in hstore values instead of dropping them.
    #[serde(default)]
    pub hstore_keep_null: bool,

    /// Scale used when a numeric type carries only a precision.
    #[serde(default = "default_numeric_scale")]
    pub numeric_default_scale: u32,
}

const fn default_numeric_scale() -> u32 {
    2
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            strict_bool: false,
            hstore_keep_null: false,
            numeric_default_scale: default_numeric_scale(),
        }
    }
}

impl CodecConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.numeric_default_scale > MAX_NUMERIC_SCALE {
            return Err(ConfigError::invalid(format!(
                "numeric_default_scale {} exceeds {MAX_NUMERIC_SCALE}",
                self.numeric_default_scale
            )));
        }

        Ok(())
    }
}

///
/// TypeKind
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    Array,
    Domain,
    Enum,
    Hstore,
    Record,
}

///
/// TypeConfig
///
/// One `[[types]]` entry. Which optional fields are required depends on `kind`.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct TypeConfig {
    pub oid: u32,
    pub name: String,
    pub kind: TypeKind,

    /// Enum labels in declaration order.
    #[serde(default)]
    pub labels: Vec<String>,

    /// Record columns in positional order.
    #[serde(default)]
    pub columns: Vec<ColumnConfig>,

    /// Element type name for arrays.
    #[serde(default)]
    pub element: Option<String>,

    /// Underlying type name for domains.
    #[serde(default)]
    pub base: Option<String>,
}

impl TypeConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.oid == 0 {
            return Err(ConfigError::invalid(format!(
                "type '{}' must have a non-zero oid",
                self.name
            )));
        }
        if self.name.trim().is_empty() {
            return Err(ConfigError::invalid(format!(
                "type with oid {} has an empty name",
                self.oid
            )));
        }

        self.check_field(!self.labels.is_empty(), TypeKind::Enum, "labels")?;
        self.check_field(!self.columns.is_empty(), TypeKind::Record, "columns")?;
        self.check_field(self.element.is_some(), TypeKind::Array, "element")?;
        self.check_field(self.base.is_some(), TypeKind::Domain, "base")?;

        match self.kind {
            TypeKind::Enum => {
                let mut seen = BTreeSet::new();
                for label in &self.labels {
                    if !seen.insert(label.as_str()) {
                        return Err(ConfigError::invalid(format!(
                            "enum '{}' repeats label '{label}'",
                            self.name
                        )));
                    }
                }
            }
            TypeKind::Record => {
                let mut seen = BTreeSet::new();
                for column in &self.columns {
                    if column.name.is_empty() || column.type_name.is_empty() {
                        return Err(ConfigError::invalid(format!(
                            "record '{}' has a column without name or type",
                            self.name
                        )));
                    }
                    if !seen.insert(column.name.as_str()) {
                        return Err(ConfigError::invalid(format!(
                            "record '{}' repeats column '{}'",
                            self.name, column.name
                        )));
                    }
                }
            }
            TypeKind::Array | TypeKind::Domain | TypeKind::Hstore => {}
        }

        Ok(())
    }

    // A kind-specific field must be present for its kind and absent for all others.
    fn check_field(&self, present: bool, owner: TypeKind, field: &str) -> Result<(), ConfigError> {
        match (present, self.kind == owner) {
            (false, true) => Err(ConfigError::invalid(format!(
                "type '{}' of kind {owner:?} requires '{field}'",
                self.name
            ))),
            (true, false) => Err(ConfigError::invalid(format!(
                "type '{}' of kind {:?} does not accept '{field}'",
                self.name, self.kind
            ))),
            _ => Ok(()),
        }
    }
}

///
/// ColumnConfig
///

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ColumnConfig {
    pub name: String,

    /// Type name with optional modifiers, e.g. `varchar(20)` or `numeric(10,2)`.
    #[serde(rename = "type")]
    pub type_name: String,

    #[serde(default)]
    pub primary_key: bool,

    #[serde(default)]
    pub not_null: bool,
}
