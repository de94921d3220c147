//! Configuration model for pgval: codec switches and declarative type
//! registrations, read from `pgval.toml`.

mod error;
mod model;

#[cfg(test)]
mod tests;

pub use error::ConfigError;
pub use model::{
    CodecConfig, ColumnConfig, Config, MAX_NUMERIC_SCALE, TypeConfig, TypeKind,
};
