//! ## Crate layout
//! - `core`: value contract, tokenizer, scalar and composite codecs, registry.
//! - `config`: `pgval.toml` model for codec switches and type registrations.
//! - `error`: public error type with a stable kind + origin taxonomy.
//!
//! The `prelude` module carries the value vocabulary and the named
//! constructors (`integer()`, `array(..)`, `record(..)`, ...).

pub use pgval_config as config;
pub use pgval_core as core;

pub mod error;

use pgval_config::Config;
use pgval_core::registry::TypeRegistry;
use std::path::Path;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::Error;

/// Load `pgval.toml` from `path` and build a registry from it.
pub fn registry_from_path(path: impl AsRef<Path>) -> Result<TypeRegistry, Error> {
    let path = path.as_ref();
    let config = Config::load(path)?;
    let registry = TypeRegistry::from_config(&config)?;

    tracing::info!(
        path = %path.display(),
        types = config.types.len(),
        "configuration loaded"
    );

    Ok(registry)
}

///
/// Prelude
///

pub mod prelude {
    pub use crate::core::{
        prelude::*,
        registry::{CodecOptions, TypeRegistry},
    };
    pub use crate::error::Error;
}
