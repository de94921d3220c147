//! Type-constructor registry: maps a type OID (or name) plus modifiers to a
//! [`ToValue`].
//!
//! Built-in types come from an immutable table. Types discovered at runtime
//! (through a [`TypeCatalog`] or configuration) are kept in a guarded map
//! owned by the registry.

mod builtin;
mod catalog;
mod name;


pub use builtin::{BUILTINS, Builtin};
pub use catalog::{CatalogColumn, CatalogKind, CatalogType, StaticCatalog, TypeCatalog};
pub use name::TypeName;

use crate::{
    error::ValueError,
    relation::Relation,
    types::{Column, Columns, EnumLabels, array},
    value::{ToValue, TypeSpec},
};
use pgval_config::{CodecConfig, Config, TypeConfig, TypeKind};
use std::{
    collections::BTreeMap,
    sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};
use tracing::debug;

/// Nesting limit for catalog resolution; deeper chains are treated as cycles.
pub const MAX_RESOLVE_DEPTH: usize = 32;

///
/// CodecOptions
///
/// Codec switches threaded into the constructors the registry builds.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CodecOptions {
    pub strict_bool: bool,
    pub hstore_keep_null: bool,
    pub numeric_default_scale: u32,
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self::from(&CodecConfig::default())
    }
}

impl From<&CodecConfig> for CodecOptions {
    fn from(config: &CodecConfig) -> Self {
        Self {
            strict_bool: config.strict_bool,
            hstore_keep_null: config.hstore_keep_null,
            numeric_default_scale: config.numeric_default_scale,
        }
    }
}

///
/// Registration
///
/// A runtime-registered type.
///

#[derive(Clone, Debug, PartialEq)]
pub struct Registration {
    pub oid: u32,
    pub name: String,
    pub to_value: ToValue,
}

#[derive(Debug, Default)]
struct Runtime {
    by_oid: BTreeMap<u32, Registration>,
    by_name: BTreeMap<String, u32>,
}

///
/// TypeRegistry
///

#[derive(Debug, Default)]
pub struct TypeRegistry {
    options: CodecOptions,
    runtime: RwLock<Runtime>,
}

impl TypeRegistry {
    #[must_use]
    pub fn new(options: CodecOptions) -> Self {
        Self {
            options,
            runtime: RwLock::new(Runtime::default()),
        }
    }

    /// Build a registry from configuration, applying `[[types]]` in order.
    ///
    /// Element, base and column type names must be built-in or declared by
    /// an earlier entry.
    pub fn from_config(config: &Config) -> Result<Self, ValueError> {
        config.validate()?;

        let registry = Self::new(CodecOptions::from(&config.codec));
        for ty in &config.types {
            let to_value = registry
                .configured(ty)
                .map_err(|err| err.with_context(&ty.name))?;
            registry.register(ty.oid, &ty.name, to_value)?;
        }

        Ok(registry)
    }

    #[must_use]
    pub const fn options(&self) -> &CodecOptions {
        &self.options
    }

    // ---- lookup ----

    /// Constructor for a built-in or registered `oid`.
    pub fn constructor(&self, oid: u32, args: &[&str]) -> Result<ToValue, ValueError> {
        if let Some((builtin, is_array)) = builtin::by_oid(oid) {
            return builtin.to_value(args, &self.options, is_array);
        }

        let registered = self.read().by_oid.get(&oid).cloned();
        match registered {
            Some(reg) if args.is_empty() => Ok(reg.to_value),
            Some(reg) => Err(ValueError::registry(format!(
                "type {} takes no modifiers",
                reg.name
            ))),
            None => Err(ValueError::registry(format!("unknown type oid {oid}"))),
        }
    }

    /// Constructor for a type name such as `varchar(20)` or `mood[]`.
    pub fn lookup_name(&self, name: &str) -> Result<ToValue, ValueError> {
        let parsed = TypeName::parse(name)?;
        let args = parsed.arg_refs();

        let mut to_value = match builtin::by_name(&parsed.base) {
            Some((builtin, is_array)) => builtin.to_value(&args, &self.options, is_array)?,
            None => {
                let oid = self
                    .oid_of(&parsed.base)
                    .ok_or_else(|| ValueError::registry(format!("unknown type '{name}'")))?;
                self.constructor(oid, &args)?
            }
        };
        for _ in 0..parsed.array_dims {
            to_value = array(to_value);
        }

        Ok(to_value)
    }

    /// OID of a built-in or registered type name, without modifiers.
    #[must_use]
    pub fn oid_of(&self, name: &str) -> Option<u32> {
        match builtin::by_name(name) {
            Some((builtin, false)) => Some(builtin.oid),
            Some((builtin, true)) => Some(builtin.array_oid),
            None => self.read().by_name.get(name).copied(),
        }
    }

    #[must_use]
    pub fn registration(&self, oid: u32) -> Option<Registration> {
        self.read().by_oid.get(&oid).cloned()
    }

    // ---- runtime registration ----

    /// Add or replace a runtime type; returns the constructor it replaced.
    ///
    /// Built-in OIDs and names cannot be overridden, and a name stays bound
    /// to one OID.
    pub fn register(
        &self,
        oid: u32,
        name: &str,
        to_value: ToValue,
    ) -> Result<Option<ToValue>, ValueError> {
        if oid == 0 {
            return Err(ValueError::registry(format!(
                "type '{name}' needs a non-zero oid"
            )));
        }
        if builtin::by_oid(oid).is_some() || builtin::by_name(name).is_some() {
            return Err(ValueError::registry(format!(
                "type '{name}' ({oid}) would shadow a built-in type"
            )));
        }

        let mut runtime = self.write();
        if let Some(&bound) = runtime.by_name.get(name)
            && bound != oid
        {
            return Err(ValueError::registry(format!(
                "type name '{name}' is already registered with oid {bound}"
            )));
        }

        let replaced = runtime.by_oid.insert(
            oid,
            Registration {
                oid,
                name: name.to_string(),
                to_value,
            },
        );
        if let Some(old) = &replaced {
            runtime.by_name.remove(&old.name);
        }
        runtime.by_name.insert(name.to_string(), oid);
        drop(runtime);

        if replaced.is_some() {
            debug!(oid, name, "registry: replaced runtime type");
        } else {
            debug!(oid, name, "registry: registered runtime type");
        }

        Ok(replaced.map(|reg| reg.to_value))
    }

    // ---- catalog resolution ----

    /// Constructor for `oid`, consulting `catalog` for types the registry
    /// does not know. Discovered enum, composite and hstore types are
    /// registered so later lookups skip the catalog.
    pub fn resolve(
        &self,
        oid: u32,
        args: &[&str],
        catalog: &dyn TypeCatalog,
    ) -> Result<ToValue, ValueError> {
        self.resolve_at(oid, args, catalog, 0)
    }

    /// Relation descriptor for the composite `relid`, columns resolved
    /// through `catalog`.
    pub fn relation(
        &self,
        name: &str,
        relid: u32,
        catalog: &dyn TypeCatalog,
    ) -> Result<Relation, ValueError> {
        let columns = self.catalog_columns(name, relid, catalog, 0)?;

        Ok(Relation::new(name, columns))
    }

    fn resolve_at(
        &self,
        oid: u32,
        args: &[&str],
        catalog: &dyn TypeCatalog,
        depth: usize,
    ) -> Result<ToValue, ValueError> {
        if depth > MAX_RESOLVE_DEPTH {
            return Err(ValueError::registry(format!(
                "type oid {oid} nests deeper than {MAX_RESOLVE_DEPTH} levels"
            )));
        }
        if builtin::by_oid(oid).is_some() || self.read().by_oid.contains_key(&oid) {
            return self.constructor(oid, args);
        }

        let ty = catalog
            .type_info(oid)
            .ok_or_else(|| ValueError::registry(format!("unknown type oid {oid}")))?;
        debug!(oid, name = %ty.name, kind = ?ty.kind, "registry: resolving through catalog");

        match ty.kind {
            CatalogKind::Base if ty.is_array() => {
                let element = self.resolve_at(ty.elem, args, catalog, depth + 1)?;
                Ok(array(element))
            }
            CatalogKind::Base if ty.name == "hstore" => {
                let to_value = ToValue::new(TypeSpec::HStore {
                    keep_null: self.options.hstore_keep_null,
                });
                self.register(oid, &ty.name, to_value.clone())?;
                Ok(to_value)
            }
            CatalogKind::Base => Err(ValueError::registry(format!(
                "base type '{}' ({oid}) has no codec",
                ty.name
            ))),
            CatalogKind::Composite => {
                let columns = self.catalog_columns(&ty.name, ty.relid, catalog, depth + 1)?;
                let to_value = ToValue::new(TypeSpec::Record(Columns::new(columns)));
                self.register(oid, &ty.name, to_value.clone())?;
                Ok(to_value)
            }
            CatalogKind::Enum => {
                let labels = EnumLabels::new(catalog.enum_labels(oid))
                    .map_err(|err| err.with_context(&ty.name))?;
                let to_value = ToValue::new(TypeSpec::Enum(labels));
                self.register(oid, &ty.name, to_value.clone())?;
                Ok(to_value)
            }
            CatalogKind::Domain if ty.base_type == 0 => Err(ValueError::registry(format!(
                "domain '{}' ({oid}) has no base type",
                ty.name
            ))),
            CatalogKind::Domain => self.resolve_at(ty.base_type, args, catalog, depth + 1),
            CatalogKind::Pseudo => Err(ValueError::registry(format!(
                "pseudo-type '{}' ({oid}) cannot hold values",
                ty.name
            ))),
        }
    }

    fn catalog_columns(
        &self,
        owner: &str,
        relid: u32,
        catalog: &dyn TypeCatalog,
        depth: usize,
    ) -> Result<Vec<Column>, ValueError> {
        let attrs = catalog.columns(relid);
        if attrs.is_empty() {
            return Err(ValueError::registry(format!(
                "composite '{owner}' (relid {relid}) has no columns"
            )));
        }

        attrs
            .into_iter()
            .map(|attr| {
                let args = attr.type_args.iter().map(String::as_str).collect::<Vec<_>>();
                let to_value = self
                    .resolve_at(attr.type_oid, &args, catalog, depth)
                    .map_err(|err| err.with_context(format_args!("{owner}.{}", attr.name)))?;

                let mut column = Column::new(attr.name, to_value).with_oid(attr.type_oid);
                if let Some(sql_type) = self.type_label(attr.type_oid, catalog) {
                    column = column.with_sql_type(sql_type);
                }
                if attr.primary_key {
                    column = column.with_primary_key();
                }
                if attr.not_null {
                    column = column.with_not_null();
                }
                if let Some(reference) = attr.reference {
                    column = column.with_reference(reference);
                }

                Ok(column)
            })
            .collect()
    }

    fn type_label(&self, oid: u32, catalog: &dyn TypeCatalog) -> Option<String> {
        match builtin::by_oid(oid) {
            Some((builtin, false)) => Some(builtin.name.to_string()),
            Some((builtin, true)) => Some(format!("_{}", builtin.name)),
            None => self
                .registration(oid)
                .map(|reg| reg.name)
                .or_else(|| catalog.type_info(oid).map(|ty| ty.name)),
        }
    }

    // ---- configuration ----

    fn configured(&self, ty: &TypeConfig) -> Result<ToValue, ValueError> {
        let spec = match ty.kind {
            TypeKind::Hstore => TypeSpec::HStore {
                keep_null: self.options.hstore_keep_null,
            },
            TypeKind::Enum => TypeSpec::Enum(EnumLabels::new(ty.labels.iter().cloned())?),
            TypeKind::Record => {
                let columns = ty
                    .columns
                    .iter()
                    .map(|cfg| {
                        let to_value = self
                            .lookup_name(&cfg.type_name)
                            .map_err(|err| err.with_context(format_args!(".{}", cfg.name)))?;
                        let mut column =
                            Column::new(&cfg.name, to_value).with_sql_type(&cfg.type_name);
                        if cfg.primary_key {
                            column = column.with_primary_key();
                        }
                        if cfg.not_null {
                            column = column.with_not_null();
                        }

                        Ok(column)
                    })
                    .collect::<Result<Vec<_>, ValueError>>()?;

                TypeSpec::Record(Columns::new(columns))
            }
            TypeKind::Array => {
                let element = ty.element.as_deref().unwrap_or_default();
                return Ok(array(self.lookup_name(element)?));
            }
            TypeKind::Domain => {
                let base = ty.base.as_deref().unwrap_or_default();
                return self.lookup_name(base);
            }
        };

        Ok(ToValue::new(spec))
    }

    // ---- locking ----

    fn read(&self) -> RwLockReadGuard<'_, Runtime> {
        self.runtime.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Runtime> {
        self.runtime.write().unwrap_or_else(PoisonError::into_inner)
    }
}
