use crate::{error::ValueError, types::ForeignRef};
use std::collections::BTreeMap;

///
/// CatalogKind
///
/// `pg_type.typtype` classification.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum CatalogKind {
    Base,
    Composite,
    Domain,
    Enum,
    Pseudo,
}

impl CatalogKind {
    /// Map the single-letter catalog code (`b`, `c`, `d`, `e`, `p`).
    pub fn from_code(code: char) -> Result<Self, ValueError> {
        match code {
            'b' => Ok(Self::Base),
            'c' => Ok(Self::Composite),
            'd' => Ok(Self::Domain),
            'e' => Ok(Self::Enum),
            'p' => Ok(Self::Pseudo),
            other => Err(ValueError::registry(format!(
                "unknown catalog type kind '{other}'"
            ))),
        }
    }
}

///
/// CatalogType
///
/// One catalog row describing a type. Zero means "none" for the OID fields,
/// as in the catalog itself: `array == 0` marks an array type, whose element
/// is `elem`.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CatalogType {
    pub oid: u32,
    pub name: String,
    pub kind: CatalogKind,
    pub relid: u32,
    pub elem: u32,
    pub array: u32,
    pub base_type: u32,
}

impl CatalogType {
    pub fn new(oid: u32, name: impl Into<String>, kind: CatalogKind) -> Self {
        Self {
            oid,
            name: name.into(),
            kind,
            relid: 0,
            elem: 0,
            array: 0,
            base_type: 0,
        }
    }

    #[must_use]
    pub const fn with_relid(mut self, relid: u32) -> Self {
        self.relid = relid;
        self
    }

    #[must_use]
    pub const fn with_elem(mut self, elem: u32) -> Self {
        self.elem = elem;
        self
    }

    #[must_use]
    pub const fn with_array(mut self, array: u32) -> Self {
        self.array = array;
        self
    }

    #[must_use]
    pub const fn with_base_type(mut self, base_type: u32) -> Self {
        self.base_type = base_type;
        self
    }

    /// True for an array type: no array type of its own, and an element.
    #[must_use]
    pub const fn is_array(&self) -> bool {
        self.array == 0 && self.elem != 0
    }
}

///
/// CatalogColumn
///
/// One attribute of a composite type, in positional order.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CatalogColumn {
    pub name: String,
    pub type_oid: u32,
    pub type_args: Vec<String>,
    pub primary_key: bool,
    pub not_null: bool,
    pub reference: Option<ForeignRef>,
}

impl CatalogColumn {
    pub fn new(name: impl Into<String>, type_oid: u32) -> Self {
        Self {
            name: name.into(),
            type_oid,
            type_args: Vec::new(),
            primary_key: false,
            not_null: false,
            reference: None,
        }
    }

    #[must_use]
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.type_args = args.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_primary_key(mut self) -> Self {
        self.primary_key = true;
        self.not_null = true;
        self
    }

    #[must_use]
    pub fn with_reference(mut self, reference: ForeignRef) -> Self {
        self.reference = Some(reference);
        self
    }
}

///
/// TypeCatalog
///
/// Read-only view of the database catalog used to resolve types the
/// registry does not know. Implementations own how the metadata is fetched.
///

pub trait TypeCatalog {
    fn type_info(&self, oid: u32) -> Option<CatalogType>;

    /// Attributes of the relation `relid`; empty when unknown.
    fn columns(&self, relid: u32) -> Vec<CatalogColumn>;

    /// Labels of the enum type `oid` in sort order; empty when unknown.
    fn enum_labels(&self, oid: u32) -> Vec<String>;
}

///
/// StaticCatalog
///
/// In-memory catalog, filled by hand or from configuration.
///

#[derive(Clone, Debug, Default)]
pub struct StaticCatalog {
    types: BTreeMap<u32, CatalogType>,
    columns: BTreeMap<u32, Vec<CatalogColumn>>,
    labels: BTreeMap<u32, Vec<String>>,
}

impl StaticCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_type(&mut self, ty: CatalogType) -> &mut Self {
        self.types.insert(ty.oid, ty);
        self
    }

    pub fn add_columns(
        &mut self,
        relid: u32,
        columns: impl IntoIterator<Item = CatalogColumn>,
    ) -> &mut Self {
        self.columns.insert(relid, columns.into_iter().collect());
        self
    }

    pub fn add_labels<I, S>(&mut self, oid: u32, labels: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels
            .insert(oid, labels.into_iter().map(Into::into).collect());
        self
    }
}

impl TypeCatalog for StaticCatalog {
    fn type_info(&self, oid: u32) -> Option<CatalogType> {
        self.types.get(&oid).cloned()
    }

    fn columns(&self, relid: u32) -> Vec<CatalogColumn> {
        self.columns.get(&relid).cloned().unwrap_or_default()
    }

    fn enum_labels(&self, oid: u32) -> Vec<String> {
        self.labels.get(&oid).cloned().unwrap_or_default()
    }
}
