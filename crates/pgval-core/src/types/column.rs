use crate::value::ToValue;
use derive_more::Deref;
use std::sync::Arc;

///
/// ForeignRef
///
/// Column-level foreign key: the referenced relation and column.
///

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct ForeignRef {
    pub table: String,
    pub column: String,
}

impl ForeignRef {
    pub fn new(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            column: column.into(),
        }
    }
}

///
/// Column
///
/// Named slot of a record with its constructor and catalog metadata.
///

#[derive(Clone, Debug, PartialEq)]
pub struct Column {
    name: String,
    to_value: ToValue,
    sql_type: Option<String>,
    oid: Option<u32>,
    primary_key: bool,
    not_null: bool,
    reference: Option<ForeignRef>,
}

impl Column {
    pub fn new(name: impl Into<String>, to_value: ToValue) -> Self {
        Self {
            name: name.into(),
            to_value,
            sql_type: None,
            oid: None,
            primary_key: false,
            not_null: false,
            reference: None,
        }
    }

    #[must_use]
    pub fn with_sql_type(mut self, sql_type: impl Into<String>) -> Self {
        self.sql_type = Some(sql_type.into());
        self
    }

    #[must_use]
    pub fn with_oid(mut self, oid: u32) -> Self {
        self.oid = Some(oid);
        self
    }

    #[must_use]
    pub fn with_primary_key(mut self) -> Self {
        self.primary_key = true;
        self.not_null = true;
        self
    }

    #[must_use]
    pub fn with_not_null(mut self) -> Self {
        self.not_null = true;
        self
    }

    #[must_use]
    pub fn with_reference(mut self, reference: ForeignRef) -> Self {
        self.reference = Some(reference);
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn to_value(&self) -> &ToValue {
        &self.to_value
    }

    #[must_use]
    pub fn sql_type(&self) -> Option<&str> {
        self.sql_type.as_deref()
    }

    #[must_use]
    pub const fn oid(&self) -> Option<u32> {
        self.oid
    }

    #[must_use]
    pub const fn is_primary_key(&self) -> bool {
        self.primary_key
    }

    #[must_use]
    pub const fn is_not_null(&self) -> bool {
        self.not_null
    }

    #[must_use]
    pub const fn reference(&self) -> Option<&ForeignRef> {
        self.reference.as_ref()
    }
}

///
/// Columns
///
/// Ordered, shared column list of a record type.
///

#[derive(Clone, Debug, Deref, PartialEq)]
pub struct Columns(Arc<[Column]>);

impl Columns {
    pub fn new(columns: impl IntoIterator<Item = Column>) -> Self {
        Self(columns.into_iter().collect())
    }

    /// Position of the column called `name`.
    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.0.iter().position(|col| col.name() == name)
    }

    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.0.iter().map(Column::name).collect()
    }
}

impl FromIterator<Column> for Columns {
    fn from_iter<I: IntoIterator<Item = Column>>(iter: I) -> Self {
        Self::new(iter)
    }
}
