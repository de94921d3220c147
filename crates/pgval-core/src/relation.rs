//! Relation descriptors: column metadata shared by the records built from a
//! table, plus the has-one/has-many links derived from foreign references.

use crate::{
    error::{ErrorClass, ErrorOrigin, ValueError},
    input::Input,
    types::{Column, Columns, Record},
    value::{ToValue, TypeSpec, ValueCodec},
};
use std::{collections::BTreeMap, fmt, sync::Arc};

/// Column-name suffixes removed when naming a has-one link.
const KEY_SUFFIXES: [&str; 3] = ["_id", "_sku", "_key"];

///
/// Relation
///
/// Schema metadata for one table. Records keep an `Arc` back to it; the
/// descriptor is never copied into the values.
///

#[derive(Clone, Debug, PartialEq)]
pub struct Relation {
    name: String,
    columns: Columns,
    refs: Vec<RelationRef>,
}

impl Relation {
    pub fn new(name: impl Into<String>, columns: impl IntoIterator<Item = Column>) -> Self {
        Self {
            name: name.into(),
            columns: Columns::new(columns),
            refs: Vec::new(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn columns(&self) -> &Columns {
        &self.columns
    }

    #[must_use]
    pub fn refs(&self) -> &[RelationRef] {
        &self.refs
    }

    /// First column flagged as primary key.
    #[must_use]
    pub fn primary_key(&self) -> Option<&Column> {
        self.columns.iter().find(|col| col.is_primary_key())
    }

    #[must_use]
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|col| col.name() == name)
    }

    #[must_use]
    pub fn relation_ref(&self, name: &str) -> Option<&RelationRef> {
        self.refs.iter().find(|r| r.name == name)
    }

    /// Record constructor for this relation's columns, without the
    /// back-reference.
    #[must_use]
    pub fn to_value(&self) -> ToValue {
        ToValue::new(TypeSpec::Record(self.columns.clone()))
    }

    /// Build a record of this relation and decode `input` into it.
    pub fn new_record(self: &Arc<Self>, input: impl Into<Input>) -> Result<Record, ValueError> {
        let mut record = Record::new(self.columns.clone()).with_relation(Arc::clone(self));
        record.decode(input.into())?;

        Ok(record)
    }
}

///
/// RefKind
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum RefKind {
    HasOne,
    HasMany,
}

impl fmt::Display for RefKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::HasOne => "has_one",
            Self::HasMany => "has_many",
        };
        write!(f, "{label}")
    }
}

///
/// RelationRef
///
/// Named link from one relation to another. `relation` is the target
/// relation's name; `column` is the referencing column.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RelationRef {
    pub name: String,
    pub kind: RefKind,
    pub relation: String,
    pub column: String,
}

/// Has-one link name: the column name without its key suffix.
fn has_one_name(column: &str) -> &str {
    KEY_SUFFIXES
        .iter()
        .find_map(|suffix| column.strip_suffix(suffix).filter(|s| !s.is_empty()))
        .unwrap_or(column)
}

/// Derive has-one and has-many links from column foreign references.
///
/// Existing links are replaced, so the call is idempotent. A reference to a
/// relation not in `relations` is a lookup error and leaves every relation
/// untouched.
pub fn link_relations(relations: &mut BTreeMap<String, Relation>) -> Result<(), ValueError> {
    let mut links: BTreeMap<String, Vec<RelationRef>> = BTreeMap::new();

    for relation in relations.values() {
        for col in relation.columns.iter() {
            let Some(reference) = col.reference() else {
                continue;
            };
            if !relations.contains_key(&reference.table) {
                return Err(ValueError::new(
                    ErrorClass::Lookup,
                    ErrorOrigin::Registry,
                    format!(
                        "{}.{} references unknown relation '{}'",
                        relation.name,
                        col.name(),
                        reference.table
                    ),
                ));
            }

            links
                .entry(relation.name.clone())
                .or_default()
                .push(RelationRef {
                    name: has_one_name(col.name()).to_string(),
                    kind: RefKind::HasOne,
                    relation: reference.table.clone(),
                    column: col.name().to_string(),
                });
            links
                .entry(reference.table.clone())
                .or_default()
                .push(RelationRef {
                    name: relation.name.clone(),
                    kind: RefKind::HasMany,
                    relation: relation.name.clone(),
                    column: col.name().to_string(),
                });
        }
    }

    for (name, relation) in relations.iter_mut() {
        relation.refs = links.remove(name).unwrap_or_default();
    }

    Ok(())
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        native::Native,
        types::{ForeignRef, col, integer, text},
        value::{MapValue, RecordValue},
    };

    fn users() -> Relation {
        Relation::new(
            "users",
            [
                col("id", integer()).with_primary_key(),
                col("name", text()),
            ],
        )
    }

    fn orders() -> Relation {
        Relation::new(
            "orders",
            [
                col("id", integer()).with_primary_key(),
                col("user_id", integer()).with_reference(ForeignRef::new("users", "id")),
                col("product_sku", text()).with_reference(ForeignRef::new("products", "sku")),
            ],
        )
    }

    fn products() -> Relation {
        Relation::new("products", [col("sku", text()).with_primary_key()])
    }

    fn catalog() -> BTreeMap<String, Relation> {
        [users(), orders(), products()]
            .into_iter()
            .map(|r| (r.name().to_string(), r))
            .collect()
    }

    #[test]
    fn primary_key_and_column_lookup() {
        let rel = users();

        assert_eq!(rel.primary_key().map(Column::name), Some("id"));
        assert!(rel.primary_key().is_some_and(Column::is_not_null));
        assert!(rel.column("name").is_some());
        assert!(rel.column("email").is_none());
    }

    #[test]
    fn new_record_sets_back_reference() {
        let rel = Arc::new(users());
        let record = rel
            .new_record(Input::list([Input::Int(7), Input::from("ann")]))
            .expect("row matches columns");

        assert_eq!(record.get("name"), Ok(Native::Text("ann".into())));
        assert!(record.relation().is_some_and(|r| Arc::ptr_eq(r, &rel)));
    }

    #[test]
    fn link_relations_derives_both_directions() {
        let mut relations = catalog();
        link_relations(&mut relations).expect("all targets exist");

        let orders = &relations["orders"];
        let user = orders.relation_ref("user").expect("has-one user");
        assert_eq!(user.kind, RefKind::HasOne);
        assert_eq!(user.relation, "users");
        assert_eq!(user.column, "user_id");
        assert!(orders.relation_ref("product").is_some());

        let users = &relations["users"];
        let many = users.relation_ref("orders").expect("has-many orders");
        assert_eq!(many.kind, RefKind::HasMany);
        assert_eq!(many.column, "user_id");
    }

    #[test]
    fn link_relations_is_idempotent() {
        let mut relations = catalog();
        link_relations(&mut relations).expect("first pass");
        link_relations(&mut relations).expect("second pass");

        assert_eq!(relations["orders"].refs().len(), 2);
        assert_eq!(relations["users"].refs().len(), 1);
    }

    #[test]
    fn unknown_target_is_lookup_error() {
        let mut relations = catalog();
        relations.remove("products");

        let err = link_relations(&mut relations).expect_err("products is missing");
        assert!(err.is_lookup());
        assert!(relations["orders"].refs().is_empty());
    }

    #[test]
    fn has_one_name_keeps_bare_suffix() {
        assert_eq!(has_one_name("owner_key"), "owner");
        assert_eq!(has_one_name("_id"), "_id");
        assert_eq!(has_one_name("parent"), "parent");
    }
}
