use crate::{
    codec::{format_hstore, parse_hstore},
    error::{ErrorOrigin, ValueError},
    input::Input,
    native::Native,
    value::{MapValue, NULL_SENTINEL, ValueCodec, mismatch, utf8},
    wire::WireValue,
};
use pgval_primitives::ValueKind;
use std::collections::BTreeMap;
use tracing::debug;

///
/// HStore
///
/// String-to-string map with optional values. Entries are kept sorted by
/// key, so encoding is deterministic.
///
/// With `keep_null` unset, NULL-valued entries are dropped on decode and
/// setting a key to NULL removes it.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct HStore {
    keep_null: bool,
    entries: BTreeMap<String, Option<String>>,
    valid: bool,
}

impl HStore {
    #[must_use]
    pub const fn new(keep_null: bool) -> Self {
        Self {
            keep_null,
            entries: BTreeMap::new(),
            valid: false,
        }
    }

    #[must_use]
    pub const fn keeps_null(&self) -> bool {
        self.keep_null
    }

    #[must_use]
    pub const fn entries(&self) -> &BTreeMap<String, Option<String>> {
        &self.entries
    }

    #[must_use]
    pub fn into_entries(self) -> BTreeMap<String, Option<String>> {
        self.entries
    }

    fn insert(&mut self, key: String, value: Option<String>) {
        if value.is_none() && !self.keep_null {
            debug!(key = %key, "hstore: dropping NULL entry");
            self.entries.remove(&key);
        } else {
            self.entries.insert(key, value);
        }
    }
}

// ---- entry conversion ----

fn entry_value(key: &str, input: Input) -> Result<Option<String>, ValueError> {
    let value = match input.resolve() {
        Input::Null => None,
        Input::Text(text) => Some(text),
        Input::Bytes(bytes) => Some(utf8(bytes, ErrorOrigin::HStore)?),
        Input::Bool(b) => Some(b.to_string()),
        Input::Int(n) => Some(n.to_string()),
        Input::UInt(n) => Some(n.to_string()),
        Input::Float(n) => Some(n.to_string()),
        other => {
            return Err(ValueError::type_mismatch(
                ErrorOrigin::HStore,
                format!("cannot store {} input as an hstore value", other.label()),
            )
            .with_context(format_args!(".{key}")));
        }
    };

    Ok(value)
}

impl ValueCodec for HStore {
    fn kind(&self) -> ValueKind {
        ValueKind::HStore
    }

    fn is_null(&self) -> bool {
        !self.valid
    }

    fn native(&self) -> Native {
        if !self.valid {
            return Native::Null;
        }

        Native::Map(
            self.entries
                .iter()
                .map(|(k, v)| (k.clone(), v.clone().map_or(Native::Null, Native::Text)))
                .collect(),
        )
    }

    fn encode(&self) -> Vec<u8> {
        if !self.valid {
            return NULL_SENTINEL.to_vec();
        }

        format_hstore(
            self.entries
                .iter()
                .map(|(k, v)| (k.as_str(), v.as_deref())),
        )
    }

    fn decode(&mut self, input: Input) -> Result<(), ValueError> {
        let pairs = match input.resolve() {
            Input::Null => {
                self.entries.clear();
                self.valid = false;
                return Ok(());
            }
            Input::Map(map) => map
                .into_iter()
                .map(|(key, value)| entry_value(&key, value).map(|value| (key, value)))
                .collect::<Result<Vec<_>, _>>()?,
            Input::Text(text) => parse_hstore(text.as_bytes())?,
            Input::Bytes(bytes) => parse_hstore(&bytes)?,
            other => return Err(mismatch(self.kind(), &other, ErrorOrigin::HStore)),
        };

        self.entries.clear();
        for (key, value) in pairs {
            self.insert(key, value);
        }
        self.valid = true;

        Ok(())
    }

    fn to_wire(&self) -> WireValue {
        if self.valid {
            WireValue::Text(self.text())
        } else {
            WireValue::Null
        }
    }
}

impl MapValue for HStore {
    fn names(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    fn lookup(&self, name: &str) -> Option<Native> {
        self.entries
            .get(name)
            .map(|v| v.clone().map_or(Native::Null, Native::Text))
    }

    fn get(&self, name: &str) -> Result<Native, ValueError> {
        self.lookup(name)
            .ok_or_else(|| ValueError::lookup(ErrorOrigin::HStore, name))
    }

    fn set(&mut self, name: &str, input: Input) -> Result<(), ValueError> {
        let value = entry_value(name, input)?;
        self.insert(name.to_string(), value);
        self.valid = true;

        Ok(())
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_literal_and_drops_null_entries() {
        let mut value = HStore::new(false);
        value
            .decode(Input::from(r#""b"=>"2", "a"=>"1", "c"=>NULL"#))
            .expect("valid hstore literal");

        assert_eq!(value.names(), vec!["a", "b"]);
        assert_eq!(value.get("a"), Ok(Native::Text("1".into())));
        assert!(value.get("c").expect_err("dropped").is_lookup());
    }

    #[test]
    fn keep_null_retains_null_entries() {
        let mut value = HStore::new(true);
        value
            .decode(Input::from("a=>1, c=>NULL"))
            .expect("valid hstore literal");

        assert_eq!(value.get("c"), Ok(Native::Null));
        assert_eq!(value.encode(), br#""a"=>"1", "c"=>NULL"#.to_vec());
    }

    #[test]
    fn encodes_sorted_by_key() {
        let mut value = HStore::new(false);
        value
            .decode(Input::map([("z", "last"), ("a", "first")]))
            .expect("map input");

        assert_eq!(value.text(), r#""a"=>"first", "z"=>"last""#);
    }

    #[test]
    fn map_values_are_stringified() {
        let mut value = HStore::new(false);
        value
            .decode(Input::map([
                ("n", Input::Int(7)),
                ("b", Input::Bool(true)),
            ]))
            .expect("scalar map values");

        assert_eq!(value.get("n"), Ok(Native::Text("7".into())));
        assert_eq!(value.get("b"), Ok(Native::Text("true".into())));
    }

    #[test]
    fn nested_map_value_is_type_mismatch() {
        let mut value = HStore::new(false);
        let err = value
            .decode(Input::map([("k", Input::list([1_i64]))]))
            .expect_err("lists are not hstore values");

        assert!(err.is_type_mismatch());
        assert!(err.message.starts_with(".k: "));
    }

    #[test]
    fn set_null_removes_key_unless_kept() {
        let mut value = HStore::new(false);
        value.set("k", Input::from("v")).expect("set text");
        value.set("k", Input::Null).expect("set null");
        assert!(value.lookup("k").is_none());

        let mut kept = HStore::new(true);
        kept.set("k", Input::Null).expect("set null");
        assert_eq!(kept.lookup("k"), Some(Native::Null));
    }

    #[test]
    fn quoted_null_is_a_string() {
        let mut value = HStore::new(false);
        value
            .decode(Input::from(r#"k=>"NULL""#))
            .expect("quoted NULL");

        assert_eq!(value.get("k"), Ok(Native::Text("NULL".into())));
    }

    #[test]
    fn null_input_resets() {
        let mut value = HStore::new(false);
        value.decode(Input::from("a=>1")).expect("literal");
        value.decode(Input::Null).expect("null");

        assert!(value.is_null());
        assert_eq!(value.encode(), NULL_SENTINEL.to_vec());
        assert_eq!(value.to_wire(), WireValue::Null);
    }
}
