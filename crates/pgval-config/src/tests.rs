use crate::{Config, ConfigError, TypeKind};
use std::{fs, process};

const FULL: &str = r#"
[codec]
strict_bool = true
hstore_keep_null = true
numeric_default_scale = 4

[[types]]
oid = 16384
name = "hstore"
kind = "hstore"

[[types]]
oid = 16390
name = "mood"
kind = "enum"
labels = ["sad", "ok", "happy"]

[[types]]
oid = 16400
name = "pair"
kind = "record"
columns = [{ name = "a", type = "int4", primary_key = true }, { name = "b", type = "varchar(20)" }]

[[types]]
oid = 16410
name = "_mood"
kind = "array"
element = "mood"

[[types]]
oid = 16420
name = "email"
kind = "domain"
base = "text"
"#;

fn invalid_message(err: ConfigError) -> String {
    match err {
        ConfigError::Invalid { message } => message,
        other => panic!("expected Invalid, got {other:?}"),
    }
}

// ---- parsing ----

#[test]
fn empty_document_uses_defaults() {
    let config = Config::parse("").expect("empty config should parse");

    assert!(!config.codec.strict_bool);
    assert!(!config.codec.hstore_keep_null);
    assert_eq!(config.codec.numeric_default_scale, 2);
    assert!(config.types.is_empty());
}

#[test]
fn full_document_parses_every_kind() {
    let config = Config::parse(FULL).expect("full config should parse");

    assert!(config.codec.strict_bool);
    assert!(config.codec.hstore_keep_null);
    assert_eq!(config.codec.numeric_default_scale, 4);

    let kinds: Vec<_> = config.types.iter().map(|ty| ty.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TypeKind::Hstore,
            TypeKind::Enum,
            TypeKind::Record,
            TypeKind::Array,
            TypeKind::Domain
        ]
    );

    let pair = config.type_named("pair").expect("pair should be registered");
    assert_eq!(pair.columns.len(), 2);
    assert!(pair.columns[0].primary_key);
    assert_eq!(pair.columns[1].type_name, "varchar(20)");
}

#[test]
fn unknown_kind_is_a_parse_error() {
    let err = Config::parse(
        r#"
[[types]]
oid = 1
name = "x"
kind = "range"
"#,
    )
    .expect_err("unknown kind must fail");

    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn unknown_field_is_a_parse_error() {
    let err = Config::parse("[codec]\nstrict = true\n").expect_err("unknown field must fail");

    assert!(matches!(err, ConfigError::Parse(_)));
}

// ---- validation ----

#[test]
fn enum_without_labels_is_invalid() {
    let err = Config::parse("[[types]]\noid = 5\nname = \"e\"\nkind = \"enum\"\n")
        .expect_err("enum without labels must fail");

    assert!(invalid_message(err).contains("requires 'labels'"));
}

#[test]
fn record_without_columns_is_invalid() {
    let err = Config::parse("[[types]]\noid = 5\nname = \"r\"\nkind = \"record\"\n")
        .expect_err("record without columns must fail");

    assert!(err.is_invalid());
}

#[test]
fn array_without_element_is_invalid() {
    let err = Config::parse("[[types]]\noid = 5\nname = \"a\"\nkind = \"array\"\n")
        .expect_err("array without element must fail");

    assert!(invalid_message(err).contains("requires 'element'"));
}

#[test]
fn labels_on_non_enum_are_invalid() {
    let err = Config::parse(
        "[[types]]\noid = 5\nname = \"h\"\nkind = \"hstore\"\nlabels = [\"a\"]\n",
    )
    .expect_err("labels on hstore must fail");

    assert!(invalid_message(err).contains("does not accept 'labels'"));
}

#[test]
fn duplicate_oid_is_invalid() {
    let err = Config::parse(
        r#"
[[types]]
oid = 7
name = "a"
kind = "hstore"

[[types]]
oid = 7
name = "b"
kind = "hstore"
"#,
    )
    .expect_err("duplicate oid must fail");

    assert!(invalid_message(err).contains("duplicate type oid 7"));
}

#[test]
fn duplicate_enum_label_is_invalid() {
    let err = Config::parse(
        "[[types]]\noid = 5\nname = \"e\"\nkind = \"enum\"\nlabels = [\"a\", \"a\"]\n",
    )
    .expect_err("repeated label must fail");

    assert!(invalid_message(err).contains("repeats label 'a'"));
}

#[test]
fn zero_oid_is_invalid() {
    let err = Config::parse("[[types]]\noid = 0\nname = \"h\"\nkind = \"hstore\"\n")
        .expect_err("zero oid must fail");

    assert!(err.is_invalid());
}

#[test]
fn oversized_default_scale_is_invalid() {
    let err = Config::parse("[codec]\nnumeric_default_scale = 1001\n")
        .expect_err("scale over the limit must fail");

    assert!(invalid_message(err).contains("exceeds 1000"));
}

// ---- loading ----

#[test]
fn load_reads_file_from_disk() {
    let path = std::env::temp_dir().join(format!("pgval-config-{}.toml", process::id()));
    fs::write(&path, FULL).expect("temp config should be writable");

    let loaded = Config::load(&path);
    let _ = fs::remove_file(&path);

    let config = loaded.expect("config should load");
    assert_eq!(config.types.len(), 5);
}

#[test]
fn load_missing_file_reports_path() {
    let err = Config::load("/definitely/not/here/pgval.toml").expect_err("missing file must fail");

    match err {
        ConfigError::Io { path, .. } => assert!(path.ends_with("pgval.toml")),
        other => panic!("expected Io, got {other:?}"),
    }
}
