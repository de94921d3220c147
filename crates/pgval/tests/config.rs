//! Registry bootstrap from `pgval.toml` and public error mapping.

use pgval::{
    Error,
    config::ConfigError,
    error::{ErrorKind, ErrorOrigin},
    prelude::*,
    registry_from_path,
};
use std::{env, fs, path::PathBuf, process};

const PGVAL_TOML: &str = r#"
[codec]
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
columns = [{ name = "a", type = "int4" }, { name = "b", type = "text" }]

[[types]]
oid = 16410
name = "_mood"
kind = "array"
element = "mood"
"#;

fn write_config(tag: &str, content: &str) -> PathBuf {
    let path = env::temp_dir().join(format!("pgval-{tag}-{}.toml", process::id()));
    fs::write(&path, content).expect("write temp config");

    path
}

#[test]
fn registry_from_path_applies_registrations() {
    let path = write_config("registry", PGVAL_TOML);
    let registry = registry_from_path(&path).expect("valid configuration");
    fs::remove_file(&path).expect("remove temp config");

    let hstore = registry.constructor(16_384, &[]).expect("hstore");
    let value = hstore.make("a=>1, b=>NULL").expect("hstore literal");
    let map = value.as_map().expect("hstore map");
    assert_eq!(map.lookup("b"), Some(Native::Null));

    let moods = registry.lookup_name("_mood").expect("mood array");
    let value = moods.make("{ok,happy}").expect("mood literal");
    assert_eq!(value.text(), "{\"ok\",\"happy\"}");

    let numeric = registry.lookup_name("numeric(12)").expect("numeric");
    let value = numeric.make(0.5).expect("float input");
    assert_eq!(value.text(), "0.5000");

    let pair = registry.lookup_name("pair").expect("pair record");
    let value = pair.make("(1,x)").expect("row literal");
    assert_eq!(value.native(), Native::List(vec![Native::Int(1), Native::Text("x".into())]));
}

#[test]
fn missing_file_is_config_error() {
    let path = env::temp_dir().join(format!("pgval-missing-{}.toml", process::id()));
    let err = registry_from_path(&path).expect_err("file does not exist");

    assert_eq!(err.kind, ErrorKind::Config);
    assert_eq!(err.origin, ErrorOrigin::Config);
}

#[test]
fn invalid_registration_is_config_error() {
    let path = write_config(
        "invalid",
        "[[types]]\noid = 16390\nname = \"mood\"\nkind = \"enum\"\n",
    );
    let err = registry_from_path(&path).expect_err("enum without labels");
    fs::remove_file(&path).expect("remove temp config");

    assert_eq!(err.kind, ErrorKind::Config);
}

#[test]
fn unresolvable_element_is_registry_error() {
    let path = write_config(
        "element",
        "[[types]]\noid = 16410\nname = \"_thing\"\nkind = \"array\"\nelement = \"thing\"\n",
    );
    let err = registry_from_path(&path).expect_err("unknown element type");
    fs::remove_file(&path).expect("remove temp config");

    assert_eq!(err.kind, ErrorKind::Registry);
    assert_eq!(err.origin, ErrorOrigin::Registry);
    assert!(err.message.starts_with("_thing: "), "{}", err.message);
}

#[test]
fn public_error_serializes_with_kind_and_origin() {
    let err: Error = ConfigError::Invalid {
        message: "bad".into(),
    }
    .into();
    let json = serde_json::to_value(&err).expect("serialize error");

    assert_eq!(json["kind"], "Config");
    assert_eq!(json["origin"], "Config");

    let back: Error = serde_json::from_value(json).expect("deserialize error");
    assert_eq!(back, err);
}

#[test]
fn decode_errors_keep_their_class() {
    let err: Error = integer().make("x").expect_err("not a number").into();
    let json = serde_json::to_value(&err).expect("serialize error");

    assert_eq!(json["kind"]["Decode"], "Format");
    assert_eq!(json["origin"], "Scalar");
}
