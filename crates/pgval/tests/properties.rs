//! End-to-end checks of the codec properties through the public API.

use pgval::{
    error::{DecodeErrorKind, ErrorKind, ErrorOrigin},
    prelude::*,
};

fn native_list(items: impl IntoIterator<Item = Native>) -> Native {
    Native::List(items.into_iter().collect())
}

// ---- round trips ----

#[test]
fn scalar_round_trip_through_encoding() {
    let inputs: Vec<(ToValue, Input)> = vec![
        (int2(), Input::from(-12_i16)),
        (int4(), Input::from(7_u8)),
        (int8(), Input::from(u32::MAX)),
        (float4(), Input::from(0.5_f32)),
        (float8(), Input::from(1e300)),
        (boolean(), Input::from(false)),
        (character(2), Input::from("x")),
        (var_char(10), Input::from("short")),
        (text(), Input::from("a,b{c}\"d\\")),
        (bytea(), Input::from(b"\x00\x01binary".as_slice())),
        (decimal(8, 2), Input::from(3.75)),
        (timestamp(), Input::from("2023-07-01")),
    ];

    for (ctor, input) in inputs {
        let decoded = ctor.make(input).expect("decode native input");
        let again = ctor.make(decoded.encode()).expect("decode encoding");

        assert_eq!(again.native(), decoded.native(), "{}", ctor.kind());
    }
}

#[test]
fn array_round_trip() {
    let ctor = array(integer());
    let value = ctor.make("{1,2,3}").expect("array literal");

    assert_eq!(
        value.native(),
        native_list([Native::Int(1), Native::Int(2), Native::Int(3)])
    );
    assert_eq!(value.encode(), b"{1,2,3}".to_vec());
}

#[test]
fn nested_array_index_path() {
    let value = array(array(integer()))
        .make("{{1,2},{3,4}}")
        .expect("nested literal");

    let outer = value.as_iterator().expect("outer array");
    let row_one = outer
        .value_at(1)
        .and_then(Value::as_iterator)
        .expect("inner array");

    assert_eq!(row_one.value_at(0).map(ValueCodec::native), Some(Native::Int(3)));
}

#[test]
fn row_with_embedded_quotes() {
    let value = row([integer(), text(), double()])
        .make(r#"(1,"\"txt\"",2.3)"#)
        .expect("row literal");

    assert_eq!(
        value.native(),
        native_list([
            Native::Int(1),
            Native::Text("\"txt\"".into()),
            Native::Float(2.3),
        ])
    );
}

// ---- records ----

#[test]
fn record_named_field_access() {
    let value = record([col("name", text()), col("age", integer())])
        .make("('jeff',53)")
        .expect("record literal");
    let record = value.as_map().expect("record map");

    assert_eq!(record.get("age"), Ok(Native::Int(53)));

    let err: Error = record.get("height").expect_err("undeclared").into();
    assert_eq!(err.kind, ErrorKind::Lookup);
    assert_eq!(err.origin, ErrorOrigin::Record);
}

// ---- text widths ----

#[test]
fn fixed_and_variable_text_widths() {
    let fixed = character(1).make("D").expect("fits");
    assert_eq!(fixed.native(), Native::Text("D".into()));

    let err: Error = character(1).make("DD ").expect_err("too long").into();
    assert_eq!(err.kind, ErrorKind::Decode(DecodeErrorKind::Constraint));

    let varying = var_char(1).make("BB").expect("truncates");
    assert_eq!(varying.native(), Native::Text("B".into()));
}

// ---- integer widths ----

#[test]
fn integer_width_overflow() {
    let err: Error = small_int().make("40000").expect_err("overflow").into();
    assert_eq!(err.kind, ErrorKind::Decode(DecodeErrorKind::Range));
    assert!(err.message.contains("16-bit"));

    let ok = small_int().make("32767").expect("max literal fits");
    assert_eq!(ok.native(), Native::Int(32767));
}

#[test]
fn native_integer_excludes_exact_maximum() {
    let err = small_int().make(i16::MAX).expect_err("strict bound");
    assert!(err.is_range());

    small_int().make(i16::MAX - 1).expect("below maximum");
    big_int().make(i64::MAX).expect("64-bit always fits");
}

// ---- hstore ----

#[test]
fn hstore_drops_null_pairs() {
    let value = hstore()
        .make(r#""k1" => "v1", "k\"2" => "\"v2\"", "k3" => NULL"#)
        .expect("hstore literal");
    let map = value.as_map().expect("hstore map");

    assert_eq!(map.get("k1"), Ok(Native::Text("v1".into())));
    assert_eq!(map.get("k\"2"), Ok(Native::Text("\"v2\"".into())));
    assert!(map.lookup("k3").is_none());
}

// ---- NULL ----

#[test]
fn null_propagation() {
    for ctor in [integer(), text(), array(text()), hstore()] {
        let value = ctor.make(Input::Null).expect("null");

        assert!(value.is_null());
        assert_eq!(value.native(), Native::Null);
        assert_eq!(value.text(), "");
        assert_eq!(value.encode(), b"NULL".to_vec());
    }
}

// ---- lenient booleans ----

#[test]
fn unrecognized_boolean_text_reads_false() {
    let value = boolean().make("maybe").expect("lenient");

    assert_eq!(value.native(), Native::Bool(false));
}
