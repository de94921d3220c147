//! Named constructors for the common column types.
//!
//! Each function returns a [`ToValue`] ready to build values; the SQL alias
//! spellings (`int4`, `float8`, `bytea`, ...) resolve to the same constructor.

use crate::{
    error::ValueError,
    types::{Column, Columns, EnumLabels, FloatWidth, IntWidth, TextLimit},
    value::{ToValue, TypeSpec},
};

// ---- integers ----

#[must_use]
pub fn small_int() -> ToValue {
    ToValue::new(TypeSpec::Int(IntWidth::Bits16))
}

#[must_use]
pub fn int2() -> ToValue {
    small_int()
}

#[must_use]
pub fn integer() -> ToValue {
    ToValue::new(TypeSpec::Int(IntWidth::Bits32))
}

#[must_use]
pub fn int4() -> ToValue {
    integer()
}

#[must_use]
pub fn serial() -> ToValue {
    integer()
}

#[must_use]
pub fn big_int() -> ToValue {
    ToValue::new(TypeSpec::Int(IntWidth::Bits64))
}

#[must_use]
pub fn int8() -> ToValue {
    big_int()
}

#[must_use]
pub fn big_serial() -> ToValue {
    big_int()
}

// ---- floats and decimals ----

#[must_use]
pub fn real() -> ToValue {
    ToValue::new(TypeSpec::Float(FloatWidth::Bits32))
}

#[must_use]
pub fn float4() -> ToValue {
    real()
}

#[must_use]
pub fn double() -> ToValue {
    ToValue::new(TypeSpec::Float(FloatWidth::Bits64))
}

#[must_use]
pub fn float8() -> ToValue {
    double()
}

/// `numeric(precision, scale)`; both are descriptive, only `scale` shapes
/// how float input is formatted.
#[must_use]
pub fn numeric(precision: u32, scale: u32) -> ToValue {
    ToValue::new(TypeSpec::Numeric {
        precision: Some(precision),
        scale,
    })
}

#[must_use]
pub fn decimal(precision: u32, scale: u32) -> ToValue {
    numeric(precision, scale)
}

// ---- text and bytes ----

/// `character varying(n)`; zero means unbounded.
#[must_use]
pub fn var_char(n: usize) -> ToValue {
    ToValue::new(TypeSpec::Text(TextLimit::VarChar(n)))
}

/// `character(n)`, blank-padded to exactly `n`.
#[must_use]
pub fn character(n: usize) -> ToValue {
    ToValue::new(TypeSpec::Text(TextLimit::Char(n)))
}

#[must_use]
pub fn text() -> ToValue {
    ToValue::new(TypeSpec::Text(TextLimit::Unbounded))
}

#[must_use]
pub fn bytea() -> ToValue {
    ToValue::new(TypeSpec::Bytes)
}

// ---- other scalars ----

#[must_use]
pub fn timestamp() -> ToValue {
    ToValue::new(TypeSpec::Timestamp)
}

#[must_use]
pub fn boolean() -> ToValue {
    ToValue::new(TypeSpec::Bool { strict: false })
}

pub fn enumeration<I, S>(labels: I) -> Result<ToValue, ValueError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Ok(ToValue::new(TypeSpec::Enum(EnumLabels::new(labels)?)))
}

// ---- composites ----

#[must_use]
pub fn array(element: ToValue) -> ToValue {
    ToValue::new(TypeSpec::Array(element))
}

#[must_use]
pub fn row(elements: impl IntoIterator<Item = ToValue>) -> ToValue {
    ToValue::new(TypeSpec::Row(elements.into_iter().collect()))
}

#[must_use]
pub fn record(columns: impl IntoIterator<Item = Column>) -> ToValue {
    ToValue::new(TypeSpec::Record(Columns::new(columns)))
}

/// Shorthand for [`Column::new`] inside a [`record`] column list.
#[must_use]
pub fn col(name: impl Into<String>, to_value: ToValue) -> Column {
    Column::new(name, to_value)
}

#[must_use]
pub fn hstore() -> ToValue {
    ToValue::new(TypeSpec::HStore { keep_null: false })
}
