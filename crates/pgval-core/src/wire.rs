use time::OffsetDateTime;

///
/// WireValue
///
/// What a value hands to a database driver as a bind parameter: scalars in
/// their native form, composites as their textual literal.
///

#[derive(Clone, Debug, PartialEq)]
pub enum WireValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Bytes(Vec<u8>),
    Timestamp(OffsetDateTime),
}

impl WireValue {
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}
