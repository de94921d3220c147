//! Concrete value codecs and the named constructors used to build them.

mod alias;
mod array;
mod bool;
mod bytes;
mod column;
mod enumeration;
mod float;
mod hstore;
mod int;
mod numeric;
mod record;
mod text;
mod timestamp;

pub(crate) mod row;

pub use alias::*;
pub use array::Array;
pub use bool::Bool;
pub use bytes::Bytes;
pub use column::{Column, Columns, ForeignRef};
pub use enumeration::{Enum, EnumLabels};
pub use float::{Float, FloatWidth};
pub use hstore::HStore;
pub use int::{Int, IntWidth};
pub use numeric::{Numeric, is_numeric_literal};
pub use record::Record;
pub use row::Row;
pub use text::{Text, TextLimit};
pub use timestamp::{Timestamp, format_timestamp, parse_timestamp};
