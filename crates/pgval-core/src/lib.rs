//! Core runtime for pgval: the value contract, the composite literal
//! tokenizer, scalar and composite codecs, and the type-constructor registry.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod codec;
pub mod error;
pub mod input;
pub mod native;
pub mod registry;
pub mod relation;
pub mod types;
pub mod value;
pub mod wire;

pub use pgval_primitives::{ALL_VALUE_KINDS, ValueKind};

///
/// Prelude
///
/// Value vocabulary and the named constructors; errors and the registry
/// stay one module down.
///

pub mod prelude {
    pub use crate::{
        input::Input,
        native::Native,
        types::{
            array, big_int, big_serial, boolean, bytea, character, col, decimal, double,
            enumeration, float4, float8, hstore, int2, int4, int8, integer, numeric, real, record,
            row, serial, small_int, text, timestamp, var_char,
        },
        value::{IteratorValue, MapValue, RecordValue, ToValue, Value, ValueCodec},
        wire::WireValue,
    };
}
