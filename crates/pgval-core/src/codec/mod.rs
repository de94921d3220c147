//! Byte-level grammar shared by the composite codecs: composite literal
//! splitting, quoting, `\x` hex literals and the hstore pair syntax.

pub mod escape;
pub mod hex;
pub mod hstore;
pub mod split;

pub use escape::{Quoting, escape, push_quoted};
pub use hex::{HEX_PREFIX, HexDecodeError, decode_hex_literal, encode_hex_literal};
pub use hstore::{format_hstore, parse_hstore};
pub use split::{Dialect, Element, split, split_as};
