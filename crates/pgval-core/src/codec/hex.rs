use thiserror::Error as ThisError;

/// Prefix PostgreSQL uses for `bytea` values in hex output mode.
pub const HEX_PREFIX: &[u8] = b"\\x";

///
/// HexDecodeError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum HexDecodeError {
    #[error("hex literal must start with \\x")]
    MissingPrefix,

    #[error("hex literal must have an even number of hex characters")]
    OddLength,

    #[error("invalid hex character at position {position}")]
    InvalidHex { position: usize },
}

/// Encode raw bytes as a `\x`-prefixed lowercase hex literal.
#[must_use]
pub fn encode_hex_literal(bytes: &[u8]) -> Vec<u8> {
    const DIGITS: &[u8; 16] = b"0123456789abcdef";

    let mut out = Vec::with_capacity(HEX_PREFIX.len() + bytes.len() * 2);
    out.extend_from_slice(HEX_PREFIX);
    for byte in bytes {
        out.push(DIGITS[usize::from(byte >> 4)]);
        out.push(DIGITS[usize::from(byte & 0x0f)]);
    }

    out
}

/// Decode a `\x`-prefixed hex literal into raw bytes.
pub fn decode_hex_literal(literal: &[u8]) -> Result<Vec<u8>, HexDecodeError> {
    let digits = literal
        .strip_prefix(HEX_PREFIX)
        .ok_or(HexDecodeError::MissingPrefix)?;

    if !digits.len().is_multiple_of(2) {
        return Err(HexDecodeError::OddLength);
    }

    let mut out = Vec::with_capacity(digits.len() / 2);
    for (idx, pair) in digits.chunks_exact(2).enumerate() {
        let position = HEX_PREFIX.len() + idx * 2;
        let hi = decode_hex_nibble(pair[0]).ok_or(HexDecodeError::InvalidHex {
            position: position + 1,
        })?;
        let lo = decode_hex_nibble(pair[1]).ok_or(HexDecodeError::InvalidHex {
            position: position + 2,
        })?;

        out.push((hi << 4) | lo);
    }

    Ok(out)
}

const fn decode_hex_nibble(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}

///
/// TESTS
///
