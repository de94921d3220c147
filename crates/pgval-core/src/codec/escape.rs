///
/// Quoting
///
/// Escaping dialect applied to a child before it is wrapped in double quotes.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Quoting {
    /// Bytes are copied unchanged.
    None,

    /// Array dialect: `"` and `\` are prefixed with a backslash.
    Array,

    /// Row dialect: `"` is doubled and `\` is prefixed with a backslash.
    Row,
}

/// Escape `bytes` so that wrapping the result in double quotes yields a
/// literal the tokenizer reads back as the original bytes.
#[must_use]
pub fn escape(bytes: &[u8], quoting: Quoting) -> Vec<u8> {
    let mut out = Vec::with_capacity(bytes.len() + 2);
    escape_into(&mut out, bytes, quoting);

    out
}

/// Append `"` + escaped bytes + `"` to `out`.
pub fn push_quoted(out: &mut Vec<u8>, bytes: &[u8], quoting: Quoting) {
    out.push(b'"');
    escape_into(out, bytes, quoting);
    out.push(b'"');
}

fn escape_into(out: &mut Vec<u8>, bytes: &[u8], quoting: Quoting) {
    for &byte in bytes {
        match (quoting, byte) {
            (Quoting::Array, b'"' | b'\\') | (Quoting::Row, b'\\') => out.push(b'\\'),
            (Quoting::Row, b'"') => out.push(b'"'),
            _ => {}
        }
        out.push(byte);
    }
}

///
/// TESTS
///
