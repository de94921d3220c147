use crate::{
    codec::escape::{Quoting, push_quoted},
    error::{ErrorOrigin, ValueError},
};

/// One parsed hstore pair. A `None` value is the bare `NULL` sentinel.
pub type Pair = (String, Option<String>);

/// Parse `"k" => "v", "k2" => NULL` into pairs, in input order.
///
/// Keys and values may be quoted (backslash escapes) or bare words.
/// A quoted `"NULL"` is an ordinary string.
pub fn parse_hstore(input: &[u8]) -> Result<Vec<Pair>, ValueError> {
    let mut parser = Parser { input, pos: 0 };
    let mut pairs = Vec::new();

    loop {
        parser.skip_whitespace();
        if parser.peek().is_none() {
            break;
        }

        let (key, _) = parser.token("key")?;
        parser.skip_whitespace();
        parser.expect_arrow()?;
        parser.skip_whitespace();
        let (value, quoted) = parser.token("value")?;

        let key = into_string(key, "key")?;
        let value = if !quoted && value.eq_ignore_ascii_case(b"NULL") {
            None
        } else {
            Some(into_string(value, "value")?)
        };
        pairs.push((key, value));

        parser.skip_whitespace();
        match parser.peek() {
            None => break,
            Some(b',') => parser.pos += 1,
            Some(other) => {
                return Err(parser.error(format!(
                    "expected ',' but found '{}'",
                    char::from(other).escape_default()
                )));
            }
        }
    }

    Ok(pairs)
}

/// Encode pairs as `"k"=>"v", "k2"=>NULL` in the order given.
#[must_use]
pub fn format_hstore<'a>(pairs: impl IntoIterator<Item = (&'a str, Option<&'a str>)>) -> Vec<u8> {
    let mut out = Vec::new();

    for (idx, (key, value)) in pairs.into_iter().enumerate() {
        if idx > 0 {
            out.extend_from_slice(b", ");
        }
        push_quoted(&mut out, key.as_bytes(), Quoting::Array);
        out.extend_from_slice(b"=>");
        match value {
            Some(value) => push_quoted(&mut out, value.as_bytes(), Quoting::Array),
            None => out.extend_from_slice(b"NULL"),
        }
    }

    out
}

fn into_string(bytes: Vec<u8>, what: &str) -> Result<String, ValueError> {
    String::from_utf8(bytes).map_err(|err| {
        ValueError::format(
            ErrorOrigin::HStore,
            format!("hstore {what} is not valid UTF-8: {err}"),
        )
    })
}

struct Parser<'a> {
    input: &'a [u8],
    pos: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    fn error(&self, message: impl std::fmt::Display) -> ValueError {
        ValueError::format(
            ErrorOrigin::HStore,
            format!("hstore literal: {message} at byte {}", self.pos),
        )
    }

    fn expect_arrow(&mut self) -> Result<(), ValueError> {
        if self.input[self.pos..].starts_with(b"=>") {
            self.pos += 2;
            Ok(())
        } else {
            Err(self.error("expected '=>'"))
        }
    }

    // Returns the unescaped token and whether it was quoted.
    fn token(&mut self, what: &str) -> Result<(Vec<u8>, bool), ValueError> {
        let mut out = Vec::new();

        if self.peek() == Some(b'"') {
            self.pos += 1;
            loop {
                match self.peek() {
                    None => return Err(self.error(format!("unterminated quoted {what}"))),
                    Some(b'"') => {
                        self.pos += 1;
                        return Ok((out, true));
                    }
                    Some(b'\\') => {
                        let Some(escaped) = self.input.get(self.pos + 1).copied() else {
                            return Err(self.error(format!("unterminated quoted {what}")));
                        };
                        out.push(escaped);
                        self.pos += 2;
                    }
                    Some(byte) => {
                        out.push(byte);
                        self.pos += 1;
                    }
                }
            }
        }

        while let Some(byte) = self.peek() {
            if byte.is_ascii_whitespace() || matches!(byte, b',' | b'=' | b'>' | b'"') {
                break;
            }
            if byte == b'\\' {
                let Some(escaped) = self.input.get(self.pos + 1).copied() else {
                    return Err(self.error("dangling escape"));
                };
                out.push(escaped);
                self.pos += 2;
                continue;
            }
            out.push(byte);
            self.pos += 1;
        }

        if out.is_empty() {
            return Err(self.error(format!("expected {what}")));
        }

        Ok((out, false))
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::{format_hstore, parse_hstore};

    fn pair(key: &str, value: Option<&str>) -> (String, Option<String>) {
        (key.to_string(), value.map(str::to_string))
    }

    #[test]
    fn parses_spaced_and_compact_arrows() {
        let pairs = parse_hstore(br#""a" => "1","b"=>"2""#).expect("hstore should parse");

        assert_eq!(pairs, vec![pair("a", Some("1")), pair("b", Some("2"))]);
    }

    #[test]
    fn bare_null_is_sentinel_but_quoted_null_is_text() {
        let pairs = parse_hstore(br#""a"=>NULL, "b"=>"NULL""#).expect("hstore should parse");

        assert_eq!(pairs, vec![pair("a", None), pair("b", Some("NULL"))]);
    }

    #[test]
    fn unescapes_quotes_and_backslashes() {
        let pairs = parse_hstore(br#""k\"ey"=>"va\\lue""#).expect("hstore should parse");

        assert_eq!(pairs, vec![pair("k\"ey", Some("va\\lue"))]);
    }

    #[test]
    fn accepts_bare_words() {
        let pairs = parse_hstore(b"a=>b, c => d").expect("bare words should parse");

        assert_eq!(pairs, vec![pair("a", Some("b")), pair("c", Some("d"))]);
    }

    #[test]
    fn empty_input_has_no_pairs() {
        assert!(parse_hstore(b"").expect("empty hstore").is_empty());
        assert!(parse_hstore(b"  ").expect("blank hstore").is_empty());
    }

    #[test]
    fn missing_arrow_is_format_error() {
        let err = parse_hstore(br#""a" "b""#).expect_err("missing arrow must fail");

        assert!(err.is_format());
        assert!(err.message.contains("expected '=>'"));
    }

    #[test]
    fn unterminated_value_is_format_error() {
        let err = parse_hstore(br#""a"=>"b"#).expect_err("unterminated value must fail");

        assert!(err.message.contains("unterminated quoted value"));
    }

    #[test]
    fn format_escapes_and_writes_null() {
        let out = format_hstore([("a\"b", Some("x\\y")), ("c", None)]);

        assert_eq!(out, br#""a\"b"=>"x\\y", "c"=>NULL"#.to_vec());
    }

    #[test]
    fn format_then_parse_preserves_pairs() {
        let pairs = [("k 1", Some("v,1")), ("k=>2", Some("")), ("n", None)];
        let parsed = parse_hstore(&format_hstore(pairs)).expect("formatted hstore should parse");

        assert_eq!(
            parsed,
            vec![pair("k 1", Some("v,1")), pair("k=>2", Some("")), pair("n", None)]
        );
    }
}
