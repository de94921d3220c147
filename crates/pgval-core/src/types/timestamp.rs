use crate::{
    error::{ErrorOrigin, ValueError},
    input::Input,
    native::Native,
    value::{NULL_SENTINEL, ValueCodec, mismatch, utf8},
    wire::WireValue,
};
use pgval_primitives::ValueKind;
use time::{
    Date, OffsetDateTime, PrimitiveDateTime, Time, UtcOffset,
    format_description::{BorrowedFormatItem, well_known::Rfc3339},
    macros::format_description,
};

const WITH_OFFSET: &[BorrowedFormatItem<'static>] = format_description!(
    "[year]-[month]-[day] [hour]:[minute]:[second][optional [.[subsecond]]][offset_hour sign:mandatory][optional [:[offset_minute]]]"
);
const WITHOUT_OFFSET: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second][optional [.[subsecond]]]");
const WITHOUT_SECONDS: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]");
const DATE_ONLY: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

// Prefix that turns a bare time of day into a parseable timestamp.
const EPOCH_DATE_PREFIX: &str = "0000-01-01 ";

///
/// Timestamp
///
/// Point in time. Naive input is read as UTC; the text form is RFC 3339 in UTC.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Timestamp {
    value: Option<OffsetDateTime>,
}

impl Timestamp {
    #[must_use]
    pub const fn new() -> Self {
        Self { value: None }
    }

    #[must_use]
    pub const fn get(&self) -> Option<OffsetDateTime> {
        self.value
    }
}

/// Parse the textual timestamp forms PostgreSQL emits, plus RFC 3339.
pub fn parse_timestamp(text: &str) -> Result<OffsetDateTime, ValueError> {
    let mut text = text.trim().to_string();

    // A single fractional digit after the point gets a zero appended.
    if text.len() >= 2 && text.as_bytes()[text.len() - 2] == b'.' {
        text.push('0');
    }

    if let Ok(ts) = OffsetDateTime::parse(&text, &Rfc3339) {
        return Ok(ts);
    }
    if let Some(ts) = parse_date_time(&text) {
        return Ok(ts);
    }
    if text.as_bytes().get(2) == Some(&b':')
        && let Some(ts) = parse_date_time(&format!("{EPOCH_DATE_PREFIX}{text}"))
    {
        return Ok(ts);
    }
    if let Ok(date) = Date::parse(&text, DATE_ONLY) {
        return Ok(PrimitiveDateTime::new(date, Time::MIDNIGHT).assume_utc());
    }

    Err(ValueError::format(
        ErrorOrigin::Scalar,
        format!("could not parse time string '{text}'"),
    ))
}

fn parse_date_time(text: &str) -> Option<OffsetDateTime> {
    if let Ok(ts) = OffsetDateTime::parse(text, WITH_OFFSET) {
        return Some(ts);
    }

    [WITHOUT_OFFSET, WITHOUT_SECONDS]
        .into_iter()
        .find_map(|format| PrimitiveDateTime::parse(text, format).ok())
        .map(PrimitiveDateTime::assume_utc)
}

/// Format as RFC 3339 in UTC with trailing fractional zeros trimmed.
#[must_use]
pub fn format_timestamp(ts: OffsetDateTime) -> String {
    let utc = ts.checked_to_offset(UtcOffset::UTC).unwrap_or(ts);

    utc.format(&Rfc3339).unwrap_or_else(|_| utc.to_string())
}

impl ValueCodec for Timestamp {
    fn kind(&self) -> ValueKind {
        ValueKind::Timestamp
    }

    fn is_null(&self) -> bool {
        self.value.is_none()
    }

    fn native(&self) -> Native {
        self.value.map_or(Native::Null, Native::Time)
    }

    fn encode(&self) -> Vec<u8> {
        self.value.map_or_else(
            || NULL_SENTINEL.to_vec(),
            |ts| format_timestamp(ts).into_bytes(),
        )
    }

    fn decode(&mut self, input: Input) -> Result<(), ValueError> {
        self.value = match input.resolve() {
            Input::Null => None,
            Input::Time(ts) => Some(ts),
            Input::Text(text) => Some(parse_timestamp(&text)?),
            Input::Bytes(bytes) => Some(parse_timestamp(&utf8(bytes, ErrorOrigin::Scalar)?)?),
            other => return Err(mismatch(self.kind(), &other, ErrorOrigin::Scalar)),
        };

        Ok(())
    }

    fn to_wire(&self) -> WireValue {
        self.value.map_or(WireValue::Null, WireValue::Timestamp)
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn parsed(text: &str) -> OffsetDateTime {
        parse_timestamp(text).unwrap_or_else(|err| panic!("{text} should parse: {err}"))
    }

    #[test]
    fn parses_postgres_timestamptz_output() {
        assert_eq!(
            parsed("2012-01-01 23:00:00+01"),
            datetime!(2012-01-01 22:00:00 UTC)
        );
        assert_eq!(
            parsed("2012-01-01 23:00:00.123456-05:30"),
            datetime!(2012-01-01 23:00:00.123456 -05:30)
        );
    }

    #[test]
    fn naive_input_is_utc() {
        assert_eq!(
            parsed("2012-01-01 23:00:00"),
            datetime!(2012-01-01 23:00:00 UTC)
        );
        assert_eq!(parsed("2012-01-01 23:05"), datetime!(2012-01-01 23:05:00 UTC));
    }

    #[test]
    fn single_fraction_digit_is_padded() {
        assert_eq!(
            parsed("2012-01-01 23:00:00.5"),
            datetime!(2012-01-01 23:00:00.5 UTC)
        );
    }

    #[test]
    fn date_only_is_midnight_utc() {
        assert_eq!(parsed("2001-02-03"), datetime!(2001-02-03 00:00:00 UTC));
    }

    #[test]
    fn time_only_lands_on_year_zero() {
        assert_eq!(parsed("10:30:00"), datetime!(0000-01-01 10:30:00 UTC));
        assert_eq!(parsed("10:30:00+02"), datetime!(0000-01-01 10:30:00 +02:00));
    }

    #[test]
    fn rfc3339_is_accepted_and_produced() {
        let ts = parsed("2001-02-03T04:05:06.5+01:00");

        assert_eq!(format_timestamp(ts), "2001-02-03T03:05:06.5Z");
        assert_eq!(format_timestamp(parsed("2001-02-03")), "2001-02-03T00:00:00Z");
    }

    #[test]
    fn garbage_is_format_error() {
        let err = parse_timestamp("yesterday").expect_err("not a timestamp");

        assert!(err.is_format());
        assert!(err.message.contains("could not parse time string"));
    }

    #[test]
    fn text_form_round_trips_through_decode() {
        let mut value = Timestamp::new();
        value
            .decode(Input::from("2012-01-01 23:00:00+01"))
            .expect("timestamp decodes");

        let mut again = Timestamp::new();
        again.decode(Input::from(value.text())).expect("text form decodes");

        assert_eq!(again, value);
        assert_eq!(value.text(), "2012-01-01T22:00:00Z");
    }

    #[test]
    fn integer_input_is_type_mismatch() {
        let mut value = Timestamp::new();
        let err = value.decode(Input::Int(0)).expect_err("ints are not timestamps");

        assert!(err.is_type_mismatch());
    }
}
