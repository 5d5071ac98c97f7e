//! Timestamp classification and epoch conversions.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::Serialize;

use super::error::TransformError;

/// What a raw timestamp/date string looks like.
///
/// Variants are tested in declaration order; the first match wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TimestampClassification {
    UnixSeconds,
    UnixMilliseconds,
    Iso8601,
    DateOnly,
    TimeOnly,
    Unknown,
}

impl TimestampClassification {
    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::UnixSeconds => "Unix Timestamp (seconds)",
            Self::UnixMilliseconds => "Unix Timestamp (milliseconds)",
            Self::Iso8601 => "ISO 8601",
            Self::DateOnly => "Date (YYYY-MM-DD)",
            Self::TimeOnly => "Time (HH:mm)",
            Self::Unknown => "Unknown format",
        }
    }
}

/// A point in time rendered three ways.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateRendering {
    /// `Tue, 14 Nov 2023 22:13:20 GMT`
    pub utc: String,
    /// `2023-11-14T22:13:20.000Z`
    pub iso: String,
    /// Host local time with its UTC offset.
    pub local: String,
}

/// A point in time as Unix epoch values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EpochValue {
    pub seconds: i64,
    pub milliseconds: i64,
}

impl EpochValue {
    fn from_millis(milliseconds: i64) -> Self {
        Self {
            seconds: milliseconds.div_euclid(1000),
            milliseconds,
        }
    }
}

/// Classify `text` (trimmed) by shape.
pub fn classify(text: &str) -> TimestampClassification {
    let text = text.trim();

    if !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) {
        match text.len() {
            1..=10 => return TimestampClassification::UnixSeconds,
            11..=13 => return TimestampClassification::UnixMilliseconds,
            _ => {}
        }
    }

    if is_iso_datetime(text) {
        TimestampClassification::Iso8601
    } else if matches_shape(text, "dddd-dd-dd") {
        TimestampClassification::DateOnly
    } else if matches_shape(text, "dd:dd") {
        TimestampClassification::TimeOnly
    } else {
        TimestampClassification::Unknown
    }
}

/// Interpret a numeric timestamp (seconds or milliseconds) as a date.
pub fn to_date(text: &str) -> Result<DateRendering, TransformError> {
    let trimmed = text.trim();
    let scale = match classify(trimmed) {
        TimestampClassification::UnixSeconds => 1000,
        TimestampClassification::UnixMilliseconds => 1,
        _ => return Err(TransformError::invalid_timestamp(trimmed)),
    };

    let millis = trimmed
        .parse::<i64>()
        .ok()
        .and_then(|n| n.checked_mul(scale))
        .ok_or_else(|| TransformError::invalid_timestamp(trimmed))?;
    let dt = DateTime::<Utc>::from_timestamp_millis(millis)
        .ok_or_else(|| TransformError::invalid_timestamp(trimmed))?;

    Ok(render(dt))
}

/// Parse a date or date-time string into epoch seconds and milliseconds.
///
/// Accepted: RFC 3339, RFC 2822, `YYYY-MM-DD` (UTC midnight), and
/// offset-less date-times, which are read in host local time.
pub fn to_timestamp(text: &str) -> Result<EpochValue, TransformError> {
    let trimmed = text.trim();
    parse_datetime(trimmed)
        .map(|dt| EpochValue::from_millis(dt.timestamp_millis()))
        .ok_or_else(|| TransformError::invalid_date_input(trimmed))
}

/// The current time as epoch values.
pub fn now() -> EpochValue {
    EpochValue::from_millis(Utc::now().timestamp_millis())
}

/// ISO 8601 (UTC, millisecond precision) rendering of epoch milliseconds.
pub fn iso_from_millis(milliseconds: i64) -> Option<String> {
    DateTime::<Utc>::from_timestamp_millis(milliseconds).map(|dt| iso(&dt))
}

fn iso(dt: &DateTime<Utc>) -> String {
    dt.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

fn render(dt: DateTime<Utc>) -> DateRendering {
    DateRendering {
        utc: dt.format("%a, %d %b %Y %H:%M:%S GMT").to_string(),
        iso: iso(&dt),
        local: dt
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S %:z")
            .to_string(),
    }
}

const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M%z",
    "%Y-%m-%dT%H:%M%:z",
];

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

fn parse_datetime(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(text) {
        return Some(dt.with_timezone(&Utc));
    }
    // Trailing `Z` as an explicit zero offset.
    let zoned = match text.strip_suffix('Z') {
        Some(rest) => format!("{rest}+00:00"),
        None => text.to_string(),
    };
    if let Some(dt) = OFFSET_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(&zoned, fmt).ok())
    {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
    }
    NAIVE_FORMATS.iter().find_map(|fmt| {
        let naive = NaiveDateTime::parse_from_str(text, fmt).ok()?;
        Local
            .from_local_datetime(&naive)
            .earliest()
            .map(|dt| dt.with_timezone(&Utc))
    })
}

/// `d` matches an ASCII digit, any other byte matches itself.
fn matches_shape(text: &str, shape: &str) -> bool {
    text.len() == shape.len()
        && text.bytes().zip(shape.bytes()).all(|(t, s)| match s {
            b'd' => t.is_ascii_digit(),
            _ => t == s,
        })
}

/// `YYYY-MM-DDTHH:mm[:ss[.fff]][Z|+hh:mm|+hhmm]`
fn is_iso_datetime(text: &str) -> bool {
    let Some((date, time)) = text.split_once('T') else {
        return false;
    };
    if !matches_shape(date, "dddd-dd-dd") || time.len() < 5 || !time.is_char_boundary(5) {
        return false;
    }
    let (hm, mut rest) = time.split_at(5);
    if !matches_shape(hm, "dd:dd") {
        return false;
    }

    if rest.get(..3).is_some_and(|seconds| matches_shape(seconds, ":dd")) {
        rest = &rest[3..];
        if let Some(fraction) = rest.strip_prefix('.') {
            let digits = fraction.bytes().take_while(|b| b.is_ascii_digit()).count();
            if digits == 0 {
                return false;
            }
            rest = &fraction[digits..];
        }
    }

    match rest {
        "" | "Z" => true,
        _ if rest.starts_with('+') || rest.starts_with('-') => {
            let offset = &rest[1..];
            matches_shape(offset, "dd:dd") || matches_shape(offset, "dddd")
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_numeric() {
        assert_eq!(classify("1700000000"), TimestampClassification::UnixSeconds);
        assert_eq!(classify("0"), TimestampClassification::UnixSeconds);
        assert_eq!(classify("1700000000123"), TimestampClassification::UnixMilliseconds);
        assert_eq!(classify("17000000001"), TimestampClassification::UnixMilliseconds);
        assert_eq!(classify("17000000001234"), TimestampClassification::Unknown);
    }

    #[test]
    fn test_classify_textual() {
        assert_eq!(classify("2024-06-01T14:30:00Z"), TimestampClassification::Iso8601);
        assert_eq!(classify("2024-06-01T14:30"), TimestampClassification::Iso8601);
        assert_eq!(classify("2024-06-01T14:30:00.123+02:00"), TimestampClassification::Iso8601);
        assert_eq!(classify("2024-06-01T14:30:00-0300"), TimestampClassification::Iso8601);
        assert_eq!(classify("2025-01-30"), TimestampClassification::DateOnly);
        assert_eq!(classify("14:45"), TimestampClassification::TimeOnly);
        assert_eq!(classify(" 14:45 "), TimestampClassification::TimeOnly);
    }

    #[test]
    fn test_classify_unknown() {
        assert_eq!(classify("123abc"), TimestampClassification::Unknown);
        assert_eq!(classify(""), TimestampClassification::Unknown);
        assert_eq!(classify("2024-06-01T14:30:00."), TimestampClassification::Unknown);
        assert_eq!(classify("2024-06-01T14:30:00+2"), TimestampClassification::Unknown);
        assert_eq!(classify("2024-06-01Té4:30"), TimestampClassification::Unknown);
    }

    #[test]
    fn test_labels() {
        assert_eq!(TimestampClassification::UnixSeconds.label(), "Unix Timestamp (seconds)");
        assert_eq!(TimestampClassification::Unknown.label(), "Unknown format");
    }

    #[test]
    fn test_to_date_seconds() {
        let date = to_date("1700000000").unwrap();
        assert_eq!(date.utc, "Tue, 14 Nov 2023 22:13:20 GMT");
        assert_eq!(date.iso, "2023-11-14T22:13:20.000Z");
        assert!(!date.local.is_empty());
    }

    #[test]
    fn test_to_date_milliseconds() {
        let date = to_date("1700000000123").unwrap();
        assert_eq!(date.iso, "2023-11-14T22:13:20.123Z");
    }

    #[test]
    fn test_to_date_invalid() {
        assert!(matches!(to_date("invalid"), Err(TransformError::InvalidTimestamp(_))));
        assert!(matches!(to_date("2024-06-01"), Err(TransformError::InvalidTimestamp(_))));
    }

    #[test]
    fn test_to_timestamp_rfc3339() {
        let value = to_timestamp("2024-12-25T18:00:00Z").unwrap();
        assert_eq!(value.seconds, 1_735_149_600);
        assert_eq!(value.milliseconds, 1_735_149_600_000);

        let offset = to_timestamp("2024-12-25T15:00:00-03:00").unwrap();
        assert_eq!(offset.seconds, 1_735_149_600);
    }

    #[test]
    fn test_to_timestamp_other_forms() {
        assert_eq!(to_timestamp("2024-12-25").unwrap().seconds, 1_735_084_800);
        assert_eq!(
            to_timestamp("Wed, 25 Dec 2024 18:00:00 +0000").unwrap().seconds,
            1_735_149_600
        );
        assert!(to_timestamp("2024-12-25T18:00:00").is_ok());
    }

    #[test]
    fn test_iso_classified_inputs_convert() {
        let samples = [
            ("2024-06-01T14:30:00Z", 1_717_252_200),
            ("2024-06-01T14:30Z", 1_717_252_200),
            ("2024-06-01T14:30:00.123+02:00", 1_717_245_000),
            ("2024-06-01T14:30+02:00", 1_717_245_000),
            ("2024-06-01T14:30:00+0300", 1_717_241_400),
            ("2024-06-01T14:30:00-0300", 1_717_263_000),
        ];
        for (input, seconds) in samples {
            assert_eq!(classify(input), TimestampClassification::Iso8601, "{input}");
            assert_eq!(to_timestamp(input).unwrap().seconds, seconds, "{input}");
        }
        assert!(to_timestamp("2024-06-01T14:30").is_ok());
    }

    #[test]
    fn test_to_timestamp_floors_seconds() {
        let value = to_timestamp("1969-12-31T23:59:59.500Z").unwrap();
        assert_eq!(value.milliseconds, -500);
        assert_eq!(value.seconds, -1);
    }

    #[test]
    fn test_to_timestamp_invalid() {
        assert!(matches!(
            to_timestamp("not-a-date"),
            Err(TransformError::InvalidDateInput(_))
        ));
        assert!(to_timestamp("").is_err());
    }

    #[test]
    fn test_iso_from_millis() {
        assert_eq!(iso_from_millis(0).as_deref(), Some("1970-01-01T00:00:00.000Z"));
    }

    #[test]
    fn test_now_is_consistent() {
        let value = now();
        assert_eq!(value.seconds, value.milliseconds.div_euclid(1000));
        assert!(value.seconds > 1_700_000_000);
    }
}
