//! Brevet start timestamps.
//!
//! Start times arrive from forms and JSON bodies as ISO-like strings, with
//! or without a UTC offset. Control times are handed back at minute
//! precision, `YYYY-MM-DDTHH:MM`, in the offset of the start.

use chrono::{DateTime, FixedOffset, NaiveDateTime, Offset, TimeZone, Utc};

/// Rendering used for every control time shown to riders.
pub const MINUTE_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Error returned when a timestamp string cannot be understood.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid timestamp {input:?}: expected YYYY-MM-DDTHH:MM with an optional offset")]
pub struct TimestampError {
    input: String,
}

const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M%:z", "%Y-%m-%dT%H:%M:%S%:z"];
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"];

/// Parse a start timestamp.
///
/// Accepts RFC 3339, `YYYY-MM-DDTHH:MM[:SS]±hh:mm`, and the same without an
/// offset, which is taken as UTC.
///
/// # Examples
///
/// ```
/// use brevet_server::domain::parse_timestamp;
///
/// let t = parse_timestamp("2021-01-01T06:00-08:00").unwrap();
/// assert_eq!(t.offset().local_minus_utc(), -8 * 3600);
///
/// let t = parse_timestamp("2021-01-01T06:00").unwrap();
/// assert_eq!(t.offset().local_minus_utc(), 0);
///
/// assert!(parse_timestamp("yesterday").is_err());
/// ```
pub fn parse_timestamp(s: &str) -> Result<DateTime<FixedOffset>, TimestampError> {
    let s = s.trim();

    if let Ok(t) = DateTime::parse_from_rfc3339(s) {
        return Ok(t);
    }

    for format in OFFSET_FORMATS {
        if let Ok(t) = DateTime::parse_from_str(s, format) {
            return Ok(t);
        }
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Ok(Utc.fix().from_utc_datetime(&naive));
        }
    }

    Err(TimestampError {
        input: s.to_string(),
    })
}

/// Render at minute precision in the timestamp's own offset.
pub fn format_minute(t: &DateTime<FixedOffset>) -> String {
    t.format(MINUTE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_naive_as_utc() {
        let t = parse_timestamp("2021-01-01T00:00").unwrap();
        assert_eq!(t.to_rfc3339(), "2021-01-01T00:00:00+00:00");

        let t = parse_timestamp("2021-01-01T00:00:30").unwrap();
        assert_eq!(t.to_rfc3339(), "2021-01-01T00:00:30+00:00");
    }

    #[test]
    fn parses_with_offset() {
        let t = parse_timestamp("2021-07-04T05:30+02:00").unwrap();
        assert_eq!(t.to_rfc3339(), "2021-07-04T05:30:00+02:00");

        let t = parse_timestamp("2021-07-04T05:30:00-07:00").unwrap();
        assert_eq!(t.offset().local_minus_utc(), -7 * 3600);
    }

    #[test]
    fn parses_rfc3339() {
        let t = parse_timestamp("2021-07-04T05:30:00Z").unwrap();
        assert_eq!(t.offset().local_minus_utc(), 0);
    }

    #[test]
    fn trims_whitespace() {
        assert!(parse_timestamp("  2021-07-04T05:30 ").is_ok());
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_timestamp("").is_err());
        assert!(parse_timestamp("2021-13-01T00:00").is_err());
        assert!(parse_timestamp("2021-01-01 00:00").is_err());

        let err = parse_timestamp("noon").unwrap_err();
        assert!(err.to_string().contains("\"noon\""));
    }

    #[test]
    fn format_keeps_local_wall_clock() {
        let t = parse_timestamp("2021-07-04T05:30:45+02:00").unwrap();
        assert_eq!(format_minute(&t), "2021-07-04T05:30");
    }
}
