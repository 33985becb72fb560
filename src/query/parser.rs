use chrono::{DateTime, FixedOffset, NaiveDateTime, Timelike};
use serde::Deserialize;

use crate::alerts::{AlertError, TimestampError};

/// Raw query-string parameters of a read request
#[derive(Debug, Default, Clone, Deserialize)]
pub struct QueryParams {
    pub service_id: Option<String>,
    pub start_ts: Option<String>,
    pub end_ts: Option<String>,
}

impl QueryParams {
    /// Build from decoded query-string pairs. A repeated key keeps its first
    /// value.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "service_id" => &mut params.service_id,
                "start_ts" => &mut params.start_ts,
                "end_ts" => &mut params.end_ts,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        params
    }
}

/// Validated read query. Both bounds are inclusive.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertQuery {
    pub service_id: String,
    pub start_time: DateTime<FixedOffset>,
    pub end_time: DateTime<FixedOffset>,
}

impl AlertQuery {
    /// Lower bound in epoch seconds
    pub fn start_epoch(&self) -> i64 {
        self.start_time.timestamp()
    }

    /// Upper bound in epoch seconds
    pub fn end_epoch(&self) -> i64 {
        self.end_time.timestamp()
    }
}

/// Validate read parameters.
///
/// Presence of all three parameters is checked before any timestamp is
/// parsed; `start_ts` is parsed before `end_ts`.
pub fn parse_query(params: &QueryParams) -> Result<AlertQuery, AlertError> {
    let (service_id, start_ts, end_ts) = match (
        non_empty(&params.service_id),
        non_empty(&params.start_ts),
        non_empty(&params.end_ts),
    ) {
        (Some(s), Some(start), Some(end)) => (s, start, end),
        _ => return Err(AlertError::MissingParameter),
    };

    Ok(AlertQuery {
        service_id: service_id.to_string(),
        start_time: parse_timestamp("start_ts", start_ts)?,
        end_time: parse_timestamp("end_ts", end_ts)?,
    })
}

const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";
const DATE_TIME_OFFSET_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f%:z";

/// Parse an RFC 3339 date-time (date, time and UTC offset).
///
/// Stricter than `DateTime::parse_from_rfc3339`: the separator must be an
/// uppercase `T`, the offset must be an uppercase `Z` or `+hh:mm`/`-hh:mm`
/// directly after the time, and leap seconds are rejected.
pub fn parse_timestamp(
    param: &'static str,
    value: &str,
) -> Result<DateTime<FixedOffset>, AlertError> {
    parse_strict_rfc3339(value).map_err(|source| AlertError::MalformedTimestamp {
        param,
        value: value.to_string(),
        source,
    })
}

fn parse_strict_rfc3339(value: &str) -> Result<DateTime<FixedOffset>, TimestampError> {
    let parsed = match value.strip_suffix('Z') {
        Some(utc) => NaiveDateTime::parse_from_str(utc, DATE_TIME_FORMAT)?
            .and_utc()
            .fixed_offset(),
        None if has_colon_offset(value) => {
            DateTime::parse_from_str(value, DATE_TIME_OFFSET_FORMAT)?
        }
        None => return Err(TimestampError::InvalidOffset),
    };

    // chrono encodes second 60 as a nanosecond overflow
    if parsed.nanosecond() >= 1_000_000_000 {
        return Err(TimestampError::LeapSecond);
    }
    Ok(parsed)
}

fn has_colon_offset(value: &str) -> bool {
    let bytes = value.as_bytes();
    let Some(start) = bytes.len().checked_sub(7) else {
        return false;
    };
    let tail = &bytes[start..];
    tail[0].is_ascii_digit()
        && matches!(tail[1], b'+' | b'-')
        && tail[2].is_ascii_digit()
        && tail[3].is_ascii_digit()
        && tail[4] == b':'
        && tail[5].is_ascii_digit()
        && tail[6].is_ascii_digit()
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(service_id: Option<&str>, start: Option<&str>, end: Option<&str>) -> QueryParams {
        QueryParams {
            service_id: service_id.map(String::from),
            start_ts: start.map(String::from),
            end_ts: end.map(String::from),
        }
    }

    #[test]
    fn test_from_pairs_keeps_first_value() {
        let pairs = vec![
            ("service_id".to_string(), "first".to_string()),
            ("service_id".to_string(), "second".to_string()),
            ("end_ts".to_string(), "2023-01-01T00:00:00Z".to_string()),
            ("other".to_string(), "ignored".to_string()),
        ];
        let params = QueryParams::from_pairs(pairs);

        assert_eq!(params.service_id.as_deref(), Some("first"));
        assert_eq!(params.start_ts, None);
        assert_eq!(params.end_ts.as_deref(), Some("2023-01-01T00:00:00Z"));
    }

    #[test]
    fn test_parse_valid_query() {
        let query = parse_query(&params(
            Some("svc"),
            Some("2022-10-20T00:00:00Z"),
            Some("2023-10-27T00:00:00Z"),
        ))
        .unwrap();

        assert_eq!(query.service_id, "svc");
        assert_eq!(query.start_epoch(), 1_666_224_000);
        assert_eq!(query.end_epoch(), 1_698_364_800);
    }

    #[test]
    fn test_offset_is_applied() {
        let utc = parse_timestamp("start_ts", "1970-01-01T01:00:00Z").unwrap();
        let shifted = parse_timestamp("start_ts", "1970-01-01T02:00:00+01:00").unwrap();

        assert_eq!(utc.timestamp(), 3600);
        assert_eq!(shifted.timestamp(), 3600);
    }

    #[test]
    fn test_fractional_seconds_truncate() {
        let ts = parse_timestamp("end_ts", "1970-01-01T00:16:40.999Z").unwrap();
        assert_eq!(ts.timestamp(), 1000);
    }

    #[test]
    fn test_rejects_loose_rfc3339_forms() {
        for value in [
            "2023-01-01 00:00:00Z",
            "2023-01-01t00:00:00Z",
            "2023-01-01T00:00:00z",
            "2023-01-01T23:59:60Z",
            "2023-01-01T00:00:00",
            "2023-01-01T00:00:00+0100",
            "2023-01-01T00:00:00 +01:00",
        ] {
            assert!(parse_timestamp("start_ts", value).is_err(), "{}", value);
        }

        let err = parse_timestamp("start_ts", "2016-12-31T23:59:60Z").unwrap_err();
        assert!(matches!(
            err,
            AlertError::MalformedTimestamp {
                source: TimestampError::LeapSecond,
                ..
            }
        ));
    }

    #[test]
    fn test_offset_shape_error() {
        let err = parse_timestamp("end_ts", "2023-01-01T00:00:00+0100").unwrap_err();
        assert!(matches!(
            err,
            AlertError::MalformedTimestamp {
                source: TimestampError::InvalidOffset,
                ..
            }
        ));
    }

    #[test]
    fn test_accepts_offsets_and_fractions() {
        let ts = parse_timestamp("end_ts", "2023-01-01T01:00:00.5+01:00").unwrap();
        assert_eq!(ts.timestamp(), 1_672_531_200);

        let ts = parse_timestamp("end_ts", "2023-01-01T00:00:00-00:30").unwrap();
        assert_eq!(ts.timestamp(), 1_672_533_000);
    }

    #[test]
    fn test_missing_parameters() {
        let cases = [
            params(None, Some("2023-01-01T00:00:00Z"), Some("2023-01-02T00:00:00Z")),
            params(Some("svc"), None, Some("2023-01-02T00:00:00Z")),
            params(Some("svc"), Some("2023-01-01T00:00:00Z"), None),
            params(Some(""), Some("2023-01-01T00:00:00Z"), Some("2023-01-02T00:00:00Z")),
            params(Some("svc"), Some(""), Some("2023-01-02T00:00:00Z")),
        ];

        for case in &cases {
            let err = parse_query(case).unwrap_err();
            assert!(matches!(err, AlertError::MissingParameter), "{:?}", case);
        }
    }

    #[test]
    fn test_missing_checked_before_malformed() {
        let err = parse_query(&params(None, Some("garbage"), Some("garbage"))).unwrap_err();
        assert!(matches!(err, AlertError::MissingParameter));
    }

    #[test]
    fn test_malformed_timestamps() {
        let err = parse_query(&params(Some("svc"), Some("yesterday"), Some("2023-01-02T00:00:00Z")))
            .unwrap_err();
        assert!(matches!(err, AlertError::MalformedTimestamp { param: "start_ts", .. }));

        // Date without time or offset is not accepted
        let err = parse_query(&params(Some("svc"), Some("2023-01-01T00:00:00Z"), Some("2023-01-02")))
            .unwrap_err();
        assert!(matches!(err, AlertError::MalformedTimestamp { param: "end_ts", .. }));
        assert!(err.to_string().starts_with("invalid end_ts \"2023-01-02\""));
    }
}
