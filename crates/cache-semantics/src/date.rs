//! HTTP-date parsing and formatting (RFC 7231 §7.1.1.1).
//!
//! Incoming header dates go through [`parse_http_date`], which never fails
//! loudly: an unparseable header simply yields `None`. Dates supplied by the
//! caller go through [`TimeValue`], which reports errors.

use std::time::SystemTime;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde_json::Value;

use crate::error::{json_kind, CacheError, CacheResult};

/// IMF-fixdate, the preferred HTTP-date form.
const IMF_FIXDATE: &str = "%a, %d %b %Y %H:%M:%S GMT";

const HTTP_DATE_FORMATS: &[&str] = &[
    IMF_FIXDATE,
    // obsolete RFC 850
    "%A, %d-%b-%y %H:%M:%S GMT",
    // ANSI C asctime()
    "%a %b %e %H:%M:%S %Y",
    // IMF-fixdate without zone, seen from some PHP/CGI backends
    "%a, %d %b %Y %H:%M:%S",
];

const NAIVE_INPUT_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Render `time` as an IMF-fixdate (`Mon, 10 Aug 2015 18:30:12 GMT`).
pub fn format_http_date(time: &DateTime<Utc>) -> String {
    time.format(IMF_FIXDATE).to_string()
}

/// Parse an HTTP-date header value.
///
/// Accepts IMF-fixdate plus the legacy RFC 850 and asctime forms. Zone-less
/// forms are read as UTC.
///
/// ```
/// use cache_semantics::date::parse_http_date;
///
/// let date = parse_http_date("Mon, 10 Aug 2015 18:30:12 GMT").unwrap();
/// assert_eq!(date.timestamp(), 1439231412);
/// assert!(parse_http_date("invalid").is_none());
/// ```
pub fn parse_http_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    HTTP_DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|naive| naive.and_utc())
        .or_else(|| {
            DateTime::parse_from_rfc2822(value)
                .ok()
                .map(|date| date.with_timezone(&Utc))
        })
}

/// Parse a caller-supplied date string.
///
/// On top of the HTTP-date forms this accepts RFC 3339 and
/// `YYYY-MM-DD[( |T)HH:MM:SS]`; zone-less input is UTC.
pub fn parse_date_input(value: &str) -> CacheResult<DateTime<Utc>> {
    let trimmed = value.trim();

    parse_http_date(trimmed)
        .or_else(|| {
            DateTime::parse_from_rfc3339(trimmed)
                .ok()
                .map(|date| date.with_timezone(&Utc))
        })
        .or_else(|| {
            NAIVE_INPUT_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
                .map(|naive| naive.and_utc())
        })
        .or_else(|| {
            NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
                .map(|naive| naive.and_utc())
        })
        .ok_or_else(|| CacheError::DateParse {
            input: value.to_string(),
        })
}

/// A point in time as accepted by the header formatter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeValue {
    /// Seconds since the Unix epoch.
    Timestamp(i64),

    /// A date string, see [`parse_date_input`].
    Text(String),

    DateTime(DateTime<Utc>),
}

impl TimeValue {
    /// Resolve to a UTC date.
    pub fn to_datetime(&self) -> CacheResult<DateTime<Utc>> {
        match self {
            Self::Timestamp(secs) => DateTime::<Utc>::from_timestamp(*secs, 0).ok_or_else(|| {
                CacheError::TimestampParse {
                    kind: format!("out-of-range integer {}", secs),
                }
            }),
            Self::Text(text) => parse_date_input(text),
            Self::DateTime(date) => Ok(*date),
        }
    }

    /// Resolve to seconds since the Unix epoch.
    pub fn timestamp(&self) -> CacheResult<i64> {
        match self {
            Self::Timestamp(secs) => Ok(*secs),
            _ => self.to_datetime().map(|date| date.timestamp()),
        }
    }
}

impl From<i64> for TimeValue {
    fn from(secs: i64) -> Self {
        Self::Timestamp(secs)
    }
}

impl From<&str> for TimeValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for TimeValue {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for TimeValue {
    fn from(date: DateTime<Tz>) -> Self {
        Self::DateTime(date.with_timezone(&Utc))
    }
}

impl From<SystemTime> for TimeValue {
    fn from(time: SystemTime) -> Self {
        Self::DateTime(DateTime::<Utc>::from(time))
    }
}

/// Dynamic input: integers are timestamps, strings are dates.
///
/// Arrays and objects cannot describe a timestamp at all
/// ([`CacheError::TimestampParse`]); other scalars are the wrong type
/// ([`CacheError::InvalidType`]).
impl TryFrom<&Value> for TimeValue {
    type Error = CacheError;

    fn try_from(value: &Value) -> CacheResult<Self> {
        match value {
            Value::Number(number) => match number.as_i64() {
                Some(secs) => Ok(Self::Timestamp(secs)),
                None if number.is_f64() => Err(time_type_error(value)),
                None => Err(CacheError::TimestampParse {
                    kind: format!("out-of-range integer {}", number),
                }),
            },
            Value::String(text) => Ok(Self::Text(text.clone())),
            Value::Array(_) | Value::Object(_) => Err(CacheError::TimestampParse {
                kind: json_kind(value).to_string(),
            }),
            Value::Null | Value::Bool(_) => Err(time_type_error(value)),
        }
    }
}

fn time_type_error(value: &Value) -> CacheError {
    CacheError::invalid_type(format!(
        "expected a timestamp, a date string or a date, received {}",
        json_kind(value)
    ))
}

/// Read a relative expiry offset from dynamic input.
pub fn seconds_from_json(value: &Value) -> CacheResult<i64> {
    value.as_i64().ok_or_else(|| {
        CacheError::invalid_type(format!(
            "expected an integer number of seconds, received {}",
            json_kind(value)
        ))
    })
}
