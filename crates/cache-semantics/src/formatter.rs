//! Header writers for `ETag`, `Last-Modified`, `Expires` and `Cache-Control`.
//!
//! Each function takes the message by value and returns the updated one.

use chrono::{DateTime, TimeDelta, Utc};
use tracing::trace;

use crate::date::{format_http_date, TimeValue};
use crate::error::{CacheError, CacheResult};
use crate::etag::format_etag;
use crate::header::{CacheControl, ResponseCacheControl};
use crate::message::{HttpMessage, CACHE_CONTROL, ETAG, EXPIRES, LAST_MODIFIED};

fn set_header<M: HttpMessage>(message: M, name: &str, value: &str) -> CacheResult<M> {
    trace!(header = name, value, "writing cache header");
    message.with_header(name, value)
}

/// Set `ETag`, quoting `tag` when needed.
///
/// ```
/// use cache_semantics::formatter::with_etag;
/// use cache_semantics::HttpMessage;
///
/// let response = with_etag(http::Response::new(()), "foo", true).unwrap();
/// assert_eq!(response.header_line("ETag"), "W/\"foo\"");
/// ```
pub fn with_etag<M: HttpMessage>(message: M, tag: &str, weak: bool) -> CacheResult<M> {
    set_header(message, ETAG, &format_etag(tag, weak))
}

pub fn with_last_modified<M: HttpMessage>(
    message: M,
    time: impl Into<TimeValue>,
) -> CacheResult<M> {
    let time = time.into().to_datetime()?;
    set_header(message, LAST_MODIFIED, &format_http_date(&time))
}

pub fn with_expires<M: HttpMessage>(message: M, time: impl Into<TimeValue>) -> CacheResult<M> {
    let time = time.into().to_datetime()?;
    set_header(message, EXPIRES, &format_http_date(&time))
}

/// Set `Expires` to now plus `seconds` (may be negative).
pub fn with_relative_expires<M: HttpMessage>(message: M, seconds: i64) -> CacheResult<M> {
    with_relative_expires_at(message, seconds, Utc::now())
}

pub fn with_relative_expires_at<M: HttpMessage>(
    message: M,
    seconds: i64,
    now: DateTime<Utc>,
) -> CacheResult<M> {
    let expires = TimeDelta::try_seconds(seconds)
        .and_then(|offset| now.checked_add_signed(offset))
        .ok_or_else(|| CacheError::TimestampParse {
            kind: format!("out-of-range offset of {} seconds", seconds),
        })?;
    with_expires(message, expires)
}

/// Set `Cache-Control` to the rendered `control`.
pub fn with_cache_control<M: HttpMessage, C: CacheControl>(
    message: M,
    control: &C,
) -> CacheResult<M> {
    set_header(message, CACHE_CONTROL, &control.directives().to_string())
}

/// Allow caching for `lifetime` seconds, `public` or `private`.
pub fn with_cache<M: HttpMessage>(message: M, public: bool, lifetime: u64) -> CacheResult<M> {
    let control = ResponseCacheControl::default()
        .with_public(public)
        .with_private(!public)
        .with_directive("max-age", lifetime);
    with_cache_control(message, &control)
}

/// `Cache-Control: no-cache, no-store, must-revalidate`.
pub fn with_cache_prevention<M: HttpMessage>(message: M) -> CacheResult<M> {
    with_cache_control(message, &ResponseCacheControl::default().with_cache_prevention())
}
