//! Conditional-request and freshness evaluation.
//!
//! Every function here is a pure computation over the given messages. Header
//! problems (bad dates, garbage tags) never raise; they resolve to the
//! non-matching answer.
//!
//! # Conditional requests
//!
//! | Function | Validators | ETag comparison |
//! |----------|------------|-----------------|
//! | [`has_current_state`] | `If-Match`, `If-Unmodified-Since`, `If-None-Match` | strong |
//! | [`is_not_modified`] | `If-None-Match`, `If-Modified-Since` | weak |

use chrono::{DateTime, Utc};
use tracing::{debug, trace};

use crate::config::CacheConfig;
use crate::date::parse_http_date;
use crate::etag::{matches_etag, Comparison};
use crate::header::{CacheControl, RequestCacheControl, ResponseCacheControl};
use crate::message::{
    HttpMessage, HttpRequest, HttpResponse, AGE, CACHE_CONTROL, DATE, ETAG, EXPIRES, IF_MATCH,
    IF_MODIFIED_SINCE, IF_NONE_MATCH, IF_UNMODIFIED_SINCE, LAST_MODIFIED,
};

/// Status codes cacheable by default (RFC 7231 §6.1).
pub const CACHEABLE_STATUSES: &[u16] = &[200, 203, 204, 206, 300, 301, 404, 405, 410, 414, 501];

/// GET and HEAD.
pub fn is_safe_method(method: &str) -> bool {
    matches!(method, "GET" | "HEAD")
}

/// Whether the request carries `If-Match` or `If-Unmodified-Since`.
pub fn has_state_validator<R: HttpRequest>(request: &R) -> bool {
    request.has_header(IF_MATCH) || request.has_header(IF_UNMODIFIED_SINCE)
}

/// Whether the request's precondition holds for the current representation.
///
/// The first present validator decides: `If-Match` (strong comparison),
/// then `If-Unmodified-Since`, then `If-None-Match`. For `If-None-Match` a
/// match still counts as current on GET/HEAD. Without any validator the
/// state cannot be confirmed and the answer is `false`.
pub fn has_current_state<R: HttpRequest>(
    request: &R,
    etag: Option<&str>,
    last_modified: Option<&str>,
) -> bool {
    let if_match = request.header_line(IF_MATCH);
    if !if_match.is_empty() {
        let current = matches_etag(&if_match, etag, Comparison::Strong);
        debug!(validator = IF_MATCH, current, "checked current state");
        return current;
    }

    let if_unmodified_since = request.header_line(IF_UNMODIFIED_SINCE);
    if !if_unmodified_since.is_empty() {
        let current = last_modified
            .filter(|value| !value.is_empty())
            .is_some_and(|value| matches_modified(&if_unmodified_since, value));
        debug!(validator = IF_UNMODIFIED_SINCE, current, "checked current state");
        return current;
    }

    let if_none_match = request.header_line(IF_NONE_MATCH);
    if !if_none_match.is_empty() {
        let matched = matches_etag(&if_none_match, etag, Comparison::Strong);
        let current = !matched || is_safe_method(request.method());
        debug!(validator = IF_NONE_MATCH, matched, current, "checked current state");
        return current;
    }

    false
}

/// Whether a response with `last_modified` is unchanged since `header_date`.
///
/// Fails closed: an unparseable date on either side is `false`.
pub fn matches_modified(header_date: &str, last_modified: &str) -> bool {
    match (parse_http_date(header_date), parse_http_date(last_modified)) {
        (Some(since), Some(modified)) => modified <= since,
        _ => false,
    }
}

/// Whether the client's cached copy is still valid (a 304 may be sent).
///
/// `If-None-Match` takes precedence and uses weak comparison. Otherwise
/// `If-Modified-Since` is only honoured for GET/HEAD.
pub fn is_not_modified<Req: HttpRequest, Res: HttpMessage>(request: &Req, response: &Res) -> bool {
    let if_none_match = request.header_line(IF_NONE_MATCH);
    if !if_none_match.is_empty() {
        let etag = response.header_line(ETAG);
        let not_modified = matches_etag(&if_none_match, Some(&etag), Comparison::Weak);
        debug!(validator = IF_NONE_MATCH, not_modified, "checked modification");
        return not_modified;
    }

    if !is_safe_method(request.method()) {
        return false;
    }

    let if_modified_since = request.header_line(IF_MODIFIED_SINCE);
    if if_modified_since.is_empty() {
        return false;
    }

    let not_modified = matches_modified(&if_modified_since, &response.header_line(LAST_MODIFIED));
    debug!(validator = IF_MODIFIED_SINCE, not_modified, "checked modification");
    not_modified
}

/// Whether the response may be stored by a shared cache.
///
/// Uses [`CACHEABLE_STATUSES`]; see [`is_cacheable_with`] for a configured set.
pub fn is_cacheable<R: HttpResponse>(response: &R) -> bool {
    cacheable_for(response, CACHEABLE_STATUSES)
}

pub fn is_cacheable_with<R: HttpResponse>(response: &R, config: &CacheConfig) -> bool {
    cacheable_for(response, &config.cacheable_statuses)
}

fn cacheable_for<R: HttpResponse>(response: &R, statuses: &[u16]) -> bool {
    if !statuses.contains(&response.status_code()) {
        return false;
    }
    if !response.has_header(CACHE_CONTROL) {
        return true;
    }
    !response_cache_control(response).is_private()
}

/// `Cache-Control` of a response; empty when the header is absent.
pub fn response_cache_control<R: HttpMessage>(response: &R) -> ResponseCacheControl {
    ResponseCacheControl::parse(&response.header_line(CACHE_CONTROL))
}

/// `Cache-Control` of a request; empty when the header is absent.
pub fn request_cache_control<R: HttpMessage>(request: &R) -> RequestCacheControl {
    RequestCacheControl::parse(&request.header_line(CACHE_CONTROL))
}

/// Whether the response is still fresh. `None` when no lifetime is known.
pub fn is_fresh<R: HttpMessage>(response: &R) -> Option<bool> {
    is_fresh_at(response, Utc::now())
}

pub fn is_fresh_at<R: HttpMessage>(response: &R, now: DateTime<Utc>) -> Option<bool> {
    freshness(lifetime_at(response, now), age_at(response, now))
}

/// Fresh iff the lifetime strictly exceeds the age; a missing age counts as 0.
pub fn freshness(lifetime: Option<u64>, age: Option<u64>) -> Option<bool> {
    lifetime.map(|lifetime| lifetime > age.unwrap_or(0))
}

/// Freshness lifetime in seconds.
///
/// With a `Cache-Control` header only `s-maxage`/`max-age` count, there is
/// no fallback to `Expires`. Without one it is `Expires - Date` (or `now`
/// when `Date` is missing), never negative.
pub fn lifetime<R: HttpMessage>(response: &R) -> Option<u64> {
    lifetime_at(response, Utc::now())
}

pub fn lifetime_at<R: HttpMessage>(response: &R, now: DateTime<Utc>) -> Option<u64> {
    if response.has_header(CACHE_CONTROL) {
        let lifetime = response_cache_control(response).lifetime();
        trace!(?lifetime, "lifetime from Cache-Control");
        return lifetime;
    }

    let expires = parse_http_date(&response.header_line(EXPIRES))?;
    let date = parse_http_date(&response.header_line(DATE)).unwrap_or(now);
    let lifetime = seconds_between(date, expires);
    trace!(%expires, %date, lifetime, "lifetime from Expires");
    Some(lifetime)
}

/// Age of the response in seconds, from `Age` or else `now - Date`.
pub fn age<R: HttpMessage>(response: &R) -> Option<u64> {
    age_at(response, Utc::now())
}

pub fn age_at<R: HttpMessage>(response: &R, now: DateTime<Utc>) -> Option<u64> {
    if let Ok(age) = response.header_line(AGE).trim().parse::<u64>() {
        return Some(age);
    }

    let date = parse_http_date(&response.header_line(DATE))?;
    let age = seconds_between(date, now);
    trace!(%date, age, "age from Date");
    Some(age)
}

fn seconds_between(from: DateTime<Utc>, to: DateTime<Utc>) -> u64 {
    u64::try_from((to - from).num_seconds()).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    const AUG_10_1830: &str = "Mon, 10 Aug 2015 18:30:12 GMT";

    fn request(method: &str, headers: &[(&str, &str)]) -> http::Request<()> {
        let mut builder = http::Request::builder().method(method);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        builder.body(()).unwrap()
    }

    fn response(status: u16, headers: &[(&str, &str)]) -> http::Response<()> {
        let mut builder = http::Response::builder().status(status);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        builder.body(()).unwrap()
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2015, 8, 10, 18, 30, 12).unwrap()
    }

    #[test]
    fn test_has_state_validator() {
        let cases = [
            (false, false, false),
            (true, false, true),
            (false, true, true),
            (true, true, true),
        ];
        for (if_match, if_unmodified, expected) in cases {
            let mut headers = Vec::new();
            if if_match {
                headers.push((IF_MATCH, "\"foo\""));
            }
            if if_unmodified {
                headers.push((IF_UNMODIFIED_SINCE, AUG_10_1830));
            }
            assert_eq!(has_state_validator(&request("GET", &headers)), expected);
        }
    }

    #[test]
    fn test_current_state_with_if_match() {
        let cases = [
            ("\"foo\"", Some("foo"), true),
            ("\"foo\"", Some("\"foo\""), true),
            ("\"foo\"", Some("bar"), false),
            ("\"foo\"", Some("\"bar\""), false),
            ("\"foo\", \"bar\"", Some("bar"), true),
            ("\"foo\", \"bar\"", Some("baz"), false),
            ("*", Some("baz"), true),
            ("*", None, false),
            ("W/\"foo\"", Some("foo"), false),
            ("\"foo\"", Some("W/\"foo\""), false),
            ("W/\"foo\"", Some("W/\"foo\""), false),
        ];
        for (if_match, etag, expected) in cases {
            let req = request("PUT", &[(IF_MATCH, if_match)]);
            assert_eq!(
                has_current_state(&req, etag, None),
                expected,
                "If-Match {:?} etag {:?}",
                if_match,
                etag
            );
        }
    }

    #[test]
    fn test_current_state_with_if_unmodified_since() {
        let cases = [
            (AUG_10_1830, Some(AUG_10_1830), true),
            ("Mon, 10 Aug 2015 20:30:12 GMT", Some(AUG_10_1830), true),
            ("Mon, 10 Aug 2015 16:30:12 GMT", Some(AUG_10_1830), false),
            (AUG_10_1830, None, false),
            ("invalid", Some(AUG_10_1830), false),
        ];
        for (if_unmodified, last_modified, expected) in cases {
            let req = request("PUT", &[(IF_UNMODIFIED_SINCE, if_unmodified)]);
            assert_eq!(
                has_current_state(&req, Some(""), last_modified),
                expected,
                "If-Unmodified-Since {:?}",
                if_unmodified
            );
        }
    }

    #[test]
    fn test_current_state_with_if_none_match() {
        let cases = [
            ("\"foo\"", Some("bar"), true),
            ("\"foo\"", Some("foo"), false),
            ("*", Some("baz"), false),
            ("*", None, true),
            // weak tags never match under strong comparison
            ("W/\"foo\"", Some("foo"), true),
            ("\"foo\"", Some("W/\"foo\""), true),
        ];
        for (if_none_match, etag, expected) in cases {
            let req = request("PUT", &[(IF_NONE_MATCH, if_none_match)]);
            assert_eq!(
                has_current_state(&req, etag, None),
                expected,
                "If-None-Match {:?} etag {:?}",
                if_none_match,
                etag
            );
        }
    }

    #[test]
    fn test_weak_if_none_match_on_unsafe_method() {
        let req = request("PUT", &[(IF_NONE_MATCH, "W/\"foo\"")]);
        let res = response(200, &[(ETAG, "\"foo\"")]);

        assert!(is_not_modified(&req, &res));
        assert!(has_current_state(&req, Some("foo"), None));
    }

    #[test]
    fn test_current_state_with_if_none_match_and_safe_method() {
        let req = request("GET", &[(IF_NONE_MATCH, "\"foo\"")]);
        assert!(has_current_state(&req, Some("foo"), None));
    }

    #[test]
    fn test_current_state_if_match_takes_precedence() {
        let req = request(
            "PUT",
            &[(IF_MATCH, "\"foo\""), (IF_UNMODIFIED_SINCE, "Mon, 10 Aug 2015 16:30:12 GMT")],
        );
        assert!(has_current_state(&req, Some("foo"), Some(AUG_10_1830)));
    }

    #[test]
    fn test_current_state_without_validator() {
        let req = request("GET", &[]);
        assert!(!has_current_state(&req, Some("foo"), Some(AUG_10_1830)));
    }

    #[test]
    fn test_not_modified_with_etag() {
        let cases = [
            ("\"foo\"", "\"foo\"", true),
            ("\"bar\"", "\"foo\"", false),
            ("\"foo\", \"bar\"", "\"bar\"", true),
            ("\"foo\", \"bar\"", "\"baz\"", false),
            ("*", "\"foo\"", true),
            ("\"foo\",\"bar\"", "\"bar\"", true),
            ("W/\"foo\"", "\"foo\"", true),
            ("\"foo\"", "W/\"foo\"", true),
            ("W/\"foo\"", "W/\"foo\"", true),
        ];
        for (if_none_match, etag, expected) in cases {
            let req = request("GET", &[(IF_NONE_MATCH, if_none_match)]);
            let res = response(200, &[(ETAG, etag)]);
            assert_eq!(
                is_not_modified(&req, &res),
                expected,
                "If-None-Match {:?} ETag {:?}",
                if_none_match,
                etag
            );
        }
    }

    #[test]
    fn test_not_modified_star_without_etag() {
        let req = request("GET", &[(IF_NONE_MATCH, "*")]);
        assert!(!is_not_modified(&req, &response(200, &[])));
    }

    #[test]
    fn test_not_modified_with_modified_since() {
        let cases = [
            (AUG_10_1830, true),
            ("Mon, 10 Aug 2015 22:30:12 GMT", true),
            ("Mon, 10 Aug 2015 11:30:12 GMT", false),
            ("invalid", false),
        ];
        for (if_modified_since, expected) in cases {
            let req = request("GET", &[(IF_MODIFIED_SINCE, if_modified_since)]);
            let res = response(200, &[(LAST_MODIFIED, AUG_10_1830)]);
            assert_eq!(is_not_modified(&req, &res), expected);
        }
    }

    #[test]
    fn test_not_modified_without_last_modified() {
        let req = request("HEAD", &[(IF_MODIFIED_SINCE, AUG_10_1830)]);
        assert!(!is_not_modified(&req, &response(200, &[])));
    }

    #[test]
    fn test_not_modified_unsafe_method() {
        let req = request("POST", &[(IF_MODIFIED_SINCE, AUG_10_1830)]);
        let res = response(200, &[(LAST_MODIFIED, AUG_10_1830)]);
        assert!(!is_not_modified(&req, &res));
    }

    #[test]
    fn test_is_cacheable() {
        assert!(is_cacheable(&response(200, &[(CACHE_CONTROL, "public")])));
    }

    #[test]
    fn test_is_cacheable_with_private() {
        assert!(!is_cacheable(&response(200, &[(CACHE_CONTROL, "private")])));
    }

    #[test]
    fn test_is_cacheable_with_uncacheable_status() {
        assert!(!is_cacheable(&response(500, &[(CACHE_CONTROL, "public")])));
        assert!(!is_cacheable(&response(500, &[])));
    }

    #[test]
    fn test_is_cacheable_without_cache_control() {
        assert!(is_cacheable(&response(200, &[])));
        assert!(is_cacheable(&response(410, &[])));
    }

    #[test]
    fn test_is_cacheable_with_config() {
        let config = CacheConfig::default().with_cacheable_statuses(vec![200]);
        assert!(is_cacheable_with(&response(200, &[]), &config));
        assert!(!is_cacheable_with(&response(404, &[]), &config));
    }

    #[test]
    fn test_freshness() {
        assert_eq!(freshness(Some(20), Some(10)), Some(true));
        assert_eq!(freshness(Some(20), Some(20)), Some(false));
        assert_eq!(freshness(Some(20), Some(30)), Some(false));
        assert_eq!(freshness(Some(0), Some(0)), Some(false));
        assert_eq!(freshness(Some(20), None), Some(true));
        assert_eq!(freshness(None, Some(10)), None);
    }

    #[test]
    fn test_is_fresh_from_headers() {
        let res = response(200, &[(CACHE_CONTROL, "max-age=20"), (AGE, "10")]);
        assert_eq!(is_fresh_at(&res, now()), Some(true));

        let res = response(200, &[(CACHE_CONTROL, "max-age=20"), (AGE, "20")]);
        assert_eq!(is_fresh_at(&res, now()), Some(false));

        let res = response(200, &[(CACHE_CONTROL, "public")]);
        assert_eq!(is_fresh_at(&res, now()), None);
    }

    #[test]
    fn test_lifetime() {
        let res = response(200, &[(CACHE_CONTROL, "max-age=60, s-maxage=200")]);
        assert_eq!(lifetime_at(&res, now()), Some(200));
    }

    #[test]
    fn test_lifetime_with_zero() {
        let res = response(200, &[(CACHE_CONTROL, "s-maxage=0")]);
        assert_eq!(lifetime_at(&res, now()), Some(0));
    }

    #[test]
    fn test_lifetime_without_shared_age() {
        let res = response(200, &[(CACHE_CONTROL, "max-age=60, public")]);
        assert_eq!(lifetime_at(&res, now()), Some(60));
    }

    #[test]
    fn test_lifetime_with_other_cache_control() {
        let expires = crate::date::format_http_date(&(now() + Duration::seconds(20)));
        let res = response(200, &[(CACHE_CONTROL, "public"), (EXPIRES, &expires)]);
        assert_eq!(lifetime_at(&res, now()), None);
    }

    #[test]
    fn test_lifetime_with_expires() {
        let expires = (now() + Duration::seconds(20))
            .format("%a, %d %b %Y %H:%M:%S")
            .to_string();
        let res = response(200, &[(EXPIRES, &expires)]);
        assert_eq!(lifetime_at(&res, now()), Some(20));
    }

    #[test]
    fn test_lifetime_with_expires_and_date() {
        let res = response(
            200,
            &[(EXPIRES, "Mon, 10 Aug 2015 19:30:12 GMT"), (DATE, AUG_10_1830)],
        );
        let later = now() + Duration::hours(5);
        assert_eq!(lifetime_at(&res, later), Some(3600));
    }

    #[test]
    fn test_lifetime_with_expires_in_past() {
        let expires = crate::date::format_http_date(&(now() - Duration::seconds(20)));
        let res = response(200, &[(EXPIRES, &expires)]);
        assert_eq!(lifetime_at(&res, now()), Some(0));
    }

    #[test]
    fn test_lifetime_with_invalid_expires() {
        let res = response(200, &[(EXPIRES, "0")]);
        assert_eq!(lifetime_at(&res, now()), None);
    }

    #[test]
    fn test_lifetime_without_anything() {
        assert_eq!(lifetime_at(&response(200, &[]), now()), None);
    }

    #[test]
    fn test_age() {
        let res = response(200, &[(AGE, "5")]);
        assert_eq!(age_at(&res, now()), Some(5));
    }

    #[test]
    fn test_age_with_date() {
        let date = crate::date::format_http_date(&(now() - Duration::seconds(20)));
        let res = response(200, &[(DATE, &date)]);
        assert_eq!(age_at(&res, now()), Some(20));
    }

    #[test]
    fn test_age_with_future_date() {
        let date = crate::date::format_http_date(&(now() + Duration::seconds(20)));
        let res = response(200, &[(DATE, &date)]);
        assert_eq!(age_at(&res, now()), Some(0));
    }

    #[test]
    fn test_age_without_headers() {
        assert_eq!(age_at(&response(200, &[]), now()), None);
        assert_eq!(age_at(&response(200, &[(AGE, "abc")]), now()), None);
    }

    #[test]
    fn test_response_cache_control() {
        let control = response_cache_control(&response(200, &[(CACHE_CONTROL, "public")]));
        assert!(control.is_public());

        let control = response_cache_control(&response(200, &[]));
        assert!(control.directives().is_empty());
    }

    #[test]
    fn test_request_cache_control() {
        let req = request("GET", &[(CACHE_CONTROL, "max-stale=60, only-if-cached")]);
        let control = request_cache_control(&req);
        assert_eq!(control.max_stale(), Some(60));
        assert!(control.has_only_if_cached());
    }
}
