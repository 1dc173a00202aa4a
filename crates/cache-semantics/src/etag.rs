//! Entity-tag comparison (RFC 7232 §2.3.2).

use crate::header::{split_list, unquote};

/// Entity-tag comparison function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    /// Both tags must be strong and byte-equal (`If-Match`).
    Strong,

    /// The `W/` prefix is ignored on both sides (`If-None-Match`).
    Weak,
}

fn is_weak(tag: &str) -> bool {
    tag.starts_with("W/")
}

fn opaque_tag(tag: &str) -> String {
    unquote(tag.strip_prefix("W/").unwrap_or(tag).trim())
}

/// Whether `etag` matches the tag list of an `If-Match`/`If-None-Match` value.
///
/// `*` matches any current tag. A missing or empty `etag` never matches.
/// `etag` may be given quoted or bare.
///
/// ```
/// use cache_semantics::etag::{matches_etag, Comparison};
///
/// assert!(matches_etag("\"foo\", \"bar\"", Some("bar"), Comparison::Strong));
/// assert!(!matches_etag("W/\"foo\"", Some("foo"), Comparison::Strong));
/// assert!(matches_etag("W/\"foo\"", Some("\"foo\""), Comparison::Weak));
/// ```
pub fn matches_etag(header: &str, etag: Option<&str>, comparison: Comparison) -> bool {
    let etag = match etag.map(str::trim) {
        Some(etag) if !etag.is_empty() => etag,
        _ => return false,
    };

    let header = header.trim();
    if header == "*" {
        return true;
    }

    if comparison == Comparison::Strong && is_weak(etag) {
        return false;
    }
    let current = opaque_tag(etag);

    split_list(header)
        .into_iter()
        .filter(|tag| comparison == Comparison::Weak || !is_weak(tag))
        .any(|tag| opaque_tag(tag) == current)
}

/// Render an `ETag` header value.
///
/// The opaque tag is always wrapped in exactly one pair of double quotes,
/// whatever quotes it arrived with. `weak` adds the `W/` prefix unless it
/// is already present.
pub fn format_etag(tag: &str, weak: bool) -> String {
    let tag = tag.trim();
    let (already_weak, bare) = match tag.strip_prefix("W/") {
        Some(rest) => (true, rest),
        None => (false, tag),
    };

    let quoted = format!("\"{}\"", bare.trim_matches('"'));

    if weak || already_weak {
        format!("W/{}", quoted)
    } else {
        quoted
    }
}
