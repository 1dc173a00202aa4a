//! `Cache-Control` header model.
//!
//! [`Directives`] is the untyped, ordered store. [`RequestCacheControl`] and
//! [`ResponseCacheControl`] wrap it with accessors for the directives valid
//! in each direction; the accessors both share live on [`CacheControl`].

mod control;
mod directives;
mod request;
mod response;

pub use control::CacheControl;
pub use directives::{DirectiveValue, Directives, IntoDirectiveValue};
pub use request::RequestCacheControl;
pub use response::ResponseCacheControl;

/// Split a comma separated header list, ignoring commas inside quoted strings.
///
/// Items are trimmed; empty items are dropped.
pub(crate) fn split_list(value: &str) -> Vec<&str> {
    let mut items = Vec::new();
    let mut start = 0;
    let mut in_quotes = false;
    let mut escaped = false;

    for (idx, ch) in value.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' if in_quotes => escaped = true,
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                items.push(value[start..idx].trim());
                start = idx + 1;
            }
            _ => {}
        }
    }
    items.push(value[start..].trim());

    items.retain(|item| !item.is_empty());
    items
}

pub(crate) fn is_quoted(value: &str) -> bool {
    value.len() >= 2 && value.starts_with('"') && value.ends_with('"')
}

/// Strip surrounding double quotes and resolve `\` escapes.
///
/// Values that are not quoted are returned unchanged.
pub(crate) fn unquote(value: &str) -> String {
    if !is_quoted(value) {
        return value.to_string();
    }

    let inner = &value[1..value.len() - 1];
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            if let Some(next) = chars.next() {
                out.push(next);
                continue;
            }
        }
        out.push(ch);
    }
    out
}

/// Render `value` as an HTTP quoted-string.
pub(crate) fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        if ch == '"' || ch == '\\' {
            out.push('\\');
        }
        out.push(ch);
    }
    out.push('"');
    out
}
