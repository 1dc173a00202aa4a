//! Ordered, immutable directive store.
//!
//! Every mutator returns a new [`Directives`]; the receiver is never touched,
//! so stores can be shared freely between callers.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use super::{is_quoted, quote, split_list, unquote};
use crate::error::{json_kind, CacheError, CacheResult};

/// Directives whose value is a number of seconds.
const NUMERIC_DIRECTIVES: &[&str] = &[
    "max-age",
    "s-maxage",
    "max-stale",
    "min-fresh",
    "stale-while-revalidate",
    "stale-if-error",
];

fn is_numeric_directive(name: &str) -> bool {
    NUMERIC_DIRECTIVES.contains(&name)
}

/// Value of a single directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectiveValue {
    /// Presence-only directive (`no-store`).
    Flag,

    /// Delta-seconds (`max-age=60`).
    Seconds(u64),

    /// Opaque value, rendered as a quoted string (`foo="bar"`).
    Text(String),
}

impl DirectiveValue {
    pub fn as_seconds(&self) -> Option<u64> {
        match self {
            Self::Seconds(secs) => Some(*secs),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn is_flag(&self) -> bool {
        matches!(self, Self::Flag)
    }
}

/// Conversion into the value stored by [`Directives::with_directive`].
///
/// `None` means "remove the directive": `false` and absent options convert to
/// it. Negative integers clamp to `0`.
pub trait IntoDirectiveValue {
    fn into_directive_value(self) -> Option<DirectiveValue>;
}

impl IntoDirectiveValue for DirectiveValue {
    fn into_directive_value(self) -> Option<DirectiveValue> {
        Some(self)
    }
}

impl IntoDirectiveValue for bool {
    fn into_directive_value(self) -> Option<DirectiveValue> {
        self.then_some(DirectiveValue::Flag)
    }
}

impl IntoDirectiveValue for &str {
    fn into_directive_value(self) -> Option<DirectiveValue> {
        Some(DirectiveValue::Text(self.to_string()))
    }
}

impl IntoDirectiveValue for String {
    fn into_directive_value(self) -> Option<DirectiveValue> {
        Some(DirectiveValue::Text(self))
    }
}

impl<T: IntoDirectiveValue> IntoDirectiveValue for Option<T> {
    fn into_directive_value(self) -> Option<DirectiveValue> {
        self.and_then(IntoDirectiveValue::into_directive_value)
    }
}

macro_rules! signed_seconds {
    ($($ty:ty),*) => {
        $(
            impl IntoDirectiveValue for $ty {
                fn into_directive_value(self) -> Option<DirectiveValue> {
                    Some(DirectiveValue::Seconds(self.max(0) as u64))
                }
            }
        )*
    };
}

macro_rules! unsigned_seconds {
    ($($ty:ty),*) => {
        $(
            impl IntoDirectiveValue for $ty {
                fn into_directive_value(self) -> Option<DirectiveValue> {
                    Some(DirectiveValue::Seconds(self as u64))
                }
            }
        )*
    };
}

signed_seconds!(i8, i16, i32, i64, isize);
unsigned_seconds!(u8, u16, u32, u64, usize);

/// An ordered `Cache-Control` directive set.
///
/// Names are unique and keep their first insertion position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Directives {
    entries: IndexMap<String, DirectiveValue>,
}

impl Directives {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a `Cache-Control` header value.
    ///
    /// Parsing is permissive: unknown directives are kept, a numeric directive
    /// with a non-numeric value is kept as text and an empty value after `=`
    /// is stored as an empty string.
    ///
    /// ```
    /// use cache_semantics::{DirectiveValue, Directives};
    ///
    /// let directives = Directives::parse("no-transform, max-age=100, foo=\"bar\"");
    /// assert_eq!(directives.get("no-transform"), Some(&DirectiveValue::Flag));
    /// assert_eq!(directives.seconds("max-age"), Some(100));
    /// assert_eq!(directives.text("foo"), Some("bar"));
    /// ```
    pub fn parse(header: &str) -> Self {
        let mut entries = IndexMap::new();

        for token in split_list(header) {
            let (name, raw) = match token.split_once('=') {
                Some((name, raw)) => (name.trim(), Some(raw.trim())),
                None => (token, None),
            };
            if name.is_empty() {
                continue;
            }

            let value = match raw {
                None => DirectiveValue::Flag,
                Some(raw) => parse_value(name, raw),
            };
            entries.insert(name.to_string(), value);
        }

        Self { entries }
    }

    /// Return a copy with `name` set to `value`.
    ///
    /// `false` or `None` remove the directive. Text on a numeric directive
    /// is stored the way [`Directives::parse`] would read it back, so
    /// `("max-age", "30")` becomes seconds.
    pub fn with_directive(&self, name: &str, value: impl IntoDirectiveValue) -> Self {
        let mut entries = self.entries.clone();
        match value.into_directive_value() {
            Some(DirectiveValue::Text(text)) => {
                entries.insert(name.to_string(), text_value(name, text));
            }
            Some(value) => {
                entries.insert(name.to_string(), value);
            }
            None => {
                entries.shift_remove(name);
            }
        }
        Self { entries }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&DirectiveValue> {
        self.entries.get(name)
    }

    /// Value of a numeric directive.
    pub fn seconds(&self, name: &str) -> Option<u64> {
        self.get(name).and_then(DirectiveValue::as_seconds)
    }

    /// Value of a text directive.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(DirectiveValue::as_text)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &DirectiveValue)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }
}

fn parse_value(name: &str, raw: &str) -> DirectiveValue {
    let text = if is_quoted(raw) { unquote(raw) } else { raw.to_string() };
    text_value(name, text)
}

fn text_value(name: &str, text: String) -> DirectiveValue {
    if is_numeric_directive(name) {
        if let Some(secs) = parse_seconds(&text) {
            return DirectiveValue::Seconds(secs);
        }
    }
    DirectiveValue::Text(text)
}

/// Parse delta-seconds. Negative values clamp to 0, overflow saturates.
fn parse_seconds(raw: &str) -> Option<u64> {
    let (negative, digits) = match raw.strip_prefix('-') {
        Some(digits) => (true, digits),
        None => (false, raw),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if negative {
        return Some(0);
    }
    Some(digits.parse::<u64>().unwrap_or(u64::MAX))
}

impl fmt::Display for Directives {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, (name, value)) in self.entries.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            match value {
                DirectiveValue::Flag => f.write_str(name)?,
                DirectiveValue::Seconds(secs) => write!(f, "{}={}", name, secs)?,
                DirectiveValue::Text(text) => write!(f, "{}={}", name, quote(text))?,
            }
        }
        Ok(())
    }
}

impl FromStr for Directives {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl Serialize for Directives {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Directives {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let header = String::deserialize(deserializer)?;
        Ok(Self::parse(&header))
    }
}

/// Build a store from a JSON object such as `{"public": true, "max-age": 60}`.
///
/// Values follow [`Directives::with_directive`]: booleans toggle flags,
/// integers are seconds, strings are opaque values and `null` removes.
impl TryFrom<&Value> for Directives {
    type Error = CacheError;

    fn try_from(value: &Value) -> CacheResult<Self> {
        let object = value.as_object().ok_or_else(|| {
            CacheError::invalid_type(format!(
                "expected an object of directives, received {}",
                json_kind(value)
            ))
        })?;

        object
            .iter()
            .try_fold(Self::new(), |directives, (name, value)| {
                let value = match value {
                    Value::Null => None,
                    Value::Bool(flag) => (*flag).into_directive_value(),
                    Value::String(text) => Some(DirectiveValue::Text(text.clone())),
                    Value::Number(number) => match (number.as_i64(), number.as_u64()) {
                        (Some(secs), _) => secs.into_directive_value(),
                        (None, Some(secs)) => secs.into_directive_value(),
                        _ => return Err(directive_type_error(name, value)),
                    },
                    Value::Array(_) | Value::Object(_) => {
                        return Err(directive_type_error(name, value))
                    }
                };
                Ok(directives.with_directive(name, value))
            })
    }
}

fn directive_type_error(name: &str, value: &Value) -> CacheError {
    CacheError::invalid_type(format!(
        "directive `{}` must be a flag, an integer or a string, received {}",
        name,
        json_kind(value)
    ))
}
