//! Accessors shared by request and response `Cache-Control` values.

use super::{unquote, DirectiveValue, Directives, IntoDirectiveValue};

/// A typed view over a [`Directives`] store.
///
/// Implementors only provide the conversion to and from the store; every
/// accessor delegates to the store with a fixed directive name.
pub trait CacheControl: Sized {
    fn directives(&self) -> &Directives;

    fn from_directives(directives: Directives) -> Self;

    /// Parse a `Cache-Control` header value.
    fn parse(header: &str) -> Self {
        Self::from_directives(Directives::parse(header))
    }

    fn with_directive(&self, name: &str, value: impl IntoDirectiveValue) -> Self {
        Self::from_directives(self.directives().with_directive(name, value))
    }

    fn directive(&self, name: &str) -> Option<&DirectiveValue> {
        self.directives().get(name)
    }

    fn has_directive(&self, name: &str) -> bool {
        self.directives().contains(name)
    }

    /// Set `max-age`. Negative values clamp to 0.
    fn with_max_age(&self, seconds: i64) -> Self {
        self.with_directive("max-age", seconds)
    }

    fn max_age(&self) -> Option<u64> {
        self.directives().seconds("max-age")
    }

    fn with_no_cache(&self, flag: bool) -> Self {
        self.with_directive("no-cache", flag)
    }

    fn has_no_cache(&self) -> bool {
        self.has_directive("no-cache")
    }

    fn with_no_store(&self, flag: bool) -> Self {
        self.with_directive("no-store", flag)
    }

    fn has_no_store(&self) -> bool {
        self.has_directive("no-store")
    }

    fn with_no_transform(&self, flag: bool) -> Self {
        self.with_directive("no-transform", flag)
    }

    fn has_no_transform(&self) -> bool {
        self.has_directive("no-transform")
    }

    /// Set an extension directive. Surrounding quotes on `value` are dropped.
    fn with_extension(&self, name: &str, value: &str) -> Self {
        self.with_directive(name, unquote(value.trim()))
    }

    fn extension(&self, name: &str) -> Option<&DirectiveValue> {
        self.directive(name)
    }
}

/// `Display`/`FromStr` for a [`CacheControl`] newtype over [`Directives`].
macro_rules! header_value_impls {
    ($ty:ty) => {
        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                std::fmt::Display::fmt(self.directives(), f)
            }
        }

        impl std::str::FromStr for $ty {
            type Err = std::convert::Infallible;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(<$ty as CacheControl>::parse(s))
            }
        }

        impl From<Directives> for $ty {
            fn from(directives: Directives) -> Self {
                <$ty as CacheControl>::from_directives(directives)
            }
        }
    };
}

pub(crate) use header_value_impls;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::RequestCacheControl;

    #[test]
    fn test_with_max_age() {
        let control = RequestCacheControl::default().with_max_age(5);
        assert_eq!(control.directive("max-age"), Some(&DirectiveValue::Seconds(5)));
        assert_eq!(control.max_age(), Some(5));
    }

    #[test]
    fn test_with_negative_max_age() {
        let control = RequestCacheControl::default().with_max_age(-5);
        assert_eq!(control.max_age(), Some(0));
    }

    #[test]
    fn test_no_cache() {
        let control = RequestCacheControl::default().with_no_cache(true);
        assert!(control.has_no_cache());
        assert!(!control.with_no_cache(false).has_no_cache());
    }

    #[test]
    fn test_no_store() {
        let control = RequestCacheControl::default().with_no_store(true);
        assert!(control.has_no_store());
        assert_eq!(control.to_string(), "no-store");
    }

    #[test]
    fn test_no_transform() {
        let control = RequestCacheControl::default();
        assert!(!control.has_no_transform());
        assert!(control.with_no_transform(true).has_no_transform());
    }

    #[test]
    fn test_with_extension_strips_quotes() {
        let control = RequestCacheControl::default().with_extension("foo", "\"bar\"");
        assert_eq!(
            control.extension("foo"),
            Some(&DirectiveValue::Text("bar".to_string()))
        );
        assert_eq!(control.to_string(), "foo=\"bar\"");
    }

    #[test]
    fn test_with_extension_on_numeric_directive() {
        let control = RequestCacheControl::default().with_extension("max-age", "\"30\"");
        assert_eq!(control.max_age(), Some(30));
        assert_eq!(control.to_string(), "max-age=30");
        assert_eq!(RequestCacheControl::parse(&control.to_string()), control);
    }

    #[test]
    fn test_extension_returns_any_kind() {
        let control = RequestCacheControl::parse("max-age=60, foo");
        assert_eq!(control.extension("max-age"), Some(&DirectiveValue::Seconds(60)));
        assert_eq!(control.extension("foo"), Some(&DirectiveValue::Flag));
        assert_eq!(control.extension("bar"), None);
    }

    #[test]
    fn test_mutators_do_not_touch_receiver() {
        let control = RequestCacheControl::default();
        let _ = control.with_max_age(10).with_no_cache(true);
        assert!(control.directives().is_empty());
    }
}
