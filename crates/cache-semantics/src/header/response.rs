//! Response `Cache-Control`.

use serde::{Deserialize, Serialize};

use super::control::header_value_impls;
use super::{CacheControl, Directives};

/// `Cache-Control` as sent by a server.
///
/// `public` and `private` are exclusive: enabling one drops the other.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResponseCacheControl(Directives);

impl CacheControl for ResponseCacheControl {
    fn directives(&self) -> &Directives {
        &self.0
    }

    fn from_directives(directives: Directives) -> Self {
        Self(directives)
    }
}

header_value_impls!(ResponseCacheControl);

impl ResponseCacheControl {
    /// Set `public`. Passing `false` only removes `public` itself.
    pub fn with_public(&self, flag: bool) -> Self {
        self.with_visibility("public", "private", flag)
    }

    pub fn is_public(&self) -> bool {
        self.has_directive("public")
    }

    /// Set `private`. Passing `false` only removes `private` itself.
    pub fn with_private(&self, flag: bool) -> Self {
        self.with_visibility("private", "public", flag)
    }

    pub fn is_private(&self) -> bool {
        self.has_directive("private")
    }

    fn with_visibility(&self, name: &str, opposite: &str, flag: bool) -> Self {
        let directives = if flag {
            self.0.with_directive(opposite, false)
        } else {
            self.0.clone()
        };
        Self(directives.with_directive(name, flag))
    }

    pub fn with_shared_max_age(&self, seconds: i64) -> Self {
        self.with_directive("s-maxage", seconds)
    }

    pub fn shared_max_age(&self) -> Option<u64> {
        self.0.seconds("s-maxage")
    }

    /// Freshness lifetime: `s-maxage` wins over `max-age`.
    pub fn lifetime(&self) -> Option<u64> {
        self.shared_max_age().or_else(|| self.max_age())
    }

    pub fn with_stale_while_revalidate(&self, seconds: i64) -> Self {
        self.with_directive("stale-while-revalidate", seconds)
    }

    pub fn stale_while_revalidate(&self) -> Option<u64> {
        self.0.seconds("stale-while-revalidate")
    }

    pub fn with_stale_if_error(&self, seconds: i64) -> Self {
        self.with_directive("stale-if-error", seconds)
    }

    pub fn stale_if_error(&self) -> Option<u64> {
        self.0.seconds("stale-if-error")
    }

    pub fn with_must_revalidate(&self, flag: bool) -> Self {
        self.with_directive("must-revalidate", flag)
    }

    pub fn has_must_revalidate(&self) -> bool {
        self.has_directive("must-revalidate")
    }

    pub fn with_proxy_revalidate(&self, flag: bool) -> Self {
        self.with_directive("proxy-revalidate", flag)
    }

    pub fn has_proxy_revalidate(&self) -> bool {
        self.has_directive("proxy-revalidate")
    }

    /// `no-cache, no-store, must-revalidate`.
    pub fn with_cache_prevention(&self) -> Self {
        self.with_no_cache(true)
            .with_no_store(true)
            .with_must_revalidate(true)
    }
}
