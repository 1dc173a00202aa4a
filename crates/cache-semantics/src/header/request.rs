//! Request `Cache-Control`.

use serde::{Deserialize, Serialize};

use super::control::header_value_impls;
use super::{CacheControl, Directives};

/// `Cache-Control` as sent by a client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestCacheControl(Directives);

impl CacheControl for RequestCacheControl {
    fn directives(&self) -> &Directives {
        &self.0
    }

    fn from_directives(directives: Directives) -> Self {
        Self(directives)
    }
}

header_value_impls!(RequestCacheControl);

impl RequestCacheControl {
    pub fn with_max_stale(&self, seconds: i64) -> Self {
        self.with_directive("max-stale", seconds)
    }

    /// Seconds of staleness the client accepts.
    ///
    /// `None` both when absent and for the valueless form; use
    /// [`Self::has_max_stale`] to tell them apart.
    pub fn max_stale(&self) -> Option<u64> {
        self.0.seconds("max-stale")
    }

    pub fn has_max_stale(&self) -> bool {
        self.has_directive("max-stale")
    }

    pub fn with_min_fresh(&self, seconds: i64) -> Self {
        self.with_directive("min-fresh", seconds)
    }

    pub fn min_fresh(&self) -> Option<u64> {
        self.0.seconds("min-fresh")
    }

    pub fn with_only_if_cached(&self, flag: bool) -> Self {
        self.with_directive("only-if-cached", flag)
    }

    pub fn has_only_if_cached(&self) -> bool {
        self.has_directive("only-if-cached")
    }
}
