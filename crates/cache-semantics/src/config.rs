//! Cache policy defaults.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::evaluator::CACHEABLE_STATUSES;

/// Defaults applied by [`crate::CacheUtil`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// `max-age` used by `with_default_cache`.
    #[serde(default = "default_lifetime")]
    pub default_lifetime_secs: u64,

    /// Whether `with_default_cache` marks responses `public`.
    #[serde(default)]
    pub public_by_default: bool,

    /// Status codes a response may have to be cacheable.
    #[serde(default = "default_cacheable_statuses")]
    pub cacheable_statuses: Vec<u16>,
}

fn default_lifetime() -> u64 {
    600
}

fn default_cacheable_statuses() -> Vec<u16> {
    CACHEABLE_STATUSES.to_vec()
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            default_lifetime_secs: default_lifetime(),
            public_by_default: false,
            cacheable_statuses: default_cacheable_statuses(),
        }
    }
}

impl CacheConfig {
    /// Create config from environment variables.
    ///
    /// | Variable | Description |
    /// |----------|-------------|
    /// | `CACHE_SEMANTICS_DEFAULT_LIFETIME` | Default `max-age` in seconds |
    /// | `CACHE_SEMANTICS_PUBLIC` | Mark cached responses `public` (`1`/`true`) |
    /// | `CACHE_SEMANTICS_CACHEABLE_STATUSES` | Comma separated status codes |
    pub fn from_env() -> Self {
        Self {
            default_lifetime_secs: env_parsed("CACHE_SEMANTICS_DEFAULT_LIFETIME")
                .unwrap_or_else(default_lifetime),
            public_by_default: std::env::var("CACHE_SEMANTICS_PUBLIC")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
            cacheable_statuses: std::env::var("CACHE_SEMANTICS_CACHEABLE_STATUSES")
                .ok()
                .and_then(|v| parse_status_list(&v))
                .unwrap_or_else(default_cacheable_statuses),
        }
    }

    pub fn with_default_lifetime(mut self, seconds: u64) -> Self {
        self.default_lifetime_secs = seconds;
        self
    }

    pub fn with_public_by_default(mut self, public: bool) -> Self {
        self.public_by_default = public;
        self
    }

    pub fn with_cacheable_statuses(mut self, statuses: Vec<u16>) -> Self {
        self.cacheable_statuses = statuses;
        self
    }

    pub fn is_cacheable_status(&self, status: u16) -> bool {
        self.cacheable_statuses.contains(&status)
    }
}

fn env_parsed(name: &str) -> Option<u64> {
    let value = std::env::var(name).ok()?;
    match value.trim().parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            warn!(variable = name, value = %value, "ignoring invalid value, using default");
            None
        }
    }
}

fn parse_status_list(value: &str) -> Option<Vec<u16>> {
    let statuses: Result<Vec<u16>, _> = value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::parse::<u16>)
        .collect();

    match statuses {
        Ok(statuses) if !statuses.is_empty() => Some(statuses),
        _ => {
            warn!(
                variable = "CACHE_SEMANTICS_CACHEABLE_STATUSES",
                value, "ignoring invalid status list, using default"
            );
            None
        }
    }
}
