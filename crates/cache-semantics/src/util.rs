//! [`CacheUtil`]: evaluator and formatter bound to a [`CacheConfig`].

use chrono::{DateTime, Utc};

use crate::config::CacheConfig;
use crate::date::TimeValue;
use crate::error::CacheResult;
use crate::header::{CacheControl, RequestCacheControl, ResponseCacheControl};
use crate::message::{HttpMessage, HttpRequest, HttpResponse};
use crate::{evaluator, formatter};

/// Cache helper for servers and proxies.
///
/// ```
/// use cache_semantics::{CacheConfig, CacheUtil, HttpMessage};
///
/// let util = CacheUtil::new(CacheConfig::default().with_public_by_default(true));
/// let response = util.with_default_cache(http::Response::new(())).unwrap();
/// assert_eq!(response.header_line("Cache-Control"), "public, max-age=600");
/// assert!(util.is_cacheable(&response));
/// ```
#[derive(Debug, Clone, Default)]
pub struct CacheUtil {
    config: CacheConfig,
}

impl CacheUtil {
    pub fn new(config: CacheConfig) -> Self {
        Self { config }
    }

    /// Build from [`CacheConfig::from_env`].
    pub fn from_env() -> Self {
        Self::new(CacheConfig::from_env())
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    // Formatting

    pub fn with_etag<M: HttpMessage>(&self, message: M, tag: &str, weak: bool) -> CacheResult<M> {
        formatter::with_etag(message, tag, weak)
    }

    pub fn with_last_modified<M: HttpMessage>(
        &self,
        message: M,
        time: impl Into<TimeValue>,
    ) -> CacheResult<M> {
        formatter::with_last_modified(message, time)
    }

    pub fn with_expires<M: HttpMessage>(
        &self,
        message: M,
        time: impl Into<TimeValue>,
    ) -> CacheResult<M> {
        formatter::with_expires(message, time)
    }

    pub fn with_relative_expires<M: HttpMessage>(&self, message: M, seconds: i64) -> CacheResult<M> {
        formatter::with_relative_expires(message, seconds)
    }

    pub fn with_relative_expires_at<M: HttpMessage>(
        &self,
        message: M,
        seconds: i64,
        now: DateTime<Utc>,
    ) -> CacheResult<M> {
        formatter::with_relative_expires_at(message, seconds, now)
    }

    pub fn with_cache_control<M: HttpMessage, C: CacheControl>(
        &self,
        message: M,
        control: &C,
    ) -> CacheResult<M> {
        formatter::with_cache_control(message, control)
    }

    pub fn with_cache<M: HttpMessage>(&self, message: M, public: bool, lifetime: u64) -> CacheResult<M> {
        formatter::with_cache(message, public, lifetime)
    }

    /// [`Self::with_cache`] with the configured visibility and lifetime.
    pub fn with_default_cache<M: HttpMessage>(&self, message: M) -> CacheResult<M> {
        formatter::with_cache(
            message,
            self.config.public_by_default,
            self.config.default_lifetime_secs,
        )
    }

    pub fn with_cache_prevention<M: HttpMessage>(&self, message: M) -> CacheResult<M> {
        formatter::with_cache_prevention(message)
    }

    // Evaluation

    pub fn has_state_validator<R: HttpRequest>(&self, request: &R) -> bool {
        evaluator::has_state_validator(request)
    }

    pub fn has_current_state<R: HttpRequest>(
        &self,
        request: &R,
        etag: Option<&str>,
        last_modified: Option<&str>,
    ) -> bool {
        evaluator::has_current_state(request, etag, last_modified)
    }

    pub fn is_not_modified<Req: HttpRequest, Res: HttpMessage>(
        &self,
        request: &Req,
        response: &Res,
    ) -> bool {
        evaluator::is_not_modified(request, response)
    }

    /// Cacheability against the configured status set.
    pub fn is_cacheable<R: HttpResponse>(&self, response: &R) -> bool {
        evaluator::is_cacheable_with(response, &self.config)
    }

    pub fn is_fresh<R: HttpMessage>(&self, response: &R) -> Option<bool> {
        evaluator::is_fresh(response)
    }

    pub fn is_fresh_at<R: HttpMessage>(&self, response: &R, now: DateTime<Utc>) -> Option<bool> {
        evaluator::is_fresh_at(response, now)
    }

    pub fn lifetime<R: HttpMessage>(&self, response: &R) -> Option<u64> {
        evaluator::lifetime(response)
    }

    pub fn lifetime_at<R: HttpMessage>(&self, response: &R, now: DateTime<Utc>) -> Option<u64> {
        evaluator::lifetime_at(response, now)
    }

    pub fn age<R: HttpMessage>(&self, response: &R) -> Option<u64> {
        evaluator::age(response)
    }

    pub fn age_at<R: HttpMessage>(&self, response: &R, now: DateTime<Utc>) -> Option<u64> {
        evaluator::age_at(response, now)
    }

    pub fn response_cache_control<R: HttpMessage>(&self, response: &R) -> ResponseCacheControl {
        evaluator::response_cache_control(response)
    }

    pub fn request_cache_control<R: HttpMessage>(&self, request: &R) -> RequestCacheControl {
        evaluator::request_cache_control(request)
    }
}
