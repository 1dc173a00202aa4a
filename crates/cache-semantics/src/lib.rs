//! HTTP caching semantics (RFC 7234 / RFC 7232).
//!
//! This crate computes caching decisions and header values for code that
//! already holds HTTP messages. It never fetches, stores or serves bytes.
//!
//! - Typed `Cache-Control` directive sets for requests and responses
//! - Conditional-request evaluation (`If-Match`, `If-None-Match`,
//!   `If-Modified-Since`, `If-Unmodified-Since`)
//! - Cacheability, freshness lifetime and age
//! - `ETag`, `Last-Modified`, `Expires` and `Cache-Control` writers
//!
//! # Quick Start
//!
//! ```
//! use cache_semantics::{CacheControl, CacheUtil, HttpMessage, ResponseCacheControl};
//!
//! # fn example() -> cache_semantics::CacheResult<()> {
//! let util = CacheUtil::default();
//!
//! let control = ResponseCacheControl::default()
//!     .with_public(true)
//!     .with_max_age(600);
//! let response = util.with_cache_control(http::Response::new(()), &control)?;
//! let response = util.with_etag(response, "v1", false)?;
//!
//! let request = http::Request::builder()
//!     .header("If-None-Match", "\"v1\"")
//!     .body(())
//!     .unwrap();
//! assert!(util.is_not_modified(&request, &response));
//! assert_eq!(response.header_line("Cache-Control"), "public, max-age=600");
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! # Configuration
//!
//! | Environment Variable | Description |
//! |---------------------|-------------|
//! | `CACHE_SEMANTICS_DEFAULT_LIFETIME` | `max-age` for `with_default_cache` (default: 600) |
//! | `CACHE_SEMANTICS_PUBLIC` | Mark default-cached responses `public` (default: private) |
//! | `CACHE_SEMANTICS_CACHEABLE_STATUSES` | Comma separated cacheable status codes |

pub mod config;
pub mod date;
pub mod error;
pub mod etag;
pub mod evaluator;
pub mod formatter;
pub mod header;
pub mod message;
mod util;

// Re-export main types
pub use config::CacheConfig;
pub use date::{format_http_date, parse_http_date, seconds_from_json, TimeValue};
pub use error::{CacheError, CacheResult};
pub use etag::{format_etag, matches_etag, Comparison};
pub use header::{
    CacheControl, DirectiveValue, Directives, IntoDirectiveValue, RequestCacheControl,
    ResponseCacheControl,
};
pub use message::{HttpMessage, HttpRequest, HttpResponse};
pub use util::CacheUtil;
