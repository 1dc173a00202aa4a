//! Message collaborator abstraction.
//!
//! The evaluator and formatter never own a transport; they read and write
//! headers through these traits. Implementations are provided for the `http`
//! crate's `Request` and `Response`.

use http::header::{HeaderMap, HeaderName, HeaderValue};

use crate::error::{CacheError, CacheResult};

pub const AGE: &str = "Age";
pub const CACHE_CONTROL: &str = "Cache-Control";
pub const DATE: &str = "Date";
pub const ETAG: &str = "ETag";
pub const EXPIRES: &str = "Expires";
pub const IF_MATCH: &str = "If-Match";
pub const IF_MODIFIED_SINCE: &str = "If-Modified-Since";
pub const IF_NONE_MATCH: &str = "If-None-Match";
pub const IF_UNMODIFIED_SINCE: &str = "If-Unmodified-Since";
pub const LAST_MODIFIED: &str = "Last-Modified";

/// Header access on an HTTP message.
pub trait HttpMessage: Sized {
    fn has_header(&self, name: &str) -> bool;

    /// All values of `name` joined with `", "`; empty when absent.
    fn header_line(&self, name: &str) -> String;

    /// Return the message with `name` replaced by `value`.
    fn with_header(self, name: &str, value: &str) -> CacheResult<Self>;
}

pub trait HttpRequest: HttpMessage {
    fn method(&self) -> &str;
}

pub trait HttpResponse: HttpMessage {
    fn status_code(&self) -> u16;
}

fn header_line(headers: &HeaderMap, name: &str) -> String {
    headers
        .get_all(name)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .collect::<Vec<_>>()
        .join(", ")
}

fn insert_header(headers: &mut HeaderMap, name: &str, value: &str) -> CacheResult<()> {
    let invalid = |message: String| CacheError::InvalidHeader {
        name: name.to_string(),
        message,
    };
    let header_name = HeaderName::try_from(name).map_err(|e| invalid(e.to_string()))?;
    let header_value = HeaderValue::from_str(value).map_err(|e| invalid(e.to_string()))?;
    headers.insert(header_name, header_value);
    Ok(())
}

impl<B> HttpMessage for http::Request<B> {
    fn has_header(&self, name: &str) -> bool {
        self.headers().contains_key(name)
    }

    fn header_line(&self, name: &str) -> String {
        header_line(self.headers(), name)
    }

    fn with_header(mut self, name: &str, value: &str) -> CacheResult<Self> {
        insert_header(self.headers_mut(), name, value)?;
        Ok(self)
    }
}

impl<B> HttpRequest for http::Request<B> {
    fn method(&self) -> &str {
        http::Request::method(self).as_str()
    }
}

impl<B> HttpMessage for http::Response<B> {
    fn has_header(&self, name: &str) -> bool {
        self.headers().contains_key(name)
    }

    fn header_line(&self, name: &str) -> String {
        header_line(self.headers(), name)
    }

    fn with_header(mut self, name: &str, value: &str) -> CacheResult<Self> {
        insert_header(self.headers_mut(), name, value)?;
        Ok(self)
    }
}

impl<B> HttpResponse for http::Response<B> {
    fn status_code(&self) -> u16 {
        self.status().as_u16()
    }
}
