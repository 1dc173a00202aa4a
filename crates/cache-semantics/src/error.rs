//! Error types for cache header construction.

/// Errors raised for invalid API arguments.
///
/// Malformed *incoming* headers never produce these; the predicates in
/// [`crate::evaluator`] fall back to their non-matching default instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CacheError {
    /// Argument of an unsupported type (dynamic JSON inputs).
    #[error("invalid type: {message}")]
    InvalidType { message: String },

    /// A date/time string could not be turned into a calendar date.
    #[error("could not create a valid date from string: {input:?}")]
    DateParse { input: String },

    /// A value could not be converted to a timestamp at all.
    #[error("could not create timestamp from {kind}")]
    TimestampParse { kind: String },

    /// The message rejected a header value.
    #[error("invalid header {name}: {message}")]
    InvalidHeader { name: String, message: String },
}

impl CacheError {
    /// Whether the error stems from a caller-supplied argument.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidType { .. } | Self::DateParse { .. } | Self::TimestampParse { .. }
        )
    }

    /// HTTP status a server would answer with for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidType { .. } => 400,
            Self::DateParse { .. } => 400,
            Self::TimestampParse { .. } => 400,

            // The value was produced by us; treat as a server-side fault.
            Self::InvalidHeader { .. } => 500,
        }
    }

    pub(crate) fn invalid_type(message: impl Into<String>) -> Self {
        Self::InvalidType {
            message: message.into(),
        }
    }
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Name of a JSON value's type, for error messages.
pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(n) if n.is_f64() => "float",
        serde_json::Value::Number(_) => "integer",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
