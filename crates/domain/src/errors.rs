//! Error types used throughout the client

use thiserror::Error;

use crate::types::HttpMethod;

/// Transport-level failures other than rate limiting.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    /// DNS, TLS, connection reset, timeout and similar failures
    #[error("transport failure: {0}")]
    Transport(String),

    /// The server answered with a non-success status other than 429
    #[error("{url} returned status {status}{}", format_body(.body))]
    Status { status: u16, url: String, body: String },

    /// The request could not be assembled (URL, headers, body)
    #[error("failed to build request: {0}")]
    Build(String),
}

fn format_body(body: &str) -> String {
    if body.is_empty() {
        String::new()
    } else {
        format!(": {body}")
    }
}

/// Main error type for Portalwatch
#[derive(Error, Debug)]
pub enum PortalwatchError {
    #[error("Invalid credential: {0}")]
    InvalidCredential(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error(
        "Unsupported operation: {method} is not permitted for {base_path}. Permitted operations:\n{allow_list}"
    )]
    UnsupportedOperation { method: HttpMethod, base_path: String, allow_list: String },

    #[error("Request failed: {0}")]
    Request(#[from] RequestError),

    #[error("Rate limit exceeded: {path} was still throttled after {attempts} attempts")]
    RateLimitExceeded { path: String, attempts: u32 },

    #[error("Error calling API. The exception was: {source}")]
    Query {
        #[source]
        source: Box<PortalwatchError>,
    },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Categories of errors, used for logging and retry decisions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Rejected before any network call
    Validation,
    /// Allow-list rejection
    Policy,
    /// Network or HTTP failure
    Transport,
    /// Server kept throttling past the retry bound
    RateLimit,
    /// Unexpected response shape
    Response,
    /// Configuration or internal failure
    Config,
}

impl PortalwatchError {
    /// Wrap a failure with the query-level "Error calling API" context.
    pub fn query(source: PortalwatchError) -> Self {
        Self::Query { source: Box::new(source) }
    }

    /// Get the category for this error; `Query` reports its source's category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidCredential(_) | Self::InvalidArgument(_) => ErrorCategory::Validation,
            Self::UnsupportedOperation { .. } => ErrorCategory::Policy,
            Self::Request(_) => ErrorCategory::Transport,
            Self::RateLimitExceeded { .. } => ErrorCategory::RateLimit,
            Self::Query { source } => source.category(),
            Self::InvalidResponse(_) => ErrorCategory::Response,
            Self::Config(_) | Self::Internal(_) => ErrorCategory::Config,
        }
    }

    /// Whether a caller may reasonably retry the whole operation later.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Request(RequestError::Transport(_)) | Self::RateLimitExceeded { .. } => true,
            Self::Request(RequestError::Status { status, .. }) => *status >= 500,
            Self::Query { source } => source.is_retryable(),
            _ => false,
        }
    }

    /// Stable label suitable for structured logging.
    pub fn label(&self) -> &'static str {
        match self {
            Self::InvalidCredential(_) => "invalid_credential",
            Self::InvalidArgument(_) => "invalid_argument",
            Self::UnsupportedOperation { .. } => "unsupported_operation",
            Self::Request(_) => "request",
            Self::RateLimitExceeded { .. } => "rate_limit_exceeded",
            Self::Query { .. } => "query",
            Self::InvalidResponse(_) => "invalid_response",
            Self::Config(_) => "config",
            Self::Internal(_) => "internal",
        }
    }
}

/// Result type alias for Portalwatch operations
pub type Result<T> = std::result::Result<T, PortalwatchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_error_carries_context_and_source_message() {
        let inner = PortalwatchError::Request(RequestError::Status {
            status: 500,
            url: "https://t.portal.cloudappsecurity.com/api/v1/alerts/".into(),
            body: "boom".into(),
        });
        let err = PortalwatchError::query(inner);

        let message = err.to_string();
        assert!(message.starts_with("Error calling API. The exception was:"));
        assert!(message.contains("500"));
        assert!(message.contains("boom"));
        assert_eq!(err.category(), ErrorCategory::Transport);
        assert!(err.is_retryable());
    }

    #[test]
    fn status_error_omits_empty_body() {
        let err = RequestError::Status { status: 404, url: "https://x/".into(), body: String::new() };
        assert_eq!(err.to_string(), "https://x/ returned status 404");
    }

    #[test]
    fn validation_errors_are_not_retryable() {
        assert!(!PortalwatchError::InvalidArgument("size".into()).is_retryable());
        assert!(!PortalwatchError::InvalidCredential("token".into()).is_retryable());
        assert_eq!(
            PortalwatchError::InvalidArgument("size".into()).category(),
            ErrorCategory::Validation
        );
    }

    #[test]
    fn client_status_errors_are_not_retryable() {
        let err = PortalwatchError::Request(RequestError::Status {
            status: 400,
            url: "https://x/".into(),
            body: String::new(),
        });
        assert!(!err.is_retryable());
        assert_eq!(err.label(), "request");
    }
}
