use thiserror::Error;

/// Errors raised by the fail-loud client operations.
///
/// Every variant carries enough context (operation, identifier) to be shown
/// to a user without further wrapping.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure: connection refused, DNS, TLS, ...
    #[error("{operation}: request failed: {source}")]
    Request {
        operation: String,
        #[source]
        source: reqwest::Error,
    },

    /// Server answered with a non-success status
    #[error("{operation} ({status}): {body}")]
    Status {
        operation: String,
        status: reqwest::StatusCode,
        body: String,
    },

    /// Response body could not be decoded
    #[error("{operation}: invalid response body: {source}")]
    Decode {
        operation: String,
        #[source]
        source: reqwest::Error,
    },

    /// The JWT endpoint answered but reported `login_success: false`
    #[error("Login failed.")]
    LoginFailed,

    #[error("Invalid URL '{input}': {reason}")]
    InvalidUrl { input: String, reason: String },

    #[error("Invalid language code: '{0}'")]
    InvalidLanguage(String),
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
