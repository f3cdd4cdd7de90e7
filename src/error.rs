//! Error types for greenroom.

use thiserror::Error;

/// Common error type for greenroom operations.
#[derive(Error, Debug)]
pub enum GreenroomError {
    /// The requested resource does not exist on the backend.
    ///
    /// Terminal for the load that produced it; callers redirect to the
    /// containing list view rather than retrying.
    #[error("not found: {0}")]
    NotFound(String),

    /// A submitted password was rejected by the backend.
    ///
    /// The message is the backend's `message` field taken verbatim, or empty
    /// when the backend gave none. Recoverable; the user may resubmit.
    #[error("authentication failed: {0}")]
    AuthFailed(String),

    /// Client-side validation failed before any network call was made.
    #[error("validation error: {0}")]
    Validation(String),

    /// Transport-level failure (connect, TLS, timeout, body decode).
    #[error("HTTP error: {0}")]
    Http(String),

    /// Non-2xx API response outside the cases with dedicated variants.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the backend.
        status: u16,
        /// Backend `message` field, or empty when the body carried none.
        message: String,
    },

    /// Configuration error (bad base URL, unreadable config file).
    #[error("configuration error: {0}")]
    Config(String),
}

// Conversion from validator errors
impl From<validator::ValidationErrors> for GreenroomError {
    fn from(e: validator::ValidationErrors) -> Self {
        GreenroomError::Validation(e.to_string())
    }
}

/// Result type alias for greenroom operations.
pub type Result<T> = std::result::Result<T, GreenroomError>;
