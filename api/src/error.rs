//! Error types for the backend API client

use thiserror::Error;

/// Result type alias for API operations.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Errors that can occur when calling the backend API
#[derive(Debug, Error)]
pub enum ApiError {
    /// Failed to construct the underlying HTTP client
    #[error("Failed to build HTTP client: {0}")]
    Configuration(String),

    /// Missing `DONELIST_API_URL` environment variable
    #[error("Missing DONELIST_API_URL environment variable")]
    MissingBaseUrl,

    /// The request exceeded the fixed timeout
    #[error("Request timed out")]
    Timeout,

    /// HTTP transport failed before a response arrived
    #[error("Request failed: {0}")]
    Request(String),

    /// Response body could not be decoded
    #[error("Response parsing failed: {0}")]
    Parse(String),

    /// The backend answered 401 - the session is no longer valid
    ///
    /// By the time this error is returned the adapter has already cleared
    /// the persisted session and published the invalidation signal.
    #[error("Unauthorized: {message}")]
    Unauthorized {
        /// Message from the response envelope, if one was decodable
        message: String,
    },

    /// The backend answered 2xx but reported `success: false`
    #[error("Backend reported failure: {message}")]
    Backend {
        /// Message from the response envelope
        message: String,
    },

    /// The backend answered a non-2xx status other than 401
    #[error("API error (status {status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Message from the envelope when decodable, raw body otherwise
        message: String,
    },

    /// A 2xx envelope that should carry data carried none
    #[error("Response envelope carried no data")]
    MissingData,
}

impl ApiError {
    /// Pick the message to surface to a user.
    ///
    /// Backend-supplied messages win when one exists; everything else
    /// (transport failures, timeouts, empty envelopes) falls back to the
    /// caller's operation-specific string.
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Backend { message }
            | Self::Api { message, .. }
            | Self::Unauthorized { message }
                if !message.is_empty() =>
            {
                message.clone()
            }
            _ => fallback.to_string(),
        }
    }
}
