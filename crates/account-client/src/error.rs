//! Error types for account service operations.

use thiserror::Error;

/// Account client errors.
#[derive(Debug, Error)]
pub enum AccountError {
    /// HTTP request failed before a response was produced.
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// The auth token is unknown to the account service.
    #[error("Bad token: the account service does not recognize this token")]
    BadToken,

    /// The auth token was known to the account service but is no longer valid.
    #[error("Expired token: the token is no longer valid")]
    ExpiredToken,

    /// API returned an error response.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message from the API.
        message: String,
    },

    /// Invalid response from the API.
    #[error("Invalid API response: {0}")]
    InvalidResponse(String),
}

/// Result type for account service operations.
pub type AccountResult<T> = Result<T, AccountError>;

impl AccountError {
    /// Check whether this error means the supplied token cannot be used to
    /// determine permissions.
    ///
    /// True for [`AccountError::BadToken`] and [`AccountError::ExpiredToken`].
    /// Callers that only care about "re-authenticate or not" can match on
    /// this instead of the individual variants.
    pub fn is_invalid_token(&self) -> bool {
        matches!(self, AccountError::BadToken | AccountError::ExpiredToken)
    }

    /// The HTTP status code behind this error, if one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            AccountError::BadToken => Some(404),
            AccountError::ExpiredToken => Some(410),
            AccountError::Api { status, .. } => Some(*status),
            AccountError::RequestFailed(err) => err.status().map(|s| s.as_u16()),
            AccountError::InvalidResponse(_) => None,
        }
    }
}
