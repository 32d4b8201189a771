//! Error types for the refinement service client

use thiserror::Error;

/// Shown when the service gives no usable error detail
pub const FALLBACK_ERROR: &str = "Failed to refine prompt. Please check your API configuration.";

/// Errors from the refinement service client
#[derive(Debug, Error)]
pub enum ApiError {
    /// Service responded with a non-success status
    #[error("service error {status}: {message}")]
    Service { status: u16, message: String },

    /// Transport-level failure (no response reached)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Response arrived but could not be decoded
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl ApiError {
    /// Message suitable for direct display to the user
    ///
    /// Service errors carry the service's own `detail` text verbatim;
    /// everything else maps to the generic fallback.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Service { message, .. } => message.clone(),
            ApiError::Network(_) | ApiError::InvalidResponse(_) => FALLBACK_ERROR.to_string(),
        }
    }
}
