/// Error types for the POWER library
use thiserror::Error;

/// Main error type for POWER API operations
#[derive(Error, Debug)]
pub enum PowerError {
    /// HTTP request failed
    #[cfg(feature = "api")]
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// API returned a non-success status code
    #[error("POWER API returned status {0}")]
    BadStatus(u16),

    /// Failed to parse the JSON response
    #[error("Failed to parse POWER response: {0}")]
    ResponseParse(String),

    /// The fetch was cancelled before completion
    #[error("Fetch was aborted")]
    Aborted,
}

/// Type alias for Results using PowerError
pub type Result<T> = std::result::Result<T, PowerError>;
