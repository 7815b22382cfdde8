/// Error types for the analysis engine
use thiserror::Error;

/// Main error type for analysis operations
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// The requested builtin profile key does not exist
    #[error("Unknown event profile: {0}")]
    UnknownProfile(String),

    /// Every day bucket of the expanded window came back empty.
    ///
    /// Distinct from a probability of 0: here there is nothing to score at
    /// all, and the only recovery is a full re-fetch.
    #[error("No historical data available for the requested window")]
    NoHistoricalData,

    /// Writing the CSV export failed
    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    /// The historical fetch itself failed
    #[cfg(feature = "api")]
    #[error("Historical fetch failed: {0}")]
    Fetch(#[from] parada_power::PowerError),
}

/// Type alias for Results using AnalysisError
pub type Result<T> = std::result::Result<T, AnalysisError>;
