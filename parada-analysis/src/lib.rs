//! Historical weather probability analysis for outdoor event planning.
//!
//! Given twenty years of daily (or fixed-hour) observations for a location,
//! the engine scores each calendar day against an event's climate criteria,
//! picks the best day of the user's range, suggests strictly better nearby
//! dates, and classifies the recent-years trend.

pub mod criteria;
pub mod error;
pub mod export;
pub mod presentation;
pub mod profiles;
pub mod scorer;
pub mod suggestions;
pub mod trend;

#[cfg(feature = "api")]
pub mod runner;

pub use error::{AnalysisError, Result};
