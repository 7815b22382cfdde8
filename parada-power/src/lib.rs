//! Core types and NASA POWER API client for historical weather observations.
//!
//! The POWER temporal endpoints serve multi-decade daily and hourly point
//! records. This crate models those records, parses the JSON payloads into
//! per-calendar-day buckets, and (behind the `api` feature) fetches a
//! multi-year historical window with one concurrent request per year.

pub mod date_range;
pub mod day_key;
pub mod error;
pub mod observation;

#[cfg(feature = "api")]
pub mod fetcher;

pub use error::{PowerError, Result};
