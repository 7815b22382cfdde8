use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a calendar day independent of year: (month, day).
///
/// Historical observations are bucketed under this key so that the same
/// month/day across twenty years of data lands in one bucket. Displayed in
/// the POWER compact form `MMDD` (zero-padded).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DayKey {
    pub month: u32,
    pub day: u32,
}

impl DayKey {
    pub fn new(month: u32, day: u32) -> DayKey {
        DayKey { month, day }
    }

    /// Parse a key out of a POWER timestamp.
    ///
    /// Daily timestamps are `YYYYMMDD` (8 chars), hourly are `YYYYMMDDHH`
    /// (10 chars); in both, the month/day live at chars [4..8]. This slicing
    /// convention is part of the POWER wire contract.
    pub fn from_timestamp(timestamp: &str) -> Option<DayKey> {
        if timestamp.len() < 8 {
            return None;
        }
        let month: u32 = timestamp[4..6].parse().ok()?;
        let day: u32 = timestamp[6..8].parse().ok()?;
        if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
            return None;
        }
        Some(DayKey { month, day })
    }

    /// Extract the hour from an hourly POWER timestamp (`YYYYMMDDHH`).
    pub fn hour_of_timestamp(timestamp: &str) -> Option<u32> {
        if timestamp.len() < 10 {
            return None;
        }
        timestamp[8..10].parse().ok()
    }
}

impl From<NaiveDate> for DayKey {
    fn from(date: NaiveDate) -> DayKey {
        DayKey {
            month: date.month(),
            day: date.day(),
        }
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}{:02}", self.month, self.day)
    }
}
