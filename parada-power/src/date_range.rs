use chrono::{NaiveDate, TimeDelta};
use std::mem::replace;

/// A date range iterator that yields each date from the start date
/// through the end date (inclusive).
#[derive(Clone, Eq, PartialEq, Copy, Debug)]
pub struct DateRange(pub NaiveDate, pub NaiveDate);

impl DateRange {
    /// Widen the range by `days` calendar days on each side.
    ///
    /// The widened window is where alternative-date candidates come from,
    /// so it deliberately extends past the user's selection.
    pub fn expand(&self, days: i64) -> DateRange {
        let delta = TimeDelta::days(days);
        DateRange(self.0 - delta, self.1 + delta)
    }

    /// Collect every date in the range.
    pub fn dates(&self) -> Vec<NaiveDate> {
        (*self).collect()
    }
}

impl Iterator for DateRange {
    type Item = NaiveDate;
    fn next(&mut self) -> Option<Self::Item> {
        if self.0 <= self.1 {
            let next = self.0 + TimeDelta::try_days(1).unwrap();
            Some(replace(&mut self.0, next))
        } else {
            None
        }
    }
}
