use crate::scorer::DayAnalysis;
use chrono::{Datelike, NaiveDate};
use std::collections::HashSet;

/// Tuning knobs for the alternative-date search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SuggestionOptions {
    /// Maximum number of alternatives returned.
    pub max_suggestions: usize,
    /// How much better than the selected window's best a candidate must be,
    /// in percentage points.
    pub min_probability_improvement: f64,
}

impl Default for SuggestionOptions {
    fn default() -> Self {
        SuggestionOptions {
            max_suggestions: 5,
            min_probability_improvement: 0.0,
        }
    }
}

/// Find nearby days that beat the best probability inside the selected window.
///
/// Exclusion is by calendar day (month + day), so a candidate sharing the
/// month and day of any selected date is skipped regardless of its year.
/// Candidates are ordered by probability descending, then by distance to
/// `reference_date` ascending.
pub fn find_alternative_dates<'a>(
    all_analyses: &'a [DayAnalysis],
    selected_dates: &[NaiveDate],
    best_selected_probability: f64,
    reference_date: NaiveDate,
    options: &SuggestionOptions,
) -> Vec<&'a DayAnalysis> {
    let selected_days: HashSet<(u32, u32)> = selected_dates
        .iter()
        .map(|d| (d.month(), d.day()))
        .collect();

    let mut candidates: Vec<&DayAnalysis> = all_analyses
        .iter()
        .filter(|a| !selected_days.contains(&(a.date.month(), a.date.day())))
        .filter(|a| {
            a.probability > best_selected_probability + options.min_probability_improvement
        })
        .collect();

    candidates.sort_by(|a, b| {
        b.probability.total_cmp(&a.probability).then_with(|| {
            days_difference(a.date, reference_date)
                .abs()
                .cmp(&days_difference(b.date, reference_date).abs())
        })
    });

    candidates.truncate(options.max_suggestions);
    candidates
}

/// Signed whole days from `from` to `to` (positive when `to` is later).
pub fn days_difference(to: NaiveDate, from: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// Human-readable offset of a suggestion relative to the reference date.
pub fn proximity_text(date: NaiveDate, reference_date: NaiveDate) -> String {
    let diff = days_difference(date, reference_date);
    if diff == 0 {
        "mesmo dia".to_string()
    } else if diff > 0 {
        format!("{} dias depois", diff)
    } else {
        format!("{} dias antes", -diff)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::criteria::EventCriteria;
    use crate::scorer::analyze_day_at;
    use parada_power::observation::WeatherObservation;

    fn day(date: NaiveDate, ideal_of_two: u32) -> DayAnalysis {
        // ideal_of_two drives probability: 0 -> 0%, 1 -> 50%, 2 -> 100%
        let observations = vec![
            WeatherObservation {
                year: 2020,
                temp_max: if ideal_of_two >= 1 { 30.0 } else { 40.0 },
                temp_min: 20.0,
                precipitation: 0.0,
                wind: 3.0,
                humidity: 60.0,
            },
            WeatherObservation {
                year: 2021,
                temp_max: if ideal_of_two >= 2 { 30.0 } else { 40.0 },
                temp_min: 20.0,
                precipitation: 0.0,
                wind: 3.0,
                humidity: 60.0,
            },
        ];
        let criteria = EventCriteria {
            temp_max_ideal: Some(35.0),
            ..Default::default()
        };
        analyze_day_at(&observations, date, &criteria, 2026)
    }

    fn d(month: u32, day_of_month: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, month, day_of_month).unwrap()
    }

    #[test]
    fn test_excludes_selected_calendar_days() {
        let all = vec![day(d(6, 10), 2), day(d(6, 11), 2), day(d(6, 12), 2)];
        let out = find_alternative_dates(
            &all,
            &[d(6, 11)],
            0.0,
            d(6, 11),
            &SuggestionOptions::default(),
        );
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|a| a.date.day() != 11));
    }

    #[test]
    fn test_requires_strict_improvement() {
        let all = vec![day(d(6, 10), 1), day(d(6, 12), 2)];
        let out = find_alternative_dates(
            &all,
            &[d(6, 11)],
            50.0,
            d(6, 11),
            &SuggestionOptions::default(),
        );
        // the 50% day does not strictly beat 50%
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].date, d(6, 12));

        let none = find_alternative_dates(
            &all,
            &[d(6, 11)],
            100.0,
            d(6, 11),
            &SuggestionOptions::default(),
        );
        assert!(none.is_empty());
    }

    #[test]
    fn test_ordering_probability_then_proximity() {
        let all = vec![
            day(d(6, 5), 1),  // 50%, 6 days away
            day(d(6, 14), 2), // 100%, 3 days away
            day(d(6, 9), 2),  // 100%, 2 days away
        ];
        let out = find_alternative_dates(
            &all,
            &[d(6, 11)],
            0.0,
            d(6, 11),
            &SuggestionOptions::default(),
        );
        assert_eq!(out.len(), 3);
        assert_eq!(out[0].date, d(6, 9));
        assert_eq!(out[1].date, d(6, 14));
        assert_eq!(out[2].date, d(6, 5));
    }

    #[test]
    fn test_truncates_to_max_suggestions() {
        let all: Vec<DayAnalysis> = (1..=9).map(|n| day(d(6, n), 2)).collect();
        let out = find_alternative_dates(
            &all,
            &[d(6, 20)],
            0.0,
            d(6, 20),
            &SuggestionOptions::default(),
        );
        assert_eq!(out.len(), 5);
    }

    #[test]
    fn test_proximity_text() {
        assert_eq!(proximity_text(d(6, 11), d(6, 11)), "mesmo dia");
        assert_eq!(proximity_text(d(6, 14), d(6, 11)), "3 dias depois");
        assert_eq!(proximity_text(d(6, 8), d(6, 11)), "3 dias antes");
    }

    #[test]
    fn test_days_difference_signs() {
        assert_eq!(days_difference(d(6, 14), d(6, 11)), 3);
        assert_eq!(days_difference(d(6, 8), d(6, 11)), -3);
    }
}
