use crate::scorer::DayAnalysis;
use serde::{Deserialize, Serialize};

/// Minimum gap, in percentage points, before a shift counts as a trend.
pub const TREND_THRESHOLD: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Positive,
    Negative,
    Stable,
}

/// Recent-decade probability measured against the full historical record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendComparison {
    pub direction: TrendDirection,
    /// Magnitude of the shift in percentage points. Zero when stable,
    /// absolute value when negative.
    pub difference: f64,
    pub historical_probability: f64,
    pub recent_probability: f64,
}

/// Classify the shift from an overall probability to a recent one.
pub fn calculate_trend(recent_probability: f64, historical_probability: f64) -> TrendComparison {
    let raw = recent_probability - historical_probability;
    let (direction, difference) = if raw > TREND_THRESHOLD {
        (TrendDirection::Positive, raw)
    } else if raw < -TREND_THRESHOLD {
        (TrendDirection::Negative, raw.abs())
    } else {
        (TrendDirection::Stable, 0.0)
    };
    TrendComparison {
        direction,
        difference,
        historical_probability,
        recent_probability,
    }
}

/// Compare a day's recent-decade probability with its full-record one.
///
/// Returns `None` when the day has no observations inside the recent window,
/// since the recent probability would be meaningless there.
pub fn compare_trend(analysis: &DayAnalysis) -> Option<TrendComparison> {
    if analysis.total_recent_years == 0 {
        return None;
    }
    Some(calculate_trend(
        analysis.recent_probability,
        analysis.probability,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::criteria::EventCriteria;
    use crate::scorer::analyze_day_at;
    use chrono::NaiveDate;
    use parada_power::observation::WeatherObservation;

    fn obs(year: i32, temp_max: f64) -> WeatherObservation {
        WeatherObservation {
            year,
            temp_max,
            temp_min: 20.0,
            precipitation: 0.0,
            wind: 3.0,
            humidity: 60.0,
        }
    }

    fn analysis_of(data: &[WeatherObservation]) -> DayAnalysis {
        let criteria = EventCriteria {
            temp_max_ideal: Some(35.0),
            ..Default::default()
        };
        let date = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        analyze_day_at(data, date, &criteria, 2026)
    }

    #[test]
    fn test_positive_trend_keeps_raw_difference() {
        // historical 50% (2 of 4), recent 100% (2 of 2)
        let data = vec![
            obs(2008, 40.0),
            obs(2010, 40.0),
            obs(2020, 30.0),
            obs(2024, 30.0),
        ];
        let trend = compare_trend(&analysis_of(&data)).unwrap();
        assert_eq!(trend.direction, TrendDirection::Positive);
        assert_eq!(trend.difference, 50.0);
        assert_eq!(trend.historical_probability, 50.0);
        assert_eq!(trend.recent_probability, 100.0);
    }

    #[test]
    fn test_negative_trend_reports_absolute_difference() {
        // historical 50% (2 of 4), recent 0% (0 of 2)
        let data = vec![
            obs(2008, 30.0),
            obs(2010, 30.0),
            obs(2020, 40.0),
            obs(2024, 40.0),
        ];
        let trend = compare_trend(&analysis_of(&data)).unwrap();
        assert_eq!(trend.direction, TrendDirection::Negative);
        assert_eq!(trend.difference, 50.0);
    }

    #[test]
    fn test_within_threshold_is_stable_with_zero_difference() {
        // historical 50% (2 of 4), recent 50% (1 of 2)
        let data = vec![
            obs(2008, 30.0),
            obs(2010, 40.0),
            obs(2020, 30.0),
            obs(2024, 40.0),
        ];
        let trend = compare_trend(&analysis_of(&data)).unwrap();
        assert_eq!(trend.direction, TrendDirection::Stable);
        assert_eq!(trend.difference, 0.0);
    }

    #[test]
    fn test_exactly_threshold_is_stable() {
        // historical 50% (5 of 10), recent 60% (3 of 5): +10pp, not > 10
        let mut data: Vec<WeatherObservation> = Vec::new();
        for year in [2006, 2008, 2010, 2012, 2014] {
            data.push(obs(year, if year <= 2008 { 30.0 } else { 40.0 }));
        }
        for year in [2017, 2019, 2021, 2023, 2025] {
            data.push(obs(year, if year <= 2021 { 30.0 } else { 40.0 }));
        }
        let analysis = analysis_of(&data);
        assert_eq!(analysis.probability, 50.0);
        assert_eq!(analysis.recent_probability, 60.0);
        let trend = compare_trend(&analysis).unwrap();
        assert_eq!(trend.direction, TrendDirection::Stable);
    }

    #[test]
    fn test_calculate_trend_boundaries() {
        assert_eq!(calculate_trend(60.0, 50.0).direction, TrendDirection::Stable);
        assert_eq!(calculate_trend(40.0, 50.0).direction, TrendDirection::Stable);
        assert_eq!(
            calculate_trend(60.1, 50.0).direction,
            TrendDirection::Positive
        );
        let down = calculate_trend(39.9, 50.0);
        assert_eq!(down.direction, TrendDirection::Negative);
        assert!((down.difference - 10.1).abs() < 1e-9);
    }

    #[test]
    fn test_no_recent_years_yields_none() {
        let data = vec![obs(2005, 30.0), obs(2006, 30.0)];
        assert!(compare_trend(&analysis_of(&data)).is_none());
    }
}
