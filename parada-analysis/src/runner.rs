//! End-to-end analysis: fetch the historical record, score every day of the
//! expanded window, pick the best selected day, suggest alternatives and
//! classify the trend.

use crate::criteria::EventCriteria;
use crate::error::{AnalysisError, Result};
use crate::profiles::ProfileSelection;
use crate::scorer::{analyze_day_at, find_best_day, DayAnalysis};
use crate::suggestions::{find_alternative_dates, SuggestionOptions};
use crate::trend::{compare_trend, TrendComparison};
use chrono::{Datelike, Local, NaiveDate};
use log::info;
use parada_power::day_key::DayKey;
use parada_power::fetcher::{
    FetchParams, HistoricalRecords, PowerClient, ProgressFn, DEFAULT_EXPANSION_DAYS,
};
use std::collections::HashSet;

/// A full analysis request.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisParams {
    pub latitude: f64,
    pub longitude: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub profile: ProfileSelection,
    /// Per-field criteria overrides layered over the profile's set.
    pub overrides: Option<EventCriteria>,
    /// Fixed hour of day (0-23) for hourly granularity; `None` for daily.
    pub hour: Option<u32>,
    pub expansion_days: i64,
}

impl AnalysisParams {
    pub fn new(
        latitude: f64,
        longitude: f64,
        start_date: NaiveDate,
        end_date: NaiveDate,
        profile: ProfileSelection,
    ) -> Self {
        AnalysisParams {
            latitude,
            longitude,
            start_date,
            end_date,
            profile,
            overrides: None,
            hour: None,
            expansion_days: DEFAULT_EXPANSION_DAYS,
        }
    }
}

/// Everything the analysis produces for one request.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisOutcome {
    /// The effective (resolved, overridden, sanitized) criteria.
    pub criteria: EventCriteria,
    /// Scored days of the user's selected range, in date order.
    pub results: Vec<DayAnalysis>,
    /// Scored days of the whole expanded window, in date order.
    pub all_results: Vec<DayAnalysis>,
    pub best_day: Option<DayAnalysis>,
    pub alternatives: Vec<DayAnalysis>,
    pub trend: Option<TrendComparison>,
}

impl AnalysisOutcome {
    fn empty(criteria: EventCriteria) -> Self {
        AnalysisOutcome {
            criteria,
            results: Vec::new(),
            all_results: Vec::new(),
            best_day: None,
            alternatives: Vec::new(),
            trend: None,
        }
    }
}

/// Run the whole pipeline against the POWER API.
///
/// An inverted range (start after end) yields an empty outcome rather than
/// an error. A window whose every day bucket came back empty is
/// [`AnalysisError::NoHistoricalData`]; a probability of zero is not.
pub async fn run_analysis(
    client: &PowerClient,
    params: &AnalysisParams,
    on_progress: Option<&ProgressFn>,
) -> Result<AnalysisOutcome> {
    let criteria = resolve_criteria(&params.profile, params.overrides.as_ref())?;

    if params.start_date > params.end_date {
        return Ok(AnalysisOutcome::empty(criteria));
    }

    let fetch_params = FetchParams {
        latitude: params.latitude,
        longitude: params.longitude,
        start_date: params.start_date,
        end_date: params.end_date,
        expansion_days: params.expansion_days,
        hour: params.hour,
    };
    let records = client.fetch_historical(&fetch_params, on_progress).await?;

    if !records.has_any_observations() {
        return Err(AnalysisError::NoHistoricalData);
    }

    let outcome = evaluate_records(&records, &criteria, params.start_date, Local::now().year());
    info!(
        "Analyzed {} days ({} in the selected range), best probability {:?}",
        outcome.all_results.len(),
        outcome.results.len(),
        outcome.best_day.as_ref().map(|d| d.probability)
    );
    Ok(outcome)
}

/// Resolve the effective criteria: profile, then overrides, then sanitize.
pub fn resolve_criteria(
    profile: &ProfileSelection,
    overrides: Option<&EventCriteria>,
) -> Result<EventCriteria> {
    let base = profile.resolve().ok_or_else(|| match profile {
        ProfileSelection::Builtin { key } => AnalysisError::UnknownProfile(key.clone()),
        _ => unreachable!("non-builtin selections always resolve"),
    })?;
    let merged = match overrides {
        Some(overrides) => base.apply_overrides(overrides),
        None => base,
    };
    Ok(merged.sanitize())
}

/// Score fetched records into a complete outcome. Pure over its inputs; the
/// wall clock only enters through `current_year`.
pub fn evaluate_records(
    records: &HistoricalRecords,
    criteria: &EventCriteria,
    reference_date: NaiveDate,
    current_year: i32,
) -> AnalysisOutcome {
    let selected_days: HashSet<(u32, u32)> = records
        .selected_days
        .iter()
        .map(|d| (d.month(), d.day()))
        .collect();

    let mut results = Vec::new();
    let mut all_results = Vec::new();
    for date in &records.all_days {
        let key = DayKey::from(*date);
        let bucket = match records.records_by_day.get(&key) {
            Some(bucket) if !bucket.is_empty() => bucket,
            _ => continue,
        };
        let analysis = analyze_day_at(bucket, *date, criteria, current_year);
        if selected_days.contains(&(date.month(), date.day())) {
            results.push(analysis.clone());
        }
        all_results.push(analysis);
    }

    let best_day = find_best_day(&results).cloned();
    let (alternatives, trend) = match &best_day {
        Some(best) => {
            let alternatives = find_alternative_dates(
                &all_results,
                &records.selected_days,
                best.probability,
                reference_date,
                &SuggestionOptions::default(),
            )
            .into_iter()
            .cloned()
            .collect();
            (alternatives, compare_trend(best))
        }
        None => (Vec::new(), None),
    };

    AnalysisOutcome {
        criteria: *criteria,
        results,
        all_results,
        best_day,
        alternatives,
        trend,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parada_power::date_range::DateRange;
    use parada_power::observation::WeatherObservation;
    use std::collections::BTreeMap;

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

    fn records(start: NaiveDate, end: NaiveDate, expansion: i64) -> HistoricalRecords {
        let selected_days = DateRange(start, end).dates();
        let all_days = DateRange(start, end).expand(expansion).dates();
        let records_by_day: BTreeMap<_, _> = all_days
            .iter()
            .map(|d| (DayKey::from(*d), Vec::new()))
            .collect();
        HistoricalRecords {
            records_by_day,
            selected_days,
            all_days,
        }
    }

    fn d(month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, month, day).unwrap()
    }

    fn criteria() -> EventCriteria {
        EventCriteria {
            temp_max_ideal: Some(35.0),
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_buckets_are_skipped() {
        let mut recs = records(d(6, 10), d(6, 11), 2);
        recs.records_by_day
            .get_mut(&DayKey::new(6, 10))
            .unwrap()
            .push(obs(2020, 30.0));

        let outcome = evaluate_records(&recs, &criteria(), d(6, 10), 2026);
        assert_eq!(outcome.all_results.len(), 1);
        assert_eq!(outcome.results.len(), 1);
        assert_eq!(outcome.results[0].date, d(6, 10));
    }

    #[test]
    fn test_best_day_comes_from_selected_range_only() {
        let mut recs = records(d(6, 10), d(6, 11), 2);
        // perfect day outside the selected range
        recs.records_by_day
            .get_mut(&DayKey::new(6, 13))
            .unwrap()
            .push(obs(2020, 30.0));
        // imperfect day inside it
        let bucket = recs.records_by_day.get_mut(&DayKey::new(6, 10)).unwrap();
        bucket.push(obs(2020, 30.0));
        bucket.push(obs(2021, 40.0));

        let outcome = evaluate_records(&recs, &criteria(), d(6, 10), 2026);
        let best = outcome.best_day.unwrap();
        assert_eq!(best.date, d(6, 10));
        assert_eq!(best.probability, 50.0);

        // the out-of-range 100% day shows up as an alternative instead
        assert_eq!(outcome.alternatives.len(), 1);
        assert_eq!(outcome.alternatives[0].date, d(6, 13));
    }

    #[test]
    fn test_alternatives_require_strict_improvement() {
        let mut recs = records(d(6, 10), d(6, 10), 2);
        recs.records_by_day
            .get_mut(&DayKey::new(6, 10))
            .unwrap()
            .push(obs(2020, 30.0));
        // equally good neighbor, not strictly better
        recs.records_by_day
            .get_mut(&DayKey::new(6, 11))
            .unwrap()
            .push(obs(2020, 30.0));

        let outcome = evaluate_records(&recs, &criteria(), d(6, 10), 2026);
        assert_eq!(outcome.best_day.unwrap().probability, 100.0);
        assert!(outcome.alternatives.is_empty());
    }

    #[test]
    fn test_trend_follows_best_day() {
        let mut recs = records(d(6, 10), d(6, 10), 1);
        let bucket = recs.records_by_day.get_mut(&DayKey::new(6, 10)).unwrap();
        bucket.push(obs(2008, 40.0));
        bucket.push(obs(2010, 40.0));
        bucket.push(obs(2020, 30.0));
        bucket.push(obs(2024, 30.0));

        let outcome = evaluate_records(&recs, &criteria(), d(6, 10), 2026);
        let trend = outcome.trend.unwrap();
        assert_eq!(trend.historical_probability, 50.0);
        assert_eq!(trend.recent_probability, 100.0);
    }

    #[test]
    fn test_resolve_criteria_unknown_profile() {
        let err = resolve_criteria(&ProfileSelection::builtin("esqui"), None).unwrap_err();
        match err {
            AnalysisError::UnknownProfile(key) => assert_eq!(key, "esqui"),
            other => panic!("expected UnknownProfile, got {other:?}"),
        }
    }

    #[test]
    fn test_resolve_criteria_applies_overrides_and_sanitizes() {
        let overrides = EventCriteria {
            temp_max_ideal: Some(38.0),
            wind_max: Some(f64::NAN),
            ..Default::default()
        };
        let resolved =
            resolve_criteria(&ProfileSelection::builtin("churrasco"), Some(&overrides)).unwrap();
        assert_eq!(resolved.temp_max_ideal, Some(38.0));
        // churrasco's own bound survives where no override is set
        assert_eq!(resolved.temp_min_ideal, Some(20.0));
        // non-finite overrides are discarded, falling back to nothing is
        // fine but never to NaN
        assert!(resolved.wind_max.map_or(true, f64::is_finite));
    }
}
