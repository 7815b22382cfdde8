use crate::criteria::EventCriteria;
use chrono::{Datelike, Local, NaiveDate};
use parada_power::observation::WeatherObservation;
use serde::{Deserialize, Serialize};

/// How many calendar years back (from the wall clock) count as "recent".
pub const RECENT_YEARS_WINDOW: i32 = 10;

/// Portuguese month names for display strings ("22 de junho").
const MONTHS_PT: [&str; 12] = [
    "janeiro",
    "fevereiro",
    "março",
    "abril",
    "maio",
    "junho",
    "julho",
    "agosto",
    "setembro",
    "outubro",
    "novembro",
    "dezembro",
];

/// One historical year's observation annotated with its verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearDetail {
    #[serde(flatten)]
    pub observation: WeatherObservation,
    pub ideal: bool,
    /// Joined violation descriptions, or "OK" for an ideal year.
    pub reasons: String,
}

/// The scored result for one calendar day across all available years.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayAnalysis {
    /// Representative date for display (a day of the analysis window).
    pub date: NaiveDate,
    /// Display string, e.g. "22 de junho".
    pub date_str: String,
    /// Share of years satisfying every set bound, 0-100.
    pub probability: f64,
    pub ideal_years: u32,
    pub total_years: u32,
    /// Same ratio restricted to the most recent ten calendar years.
    pub recent_probability: f64,
    pub ideal_recent_years: u32,
    pub total_recent_years: u32,
    pub details: Vec<YearDetail>,
    /// The raw observations backing this analysis.
    pub historical_data: Vec<WeatherObservation>,
}

/// Mean of each metric over a set of observations; zeros on empty input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherAverages {
    pub temp_max: f64,
    pub temp_min: f64,
    pub precipitation: f64,
    pub wind: f64,
    pub humidity: f64,
}

/// Score one calendar day's historical observations against a criteria set.
///
/// The recency window is anchored to the wall clock at analysis time, not
/// to the event date. Callers must not pass an empty slice; the fetcher only
/// exposes non-empty buckets for scoring.
pub fn analyze_day(
    observations: &[WeatherObservation],
    date: NaiveDate,
    criteria: &EventCriteria,
) -> DayAnalysis {
    analyze_day_at(observations, date, criteria, Local::now().year())
}

/// [`analyze_day`] with an explicit current year (for tests).
pub fn analyze_day_at(
    observations: &[WeatherObservation],
    date: NaiveDate,
    criteria: &EventCriteria,
    current_year: i32,
) -> DayAnalysis {
    let recent_year_limit = current_year - RECENT_YEARS_WINDOW;

    let mut ideal_years: u32 = 0;
    let mut ideal_recent_years: u32 = 0;
    let mut total_recent_years: u32 = 0;
    let mut details: Vec<YearDetail> = Vec::with_capacity(observations.len());

    for obs in observations {
        let verdict = criteria.evaluate(obs);
        let recent = obs.year >= recent_year_limit;
        if recent {
            total_recent_years += 1;
        }
        if verdict.ideal {
            ideal_years += 1;
            if recent {
                ideal_recent_years += 1;
            }
        }
        details.push(YearDetail {
            observation: obs.clone(),
            ideal: verdict.ideal,
            reasons: verdict.reasons,
        });
    }

    let total_years = observations.len() as u32;
    let probability = f64::from(ideal_years) / f64::from(total_years) * 100.0;
    let recent_probability = if total_recent_years > 0 {
        f64::from(ideal_recent_years) / f64::from(total_recent_years) * 100.0
    } else {
        0.0
    };

    DayAnalysis {
        date,
        date_str: format_date_pt(date),
        probability,
        ideal_years,
        total_years,
        recent_probability,
        ideal_recent_years,
        total_recent_years,
        details,
        historical_data: observations.to_vec(),
    }
}

/// Pick the day with the highest probability; first occurrence wins ties.
pub fn find_best_day(analyses: &[DayAnalysis]) -> Option<&DayAnalysis> {
    let mut best: Option<&DayAnalysis> = None;
    for analysis in analyses {
        match best {
            Some(current) if analysis.probability > current.probability => {
                best = Some(analysis);
            }
            None => best = Some(analysis),
            _ => {}
        }
    }
    best
}

/// Average each metric across a set of observations.
pub fn calculate_averages(observations: &[WeatherObservation]) -> WeatherAverages {
    if observations.is_empty() {
        return WeatherAverages {
            temp_max: 0.0,
            temp_min: 0.0,
            precipitation: 0.0,
            wind: 0.0,
            humidity: 0.0,
        };
    }
    let n = observations.len() as f64;
    WeatherAverages {
        temp_max: observations.iter().map(|o| o.temp_max).sum::<f64>() / n,
        temp_min: observations.iter().map(|o| o.temp_min).sum::<f64>() / n,
        precipitation: observations.iter().map(|o| o.precipitation).sum::<f64>() / n,
        wind: observations.iter().map(|o| o.wind).sum::<f64>() / n,
        humidity: observations.iter().map(|o| o.humidity).sum::<f64>() / n,
    }
}

/// Partition year details into (ideal, non-ideal).
pub fn categorize_years(details: &[YearDetail]) -> (Vec<&YearDetail>, Vec<&YearDetail>) {
    details.iter().partition(|d| d.ideal)
}

fn format_date_pt(date: NaiveDate) -> String {
    let month = MONTHS_PT[(date.month0()) as usize];
    format!("{:02} de {}", date.day(), month)
}
