use crate::{
    date_range::DateRange,
    day_key::DayKey,
    error::{PowerError, Result},
    observation::{PowerResponse, WeatherObservation, DAILY_PARAMETERS, HOURLY_PARAMETERS},
};
use chrono::{Datelike, Local, NaiveDate};
use futures::future::{abortable, AbortHandle, Aborted};
use futures::stream::{FuturesUnordered, StreamExt};
use log::{info, warn};
use reqwest::Client;
use std::collections::BTreeMap;
use std::future::Future;
use std::time::Duration;

const BASE_URL_DAILY: &str = "https://power.larc.nasa.gov/api/temporal/daily/point";
const BASE_URL_HOURLY: &str = "https://power.larc.nasa.gov/api/temporal/hourly/point";

/// Days added on each side of the selected range for suggestion candidates.
pub const DEFAULT_EXPANSION_DAYS: i64 = 30;

/// Fixed lookback: one request per year, ending at the last complete year.
pub const HISTORICAL_YEARS: i32 = 20;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Parameters for a historical fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchParams {
    pub latitude: f64,
    pub longitude: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Days added before start_date and after end_date.
    pub expansion_days: i64,
    /// If set (0-23), requests hourly granularity filtered to this hour,
    /// with the single T2M reading used for both temp_max and temp_min.
    pub hour: Option<u32>,
}

impl FetchParams {
    pub fn new(latitude: f64, longitude: f64, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        FetchParams {
            latitude,
            longitude,
            start_date,
            end_date,
            expansion_days: DEFAULT_EXPANSION_DAYS,
            hour: None,
        }
    }

    pub fn with_hour(mut self, hour: u32) -> Self {
        self.hour = Some(hour);
        self
    }

    pub fn with_expansion_days(mut self, days: i64) -> Self {
        self.expansion_days = days;
        self
    }
}

/// Progress notification: (completed year requests, total year requests).
/// Fires in completion order, success or failure alike.
pub type ProgressFn = dyn Fn(usize, usize) + Send + Sync;

/// Historical observations grouped by calendar day.
#[derive(Debug, Clone)]
pub struct HistoricalRecords {
    /// One bucket per day of the expanded window, pre-seeded empty so that
    /// "zero observations for this day" is distinguishable from "day not
    /// requested".
    pub records_by_day: BTreeMap<DayKey, Vec<WeatherObservation>>,
    /// Every date from start_date through end_date.
    pub selected_days: Vec<NaiveDate>,
    /// Every date of the expanded window.
    pub all_days: Vec<NaiveDate>,
}

impl HistoricalRecords {
    /// True if at least one day bucket received an observation.
    pub fn has_any_observations(&self) -> bool {
        self.records_by_day.values().any(|bucket| !bucket.is_empty())
    }
}

/// Client for the NASA POWER temporal point endpoints.
pub struct PowerClient {
    client: Client,
    daily_url: String,
    hourly_url: String,
}

impl PowerClient {
    pub fn new() -> Result<PowerClient> {
        Self::with_base_urls(BASE_URL_DAILY, BASE_URL_HOURLY)
    }

    /// Create a client against custom base URLs (for testing).
    pub fn with_base_urls(daily_url: &str, hourly_url: &str) -> Result<PowerClient> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(PowerClient {
            client,
            daily_url: daily_url.to_string(),
            hourly_url: hourly_url.to_string(),
        })
    }

    /// Fetch the historical record for the expanded window around the
    /// selected range: one request per lookback year, all years concurrent.
    ///
    /// A year whose request fails (network error, bad status, unparsable
    /// body, timeout) is logged and contributes nothing; the batch never
    /// aborts and no retries are made. Year results merge into the shared
    /// map sequentially at the join point, so no locking is needed.
    pub async fn fetch_historical(
        &self,
        params: &FetchParams,
        on_progress: Option<&ProgressFn>,
    ) -> Result<HistoricalRecords> {
        let selected_days = DateRange(params.start_date, params.end_date).dates();
        let expanded =
            DateRange(params.start_date, params.end_date).expand(params.expansion_days);
        let all_days = expanded.dates();
        let mut records_by_day = seed_buckets(&all_days);

        let current_year = Local::now().year();
        let start_year = current_year - HISTORICAL_YEARS;
        let total = HISTORICAL_YEARS as usize;

        info!(
            "Fetching {total} historical years for ({}, {}), window {} to {}",
            params.latitude, params.longitude, expanded.0, expanded.1
        );

        let mut year_fetches: FuturesUnordered<_> = (start_year..current_year)
            .map(|year| async move { (year, self.fetch_year(params, year).await) })
            .collect();

        let mut completed = 0;
        while let Some((year, result)) = year_fetches.next().await {
            completed += 1;
            match result {
                Ok(observations) => merge_year(&mut records_by_day, observations),
                Err(e) => warn!("Year {year} fetch failed: {e}"),
            }
            if let Some(progress) = on_progress {
                progress(completed, total);
            }
        }

        // completion order is arbitrary; keep per-day details in year order
        for bucket in records_by_day.values_mut() {
            bucket.sort_by_key(|obs| obs.year);
        }

        Ok(HistoricalRecords {
            records_by_day,
            selected_days,
            all_days,
        })
    }

    /// Like [`fetch_historical`], but returns an [`AbortHandle`] so a
    /// superseded analysis can cancel its in-flight year requests. Aborting
    /// resolves the future to `PowerError::Aborted`; dropping the future
    /// cancels the requests as well.
    ///
    /// [`fetch_historical`]: PowerClient::fetch_historical
    pub fn abortable_fetch<'a>(
        &'a self,
        params: &'a FetchParams,
        on_progress: Option<&'a ProgressFn>,
    ) -> (
        impl Future<Output = Result<HistoricalRecords>> + 'a,
        AbortHandle,
    ) {
        let (fetch, handle) = abortable(self.fetch_historical(params, on_progress));
        let fetch = async move {
            match fetch.await {
                Ok(result) => result,
                Err(Aborted) => Err(PowerError::Aborted),
            }
        };
        (fetch, handle)
    }

    async fn fetch_year(
        &self,
        params: &FetchParams,
        year: i32,
    ) -> Result<Vec<(DayKey, WeatherObservation)>> {
        let (start, end) = year_span(params, year);
        let (base_url, parameters) = match params.hour {
            Some(_) => (self.hourly_url.as_str(), HOURLY_PARAMETERS),
            None => (self.daily_url.as_str(), DAILY_PARAMETERS),
        };

        let response = self
            .client
            .get(base_url)
            .query(&[
                ("start", start.as_str()),
                ("end", end.as_str()),
                ("latitude", params.latitude.to_string().as_str()),
                ("longitude", params.longitude.to_string().as_str()),
                ("community", "ag"),
                ("parameters", parameters),
                ("format", "json"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(PowerError::BadStatus(response.status().as_u16()));
        }

        let payload: PowerResponse = response
            .json()
            .await
            .map_err(|e| PowerError::ResponseParse(e.to_string()))?;

        Ok(match params.hour {
            Some(hour) => payload.hourly_observations(year, hour),
            None => payload.daily_observations(year),
        })
    }
}

/// Pre-seed one empty bucket per calendar day of the window.
fn seed_buckets(all_days: &[NaiveDate]) -> BTreeMap<DayKey, Vec<WeatherObservation>> {
    all_days
        .iter()
        .map(|day| (DayKey::from(*day), Vec::new()))
        .collect()
}

/// Merge one year's observations into the day buckets. Timestamps outside
/// the pre-seeded window are dropped.
fn merge_year(
    records_by_day: &mut BTreeMap<DayKey, Vec<WeatherObservation>>,
    observations: Vec<(DayKey, WeatherObservation)>,
) {
    for (key, observation) in observations {
        if let Some(bucket) = records_by_day.get_mut(&key) {
            bucket.push(observation);
        }
    }
}

/// The expanded window's month/day span shifted into a historical year,
/// as POWER compact dates (YYYYMMDD).
fn year_span(params: &FetchParams, year: i32) -> (String, String) {
    let expanded = DateRange(params.start_date, params.end_date).expand(params.expansion_days);
    let start = format!("{year}{:02}{:02}", expanded.0.month(), expanded.0.day());
    let end = format!("{year}{:02}{:02}", expanded.1.month(), expanded.1.day());
    (start, end)
}
