use crate::day_key::DayKey;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Parameters requested from the daily endpoint.
pub const DAILY_PARAMETERS: &str = "T2M_MAX,T2M_MIN,PRECTOTCORR,WS10M,RH2M";

/// Parameters requested from the hourly endpoint. Hourly data carries a
/// single instantaneous temperature (T2M) instead of a max/min pair.
pub const HOURLY_PARAMETERS: &str = "T2M,PRECTOTCORR,WS10M,RH2M";

/// One historical weather measurement for a calendar day in a specific year.
///
/// Fields the source did not report are `f64::NAN`; a missing parameter never
/// fails the parse. NaN fields never violate a criteria bound downstream
/// (NaN comparisons are false), so a partially missing year still scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherObservation {
    pub year: i32,
    /// Daily maximum temperature at 2m (°C)
    pub temp_max: f64,
    /// Daily minimum temperature at 2m (°C)
    pub temp_min: f64,
    /// Corrected total precipitation (mm)
    pub precipitation: f64,
    /// Wind speed at 10m (m/s)
    pub wind: f64,
    /// Relative humidity at 2m (%)
    pub humidity: f64,
}

/// A POWER temporal point response.
///
/// The payload is GeoJSON-shaped; the part that matters is
/// `properties.parameter.<PARAM>`, a map from timestamp string to value.
#[derive(Debug, Deserialize)]
pub struct PowerResponse {
    pub properties: PowerProperties,
}

#[derive(Debug, Deserialize)]
pub struct PowerProperties {
    #[serde(default)]
    pub parameter: HashMap<String, HashMap<String, Option<f64>>>,
}

impl PowerResponse {
    fn value(&self, parameter: &str, timestamp: &str) -> f64 {
        self.properties
            .parameter
            .get(parameter)
            .and_then(|series| series.get(timestamp))
            .and_then(|v| *v)
            .unwrap_or(f64::NAN)
    }

    /// Extract daily observations, keyed by calendar day.
    ///
    /// Timestamps are `YYYYMMDD`; the T2M_MAX series drives the iteration,
    /// the remaining parameters are looked up per timestamp and default to
    /// NaN when absent.
    pub fn daily_observations(&self, year: i32) -> Vec<(DayKey, WeatherObservation)> {
        let Some(series) = self.properties.parameter.get("T2M_MAX") else {
            return Vec::new();
        };
        series
            .keys()
            .filter_map(|timestamp| {
                let key = DayKey::from_timestamp(timestamp)?;
                Some((
                    key,
                    WeatherObservation {
                        year,
                        temp_max: self.value("T2M_MAX", timestamp),
                        temp_min: self.value("T2M_MIN", timestamp),
                        precipitation: self.value("PRECTOTCORR", timestamp),
                        wind: self.value("WS10M", timestamp),
                        humidity: self.value("RH2M", timestamp),
                    },
                ))
            })
            .collect()
    }

    /// Extract hourly observations for one hour of the day.
    ///
    /// Timestamps are `YYYYMMDDHH`; only entries matching `hour` are kept,
    /// and the single T2M reading stands in for both temp_max and temp_min.
    pub fn hourly_observations(&self, year: i32, hour: u32) -> Vec<(DayKey, WeatherObservation)> {
        let Some(series) = self.properties.parameter.get("T2M") else {
            return Vec::new();
        };
        series
            .keys()
            .filter_map(|timestamp| {
                if DayKey::hour_of_timestamp(timestamp)? != hour {
                    return None;
                }
                let key = DayKey::from_timestamp(timestamp)?;
                let temp = self.value("T2M", timestamp);
                Some((
                    key,
                    WeatherObservation {
                        year,
                        temp_max: temp,
                        temp_min: temp,
                        precipitation: self.value("PRECTOTCORR", timestamp),
                        wind: self.value("WS10M", timestamp),
                        humidity: self.value("RH2M", timestamp),
                    },
                ))
            })
            .collect()
    }
}
