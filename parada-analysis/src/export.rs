//! JSON and CSV export of a finished analysis, with optional temperature
//! unit conversion for display values.

use crate::criteria::EventCriteria;
use crate::scorer::DayAnalysis;
use chrono::Utc;
use serde::{Deserialize, Serialize};

pub const DATA_SOURCE: &str = "NASA POWER (Prediction Of Worldwide Energy Resources)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    pub fn symbol(self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "°C",
            TemperatureUnit::Fahrenheit => "°F",
        }
    }
}

pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

pub fn fahrenheit_to_celsius(fahrenheit: f64) -> f64 {
    (fahrenheit - 32.0) * 5.0 / 9.0
}

/// Render a Celsius value in the requested unit, e.g. "28°C" or "82°F".
pub fn format_temperature(celsius: f64, unit: TemperatureUnit, decimals: usize) -> String {
    let value = match unit {
        TemperatureUnit::Celsius => celsius,
        TemperatureUnit::Fahrenheit => celsius_to_fahrenheit(celsius),
    };
    format!("{:.*}{}", decimals, value, unit.symbol())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportLocation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportPeriod {
    pub start: String,
    pub end: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub event_name: String,
    pub event_type: String,
    pub location: ExportLocation,
    pub period: ExportPeriod,
    pub export_date: String,
    pub data_source: String,
    pub criteria: EventCriteria,
    pub temperature_unit: TemperatureUnit,
}

impl ExportMetadata {
    pub fn new(
        event_name: impl Into<String>,
        event_type: impl Into<String>,
        location: ExportLocation,
        period: ExportPeriod,
        criteria: EventCriteria,
        temperature_unit: TemperatureUnit,
    ) -> Self {
        ExportMetadata {
            event_name: event_name.into(),
            event_type: event_type.into(),
            location,
            period,
            export_date: Utc::now().to_rfc3339(),
            data_source: DATA_SOURCE.to_string(),
            criteria,
            temperature_unit,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportData {
    pub metadata: ExportMetadata,
    pub best_day: Option<DayAnalysis>,
    pub all_days: Vec<DayAnalysis>,
    pub alternatives: Vec<DayAnalysis>,
}

/// Pretty-printed JSON dump of the full analysis.
pub fn to_json(data: &ExportData) -> serde_json::Result<String> {
    serde_json::to_string_pretty(data)
}

/// CSV export: a `#`-prefixed metadata preamble followed by a per-day table.
pub fn to_csv(data: &ExportData) -> crate::Result<String> {
    let metadata = &data.metadata;
    let unit = metadata.temperature_unit;

    let mut out = String::new();
    out.push_str("# Weather Analysis Export\n");
    out.push_str(&format!("# Event: {}\n", metadata.event_name));
    let location = match &metadata.location.name {
        Some(name) => name.clone(),
        None => format!(
            "{}, {}",
            metadata.location.latitude, metadata.location.longitude
        ),
    };
    out.push_str(&format!("# Location: {}\n", location));
    out.push_str(&format!(
        "# Period: {} to {}\n",
        metadata.period.start, metadata.period.end
    ));
    out.push_str(&format!("# Export Date: {}\n", metadata.export_date));
    out.push_str(&format!("# Data Source: {}\n", metadata.data_source));
    out.push_str(&format!("# Temperature Unit: {}\n", unit.symbol()));
    out.push_str("\n# Criteria:\n");
    for (label, value, is_temp) in criteria_rows(&metadata.criteria) {
        if is_temp {
            out.push_str(&format!(
                "# {}: {}\n",
                label,
                format_temperature(value, unit, 0)
            ));
        } else {
            out.push_str(&format!("# {}: {}\n", label, value));
        }
    }
    out.push_str("\n# Analysis Results:\n\n");

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([
        "Date",
        "Probability (%)",
        "Ideal Years",
        "Total Years",
        "Recent Probability (%)",
        "Ideal Recent Years",
        "Total Recent Years",
    ])?;
    for day in &data.all_days {
        writer.write_record([
            day.date_str.clone(),
            format!("{:.2}", day.probability),
            day.ideal_years.to_string(),
            day.total_years.to_string(),
            format!("{:.2}", day.recent_probability),
            day.ideal_recent_years.to_string(),
            day.total_recent_years.to_string(),
        ])?;
    }
    let table = writer.into_inner().map_err(|e| {
        csv::Error::from(std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))
    })?;
    out.push_str(&String::from_utf8_lossy(&table));
    Ok(out)
}

fn criteria_rows(criteria: &EventCriteria) -> Vec<(&'static str, f64, bool)> {
    let mut rows = Vec::new();
    if let Some(v) = criteria.temp_min_ideal {
        rows.push(("Minimum Temperature", v, true));
    }
    if let Some(v) = criteria.temp_max_ideal {
        rows.push(("Maximum Temperature", v, true));
    }
    if let Some(v) = criteria.precipitation_min {
        rows.push(("Minimum Precipitation (mm)", v, false));
    }
    if let Some(v) = criteria.precipitation_max {
        rows.push(("Maximum Precipitation (mm)", v, false));
    }
    if let Some(v) = criteria.wind_max {
        rows.push(("Maximum Wind Speed (km/h)", v, false));
    }
    if let Some(v) = criteria.humidity_min {
        rows.push(("Minimum Humidity (%)", v, false));
    }
    if let Some(v) = criteria.humidity_max {
        rows.push(("Maximum Humidity (%)", v, false));
    }
    rows
}
