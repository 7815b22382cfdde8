use parada_power::observation::WeatherObservation;
use serde::{Deserialize, Serialize};

/// Sparse climate bounds for an event.
///
/// Every bound is optional; `None` means unconstrained on that axis, so the
/// empty criteria set accepts every observation. Bounds mirror the POWER
/// parameters: temperatures in °C, precipitation in mm, wind in m/s,
/// humidity in %.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EventCriteria {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temp_min_ideal: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temp_max_ideal: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precipitation_min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precipitation_max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wind_max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub humidity_min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub humidity_max: Option<f64>,
}

/// Verdict for one historical year against a criteria set.
#[derive(Debug, Clone, PartialEq)]
pub struct Assessment {
    pub ideal: bool,
    /// Joined violation descriptions, or the literal "OK".
    pub reasons: String,
}

impl EventCriteria {
    /// True when no bound is set (every observation scores ideal).
    pub fn is_empty(&self) -> bool {
        self.temp_min_ideal.is_none()
            && self.temp_max_ideal.is_none()
            && self.precipitation_min.is_none()
            && self.precipitation_max.is_none()
            && self.wind_max.is_none()
            && self.humidity_min.is_none()
            && self.humidity_max.is_none()
    }

    /// Drop non-finite bounds. An invalid user override (NaN, infinity)
    /// becomes "unset" for that axis rather than an error.
    pub fn sanitize(&self) -> EventCriteria {
        fn finite(bound: Option<f64>) -> Option<f64> {
            bound.filter(|v| v.is_finite())
        }
        EventCriteria {
            temp_min_ideal: finite(self.temp_min_ideal),
            temp_max_ideal: finite(self.temp_max_ideal),
            precipitation_min: finite(self.precipitation_min),
            precipitation_max: finite(self.precipitation_max),
            wind_max: finite(self.wind_max),
            humidity_min: finite(self.humidity_min),
            humidity_max: finite(self.humidity_max),
        }
    }

    /// Merge explicit per-request overrides over this criteria set.
    /// A set override field wins; unset fields keep the base value.
    pub fn apply_overrides(&self, overrides: &EventCriteria) -> EventCriteria {
        EventCriteria {
            temp_min_ideal: overrides.temp_min_ideal.or(self.temp_min_ideal),
            temp_max_ideal: overrides.temp_max_ideal.or(self.temp_max_ideal),
            precipitation_min: overrides.precipitation_min.or(self.precipitation_min),
            precipitation_max: overrides.precipitation_max.or(self.precipitation_max),
            wind_max: overrides.wind_max.or(self.wind_max),
            humidity_min: overrides.humidity_min.or(self.humidity_min),
            humidity_max: overrides.humidity_max.or(self.humidity_max),
        }
    }

    /// Evaluate one year's observation against every set bound.
    ///
    /// A year is ideal iff it violates none of the set bounds; unset bounds
    /// never disqualify, and NaN observation fields never violate (their
    /// comparisons are false).
    pub fn evaluate(&self, obs: &WeatherObservation) -> Assessment {
        let mut reasons: Vec<String> = Vec::new();

        if let Some(floor) = self.temp_min_ideal {
            if obs.temp_min < floor {
                reasons.push(format!("muito frio ({:.1}°C)", obs.temp_min));
            }
        }
        if let Some(ceiling) = self.temp_max_ideal {
            if obs.temp_max > ceiling {
                reasons.push(format!("muito quente ({:.1}°C)", obs.temp_max));
            }
        }
        if let Some(floor) = self.precipitation_min {
            if obs.precipitation < floor {
                reasons.push(format!("chuva insuficiente ({:.1}mm)", obs.precipitation));
            }
        }
        if let Some(ceiling) = self.precipitation_max {
            if obs.precipitation > ceiling {
                reasons.push(format!("muita chuva ({:.1}mm)", obs.precipitation));
            }
        }
        if let Some(ceiling) = self.wind_max {
            if obs.wind > ceiling {
                reasons.push(format!("muito vento ({:.1}m/s)", obs.wind));
            }
        }
        if let Some(floor) = self.humidity_min {
            if obs.humidity < floor {
                reasons.push(format!("muito seco ({:.1}%)", obs.humidity));
            }
        }
        if let Some(ceiling) = self.humidity_max {
            if obs.humidity > ceiling {
                reasons.push(format!("muito úmido ({:.1}%)", obs.humidity));
            }
        }

        if reasons.is_empty() {
            Assessment {
                ideal: true,
                reasons: "OK".to_string(),
            }
        } else {
            Assessment {
                ideal: false,
                reasons: reasons.join(", "),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::EventCriteria;
    use parada_power::observation::WeatherObservation;

    fn observation() -> WeatherObservation {
        WeatherObservation {
            year: 2020,
            temp_max: 25.0,
            temp_min: 15.0,
            precipitation: 0.5,
            wind: 5.0,
            humidity: 60.0,
        }
    }

    #[test]
    fn test_empty_criteria_accepts_everything() {
        let criteria = EventCriteria::default();
        let verdict = criteria.evaluate(&observation());
        assert!(verdict.ideal);
        assert_eq!(verdict.reasons, "OK");
    }

    #[test]
    fn test_too_cold_is_the_only_violation() {
        let criteria = EventCriteria {
            temp_min_ideal: Some(20.0),
            temp_max_ideal: Some(30.0),
            ..Default::default()
        };
        let verdict = criteria.evaluate(&observation());
        assert!(!verdict.ideal);
        assert!(verdict.reasons.contains("frio"));
        assert!(!verdict.reasons.contains("quente"));
        assert_eq!(verdict.reasons, "muito frio (15.0°C)");
    }

    #[test]
    fn test_multiple_violations_join_with_comma() {
        let criteria = EventCriteria {
            precipitation_max: Some(0.1),
            wind_max: Some(3.0),
            ..Default::default()
        };
        let verdict = criteria.evaluate(&observation());
        assert!(!verdict.ideal);
        assert_eq!(
            verdict.reasons,
            "muita chuva (0.5mm), muito vento (5.0m/s)"
        );
    }

    #[test]
    fn test_nan_fields_never_violate() {
        let criteria = EventCriteria {
            temp_min_ideal: Some(20.0),
            temp_max_ideal: Some(30.0),
            precipitation_max: Some(1.0),
            wind_max: Some(10.0),
            humidity_min: Some(40.0),
            humidity_max: Some(70.0),
            ..Default::default()
        };
        let missing = WeatherObservation {
            year: 2020,
            temp_max: f64::NAN,
            temp_min: f64::NAN,
            precipitation: f64::NAN,
            wind: f64::NAN,
            humidity: f64::NAN,
        };
        assert!(criteria.evaluate(&missing).ideal);
    }

    #[test]
    fn test_sanitize_drops_non_finite_bounds() {
        let criteria = EventCriteria {
            temp_min_ideal: Some(f64::NAN),
            temp_max_ideal: Some(f64::INFINITY),
            wind_max: Some(10.0),
            ..Default::default()
        };
        let sane = criteria.sanitize();
        assert_eq!(sane.temp_min_ideal, None);
        assert_eq!(sane.temp_max_ideal, None);
        assert_eq!(sane.wind_max, Some(10.0));
    }

    #[test]
    fn test_apply_overrides_prefers_override_fields() {
        let base = EventCriteria {
            temp_min_ideal: Some(20.0),
            wind_max: Some(10.0),
            ..Default::default()
        };
        let overrides = EventCriteria {
            wind_max: Some(15.0),
            humidity_max: Some(80.0),
            ..Default::default()
        };
        let merged = base.apply_overrides(&overrides);
        assert_eq!(merged.temp_min_ideal, Some(20.0));
        assert_eq!(merged.wind_max, Some(15.0));
        assert_eq!(merged.humidity_max, Some(80.0));
    }

    #[test]
    fn test_is_empty() {
        assert!(EventCriteria::default().is_empty());
        assert!(!EventCriteria {
            wind_max: Some(1.0),
            ..Default::default()
        }
        .is_empty());
    }
}
