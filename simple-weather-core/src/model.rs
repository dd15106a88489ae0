use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Where a lookup should be resolved: free-text search or a coordinate pair.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationQuery {
    Text(String),
    Coordinates { latitude: f64, longitude: f64 },
}

impl LocationQuery {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn coordinates(latitude: f64, longitude: f64) -> Self {
        Self::Coordinates { latitude, longitude }
    }

    /// Value for the provider's `q` parameter.
    pub fn to_param(&self) -> String {
        match self {
            LocationQuery::Text(text) => text.trim().to_string(),
            LocationQuery::Coordinates { latitude, longitude } => format!("{latitude},{longitude}"),
        }
    }

    /// Rejects queries that can never resolve, so they are not sent over the wire.
    pub fn validate(&self) -> Result<(), String> {
        match self {
            LocationQuery::Text(text) if text.trim().is_empty() => {
                Err("location search text is empty".to_string())
            }
            LocationQuery::Text(_) => Ok(()),
            LocationQuery::Coordinates { latitude, longitude } => {
                if !latitude.is_finite() || latitude.abs() > 90.0 {
                    return Err(format!("latitude {latitude} is outside -90..=90"));
                }
                if !longitude.is_finite() || longitude.abs() > 180.0 {
                    return Err(format!("longitude {longitude} is outside -180..=180"));
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for LocationQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocationQuery::Text(text) => f.write_str(text.trim()),
            LocationQuery::Coordinates { latitude, longitude } => {
                write!(f, "({latitude:.4}, {longitude:.4})")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub region: String,
    pub country: String,
}

impl Location {
    pub fn new(
        name: impl Into<String>,
        region: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        Self { name: name.into(), region: region.into(), country: country.into() }
    }

    pub fn identity(&self) -> LocationIdentity {
        LocationIdentity {
            name: self.name.clone(),
            region: self.region.clone(),
            country: self.country.clone(),
        }
    }

    /// Human-readable label, e.g. `"Paris, France"`.
    ///
    /// The region is skipped when empty or when it only repeats the name.
    pub fn label(&self) -> String {
        let mut label = self.name.clone();
        if !self.region.is_empty() && self.name.to_lowercase() != self.region.to_lowercase() {
            label.push_str(", ");
            label.push_str(&self.region);
        }
        label.push_str(", ");
        label.push_str(&self.country);
        label
    }
}

/// Uniqueness key for saved locations. Exact, case-sensitive match on all three parts.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocationIdentity {
    pub name: String,
    pub region: String,
    pub country: String,
}

impl LocationIdentity {
    pub fn new(
        name: impl Into<String>,
        region: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        Self { name: name.into(), region: region.into(), country: country.into() }
    }
}

/// Current conditions at one location, as reported by the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherObservation {
    pub location: Location,
    pub condition_text: String,
    pub condition_code: i64,
    pub temperature_c: f64,
    pub temperature_f: f64,
    pub last_updated: Option<DateTime<Utc>>,
}

impl WeatherObservation {
    pub fn identity(&self) -> LocationIdentity {
        self.location.identity()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    pub fn toggle(self) -> Self {
        match self {
            TemperatureUnit::Celsius => TemperatureUnit::Fahrenheit,
            TemperatureUnit::Fahrenheit => TemperatureUnit::Celsius,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "°C",
            TemperatureUnit::Fahrenheit => "°F",
        }
    }

    /// Picks the provider-supplied reading for this unit; nothing is converted locally.
    pub fn reading(&self, observation: &WeatherObservation) -> f64 {
        match self {
            TemperatureUnit::Celsius => observation.temperature_c,
            TemperatureUnit::Fahrenheit => observation.temperature_f,
        }
    }

    pub fn format(&self, observation: &WeatherObservation) -> String {
        format!("{:.1}{}", self.reading(observation), self.symbol())
    }
}

impl fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemperatureUnit::Celsius => f.write_str("celsius"),
            TemperatureUnit::Fahrenheit => f.write_str("fahrenheit"),
        }
    }
}

impl FromStr for TemperatureUnit {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "c" | "celsius" => Ok(TemperatureUnit::Celsius),
            "f" | "fahrenheit" => Ok(TemperatureUnit::Fahrenheit),
            _ => Err(anyhow::anyhow!(
                "Unknown temperature unit '{value}'. Supported units: c, celsius, f, fahrenheit."
            )),
        }
    }
}
