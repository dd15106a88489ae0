//! One user's run of the app: a provider, the saved-locations list and the chosen unit.

use tracing::{debug, info};

use crate::{
    classifier::{Classification, classify},
    error::FetchError,
    model::{LocationQuery, TemperatureUnit, WeatherObservation},
    provider::WeatherProvider,
    store::LocationStore,
};

/// What the main screen shows after a successful lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReport {
    pub observation: WeatherObservation,
    pub classification: Classification,
    pub label: String,
    /// False when the location was already in the saved list.
    pub newly_saved: bool,
}

impl WeatherReport {
    fn new(observation: WeatherObservation, newly_saved: bool) -> Self {
        let classification = classify(&observation.condition_text);
        let label = observation.location.label();
        Self { observation, classification, label, newly_saved }
    }

    pub fn temperature(&self, unit: TemperatureUnit) -> String {
        unit.format(&self.observation)
    }
}

#[derive(Debug)]
pub struct WeatherSession<P> {
    provider: P,
    store: LocationStore,
    unit: TemperatureUnit,
}

impl<P: WeatherProvider> WeatherSession<P> {
    pub fn new(provider: P, unit: TemperatureUnit) -> Self {
        Self { provider, store: LocationStore::new(), unit }
    }

    /// Fetches current weather and saves the location.
    ///
    /// On failure the saved list is left untouched.
    pub async fn look_up(&mut self, query: &LocationQuery) -> Result<WeatherReport, FetchError> {
        debug!(query = %query, "looking up weather");
        let observation = self.provider.current_weather(query).await?;

        let newly_saved = self.store.record_observation(observation.clone());
        let report = WeatherReport::new(observation, newly_saved);
        info!(
            location = %report.label,
            icon = %report.classification.icon,
            newly_saved,
            "weather lookup succeeded"
        );

        Ok(report)
    }

    pub fn unit(&self) -> TemperatureUnit {
        self.unit
    }

    pub fn set_unit(&mut self, unit: TemperatureUnit) {
        self.unit = unit;
    }

    pub fn toggle_unit(&mut self) -> TemperatureUnit {
        self.unit = self.unit.toggle();
        self.unit
    }

    pub fn saved(&self) -> &LocationStore {
        &self.store
    }

    /// Saved locations in insertion order, classified for display.
    pub fn saved_reports(&self) -> Vec<WeatherReport> {
        self.store.iter().cloned().map(|obs| WeatherReport::new(obs, false)).collect()
    }
}
