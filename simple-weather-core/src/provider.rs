use async_trait::async_trait;
use std::fmt::Debug;

use crate::{Config, FetchError, LocationQuery, WeatherObservation, provider::weatherapi::WeatherApiProvider};

pub mod weatherapi;

/// Resolves a location query to the current conditions there.
///
/// Each call is one request: no retries, no caching.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current_weather(&self, query: &LocationQuery) -> Result<WeatherObservation, FetchError>;
}

/// Construct the weatherapi.com provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<WeatherApiProvider> {
    let api_key = config.resolved_api_key().ok_or_else(|| {
        anyhow::anyhow!(
            "No API key configured for weatherapi.com.\n\
                 Hint: run `simple-weather configure` or set {}.",
            crate::config::API_KEY_ENV
        )
    })?;

    let provider = match config.base_url.as_deref() {
        Some(url) => WeatherApiProvider::with_base_url(api_key, url),
        None => WeatherApiProvider::new(api_key),
    };

    Ok(provider)
}
