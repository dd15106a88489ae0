use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::{
    error::FetchError,
    model::{Location, LocationQuery, WeatherObservation},
};

use super::WeatherProvider;

pub const DEFAULT_BASE_URL: &str = "https://api.weatherapi.com/v1";

#[derive(Debug, Clone)]
pub struct WeatherApiProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl WeatherApiProvider {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(api_key: impl Into<String>, base_url: &str) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn fetch_current(&self, query: &LocationQuery) -> Result<WeatherObservation, FetchError> {
        query.validate().map_err(FetchError::InvalidQuery)?;

        let url = format!("{}/current.json", self.base_url);
        let q = query.to_param();
        debug!(%url, q = %q, "requesting current weather");

        let res = self
            .http
            .get(&url)
            .query(&[("key", self.api_key.as_str()), ("q", q.as_str())])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;
        debug!(status = status.as_u16(), bytes = body.len(), "weather service responded");

        decode_current(status, &body)
    }
}

#[async_trait]
impl WeatherProvider for WeatherApiProvider {
    async fn current_weather(&self, query: &LocationQuery) -> Result<WeatherObservation, FetchError> {
        let result = self.fetch_current(query).await;
        if let Err(err) = &result {
            warn!(query = %query, error = %err, "current weather lookup failed");
        }
        result
    }
}

/// Turns a `current.json` response into an observation, or the reason it can't be one.
pub fn decode_current(status: StatusCode, body: &str) -> Result<WeatherObservation, FetchError> {
    if !status.is_success() {
        // The service reports unknown locations and bad keys as 4xx with an `error` object.
        if let Ok(WaResponse { error: Some(err), .. }) = serde_json::from_str::<WaResponse>(body) {
            return Err(err.into());
        }
        return Err(FetchError::Status { status: status.as_u16(), body: truncate_body(body) });
    }

    let parsed: WaResponse = serde_json::from_str(body)?;

    if let Some(err) = parsed.error {
        return Err(err.into());
    }

    let (Some(location), Some(current)) = (parsed.location, parsed.current) else {
        return Err(FetchError::Incomplete);
    };

    Ok(WeatherObservation {
        location: Location::new(location.name, location.region, location.country),
        condition_text: current.condition.text,
        condition_code: current.condition.code,
        temperature_c: current.temp_c,
        temperature_f: current.temp_f,
        last_updated: current.last_updated_epoch.and_then(unix_to_utc),
    })
}

#[derive(Debug, Deserialize)]
struct WaLocation {
    name: String,
    region: String,
    country: String,
}

#[derive(Debug, Deserialize)]
struct WaCondition {
    text: String,
    code: i64,
}

#[derive(Debug, Deserialize)]
struct WaCurrent {
    temp_c: f64,
    temp_f: f64,
    condition: WaCondition,
    last_updated_epoch: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct WaError {
    code: i64,
    message: String,
}

impl From<WaError> for FetchError {
    fn from(err: WaError) -> Self {
        FetchError::Provider { code: err.code, message: err.message }
    }
}

#[derive(Debug, Deserialize)]
struct WaResponse {
    location: Option<WaLocation>,
    current: Option<WaCurrent>,
    error: Option<WaError>,
}

fn unix_to_utc(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(ts, 0)
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PARIS: &str = r#"{
        "location": {"name": "Paris", "region": "Ile-de-France", "country": "France",
                     "lat": 48.87, "lon": 2.33, "localtime_epoch": 1720700000},
        "current": {"last_updated_epoch": 1720699200, "temp_c": 21.0, "temp_f": 69.8,
                    "is_day": 1, "condition": {"text": "Sunny", "icon": "//cdn/113.png", "code": 1000},
                    "wind_kph": 11.2}
    }"#;

    #[test]
    fn decodes_current_weather() {
        let obs = decode_current(StatusCode::OK, PARIS).expect("valid payload");

        assert_eq!(obs.location, Location::new("Paris", "Ile-de-France", "France"));
        assert_eq!(obs.condition_text, "Sunny");
        assert_eq!(obs.condition_code, 1000);
        assert_eq!(obs.temperature_c, 21.0);
        assert_eq!(obs.temperature_f, 69.8);
        assert_eq!(obs.last_updated.map(|t| t.timestamp()), Some(1720699200));
    }

    #[test]
    fn error_payload_is_rejected_even_on_success_status() {
        let body = r#"{"error": {"code": 2006, "message": "API key is invalid."}}"#;
        let err = decode_current(StatusCode::OK, body).unwrap_err();
        assert!(matches!(err, FetchError::Provider { code: 2006, .. }));
    }

    #[test]
    fn error_payload_on_client_error_status() {
        let body = r#"{"error": {"code": 1006, "message": "No matching location found."}}"#;
        let err = decode_current(StatusCode::BAD_REQUEST, body).unwrap_err();
        match err {
            FetchError::Provider { code, message } => {
                assert_eq!(code, 1006);
                assert_eq!(message, "No matching location found.");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn non_success_without_error_object() {
        let body = "x".repeat(500);
        let err = decode_current(StatusCode::BAD_GATEWAY, &body).unwrap_err();
        match err {
            FetchError::Status { status, body } => {
                assert_eq!(status, 502);
                assert_eq!(body.len(), 203);
                assert!(body.ends_with("..."));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn malformed_json_is_a_decode_error() {
        let err = decode_current(StatusCode::OK, "{\"location\": ").unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
    }

    #[test]
    fn missing_required_field_is_a_decode_error() {
        let body = r#"{"location": {"name": "Paris", "country": "France"},
                       "current": {"temp_c": 1.0, "temp_f": 33.8, "condition": {"text": "Mist", "code": 1030}}}"#;
        let err = decode_current(StatusCode::OK, body).unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
    }

    #[test]
    fn missing_sections_is_incomplete() {
        let err = decode_current(StatusCode::OK, "{}").unwrap_err();
        assert!(matches!(err, FetchError::Incomplete));
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let body = "é".repeat(300);
        let truncated = truncate_body(&body);
        assert_eq!(truncated.chars().count(), 203);
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let provider = WeatherApiProvider::with_base_url("KEY", "https://example.test/v1/");
        assert_eq!(provider.base_url(), "https://example.test/v1");
        assert_eq!(WeatherApiProvider::new("KEY").base_url(), DEFAULT_BASE_URL);
    }

    #[tokio::test]
    async fn invalid_query_fails_before_sending() {
        // Unroutable base URL: reaching the network would surface as Transport instead.
        let provider = WeatherApiProvider::with_base_url("KEY", "http://127.0.0.1:9");
        let err = provider.current_weather(&LocationQuery::text("  ")).await.unwrap_err();
        assert!(matches!(err, FetchError::InvalidQuery(_)));
    }
}
