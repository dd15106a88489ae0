//! Core library for the `simple-weather` client.
//!
//! This crate defines:
//! - Condition classification (provider text to icon and palette)
//! - The saved-locations store
//! - The weatherapi.com client and configuration handling
//! - Shared domain models and the session controller that ties them together
//!
//! It is used by `simple-weather-cli`, but can also be reused by other front ends.

pub mod classifier;
pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod session;
pub mod store;

pub use classifier::{Classification, Color, Icon, Palette, classify};
pub use config::Config;
pub use error::FetchError;
pub use model::{Location, LocationIdentity, LocationQuery, TemperatureUnit, WeatherObservation};
pub use provider::{WeatherProvider, provider_from_config, weatherapi::WeatherApiProvider};
pub use session::{WeatherReport, WeatherSession};
pub use store::LocationStore;
