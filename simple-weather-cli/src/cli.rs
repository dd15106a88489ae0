use std::fmt;

use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{CustomType, InquireError, Password, PasswordDisplayMode, Select, Text};
use simple_weather_core::{
    Config, FetchError, LocationQuery, TemperatureUnit, WeatherApiProvider, WeatherReport,
    WeatherSession, provider_from_config,
};
use tracing::debug;

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "simple-weather", version, about = "Current weather, one location at a time")]
pub struct Cli {
    /// Log lookups and store decisions to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Enter the weatherapi.com API key and preferred unit.
    Configure,

    /// Show current weather for a place name, postcode or airport code.
    Show {
        /// Location search text.
        query: String,

        /// Temperature unit (c or f); defaults to the configured unit.
        #[arg(long)]
        unit: Option<TemperatureUnit>,
    },

    /// Show current weather at a coordinate pair.
    Here {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,

        #[arg(long, allow_negative_numbers = true)]
        lon: f64,

        /// Temperature unit (c or f); defaults to the configured unit.
        #[arg(long)]
        unit: Option<TemperatureUnit>,
    },

    /// Interactive session with unit toggle and a saved-locations list.
    Session,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { query, unit } => show_once(LocationQuery::text(query), unit).await,
            Command::Here { lat, lon, unit } => {
                show_once(LocationQuery::coordinates(lat, lon), unit).await
            }
            Command::Session => interactive().await,
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let mut prompt = Password::new("weatherapi.com API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation();
    if config.api_key.is_some() {
        prompt = prompt.with_help_message("Leave empty to keep the current key");
    }
    let key = prompt.prompt().context("Failed to read API key")?;
    if !key.trim().is_empty() || config.api_key.is_none() {
        config.set_api_key(key);
    }

    let units = vec![TemperatureUnit::Celsius, TemperatureUnit::Fahrenheit];
    let cursor = units.iter().position(|u| *u == config.unit).unwrap_or(0);
    config.unit = Select::new("Preferred unit:", units)
        .with_starting_cursor(cursor)
        .prompt()
        .context("Failed to read preferred unit")?;

    let path = config.save()?;
    println!("Saved configuration to {}", path.display());
    Ok(())
}

fn open_session(unit: Option<TemperatureUnit>) -> anyhow::Result<WeatherSession<WeatherApiProvider>> {
    let config = Config::load()?;
    let provider = provider_from_config(&config)?;
    Ok(WeatherSession::new(provider, unit.unwrap_or(config.unit)))
}

async fn show_once(query: LocationQuery, unit: Option<TemperatureUnit>) -> anyhow::Result<()> {
    let mut session = open_session(unit)?;
    let report = session.look_up(&query).await.map_err(lookup_failed)?;
    println!("{}", render::report(&report, session.unit()));
    Ok(())
}

fn lookup_failed(err: FetchError) -> anyhow::Error {
    let message = err.user_message();
    anyhow::Error::new(err).context(message)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuItem {
    Search,
    Coordinates,
    ToggleUnit,
    Saved,
    Quit,
}

impl MenuItem {
    const ALL: [MenuItem; 5] = [
        MenuItem::Search,
        MenuItem::Coordinates,
        MenuItem::ToggleUnit,
        MenuItem::Saved,
        MenuItem::Quit,
    ];
}

impl fmt::Display for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MenuItem::Search => "Search for a location",
            MenuItem::Coordinates => "Use coordinates",
            MenuItem::ToggleUnit => "Toggle °C / °F",
            MenuItem::Saved => "Saved locations",
            MenuItem::Quit => "Quit",
        })
    }
}

async fn interactive() -> anyhow::Result<()> {
    let mut session = open_session(None)?;
    let mut last: Option<WeatherReport> = None;

    loop {
        let choice = match Select::new("What next?", MenuItem::ALL.to_vec()).prompt() {
            Ok(choice) => choice,
            Err(err) if is_cancel(&err) => break,
            Err(err) => return Err(err).context("Failed to read menu choice"),
        };
        debug!(?choice, "menu selection");

        let query = match choice {
            MenuItem::Search => match Text::new("Location:").prompt() {
                Ok(text) => LocationQuery::text(text),
                Err(err) if is_cancel(&err) => continue,
                Err(err) => return Err(err).context("Failed to read location"),
            },
            MenuItem::Coordinates => match prompt_coordinates() {
                Ok(query) => query,
                Err(err) if is_cancel(&err) => continue,
                Err(err) => return Err(err).context("Failed to read coordinates"),
            },
            MenuItem::ToggleUnit => {
                let unit = session.toggle_unit();
                match &last {
                    Some(report) => println!("{}", render::report(report, unit)),
                    None => println!("Showing temperatures in {unit}."),
                }
                continue;
            }
            MenuItem::Saved => {
                println!("{}", render::saved(&session.saved_reports(), session.unit()));
                continue;
            }
            MenuItem::Quit => break,
        };

        match session.look_up(&query).await {
            Ok(report) => {
                println!("{}", render::report(&report, session.unit()));
                last = Some(report);
            }
            // A failed lookup keeps the previous report on screen.
            Err(err) => eprintln!("{}", err.user_message()),
        }
    }

    Ok(())
}

fn prompt_coordinates() -> Result<LocationQuery, InquireError> {
    let latitude = CustomType::<f64>::new("Latitude:")
        .with_error_message("Please enter a number, e.g. 48.8567")
        .prompt()?;
    let longitude = CustomType::<f64>::new("Longitude:")
        .with_error_message("Please enter a number, e.g. 2.3508")
        .prompt()?;
    Ok(LocationQuery::coordinates(latitude, longitude))
}

fn is_cancel(err: &InquireError) -> bool {
    matches!(err, InquireError::OperationCanceled | InquireError::OperationInterrupted)
}
