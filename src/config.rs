//! Command-line configuration

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tui_dispatch_debug::DebugCliArgs;

use crate::api::{ApiConfig, DEFAULT_LANGUAGE, DEFAULT_TIMEOUT_SECS, FORECAST_URL, GEOCODING_URL};

/// Forecast Chart - hourly temperature forecast in the terminal
#[derive(Parser, Debug)]
#[command(name = "forecast-chart")]
#[command(about = "Chart a city's hourly temperature forecast (Open-Meteo)")]
pub struct Args {
    /// City to search for on startup
    #[arg(long, short)]
    pub city: Option<String>,

    /// Language for geocoding results
    #[arg(long, default_value = DEFAULT_LANGUAGE)]
    pub language: String,

    /// Geocoding endpoint
    #[arg(long, default_value = GEOCODING_URL)]
    pub geocoding_url: String,

    /// Forecast endpoint
    #[arg(long, default_value = FORECAST_URL)]
    pub forecast_url: String,

    /// HTTP timeout in seconds (minimum 1)
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_secs: u64,

    /// Write logs to this file (RUST_LOG filters, default "info")
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    #[command(flatten)]
    pub debug: DebugCliArgs,
}

impl Args {
    pub fn api_config(&self) -> ApiConfig {
        ApiConfig {
            geocoding_url: self.geocoding_url.clone(),
            forecast_url: self.forecast_url.clone(),
            language: self.language.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }

    /// The startup city, if it is not blank.
    pub fn initial_city(&self) -> Option<String> {
        self.city
            .as_deref()
            .map(str::trim)
            .filter(|city| !city.is_empty())
            .map(str::to_string)
    }
}
