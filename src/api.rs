//! Open-Meteo API client

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::state::{ForecastReport, ForecastSeries, GeoResult};
use crate::transform;

pub const GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";
pub const FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";
pub const DEFAULT_LANGUAGE: &str = "es";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

pub const NOT_FOUND_MESSAGE: &str = "City not found. Try another name.";

#[derive(thiserror::Error, Debug)]
pub enum ForecastError {
    #[error("{}", NOT_FOUND_MESSAGE)]
    NotFound(String),
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("{reason} (HTTP {status})")]
    Api { status: u16, reason: String },
    #[error("invalid response: {0}")]
    Parse(String),
}

/// Endpoints and request options
#[derive(Clone, Debug, PartialEq)]
pub struct ApiConfig {
    pub geocoding_url: String,
    pub forecast_url: String,
    pub language: String,
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            geocoding_url: GEOCODING_URL.to_string(),
            forecast_url: FORECAST_URL.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

// ============================================================================
// Wire models
// ============================================================================

#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    results: Option<Vec<GeocodingResult>>,
}

#[derive(Debug, Deserialize)]
struct GeocodingResult {
    name: String,
    latitude: f64,
    longitude: f64,
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    hourly: Option<HourlyBlock>,
}

#[derive(Debug, Deserialize)]
struct HourlyBlock {
    time: Option<Vec<String>>,
    temperature_2m: Option<Vec<Option<f64>>>,
}

/// Open-Meteo error body: `{"error": true, "reason": "..."}`
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    reason: String,
}

fn place_from_result(result: GeocodingResult) -> GeoResult {
    GeoResult {
        latitude: result.latitude,
        longitude: result.longitude,
        name: result.name,
        country: result.country,
    }
}

fn first_place(city: &str, response: GeocodingResponse) -> Result<GeoResult, ForecastError> {
    response
        .results
        .and_then(|results| results.into_iter().next())
        .map(place_from_result)
        .ok_or_else(|| ForecastError::NotFound(city.to_string()))
}

fn series_from_response(response: ForecastResponse) -> Result<ForecastSeries, ForecastError> {
    let hourly = response
        .hourly
        .ok_or_else(|| ForecastError::Parse("missing hourly block".into()))?;
    let timestamps = hourly
        .time
        .ok_or_else(|| ForecastError::Parse("missing hourly.time".into()))?;
    let raw = hourly
        .temperature_2m
        .ok_or_else(|| ForecastError::Parse("missing hourly.temperature_2m".into()))?;

    if raw.len() != timestamps.len() {
        return Err(ForecastError::Parse(format!(
            "{} timestamps but {} temperatures",
            timestamps.len(),
            raw.len()
        )));
    }

    let temperatures = raw
        .into_iter()
        .enumerate()
        .map(|(i, value)| {
            value.ok_or_else(|| {
                ForecastError::Parse(format!("no temperature for {}", timestamps[i]))
            })
        })
        .collect::<Result<Vec<f64>, _>>()?;

    Ok(ForecastSeries {
        timestamps,
        temperatures,
    })
}

// ============================================================================
// Client
// ============================================================================

/// Geocoding + forecast client sharing one HTTP connection pool
#[derive(Clone, Debug)]
pub struct ForecastClient {
    http: reqwest::Client,
    config: ApiConfig,
}

impl ForecastClient {
    pub fn new(config: ApiConfig) -> Result<Self, ForecastError> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { http, config })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ForecastError> {
        tracing::debug!(%url, "GET");
        let response = self.http.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let fallback = status.canonical_reason().unwrap_or("unknown error");
            let reason = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|b| b.reason)
                .unwrap_or_else(|_| fallback.to_string());
            return Err(ForecastError::Api {
                status: status.as_u16(),
                reason,
            });
        }

        serde_json::from_str(&body).map_err(|e| ForecastError::Parse(e.to_string()))
    }

    /// Resolve a city name to its first geocoding match
    pub async fn geocode(&self, city: &str) -> Result<GeoResult, ForecastError> {
        let url = format!(
            "{}?name={}&count=1&language={}&format=json",
            self.config.geocoding_url,
            urlencoding::encode(city),
            urlencoding::encode(&self.config.language)
        );
        let response: GeocodingResponse = self.get_json(&url).await?;
        first_place(city, response)
    }

    /// Hourly 2m temperatures, in the location's own timezone
    pub async fn hourly_temperatures(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<ForecastSeries, ForecastError> {
        let url = format!(
            "{}?latitude={}&longitude={}&hourly=temperature_2m&timezone=auto",
            self.config.forecast_url, latitude, longitude
        );
        let response: ForecastResponse = self.get_json(&url).await?;
        series_from_response(response)
    }

    /// Geocode, fetch, and label: the whole search minus the UI.
    pub async fn fetch_report(&self, city: &str) -> Result<ForecastReport, ForecastError> {
        let place = self.geocode(city).await?;
        tracing::info!(
            place = %place.display_name(),
            lat = place.latitude,
            lon = place.longitude,
            "geocoded"
        );

        let series = self
            .hourly_temperatures(place.latitude, place.longitude)
            .await?;
        tracing::debug!(points = series.len(), "forecast received");

        let labels = transform::chart_labels(&series.timestamps)?;
        Ok(ForecastReport {
            place,
            labels,
            temperatures: series.temperatures,
        })
    }
}
