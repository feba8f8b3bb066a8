//! Open-Meteo forecast client.
//!
//! One fixed location (Tula), one endpoint, no API key required.

use std::time::Duration;

use serde::Deserialize;
use tracing::instrument;

use crate::error::FetchError;
use crate::types::DailyForecast;

const OPEN_METEO_BASE: &str = "https://api.open-meteo.com";
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Tula city center.
pub const LATITUDE: f64 = 54.192;
pub const LONGITUDE: f64 = 37.6175;
pub const TIMEZONE: &str = "Europe/Moscow";

const DAILY_FIELDS: &str =
    "temperature_2m_max,temperature_2m_min,precipitation_sum,weathercode,windspeed_10m_max";

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    daily: Option<DailyForecast>,
}

#[derive(Debug, Clone)]
pub struct WeatherClient {
    client: reqwest::Client,
    base_url: String,
}

impl WeatherClient {
    /// Create a client against the public Open-Meteo API.
    ///
    /// # Errors
    /// Returns `FetchError::Network` if the underlying HTTP client cannot be
    /// built.
    pub fn new() -> Result<Self, FetchError> {
        Self::with_base_url(OPEN_METEO_BASE)
    }

    /// Create a client against a custom endpoint (tests, self-hosted
    /// Open-Meteo instances).
    ///
    /// # Errors
    /// Returns `FetchError::Network` if the underlying HTTP client cannot be
    /// built.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Fetch the daily forecast for the fixed location.
    ///
    /// # Errors
    /// `Network` on connection failure or timeout, `BadStatus` on a non-2xx
    /// response, `MalformedPayload` when the body is not valid JSON, and
    /// `MissingDaily` when the response has no `daily` section.
    #[instrument(skip(self), level = "info")]
    pub async fn fetch_forecast(&self) -> Result<DailyForecast, FetchError> {
        let url = format!("{}/v1/forecast", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("latitude", LATITUDE.to_string()),
                ("longitude", LONGITUDE.to_string()),
                ("daily", DAILY_FIELDS.to_string()),
                ("timezone", TIMEZONE.to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::BadStatus(status));
        }

        let body: ForecastResponse = response.json().await.map_err(|e| {
            if e.is_decode() {
                FetchError::MalformedPayload(e.to_string())
            } else {
                FetchError::Network(e)
            }
        })?;

        body.daily.ok_or(FetchError::MissingDaily)
    }
}
