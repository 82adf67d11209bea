//! OpenWeather client

use std::time::Duration;

use reqwest::{Client, Response};
use serde::Deserialize;
use tracing::{debug, info, warn};

use super::WeatherError;
use super::forecast::{Forecast, RawForecast, summarize_forecast};
use crate::config::WeatherConfig;

/// The free forecast endpoint covers five days of 3-hourly entries
pub const MAX_FORECAST_DAYS: u32 = 5;

/// Forecast entries per day
const ENTRIES_PER_DAY: u32 = 8;

pub const WEATHER_UNAVAILABLE: &str = "Weather information not available";

#[derive(Debug, Deserialize)]
struct GeoPlace {
    lat: f64,
    lon: f64,
}

pub struct WeatherService {
    config: WeatherConfig,
    api_key: Option<String>,
    http: Client,
}

impl WeatherService {
    /// Create a service reading its API key from the configured variable
    pub fn from_config(config: &WeatherConfig) -> Result<Self, WeatherError> {
        Self::new(config, config.api_key())
    }

    pub fn new(config: &WeatherConfig, api_key: Option<String>) -> Result<Self, WeatherError> {
        debug!(base_url = %config.base_url, has_key = api_key.is_some(), "WeatherService::new: called");
        let http = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;

        Ok(Self {
            config: config.clone(),
            api_key,
            http,
        })
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Forecast for a destination, `days` clamped to 1..=5
    ///
    /// `Ok(None)` when no API key is configured or the destination is
    /// unknown to the weather service.
    pub async fn forecast(&self, destination: &str, days: u32) -> Result<Option<Forecast>, WeatherError> {
        debug!(%destination, days, "forecast: called");
        let Some(api_key) = self.api_key.as_deref() else {
            debug!("forecast: no API key, skipping");
            return Ok(None);
        };

        let response = self
            .http
            .get(&self.config.geo_url)
            .query(&[("q", destination), ("limit", "1"), ("appid", api_key)])
            .send()
            .await?;
        let places: Vec<GeoPlace> = check(response).await?.json().await?;
        let Some(place) = places.into_iter().next() else {
            info!(%destination, "Weather service does not know destination");
            return Ok(None);
        };

        let count = days.clamp(1, MAX_FORECAST_DAYS) * ENTRIES_PER_DAY;
        let url = format!("{}/forecast", self.config.base_url.trim_end_matches('/'));
        let response = self
            .http
            .get(&url)
            .query(&[
                ("lat", place.lat.to_string()),
                ("lon", place.lon.to_string()),
                ("appid", api_key.to_string()),
                ("units", self.config.units.as_query().to_string()),
                ("cnt", count.to_string()),
            ])
            .send()
            .await?;
        let raw: RawForecast = check(response).await?.json().await?;

        let forecast = summarize_forecast(&raw, self.config.units);
        debug!(location = %forecast.location, days = forecast.days.len(), "forecast: summarized");
        Ok(Some(forecast))
    }

    /// Forecast summary for the configured number of days
    ///
    /// Errors are logged and reported as [`WEATHER_UNAVAILABLE`].
    pub async fn summary(&self, destination: &str) -> String {
        match self.forecast(destination, self.config.days).await {
            Ok(Some(forecast)) => forecast.summary(),
            Ok(None) => WEATHER_UNAVAILABLE.to_string(),
            Err(e) => {
                warn!(%destination, error = %e, "Weather service error");
                WEATHER_UNAVAILABLE.to_string()
            }
        }
    }
}

async fn check(response: Response) -> Result<Response, WeatherError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().await.unwrap_or_default();
    Err(WeatherError::Api {
        status: status.as_u16(),
        message,
    })
}
