//! Weather forecasts from OpenWeather
//!
//! Weather is optional: without an API key every lookup quietly reports that
//! no forecast is available.

mod error;
mod forecast;
mod service;

pub use error::WeatherError;
pub use forecast::{DayForecast, Forecast, RawForecast, summarize_forecast};
pub use service::{MAX_FORECAST_DAYS, WEATHER_UNAVAILABLE, WeatherService};
