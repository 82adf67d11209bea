//! Weather error types

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Weather API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Invalid weather response: {0}")]
    InvalidResponse(String),
}
