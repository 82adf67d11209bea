//! Geocoding error types

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeoError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Geocoding service returned status {0}")]
    Status(u16),

    #[error("Invalid geocoding response: {0}")]
    InvalidResponse(String),
}
