//! Nominatim geocoding with a static fallback table

use std::fmt;
use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::GeoError;
use crate::config::GeocodingConfig;

/// A point on the globe in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.lat, self.lon)
    }
}

/// Paris, used when nothing better is known
pub const DEFAULT_COORDINATES: Coordinates = Coordinates {
    lat: 48.8566,
    lon: 2.3522,
};

/// Matched by case-insensitive substring, in this order
const KNOWN_CITIES: &[(&str, Coordinates)] = &[
    ("paris", Coordinates { lat: 48.8566, lon: 2.3522 }),
    ("london", Coordinates { lat: 51.5074, lon: -0.1278 }),
    ("new york", Coordinates { lat: 40.7128, lon: -74.0060 }),
    ("tokyo", Coordinates { lat: 35.6762, lon: 139.6503 }),
    ("rome", Coordinates { lat: 41.9028, lon: 12.4964 }),
    ("barcelona", Coordinates { lat: 41.3851, lon: 2.1734 }),
];

/// Where a set of coordinates came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CoordinateSource {
    /// Answered by the geocoding service
    Lookup,
    /// Found in the built-in city table
    Table,
    /// Nothing matched; [`DEFAULT_COORDINATES`]
    Default,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Located {
    pub coords: Coordinates,
    pub source: CoordinateSource,
}

#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
}

/// Nominatim client
pub struct Geocoder {
    base_url: String,
    http: Client,
}

impl Geocoder {
    pub fn new(config: &GeocodingConfig) -> Result<Self, GeoError> {
        debug!(base_url = %config.base_url, "Geocoder::new: called");
        let http = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    /// Resolve a place name, never failing
    ///
    /// An empty search result falls back to the city table and then to the
    /// default; a failed request goes straight to the default.
    pub async fn coordinates(&self, location: &str) -> Located {
        debug!(%location, "coordinates: called");
        match self.lookup(location).await {
            Ok(Some(coords)) => Located {
                coords,
                source: CoordinateSource::Lookup,
            },
            Ok(None) => {
                debug!(%location, "coordinates: no search results");
                resolve_offline(location)
            }
            Err(e) => {
                warn!(%location, error = %e, "Error getting coordinates");
                Located {
                    coords: DEFAULT_COORDINATES,
                    source: CoordinateSource::Default,
                }
            }
        }
    }

    /// Single Nominatim search; `Ok(None)` when the service knows no such place
    pub async fn lookup(&self, location: &str) -> Result<Option<Coordinates>, GeoError> {
        let url = format!("{}/search", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[("q", location), ("format", "json"), ("limit", "1")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeoError::Status(status.as_u16()));
        }

        let places: Vec<NominatimPlace> = response.json().await?;
        first_place(places)
    }
}

fn first_place(places: Vec<NominatimPlace>) -> Result<Option<Coordinates>, GeoError> {
    let Some(place) = places.into_iter().next() else {
        return Ok(None);
    };
    let parse = |value: &str, field: &str| {
        value
            .trim()
            .parse::<f64>()
            .map_err(|_| GeoError::InvalidResponse(format!("{} is not a number: {:?}", field, value)))
    };
    Ok(Some(Coordinates {
        lat: parse(&place.lat, "lat")?,
        lon: parse(&place.lon, "lon")?,
    }))
}

/// Resolve a place name without the network: city table, then the default
pub fn resolve_offline(location: &str) -> Located {
    let needle = location.to_lowercase();
    KNOWN_CITIES
        .iter()
        .find(|(city, _)| needle.contains(city))
        .map(|(_, coords)| Located {
            coords: *coords,
            source: CoordinateSource::Table,
        })
        .unwrap_or(Located {
            coords: DEFAULT_COORDINATES,
            source: CoordinateSource::Default,
        })
}
