//! Geocoding and place-name extraction
//!
//! Coordinates come from Nominatim when it answers, otherwise from a small
//! table of well-known cities. Lookups never fail outright; the caller is told
//! where the coordinates came from instead.

mod error;
mod geocode;
mod locations;

pub use error::GeoError;
pub use geocode::{Coordinates, CoordinateSource, DEFAULT_COORDINATES, Geocoder, Located, resolve_offline};
pub use locations::extract_locations;
