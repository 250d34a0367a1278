//! Geocoding errors.

use thiserror::Error;

/// Errors that can occur when resolving coordinates to an address.
#[derive(Debug, Error)]
pub enum GeocodingError {
    /// Latitude or longitude is out of range.
    #[error("invalid coordinates: {lat}, {lon}")]
    InvalidCoordinates { lat: f64, lon: f64 },

    /// The provider has no address for the coordinates.
    #[error("no address found: {0}")]
    NotFound(String),

    /// An HTTP transport or deserialization error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider returned a non-2xx response.
    #[error("unexpected response from geocoder: {0}")]
    UnexpectedResponse(String),
}
