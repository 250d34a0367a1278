//! Errors

use salvo::http::StatusError;
use tracing::{debug, error};

use alero_app::geocoding::GeocodingError;

pub(crate) fn into_status_error(error: GeocodingError) -> StatusError {
    match error {
        GeocodingError::InvalidCoordinates { .. } => {
            StatusError::bad_request().brief("Latitude or longitude is out of range")
        }
        GeocodingError::NotFound(reason) => {
            debug!("no address for coordinates: {reason}");

            StatusError::not_found().brief("No address found for these coordinates")
        }
        GeocodingError::Http(source) => {
            error!("geocoder request failed: {source}");

            StatusError::bad_gateway()
        }
        GeocodingError::UnexpectedResponse(reason) => {
            error!("geocoder answered unexpectedly: {reason}");

            StatusError::bad_gateway()
        }
    }
}
