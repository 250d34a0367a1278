//! Reverse geocoding for the checkout address form.

mod errors;
pub mod nominatim;

pub use errors::GeocodingError;
pub use nominatim::*;
