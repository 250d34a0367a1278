//! Geocoding

mod errors;
pub(crate) mod reverse;
