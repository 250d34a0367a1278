//! Storefront application services: carts, catalog, checkout and the
//! upstream HTTP integrations they depend on.

pub mod context;
pub mod domain;
pub mod geocoding;
pub mod payments;

mod uuids;
