//! Catalog

pub mod client;
pub mod errors;
pub mod service;

pub use client::*;
pub use errors::CatalogError;
pub use service::*;
