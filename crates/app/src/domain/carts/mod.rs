//! Carts

pub mod errors;
pub mod records;
pub mod service;

pub use errors::CartsServiceError;
pub use service::*;
