//! Payment provider integration.

mod errors;
pub mod gateway;

pub use errors::PaymentError;
pub use gateway::*;
