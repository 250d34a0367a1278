//! Dispatch

mod errors;
pub(crate) mod quote;
