//! Estimates

mod errors;
pub(crate) mod create;
