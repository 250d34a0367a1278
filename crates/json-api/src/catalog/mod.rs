//! Catalog

pub(crate) mod featured;
pub(crate) mod models;
pub(crate) mod search;
