//! Alero
//!
//! Storefront domain engine for a polycarbonate sheeting retailer: dispatch scheduling,
//! the shopping cart, catalogue search, project estimates and checkout validation.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod dispatch;
pub mod estimates;
pub mod prelude;
pub mod pricing;
pub mod search;
