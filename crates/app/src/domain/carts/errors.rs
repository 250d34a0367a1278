//! Carts service errors.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartsServiceError {
    #[error("cart already exists")]
    AlreadyExists,

    #[error("cart not found")]
    NotFound,

    #[error("cart line not found")]
    LineNotFound,
}
