//! Errors

use salvo::http::StatusError;
use tracing::debug;

use alero_app::domain::carts::CartsServiceError;

pub(crate) fn into_status_error(error: CartsServiceError) -> StatusError {
    debug!("cart request failed: {error}");

    match error {
        CartsServiceError::AlreadyExists => StatusError::conflict().brief("Cart already exists"),
        CartsServiceError::NotFound => StatusError::not_found().brief("Cart not found"),
        CartsServiceError::LineNotFound => StatusError::not_found().brief("Cart line not found"),
    }
}
