//! Errors

use salvo::http::StatusError;
use tracing::error;

use alero_app::domain::{carts::CartsServiceError, checkout::CheckoutServiceError};

/// Map checkout failures other than form validation, which is answered with field errors.
pub(crate) fn into_status_error(error: CheckoutServiceError) -> StatusError {
    match error {
        CheckoutServiceError::InvalidForm(errors) => {
            StatusError::bad_request().brief(errors.to_string())
        }
        CheckoutServiceError::EmptyCart => StatusError::bad_request().brief("Cart is empty"),
        CheckoutServiceError::Cart(CartsServiceError::NotFound) => {
            StatusError::not_found().brief("Cart not found")
        }
        CheckoutServiceError::Cart(source) => {
            error!("failed to load cart for checkout: {source}");

            StatusError::internal_server_error()
        }
        CheckoutServiceError::Dispatch(source) => {
            error!("failed to schedule dispatch: {source}");

            StatusError::internal_server_error()
        }
        CheckoutServiceError::Payment(source) => {
            error!("payment provider failed: {source}");

            StatusError::bad_gateway().brief("Payment provider unavailable")
        }
    }
}
