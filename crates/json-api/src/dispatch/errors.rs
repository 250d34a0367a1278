//! Errors

use salvo::http::StatusError;
use tracing::error;

use alero::dispatch::DispatchError;

pub(crate) fn into_status_error(error: DispatchError) -> StatusError {
    error!("failed to resolve dispatch date: {error}");

    StatusError::internal_server_error().brief("Dispatch date could not be resolved")
}
