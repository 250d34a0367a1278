//! Errors

use salvo::http::StatusError;

use alero::estimates::EstimateError;

pub(crate) fn into_status_error(error: EstimateError) -> StatusError {
    match error {
        EstimateError::InvalidDimension => {
            StatusError::bad_request().brief("Width and length must be positive")
        }
        EstimateError::InvalidPrice => {
            StatusError::bad_request().brief("Price per square metre must be positive")
        }
        EstimateError::Overflow => StatusError::bad_request().brief("Project is too large to estimate"),
    }
}
