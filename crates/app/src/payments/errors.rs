//! Payment errors.

use thiserror::Error;

/// Errors that can occur when requesting a payment redirect.
#[derive(Debug, Error)]
pub enum PaymentError {
    /// The provider refused to create the payment.
    #[error("payment rejected: {0}")]
    Rejected(String),

    /// An HTTP transport or deserialization error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider returned a non-2xx response or an unexpected body.
    #[error("unexpected response from payment provider: {0}")]
    UnexpectedResponse(String),
}
