//! Checkout Handler

use std::sync::Arc;

use alero::checkout::{CheckoutForm, FieldErrors};
use alero_app::domain::checkout::{CheckoutRedirect, CheckoutServiceError};
use jiff::Timestamp;
use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::{
    checkout::errors::into_status_error,
    extensions::*,
    observability::{CheckoutOutcome, record_checkout},
    state::State,
};

/// Checkout Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CheckoutRequest {
    /// Cart to check out
    pub cart: Uuid,

    /// Full name
    pub name: String,

    /// Contact email
    pub email: String,

    /// Contact phone
    pub phone: String,

    /// Street address
    pub address: String,

    /// Commune
    pub commune: String,

    /// Region
    pub region: String,

    /// Delivery notes
    #[serde(default)]
    pub notes: Option<String>,
}

impl CheckoutRequest {
    fn into_parts(self) -> (Uuid, CheckoutForm) {
        (
            self.cart,
            CheckoutForm {
                name: self.name,
                email: self.email,
                phone: self.phone,
                address: self.address,
                commune: self.commune,
                region: self.region,
                notes: self.notes,
            },
        )
    }
}

/// Payment redirect issued for a valid checkout
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RedirectResponse {
    /// Where to send the buyer
    pub url: String,

    /// Dispatch date (`YYYY-MM-DD`)
    pub dispatch_date: String,

    /// Human-readable dispatch date and window
    pub dispatch_label: String,
}

impl From<CheckoutRedirect> for RedirectResponse {
    fn from(redirect: CheckoutRedirect) -> Self {
        Self {
            dispatch_date: redirect.dispatch.date.to_string(),
            dispatch_label: redirect.dispatch.label(),
            url: redirect.url,
        }
    }
}

/// A rejected form field
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct FieldErrorResponse {
    /// Field name as submitted
    pub field: String,

    /// Message shown next to the field
    pub message: String,
}

/// Field errors for an invalid checkout form
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct InvalidFormResponse {
    /// Every invalid field, in form order
    pub errors: Vec<FieldErrorResponse>,
}

impl From<&FieldErrors> for InvalidFormResponse {
    fn from(errors: &FieldErrors) -> Self {
        Self {
            errors: errors
                .errors()
                .iter()
                .map(|error| FieldErrorResponse {
                    field: error.field.clone(),
                    message: error.message.clone(),
                })
                .collect(),
        }
    }
}

/// Checkout Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub(crate) enum CheckoutResponse {
    /// The order was registered with the payment provider
    Redirect(RedirectResponse),

    /// The buyer form has invalid fields
    Invalid(InvalidFormResponse),
}

/// Checkout Handler
///
/// Validates the buyer form, schedules dispatch and returns the payment redirect.
/// The cart is kept until payment completes.
#[endpoint(
    tags("checkout"),
    summary = "Check out a cart",
    responses(
        (status_code = StatusCode::OK, description = "Payment redirect"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Invalid form fields"),
        (status_code = StatusCode::BAD_REQUEST, description = "Cart is empty"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart not found"),
        (status_code = StatusCode::BAD_GATEWAY, description = "Payment provider unavailable"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CheckoutRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CheckoutResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let (cart, form) = json.into_inner().into_parts();

    match state
        .app
        .checkout
        .checkout(cart.into(), form, Timestamp::now())
        .await
    {
        Ok(redirect) => {
            record_checkout(CheckoutOutcome::Redirected);

            Ok(Json(CheckoutResponse::Redirect(redirect.into())))
        }
        Err(CheckoutServiceError::InvalidForm(errors)) => {
            record_checkout(CheckoutOutcome::InvalidForm);

            res.status_code(StatusCode::UNPROCESSABLE_ENTITY);

            Ok(Json(CheckoutResponse::Invalid((&errors).into())))
        }
        Err(error) => {
            record_checkout(CheckoutOutcome::Failed);

            warn!(request_id = depot.request_id(), cart = %cart, "checkout failed: {error}");

            Err(into_status_error(error))
        }
    }
}
