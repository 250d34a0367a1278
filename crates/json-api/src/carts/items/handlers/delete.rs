//! Remove Cart Item Handler

use std::sync::Arc;

use alero::cart::LineId;
use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    carts::{errors::into_status_error, models::CartResponse},
    extensions::*,
    state::State,
};

/// Remove Cart Item Handler
#[endpoint(
    tags("carts"),
    summary = "Remove a cart line",
    responses(
        (status_code = StatusCode::OK, description = "Line removed, updated cart returned"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart or line not found"),
    ),
)]
pub(crate) async fn handler(
    cart: PathParam<Uuid>,
    item: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let cart = state
        .app
        .carts
        .remove_item(cart.into_inner().into(), LineId::from(item.into_inner()))
        .await
        .map_err(into_status_error)?;

    Ok(Json(cart.into()))
}
