//! Update Cart Item Quantity Handler

use std::sync::Arc;

use alero::cart::LineId;
use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    carts::{errors::into_status_error, models::CartLineResponse},
    extensions::*,
    state::State,
};

/// Update Quantity Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateQuantityRequest {
    /// New quantity; values below 1 are raised to 1
    pub quantity: i64,
}

/// Update Cart Item Quantity Handler
#[endpoint(
    tags("carts"),
    summary = "Set a cart line quantity",
    responses(
        (status_code = StatusCode::OK, description = "Quantity updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart or line not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    cart: PathParam<Uuid>,
    item: PathParam<String>,
    json: JsonBody<UpdateQuantityRequest>,
    depot: &mut Depot,
) -> Result<Json<CartLineResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let line = state
        .app
        .carts
        .update_quantity(
            cart.into_inner().into(),
            LineId::from(item.into_inner()),
            json.into_inner().quantity,
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(line.into()))
}
