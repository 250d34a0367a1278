//! Toggle Cart Panel Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{carts::errors::into_status_error, extensions::*, state::State};

/// Cart Panel Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartPanelResponse {
    /// Whether the cart panel is open after toggling
    pub is_open: bool,
}

/// Toggle Cart Panel Handler
#[endpoint(
    tags("carts"),
    summary = "Open or close the cart panel",
    responses(
        (status_code = StatusCode::OK, description = "Panel toggled"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart not found"),
    ),
)]
pub(crate) async fn handler(
    cart: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<CartPanelResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let is_open = state
        .app
        .carts
        .toggle_cart(cart.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(CartPanelResponse { is_open }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use alero_app::domain::carts::{CartsServiceError, MockCartsService};

    use crate::test_helpers::carts_service;

    use super::*;

    fn make_service(carts: MockCartsService) -> Service {
        carts_service(carts, Router::with_path("carts/{cart}/toggle").post(handler))
    }

    #[tokio::test]
    async fn test_toggle_reports_new_state() -> TestResult {
        let uuid = Uuid::now_v7();

        let mut carts = MockCartsService::new();

        carts
            .expect_toggle_cart()
            .once()
            .withf(move |requested| requested.into_uuid() == uuid)
            .return_once(|_| Ok(true));

        let mut res = TestClient::post(format!("http://example.com/carts/{uuid}/toggle"))
            .send(&make_service(carts))
            .await;

        let body: CartPanelResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert!(body.is_open);

        Ok(())
    }

    #[tokio::test]
    async fn test_toggle_unknown_cart_returns_404() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_toggle_cart()
            .once()
            .return_once(|_| Err(CartsServiceError::NotFound));

        let res = TestClient::post(format!("http://example.com/carts/{}/toggle", Uuid::now_v7()))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
