//! Clear Cart Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    carts::{errors::into_status_error, models::CartResponse},
    extensions::*,
    state::State,
};

/// Clear Cart Handler
#[endpoint(
    tags("carts"),
    summary = "Remove every line from a cart",
    responses(
        (status_code = StatusCode::OK, description = "Cart emptied"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart not found"),
    ),
)]
pub(crate) async fn handler(
    cart: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let cart = state
        .app
        .carts
        .clear_cart(cart.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(cart.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use alero_app::domain::carts::{CartsServiceError, MockCartsService};

    use crate::test_helpers::{carts_service, make_cart};

    use super::*;

    fn make_service(carts: MockCartsService) -> Service {
        carts_service(carts, Router::with_path("carts/{cart}/items").delete(handler))
    }

    #[tokio::test]
    async fn test_clear_cart_returns_empty_cart() -> TestResult {
        let cart = Uuid::now_v7();

        let mut carts = MockCartsService::new();

        carts
            .expect_clear_cart()
            .once()
            .withf(move |requested| requested.into_uuid() == cart)
            .return_once(|requested| Ok(make_cart(requested)));

        let mut res = TestClient::delete(format!("http://example.com/carts/{cart}/items"))
            .send(&make_service(carts))
            .await;

        let body: CartResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.item_count, 0);
        assert_eq!(body.total, 0);

        Ok(())
    }

    #[tokio::test]
    async fn test_clear_unknown_cart_returns_404() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_clear_cart()
            .once()
            .return_once(|_| Err(CartsServiceError::NotFound));

        let res = TestClient::delete(format!("http://example.com/carts/{}/items", Uuid::now_v7()))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
