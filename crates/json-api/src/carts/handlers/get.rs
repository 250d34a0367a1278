//! Get Cart Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    carts::{errors::into_status_error, models::CartResponse},
    extensions::*,
    state::State,
};

/// Get Cart Handler
#[endpoint(
    tags("carts"),
    summary = "Get Cart",
    responses(
        (status_code = StatusCode::OK, description = "Cart found"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
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
        .get_cart(cart.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(cart.into()))
}

#[cfg(test)]
mod tests {
    use alero::cart::{LineKind, NewLine};
    use jiff::Timestamp;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use alero_app::domain::carts::{CartsServiceError, MockCartsService};

    use crate::{
        carts::models::LineKindValue,
        test_helpers::{carts_service, make_cart},
    };

    use super::*;

    fn make_service(carts: MockCartsService) -> Service {
        carts_service(carts, Router::with_path("carts/{cart}").get(handler))
    }

    #[tokio::test]
    async fn test_get_cart_returns_lines_and_totals() -> TestResult {
        let uuid = Uuid::now_v7();
        let mut session = make_cart(uuid.into());

        session.cart.add_item(
            NewLine {
                product_id: "ALV-6".to_string(),
                variant_id: None,
                kind: LineKind::Product,
                name: "Policarbonato Alveolar 6mm".to_string(),
                description: "Bronce".to_string(),
                image: None,
                specifications: vec!["Espesor: 6mm".to_string()],
                category: Some("Policarbonato Alveolar".to_string()),
                quantity: 2,
                unit_price: 45_990,
            },
            Timestamp::UNIX_EPOCH,
        );

        let mut carts = MockCartsService::new();

        carts
            .expect_get_cart()
            .once()
            .withf(move |requested| requested.into_uuid() == uuid)
            .return_once(move |_| Ok(session));

        let mut res = TestClient::get(format!("http://example.com/carts/{uuid}"))
            .send(&make_service(carts))
            .await;

        let body: CartResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.uuid, uuid);
        assert_eq!(body.lines.len(), 1);

        let line = body.lines.first().ok_or("expected a cart line")?;

        assert_eq!(line.kind, LineKindValue::Product);
        assert_eq!(line.total, 91_980);
        assert_eq!(body.total, 91_980);
        assert_eq!(body.item_count, 2);

        Ok(())
    }

    #[tokio::test]
    async fn test_get_unknown_cart_returns_404() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_get_cart()
            .once()
            .return_once(|_| Err(CartsServiceError::NotFound));

        let res = TestClient::get(format!("http://example.com/carts/{}", Uuid::now_v7()))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_get_cart_with_malformed_uuid_returns_400() -> TestResult {
        let mut carts = MockCartsService::new();

        carts.expect_get_cart().never();

        let res = TestClient::get("http://example.com/carts/not-a-uuid")
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
