//! Add Cart Item Handler

use std::sync::Arc;

use alero::cart::{LineKind, NewLine};
use salvo::{
    http::header::LOCATION,
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    carts::{
        errors::into_status_error,
        models::{CartLineResponse, LineKindValue},
    },
    extensions::*,
    state::State,
};

const fn default_kind() -> LineKindValue {
    LineKindValue::Product
}

const fn default_quantity() -> u32 {
    1
}

/// Add Cart Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddItemRequest {
    /// Catalogue product id or service code
    pub product_id: String,

    /// Variant id, e.g. a thickness/colour combination
    #[serde(default)]
    pub variant_id: Option<String>,

    /// Line kind, defaults to `producto`
    #[serde(default = "default_kind")]
    pub kind: LineKindValue,

    /// Display name
    pub name: String,

    /// Display description
    #[serde(default)]
    pub description: String,

    /// Image URL
    #[serde(default)]
    pub image: Option<String>,

    /// Free-text attributes such as `Espesor: 6mm`
    #[serde(default)]
    pub specifications: Vec<String>,

    /// Category label used for dispatch scheduling
    #[serde(default)]
    pub category: Option<String>,

    /// Quantity, defaults to 1; zero is raised to 1
    #[serde(default = "default_quantity")]
    pub quantity: u32,

    /// Unit price in CLP; replaced by the catalogue price for catalogued products
    pub unit_price: u64,
}

impl From<AddItemRequest> for NewLine {
    fn from(request: AddItemRequest) -> Self {
        NewLine {
            product_id: request.product_id,
            variant_id: request.variant_id,
            kind: request.kind.into(),
            name: request.name,
            description: request.description,
            image: request.image,
            specifications: request.specifications,
            category: request.category,
            quantity: request.quantity,
            unit_price: request.unit_price,
        }
    }
}

/// Add Cart Item Handler
///
/// Product lines are priced from the catalogue, looked up by variant id and then product id.
/// The submitted `unit_price` is kept only for services, coordination fees and products the
/// catalogue does not know (including while it is unavailable).
#[endpoint(
    tags("carts"),
    summary = "Add Item to Cart",
    responses(
        (status_code = StatusCode::CREATED, description = "Cart line created"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    cart: PathParam<Uuid>,
    json: JsonBody<AddItemRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CartLineResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let cart = cart.into_inner();
    let mut line = NewLine::from(json.into_inner());

    if line.kind == LineKind::Product
        && let Some(price) = catalogue_price(&state, &line).await
    {
        line.unit_price = price;
    }

    let line = state
        .app
        .carts
        .add_item(cart.into(), line)
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/carts/{cart}/items/{}", line.id), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(line.into()))
}

async fn catalogue_price(state: &State, line: &NewLine) -> Option<u64> {
    if let Some(variant) = line.variant_id.as_deref()
        && let Some(price) = state.app.catalog.unit_price(variant).await
    {
        return Some(price);
    }

    state.app.catalog.unit_price(&line.product_id).await
}

#[cfg(test)]
mod tests {
    use alero_app::domain::catalog::MockCatalogService;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use alero_app::domain::carts::{CartsServiceError, MockCartsService};

    use crate::test_helpers::{TestServices, make_line, service};

    use super::*;

    fn make_service(carts: MockCartsService, catalog: MockCatalogService) -> Service {
        service(
            TestServices {
                carts,
                catalog,
                ..TestServices::default()
            },
            Router::with_path("carts/{cart}/items").post(handler),
        )
    }

    fn uncatalogued() -> MockCatalogService {
        let mut catalog = MockCatalogService::new();

        catalog.expect_unit_price().returning(|_| None);

        catalog
    }

    #[tokio::test]
    async fn test_add_item_success() -> TestResult {
        let cart = Uuid::now_v7();

        let mut carts = MockCartsService::new();

        carts
            .expect_add_item()
            .once()
            .withf(move |requested, line| {
                requested.into_uuid() == cart
                    && line.product_id == "ALV-6"
                    && line.variant_id.as_deref() == Some("6mm-bronce")
                    && line.kind == LineKind::Product
                    && line.quantity == 2
                    && line.unit_price == 45_990
            })
            .return_once(|_, _| Ok(make_line("ALV-6-6mm-bronce-1", 2, 45_990)));

        let mut catalog = MockCatalogService::new();

        catalog
            .expect_unit_price()
            .once()
            .withf(|key| key.eq("6mm-bronce"))
            .return_once(|_| Some(45_990));

        let mut res = TestClient::post(format!("http://example.com/carts/{cart}/items"))
            .json(&json!({
                "product_id": "ALV-6",
                "variant_id": "6mm-bronce",
                "name": "Policarbonato Alveolar 6mm",
                "category": "Policarbonato Alveolar",
                "quantity": 2,
                "unit_price": 45_990
            }))
            .send(&make_service(carts, catalog))
            .await;

        let body: CartLineResponse = res.take_json().await?;
        let location = res.headers().get("location").and_then(|v| v.to_str().ok());

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(
            location,
            Some(format!("/carts/{cart}/items/ALV-6-6mm-bronce-1").as_str())
        );
        assert_eq!(body.total, 91_980);

        Ok(())
    }

    #[tokio::test]
    async fn test_add_item_defaults_quantity_and_kind() -> TestResult {
        let cart = Uuid::now_v7();

        let mut carts = MockCartsService::new();

        carts
            .expect_add_item()
            .once()
            .withf(|_, line| line.quantity == 1 && line.kind == LineKind::Service)
            .return_once(|_, _| Ok(make_line("CORTE-0-1", 1, 5_000)));

        let mut catalog = MockCatalogService::new();

        catalog.expect_unit_price().never();

        let res = TestClient::post(format!("http://example.com/carts/{cart}/items"))
            .json(&json!({
                "product_id": "CORTE",
                "kind": "servicio",
                "name": "Corte a medida",
                "unit_price": 5_000
            }))
            .send(&make_service(carts, catalog))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));

        Ok(())
    }

    #[tokio::test]
    async fn test_add_item_uses_catalogue_price_over_submitted_one() -> TestResult {
        let cart = Uuid::now_v7();

        let mut carts = MockCartsService::new();

        carts
            .expect_add_item()
            .once()
            .withf(|_, line| line.unit_price == 45_990)
            .return_once(|_, _| Ok(make_line("ALV-6-1", 1, 45_990)));

        let mut catalog = MockCatalogService::new();

        catalog
            .expect_unit_price()
            .once()
            .withf(|key| key.eq("ALV-6"))
            .return_once(|_| Some(45_990));

        let res = TestClient::post(format!("http://example.com/carts/{cart}/items"))
            .json(&json!({ "product_id": "ALV-6", "name": "Alveolar", "unit_price": 1 }))
            .send(&make_service(carts, catalog))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));

        Ok(())
    }

    #[tokio::test]
    async fn test_add_item_falls_back_to_product_id_price() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_add_item()
            .once()
            .withf(|_, line| line.unit_price == 43_990)
            .return_once(|_, _| Ok(make_line("ALV-6-1", 1, 43_990)));

        let mut catalog = MockCatalogService::new();

        catalog
            .expect_unit_price()
            .times(2)
            .returning(|key| key.eq("ALV-6").then_some(43_990));

        let res = TestClient::post(format!("http://example.com/carts/{}/items", Uuid::now_v7()))
            .json(&json!({
                "product_id": "ALV-6",
                "variant_id": "discontinued",
                "name": "Alveolar",
                "unit_price": 1
            }))
            .send(&make_service(carts, catalog))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));

        Ok(())
    }

    #[tokio::test]
    async fn test_add_item_keeps_submitted_price_for_unknown_products() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_add_item()
            .once()
            .withf(|_, line| line.unit_price == 12_500)
            .return_once(|_, _| Ok(make_line("ESP-1", 1, 12_500)));

        let res = TestClient::post(format!("http://example.com/carts/{}/items", Uuid::now_v7()))
            .json(&json!({
                "product_id": "ESPECIAL",
                "name": "Pedido especial",
                "unit_price": 12_500
            }))
            .send(&make_service(carts, uncatalogued()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));

        Ok(())
    }

    #[tokio::test]
    async fn test_add_item_to_unknown_cart_returns_404() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_add_item()
            .once()
            .return_once(|_, _| Err(CartsServiceError::NotFound));

        let res = TestClient::post(format!("http://example.com/carts/{}/items", Uuid::now_v7()))
            .json(&json!({ "product_id": "ALV-6", "name": "Alveolar", "unit_price": 1 }))
            .send(&make_service(carts, uncatalogued()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_add_item_with_missing_price_returns_400() -> TestResult {
        let mut carts = MockCartsService::new();

        carts.expect_add_item().never();

        let res = TestClient::post(format!("http://example.com/carts/{}/items", Uuid::now_v7()))
            .json(&json!({ "product_id": "ALV-6", "name": "Alveolar" }))
            .send(&make_service(carts, MockCatalogService::new()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
