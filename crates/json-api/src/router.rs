//! App Router

use salvo::Router;

use crate::{carts, catalog, checkout, dispatch, estimates, geocoding, healthcheck};

pub(crate) fn app_router() -> Router {
    Router::new()
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(
            Router::with_path("carts").post(carts::create::handler).push(
                Router::with_path("{cart}")
                    .get(carts::get::handler)
                    .delete(carts::delete::handler)
                    .push(Router::with_path("toggle").post(carts::toggle::handler))
                    .push(
                        Router::with_path("items")
                            .post(carts::items::create::handler)
                            .delete(carts::items::clear::handler)
                            .push(
                                Router::with_path("{item}")
                                    .put(carts::items::update::handler)
                                    .delete(carts::items::delete::handler),
                            ),
                    ),
            ),
        )
        .push(Router::with_path("dispatch").get(dispatch::quote::handler))
        .push(Router::with_path("search").get(catalog::search::handler))
        .push(Router::with_path("products/featured").get(catalog::featured::handler))
        .push(Router::with_path("estimates").post(estimates::create::handler))
        .push(Router::with_path("geocode/reverse").get(geocoding::reverse::handler))
        .push(Router::with_path("checkout").post(checkout::create::handler))
}

#[cfg(test)]
mod tests {
    use alero_app::domain::carts::MockCartsService;
    use salvo::{
        http::StatusCode,
        test::{ResponseExt, TestClient},
    };
    use serde_json::{Value, json};
    use testresult::TestResult;
    use uuid::Uuid;

    use crate::test_helpers::{TestServices, carts_service, make_cart, service};

    use super::*;

    #[tokio::test]
    async fn test_routes_reach_their_handlers() -> TestResult {
        let cart = Uuid::now_v7();

        let mut carts = MockCartsService::new();

        carts
            .expect_get_cart()
            .once()
            .return_once(|requested| Ok(make_cart(requested)));
        carts.expect_toggle_cart().once().return_once(|_| Ok(true));

        let service = carts_service(carts, app_router());

        let res = TestClient::get(format!("http://example.com/carts/{cart}"))
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let mut res = TestClient::post(format!("http://example.com/carts/{cart}/toggle"))
            .send(&service)
            .await;

        let body: Value = res.take_json().await?;

        assert_eq!(body, json!({ "is_open": true }));

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_route_returns_404() {
        let res = TestClient::get("http://example.com/carrito")
            .send(&service(TestServices::default(), app_router()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
    }
}
