//! Test helpers.

use std::sync::Arc;

use alero::cart::{CartLine, LineId, LineKind};
use alero_app::{
    context::AppContext,
    domain::{
        carts::{
            MockCartsService,
            records::{CartUuid, SessionCart},
        },
        catalog::MockCatalogService,
        checkout::MockCheckoutService,
        dispatch::DispatchService,
    },
    geocoding::MockGeocoder,
};
use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};

use crate::state::State;

/// Mocked services behind a test router. Mocks without expectations fail on any call.
pub(crate) struct TestServices {
    pub(crate) carts: MockCartsService,
    pub(crate) catalog: MockCatalogService,
    pub(crate) checkout: MockCheckoutService,
    pub(crate) geocoder: MockGeocoder,
    pub(crate) dispatch: DispatchService,
}

impl Default for TestServices {
    fn default() -> Self {
        Self {
            carts: MockCartsService::new(),
            catalog: MockCatalogService::new(),
            checkout: MockCheckoutService::new(),
            geocoder: MockGeocoder::new(),
            dispatch: DispatchService::default(),
        }
    }
}

impl TestServices {
    pub(crate) fn with_carts(carts: MockCartsService) -> Self {
        Self {
            carts,
            ..Self::default()
        }
    }

    fn into_state(self) -> Arc<State> {
        State::from_app_context(AppContext {
            carts: Arc::new(self.carts),
            catalog: Arc::new(self.catalog),
            checkout: Arc::new(self.checkout),
            geocoder: Arc::new(self.geocoder),
            dispatch: self.dispatch,
        })
    }
}

pub(crate) fn service(services: TestServices, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(services.into_state()))
            .push(route),
    )
}

pub(crate) fn carts_service(carts: MockCartsService, route: Router) -> Service {
    service(TestServices::with_carts(carts), route)
}

pub(crate) fn make_cart(uuid: CartUuid) -> SessionCart {
    SessionCart {
        uuid,
        cart: alero::cart::Cart::new(),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_line(id: &str, quantity: u32, unit_price: u64) -> CartLine {
    CartLine {
        id: LineId::from(id),
        product_id: "ALV-6".to_string(),
        kind: LineKind::Product,
        name: "Policarbonato Alveolar 6mm".to_string(),
        description: "Bronce".to_string(),
        image: None,
        specifications: vec!["Espesor: 6mm".to_string()],
        category: Some("Policarbonato Alveolar".to_string()),
        quantity,
        unit_price,
        total: unit_price * u64::from(quantity),
    }
}
