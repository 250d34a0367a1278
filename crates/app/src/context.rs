//! App Context

use std::{
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};

use alero::dispatch::{DispatchError, DispatchRules};
use jiff::tz::TimeZone;
use reqwest::Client;
use thiserror::Error;
use tracing::info;

use crate::{
    domain::{
        carts::{CartsService, InMemoryCartsService},
        catalog::{CachedCatalogService, CatalogConfig, CatalogService, HttpCatalogClient},
        checkout::{CheckoutService, DefaultCheckoutService},
        dispatch::DispatchService,
    },
    geocoding::{Geocoder, GeocodingConfig, NominatimGeocoder},
    payments::{HttpPaymentGateway, PaymentsConfig},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("unknown time zone {name}")]
    TimeZone {
        name: String,
        #[source]
        source: jiff::Error,
    },

    #[error("failed to load dispatch rules")]
    DispatchRules(#[source] DispatchError),

    #[error("failed to build http client")]
    HttpClient(#[source] reqwest::Error),
}

/// Store-level settings.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// IANA time zone dispatch cutoffs are evaluated in.
    pub time_zone: String,

    /// YAML rule table; the built-in table is used when unset.
    pub dispatch_rules_path: Option<PathBuf>,

    /// Idle lifetime of a session cart; `None` keeps carts until deleted.
    pub cart_idle_ttl: Option<Duration>,
}

/// Everything needed to wire the application services.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub catalog: CatalogConfig,
    pub geocoding: GeocodingConfig,
    pub payments: PaymentsConfig,
    pub store: StoreConfig,

    /// Timeout applied to every upstream HTTP request.
    pub http_timeout: Duration,
}

#[derive(Clone)]
pub struct AppContext {
    pub carts: Arc<dyn CartsService>,
    pub catalog: Arc<dyn CatalogService>,
    pub checkout: Arc<dyn CheckoutService>,
    pub geocoder: Arc<dyn Geocoder>,
    pub dispatch: DispatchService,
}

impl AppContext {
    /// Build application context from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when the time zone is unknown, the dispatch rules cannot be
    /// loaded, or the HTTP client cannot be built.
    pub fn from_config(config: AppConfig) -> Result<Self, AppInitError> {
        let time_zone = TimeZone::get(&config.store.time_zone).map_err(|source| {
            AppInitError::TimeZone {
                name: config.store.time_zone.clone(),
                source,
            }
        })?;

        let rules = load_dispatch_rules(config.store.dispatch_rules_path.as_deref())?;
        let dispatch = DispatchService::new(rules, time_zone);

        let http = Client::builder()
            .timeout(config.http_timeout)
            .build()
            .map_err(AppInitError::HttpClient)?;

        let carts = match config.store.cart_idle_ttl {
            Some(ttl) => InMemoryCartsService::new().with_idle_ttl(ttl),
            None => InMemoryCartsService::new(),
        };
        let carts: Arc<dyn CartsService> = Arc::new(carts);
        let catalog = CachedCatalogService::new(Arc::new(HttpCatalogClient::new(
            config.catalog,
            http.clone(),
        )));
        let payments = HttpPaymentGateway::new(config.payments, http.clone());
        let checkout =
            DefaultCheckoutService::new(Arc::clone(&carts), dispatch.clone(), Arc::new(payments));

        Ok(Self {
            carts,
            catalog: Arc::new(catalog),
            checkout: Arc::new(checkout),
            geocoder: Arc::new(NominatimGeocoder::new(config.geocoding, http)),
            dispatch,
        })
    }
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("dispatch", &self.dispatch)
            .finish_non_exhaustive()
    }
}

fn load_dispatch_rules(path: Option<&Path>) -> Result<DispatchRules, AppInitError> {
    let Some(path) = path else {
        return Ok(DispatchRules::standard());
    };

    let rules = DispatchRules::from_path(path).map_err(AppInitError::DispatchRules)?;

    info!(
        path = %path.display(),
        rules = rules.rules().len(),
        "loaded dispatch rules"
    );

    Ok(rules)
}
