//! Server configuration module

use std::time::Duration;

use alero_app::context::{AppConfig, StoreConfig};
use clap::Parser;

use crate::config::{
    observability::{LoggingConfig, ObservabilityConfig},
    server::ServerRuntimeConfig,
    store::StoreSettings,
    upstream::{CatalogSettings, GeocodingSettings, PaymentsSettings},
};

pub(crate) mod observability;
pub(crate) mod server;
pub(crate) mod store;
pub(crate) mod upstream;

/// Alero JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "alero-json", about = "Alero storefront JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Observability settings.
    #[command(flatten)]
    pub observability: ObservabilityConfig,

    /// Catalog backend settings.
    #[command(flatten)]
    pub catalog: CatalogSettings,

    /// Reverse geocoding settings.
    #[command(flatten)]
    pub geocoding: GeocodingSettings,

    /// Payment provider settings.
    #[command(flatten)]
    pub payments: PaymentsSettings,

    /// Store scheduling settings.
    #[command(flatten)]
    pub store: StoreSettings,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }

    /// Application service settings.
    #[must_use]
    pub fn app_config(&self) -> AppConfig {
        AppConfig {
            catalog: self.catalog.clone().into(),
            geocoding: self.geocoding.clone().into(),
            payments: self.payments.clone().into(),
            store: StoreConfig {
                time_zone: self.store.time_zone.clone(),
                dispatch_rules_path: self.store.dispatch_rules_path.clone(),
                cart_idle_ttl: self.store.cart_idle_ttl(),
            },
            http_timeout: Duration::from_secs(self.server.upstream_timeout_seconds),
        }
    }
}
