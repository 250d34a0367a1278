//! Upstream Service Config

use alero_app::{
    domain::catalog::CatalogConfig, geocoding::GeocodingConfig, payments::PaymentsConfig,
};
use clap::Args;

/// Catalog backend settings.
#[derive(Clone, Debug, Args)]
pub struct CatalogSettings {
    /// Catalog backend base URL
    #[arg(long, env = "CATALOG_BASE_URL")]
    pub catalog_base_url: String,

    /// Path of the per-category product listing
    #[arg(long, env = "CATALOG_LISTING_PATH", default_value = "/api/productos")]
    pub catalog_listing_path: String,

    /// Path of the public product list used for search
    #[arg(
        long,
        env = "CATALOG_PUBLIC_PATH",
        default_value = "/api/productos/publicos"
    )]
    pub catalog_public_path: String,
}

impl From<CatalogSettings> for CatalogConfig {
    fn from(settings: CatalogSettings) -> Self {
        Self {
            base_url: settings.catalog_base_url,
            listing_path: settings.catalog_listing_path,
            public_path: settings.catalog_public_path,
        }
    }
}

/// Reverse geocoding settings.
#[derive(Clone, Debug, Args)]
pub struct GeocodingSettings {
    /// Nominatim-compatible service base URL
    #[arg(
        long,
        env = "GEOCODER_BASE_URL",
        default_value = "https://nominatim.openstreetmap.org"
    )]
    pub geocoder_base_url: String,

    /// User-Agent sent to the geocoder
    #[arg(
        long,
        env = "GEOCODER_USER_AGENT",
        default_value = concat!("alero-json/", env!("CARGO_PKG_VERSION"))
    )]
    pub geocoder_user_agent: String,
}

impl From<GeocodingSettings> for GeocodingConfig {
    fn from(settings: GeocodingSettings) -> Self {
        Self {
            base_url: settings.geocoder_base_url,
            user_agent: settings.geocoder_user_agent,
        }
    }
}

/// Payment provider settings.
#[derive(Clone, Debug, Args)]
pub struct PaymentsSettings {
    /// Endpoint that turns an order into a payment redirect
    #[arg(long, env = "PAYMENTS_ENDPOINT")]
    pub payments_endpoint: String,
}

impl From<PaymentsSettings> for PaymentsConfig {
    fn from(settings: PaymentsSettings) -> Self {
        Self {
            endpoint: settings.payments_endpoint,
        }
    }
}
