//! HTTP client for the catalog backend.

use alero::catalog::{CatalogListing, PublicProducts};
use async_trait::async_trait;
use mockall::automock;
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::domain::catalog::CatalogError;

/// Configuration for connecting to the catalog backend.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Backend base URL, e.g. `"https://tienda.example.cl"`.
    pub base_url: String,

    /// Path of the per-category listing, e.g. `"/api/productos"`.
    pub listing_path: String,

    /// Path of the public product list, e.g. `"/api/productos/publicos"`.
    pub public_path: String,
}

impl CatalogConfig {
    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// Catalog backend over HTTP.
#[derive(Debug, Clone)]
pub struct HttpCatalogClient {
    config: CatalogConfig,
    http: Client,
}

impl HttpCatalogClient {
    #[must_use]
    pub fn new(config: CatalogConfig, http: Client) -> Self {
        Self { config, http }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, CatalogError> {
        let response = self.http.get(self.config.url(path)).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(CatalogError::UnexpectedResponse(format!(
                "{path} failed with status {status}: {text}"
            )));
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl CatalogClient for HttpCatalogClient {
    async fn fetch_listing(&self) -> Result<CatalogListing, CatalogError> {
        self.get_json(&self.config.listing_path).await
    }

    async fn fetch_public_products(&self) -> Result<PublicProducts, CatalogError> {
        self.get_json(&self.config.public_path).await
    }
}

#[automock]
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Fetch products grouped by category.
    async fn fetch_listing(&self) -> Result<CatalogListing, CatalogError>;

    /// Fetch the flat public product list used for search.
    async fn fetch_public_products(&self) -> Result<PublicProducts, CatalogError>;
}
