//! Catalog service.

use std::sync::Arc;

use alero::search::{SearchEntry, SearchIndex};
use async_trait::async_trait;
use mockall::automock;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::domain::catalog::CatalogClient;

/// Catalog backed by a lazily built, in-memory search index.
///
/// The index is fetched once, on first search. A failed fetch leaves it empty until
/// [`CatalogService::refresh`] is called.
pub struct CachedCatalogService {
    client: Arc<dyn CatalogClient>,
    index: RwLock<Option<Arc<SearchIndex>>>,
}

impl CachedCatalogService {
    #[must_use]
    pub fn new(client: Arc<dyn CatalogClient>) -> Self {
        Self {
            client,
            index: RwLock::new(None),
        }
    }

    async fn index(&self) -> Arc<SearchIndex> {
        if let Some(index) = self.index.read().await.as_ref() {
            return Arc::clone(index);
        }

        let mut slot = self.index.write().await;

        if let Some(index) = slot.as_ref() {
            return Arc::clone(index);
        }

        let index = Arc::new(self.build_index().await);

        *slot = Some(Arc::clone(&index));

        index
    }

    async fn build_index(&self) -> SearchIndex {
        match self.client.fetch_public_products().await {
            Ok(products) => {
                let index = products.into_index();

                info!(entries = index.len(), "built search index");

                index
            }
            Err(error) => {
                warn!(error = %error, "failed to fetch products for search index");

                SearchIndex::default()
            }
        }
    }
}

impl std::fmt::Debug for CachedCatalogService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachedCatalogService").finish_non_exhaustive()
    }
}

#[async_trait]
impl CatalogService for CachedCatalogService {
    async fn search(&self, query: &str) -> Vec<SearchEntry> {
        self.index()
            .await
            .search(query)
            .into_iter()
            .cloned()
            .collect()
    }

    async fn featured(&self, limit: usize) -> Vec<SearchEntry> {
        match self.client.fetch_listing().await {
            Ok(listing) => listing.featured(limit),
            Err(error) => {
                warn!(error = %error, "failed to fetch featured products");

                Vec::new()
            }
        }
    }

    async fn unit_price(&self, key: &str) -> Option<u64> {
        self.index()
            .await
            .find(key)
            .map(|entry| entry.price)
            .filter(|price| *price > 0)
    }

    async fn refresh(&self) -> usize {
        let index = Arc::new(self.build_index().await);
        let entries = index.len();

        *self.index.write().await = Some(index);

        entries
    }
}

#[automock]
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Search the product index; at most eight results, in index order.
    async fn search(&self, query: &str) -> Vec<SearchEntry>;

    /// First product of each category, up to `limit`. Empty when the backend is unavailable.
    async fn featured(&self, limit: usize) -> Vec<SearchEntry>;

    /// Catalogue price of the product whose id or code is `key`.
    ///
    /// `None` when the product is unknown, unpriced, or the catalogue is unavailable.
    async fn unit_price(&self, key: &str) -> Option<u64>;

    /// Rebuild the search index, returning its size.
    async fn refresh(&self) -> usize;
}
