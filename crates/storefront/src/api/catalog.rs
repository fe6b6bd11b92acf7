//! Catalog API client.
//!
//! Fetches the full product list and server-side search results. Full
//! catalog responses are cached in-process (5-minute TTL); search responses
//! are never cached.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use tracing::{debug, instrument};

use greenbasket_core::Product;

use crate::api::{ApiError, decode};
use crate::config::StorefrontConfig;

/// Cache TTL for the full catalog.
const CATALOG_CACHE_TTL: Duration = Duration::from_secs(300);

const PRODUCTS_CACHE_KEY: &str = "products";

/// Client for the remote product catalog.
#[derive(Clone)]
pub struct CatalogClient {
    client: reqwest::Client,
    base_url: String,
    cache: Cache<&'static str, Arc<Vec<Product>>>,
}

impl CatalogClient {
    /// Create a new catalog API client.
    #[must_use]
    pub fn new(config: &StorefrontConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(1)
            .time_to_live(CATALOG_CACHE_TTL)
            .build();

        Self {
            client: reqwest::Client::new(),
            base_url: config.api_url.as_str().trim_end_matches('/').to_string(),
            cache,
        }
    }

    /// Fetch the full product catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be
    /// parsed.
    #[instrument(skip(self))]
    pub async fn fetch_all(&self) -> Result<Vec<Product>, ApiError> {
        // Check cache
        if let Some(products) = self.cache.get(PRODUCTS_CACHE_KEY).await {
            debug!("Cache hit for catalog");
            return Ok(products.as_ref().clone());
        }

        let url = format!("{}/products", self.base_url);
        let response = self.client.get(&url).send().await?;
        let products: Vec<Product> = decode(response).await?;

        self.cache
            .insert(PRODUCTS_CACHE_KEY, Arc::new(products.clone()))
            .await;

        Ok(products)
    }

    /// Fetch the products matching `query` (case-insensitive substring over
    /// name and category, evaluated by the remote service). Not cached.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be
    /// parsed. A no-match outcome may arrive either as an empty list or as
    /// a not-found status, depending on the backend.
    #[instrument(skip(self), fields(query = %query))]
    pub async fn search(&self, query: &str) -> Result<Vec<Product>, ApiError> {
        let url = format!(
            "{}/products/search?value={}",
            self.base_url,
            urlencoding::encode(query)
        );
        let response = self.client.get(&url).send().await?;
        decode(response).await
    }

    /// Invalidate the cached catalog.
    pub async fn invalidate(&self) {
        self.cache.invalidate(PRODUCTS_CACHE_KEY).await;
    }
}
