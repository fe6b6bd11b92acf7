//! Cart sync API client.
//!
//! Remote cart read and write. Both operations require a bearer credential
//! and answer with the full entry list, which is the new authoritative cart
//! state. Upserts carry an absolute quantity, not a delta, so repeating one
//! has no additional effect; a quantity of 0 removes the item.

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use tracing::instrument;

use greenbasket_core::{CartEntry, ProductId};

use crate::api::{ApiError, decode};
use crate::config::StorefrontConfig;

/// Client for the remote cart service.
#[derive(Clone)]
pub struct CartClient {
    client: reqwest::Client,
    base_url: String,
}

/// Body of a cart upsert request.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CartUpsertRequest<'a> {
    product_id: &'a ProductId,
    qty: u32,
}

impl CartClient {
    /// Create a new cart API client.
    #[must_use]
    pub fn new(config: &StorefrontConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.api_url.as_str().trim_end_matches('/').to_string(),
        }
    }

    /// Fetch the remote cart entries.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the credential is rejected,
    /// or the response cannot be parsed.
    #[instrument(skip(self, token))]
    pub async fn fetch(&self, token: &SecretString) -> Result<Vec<CartEntry>, ApiError> {
        let url = format!("{}/cart", self.base_url);
        let response = self
            .client
            .get(&url)
            .bearer_auth(token.expose_secret())
            .send()
            .await?;
        decode(response).await
    }

    /// Add or update a product in the remote cart.
    ///
    /// The response is the updated full entry list. A `qty` of 0 removes
    /// the item and is reflected by its absence in the response.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the credential is rejected,
    /// or the server refuses the upsert (e.g., unknown product).
    #[instrument(skip(self, token), fields(product_id = %product_id))]
    pub async fn upsert(
        &self,
        token: &SecretString,
        product_id: &ProductId,
        qty: u32,
    ) -> Result<Vec<CartEntry>, ApiError> {
        let url = format!("{}/cart", self.base_url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(token.expose_secret())
            .json(&CartUpsertRequest { product_id, qty })
            .send()
            .await?;
        decode(response).await
    }
}
