//! Product records as served by the remote catalog.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::ProductId;

/// A purchasable product.
///
/// Immutable once fetched: the catalog is replaced wholesale on refetch,
/// individual products are never mutated in place. The remote service
/// serializes the id field as `_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique product id.
    #[serde(rename = "_id")]
    pub id: ProductId,
    /// Display name of the product.
    pub name: String,
    /// Category the product belongs to.
    pub category: String,
    /// Price in the store currency. Non-negative.
    pub cost: Decimal,
    /// Aggregate rating, 0-5.
    pub rating: u8,
    /// URL of the product image.
    pub image: String,
}
