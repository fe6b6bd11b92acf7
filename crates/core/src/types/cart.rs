//! Cart types: the remote form and the display form derived from it.

use serde::{Deserialize, Serialize};

use crate::types::{Product, ProductId};

/// A cart entry as stored by the remote cart service.
///
/// The remote keeps only the (product id, quantity) pair; the full product
/// record is joined in client-side. A qty of 0 means the entry is removed
/// and is never materialized as a line item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartEntry {
    /// Id of the product this entry refers to.
    pub product_id: ProductId,
    /// Absolute quantity in the cart.
    pub qty: u32,
}

impl CartEntry {
    /// Create a new cart entry.
    #[must_use]
    pub fn new(product_id: impl Into<ProductId>, qty: u32) -> Self {
        Self {
            product_id: product_id.into(),
            qty,
        }
    }
}

/// A cart entry joined with its full product record, ready for display.
///
/// Invariant: within one cart there is at most one line item per product id,
/// and every line item corresponds to exactly one remote entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLineItem {
    /// The full product record.
    pub product: Product,
    /// Quantity in the cart, always >= 1.
    pub qty: u32,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_entry_wire_format() {
        // The remote cart serializes entries in camelCase.
        let json = r#"[
            {"productId": "KCRwjF7lN97HnEaY", "qty": 3},
            {"productId": "BW0jAAeDJmlZCF8i", "qty": 1}
        ]"#;

        let entries: Vec<CartEntry> = serde_json::from_str(json).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].product_id, "KCRwjF7lN97HnEaY");
        assert_eq!(entries[0].qty, 3);

        let out = serde_json::to_value(&entries[1]).unwrap();
        assert_eq!(out["productId"], "BW0jAAeDJmlZCF8i");
        assert_eq!(out["qty"], 1);
    }
}
