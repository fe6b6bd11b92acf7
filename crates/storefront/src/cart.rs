//! Cart reconciliation: merging remote cart entries with catalog records
//! into display-ready line items.
//!
//! The remote cart stores only (product id, quantity) pairs; everything a
//! user sees (name, price, image) comes from joining those pairs against
//! the full catalog. Reconciliation is a pure function of its inputs so the
//! display list can be rebuilt from any confirmed remote response.

use std::collections::HashMap;

use rust_decimal::Decimal;

use greenbasket_core::{CartEntry, CartLineItem, Product, ProductId};

/// Merge remote cart entries with full product records into line items.
///
/// Rules:
/// - entries whose product id is absent from the catalog are silently
///   omitted (a removed or unknown product cannot be displayed);
/// - entries with quantity 0 are removed, never materialized;
/// - the remote entries' relative order is preserved;
/// - on duplicate product ids the last-seen quantity wins, keeping the
///   first occurrence's position (a last-seen 0 removes the item).
#[must_use]
pub fn reconcile(entries: &[CartEntry], catalog: &[Product]) -> Vec<CartLineItem> {
    let index: HashMap<&ProductId, &Product> = catalog.iter().map(|p| (&p.id, p)).collect();

    let mut items: Vec<CartLineItem> = Vec::with_capacity(entries.len());
    for entry in entries {
        let Some(product) = index.get(&entry.product_id) else {
            continue;
        };

        let existing = items
            .iter()
            .position(|item| item.product.id == entry.product_id);
        match (existing, entry.qty) {
            (Some(pos), 0) => {
                items.remove(pos);
            }
            (Some(pos), qty) => {
                if let Some(item) = items.get_mut(pos) {
                    item.qty = qty;
                }
            }
            (None, 0) => {}
            (None, qty) => items.push(CartLineItem {
                product: (*product).clone(),
                qty,
            }),
        }
    }
    items
}

/// Whether a product is already present in the cart. Exact-match by id.
#[must_use]
pub fn contains_product(items: &[CartLineItem], product_id: &ProductId) -> bool {
    items.iter().any(|item| item.product.id == *product_id)
}

/// Total cost of the cart.
#[must_use]
pub fn total_cost(items: &[CartLineItem]) -> Decimal {
    items
        .iter()
        .map(|item| item.product.cost * Decimal::from(item.qty))
        .sum()
}

/// Total number of units in the cart.
#[must_use]
pub fn total_quantity(items: &[CartLineItem]) -> u32 {
    items.iter().map(|item| item.qty).sum()
}

/// Owner of the reconciled display list.
///
/// The list is only ever replaced with the reconciliation of a
/// remote-confirmed cart; there is no optimistic local mutation.
#[derive(Debug, Default)]
pub struct CartState {
    items: Vec<CartLineItem>,
}

impl CartState {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The current display list.
    #[must_use]
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Replace the display list with the reconciliation of a confirmed
    /// remote cart.
    pub fn apply(&mut self, entries: &[CartEntry], catalog: &[Product]) {
        self.items = reconcile(entries, catalog);
    }
}
