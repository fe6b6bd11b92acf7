//! Catalog store: the full product list and its filtered search view.
//!
//! The full list is the source of truth used to resolve product identity
//! for cart joins. The filtered view is a display projection only and is
//! never used for joins.

use greenbasket_core::Product;

/// Display state of the last completed search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    /// The query this view reflects.
    pub query: String,
    /// Products matching the query. Display projection only.
    pub results: Vec<Product>,
    /// True iff the last completed search returned an empty or failed
    /// result. Mutually exclusive with `results` being non-empty.
    pub not_found: bool,
}

/// Owner of the product catalog and the filtered view over it.
#[derive(Debug, Default)]
pub struct CatalogStore {
    products: Vec<Product>,
    search: SearchState,
}

impl CatalogStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The full product list.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// The current search view.
    #[must_use]
    pub const fn search_state(&self) -> &SearchState {
        &self.search
    }

    /// Replace the catalog wholesale after a successful load.
    ///
    /// Resets the filtered view to the full list and clears the not-found
    /// flag. A failed load never reaches this method; prior state stays
    /// untouched.
    pub fn replace_all(&mut self, products: Vec<Product>) {
        self.search = SearchState {
            query: String::new(),
            results: products.clone(),
            not_found: false,
        };
        self.products = products;
    }

    /// Apply the results of a completed search.
    ///
    /// An empty match is not an error: it sets the not-found flag and
    /// empties the view. The full list is never altered by search.
    pub fn apply_search(&mut self, query: String, results: Vec<Product>) {
        let not_found = results.is_empty();
        self.search = SearchState {
            query,
            results,
            not_found,
        };
    }

    /// Record a failed search: not-found flag set, view emptied.
    pub fn mark_search_failed(&mut self, query: String) {
        self.search = SearchState {
            query,
            results: Vec::new(),
            not_found: true,
        };
    }
}
