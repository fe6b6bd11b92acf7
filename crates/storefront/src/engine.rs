//! The storefront engine facade.
//!
//! [`Storefront`] wires the API clients, the catalog store, the cart state,
//! and the debounce controller behind one cheaply-cloneable handle. All
//! operations are invoked in response to discrete UI events and run to a
//! suspension point awaiting a network response; display state is only
//! mutated between suspension points, so the discipline is simply "last
//! write to display state wins".
//!
//! A later-scheduled debounced search is not guaranteed to complete after
//! an earlier slow one - there is no request cancellation on supersede.
//! That race is tolerated, not resolved.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use rust_decimal::Decimal;
use secrecy::SecretString;
use tracing::instrument;

use greenbasket_core::{CartLineItem, Product, ProductId};

use crate::api::{ApiError, CartClient, CatalogClient};
use crate::cart::{self, CartState};
use crate::catalog::{CatalogStore, SearchState};
use crate::config::StorefrontConfig;
use crate::debounce::Debouncer;
use crate::notify::{NotificationSink, Severity, TracingSink};

const MSG_LOGIN_REQUIRED: &str = "Log in to add items to the cart.";
const MSG_DUPLICATE_ITEM: &str =
    "Item already in cart. Use the cart panel to adjust the quantity or remove it.";
const MSG_CATALOG_UNAVAILABLE: &str =
    "Could not fetch products. Check that the backend is running, reachable and returns valid JSON.";
const MSG_CART_UNAVAILABLE: &str =
    "Could not fetch cart details. Check that the backend is running, reachable and returns valid JSON.";
const MSG_CART_UPDATE_FAILED: &str =
    "Could not update the cart. Check that the backend is running, reachable and returns valid JSON.";

/// Outcome of an [`add_to_cart`](Storefront::add_to_cart) operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// The remote confirmed the upsert; display state reflects the
    /// response.
    Updated,
    /// No credential was presented; the operation was aborted locally with
    /// no network call.
    NotAuthenticated,
    /// The product is already in the cart and the one-click policy refused
    /// to bump its quantity. No network call was made.
    DuplicateRejected,
    /// The remote call failed; prior cart state was retained.
    Failed,
}

/// A UI event dispatched to the engine.
///
/// Commands decouple the engine from any specific UI callback mechanism:
/// the presentation layer translates clicks and keystrokes into commands
/// and reads the answer from state snapshots and the notification sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Load (or reload) the full catalog.
    LoadCatalog,
    /// A keystroke in the search field; debounced before executing.
    Search { query: String },
    /// Re-fetch the remote cart and reconcile it.
    RefreshCart,
    /// Add or update a product in the cart.
    AddToCart {
        product_id: ProductId,
        qty: u32,
        prevent_duplicate: bool,
    },
}

/// The client-side storefront engine.
///
/// Cloning is cheap; all clones share the same state.
#[derive(Clone)]
pub struct Storefront {
    inner: Arc<StorefrontInner>,
}

struct StorefrontInner {
    catalog_client: CatalogClient,
    cart_client: CartClient,
    sink: Arc<dyn NotificationSink>,
    state: Mutex<EngineState>,
    debounce: Mutex<Debouncer>,
}

#[derive(Default)]
struct EngineState {
    catalog: CatalogStore,
    cart: CartState,
}

impl Storefront {
    /// Create an engine that reports notifications through [`TracingSink`].
    #[must_use]
    pub fn new(config: &StorefrontConfig) -> Self {
        Self::with_sink(config, Arc::new(TracingSink))
    }

    /// Create an engine with a caller-supplied notification sink.
    #[must_use]
    pub fn with_sink(config: &StorefrontConfig, sink: Arc<dyn NotificationSink>) -> Self {
        Self {
            inner: Arc::new(StorefrontInner {
                catalog_client: CatalogClient::new(config),
                cart_client: CartClient::new(config),
                sink,
                state: Mutex::new(EngineState::default()),
                debounce: Mutex::new(Debouncer::new(config.search_debounce)),
            }),
        }
    }

    // The lock is only ever held between suspension points, so a poisoned
    // mutex can only hold plain data; recover it rather than propagate.
    fn state(&self) -> MutexGuard<'_, EngineState> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn debounce(&self) -> MutexGuard<'_, Debouncer> {
        self.inner
            .debounce
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    // =========================================================================
    // Snapshots
    // =========================================================================

    /// Snapshot of the full product list.
    #[must_use]
    pub fn products(&self) -> Vec<Product> {
        self.state().catalog.products().to_vec()
    }

    /// Snapshot of the current search view.
    #[must_use]
    pub fn search_state(&self) -> SearchState {
        self.state().catalog.search_state().clone()
    }

    /// Snapshot of the reconciled cart line items.
    #[must_use]
    pub fn cart_items(&self) -> Vec<CartLineItem> {
        self.state().cart.items().to_vec()
    }

    /// Total cost of the current cart.
    #[must_use]
    pub fn cart_total(&self) -> Decimal {
        cart::total_cost(self.state().cart.items())
    }

    /// Total number of units in the current cart.
    #[must_use]
    pub fn cart_quantity(&self) -> u32 {
        cart::total_quantity(self.state().cart.items())
    }

    // =========================================================================
    // Command dispatch
    // =========================================================================

    /// Dispatch a UI command.
    ///
    /// The credential travels alongside every command instead of being read
    /// from ambient state, so behavior stays deterministic and testable.
    /// `Search` goes through the debounce controller; everything else runs
    /// to completion before returning.
    pub async fn dispatch(&self, token: Option<&SecretString>, command: Command) {
        match command {
            Command::LoadCatalog => self.load_catalog().await,
            Command::Search { query } => self.schedule_search(query),
            Command::RefreshCart => self.refresh_cart(token).await,
            Command::AddToCart {
                product_id,
                qty,
                prevent_duplicate,
            } => {
                self.add_to_cart(token, &product_id, qty, prevent_duplicate)
                    .await;
            }
        }
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// Page-load flow: fetch the catalog, then the cart when a credential
    /// is present.
    pub async fn initialize(&self, token: Option<&SecretString>) {
        self.load_catalog().await;
        if let Some(token) = token {
            self.refresh_cart(Some(token)).await;
        }
    }

    /// Fetch the full catalog, replacing both the product list and the
    /// filtered view.
    ///
    /// On failure prior state is left untouched and a transient error is
    /// reported through the sink.
    #[instrument(skip(self))]
    pub async fn load_catalog(&self) {
        match self.inner.catalog_client.fetch_all().await {
            Ok(products) => self.state().catalog.replace_all(products),
            Err(error) => {
                tracing::warn!(%error, "catalog load failed");
                self.notify_remote_failure(&error, MSG_CATALOG_UNAVAILABLE);
            }
        }
    }

    /// Drop the cached catalog so the next load refetches.
    pub async fn invalidate_catalog(&self) {
        self.inner.catalog_client.invalidate().await;
    }

    /// Debounced search entry point: call on every keystroke.
    ///
    /// Cancels any pending scheduled search and arms a new one that fires
    /// after the configured quiet interval with no further calls. Only the
    /// most recent query within the interval is ever searched.
    pub fn schedule_search(&self, query: impl Into<String>) {
        let query = query.into();
        let engine = self.clone();
        self.debounce().schedule(async move {
            engine.search(&query).await;
        });
    }

    /// Execute a search immediately, replacing the filtered view.
    ///
    /// An empty match and a failed request both surface as the not-found
    /// display state, never as a notification. The full product list is
    /// unaffected either way.
    #[instrument(skip(self), fields(query = %query))]
    pub async fn search(&self, query: &str) {
        match self.inner.catalog_client.search(query).await {
            Ok(results) => self.state().catalog.apply_search(query.to_string(), results),
            Err(error) => {
                tracing::debug!(%error, "search returned no usable result");
                self.state().catalog.mark_search_failed(query.to_string());
            }
        }
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// Fetch the remote cart and reconcile it against the current catalog.
    ///
    /// Requires a credential; on failure the prior cart state is retained.
    #[instrument(skip(self, token))]
    pub async fn refresh_cart(&self, token: Option<&SecretString>) {
        let Some(token) = token else {
            self.inner.sink.notify(MSG_LOGIN_REQUIRED, Severity::Warning);
            return;
        };

        match self.inner.cart_client.fetch(token).await {
            Ok(entries) => {
                let mut guard = self.state();
                let state = &mut *guard;
                state.cart.apply(&entries, state.catalog.products());
            }
            Err(error) => {
                tracing::warn!(%error, "cart fetch failed");
                self.notify_remote_failure(&error, MSG_CART_UNAVAILABLE);
            }
        }
    }

    /// Add or update a product in the cart.
    ///
    /// With `prevent_duplicate` (the one-click catalog-add policy) the
    /// operation is refused locally when the product already has a line
    /// item; quantity steppers pass `false` to allow increment, decrement,
    /// and removal (`qty` 0).
    ///
    /// The upsert carries an absolute quantity. On success the response is
    /// reconciled into the new authoritative display list; nothing is
    /// mutated before the remote confirms.
    #[instrument(skip(self, token), fields(product_id = %product_id))]
    pub async fn add_to_cart(
        &self,
        token: Option<&SecretString>,
        product_id: &ProductId,
        qty: u32,
        prevent_duplicate: bool,
    ) -> AddOutcome {
        let Some(token) = token else {
            self.inner.sink.notify(MSG_LOGIN_REQUIRED, Severity::Warning);
            return AddOutcome::NotAuthenticated;
        };

        if prevent_duplicate && cart::contains_product(self.state().cart.items(), product_id) {
            self.inner.sink.notify(MSG_DUPLICATE_ITEM, Severity::Warning);
            return AddOutcome::DuplicateRejected;
        }

        match self.inner.cart_client.upsert(token, product_id, qty).await {
            Ok(entries) => {
                let mut guard = self.state();
                let state = &mut *guard;
                state.cart.apply(&entries, state.catalog.products());
                AddOutcome::Updated
            }
            Err(error) => {
                tracing::warn!(%error, "cart upsert failed");
                self.notify_remote_failure(&error, MSG_CART_UPDATE_FAILED);
                AddOutcome::Failed
            }
        }
    }

    /// Surface a remote failure: the server's message when it sent one,
    /// a generic fallback otherwise.
    fn notify_remote_failure(&self, error: &ApiError, fallback: &str) {
        match error.server_message() {
            Some(message) => self.inner.sink.notify(message, Severity::Error),
            None => self.inner.sink.notify(fallback, Severity::Error),
        }
    }
}
