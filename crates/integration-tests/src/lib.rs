//! Integration test support for Greenbasket.
//!
//! Provides an in-process mock of the remote storefront service, a
//! recording notification sink, and small helpers for wiring the engine to
//! both. The mock mirrors the remote contract the engine depends on:
//!
//! - `GET /api/v1/products` - full catalog
//! - `GET /api/v1/products/search?value=<q>` - case-insensitive substring
//!   match over name and category, 404 with an error body on no match
//! - `GET /api/v1/cart` - bearer-authenticated cart entries
//! - `POST /api/v1/cart` - absolute-quantity upsert returning the full
//!   entry list; qty 0 removes the item
//!
//! Failure payloads have the shape `{"success": false, "message": "..."}`.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p greenbasket-integration-tests
//! ```

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use rust_decimal::Decimal;
use secrecy::SecretString;
use serde::Deserialize;
use serde_json::json;
use url::Url;

use greenbasket_core::{CartEntry, Product, ProductId};
use greenbasket_storefront::StorefrontConfig;
use greenbasket_storefront::notify::{NotificationSink, Severity};

/// A bearer token the mock backend accepts.
pub const TEST_TOKEN: &str = "test-bearer-token";

/// Debounce quiet interval used by [`test_config`]. Long enough that rapid
/// successive calls land inside one interval even on a loaded machine.
pub const TEST_DEBOUNCE: Duration = Duration::from_millis(150);

// =============================================================================
// Helpers
// =============================================================================

/// Initialize test logging. Safe to call from every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

/// Engine configuration pointing at a served mock backend.
#[must_use]
pub fn test_config(api_url: Url) -> StorefrontConfig {
    let mut config = StorefrontConfig::new(api_url);
    config.search_debounce = TEST_DEBOUNCE;
    config
}

/// The bearer credential matching [`TEST_TOKEN`].
#[must_use]
pub fn bearer() -> SecretString {
    SecretString::from(TEST_TOKEN)
}

/// Build a catalog product.
#[must_use]
pub fn product(id: &str, name: &str, category: &str, cost: u32, rating: u8) -> Product {
    Product {
        id: ProductId::from(id),
        name: name.to_string(),
        category: category.to_string(),
        cost: Decimal::from(cost),
        rating,
        image: format!("https://img.example.com/{id}.png"),
    }
}

/// The catalog fixture served by [`MockBackend::with_default_catalog`].
#[must_use]
pub fn default_catalog() -> Vec<Product> {
    vec![
        product("v4sLtEcMpzabRyfx", "iPhone XR", "Phones", 100, 4),
        product("upLK9JbQ4rMhTwt4", "Basketball", "Sports", 100, 5),
        product(
            "PmInA797xJhMIPti",
            "Tan Leatherette Weekender Duffle",
            "Fashion",
            150,
            4,
        ),
    ]
}

// =============================================================================
// Recording sink
// =============================================================================

/// Notification sink that records every delivered message.
#[derive(Clone, Default)]
pub struct RecordingSink {
    notes: Arc<Mutex<Vec<(String, Severity)>>>,
}

impl NotificationSink for RecordingSink {
    fn notify(&self, message: &str, severity: Severity) {
        self.notes
            .lock()
            .expect("sink lock")
            .push((message.to_string(), severity));
    }
}

impl RecordingSink {
    /// All recorded notifications, oldest first.
    #[must_use]
    pub fn notes(&self) -> Vec<(String, Severity)> {
        self.notes.lock().expect("sink lock").clone()
    }

    /// The most recent notification, if any.
    #[must_use]
    pub fn last(&self) -> Option<(String, Severity)> {
        self.notes.lock().expect("sink lock").last().cloned()
    }
}

// =============================================================================
// Mock backend
// =============================================================================

/// In-process mock of the remote storefront service.
#[derive(Clone)]
pub struct MockBackend {
    inner: Arc<BackendInner>,
}

struct BackendInner {
    products: Vec<Product>,
    carts: Mutex<HashMap<String, Vec<CartEntry>>>,
    catalog_failing: AtomicBool,
    cart_requests: AtomicUsize,
    search_requests: AtomicUsize,
}

impl MockBackend {
    /// Create a backend serving the given catalog.
    #[must_use]
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            inner: Arc::new(BackendInner {
                products,
                carts: Mutex::new(HashMap::new()),
                catalog_failing: AtomicBool::new(false),
                cart_requests: AtomicUsize::new(0),
                search_requests: AtomicUsize::new(0),
            }),
        }
    }

    /// Create a backend serving [`default_catalog`].
    #[must_use]
    pub fn with_default_catalog() -> Self {
        Self::new(default_catalog())
    }

    /// Inject raw remote cart state for a token, orphans included.
    pub fn seed_cart(&self, token: &str, entries: Vec<CartEntry>) {
        self.inner
            .carts
            .lock()
            .expect("carts lock")
            .insert(token.to_string(), entries);
    }

    /// The remote cart entries currently stored for a token.
    #[must_use]
    pub fn cart_entries(&self, token: &str) -> Vec<CartEntry> {
        self.inner
            .carts
            .lock()
            .expect("carts lock")
            .get(token)
            .cloned()
            .unwrap_or_default()
    }

    /// Make `GET /products` answer 500 until reset.
    pub fn set_catalog_failing(&self, failing: bool) {
        self.inner.catalog_failing.store(failing, Ordering::SeqCst);
    }

    /// Number of cart reads and writes that reached the wire.
    #[must_use]
    pub fn cart_request_count(&self) -> usize {
        self.inner.cart_requests.load(Ordering::SeqCst)
    }

    /// Number of search requests that reached the wire.
    #[must_use]
    pub fn search_request_count(&self) -> usize {
        self.inner.search_requests.load(Ordering::SeqCst)
    }

    /// Bind an ephemeral port, serve in the background, and return the API
    /// base URL.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound.
    pub async fn serve(&self) -> Url {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock backend");
        let addr = listener.local_addr().expect("local addr");
        let router = self.router();
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("serve mock backend");
        });
        Url::parse(&format!("http://{addr}/api/v1")).expect("mock base url")
    }

    fn router(&self) -> Router {
        Router::new()
            .route("/api/v1/products", get(list_products))
            .route("/api/v1/products/search", get(search_products))
            .route("/api/v1/cart", get(fetch_cart).post(upsert_cart))
            .with_state(self.clone())
    }
}

// =============================================================================
// Handlers
// =============================================================================

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({"success": false, "message": message}))).into_response()
}

fn unauthorized() -> Response {
    error_response(
        StatusCode::UNAUTHORIZED,
        "Protected route, Oauth2 Bearer token not found",
    )
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::to_string)
}

async fn list_products(State(backend): State<MockBackend>) -> Response {
    if backend.inner.catalog_failing.load(Ordering::SeqCst) {
        return error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Something went wrong. Check the backend console for more details",
        );
    }
    Json(backend.inner.products.clone()).into_response()
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    value: String,
}

async fn search_products(
    State(backend): State<MockBackend>,
    Query(params): Query<SearchParams>,
) -> Response {
    backend.inner.search_requests.fetch_add(1, Ordering::SeqCst);

    let needle = params.value.to_lowercase();
    let matches: Vec<Product> = backend
        .inner
        .products
        .iter()
        .filter(|p| {
            p.name.to_lowercase().contains(&needle) || p.category.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect();

    if matches.is_empty() {
        return error_response(StatusCode::NOT_FOUND, "No products found");
    }
    Json(matches).into_response()
}

async fn fetch_cart(State(backend): State<MockBackend>, headers: HeaderMap) -> Response {
    backend.inner.cart_requests.fetch_add(1, Ordering::SeqCst);

    let Some(token) = bearer_token(&headers) else {
        return unauthorized();
    };
    let entries = backend.cart_entries(&token);
    Json(entries).into_response()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpsertBody {
    product_id: ProductId,
    qty: u32,
}

async fn upsert_cart(
    State(backend): State<MockBackend>,
    headers: HeaderMap,
    Json(body): Json<UpsertBody>,
) -> Response {
    backend.inner.cart_requests.fetch_add(1, Ordering::SeqCst);

    let Some(token) = bearer_token(&headers) else {
        return unauthorized();
    };
    if !backend
        .inner
        .products
        .iter()
        .any(|p| p.id == body.product_id)
    {
        return error_response(StatusCode::NOT_FOUND, "Product doesn't exist");
    }

    let mut carts = backend.inner.carts.lock().expect("carts lock");
    let entries = carts.entry(token).or_default();
    if body.qty == 0 {
        entries.retain(|e| e.product_id != body.product_id);
    } else if let Some(entry) = entries.iter_mut().find(|e| e.product_id == body.product_id) {
        entry.qty = body.qty;
    } else {
        entries.push(CartEntry::new(body.product_id, body.qty));
    }
    Json(entries.clone()).into_response()
}
