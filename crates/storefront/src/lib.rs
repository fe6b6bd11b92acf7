//! Greenbasket storefront engine.
//!
//! The client-side logic of a storefront: fetches a product catalog,
//! supports debounced search over it, and keeps a shopping cart
//! synchronized with a remote cart service. Rendering and navigation are
//! out of scope; the engine is driven by discrete UI events and answers
//! through state snapshots and a fire-and-forget notification sink.
//!
//! # Architecture
//!
//! - [`api`] - thin `reqwest` clients for the remote catalog and cart
//! - [`catalog`] - the product list and its filtered search view
//! - [`cart`] - reconciliation of remote cart entries into display line items
//! - [`debounce`] - coalescing of rapid search input into one delayed query
//! - [`engine`] - the [`Storefront`] facade wiring the pieces together
//!
//! Cart updates are confirm-then-reflect: the display list is only replaced
//! with the reconciliation of a remote-confirmed cart, never mutated
//! optimistically.
//!
//! # Example
//!
//! ```rust,ignore
//! use greenbasket_storefront::{Storefront, StorefrontConfig};
//!
//! let config = StorefrontConfig::from_env()?;
//! let store = Storefront::new(&config);
//!
//! // Page load: catalog first, then the cart when a credential is present.
//! store.initialize(config.auth_token.as_ref()).await;
//!
//! // Keystrokes coalesce into a single delayed search.
//! store.schedule_search("phone");
//!
//! // One-click add from the catalog refuses to bump an existing line item.
//! store
//!     .add_to_cart(config.auth_token.as_ref(), &product_id, 1, true)
//!     .await;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod debounce;
pub mod engine;
pub mod notify;

pub use config::StorefrontConfig;
pub use engine::{AddOutcome, Command, Storefront};
