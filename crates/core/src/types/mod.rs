//! Core types for Greenbasket.
//!
//! Wire names follow the remote service: products carry their id as `_id`,
//! cart entries are camelCase (`productId`, `qty`).

pub mod cart;
pub mod id;
pub mod product;

pub use cart::{CartEntry, CartLineItem};
pub use id::ProductId;
pub use product::Product;
