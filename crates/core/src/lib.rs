//! Greenbasket Core - Shared types library.
//!
//! This crate provides the data model shared by all Greenbasket components:
//! - `storefront` - the client-side catalog/cart engine
//! - `integration-tests` - end-to-end tests against a mock backend
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. This keeps
//! it lightweight and allows it to be used anywhere, including inside the
//! test backend that simulates the remote service.
//!
//! # Modules
//!
//! - [`types`] - Products, cart entries, and the line items derived from them

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
