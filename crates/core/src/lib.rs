//! Kirana Core - Shared domain types library.
//!
//! This crate provides common types used across all Kirana components:
//! - `storefront` - Customer-facing storefront library (catalog, cart, checkout)
//! - `cli` - Command-line storefront for browsing and cart management
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no caching.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and rupee amounts, the
//!   product/cart/store records served by the store backend, and the
//!   category filter used by the catalog view

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
