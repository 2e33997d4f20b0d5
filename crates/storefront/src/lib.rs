//! Kirana storefront library.
//!
//! Everything the customer-facing front end needs short of rendering:
//! fetching catalog/cart/store data from the store backend, caching the
//! snapshots, deriving the filtered catalog view and cart totals, and
//! driving cart mutations and checkout.
//!
//! # Architecture
//!
//! - The store backend is the source of truth - no local persistence,
//!   direct API calls over JSON
//! - In-memory caching via `moka` for API responses, invalidated after
//!   each successful cart mutation
//! - All view derivation ([`view`]) is pure and synchronous; only the
//!   [`session`] layer does I/O
//!
//! # Example
//!
//! ```rust,ignore
//! use kirana_storefront::api::HttpStoreApi;
//! use kirana_storefront::config::StorefrontConfig;
//! use kirana_storefront::session::StorefrontSession;
//! use kirana_core::CategoryFilter;
//!
//! let config = StorefrontConfig::from_env()?;
//! let api = HttpStoreApi::new(&config)?;
//! let session = StorefrontSession::new(api, &config.cache);
//!
//! session.bootstrap().await?;
//! let view = session.view(CategoryFilter::All, "milk").await?;
//! for product in &view.products {
//!     println!("{} {}", product.name, product.price);
//! }
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod session;
pub mod view;
