//! Core types for the Kirana storefront.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod cart;
pub mod category;
pub mod id;
pub mod money;
pub mod product;
pub mod store;

pub use cart::CartLine;
pub use category::{CategoryFilter, CategoryParseError, ProductCategory};
pub use id::*;
pub use money::Rupees;
pub use product::Product;
pub use store::StoreInfo;
