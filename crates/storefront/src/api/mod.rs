//! The remote store API consumed by the storefront.
//!
//! The backend exposes a small CRUD interface over the catalog, the cart,
//! and store metadata. [`StoreApi`] captures that interface as an
//! object-safe trait so the session layer can run against the real HTTP
//! backend or an in-memory test double.

mod http;

pub use http::HttpStoreApi;

use async_trait::async_trait;
use thiserror::Error;

use kirana_core::{CartLine, Product, ProductCategory, ProductId, StoreInfo};

/// Errors that can occur when calling the store API.
#[derive(Debug, Error)]
pub enum StoreApiError {
    /// The backend could not be reached (connection refused or timed out).
    ///
    /// Read paths degrade to an empty result on this variant rather than
    /// failing the caller.
    #[error("store backend unavailable: {0}")]
    Unavailable(String),

    /// HTTP request failed for some other transport reason.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend returned a non-success status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// The catalog has already been seeded.
    ///
    /// Expected on every bootstrap after the first; callers swallow it.
    #[error("catalog already seeded")]
    AlreadySeeded,

    /// Response body did not parse as the expected shape.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Client-side configuration problem (bad base URL or token).
    #[error("invalid store API configuration: {0}")]
    InvalidConfig(String),
}

impl StoreApiError {
    /// Whether this error means the backend simply was not reachable.
    #[must_use]
    pub const fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}

/// The remote interface the store backend exposes.
///
/// All methods are single independent calls; the backend owns all state
/// and the client never merges concurrent edits (last call wins).
#[async_trait]
pub trait StoreApi: Send + Sync {
    /// Fetch the full product catalog.
    async fn all_products(&self) -> Result<Vec<Product>, StoreApiError>;

    /// Fetch products in one category.
    ///
    /// The catalog view filters client-side and does not call this, but
    /// the backend exposes it and the CLI surfaces it.
    async fn products_by_category(
        &self,
        category: ProductCategory,
    ) -> Result<Vec<Product>, StoreApiError>;

    /// Search products by name on the backend.
    ///
    /// Same remark as [`Self::products_by_category`]: the derived view
    /// searches client-side instead.
    async fn search_products(&self, term: &str) -> Result<Vec<Product>, StoreApiError>;

    /// Fetch the current cart lines.
    async fn cart(&self) -> Result<Vec<CartLine>, StoreApiError>;

    /// Add `quantity` units of a product to the cart.
    async fn add_to_cart(
        &self,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<(), StoreApiError>;

    /// Remove a product's line from the cart entirely.
    ///
    /// There is no decrement primitive; the whole line goes regardless of
    /// its quantity.
    async fn remove_from_cart(&self, product_id: ProductId) -> Result<(), StoreApiError>;

    /// Remove every line from the cart.
    async fn clear_cart(&self) -> Result<(), StoreApiError>;

    /// Fetch store metadata (name, address, phone, hours).
    async fn store_info(&self) -> Result<StoreInfo, StoreApiError>;

    /// Seed the catalog with its initial products.
    ///
    /// Fails with [`StoreApiError::AlreadySeeded`] when the catalog is
    /// already populated.
    async fn initialize_products(&self) -> Result<(), StoreApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StoreApiError::Api {
            status: 500,
            message: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "API error: 500 - boom");
        assert!(!err.is_unavailable());
        assert!(StoreApiError::Unavailable("connection refused".to_string()).is_unavailable());
    }
}
