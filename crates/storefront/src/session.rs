//! The storefront session: cached queries, cart mutations, checkout.
//!
//! A session owns a [`StoreApi`] handle and the [`QueryCache`]. Reads go
//! through the cache and degrade to empty snapshots when the backend is
//! unreachable; cart mutations invalidate the cached cart on success so
//! the next read reflects server state. Snapshots are immutable and
//! refreshed by refetch - there is no client-side merging, and the last
//! call wins.

use chrono::{DateTime, Utc};
use tracing::{debug, error, info, instrument, warn};

use kirana_core::{CartLine, CategoryFilter, Product, ProductId, StoreInfo};

use crate::api::{StoreApi, StoreApiError};
use crate::cache::{QueryCache, QueryKey, QueryValue};
use crate::config::CacheConfig;
use crate::error::StorefrontError;
use crate::view::{CartSummary, StorefrontView};

/// A placed order: the final priced-out cart and when it was placed.
///
/// There is no order lifecycle behind this; checkout summarizes the cart
/// and clears it.
#[derive(Debug, Clone)]
pub struct OrderReceipt {
    pub summary: CartSummary,
    pub placed_at: DateTime<Utc>,
}

/// Client session against one store backend.
pub struct StorefrontSession<A> {
    api: A,
    cache: QueryCache,
}

impl<A: StoreApi> StorefrontSession<A> {
    /// Create a session over an API handle.
    #[must_use]
    pub fn new(api: A, cache_config: &CacheConfig) -> Self {
        Self {
            api,
            cache: QueryCache::new(cache_config),
        }
    }

    /// The underlying store API handle.
    ///
    /// The derived catalog view filters client-side, but the backend's own
    /// category and search endpoints stay reachable through here.
    pub const fn api(&self) -> &A {
        &self.api
    }

    // -------------------------------------------------------------------
    // Queries (read-through, degrade when the backend is unreachable)
    // -------------------------------------------------------------------

    /// The product catalog, served from cache when fresh.
    ///
    /// Returns an empty catalog when the backend is unreachable; other API
    /// errors propagate.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::Api`] on a non-transport API failure.
    #[instrument(skip(self))]
    pub async fn products(&self) -> Result<Vec<Product>, StorefrontError> {
        if let Some(QueryValue::Products(products)) = self.cache.get(QueryKey::Products).await {
            debug!("cache hit for products");
            return Ok(products);
        }
        self.fetch_products().await
    }

    /// Refetch the catalog, bypassing whatever is cached.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::Api`] on a non-transport API failure.
    #[instrument(skip(self))]
    pub async fn refresh_products(&self) -> Result<Vec<Product>, StorefrontError> {
        self.cache.invalidate(QueryKey::Products).await;
        self.fetch_products().await
    }

    async fn fetch_products(&self) -> Result<Vec<Product>, StorefrontError> {
        match self.api.all_products().await {
            Ok(products) => {
                self.cache
                    .insert(QueryKey::Products, QueryValue::Products(products.clone()))
                    .await;
                Ok(products)
            }
            Err(e) if e.is_unavailable() => {
                warn!(error = %e, "store backend unreachable, serving empty catalog");
                Ok(Vec::new())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// The current cart lines, served from cache when fresh.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::Api`] on a non-transport API failure.
    #[instrument(skip(self))]
    pub async fn cart(&self) -> Result<Vec<CartLine>, StorefrontError> {
        if let Some(QueryValue::Cart(lines)) = self.cache.get(QueryKey::Cart).await {
            debug!("cache hit for cart");
            return Ok(lines);
        }
        match self.api.cart().await {
            Ok(lines) => {
                self.cache
                    .insert(QueryKey::Cart, QueryValue::Cart(lines.clone()))
                    .await;
                Ok(lines)
            }
            Err(e) if e.is_unavailable() => {
                warn!(error = %e, "store backend unreachable, serving empty cart");
                Ok(Vec::new())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Store metadata, served from cache when fresh.
    ///
    /// Falls back to the empty placeholder when the backend is
    /// unreachable.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::Api`] on a non-transport API failure.
    #[instrument(skip(self))]
    pub async fn store_info(&self) -> Result<StoreInfo, StorefrontError> {
        if let Some(QueryValue::StoreInfo(info)) = self.cache.get(QueryKey::StoreInfo).await {
            debug!("cache hit for store info");
            return Ok(info);
        }
        match self.api.store_info().await {
            Ok(info) => {
                self.cache
                    .insert(QueryKey::StoreInfo, QueryValue::StoreInfo(info.clone()))
                    .await;
                Ok(info)
            }
            Err(e) if e.is_unavailable() => {
                warn!(error = %e, "store backend unreachable, serving placeholder store info");
                Ok(StoreInfo::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    // -------------------------------------------------------------------
    // Cart mutations (reject on failure, invalidate cart cache on success)
    // -------------------------------------------------------------------

    /// Add one unit of a product to the cart.
    ///
    /// The backend accumulates quantity across repeated adds; this client
    /// always sends quantity 1 per call, matching the storefront's
    /// one-tap add.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::Api`] when the call fails; nothing is
    /// retried or rolled back.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn add_to_cart(&self, product_id: ProductId) -> Result<(), StorefrontError> {
        if let Err(e) = self.api.add_to_cart(product_id, 1).await {
            error!(error = %e, "add to cart failed");
            return Err(e.into());
        }
        self.cache.invalidate(QueryKey::Cart).await;
        Ok(())
    }

    /// Remove a product's line from the cart entirely, whatever its
    /// quantity.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::Api`] when the call fails.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn remove_from_cart(&self, product_id: ProductId) -> Result<(), StorefrontError> {
        if let Err(e) = self.api.remove_from_cart(product_id).await {
            error!(error = %e, "remove from cart failed");
            return Err(e.into());
        }
        self.cache.invalidate(QueryKey::Cart).await;
        Ok(())
    }

    /// Empty the cart.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::Api`] when the call fails.
    #[instrument(skip(self))]
    pub async fn clear_cart(&self) -> Result<(), StorefrontError> {
        if let Err(e) = self.api.clear_cart().await {
            error!(error = %e, "clear cart failed");
            return Err(e.into());
        }
        self.cache.invalidate(QueryKey::Cart).await;
        Ok(())
    }

    // -------------------------------------------------------------------
    // Orchestration
    // -------------------------------------------------------------------

    /// First-run bootstrap: fetch the catalog and seed it if empty.
    ///
    /// A failed seed because the catalog is already populated is the
    /// normal case and is swallowed; any other seed failure is logged and
    /// the refetch happens regardless.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::Api`] on a non-transport API failure.
    #[instrument(skip(self))]
    pub async fn bootstrap(&self) -> Result<Vec<Product>, StorefrontError> {
        let products = self.refresh_products().await?;
        if !products.is_empty() {
            return Ok(products);
        }

        match self.api.initialize_products().await {
            Ok(()) => info!("seeded the product catalog"),
            Err(StoreApiError::AlreadySeeded) => debug!("catalog already seeded"),
            Err(e) => warn!(error = %e, "catalog seed failed"),
        }
        self.refresh_products().await
    }

    /// Derive the full storefront view for the active filter and search
    /// term from the current catalog and cart snapshots.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::Api`] on a non-transport API failure.
    pub async fn view(
        &self,
        filter: CategoryFilter,
        term: &str,
    ) -> Result<StorefrontView, StorefrontError> {
        let products = self.products().await?;
        let cart_lines = self.cart().await?;
        Ok(StorefrontView::derive(&products, &cart_lines, filter, term))
    }

    /// Place the order: summarize the cart, then clear it.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::EmptyCart`] when no cart line resolves
    /// to a catalog product, or [`StorefrontError::Api`] when the backend
    /// rejects the clear.
    #[instrument(skip(self))]
    pub async fn checkout(&self) -> Result<OrderReceipt, StorefrontError> {
        let products = self.products().await?;
        let lines = self.cart().await?;
        let summary = CartSummary::from_lines(&lines, &products);
        if summary.lines.is_empty() {
            return Err(StorefrontError::EmptyCart);
        }

        self.clear_cart().await?;
        info!(total = %summary.total, items = summary.item_count(), "order placed");
        Ok(OrderReceipt {
            summary,
            placed_at: Utc::now(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use kirana_core::{ProductCategory, Rupees};

    /// Minimal scripted backend for session unit tests. The shared mock
    /// with latency and failure knobs lives in the integration-tests
    /// crate; this one only counts calls and flips failure modes.
    #[derive(Default)]
    struct ScriptedApi {
        products: Mutex<Vec<Product>>,
        cart: Mutex<Vec<CartLine>>,
        unavailable: std::sync::atomic::AtomicBool,
        seeded: std::sync::atomic::AtomicBool,
        product_fetches: AtomicUsize,
        cart_fetches: AtomicUsize,
    }

    impl ScriptedApi {
        fn check_reachable(&self) -> Result<(), StoreApiError> {
            if self.unavailable.load(Ordering::SeqCst) {
                Err(StoreApiError::Unavailable("connection refused".to_string()))
            } else {
                Ok(())
            }
        }
    }

    #[async_trait]
    impl StoreApi for ScriptedApi {
        async fn all_products(&self) -> Result<Vec<Product>, StoreApiError> {
            self.check_reachable()?;
            self.product_fetches.fetch_add(1, Ordering::SeqCst);
            Ok(self.products.lock().unwrap().clone())
        }

        async fn products_by_category(
            &self,
            category: ProductCategory,
        ) -> Result<Vec<Product>, StoreApiError> {
            let products = self.all_products().await?;
            Ok(products.into_iter().filter(|p| p.category == category).collect())
        }

        async fn search_products(&self, term: &str) -> Result<Vec<Product>, StoreApiError> {
            let needle = term.to_lowercase();
            let products = self.all_products().await?;
            Ok(products
                .into_iter()
                .filter(|p| p.name.to_lowercase().contains(&needle))
                .collect())
        }

        async fn cart(&self) -> Result<Vec<CartLine>, StoreApiError> {
            self.check_reachable()?;
            self.cart_fetches.fetch_add(1, Ordering::SeqCst);
            Ok(self.cart.lock().unwrap().clone())
        }

        async fn add_to_cart(
            &self,
            product_id: ProductId,
            quantity: u32,
        ) -> Result<(), StoreApiError> {
            self.check_reachable()?;
            let mut cart = self.cart.lock().unwrap();
            if let Some(line) = cart.iter_mut().find(|l| l.product_id == product_id) {
                line.quantity += quantity;
            } else {
                cart.push(CartLine::new(product_id, quantity));
            }
            Ok(())
        }

        async fn remove_from_cart(&self, product_id: ProductId) -> Result<(), StoreApiError> {
            self.check_reachable()?;
            self.cart.lock().unwrap().retain(|l| l.product_id != product_id);
            Ok(())
        }

        async fn clear_cart(&self) -> Result<(), StoreApiError> {
            self.check_reachable()?;
            self.cart.lock().unwrap().clear();
            Ok(())
        }

        async fn store_info(&self) -> Result<StoreInfo, StoreApiError> {
            self.check_reachable()?;
            Ok(StoreInfo {
                name: "Sharma Kirana Store".to_string(),
                address: "12 MG Road".to_string(),
                phone: "+91 98765 43210".to_string(),
                hours: "7am - 10pm".to_string(),
            })
        }

        async fn initialize_products(&self) -> Result<(), StoreApiError> {
            self.check_reachable()?;
            if self.seeded.swap(true, Ordering::SeqCst) {
                return Err(StoreApiError::AlreadySeeded);
            }
            *self.products.lock().unwrap() = vec![sample_product(1, 40)];
            Ok(())
        }
    }

    fn sample_product(id: u64, price: u64) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            description: String::new(),
            category: ProductCategory::Groceries,
            price: Rupees::new(price),
            stock_quantity: 10,
        }
    }

    fn session_with(api: ScriptedApi) -> StorefrontSession<ScriptedApi> {
        StorefrontSession::new(api, &CacheConfig::default())
    }

    #[tokio::test]
    async fn test_products_read_through_cache() {
        let api = ScriptedApi::default();
        *api.products.lock().unwrap() = vec![sample_product(1, 40)];
        let session = session_with(api);

        let first = session.products().await.unwrap();
        let second = session.products().await.unwrap();
        assert_eq!(first, second);
        assert_eq!(session.api.product_fetches.load(Ordering::SeqCst), 1);

        session.refresh_products().await.unwrap();
        assert_eq!(session.api.product_fetches.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_reads_degrade_when_unreachable() {
        let api = ScriptedApi::default();
        api.unavailable.store(true, Ordering::SeqCst);
        let session = session_with(api);

        assert!(session.products().await.unwrap().is_empty());
        assert!(session.cart().await.unwrap().is_empty());
        assert_eq!(session.store_info().await.unwrap(), StoreInfo::default());
    }

    #[tokio::test]
    async fn test_empty_degraded_result_is_not_cached() {
        let api = ScriptedApi::default();
        api.unavailable.store(true, Ordering::SeqCst);
        let session = session_with(api);

        assert!(session.products().await.unwrap().is_empty());

        // Backend comes back; the next read must hit it, not a cached
        // empty snapshot.
        session.api.unavailable.store(false, Ordering::SeqCst);
        *session.api.products.lock().unwrap() = vec![sample_product(1, 40)];
        assert_eq!(session.products().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_mutation_invalidates_cart_cache() {
        let api = ScriptedApi::default();
        *api.products.lock().unwrap() = vec![sample_product(1, 40)];
        let session = session_with(api);

        assert!(session.cart().await.unwrap().is_empty());
        session.add_to_cart(ProductId::new(1)).await.unwrap();

        // The cached empty cart was invalidated by the mutation.
        let cart = session.cart().await.unwrap();
        assert_eq!(cart, vec![CartLine::new(ProductId::new(1), 1)]);
        assert_eq!(session.api.cart_fetches.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_failed_mutation_keeps_cache() {
        let api = ScriptedApi::default();
        let session = session_with(api);

        assert!(session.cart().await.unwrap().is_empty());
        session.api.unavailable.store(true, Ordering::SeqCst);

        let err = session.add_to_cart(ProductId::new(1)).await.unwrap_err();
        assert!(matches!(err, StorefrontError::Api(e) if e.is_unavailable()));

        // The cached snapshot still serves.
        assert!(session.cart().await.unwrap().is_empty());
        assert_eq!(session.api.cart_fetches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_bootstrap_seeds_empty_catalog() {
        let session = session_with(ScriptedApi::default());

        let products = session.bootstrap().await.unwrap();
        assert_eq!(products.len(), 1);
        assert!(session.api.seeded.load(Ordering::SeqCst));

        // Second bootstrap hits AlreadySeeded and swallows it.
        let products = session.bootstrap().await.unwrap();
        assert_eq!(products.len(), 1);
    }

    #[tokio::test]
    async fn test_bootstrap_skips_seed_when_catalog_populated() {
        let api = ScriptedApi::default();
        *api.products.lock().unwrap() = vec![sample_product(1, 40)];
        let session = session_with(api);

        session.bootstrap().await.unwrap();
        assert!(!session.api.seeded.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_checkout_clears_cart_and_totals() {
        let api = ScriptedApi::default();
        *api.products.lock().unwrap() = vec![sample_product(1, 100)];
        let session = session_with(api);

        for _ in 0..3 {
            session.add_to_cart(ProductId::new(1)).await.unwrap();
        }

        let receipt = session.checkout().await.unwrap();
        assert_eq!(receipt.summary.subtotal, Rupees::new(300));
        assert_eq!(receipt.summary.total, Rupees::new(350));
        assert!(session.cart().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_checkout_rejects_empty_cart() {
        let api = ScriptedApi::default();
        *api.products.lock().unwrap() = vec![sample_product(1, 100)];
        let session = session_with(api);

        let err = session.checkout().await.unwrap_err();
        assert!(matches!(err, StorefrontError::EmptyCart));
    }

    #[tokio::test]
    async fn test_checkout_rejects_cart_of_dangling_lines() {
        let api = ScriptedApi::default();
        let session = session_with(api);

        // Line for a product the catalog does not know.
        session.add_to_cart(ProductId::new(99)).await.unwrap();
        let err = session.checkout().await.unwrap_err();
        assert!(matches!(err, StorefrontError::EmptyCart));
    }

    #[tokio::test]
    async fn test_view_combines_snapshots() {
        let api = ScriptedApi::default();
        *api.products.lock().unwrap() = vec![
            sample_product(1, 40),
            Product {
                category: ProductCategory::Dairy,
                name: "Milk".to_string(),
                ..sample_product(2, 60)
            },
        ];
        let session = session_with(api);
        session.add_to_cart(ProductId::new(2)).await.unwrap();

        let view = session
            .view(ProductCategory::Dairy.into(), "")
            .await
            .unwrap();
        assert_eq!(view.products.len(), 1);
        assert!(view.in_cart.contains(&ProductId::new(2)));
        assert_eq!(view.cart.subtotal, Rupees::new(60));
    }
}
