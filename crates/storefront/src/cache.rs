//! Read-through cache for store API snapshots.
//!
//! Remote data is cached per query kind - catalog, cart, store info -
//! using `moka` with a TTL per kind. The cart entry is additionally
//! invalidated by the session after every successful mutation, so its TTL
//! only covers edits made outside this client.

use std::time::{Duration, Instant};

use moka::Expiry;
use moka::future::Cache;

use kirana_core::{CartLine, Product, StoreInfo};

use crate::config::CacheConfig;

/// Cache key: one entry per query kind.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum QueryKey {
    Products,
    Cart,
    StoreInfo,
}

/// Cached value types.
#[derive(Debug, Clone)]
pub enum QueryValue {
    Products(Vec<Product>),
    Cart(Vec<CartLine>),
    StoreInfo(StoreInfo),
}

/// Gives each query kind its own time-to-live.
struct PerKindTtl {
    config: CacheConfig,
}

impl Expiry<QueryKey, QueryValue> for PerKindTtl {
    fn expire_after_create(
        &self,
        key: &QueryKey,
        _value: &QueryValue,
        _created_at: Instant,
    ) -> Option<Duration> {
        let ttl = match key {
            QueryKey::Products => self.config.products_ttl,
            QueryKey::Cart => self.config.cart_ttl,
            QueryKey::StoreInfo => self.config.store_info_ttl,
        };
        Some(ttl)
    }
}

/// The storefront's snapshot cache.
#[derive(Clone)]
pub struct QueryCache {
    inner: Cache<QueryKey, QueryValue>,
}

impl QueryCache {
    /// Build a cache with the configured per-kind TTLs.
    #[must_use]
    pub fn new(config: &CacheConfig) -> Self {
        let inner = Cache::builder()
            // One entry per QueryKey variant.
            .max_capacity(8)
            .expire_after(PerKindTtl {
                config: config.clone(),
            })
            .build();
        Self { inner }
    }

    pub async fn get(&self, key: QueryKey) -> Option<QueryValue> {
        self.inner.get(&key).await
    }

    pub async fn insert(&self, key: QueryKey, value: QueryValue) {
        self.inner.insert(key, value).await;
    }

    pub async fn invalidate(&self, key: QueryKey) {
        self.inner.invalidate(&key).await;
    }
}
