//! End-to-end tests for the Kirana storefront.
//!
//! # Running Tests
//!
//! ```bash
//! # Mock-backed tests (always run)
//! cargo test -p kirana-integration-tests
//!
//! # Live tests against a running store backend
//! KIRANA_STORE_API_URL=http://localhost:8080 \
//!     cargo test -p kirana-integration-tests -- --ignored
//! ```
//!
//! This crate's library is [`MockStoreApi`], an in-memory store backend
//! with failure and latency knobs, shared by the test files under
//! `tests/`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use kirana_core::{CartLine, Product, ProductCategory, ProductId, Rupees, StoreInfo};
use kirana_storefront::api::{StoreApi, StoreApiError};

/// The catalog `initialize_products` seeds, mirroring a typical kirana
/// shelf across every category.
#[must_use]
pub fn sample_catalog() -> Vec<Product> {
    fn product(
        id: u64,
        name: &str,
        description: &str,
        category: ProductCategory,
        price: u64,
        stock: u32,
    ) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_string(),
            description: description.to_string(),
            category,
            price: Rupees::new(price),
            stock_quantity: stock,
        }
    }

    vec![
        product(
            1,
            "Atta",
            "Whole wheat flour, 5kg bag",
            ProductCategory::Groceries,
            50,
            20,
        ),
        product(
            2,
            "Milk",
            "Full cream milk, 1L pouch",
            ProductCategory::Dairy,
            40,
            30,
        ),
        product(
            3,
            "Parle-G",
            "Glucose biscuits, family pack",
            ProductCategory::Snacks,
            30,
            50,
        ),
        product(
            4,
            "Masala Chai",
            "Spiced tea blend, 250g box",
            ProductCategory::Beverages,
            120,
            4,
        ),
        product(
            5,
            "Neem Soap",
            "Herbal bathing soap bar",
            ProductCategory::PersonalCare,
            35,
            0,
        ),
        product(
            6,
            "Detergent Powder",
            "Washing powder, 1kg pack",
            ProductCategory::Household,
            90,
            12,
        ),
        product(
            7,
            "Paneer",
            "Fresh cottage cheese, 200g",
            ProductCategory::Dairy,
            80,
            8,
        ),
    ]
}

/// The store details the mock backend serves.
#[must_use]
pub fn sample_store_info() -> StoreInfo {
    StoreInfo {
        name: "Sharma Kirana Store".to_string(),
        address: "12 MG Road, Pune 411001".to_string(),
        phone: "+91 98765 43210".to_string(),
        hours: "Mon-Sun 7am - 10pm".to_string(),
    }
}

/// In-memory store backend for driving the full storefront session.
///
/// Behaves like the real backend: adds accumulate quantity per product,
/// removes drop whole lines, and re-seeding a populated catalog fails
/// with `AlreadySeeded`. Knobs flip it unreachable ([`Self::set_unavailable`]),
/// make every call fail ([`Self::set_failing`]), or add latency
/// ([`Self::set_latency`]).
#[derive(Default)]
pub struct MockStoreApi {
    products: Mutex<Vec<Product>>,
    cart: Mutex<Vec<CartLine>>,
    unavailable: AtomicBool,
    failing: AtomicBool,
    latency: Mutex<Option<Duration>>,
}

impl MockStoreApi {
    /// A mock with an empty, unseeded catalog.
    #[must_use]
    pub fn unseeded() -> Self {
        Self::default()
    }

    /// A mock whose catalog is already populated with [`sample_catalog`].
    #[must_use]
    pub fn seeded() -> Self {
        let mock = Self::default();
        *mock.products.lock().expect("lock") = sample_catalog();
        mock
    }

    /// Make every call fail as if the backend were unreachable.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Make every call fail with a server error.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Delay every call by `latency`.
    pub fn set_latency(&self, latency: Option<Duration>) {
        *self.latency.lock().expect("lock") = latency;
    }

    /// The raw cart lines currently held by the mock.
    #[must_use]
    pub fn cart_lines(&self) -> Vec<CartLine> {
        self.cart.lock().expect("lock").clone()
    }

    async fn before_call(&self) -> Result<(), StoreApiError> {
        let latency = *self.latency.lock().expect("lock");
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreApiError::Unavailable(
                "connection refused".to_string(),
            ));
        }
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreApiError::Api {
                status: 500,
                message: "internal server error".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl StoreApi for MockStoreApi {
    async fn all_products(&self) -> Result<Vec<Product>, StoreApiError> {
        self.before_call().await?;
        Ok(self.products.lock().expect("lock").clone())
    }

    async fn products_by_category(
        &self,
        category: ProductCategory,
    ) -> Result<Vec<Product>, StoreApiError> {
        self.before_call().await?;
        Ok(self
            .products
            .lock()
            .expect("lock")
            .iter()
            .filter(|p| p.category == category)
            .cloned()
            .collect())
    }

    async fn search_products(&self, term: &str) -> Result<Vec<Product>, StoreApiError> {
        self.before_call().await?;
        let needle = term.to_lowercase();
        Ok(self
            .products
            .lock()
            .expect("lock")
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    async fn cart(&self) -> Result<Vec<CartLine>, StoreApiError> {
        self.before_call().await?;
        Ok(self.cart.lock().expect("lock").clone())
    }

    async fn add_to_cart(
        &self,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<(), StoreApiError> {
        self.before_call().await?;
        let mut cart = self.cart.lock().expect("lock");
        if let Some(line) = cart.iter_mut().find(|l| l.product_id == product_id) {
            line.quantity += quantity;
        } else {
            cart.push(CartLine::new(product_id, quantity));
        }
        Ok(())
    }

    async fn remove_from_cart(&self, product_id: ProductId) -> Result<(), StoreApiError> {
        self.before_call().await?;
        self.cart
            .lock()
            .expect("lock")
            .retain(|l| l.product_id != product_id);
        Ok(())
    }

    async fn clear_cart(&self) -> Result<(), StoreApiError> {
        self.before_call().await?;
        self.cart.lock().expect("lock").clear();
        Ok(())
    }

    async fn store_info(&self) -> Result<StoreInfo, StoreApiError> {
        self.before_call().await?;
        Ok(sample_store_info())
    }

    async fn initialize_products(&self) -> Result<(), StoreApiError> {
        self.before_call().await?;
        let mut products = self.products.lock().expect("lock");
        if !products.is_empty() {
            return Err(StoreApiError::AlreadySeeded);
        }
        *products = sample_catalog();
        Ok(())
    }
}
