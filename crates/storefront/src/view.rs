//! Pure view derivation over catalog and cart snapshots.
//!
//! Everything here is a function of its inputs - no I/O, no caching. The
//! session layer fetches the snapshots; this module turns them into what
//! the front end renders: the filtered catalog, the set of product IDs in
//! the cart, and the priced-out cart summary.

use std::collections::HashSet;

use kirana_core::{CartLine, CategoryFilter, Product, ProductId, Rupees};

/// Subtotals at or above this ship free.
pub const FREE_DELIVERY_THRESHOLD: Rupees = Rupees::new(500);

/// Flat delivery surcharge below [`FREE_DELIVERY_THRESHOLD`].
pub const DELIVERY_FEE: Rupees = Rupees::new(50);

/// Filter the catalog by category and free-text search term.
///
/// Returns the subsequence of `products` (original order preserved) that
/// pass the category filter and, when the trimmed term is non-empty,
/// contain the lower-cased term in their lower-cased name or description.
/// `filter_products(p, CategoryFilter::All, "")` is the identity.
#[must_use]
pub fn filter_products(
    products: &[Product],
    filter: CategoryFilter,
    term: &str,
) -> Vec<Product> {
    let needle = term.trim().to_lowercase();
    products
        .iter()
        .filter(|product| filter.matches(product.category))
        .filter(|product| {
            needle.is_empty()
                || product.name.to_lowercase().contains(&needle)
                || product.description.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

/// The set of product IDs currently in the cart.
///
/// Quantity-independent; the renderer uses it to flip "Add to Cart"
/// buttons to "Added".
#[must_use]
pub fn cart_product_ids(lines: &[CartLine]) -> HashSet<ProductId> {
    lines.iter().map(|line| line.product_id).collect()
}

/// One cart line resolved against the catalog and priced out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLineView {
    pub product: Product,
    pub quantity: u32,
    pub line_total: Rupees,
}

/// The priced-out cart: resolved lines, subtotal, delivery fee, total.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CartSummary {
    pub lines: Vec<CartLineView>,
    pub subtotal: Rupees,
    pub delivery_fee: Rupees,
    pub total: Rupees,
}

impl CartSummary {
    /// Resolve cart lines against the catalog and total them up.
    ///
    /// Lines whose product ID is not in `products` are dropped: they
    /// contribute nothing to the subtotal and do not appear in `lines`.
    #[must_use]
    pub fn from_lines(cart_lines: &[CartLine], products: &[Product]) -> Self {
        let lines: Vec<CartLineView> = cart_lines
            .iter()
            .filter_map(|line| {
                let product = products.iter().find(|p| p.id == line.product_id)?;
                Some(CartLineView {
                    product: product.clone(),
                    quantity: line.quantity,
                    line_total: product.price * line.quantity,
                })
            })
            .collect();

        let subtotal: Rupees = lines.iter().map(|line| line.line_total).sum();
        let delivery_fee = if subtotal >= FREE_DELIVERY_THRESHOLD {
            Rupees::ZERO
        } else {
            DELIVERY_FEE
        };

        Self {
            subtotal,
            delivery_fee,
            total: subtotal + delivery_fee,
            lines,
        }
    }

    /// Number of lines in the cart (the header badge count).
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.lines.len()
    }

    /// How much more to spend before delivery is free.
    ///
    /// `None` when the cart is empty or the threshold is already met.
    #[must_use]
    pub fn remaining_for_free_delivery(&self) -> Option<Rupees> {
        if self.lines.is_empty() || self.subtotal >= FREE_DELIVERY_THRESHOLD {
            None
        } else {
            Some(FREE_DELIVERY_THRESHOLD.saturating_sub(self.subtotal))
        }
    }
}

/// Everything the front end renders, derived in one place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontView {
    /// Catalog after category and search filtering.
    pub products: Vec<Product>,
    /// Product IDs in the cart, for button state.
    pub in_cart: HashSet<ProductId>,
    /// The priced-out cart.
    pub cart: CartSummary,
}

impl StorefrontView {
    /// Derive the full view from raw snapshots.
    #[must_use]
    pub fn derive(
        products: &[Product],
        cart_lines: &[CartLine],
        filter: CategoryFilter,
        term: &str,
    ) -> Self {
        Self {
            products: filter_products(products, filter, term),
            in_cart: cart_product_ids(cart_lines),
            cart: CartSummary::from_lines(cart_lines, products),
        }
    }
}
