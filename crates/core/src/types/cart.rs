//! Cart lines.

use serde::{Deserialize, Serialize};

use super::ProductId;

/// One line of the remote cart: a product reference and a quantity.
///
/// Lines carry no product data of their own; the storefront resolves them
/// against the catalog when building a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product_id: ProductId,
    pub quantity: u32,
}

impl CartLine {
    #[must_use]
    pub const fn new(product_id: ProductId, quantity: u32) -> Self {
        Self {
            product_id,
            quantity,
        }
    }
}
