//! Catalog products.

use serde::{Deserialize, Serialize};

use super::{ProductCategory, ProductId, Rupees};

/// A product in the store catalog, as returned by the store API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub category: ProductCategory,
    /// Unit price in whole rupees.
    #[serde(rename = "priceInr")]
    pub price: Rupees,
    pub stock_quantity: u32,
}

impl Product {
    /// Stock at or below this (but above zero) is flagged as running low.
    pub const LOW_STOCK_THRESHOLD: u32 = 5;

    #[must_use]
    pub const fn is_out_of_stock(&self) -> bool {
        self.stock_quantity == 0
    }

    /// True when some stock remains but no more than
    /// [`Self::LOW_STOCK_THRESHOLD`] units.
    #[must_use]
    pub const fn is_low_stock(&self) -> bool {
        self.stock_quantity > 0 && self.stock_quantity <= Self::LOW_STOCK_THRESHOLD
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(stock: u32) -> Product {
        Product {
            id: ProductId::new(1),
            name: "Basmati Rice".to_string(),
            description: "Premium long-grain basmati rice, 1kg pack".to_string(),
            category: ProductCategory::Groceries,
            price: Rupees::new(250),
            stock_quantity: stock,
        }
    }

    #[test]
    fn test_stock_levels() {
        assert!(product(0).is_out_of_stock());
        assert!(!product(0).is_low_stock());
        assert!(product(1).is_low_stock());
        assert!(product(5).is_low_stock());
        assert!(!product(6).is_low_stock());
        assert!(!product(6).is_out_of_stock());
    }

    #[test]
    fn test_wire_format() {
        let json = serde_json::json!({
            "id": 42,
            "name": "Toor Dal",
            "description": "Split pigeon peas, 500g",
            "category": "groceries",
            "priceInr": 120,
            "stockQuantity": 8,
        });
        let parsed: Product = serde_json::from_value(json).expect("deserializes");
        assert_eq!(parsed.id, ProductId::new(42));
        assert_eq!(parsed.price, Rupees::new(120));
        assert_eq!(parsed.stock_quantity, 8);

        let back = serde_json::to_value(&parsed).expect("serializes");
        assert_eq!(back["priceInr"], 120);
        assert_eq!(back["stockQuantity"], 8);
    }
}
