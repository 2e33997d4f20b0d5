//! Product categories and the catalog category filter.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error parsing a [`ProductCategory`] or [`CategoryFilter`] from a string.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown product category: {0}")]
pub struct CategoryParseError(pub String);

/// The closed set of categories products are filed under.
///
/// Serialized in camelCase to match the store API (`personalCare`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProductCategory {
    Groceries,
    Snacks,
    Beverages,
    PersonalCare,
    Dairy,
    Household,
}

impl ProductCategory {
    /// All categories, in the order the storefront presents its tabs.
    pub const ALL: [Self; 6] = [
        Self::Groceries,
        Self::Dairy,
        Self::Snacks,
        Self::Beverages,
        Self::PersonalCare,
        Self::Household,
    ];

    /// The wire token used by the store API.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Groceries => "groceries",
            Self::Snacks => "snacks",
            Self::Beverages => "beverages",
            Self::PersonalCare => "personalCare",
            Self::Dairy => "dairy",
            Self::Household => "household",
        }
    }

    /// Human-readable label for display.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Groceries => "Groceries",
            Self::Snacks => "Snacks",
            Self::Beverages => "Beverages",
            Self::PersonalCare => "Personal Care",
            Self::Dairy => "Dairy",
            Self::Household => "Household",
        }
    }
}

impl std::fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductCategory {
    type Err = CategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "groceries" => Ok(Self::Groceries),
            "snacks" => Ok(Self::Snacks),
            "beverages" => Ok(Self::Beverages),
            "personalcare" => Ok(Self::PersonalCare),
            "dairy" => Ok(Self::Dairy),
            "household" => Ok(Self::Household),
            _ => Err(CategoryParseError(s.to_string())),
        }
    }
}

/// Category constraint applied by the catalog view: either everything, or
/// exactly one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    /// No category constraint.
    #[default]
    All,
    /// Only products in this category.
    Category(ProductCategory),
}

impl CategoryFilter {
    /// Whether a product in `category` passes this filter.
    #[must_use]
    pub fn matches(self, category: ProductCategory) -> bool {
        match self {
            Self::All => true,
            Self::Category(only) => only == category,
        }
    }
}

impl From<ProductCategory> for CategoryFilter {
    fn from(category: ProductCategory) -> Self {
        Self::Category(category)
    }
}

impl std::fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Category(category) => category.fmt(f),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = CategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            Ok(Self::All)
        } else {
            s.parse().map(Self::Category)
        }
    }
}
