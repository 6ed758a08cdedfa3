//! Search filter types.

use crate::catalog::Product;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A search filter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Filter {
    /// Filter by category (exact match).
    Category(String),
    /// Filter by tag (case-insensitive).
    Tag(String),
    /// Only products whose every dimension has something in stock.
    InStock,
    /// Lowest price within an inclusive range.
    PriceRange {
        min: Option<Money>,
        max: Option<Money>,
    },
    /// Case-insensitive substring search in name, description and tags.
    Text(String),
}

impl Filter {
    /// Create a category filter.
    pub fn category(category: impl Into<String>) -> Self {
        Filter::Category(category.into())
    }

    /// Create a price range filter.
    pub fn price_range(min: Option<Money>, max: Option<Money>) -> Self {
        Filter::PriceRange { min, max }
    }

    /// Create an in-stock filter.
    pub fn in_stock() -> Self {
        Filter::InStock
    }

    /// Create a tag filter.
    pub fn tag(tag: impl Into<String>) -> Self {
        Filter::Tag(tag.into())
    }

    /// Create a text search filter.
    pub fn text(query: impl Into<String>) -> Self {
        Filter::Text(query.into())
    }

    /// Check whether a product passes this filter.
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            Filter::Category(category) => &product.category == category,
            Filter::Tag(tag) => product.tags.iter().any(|t| t.eq_ignore_ascii_case(tag)),
            Filter::InStock => product.is_available(),
            Filter::PriceRange { min, max } => {
                let (lowest, _) = product.price_range();
                min.map_or(true, |m| lowest.amount_cents >= m.amount_cents)
                    && max.map_or(true, |m| lowest.amount_cents <= m.amount_cents)
            }
            Filter::Text(query) => {
                let needle = query.to_lowercase();
                product.name.to_lowercase().contains(&needle)
                    || product.description.to_lowercase().contains(&needle)
                    || product
                        .tags
                        .iter()
                        .any(|t| t.to_lowercase().contains(&needle))
            }
        }
    }
}
