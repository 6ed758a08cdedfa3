//! Search query builder.

use std::cmp::Ordering;

use crate::catalog::Product;
use crate::search::Filter;
use serde::{Deserialize, Serialize};

/// Category value meaning "no category filter".
pub const ALL_CATEGORIES: &str = "all";

/// Sort options for catalog listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SortOption {
    /// Sort by name A-Z, ignoring case.
    #[default]
    Name,
    /// Sort by lowest variant price, low to high.
    PriceLow,
    /// Sort by highest variant price, high to low.
    PriceHigh,
    /// Sort by rating, highest first.
    Rating,
    /// Sort by review count, most first.
    Reviews,
}

impl SortOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOption::Name => "name",
            SortOption::PriceLow => "price-low",
            SortOption::PriceHigh => "price-high",
            SortOption::Rating => "rating",
            SortOption::Reviews => "reviews",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "name" => Some(SortOption::Name),
            "price-low" => Some(SortOption::PriceLow),
            "price-high" => Some(SortOption::PriceHigh),
            "rating" => Some(SortOption::Rating),
            "reviews" => Some(SortOption::Reviews),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortOption::Name => "Name",
            SortOption::PriceLow => "Price: Low to High",
            SortOption::PriceHigh => "Price: High to Low",
            SortOption::Rating => "Highest Rated",
            SortOption::Reviews => "Most Reviews",
        }
    }

    /// Compare two products under this sort order.
    pub fn compare(&self, a: &Product, b: &Product) -> Ordering {
        match self {
            SortOption::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            SortOption::PriceLow => a
                .price_range()
                .0
                .amount_cents
                .cmp(&b.price_range().0.amount_cents),
            SortOption::PriceHigh => b
                .price_range()
                .1
                .amount_cents
                .cmp(&a.price_range().1.amount_cents),
            SortOption::Rating => b.rating.total_cmp(&a.rating),
            SortOption::Reviews => b.review_count.cmp(&a.review_count),
        }
    }
}

/// A catalog query: filters combined with AND, then a stable sort.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CatalogQuery {
    /// Text query, kept for display.
    pub query: Option<String>,
    /// Filters to apply.
    pub filters: Vec<Filter>,
    /// Sort option.
    pub sort: SortOption,
}

impl CatalogQuery {
    /// Create an unfiltered query sorted by name.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the text query. Empty text is ignored.
    pub fn with_query(mut self, q: impl Into<String>) -> Self {
        let q = q.into();
        let trimmed = q.trim();
        if !trimmed.is_empty() {
            self.query = Some(trimmed.to_string());
            self.filters.push(Filter::Text(trimmed.to_string()));
        }
        self
    }

    /// Restrict to a category; `"all"` leaves the query unfiltered.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        let category = category.into();
        if !category.is_empty() && category != ALL_CATEGORIES {
            self.filters.push(Filter::Category(category));
        }
        self
    }

    /// Add a filter.
    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Set sort option.
    pub fn with_sort(mut self, sort: SortOption) -> Self {
        self.sort = sort;
        self
    }

    /// Check whether any filter is active.
    pub fn is_filtered(&self) -> bool {
        !self.filters.is_empty()
    }

    /// Filter and sort `products`.
    pub fn apply<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        let mut matched: Vec<&Product> = products
            .iter()
            .filter(|p| self.filters.iter().all(|f| f.matches(p)))
            .collect();
        matched.sort_by(|a, b| self.sort.compare(a, b));
        matched
    }
}
