//! Catalog search module.
//!
//! Text search, category/tag/stock filters and sort orders applied to the
//! in-memory catalog.

mod filter;
mod query;

pub use filter::Filter;
pub use query::{CatalogQuery, SortOption};
