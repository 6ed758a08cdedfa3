//! Product catalog module.
//!
//! Contains the product/variant types and the read-only catalog store.

mod product;
mod store;

pub use product::{Product, ProductOption, ProductVariant};
pub use store::CatalogStore;
