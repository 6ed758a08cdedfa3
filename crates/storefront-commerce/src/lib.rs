//! Storefront domain types and the cart state engine.
//!
//! This crate owns everything between a static product catalog and a placed
//! order:
//!
//! - **Catalog**: products with variant dimensions, loaded from JSON
//! - **Search**: text, category and stock filters with sort orders
//! - **Cart**: line identity, price resolution, the cart engine and its
//!   persisted slot
//! - **Checkout**: order summary (shipping and tax), form validation and the
//!   simulated submission
//!
//! # Example
//!
//! ```rust,ignore
//! use storefront_commerce::prelude::*;
//!
//! let catalog = CatalogStore::load("data/products.json")?;
//! let mut engine = CartEngine::in_memory();
//!
//! let headphones = catalog.get("wireless-headphones")?;
//! let selection = VariantSelection::new().with("color", "black");
//! engine.add_to_cart(headphones, &selection, 1)?;
//!
//! let summary = engine.summary();
//! println!("Total: {}", summary.total.display());
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod search;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{CatalogStore, Product, ProductOption, ProductVariant};

    // Cart
    pub use crate::cart::{
        default_selection, is_purchasable, resolve_price, CartEngine, CartPersistence, CartState,
        LineItem, LineKey, ResolvedPrice, VariantSelection, DEFAULT_CART_SLOT,
        MAX_QUANTITY_PER_ITEM,
    };

    // Checkout
    pub use crate::checkout::{
        CheckoutField, CheckoutForm, CheckoutSession, CheckoutStatus, OrderConfirmation,
        OrderSummary, ValidationErrors,
    };

    // Search
    pub use crate::search::{CatalogQuery, Filter, SortOption};
}
