//! Shopping cart module.
//!
//! Contains line identity, price resolution, the cart state value, its
//! persistence and the engine that ties them together.

mod cart;
mod engine;
mod persistence;
mod pricing;
mod selection;

pub use cart::{CartState, LineItem, MAX_QUANTITY_PER_ITEM};
pub use engine::CartEngine;
pub use persistence::{CartPersistence, DEFAULT_CART_SLOT};
pub use pricing::{default_selection, is_purchasable, resolve_price, ResolvedPrice};
pub use selection::{LineKey, VariantSelection};
