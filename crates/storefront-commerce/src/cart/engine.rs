//! The cart engine: owns the current [`CartState`] and its persistence.

use storefront_cache::{MemoryStore, Store};

use crate::cart::{CartPersistence, CartState, VariantSelection};
use crate::catalog::Product;
use crate::checkout::OrderSummary;
use crate::error::CommerceError;
use crate::ids::ProductId;

/// Single owner of the cart.
///
/// Every mutating call replaces the whole state and then saves it once.
/// Rejected calls leave the state as it was. A failed save is logged and the
/// in-memory transition stands.
#[derive(Debug)]
pub struct CartEngine<S: Store = MemoryStore> {
    state: CartState,
    persistence: CartPersistence<S>,
}

impl<S: Store> CartEngine<S> {
    /// Start from whatever `persistence` holds, or an empty cart.
    pub fn open(persistence: CartPersistence<S>) -> Self {
        let state = persistence.load().unwrap_or_default();
        Self { state, persistence }
    }

    /// Current state.
    pub fn state(&self) -> &CartState {
        &self.state
    }

    /// The persistence adapter in use.
    pub fn persistence(&self) -> &CartPersistence<S> {
        &self.persistence
    }

    /// Add `quantity` units of `product` with `selection`.
    pub fn add_to_cart(
        &mut self,
        product: &Product,
        selection: &VariantSelection,
        quantity: i64,
    ) -> Result<(), CommerceError> {
        let next = self.state.added(product, selection, quantity)?;
        tracing::debug!(product = %product.id, quantity, "add to cart");
        self.commit(next);
        Ok(())
    }

    /// Add a single unit.
    pub fn add_one(
        &mut self,
        product: &Product,
        selection: &VariantSelection,
    ) -> Result<(), CommerceError> {
        self.add_to_cart(product, selection, 1)
    }

    /// Remove a line. Returns whether a line was removed.
    pub fn remove_from_cart(
        &mut self,
        product_id: &ProductId,
        selection: &VariantSelection,
    ) -> Result<bool, CommerceError> {
        let existed = self.state.line(product_id, selection).is_some();
        let next = self.state.removed(product_id, selection)?;
        tracing::debug!(product = %product_id, existed, "remove from cart");
        self.commit(next);
        Ok(existed)
    }

    /// Set a line's quantity; zero or below removes it.
    ///
    /// Returns whether a matching line existed.
    pub fn update_quantity(
        &mut self,
        product_id: &ProductId,
        selection: &VariantSelection,
        quantity: i64,
    ) -> Result<bool, CommerceError> {
        let existed = self.state.line(product_id, selection).is_some();
        let next = self.state.updated(product_id, selection, quantity)?;
        tracing::debug!(product = %product_id, quantity, existed, "update quantity");
        self.commit(next);
        Ok(existed)
    }

    /// Empty the cart.
    pub fn clear_cart(&mut self) {
        tracing::debug!(lines = self.state.unique_item_count(), "clear cart");
        self.commit(CartState::new());
    }

    /// Order summary for the current subtotal.
    pub fn summary(&self) -> OrderSummary {
        OrderSummary::summarize(self.state.subtotal())
    }

    fn commit(&mut self, next: CartState) {
        self.state = next;
        if let Err(e) = self.persistence.save(&self.state) {
            tracing::warn!(slot = %self.persistence.slot(), error = %e, "failed to save cart");
        }
    }
}

impl CartEngine<MemoryStore> {
    /// Engine backed by process-local storage.
    pub fn in_memory() -> Self {
        Self::open(CartPersistence::in_memory())
    }
}
