//! Durable cart slot backed by a [`storefront_cache::Store`].

use storefront_cache::{Cache, MemoryStore, Store};

use crate::cart::CartState;
use crate::error::CommerceError;

/// Slot name used when none is configured.
pub const DEFAULT_CART_SLOT: &str = "cart:default";

/// Loads and saves the whole cart state under one key.
///
/// There is no schema version: a stored value that no longer parses is
/// treated the same as a missing one.
#[derive(Debug)]
pub struct CartPersistence<S: Store = MemoryStore> {
    cache: Cache<S>,
    slot: String,
}

impl<S: Store> CartPersistence<S> {
    /// Persist to `slot` in `store`.
    pub fn new(store: S, slot: impl Into<String>) -> Self {
        Self {
            cache: Cache::new(store),
            slot: slot.into(),
        }
    }

    /// The key this adapter reads and writes.
    pub fn slot(&self) -> &str {
        &self.slot
    }

    /// Read the stored cart.
    ///
    /// Missing, unreadable and corrupt slots all return `None`; the latter two
    /// are logged.
    pub fn load(&self) -> Option<CartState> {
        match self.cache.get::<CartState>(&self.slot) {
            Ok(Some(state)) => {
                tracing::debug!(
                    slot = %self.slot,
                    lines = state.unique_item_count(),
                    "restored cart"
                );
                Some(state)
            }
            Ok(None) => None,
            Err(e) => {
                tracing::warn!(slot = %self.slot, error = %e, "discarding stored cart");
                None
            }
        }
    }

    /// Overwrite the slot with `state`.
    pub fn save(&self, state: &CartState) -> Result<(), CommerceError> {
        self.cache.set(&self.slot, state)?;
        Ok(())
    }

    /// Remove the slot entirely.
    pub fn forget(&self) -> Result<(), CommerceError> {
        self.cache.delete(&self.slot)?;
        Ok(())
    }

    /// Access the underlying store.
    pub fn store(&self) -> &S {
        self.cache.store()
    }
}

impl CartPersistence<MemoryStore> {
    /// Ephemeral persistence under the default slot.
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new(), DEFAULT_CART_SLOT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::VariantSelection;
    use crate::catalog::{Product, ProductVariant};
    use crate::money::Money;
    use storefront_cache::FileStore;

    fn sample_state() -> CartState {
        let tee = Product::new("tee", "Logo Tee", Money::usd(2000))
            .with_variant("size", ProductVariant::new("m", "Medium", Money::usd(2200)));
        CartState::new()
            .added(&tee, &VariantSelection::new().with("size", "m"), 2)
            .unwrap()
    }

    #[test]
    fn test_empty_slot_loads_none() {
        let persistence = CartPersistence::in_memory();
        assert!(persistence.load().is_none());
    }

    #[test]
    fn test_round_trip() {
        let persistence = CartPersistence::in_memory();
        let state = sample_state();
        persistence.save(&state).unwrap();
        assert_eq!(persistence.load(), Some(state));
    }

    #[test]
    fn test_corrupt_slot_loads_none() {
        let store = MemoryStore::new();
        store.set(DEFAULT_CART_SLOT, b"{not json").unwrap();
        let persistence = CartPersistence::new(store, DEFAULT_CART_SLOT);
        assert!(persistence.load().is_none());
    }

    #[test]
    fn test_wrong_shape_loads_none() {
        let store = MemoryStore::new();
        store
            .set(DEFAULT_CART_SLOT, br#"{"items": [{"sku": "old-format"}]}"#)
            .unwrap();
        let persistence = CartPersistence::new(store, DEFAULT_CART_SLOT);
        assert!(persistence.load().is_none());
    }

    #[test]
    fn test_last_write_wins() {
        let persistence = CartPersistence::in_memory();
        persistence.save(&sample_state()).unwrap();
        persistence.save(&CartState::new()).unwrap();
        assert_eq!(persistence.load(), Some(CartState::new()));
    }

    #[test]
    fn test_file_backed_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let state = sample_state();

        let first = CartPersistence::new(FileStore::open(dir.path()).unwrap(), "cart:test");
        first.save(&state).unwrap();
        drop(first);

        let second = CartPersistence::new(FileStore::open(dir.path()).unwrap(), "cart:test");
        assert_eq!(second.load(), Some(state));
        second.forget().unwrap();
        assert!(second.load().is_none());
    }
}
