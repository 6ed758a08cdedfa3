//! Typed key-value storage for persisted storefront state.
//!
//! A [`Store`] moves raw bytes in and out of a durable slot. [`Cache`] wraps
//! any store with automatic JSON serialization, so callers deal in their own
//! types rather than bytes.
//!
//! Backends:
//!
//! - [`MemoryStore`]: process-local, used in tests and ephemeral sessions
//! - [`FileStore`]: one file per key under a directory
//! - `SpinStore`: Spin's key-value store, on `wasm32` only
//!
//! # Example
//!
//! ```rust,ignore
//! use storefront_cache::{cache_key, Cache};
//!
//! let cache = Cache::open_dir(".storefront")?;
//! let key = cache_key!("cart", "default");
//!
//! cache.set(&key, &cart_state)?;
//! let restored: Option<CartState> = cache.get(&key)?;
//! ```

mod error;
mod kv;
mod store;

pub use error::CacheError;
pub use kv::Cache;
pub use store::{FileStore, MemoryStore, Store};

#[cfg(target_arch = "wasm32")]
pub use store::SpinStore;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, FileStore, MemoryStore, Store};
}
