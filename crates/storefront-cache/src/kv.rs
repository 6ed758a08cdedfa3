//! Typed wrapper over a [`Store`] with automatic JSON serialization.

use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use crate::store::{FileStore, MemoryStore, Store};
use crate::CacheError;

/// Type-safe cache over any [`Store`].
///
/// Provides automatic JSON serialization for any type that implements
/// `Serialize` and `DeserializeOwned`.
#[derive(Debug)]
pub struct Cache<S = MemoryStore> {
    store: S,
}

impl<S: Store> Cache<S> {
    /// Wrap an existing store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Access the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Get a value from the cache.
    ///
    /// Returns `None` if the key doesn't exist, and an error if the stored
    /// bytes don't decode as `T`.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let cart: Option<CartState> = cache.get("cart:default")?;
    /// ```
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        match self.store.get(key)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Set a value in the cache, replacing whatever was there.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// cache.set("cart:default", &cart)?;
    /// ```
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let bytes = serde_json::to_vec(value)?;
        self.store.set(key, &bytes)
    }

    /// Delete a value from the cache.
    pub fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.store.delete(key)
    }

    /// Check if a key exists in the cache.
    pub fn exists(&self, key: &str) -> Result<bool, CacheError> {
        self.store.exists(key)
    }

    /// Get all keys in the cache.
    pub fn keys(&self) -> Result<Vec<String>, CacheError> {
        self.store.keys()
    }
}

impl Cache<MemoryStore> {
    /// Create a cache that lives only as long as the process.
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }
}

impl Cache<FileStore> {
    /// Open a file-backed cache rooted at `dir`.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let cache = Cache::open_dir(".storefront")?;
    /// ```
    pub fn open_dir(dir: impl AsRef<Path>) -> Result<Self, CacheError> {
        Ok(Self::new(FileStore::open(dir)?))
    }
}

#[cfg(target_arch = "wasm32")]
impl Cache<crate::store::SpinStore> {
    /// Open the default Spin Key-Value store.
    pub fn open_default() -> Result<Self, CacheError> {
        Ok(Self::new(crate::store::SpinStore::open_default()?))
    }

    /// Open a named Spin Key-Value store.
    pub fn open(name: &str) -> Result<Self, CacheError> {
        Ok(Self::new(crate::store::SpinStore::open(name)?))
    }
}

/// Helper to build cache keys with namespacing.
///
/// # Example
///
/// ```rust,ignore
/// let key = cache_key!("cart", profile);
/// // Returns "cart:default"
/// ```
#[macro_export]
macro_rules! cache_key {
    ($prefix:expr, $($part:expr),+) => {{
        let mut key = String::from($prefix);
        $(
            key.push(':');
            key.push_str(&$part.to_string());
        )+
        key
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Snapshot {
        items: Vec<String>,
        count: u32,
    }

    #[test]
    fn test_typed_roundtrip() {
        let cache = Cache::in_memory();
        let snapshot = Snapshot {
            items: vec!["mug".to_string()],
            count: 1,
        };

        cache.set("snap", &snapshot).unwrap();
        let restored: Option<Snapshot> = cache.get("snap").unwrap();
        assert_eq!(restored, Some(snapshot));
    }

    #[test]
    fn test_get_missing() {
        let cache = Cache::in_memory();
        let value: Option<Snapshot> = cache.get("missing").unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn test_get_malformed_is_error() {
        let cache = Cache::in_memory();
        cache.store().set("snap", b"not json").unwrap();

        let result: Result<Option<Snapshot>, _> = cache.get("snap");
        assert!(matches!(result, Err(CacheError::SerializeError(_))));
    }

    #[test]
    fn test_cache_key_macro() {
        assert_eq!(cache_key!("cart", "default"), "cart:default");
        assert_eq!(cache_key!("cart", "user", 42), "cart:user:42");
    }

    #[test]
    fn test_open_dir() {
        let dir = tempfile::tempdir().unwrap();
        let cache = Cache::open_dir(dir.path()).unwrap();
        cache.set("count", &3u32).unwrap();
        assert_eq!(cache.get::<u32>("count").unwrap(), Some(3));
        assert_eq!(cache.keys().unwrap(), vec!["count".to_string()]);
    }
}
