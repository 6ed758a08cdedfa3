//! CLI execution context.
//!
//! The composition root: configuration is resolved here, and the catalog and
//! cart engine are built from it on demand.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use storefront_cache::{FileStore, MemoryStore, Store};
use storefront_commerce::cart::{CartEngine, CartPersistence};
use storefront_commerce::catalog::CatalogStore;

use crate::config::{StorageBackend, StorefrontConfig, CONFIG_NAMES};
use crate::output::Output;

/// Cart engine over whichever backend the config selects.
pub type Cart = CartEngine<Box<dyn Store>>;

/// Execution context for CLI commands.
pub struct Context {
    /// Storefront configuration.
    pub config: StorefrontConfig,
    /// Config file the settings came from, if any.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = if let Some(path) = config_path {
            let path = PathBuf::from(path);
            (StorefrontConfig::load(&path)?, Some(path))
        } else {
            match find_config(&cwd) {
                Some((path, config)) => (config, Some(path)),
                None => (StorefrontConfig::default(), None),
            }
        };
        tracing::debug!(config = ?config_path, "resolved configuration");

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Directory relative paths in the config are resolved against.
    pub fn base_dir(&self) -> PathBuf {
        self.config_path
            .as_deref()
            .and_then(Path::parent)
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.cwd.clone())
    }

    /// Resolve a config path against [`base_dir`](Self::base_dir).
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if Path::new(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.base_dir().join(path)
        }
    }

    /// Load the product catalog.
    pub fn catalog(&self) -> Result<CatalogStore> {
        let path = self.resolve_path(&self.config.catalog.path);
        CatalogStore::load(&path)
            .with_context(|| format!("Failed to load catalog: {}", path.display()))
    }

    /// Open the cart engine on the configured storage.
    pub fn cart(&self) -> Result<Cart> {
        let store: Box<dyn Store> = match self.config.storage.backend {
            StorageBackend::File => {
                let dir = self.resolve_path(&self.config.storage.dir);
                let store = FileStore::open(&dir)
                    .with_context(|| format!("Failed to open cart storage: {}", dir.display()))?;
                Box::new(store)
            }
            StorageBackend::Memory => Box::new(MemoryStore::new()),
        };
        let persistence = CartPersistence::new(store, self.config.cart_slot());
        Ok(CartEngine::open(persistence))
    }
}

/// Find a config file in the directory tree, starting at `start`.
fn find_config(start: &Path) -> Option<(PathBuf, StorefrontConfig)> {
    let mut current = start.to_path_buf();
    loop {
        for name in &CONFIG_NAMES {
            let config_path = current.join(name);
            if config_path.exists() {
                match StorefrontConfig::load(&config_path) {
                    Ok(config) => return Some((config_path, config)),
                    Err(e) => {
                        tracing::warn!(
                            path = %config_path.display(),
                            error = %e,
                            "skipping unreadable config"
                        )
                    }
                }
            }
        }

        if !current.pop() {
            break;
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_commerce::cart::VariantSelection;

    const CATALOG: &str = r#"[
        {"id": "mug", "name": "Coffee Mug", "category": "Kitchen", "basePrice": 12.0}
    ]"#;

    fn context_in(dir: &Path) -> Context {
        Context {
            config: StorefrontConfig::load(&dir.join("storefront.toml")).unwrap(),
            config_path: Some(dir.join("storefront.toml")),
            output: Output::new(true),
            cwd: dir.join("elsewhere"),
        }
    }

    #[test]
    fn test_find_config_walks_up() {
        let root = tempfile::tempdir().unwrap();
        std::fs::write(
            root.path().join("storefront.toml"),
            "[storage]\nnamespace = \"found\"\n",
        )
        .unwrap();
        let nested = root.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        let (path, config) = find_config(&nested).unwrap();
        assert_eq!(path, root.path().join("storefront.toml"));
        assert_eq!(config.storage.namespace, "found");
    }

    #[test]
    fn test_paths_resolve_against_config_dir() {
        let root = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(root.path().join("data")).unwrap();
        std::fs::write(root.path().join("data/products.json"), CATALOG).unwrap();
        std::fs::write(root.path().join("storefront.toml"), "").unwrap();

        let ctx = context_in(root.path());
        assert_eq!(ctx.base_dir(), root.path());
        assert_eq!(ctx.catalog().unwrap().len(), 1);
    }

    #[test]
    fn test_file_backed_cart_persists_between_opens() {
        let root = tempfile::tempdir().unwrap();
        std::fs::write(root.path().join("data.json"), CATALOG).unwrap();
        std::fs::write(
            root.path().join("storefront.toml"),
            "[catalog]\npath = \"data.json\"\n",
        )
        .unwrap();
        let ctx = context_in(root.path());
        let catalog = ctx.catalog().unwrap();

        let mut cart = ctx.cart().unwrap();
        cart.add_to_cart(catalog.get("mug").unwrap(), &VariantSelection::new(), 3)
            .unwrap();
        drop(cart);

        let reopened = ctx.cart().unwrap();
        assert_eq!(reopened.state().item_count(), 3);
        assert!(root.path().join(".storefront").is_dir());
    }

    #[test]
    fn test_memory_cart_starts_empty_each_time() {
        let root = tempfile::tempdir().unwrap();
        std::fs::write(root.path().join("data.json"), CATALOG).unwrap();
        std::fs::write(
            root.path().join("storefront.toml"),
            "[catalog]\npath = \"data.json\"\n\n[storage]\nbackend = \"memory\"\n",
        )
        .unwrap();
        let ctx = context_in(root.path());
        let catalog = ctx.catalog().unwrap();

        let mut cart = ctx.cart().unwrap();
        cart.add_one(catalog.get("mug").unwrap(), &VariantSelection::new())
            .unwrap();
        assert!(ctx.cart().unwrap().state().is_empty());
    }
}
