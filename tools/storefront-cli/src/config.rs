//! CLI configuration.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use storefront_cache::cache_key;

/// File names searched for, in order, from the working directory upwards.
pub const CONFIG_NAMES: [&str; 3] = ["storefront.toml", ".storefront.toml", "storefront.json"];

/// Storefront configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    /// Catalog source.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Where the cart is persisted.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Checkout behaviour.
    #[serde(default)]
    pub checkout: CheckoutConfig,
}

impl StorefrontConfig {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if is_json(path) {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    /// Key of the persisted cart slot.
    pub fn cart_slot(&self) -> String {
        cache_key!("cart", self.storage.namespace)
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("json")
}

/// Catalog configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Path to the product JSON array, relative to the config file.
    #[serde(default = "default_catalog_path")]
    pub path: String,
}

fn default_catalog_path() -> String {
    "data/products.json".to_string()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: default_catalog_path(),
        }
    }
}

/// Storage backend for the cart slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// One file per key under `dir`.
    #[default]
    File,
    /// Nothing survives the process.
    Memory,
}

impl StorageBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageBackend::File => "file",
            StorageBackend::Memory => "memory",
        }
    }
}

/// Storage configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Backend kind.
    #[serde(default)]
    pub backend: StorageBackend,

    /// Directory for the file backend, relative to the config file.
    #[serde(default = "default_storage_dir")]
    pub dir: String,

    /// Separates carts sharing one store (`cart:<namespace>`).
    #[serde(default = "default_namespace")]
    pub namespace: String,
}

fn default_storage_dir() -> String {
    ".storefront".to_string()
}

fn default_namespace() -> String {
    "default".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            dir: default_storage_dir(),
            namespace: default_namespace(),
        }
    }
}

/// Checkout configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutConfig {
    /// Simulated payment processing time.
    #[serde(default = "default_processing_delay_ms")]
    pub processing_delay_ms: u64,
}

fn default_processing_delay_ms() -> u64 {
    2000
}

impl CheckoutConfig {
    pub fn processing_delay(&self) -> Duration {
        Duration::from_millis(self.processing_delay_ms)
    }
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            processing_delay_ms: default_processing_delay_ms(),
        }
    }
}

/// Generate a default storefront.toml config file.
pub fn generate_default_config(catalog_path: &str) -> String {
    format!(
        r#"# Storefront configuration

[catalog]
path = "{catalog_path}"

[storage]
# "file" keeps the cart between runs, "memory" forgets it on exit
backend = "file"
dir = ".storefront"
namespace = "default"

[checkout]
processing_delay_ms = 2000
"#,
        catalog_path = catalog_path
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: StorefrontConfig = toml::from_str("").unwrap();
        assert_eq!(config, StorefrontConfig::default());
        assert_eq!(config.catalog.path, "data/products.json");
        assert_eq!(config.storage.backend, StorageBackend::File);
        assert_eq!(config.checkout.processing_delay(), Duration::from_secs(2));
        assert_eq!(config.cart_slot(), "cart:default");
    }

    #[test]
    fn test_partial_sections() {
        let config: StorefrontConfig = toml::from_str(
            r#"
            [storage]
            backend = "memory"
            namespace = "kiosk"

            [checkout]
            processing_delay_ms = 0
            "#,
        )
        .unwrap();
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.storage.dir, ".storefront");
        assert_eq!(config.cart_slot(), "cart:kiosk");
        assert_eq!(config.checkout.processing_delay(), Duration::ZERO);
    }

    #[test]
    fn test_generated_config_parses() {
        let config: StorefrontConfig =
            toml::from_str(&generate_default_config("catalog.json")).unwrap();
        assert_eq!(config.catalog.path, "catalog.json");
        assert_eq!(config.storage, StorageConfig::default());
        assert_eq!(config.checkout, CheckoutConfig::default());
    }

    #[test]
    fn test_unknown_backend_rejected() {
        let result: Result<StorefrontConfig, _> = toml::from_str("[storage]\nbackend = \"redis\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_save_and_load_json_and_toml() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = StorefrontConfig::default();
        config.storage.namespace = "tests".to_string();

        for name in ["storefront.toml", "storefront.json"] {
            let path = dir.path().join(name);
            config.save(&path).unwrap();
            assert_eq!(StorefrontConfig::load(&path).unwrap(), config);
        }
    }
}
