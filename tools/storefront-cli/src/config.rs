//! CLI configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use storefront_cart::cart::{PersistMode, CART_KEY};

/// File names searched for, in order, in each directory.
pub const CONFIG_NAMES: [&str; 3] = ["storefront.toml", ".storefront.toml", "storefront.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CliConfig {
    /// Log level used when `--verbose` is not given.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Cart storage.
    #[serde(default)]
    pub store: StoreConfig,

    /// Cart behavior.
    #[serde(default)]
    pub cart: CartConfig,

    /// Catalog source.
    #[serde(default)]
    pub catalog: CatalogConfig,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            store: StoreConfig::default(),
            cart: CartConfig::default(),
            catalog: CatalogConfig::default(),
        }
    }
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Resolve relative paths against the directory the config came from.
    pub fn resolve_paths(mut self, base: &Path) -> Self {
        if self.store.path.is_relative() {
            self.store.path = base.join(&self.store.path);
        }
        if let Some(catalog) = self.catalog.path.take() {
            self.catalog.path = Some(if catalog.is_relative() {
                base.join(catalog)
            } else {
                catalog
            });
        }
        self
    }
}

/// Which store backend holds the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Files under `store.path`; survives restarts.
    #[default]
    File,
    /// Process memory; gone when the command exits.
    Memory,
}

/// Store configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoreConfig {
    /// Backend holding the cart record.
    #[serde(default)]
    pub backend: StoreBackend,

    /// Directory for the file backend.
    #[serde(default = "default_store_path")]
    pub path: PathBuf,

    /// Key the cart record is stored under.
    #[serde(default = "default_cart_key")]
    pub key: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            path: default_store_path(),
            key: default_cart_key(),
        }
    }
}

/// Cart configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CartConfig {
    /// How cart mutations reach the store.
    #[serde(default)]
    pub persist: PersistMode,
}

/// Catalog configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CatalogConfig {
    /// JSON or TOML item list; the demo catalog is used when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_store_path() -> PathBuf {
    PathBuf::from(".storefront")
}

fn default_cart_key() -> String {
    CART_KEY.to_string()
}

/// Generate the default config file.
pub fn generate_default_config() -> String {
    format!(
        r#"# Storefront configuration

log_level = "warn"

[store]
backend = "file"
path = ".storefront"
key = "{key}"

[cart]
# "write-through" waits for each save, "background" saves without waiting.
persist = "write-through"

[catalog]
# path = "catalog.toml"
"#,
        key = CART_KEY
    )
}
