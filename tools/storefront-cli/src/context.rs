//! CLI execution context.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context as _, Result};
use storefront_cart::prelude::*;
use storefront_kv::{FileStore, KeyValueStore, MemoryStore};

use crate::config::{CliConfig, StoreBackend, CONFIG_NAMES};
use crate::output::Output;

/// Screens built by the context all talk to this store type.
pub type Store = dyn KeyValueStore;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration, with paths resolved.
    pub config: CliConfig,
    /// Where the config was loaded from, if anywhere.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    store: Arc<Store>,
    catalog: Arc<dyn CatalogSource>,
}

impl Context {
    /// Load the config and open the store and catalog it names.
    pub async fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = match config_path {
            Some(path) => {
                let path = PathBuf::from(path);
                (CliConfig::load(&path)?, Some(path))
            }
            None => match find_config(&cwd) {
                Some((config, path)) => (config, Some(path)),
                None => (CliConfig::default(), None),
            },
        };

        let base = config_path
            .as_deref()
            .and_then(Path::parent)
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| cwd.clone());
        let config = config.resolve_paths(&base);

        let store = open_store(&config).await?;
        let catalog = open_catalog(&config)?;

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
            store,
            catalog,
        })
    }

    /// Build a context around an existing store and catalog.
    pub fn with_parts(
        config: CliConfig,
        output: Output,
        store: Arc<Store>,
        catalog: Arc<dyn CatalogSource>,
    ) -> Self {
        Self {
            config,
            config_path: None,
            output,
            cwd: PathBuf::from("."),
            store,
            catalog,
        }
    }

    /// The catalog source.
    pub fn catalog(&self) -> &Arc<dyn CatalogSource> {
        &self.catalog
    }

    /// Mount a fresh catalog screen.
    pub async fn catalog_view(&self) -> CatalogView<Store> {
        let mut view = CatalogView::new(Arc::clone(&self.catalog), self.controller());
        view.on_focus().await;
        view
    }

    /// Mount a fresh checkout screen.
    pub async fn cart_view(&self) -> CartView<Store> {
        let mut view = CartView::new(self.controller());
        view.on_focus().await;
        view
    }

    fn controller(&self) -> CartController<Store> {
        let repository =
            CartRepository::new(Arc::clone(&self.store)).with_key(self.config.store.key.clone());
        CartController::new(repository).with_persist_mode(self.config.cart.persist)
    }
}

/// Find a config file in the directory tree, starting at `start`.
fn find_config(start: &Path) -> Option<(CliConfig, PathBuf)> {
    let mut current = start.to_path_buf();
    loop {
        for name in CONFIG_NAMES {
            let path = current.join(name);
            if path.exists() {
                match CliConfig::load(&path) {
                    Ok(config) => return Some((config, path)),
                    Err(e) => tracing::warn!(path = %path.display(), error = %e, "skipping unreadable config"),
                }
            }
        }

        if !current.pop() {
            return None;
        }
    }
}

async fn open_store(config: &CliConfig) -> Result<Arc<Store>> {
    let store: Arc<Store> = match config.store.backend {
        StoreBackend::File => Arc::new(
            FileStore::open(&config.store.path)
                .await
                .with_context(|| format!("Failed to open store at {}", config.store.path.display()))?,
        ),
        StoreBackend::Memory => Arc::new(MemoryStore::new()),
    };
    Ok(store)
}

fn open_catalog(config: &CliConfig) -> Result<Arc<dyn CatalogSource>> {
    let catalog = match &config.catalog.path {
        Some(path) => StaticCatalog::from_file(path)
            .with_context(|| format!("Failed to load catalog from {}", path.display()))?,
        None => StaticCatalog::demo(),
    };
    Ok(Arc::new(catalog))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_context() -> (Context, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let ctx = Context::with_parts(
            CliConfig::default(),
            Output::new(false, true),
            store.clone(),
            Arc::new(StaticCatalog::demo()),
        );
        (ctx, store)
    }

    #[tokio::test]
    async fn test_screens_share_the_store() {
        let (ctx, store) = memory_context();

        let mut home = ctx.catalog_view().await;
        assert_eq!(home.add_to_cart(ItemId::new(2)).await, AddOutcome::Added);

        let checkout = ctx.cart_view().await;
        assert_eq!(checkout.entries().len(), 1);
        assert_eq!(checkout.total(), Price::from_cents(12_000).unwrap());
        assert!(store.peek(CART_KEY).unwrap().contains("\"id\":2"));
    }

    #[tokio::test]
    async fn test_configured_key_is_used() {
        let store = Arc::new(MemoryStore::new());
        let mut config = CliConfig::default();
        config.store.key = "cart:guest".to_string();
        let ctx = Context::with_parts(
            config,
            Output::new(false, true),
            store.clone(),
            Arc::new(StaticCatalog::demo()),
        );

        let mut home = ctx.catalog_view().await;
        home.add_to_cart(ItemId::new(1)).await;

        assert!(store.peek("cart:guest").is_some());
        assert!(store.peek(CART_KEY).is_none());
    }

    #[tokio::test]
    async fn test_load_resolves_store_next_to_config() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("storefront.toml");
        std::fs::write(&config_path, "[store]\npath = \"data\"\n").unwrap();

        let ctx = Context::load(config_path.to_str(), Output::new(false, true))
            .await
            .unwrap();

        assert_eq!(ctx.config.store.path, dir.path().join("data"));
        assert!(dir.path().join("data").is_dir());
        assert_eq!(ctx.catalog().len(), 8);
    }

    #[tokio::test]
    async fn test_load_reports_missing_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("storefront.toml");
        std::fs::write(
            &config_path,
            "[store]\nbackend = \"memory\"\n\n[catalog]\npath = \"missing.toml\"\n",
        )
        .unwrap();

        let err = Context::load(config_path.to_str(), Output::new(false, true))
            .await
            .err()
            .unwrap();
        assert!(format!("{:#}", err).contains("Failed to load catalog"));
    }
}
