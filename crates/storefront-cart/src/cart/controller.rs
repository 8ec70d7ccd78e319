//! Per-screen cart controller.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use storefront_kv::KeyValueStore;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::cart::{Cart, CartRepository};
use crate::catalog::Item;
use crate::ids::ItemId;
use crate::money::Price;

static EMPTY_CART: Cart = Cart::new();

/// How mutations reach the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PersistMode {
    /// Await the save before the mutation returns.
    #[default]
    WriteThrough,
    /// Spawn the save on the runtime and return immediately.
    Background,
}

/// Lifecycle of a controller's in-memory cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartState {
    /// Nothing read from the store yet.
    Unloaded,
    /// Holds the cart from the last refresh, plus local mutations.
    Loaded,
}

/// Cart operations for one screen instance.
///
/// Screens do not share memory: each owns a controller and calls
/// [`refresh`](Self::refresh) whenever it becomes visible. Mutations apply
/// to the in-memory cart first, then write the whole cart through the
/// repository. Failed writes are not rolled back.
///
/// # Example
///
/// ```rust,ignore
/// let mut controller = CartController::new(CartRepository::new(store));
/// controller.refresh().await;
/// controller.add(&item).await;
/// println!("Total: {}", controller.total());
/// ```
pub struct CartController<S: ?Sized> {
    repository: CartRepository<S>,
    cart: Option<Cart>,
    mode: PersistMode,
    writes: Arc<WriteGate>,
    pending: Vec<JoinHandle<()>>,
}

/// Orders background saves from one controller so an older snapshot never
/// lands after a newer one.
#[derive(Default)]
struct WriteGate {
    issued: AtomicU64,
    lock: Mutex<u64>,
}

impl WriteGate {
    /// Reserve the next sequence number.
    fn next(&self) -> u64 {
        self.issued.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Run `save` unless a save with a higher sequence number already ran.
    async fn run<F: Future<Output = ()>>(&self, seq: u64, save: F) -> bool {
        let mut last_written = self.lock.lock().await;
        if *last_written > seq {
            tracing::debug!(seq, last = *last_written, "skipping superseded cart save");
            return false;
        }
        save.await;
        *last_written = seq;
        true
    }
}

impl<S: KeyValueStore + ?Sized + 'static> CartController<S> {
    /// Create an unloaded controller.
    pub fn new(repository: CartRepository<S>) -> Self {
        Self {
            repository,
            cart: None,
            mode: PersistMode::default(),
            writes: Arc::new(WriteGate::default()),
            pending: Vec::new(),
        }
    }

    /// Set how mutations are persisted.
    pub fn with_persist_mode(mut self, mode: PersistMode) -> Self {
        self.mode = mode;
        self
    }

    /// Current lifecycle state.
    pub fn state(&self) -> CartState {
        if self.cart.is_some() {
            CartState::Loaded
        } else {
            CartState::Unloaded
        }
    }

    /// Persist mode in use.
    pub fn persist_mode(&self) -> PersistMode {
        self.mode
    }

    /// The repository backing this controller.
    pub fn repository(&self) -> &CartRepository<S> {
        &self.repository
    }

    /// Re-read the cart from the store, replacing the in-memory copy.
    ///
    /// Background saves issued by this controller land first, so the read
    /// sees this screen's own mutations.
    pub async fn refresh(&mut self) -> &Cart {
        self.flush().await;
        let cart = self.repository.load().await;
        tracing::debug!(entries = cart.len(), "cart refreshed");
        self.cart.insert(cart)
    }

    /// Add a snapshot of `item`.
    ///
    /// Adding an id that is already in the cart changes nothing and writes
    /// nothing.
    pub async fn add(&mut self, item: &Item) -> &Cart {
        self.ensure_loaded().await;
        let added = self.cart.get_or_insert_with(Cart::new).insert(item);
        if added {
            tracing::debug!(id = %item.id, "added to cart");
            self.persist().await;
        } else {
            tracing::debug!(id = %item.id, "already in cart, ignoring add");
        }
        self.cart()
    }

    /// Remove the entry with `id`.
    ///
    /// Removing an id that is not in the cart changes nothing and writes
    /// nothing.
    pub async fn remove(&mut self, id: ItemId) -> &Cart {
        self.ensure_loaded().await;
        let removed = self.cart.get_or_insert_with(Cart::new).remove(id);
        if removed {
            tracing::debug!(id = %id, "removed from cart");
            self.persist().await;
        } else {
            tracing::debug!(id = %id, "not in cart, ignoring remove");
        }
        self.cart()
    }

    /// Sum of prices in the current cart; zero while unloaded.
    pub fn total(&self) -> Price {
        self.cart().total()
    }

    /// The current in-memory cart; empty while unloaded.
    pub fn cart(&self) -> &Cart {
        self.cart.as_ref().unwrap_or(&EMPTY_CART)
    }

    /// Wait for every background save issued so far.
    pub async fn flush(&mut self) {
        for handle in self.pending.drain(..) {
            if let Err(e) = handle.await {
                tracing::warn!(error = %e, "background cart save did not complete");
            }
        }
    }

    async fn ensure_loaded(&mut self) {
        if self.cart.is_none() {
            self.refresh().await;
        }
    }

    async fn persist(&mut self) {
        let snapshot = self.cart().clone();
        match self.mode {
            PersistMode::WriteThrough => self.repository.save(&snapshot).await,
            PersistMode::Background => {
                let Ok(runtime) = tokio::runtime::Handle::try_current() else {
                    // No runtime to spawn on, fall back to writing inline.
                    self.repository.save(&snapshot).await;
                    return;
                };

                self.pending.retain(|handle| !handle.is_finished());

                let seq = self.writes.next();
                let writes = Arc::clone(&self.writes);
                let repository = self.repository.clone();
                self.pending.push(runtime.spawn(async move {
                    writes.run(seq, repository.save(&snapshot)).await;
                }));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::CART_KEY;
    use storefront_kv::MemoryStore;

    fn item(id: i64, price: f64) -> Item {
        Item::new(
            id,
            format!("Item {}", id),
            "test item",
            Price::from_decimal(price).unwrap(),
            "assets/test.png",
        )
    }

    fn controller(store: &MemoryStore) -> CartController<MemoryStore> {
        CartController::new(CartRepository::new(Arc::new(store.clone())))
    }

    #[tokio::test]
    async fn test_starts_unloaded() {
        let store = MemoryStore::new();
        let controller = controller(&store);

        assert_eq!(controller.state(), CartState::Unloaded);
        assert!(controller.cart().is_empty());
        assert_eq!(controller.total(), Price::ZERO);
    }

    #[tokio::test]
    async fn test_refresh_loads() {
        let store = MemoryStore::new();
        let mut controller = controller(&store);

        assert!(controller.refresh().await.is_empty());
        assert_eq!(controller.state(), CartState::Loaded);
    }

    #[tokio::test]
    async fn test_add_writes_through() {
        let store = MemoryStore::new();
        let mut controller = controller(&store);
        controller.refresh().await;

        controller.add(&item(1, 10.0)).await;

        let raw = store.peek(CART_KEY).unwrap();
        let persisted: Cart = serde_json::from_str(&raw).unwrap();
        assert_eq!(&persisted, controller.cart());
    }

    #[tokio::test]
    async fn test_add_before_refresh_loads_first() {
        let store = MemoryStore::new();
        let mut other = controller(&store);
        other.add(&item(1, 1.0)).await;

        let mut controller = controller(&store);
        controller.add(&item(2, 2.0)).await;

        assert_eq!(controller.state(), CartState::Loaded);
        assert_eq!(controller.cart().ids(), vec![ItemId::new(1), ItemId::new(2)]);
    }

    #[tokio::test]
    async fn test_duplicate_add_does_not_write() {
        let store = MemoryStore::new();
        let mut controller = controller(&store);
        controller.add(&item(1, 10.0)).await;

        // Another screen empties the cart behind this controller's back.
        store.set(CART_KEY, "[]").await.unwrap();

        let cart = controller.add(&item(1, 10.0)).await;

        assert_eq!(cart.len(), 1);
        assert_eq!(store.peek(CART_KEY).as_deref(), Some("[]"));
    }

    #[tokio::test]
    async fn test_remove_absent_does_not_overwrite_store() {
        let store = MemoryStore::new();
        let mut stale = controller(&store);
        stale.refresh().await;

        let mut fresh = controller(&store);
        fresh.add(&item(1, 1.0)).await;

        // The stale screen removing something it never had must not clobber
        // the other screen's write.
        stale.remove(ItemId::new(9)).await;

        let mut check = controller(&store);
        assert_eq!(check.refresh().await.ids(), vec![ItemId::new(1)]);
    }

    #[tokio::test]
    async fn test_write_failure_keeps_optimistic_state() {
        let store = MemoryStore::new();
        let mut controller = controller(&store);
        controller.refresh().await;
        store.fail_writes(true);

        controller.add(&item(1, 10.0)).await;

        assert_eq!(controller.cart().len(), 1);
        assert_eq!(store.peek(CART_KEY).as_deref(), Some("[]"));

        // The next refresh re-reads durable state and drops the unsaved add.
        store.fail_writes(false);
        assert!(controller.refresh().await.is_empty());
    }

    #[tokio::test]
    async fn test_background_mode_persists_after_flush() {
        let store = MemoryStore::new();
        let mut controller = controller(&store).with_persist_mode(PersistMode::Background);
        controller.refresh().await;

        controller.add(&item(1, 10.0)).await;
        controller.add(&item(2, 5.5)).await;
        controller.remove(ItemId::new(1)).await;
        controller.flush().await;

        let mut check = self::controller(&store);
        assert_eq!(check.refresh().await.ids(), vec![ItemId::new(2)]);
    }

    #[tokio::test]
    async fn test_background_refresh_keeps_pending_saves() {
        let store = MemoryStore::new();
        let mut controller = controller(&store).with_persist_mode(PersistMode::Background);
        controller.refresh().await;

        controller.add(&item(1, 10.0)).await;
        assert_eq!(controller.refresh().await.ids(), vec![ItemId::new(1)]);
        controller.add(&item(2, 5.5)).await;
        controller.flush().await;

        let mut check = self::controller(&store);
        assert_eq!(
            check.refresh().await.ids(),
            vec![ItemId::new(1), ItemId::new(2)]
        );
    }

    #[tokio::test]
    async fn test_write_gate_skips_superseded_save() {
        let gate = WriteGate::default();
        let older = gate.next();
        let newer = gate.next();
        assert!(older < newer);

        let written = Arc::new(Mutex::new(Vec::new()));

        let log = Arc::clone(&written);
        assert!(gate.run(newer, async move { log.lock().await.push(newer) }).await);

        let log = Arc::clone(&written);
        assert!(!gate.run(older, async move { log.lock().await.push(older) }).await);

        assert_eq!(*written.lock().await, vec![newer]);
    }

    #[test]
    fn test_persist_mode_names() {
        assert_eq!(
            serde_json::to_string(&PersistMode::WriteThrough).unwrap(),
            r#""write-through""#
        );
        let mode: PersistMode = serde_json::from_str(r#""background""#).unwrap();
        assert_eq!(mode, PersistMode::Background);
    }
}
