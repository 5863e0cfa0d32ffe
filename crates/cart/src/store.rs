//! The cart store: in-memory line items plus write-behind persistence.
//!
//! [`CartStore`] is constructed once at application start via
//! [`CartStore::open`] and handed to whatever needs it; the handle is
//! cheaply cloneable. Mutations are synchronous and never touch storage on
//! the caller's path. Instead, each mutation publishes a versioned snapshot
//! to a background worker that owns all writes to the storage slot: the
//! worker always serializes the *latest* published snapshot, so bursts of
//! mutations coalesce and the slot converges to the newest in-memory state
//! (last write wins, by version).

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tokio::sync::watch;
use tracing::{debug, error, instrument, warn};

use pocket_market_core::{LineItem, Product, ProductId};

use crate::error::CartError;
use crate::storage::CartStorage;

/// Storage slot holding the serialized cart.
pub const CART_STORAGE_KEY: &str = "pocket-market:cart";

/// In-memory cart contents plus the version counter stamped onto snapshots.
///
/// Versions are assigned under the same lock that guards the items, so the
/// worker observes strictly increasing versions.
struct CartState {
    items: Vec<LineItem>,
    version: u64,
}

/// A point-in-time copy of the cart, tagged for last-write-wins.
#[derive(Debug, Clone)]
struct Snapshot {
    version: u64,
    items: Vec<LineItem>,
}

/// Outcome of the worker's most recent write attempt.
#[derive(Debug, Clone, Default)]
struct WriteOutcome {
    version: u64,
    error: Option<String>,
}

/// The shopping cart.
///
/// Holds an ordered collection of line items, unique by product id, and
/// keeps a persistent key-value slot eventually consistent with it. Item
/// order is stable: mutations update lines in place and new products append
/// at the end.
#[derive(Clone)]
pub struct CartStore {
    inner: Arc<CartStoreInner>,
}

struct CartStoreInner {
    state: RwLock<CartState>,
    snapshot_tx: watch::Sender<Snapshot>,
    outcome_rx: watch::Receiver<WriteOutcome>,
}

impl CartStore {
    /// Open a cart backed by `storage`, hydrating any prior snapshot.
    ///
    /// Hydration completes before the handle is returned, so every mutation
    /// observes the restored state. A stored value that fails to parse is
    /// logged and treated as no prior snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Storage`] if the backend cannot be read at all;
    /// absent data is not an error.
    pub async fn open(storage: Arc<dyn CartStorage>) -> Result<Self, CartError> {
        let items = match storage.get(CART_STORAGE_KEY).await? {
            Some(raw) => match serde_json::from_str::<Vec<LineItem>>(&raw) {
                Ok(items) => {
                    debug!(count = items.len(), "hydrated cart from storage");
                    items
                }
                Err(e) => {
                    warn!(error = %e, "stored cart snapshot is malformed; starting empty");
                    Vec::new()
                }
            },
            None => {
                debug!("no stored cart snapshot; starting empty");
                Vec::new()
            }
        };

        let (snapshot_tx, snapshot_rx) = watch::channel(Snapshot {
            version: 0,
            items: Vec::new(),
        });
        let (outcome_tx, outcome_rx) = watch::channel(WriteOutcome::default());

        tokio::spawn(write_behind(storage, snapshot_rx, outcome_tx));

        Ok(Self {
            inner: Arc::new(CartStoreInner {
                state: RwLock::new(CartState { items, version: 0 }),
                snapshot_tx,
                outcome_rx,
            }),
        })
    }

    /// Add one unit of `product` to the cart.
    ///
    /// If a line with the product's id already exists its quantity grows by
    /// one and the line keeps its position; otherwise a new line with
    /// quantity 1 is appended. Always succeeds; the write-back happens in
    /// the background.
    pub fn add_to_cart(&self, product: Product) {
        let mut state = self.state_write();
        match state.items.iter_mut().find(|item| item.id == product.id) {
            Some(item) => item.quantity += 1,
            None => state.items.push(LineItem::from(product)),
        }
        self.publish(&mut state);
    }

    /// Increase the quantity of the line identified by `id` by one.
    ///
    /// A missing id is a no-op on the collection; the (unchanged) snapshot
    /// is still scheduled for write-back.
    pub fn increment(&self, id: &ProductId) {
        let mut state = self.state_write();
        if let Some(item) = state.items.iter_mut().find(|item| &item.id == id) {
            item.quantity += 1;
        }
        self.publish(&mut state);
    }

    /// Decrease the quantity of the line identified by `id` by one.
    ///
    /// A line whose quantity would reach zero is removed entirely; the cart
    /// never retains zero-quantity lines. A missing id is a no-op.
    pub fn decrement(&self, id: &ProductId) {
        let mut state = self.state_write();
        if let Some(pos) = state.items.iter().position(|item| &item.id == id) {
            let drop_line = state.items.get(pos).is_some_and(|item| item.quantity <= 1);
            if drop_line {
                state.items.remove(pos);
            } else if let Some(item) = state.items.get_mut(pos) {
                item.quantity -= 1;
            }
        }
        self.publish(&mut state);
    }

    /// Current line items, in cart order.
    #[must_use]
    pub fn items(&self) -> Vec<LineItem> {
        self.state_read().items.clone()
    }

    /// Number of distinct lines in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state_read().items.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state_read().items.is_empty()
    }

    /// Total units across all lines (the cart badge number).
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.state_read().items.iter().map(|item| item.quantity).sum()
    }

    /// Wait until the worker has attempted persistence of the current state.
    ///
    /// Ordinary mutations never wait on storage; call this on shutdown or
    /// wherever durability actually matters.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::WriteBack`] if the write attempt covering the
    /// current version failed, or [`CartError::WriterGone`] if the worker
    /// has stopped.
    pub async fn flush(&self) -> Result<(), CartError> {
        let target = self.state_read().version;
        let mut outcomes = self.inner.outcome_rx.clone();

        loop {
            let outcome = outcomes.borrow_and_update().clone();
            if outcome.version >= target {
                return match outcome.error {
                    Some(e) => Err(CartError::WriteBack(e)),
                    None => Ok(()),
                };
            }
            outcomes
                .changed()
                .await
                .map_err(|_| CartError::WriterGone)?;
        }
    }

    /// Stamp the state with a new version and hand a snapshot to the worker.
    fn publish(&self, state: &mut RwLockWriteGuard<'_, CartState>) {
        state.version += 1;
        let snapshot = Snapshot {
            version: state.version,
            items: state.items.clone(),
        };
        if self.inner.snapshot_tx.send(snapshot).is_err() {
            warn!("persistence worker is gone; cart changes stay in memory only");
        }
    }

    fn state_read(&self) -> RwLockReadGuard<'_, CartState> {
        self.inner.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn state_write(&self) -> RwLockWriteGuard<'_, CartState> {
        self.inner.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Background worker owning all writes to the cart's storage slot.
///
/// `watch` only retains the newest snapshot, so a burst of mutations
/// collapses into a single write of the final state. Failed writes are
/// logged and reported through the outcome channel; the next snapshot
/// supersedes them. Exits when every store handle has been dropped.
#[instrument(skip_all)]
async fn write_behind(
    storage: Arc<dyn CartStorage>,
    mut snapshots: watch::Receiver<Snapshot>,
    outcomes: watch::Sender<WriteOutcome>,
) {
    while snapshots.changed().await.is_ok() {
        let snapshot = snapshots.borrow_and_update().clone();

        let payload = match serde_json::to_string(&snapshot.items) {
            Ok(payload) => payload,
            Err(e) => {
                error!(error = %e, version = snapshot.version, "failed to serialize cart snapshot");
                let _ = outcomes.send(WriteOutcome {
                    version: snapshot.version,
                    error: Some(e.to_string()),
                });
                continue;
            }
        };

        match storage.set(CART_STORAGE_KEY, payload).await {
            Ok(()) => {
                debug!(version = snapshot.version, "persisted cart snapshot");
                let _ = outcomes.send(WriteOutcome {
                    version: snapshot.version,
                    error: None,
                });
            }
            Err(e) => {
                warn!(error = %e, version = snapshot.version, "cart write-back failed");
                let _ = outcomes.send(WriteOutcome {
                    version: snapshot.version,
                    error: Some(e.to_string()),
                });
            }
        }
    }
    debug!("all cart handles dropped; persistence worker exiting");
}
