//! # Cart Store
//!
//! The thread-safe owner of the cart. Page components hold a reference to
//! the store and dispatch through it; they never touch the `Cart` directly.
//!
//! ## Thread Safety
//! The cart is wrapped in a `Mutex` because:
//! 1. Multiple UI callbacks may dispatch into the store
//! 2. Only one mutation may run at a time
//! 3. Observers must see a snapshot taken under the same lock as the
//!    mutation, so no partial update is ever observable
//!
//! ## Why Not RwLock?
//! Cart operations are quick and most of them write. A RwLock would add
//! complexity with minimal benefit.
//!
//! ## Observers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Observer Notification                                │
//! │                                                                         │
//! │  store.add_item(line)                                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  lock ── mutate ── derive snapshot ── unlock                            │
//! │                          │                                              │
//! │                          ▼                                              │
//! │  for each observer: observer.cart_changed(&snapshot)                    │
//! │                                                                         │
//! │  Observers run OUTSIDE the lock: a subscriber that dispatches back      │
//! │  into the store (badge refresh, persistence write-through) must not     │
//! │  deadlock.                                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::cart::{Cart, CartItem, CartLine};

// =============================================================================
// Cart Snapshot
// =============================================================================

/// A consistent view of the cart handed to observers and page components.
///
/// `item_count` and `total_cents` are derived from `items` at snapshot time
/// under the store lock; a snapshot can never carry stale totals.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartSnapshot {
    pub items: Vec<CartItem>,
    pub item_count: i64,
    pub total_cents: i64,
}

impl From<&Cart> for CartSnapshot {
    fn from(cart: &Cart) -> Self {
        CartSnapshot {
            items: cart.items.clone(),
            item_count: cart.item_count(),
            total_cents: cart.total().cents(),
        }
    }
}

// =============================================================================
// Observer Trait
// =============================================================================

/// Trait for observing cart changes (badge counters, drawers, persistence).
///
/// Remote cart persistence is an external collaborator: it subscribes here
/// and writes snapshots wherever it likes; the store itself stays pure
/// in-memory.
pub trait CartObserver: Send + Sync {
    /// Called after every completed mutation with the resulting snapshot.
    fn cart_changed(&self, snapshot: &CartSnapshot);
}

/// No-op observer for testing.
pub struct NoOpObserver;

impl CartObserver for NoOpObserver {
    fn cart_changed(&self, _snapshot: &CartSnapshot) {}
}

// =============================================================================
// Cart Store
// =============================================================================

/// The explicitly constructed cart owner.
///
/// Constructed once per browsing session and passed by reference to
/// consumers; there is no ambient/global cart.
pub struct CartStore {
    cart: Mutex<Cart>,
    observers: Mutex<Vec<Arc<dyn CartObserver>>>,
}

impl CartStore {
    /// Creates a new store with an empty cart.
    pub fn new() -> Self {
        CartStore {
            cart: Mutex::new(Cart::new()),
            observers: Mutex::new(Vec::new()),
        }
    }

    /// Registers an observer for subsequent mutations.
    pub fn subscribe(&self, observer: Arc<dyn CartObserver>) {
        self.observers
            .lock()
            .expect("Observer mutex poisoned")
            .push(observer);
    }

    /// Adds a dispatched line to the cart.
    pub fn add_item(&self, line: CartLine) -> CartSnapshot {
        debug!(id = line.id, name = %line.name, "add_item");
        self.mutate(|cart| cart.add_item(line))
    }

    /// Sets the quantity of an item; zero or below removes it.
    pub fn update_quantity(&self, id: u64, quantity: i64) -> CartSnapshot {
        debug!(id, quantity, "update_quantity");
        self.mutate(|cart| cart.update_quantity(id, quantity))
    }

    /// Removes an item by product id.
    pub fn remove_item(&self, id: u64) -> CartSnapshot {
        debug!(id, "remove_item");
        self.mutate(|cart| cart.remove_item(id))
    }

    /// Clears the cart.
    pub fn clear(&self) -> CartSnapshot {
        debug!("clear");
        self.mutate(Cart::clear)
    }

    /// Returns a consistent snapshot of the current cart.
    pub fn snapshot(&self) -> CartSnapshot {
        let cart = self.cart.lock().expect("Cart mutex poisoned");
        CartSnapshot::from(&*cart)
    }

    /// Executes a function with read access to the cart.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let empty = store.with_cart(|cart| cart.is_empty());
    /// ```
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        let cart = self.cart.lock().expect("Cart mutex poisoned");
        f(&cart)
    }

    /// Applies a mutation atomically, then notifies observers.
    ///
    /// The snapshot is derived before the lock is released, so observers
    /// and the caller both see the exact state the mutation produced.
    fn mutate<F>(&self, f: F) -> CartSnapshot
    where
        F: FnOnce(&mut Cart),
    {
        let snapshot = {
            let mut cart = self.cart.lock().expect("Cart mutex poisoned");
            f(&mut cart);
            CartSnapshot::from(&*cart)
        };
        self.notify(&snapshot);
        snapshot
    }

    fn notify(&self, snapshot: &CartSnapshot) {
        let observers = self.observers.lock().expect("Observer mutex poisoned");
        for observer in observers.iter() {
            observer.cart_changed(snapshot);
        }
    }
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
