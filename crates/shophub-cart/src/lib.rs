//! # shophub-cart: Cart Store
//!
//! Owns the shopping cart as an ordered collection of line items and keeps
//! the derived item count and monetary total consistent with it at all times.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Store Operations                                │
//! │                                                                         │
//! │  Storefront Action        Store Operation          Cart State Change    │
//! │  ─────────────────        ───────────────          ─────────────────    │
//! │                                                                         │
//! │  Click "Add to Cart" ────► add_item(line) ───────► merge or append     │
//! │                                                                         │
//! │  Quantity stepper ───────► update_quantity(id,n) ► set / remove at 0   │
//! │                                                                         │
//! │  Click trash icon ───────► remove_item(id) ──────► items.retain(..)    │
//! │                                                                         │
//! │  Checkout complete ──────► clear() ──────────────► items = []          │
//! │                                                                         │
//! │  Cart badge / drawer ────► snapshot() ───────────► (read only)         │
//! │                                                                         │
//! │  NOTE: every mutation notifies subscribed observers with a snapshot    │
//! │        whose itemCount and total were derived under the same lock.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`cart`] - The cart collection itself and its four operations
//! - [`store`] - Thread-safe owner with observer notification

pub mod cart;
pub mod store;

pub use cart::{Cart, CartItem, CartLine};
pub use store::{CartObserver, CartSnapshot, CartStore, NoOpObserver};
