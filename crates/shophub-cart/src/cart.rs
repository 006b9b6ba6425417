//! # Cart Collection
//!
//! The cart itself: an ordered sequence of line items, unique by product id,
//! with the count and total derived from the items on demand.
//!
//! ## Invariants
//! - Items are unique by `id` (adding the same product increases quantity)
//! - Quantity is always >= 1 (an update to 0 or below removes the item)
//! - `item_count()` and `total()` are computed from `items` every time, so
//!   they cannot go stale
//! - Every operation is total: bad input clamps or no-ops, never errors

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shophub_core::{Money, MAX_CART_ITEMS, MAX_ITEM_QUANTITY};
use ts_rs::TS;

// =============================================================================
// Cart Line
// =============================================================================

/// The payload the storefront dispatches on "Add to Cart".
///
/// The dispatcher validates fields before building a line; the cart itself
/// accepts whatever it is given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartLine {
    /// Product identifier, unique per cart.
    pub id: u64,

    /// Display name shown in the cart drawer.
    pub name: String,

    /// Unit price in cents at time of adding (frozen)
    /// This is critical: we lock in the price when added to cart
    pub price_cents: i64,

    /// Display image reference.
    pub image: String,
}

// =============================================================================
// Cart Item
// =============================================================================

/// A line item in the cart: an added line plus its quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartItem {
    /// Product identifier, unique per cart.
    pub id: u64,

    /// Display name at time of adding (frozen).
    pub name: String,

    /// Unit price in cents at time of adding (frozen).
    pub price_cents: i64,

    /// Display image reference.
    pub image: String,

    /// Quantity in cart, always >= 1.
    pub quantity: i64,

    /// When this item was first added to the cart.
    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl CartItem {
    /// Creates a cart item from a dispatched line with quantity 1.
    pub fn from_line(line: CartLine) -> Self {
        CartItem {
            id: line.id,
            name: line.name,
            price_cents: line.price_cents,
            image: line.image,
            quantity: 1,
            added_at: Utc::now(),
        }
    }

    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Calculates the line total (unit price × quantity).
    pub fn line_total(&self) -> Money {
        self.unit_price().multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    /// Items in the cart, in the order they were first added.
    pub items: Vec<CartItem>,

    /// When the cart was created/last cleared.
    pub created_at: DateTime<Utc>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart {
            items: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Adds a dispatched line to the cart.
    ///
    /// ## Behavior
    /// - If the product is already in the cart: quantity increases by one
    ///   (clamped at the per-item maximum)
    /// - If not: appended with quantity 1
    /// - At capacity, new lines are dropped rather than failed
    pub fn add_item(&mut self, line: CartLine) {
        if let Some(item) = self.items.iter_mut().find(|i| i.id == line.id) {
            item.quantity = (item.quantity + 1).min(MAX_ITEM_QUANTITY);
            return;
        }

        if self.items.len() >= MAX_CART_ITEMS {
            // Capacity clamp: the add is silently dropped.
            return;
        }

        self.items.push(CartItem::from_line(line));
    }

    /// Sets the quantity of an item in the cart.
    ///
    /// ## Behavior
    /// - Quantity <= 0: removes the item (the minus stepper walks a line
    ///   down to removal without a separate delete action)
    /// - Quantity above the per-item maximum: clamped
    /// - Unknown id: no-op
    pub fn update_quantity(&mut self, id: u64, quantity: i64) {
        if quantity <= 0 {
            self.remove_item(id);
            return;
        }

        if let Some(item) = self.items.iter_mut().find(|i| i.id == id) {
            item.quantity = quantity.min(MAX_ITEM_QUANTITY);
        }
    }

    /// Removes an item from the cart by product id. No-op when absent.
    pub fn remove_item(&mut self, id: u64) {
        self.items.retain(|i| i.id != id);
    }

    /// Clears all items from the cart.
    pub fn clear(&mut self) {
        self.items.clear();
        self.created_at = Utc::now();
    }

    /// Returns the total quantity across all items (the cart badge number).
    ///
    /// Derived from `items` on every call; there is no stored counter to
    /// drift out of sync.
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Calculates the cart total (sum of line totals).
    pub fn total(&self) -> Money {
        self.items
            .iter()
            .map(CartItem::line_total)
            .fold(Money::zero(), |acc, line| acc + line)
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn line(id: u64, price_cents: i64) -> CartLine {
        CartLine {
            id,
            name: format!("Product {}", id),
            price_cents,
            image: "/placeholder.svg".to_string(),
        }
    }

    #[test]
    fn test_add_item_appends_with_quantity_one() {
        let mut cart = Cart::new();
        cart.add_item(line(1, 2500));

        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].quantity, 1);
        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.total().cents(), 2500);
    }

    #[test]
    fn test_add_same_product_merges_by_id() {
        let mut cart = Cart::new();
        cart.add_item(line(1, 2500));
        cart.add_item(line(1, 2500));

        assert_eq!(cart.items.len(), 1); // still one unique line
        assert_eq!(cart.item_count(), 2);
        assert_eq!(cart.total().cents(), 5000);
    }

    #[test]
    fn test_add_merge_equals_increment() {
        // Adding an existing id must behave exactly like bumping its quantity
        let mut merged = Cart::new();
        merged.add_item(line(7, 1099));
        merged.add_item(line(7, 1099));

        let mut bumped = Cart::new();
        bumped.add_item(line(7, 1099));
        bumped.update_quantity(7, 2);

        assert_eq!(merged.item_count(), bumped.item_count());
        assert_eq!(merged.total(), bumped.total());
    }

    #[test]
    fn test_update_quantity_zero_or_negative_removes() {
        let mut cart = Cart::new();
        cart.add_item(line(1, 2500));
        cart.update_quantity(1, 0);
        assert!(cart.is_empty());

        cart.add_item(line(1, 2500));
        cart.update_quantity(1, -5);
        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
        assert_eq!(cart.total(), Money::zero());
    }

    #[test]
    fn test_update_quantity_unknown_id_is_noop() {
        let mut cart = Cart::new();
        cart.add_item(line(1, 2500));
        cart.update_quantity(99, 5);

        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.total().cents(), 2500);
    }

    #[test]
    fn test_update_quantity_clamps_at_maximum() {
        let mut cart = Cart::new();
        cart.add_item(line(1, 100));
        cart.update_quantity(1, 5000);

        assert_eq!(cart.items[0].quantity, MAX_ITEM_QUANTITY);
    }

    #[test]
    fn test_remove_item_is_noop_when_absent() {
        let mut cart = Cart::new();
        cart.add_item(line(1, 2500));
        cart.remove_item(42);

        assert_eq!(cart.items.len(), 1);
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut cart = Cart::new();
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
        assert_eq!(cart.total(), Money::zero());

        cart.add_item(line(1, 2500));
        cart.add_item(line(2, 999));
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
        assert_eq!(cart.total(), Money::zero());
    }

    #[test]
    fn test_capacity_clamp_drops_new_lines() {
        let mut cart = Cart::new();
        for id in 0..MAX_CART_ITEMS as u64 {
            cart.add_item(line(id, 100));
        }
        cart.add_item(line(9999, 100));

        assert_eq!(cart.items.len(), MAX_CART_ITEMS);
        // Merging into an existing line still works at capacity
        cart.add_item(line(0, 100));
        assert_eq!(cart.items[0].quantity, 2);
    }

    #[test]
    fn test_derived_totals_never_drift() {
        // Mixed operation sequence; count and total must always equal the
        // recomputed sums.
        let mut cart = Cart::new();
        cart.add_item(line(1, 2500));
        cart.add_item(line(2, 999));
        cart.add_item(line(1, 2500));
        cart.update_quantity(2, 4);
        cart.remove_item(1);
        cart.add_item(line(3, 150));

        let expected_count: i64 = cart.items.iter().map(|i| i.quantity).sum();
        let expected_total: i64 = cart
            .items
            .iter()
            .map(|i| i.price_cents * i.quantity)
            .sum();

        assert_eq!(cart.item_count(), expected_count);
        assert_eq!(cart.total().cents(), expected_total);
    }

    #[test]
    fn test_mouse_scenario() {
        // Empty cart → add $25.00 mouse → add again → set quantity to 0
        let mut cart = Cart::new();

        let mouse = CartLine {
            id: 1,
            name: "Mouse".to_string(),
            price_cents: 2500,
            image: "/mouse.jpg".to_string(),
        };

        cart.add_item(mouse.clone());
        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.total().cents(), 2500);

        cart.add_item(mouse);
        assert_eq!(cart.item_count(), 2);
        assert_eq!(cart.total().cents(), 5000);

        cart.update_quantity(1, 0);
        assert_eq!(cart.item_count(), 0);
        assert_eq!(cart.total(), Money::zero());
        assert!(cart.items.is_empty());
    }
}
