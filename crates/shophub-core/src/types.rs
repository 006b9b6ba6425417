//! # Domain Types
//!
//! Core domain types used throughout the ShopHub client core.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌──────────────────┐   ┌─────────────────┐   ┌─────────────────┐      │
//! │  │  ProductSummary  │   │    Category     │   │   OrderStatus   │      │
//! │  │  ──────────────  │   │  ─────────────  │   │  ─────────────  │      │
//! │  │  id (UUID)       │   │  id (UUID)      │   │  Pending        │      │
//! │  │  name            │   │  name           │   │  Shipped        │      │
//! │  │  price_cents     │   └─────────────────┘   │  Delivered ...  │      │
//! │  │  images          │                         └─────────────────┘      │
//! │  └──────────────────┘                                                  │
//! │                                                                         │
//! │  ProductSummary is the shape the hosted catalog returns; the client    │
//! │  core consumes it for search results, the fallback filter, and cart    │
//! │  line construction. It never writes products back.                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::PLACEHOLDER_IMAGE;

// =============================================================================
// Category
// =============================================================================

/// A product category as embedded in catalog responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Category {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name shown in navigation and badges.
    pub name: String,
}

// =============================================================================
// Product Summary
// =============================================================================

/// The product representation consumed by search and display logic.
///
/// This is a read-only summary produced by the hosted catalog; seller-side
/// editing works on a richer shape that never enters the client core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductSummary {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name shown in result lists and the cart drawer.
    pub name: String,

    /// Price in cents (smallest currency unit).
    pub price_cents: i64,

    /// Strike-through list price in cents, when the product is on sale.
    pub compare_at_price_cents: Option<i64>,

    /// Image references, first image is the primary one.
    pub images: Vec<String>,

    /// Category, when the catalog response embeds it.
    pub category: Option<Category>,

    /// Optional long-form description.
    pub description: Option<String>,

    /// Whether the seller flagged this product as featured.
    pub is_featured: bool,

    /// When the product was created. Catalog listings come back
    /// most-recent-first, keyed on this.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl ProductSummary {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Returns the strike-through list price as Money, if any.
    #[inline]
    pub fn compare_at_price(&self) -> Option<Money> {
        self.compare_at_price_cents.map(Money::from_cents)
    }

    /// Returns the primary display image, falling back to the placeholder.
    pub fn primary_image(&self) -> &str {
        self.images
            .first()
            .map(String::as_str)
            .unwrap_or(PLACEHOLDER_IMAGE)
    }

    /// Returns the badge text shown on product cards, if any.
    pub fn badge(&self) -> Option<&'static str> {
        if self.is_featured {
            Some("Featured")
        } else {
            None
        }
    }

    /// Returns the whole-number discount percentage against the list price.
    ///
    /// `None` when there is no compare-at price or no real saving.
    pub fn discount_percent(&self) -> Option<u32> {
        let list = self.compare_at_price()?;
        self.price().percent_off(list)
    }

    /// Checks if a case-insensitive needle appears in the name, category
    /// name, or description.
    pub fn matches(&self, needle_lower: &str) -> bool {
        self.name.to_lowercase().contains(needle_lower)
            || self
                .category
                .as_ref()
                .is_some_and(|c| c.name.to_lowercase().contains(needle_lower))
            || self
                .description
                .as_ref()
                .is_some_and(|d| d.to_lowercase().contains(needle_lower))
    }
}

// =============================================================================
// Order Status
// =============================================================================

/// The status of a marketplace order, as shown in order history.
///
/// The client core only displays statuses; transitions happen on the hosted
/// backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Order placed, awaiting confirmation.
    Pending,
    /// Seller confirmed the order.
    Confirmed,
    /// Items being picked and packed.
    Processing,
    /// Handed to the carrier.
    Shipped,
    /// Arrived at the buyer.
    Delivered,
    /// Cancelled before fulfilment.
    Cancelled,
    /// Payment returned after fulfilment.
    Refunded,
}

impl OrderStatus {
    /// Human-readable label for order-history rows.
    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Confirmed => "Confirmed",
            OrderStatus::Processing => "Processing",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
            OrderStatus::Refunded => "Refunded",
        }
    }

    /// Whether the order has reached a final state.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            OrderStatus::Delivered | OrderStatus::Cancelled | OrderStatus::Refunded
        )
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Pending
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
