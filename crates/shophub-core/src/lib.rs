//! # shophub-core: Pure Domain Logic for the ShopHub Client Core
//!
//! This crate is the foundation of the ShopHub client-state layer. It contains
//! the marketplace domain types and price math as pure functions with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     ShopHub Client-State Architecture                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Storefront Pages (UI)                        │   │
//! │  │    Search Bar ──► Result List ──► Cart Drawer ──► Checkout     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ dispatch / subscribe                   │
//! │  ┌──────────────────┐  ┌──────▼───────────┐                            │
//! │  │  shophub-search  │  │   shophub-cart   │                            │
//! │  │  query debounce  │  │   cart store     │                            │
//! │  └────────┬─────────┘  └──────┬───────────┘                            │
//! │           │                   │                                         │
//! │  ┌────────▼───────────────────▼───────────────────────────────────┐    │
//! │  │               ★ shophub-core (THIS CRATE) ★                    │    │
//! │  │                                                                │    │
//! │  │   ┌───────────┐  ┌───────────┐  ┌────────────┐                │    │
//! │  │   │   types   │  │   money   │  │ validation │                │    │
//! │  │   │  Product  │  │   Money   │  │   rules    │                │    │
//! │  │   │  Category │  │  Discount │  │   checks   │                │    │
//! │  │   └───────────┘  └───────────┘  └────────────┘                │    │
//! │  │                                                                │    │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                         │    │
//! │  └────────────────────────────────────────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (ProductSummary, Category, OrderStatus)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Validation error types
//! - [`validation`] - Input validation rules
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Network and file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Explicit Errors**: Validation errors are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use shophub_core::Money` instead of
// `use shophub_core::money::Money`

pub use error::{ValidationError, ValidationResult};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum unique items allowed in a single cart.
///
/// Cart operations never fail; an add past this limit is dropped on the
/// floor rather than surfaced as an error.
pub const MAX_CART_ITEMS: usize = 100;

/// Maximum quantity of a single line in the cart.
///
/// Quantity updates past this value are clamped, not rejected (a stepper
/// held down or a typo like 1000-instead-of-10 must never break the cart).
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Image used when a product carries no images of its own.
pub const PLACEHOLDER_IMAGE: &str = "/placeholder.svg";
