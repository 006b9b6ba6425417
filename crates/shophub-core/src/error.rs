//! # Error Types
//!
//! Validation error types for shophub-core.
//!
//! ## Where Errors Live (and Don't)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  shophub-core errors (this file)                                       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  shophub-search errors (separate crate)                                │
//! │  └── CatalogError     - Catalog lookup/listing failures                │
//! │                                                                         │
//! │  shophub-cart has NO error type: cart operations are total. Bad       │
//! │  input is clamped or ignored, never raised (a broken "Add to Cart"    │
//! │  button is worse than a quietly-capped quantity).                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field name, limits)
//! 3. Errors are enum variants, never String

use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when caller-provided input doesn't meet requirements.
/// Used for early validation at the UI boundary, before state changes run.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with ValidationError.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================
