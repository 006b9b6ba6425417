//! # Local Fallback Filter
//!
//! When the catalog lookup fails, search must still show *something*: the
//! cached catalog is filtered locally and presented as a best-effort result
//! set. The storefront never sees a hard search error.

use shophub_core::ProductSummary;

/// Filters the cached catalog for case-insensitive substring matches.
///
/// A product matches when the query appears in its name, its category name,
/// or its description (OR semantics). Catalog order is preserved; the
/// fallback does not re-rank.
pub fn filter_catalog(catalog: &[ProductSummary], query: &str) -> Vec<ProductSummary> {
    let needle = query.to_lowercase();
    catalog
        .iter()
        .filter(|p| p.matches(&needle))
        .cloned()
        .collect()
}
