//! # Catalog Source Boundary
//!
//! The injected lookup function the coordinator delegates to. The core does
//! not know or care whether a source is backed by a remote call or local
//! data; it only requires asynchronous semantics and honest errors.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    CatalogSource Implementations                        │
//! │                                                                         │
//! │  SearchCoordinator ──► dyn CatalogSource                                │
//! │                             │                                           │
//! │              ┌──────────────┴──────────────┐                            │
//! │              ▼                             ▼                            │
//! │     hosted-backend client          StaticCatalog (this file)           │
//! │     (lives with the app,           in-memory, for tests and            │
//! │      out of scope here)            the console demo                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use shophub_core::ProductSummary;

use crate::error::CatalogResult;

/// Maximum results a search returns.
const SEARCH_LIMIT: usize = 10;

// =============================================================================
// List Options
// =============================================================================

/// Filter options for catalog listings.
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    /// Restrict to one category.
    pub category_id: Option<String>,

    /// Only featured products.
    pub featured_only: bool,

    /// Free-text filter over name and description.
    pub search: Option<String>,

    /// Maximum number of products to return.
    pub limit: Option<usize>,

    /// Number of products to skip (pagination).
    pub offset: Option<usize>,
}

/// One page of a catalog listing.
#[derive(Debug, Clone)]
pub struct ProductPage {
    /// The products on this page, most recent first.
    pub products: Vec<ProductSummary>,

    /// Total matching products before pagination.
    pub count: usize,
}

// =============================================================================
// Catalog Source Trait
// =============================================================================

/// The consumed catalog boundary.
///
/// Implementations must be cheap to call repeatedly: the coordinator issues
/// a lookup per settled keystroke. Cancellation is by staleness on the
/// caller's side; a source is never told to stop.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Free-text product search, best matches first.
    async fn search(&self, query: &str) -> CatalogResult<Vec<ProductSummary>>;

    /// Lists products with filters and pagination.
    async fn list(&self, options: &ListOptions) -> CatalogResult<ProductPage>;
}

// =============================================================================
// Static Catalog
// =============================================================================

/// In-memory catalog source for tests and the console demo.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    products: Vec<ProductSummary>,
}

impl StaticCatalog {
    /// Creates a static catalog over a fixed product set.
    pub fn new(products: Vec<ProductSummary>) -> Self {
        StaticCatalog { products }
    }

    /// Number of products in the catalog.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Checks if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[async_trait]
impl CatalogSource for StaticCatalog {
    async fn search(&self, query: &str) -> CatalogResult<Vec<ProductSummary>> {
        let needle = query.to_lowercase();
        Ok(self
            .products
            .iter()
            .filter(|p| {
                p.name.to_lowercase().contains(&needle)
                    || p.description
                        .as_ref()
                        .is_some_and(|d| d.to_lowercase().contains(&needle))
            })
            .take(SEARCH_LIMIT)
            .cloned()
            .collect())
    }

    async fn list(&self, options: &ListOptions) -> CatalogResult<ProductPage> {
        let needle = options.search.as_ref().map(|s| s.to_lowercase());

        let mut matches: Vec<ProductSummary> = self
            .products
            .iter()
            .filter(|p| {
                options
                    .category_id
                    .as_ref()
                    .is_none_or(|id| p.category.as_ref().is_some_and(|c| &c.id == id))
            })
            .filter(|p| !options.featured_only || p.is_featured)
            .filter(|p| {
                needle.as_ref().is_none_or(|n| {
                    p.name.to_lowercase().contains(n)
                        || p.description
                            .as_ref()
                            .is_some_and(|d| d.to_lowercase().contains(n))
                })
            })
            .cloned()
            .collect();

        // Most recent first, the order the hosted catalog uses
        matches.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let count = matches.len();
        let offset = options.offset.unwrap_or(0).min(count);
        let mut page: Vec<ProductSummary> = matches.into_iter().skip(offset).collect();
        if let Some(limit) = options.limit {
            page.truncate(limit);
        }

        Ok(ProductPage {
            products: page,
            count,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
