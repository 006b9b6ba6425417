//! # Catalog Error Types
//!
//! Errors produced by the injected catalog source.
//!
//! None of these ever reach the storefront: the coordinator converts lookup
//! failures into the local-fallback path and logs catalog-refresh failures.
//! The types exist so sources can report *what* went wrong and the logs can
//! say so.

use thiserror::Error;

/// Result type alias for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Catalog source failure.
///
/// ## Design Principles
/// - Each variant includes enough context for log lines
/// - All errors are `Send + Sync` for async compatibility
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The backend rejected or failed the request.
    #[error("catalog backend error: {0}")]
    Backend(String),

    /// The backend answered but the payload could not be decoded.
    #[error("catalog response could not be decoded: {0}")]
    Decode(String),

    /// The backend could not be reached at all.
    #[error("catalog source unavailable: {0}")]
    Unavailable(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CatalogError::Backend("row level security violation".to_string());
        assert_eq!(
            err.to_string(),
            "catalog backend error: row level security violation"
        );

        let err = CatalogError::Unavailable("connection refused".to_string());
        assert_eq!(
            err.to_string(),
            "catalog source unavailable: connection refused"
        );
    }
}
