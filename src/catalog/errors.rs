//! Catalog errors.

use thiserror::Error;

/// Outcome of a failed single-product lookup.
///
/// Callers treat the two cases differently: `NotFound` leads to a not-found
/// view, `FetchFailed` to a generic retry message.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Product not found")]
    NotFound,

    #[error("Failed to fetch product: {0}")]
    FetchFailed(String),
}
