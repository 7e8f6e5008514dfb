//! Product Catalog Domain Module
//!
//! This module contains the product catalog, including:
//! - Domain models (Product, API envelope decoding)
//! - The fallback catalog and image resolution
//! - The product API client and catalog state management
//! - REST API handlers

pub mod errors;
pub mod fallback;
pub mod handlers;
pub mod images;
pub mod models;
pub mod source;
pub mod store;

// Re-export commonly used types for convenience
pub use handlers::routes;
pub use store::{Catalog, CatalogStore};
