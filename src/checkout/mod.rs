//! Checkout Domain Module
//!
//! This module contains the checkout flow, including:
//! - The checkout form and order payload
//! - The checkout state machine and simulated submission
//! - REST API handlers

pub mod errors;
pub mod flow;
pub mod handlers;
pub mod models;
pub mod submitter;

// Re-export commonly used types for convenience
pub use flow::CheckoutFlow;
pub use handlers::routes;
