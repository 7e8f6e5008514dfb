//! Storefront Library
//!
//! This library provides the core functionality for a storefront backend:
//! a product catalog with a built-in fallback, per-session shopping carts and
//! a simulated checkout.

// Domain modules
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod money;

// Infrastructure
pub mod config;
pub mod logging;
pub mod router;
pub mod state;
