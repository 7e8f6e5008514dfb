//! Shopping Cart Domain Models
//!
//! This module contains all data structures related to the shopping cart
//! business domain.

use crate::{
    catalog::{handlers::ProductView, models::Product},
    money::line_amount,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// =============================================================================
// Cart Domain Models
// =============================================================================

/// A product in the cart together with how many of it were added
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    /// The product as it was when first added
    pub product: Product,

    /// Always at least 1
    pub quantity: u32,
}

impl CartLine {
    /// Price times quantity, `None` when the product has no price.
    pub fn line_total(&self) -> Option<Decimal> {
        self.product
            .price
            .map(|price| line_amount(price, self.quantity))
    }
}

/// Input for adding a product to the cart
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartInput {
    /// Identifier of the product to add
    pub product_id: u64,
}

/// Input for changing a line's quantity
#[derive(Debug, Deserialize)]
pub struct SetQuantityInput {
    /// Requested quantity, values below 1 are ignored
    pub quantity: i64,
}

/// A cart line as returned by the API
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineView {
    pub product: ProductView,
    pub quantity: u32,
    pub line_total: Option<Decimal>,
}

/// Cart state returned after every cart operation
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    /// Session the cart belongs to
    pub cart_id: String,
    pub items: Vec<CartLineView>,
    pub total_items: u64,
    /// Subtotal rounded for display
    pub subtotal: Decimal,
    pub is_open: bool,
}
