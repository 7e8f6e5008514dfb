//! Catalog Domain Models
//!
//! This module contains the product record shared by the catalog, the cart
//! and checkout, plus decoding of the product API envelope.

use crate::money::parse_decimal;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use tracing::warn;

// =============================================================================
// Product
// =============================================================================

/// Availability of a product as reported by the product API.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    InStock,
    OutOfStock,
}

/// Represents a catalog item
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Stable numeric identifier
    pub id: u64,

    /// Display name
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,

    /// Long description, may contain markup that is passed through verbatim
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Unit price, never negative
    #[serde(
        default,
        deserialize_with = "deserialize_price",
        skip_serializing_if = "Option::is_none"
    )]
    pub price: Option<Decimal>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,

    #[serde(
        default,
        deserialize_with = "deserialize_stock_status",
        skip_serializing_if = "Option::is_none"
    )]
    pub stock_status: Option<StockStatus>,

    /// Average rating between 0 and 5
    #[serde(
        default,
        deserialize_with = "deserialize_rating",
        skip_serializing_if = "Option::is_none"
    )]
    pub rating: Option<f64>,

    /// Captures any extra fields sent by the product API
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

impl Product {
    /// Creates a product with only the required fields set.
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            slug: None,
            short_description: None,
            description: None,
            price: None,
            thumbnail: None,
            category_name: None,
            stock_status: None,
            rating: None,
            extra: HashMap::new(),
        }
    }

    /// Sets the unit price.
    pub fn with_price(mut self, price: Decimal) -> Self {
        self.price = Some(price);
        self
    }

    /// Whether `id` is this product's identifier in its decimal form.
    pub fn matches_id(&self, id: &str) -> bool {
        self.id.to_string() == id
    }

    /// Unit price, with a missing price counting as zero.
    pub fn price_or_zero(&self) -> Decimal {
        self.price.unwrap_or(Decimal::ZERO)
    }
}

fn deserialize_price<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(parse_decimal(&value).filter(|price| *price >= Decimal::ZERO))
}

fn deserialize_stock_status<'de, D>(deserializer: D) -> Result<Option<StockStatus>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

fn deserialize_rating<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_f64().filter(|rating| (0.0..=5.0).contains(rating)))
}

// =============================================================================
// API Envelope
// =============================================================================

/// Extracts the products from a product API response body.
///
/// The body is expected to look like `{ "data": [ ... ] }`. A missing or
/// non-list `data` field yields an empty list. Records that cannot be decoded
/// as a [`Product`] are skipped.
pub fn decode_products(body: &Value) -> Vec<Product> {
    let Some(records) = body.get("data").and_then(Value::as_array) else {
        return Vec::new();
    };

    records
        .iter()
        .filter_map(
            |record| match serde_json::from_value::<Product>(record.clone()) {
                Ok(product) => Some(product),
                Err(error) => {
                    warn!(%error, "skipping undecodable product record");
                    None
                }
            },
        )
        .collect()
}
