//! Checkout Domain Models

use crate::{
    cart::{models::CartLine, store::CartStore},
    money::{deserialize_optional_amount, round_currency},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::flow::CheckoutPhase;

/// Delivery service handling the order
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Courier {
    #[default]
    Steadfast,
    Pathao,
    Redx,
}

/// Checkout form as submitted by the customer
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutForm {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub phone: String,

    #[serde(default)]
    pub address: String,

    #[serde(default)]
    pub courier: Courier,

    /// Overrides the computed cash-on-delivery amount
    #[serde(default, deserialize_with = "deserialize_optional_amount")]
    pub cod_amount: Option<Decimal>,

    /// Falls back to the configured default charge
    #[serde(default, deserialize_with = "deserialize_optional_amount")]
    pub delivery_charge: Option<Decimal>,

    #[serde(default, deserialize_with = "deserialize_optional_amount")]
    pub advance: Option<Decimal>,

    #[serde(default, deserialize_with = "deserialize_optional_amount")]
    pub discount_amount: Option<Decimal>,
}

impl CheckoutForm {
    /// Whether name, phone and address are all filled in.
    pub fn has_required_fields(&self) -> bool {
        [&self.name, &self.phone, &self.address]
            .iter()
            .all(|field| !field.trim().is_empty())
    }
}

/// Order payload built from the cart and the checkout form.
///
/// Product ids and quantities are comma-joined parallel lists in cart order.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Order {
    pub product_ids: String,

    #[serde(rename = "s_product_qty")]
    pub product_quantities: String,

    #[serde(rename = "c_name")]
    pub name: String,

    #[serde(rename = "c_phone")]
    pub phone: String,

    pub address: String,
    pub courier: Courier,
    pub cod_amount: Decimal,
    pub delivery_charge: Decimal,
    pub advance: Option<Decimal>,
    pub discount_amount: Option<Decimal>,
}

impl Order {
    /// Assembles the order for the current cart contents.
    ///
    /// The cash-on-delivery amount is the form's override when given,
    /// otherwise subtotal plus delivery charge rounded to cents.
    pub fn build(cart: &CartStore, form: &CheckoutForm, default_delivery_charge: Decimal) -> Self {
        let delivery_charge = form.delivery_charge.unwrap_or(default_delivery_charge);
        let cod_amount = form
            .cod_amount
            .unwrap_or_else(|| default_cod_amount(cart, delivery_charge));

        Self {
            product_ids: join_lines(cart, |line| line.product.id.to_string()),
            product_quantities: join_lines(cart, |line| line.quantity.to_string()),
            name: form.name.trim().to_owned(),
            phone: form.phone.trim().to_owned(),
            address: form.address.trim().to_owned(),
            courier: form.courier,
            cod_amount,
            delivery_charge,
            advance: form.advance,
            discount_amount: form.discount_amount,
        }
    }
}

fn join_lines(cart: &CartStore, field: impl Fn(&CartLine) -> String) -> String {
    cart.lines().iter().map(field).collect::<Vec<_>>().join(",")
}

/// Subtotal plus delivery charge, both rounded to cents.
pub fn default_cod_amount(cart: &CartStore, delivery_charge: Decimal) -> Decimal {
    round_currency(
        cart.display_subtotal()
            .saturating_add(round_currency(delivery_charge)),
    )
}

/// Where the client should navigate after a successful order
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NavigationSignal {
    pub path: String,
    /// Delay so the success acknowledgment stays visible first
    pub after_ms: u64,
}

/// Result of a completed checkout
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutReceipt {
    pub order: Order,
    pub redirect: NavigationSignal,
}

/// Checkout state returned by the checkout endpoints
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub cart_id: String,
    pub phase: CheckoutPhase,
    pub confirming: bool,
    pub error: Option<String>,
    /// Amount the order would be collected for with the default delivery charge
    pub default_cod_amount: Decimal,
}
