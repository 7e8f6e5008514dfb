//! Shopping Cart State Management
//!
//! [`CartStore`] owns the ordered cart lines of one session and the drawer
//! visibility flag. Every mutation goes through one of its named operations.

use super::models::CartLine;
use crate::{
    catalog::models::Product,
    money::{line_amount, round_currency, sum_amounts},
};
use rust_decimal::Decimal;

/// Cart lines in insertion order plus the drawer visibility flag
#[derive(Debug, Clone, Default)]
pub struct CartStore {
    lines: Vec<CartLine>,
    visible: bool,
}

impl CartStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Adds one unit of `product`.
    ///
    /// An existing line for the same id is incremented in place, otherwise a
    /// new line with quantity 1 is appended. Returns the line's new quantity.
    pub fn add(&mut self, product: Product) -> u32 {
        if let Some(line) = self.line_mut(product.id) {
            line.quantity = line.quantity.saturating_add(1);
            return line.quantity;
        }

        self.lines.push(CartLine {
            product,
            quantity: 1,
        });
        1
    }

    /// Removes the line for `id`. Returns whether a line was removed.
    pub fn remove(&mut self, id: u64) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| line.product.id != id);
        self.lines.len() != before
    }

    /// Sets the quantity of the line for `id` to exactly `quantity`.
    ///
    /// Quantities below 1 are ignored and leave the line unchanged, quantities
    /// above `u32::MAX` are clamped. Returns whether the line was updated.
    pub fn set_quantity(&mut self, id: u64, quantity: i64) -> bool {
        if quantity < 1 {
            return false;
        }
        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);

        match self.line_mut(id) {
            Some(line) => {
                line.quantity = quantity;
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// `(product id, quantity)` for every line, in cart order.
    pub fn quantities(&self) -> Vec<(u64, u32)> {
        self.lines
            .iter()
            .map(|line| (line.product.id, line.quantity))
            .collect()
    }

    /// Takes previously captured [`CartStore::quantities`] out of the cart.
    ///
    /// Lines are reduced by the taken quantity and dropped once nothing is
    /// left. Units added after the capture stay in the cart.
    pub fn take_quantities(&mut self, taken: &[(u64, u32)]) {
        for &(id, quantity) in taken {
            if let Some(line) = self.line_mut(id) {
                line.quantity = line.quantity.saturating_sub(quantity);
            }
        }
        self.lines.retain(|line| line.quantity > 0);
    }

    /// Flips the visibility flag and returns the new value.
    pub fn toggle_visible(&mut self) -> bool {
        self.visible = !self.visible;
        self.visible
    }

    pub fn open(&mut self) {
        self.visible = true;
    }

    pub fn close(&mut self) {
        self.visible = false;
    }

    /// Sum of all line quantities.
    pub fn total_items(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Sum of price × quantity over all lines, unpriced lines count as zero.
    ///
    /// Saturates at [`Decimal::MAX`].
    pub fn subtotal(&self) -> Decimal {
        sum_amounts(
            self.lines
                .iter()
                .map(|line| line_amount(line.product.price_or_zero(), line.quantity)),
        )
    }

    /// [`CartStore::subtotal`] rounded to cents.
    pub fn display_subtotal(&self) -> Decimal {
        round_currency(self.subtotal())
    }

    fn line_mut(&mut self, id: u64) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|line| line.product.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shirt() -> Product {
        Product::new(3, "Organic Cotton T-Shirt").with_price(Decimal::new(2999, 2))
    }

    fn jacket() -> Product {
        Product::new(1, "Premium Leather Jacket").with_price(Decimal::new(29999, 2))
    }

    #[test]
    fn test_repeated_add_aggregates_into_one_line() {
        let mut cart = CartStore::new();

        for expected in 1..=5 {
            assert_eq!(cart.add(shirt()), expected);
        }

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 5);
    }

    #[test]
    fn test_add_preserves_insertion_order() {
        let mut cart = CartStore::new();

        cart.add(shirt());
        cart.add(jacket());
        cart.add(shirt());

        let ids: Vec<u64> = cart.lines().iter().map(|l| l.product.id).collect();
        assert_eq!(ids, vec![3, 1]);
    }

    #[test]
    fn test_totals() {
        let mut cart = CartStore::new();

        cart.add(shirt());
        cart.add(shirt());
        cart.add(jacket());

        assert_eq!(cart.total_items(), 3);
        assert_eq!(cart.subtotal(), Decimal::new(35997, 2));
        assert_eq!(cart.display_subtotal(), Decimal::new(35997, 2));
    }

    #[test]
    fn test_subtotal_independent_of_order() {
        let mut forward = CartStore::new();
        forward.add(jacket());
        forward.add(shirt());
        forward.add(shirt());

        let mut backward = CartStore::new();
        backward.add(shirt());
        backward.add(shirt());
        backward.add(jacket());

        assert_eq!(forward.subtotal(), backward.subtotal());
    }

    #[test]
    fn test_unpriced_lines_count_as_zero() {
        let mut cart = CartStore::new();

        cart.add(Product::new(9, "Gift Wrap"));
        cart.add(shirt());

        assert_eq!(cart.total_items(), 2);
        assert_eq!(cart.subtotal(), Decimal::new(2999, 2));
        assert_eq!(cart.lines()[0].line_total(), None);
    }

    #[test]
    fn test_huge_prices_saturate() {
        let mut cart = CartStore::new();
        let huge = Product::new(1, "Huge").with_price(Decimal::MAX);

        cart.add(huge.clone());
        cart.add(huge);
        cart.add(shirt());

        assert_eq!(cart.lines()[0].line_total(), Some(Decimal::MAX));
        assert_eq!(cart.subtotal(), Decimal::MAX);
        assert_eq!(cart.display_subtotal(), Decimal::MAX);
        assert_eq!(cart.total_items(), 3);
    }

    #[test]
    fn test_set_quantity_replaces_value() {
        let mut cart = CartStore::new();
        cart.add(shirt());
        cart.add(shirt());

        assert!(cart.set_quantity(3, 7));
        assert_eq!(cart.lines()[0].quantity, 7);
        assert_eq!(cart.lines()[0].line_total(), Some(Decimal::new(20993, 2)));
    }

    #[test]
    fn test_set_quantity_below_one_is_ignored() {
        let mut cart = CartStore::new();
        cart.add(shirt());
        cart.set_quantity(3, 4);

        for quantity in [0, -1, i64::MIN] {
            assert!(!cart.set_quantity(3, quantity));
            assert_eq!(cart.lines()[0].quantity, 4);
        }
    }

    #[test]
    fn test_set_quantity_clamps_large_values() {
        let mut cart = CartStore::new();
        cart.add(shirt());

        assert!(cart.set_quantity(3, i64::from(u32::MAX) + 1));
        assert_eq!(cart.lines()[0].quantity, u32::MAX);

        assert!(cart.set_quantity(3, i64::MAX));
        assert_eq!(cart.lines()[0].quantity, u32::MAX);
        assert_eq!(cart.total_items(), u64::from(u32::MAX));
    }

    #[test]
    fn test_set_quantity_unknown_id() {
        let mut cart = CartStore::new();
        cart.add(shirt());

        assert!(!cart.set_quantity(42, 2));
        assert_eq!(cart.lines().len(), 1);
    }

    #[test]
    fn test_remove_and_clear() {
        let mut cart = CartStore::new();
        cart.add(shirt());
        cart.add(jacket());

        assert!(cart.remove(3));
        assert!(!cart.remove(3), "removing twice is a no-op");
        assert_eq!(cart.lines().len(), 1);

        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.subtotal(), Decimal::ZERO);
    }

    #[test]
    fn test_take_quantities_keeps_later_additions() {
        let mut cart = CartStore::new();
        cart.add(shirt());
        cart.add(jacket());
        let taken = cart.quantities();
        assert_eq!(taken, vec![(3, 1), (1, 1)]);

        cart.add(shirt());
        cart.add(Product::new(8, "Natural Soy Candle"));
        cart.take_quantities(&taken);

        let left: Vec<(u64, u32)> = cart.quantities();
        assert_eq!(left, vec![(3, 1), (8, 1)]);
    }

    #[test]
    fn test_take_quantities_after_lowering() {
        let mut cart = CartStore::new();
        cart.add(shirt());
        cart.set_quantity(3, 5);
        let taken = cart.quantities();

        cart.set_quantity(3, 2);
        cart.take_quantities(&taken);

        assert!(cart.is_empty());
    }

    #[test]
    fn test_visibility_does_not_touch_lines() {
        let mut cart = CartStore::new();
        cart.add(shirt());

        assert!(cart.toggle_visible());
        assert!(!cart.toggle_visible());
        cart.open();
        assert!(cart.is_visible());
        cart.close();
        assert!(!cart.is_visible());

        assert_eq!(cart.total_items(), 1);
    }
}
