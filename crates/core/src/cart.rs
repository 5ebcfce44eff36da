//! The cart ledger: an ordered list of product lines.
//!
//! Rules, all of them synchronous over the in-memory list:
//! - at most one line per product id; adding an existing product merges
//! - quantities never fall below 1; removal happens only via `remove_line`
//! - totals are derived from the live lines on every call, never cached
//! - prices are the snapshot captured at add time
//!
//! The ledger has no failure modes. The problem-profile "add silently does
//! nothing" behavior is injected by the caller before the ledger is touched;
//! nothing in here flips coins.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{Product, ProductId};

/// One product-plus-quantity record in the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Snapshot of the product at add time. Backend price edits after the
    /// add do not reach lines already in the cart.
    pub product: Product,
    /// Always >= 1.
    pub quantity: u32,
}

impl CartLine {
    /// `unit price * quantity` for this line.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.product.price * Decimal::from(self.quantity)
    }
}

/// The in-memory cart, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLedger {
    lines: Vec<CartLine>,
}

impl CartLedger {
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// The live lines, in the order products were first added.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Add `count` units of a product.
    ///
    /// Merges into the existing line for the same product id if present,
    /// otherwise appends a new line. A count of 0 is coerced to 1 so a line
    /// never exists with quantity 0. Stock is deliberately not consulted
    /// here - capping the count is the job of the screen that chose it.
    pub fn add_line(&mut self, product: Product, count: u32) {
        let count = count.max(1);
        if let Some(line) = self.lines.iter_mut().find(|line| line.product.id == product.id) {
            line.quantity = line.quantity.saturating_add(count);
        } else {
            self.lines.push(CartLine {
                product,
                quantity: count,
            });
        }
    }

    /// Remove the line for a product. No-op when absent; calling it twice
    /// leaves the same state as calling it once.
    pub fn remove_line(&mut self, product_id: ProductId) {
        self.lines.retain(|line| line.product.id != product_id);
    }

    /// Set a line's quantity, clamped to a minimum of 1.
    ///
    /// A request for 0 becomes 1 - this call never deletes the line. Unknown
    /// product ids are ignored.
    pub fn set_quantity(&mut self, product_id: ProductId, quantity: u32) {
        if let Some(line) = self.lines.iter_mut().find(|line| line.product.id == product_id) {
            line.quantity = quantity.max(1);
        }
    }

    /// Empty the ledger unconditionally.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sum of quantities across all lines, derived on every call.
    #[must_use]
    pub fn total_item_count(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    /// Sum of `snapshot price * quantity` across all lines.
    #[must_use]
    pub fn total_price(&self) -> Decimal {
        self.lines.iter().map(CartLine::line_total).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: i64, price_cents: i64) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            description: String::new(),
            price: Decimal::new(price_cents, 2),
            image: String::new(),
            stock: 10,
        }
    }

    #[test]
    fn test_merge_law() {
        let mut cart = CartLedger::new();
        cart.add_line(product(1, 999), 1);
        cart.add_line(product(1, 999), 1);
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 2);
    }

    #[test]
    fn test_add_zero_count_coerced_to_one() {
        let mut cart = CartLedger::new();
        cart.add_line(product(1, 999), 0);
        assert_eq!(cart.lines()[0].quantity, 1);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut cart = CartLedger::new();
        cart.add_line(product(1, 999), 2);
        cart.add_line(product(2, 500), 1);
        cart.remove_line(ProductId::new(1));
        let after_once = cart.clone();
        cart.remove_line(ProductId::new(1));
        assert_eq!(cart, after_once);
        assert_eq!(cart.lines().len(), 1);
    }

    #[test]
    fn test_clamp_law() {
        let mut cart = CartLedger::new();
        cart.add_line(product(1, 999), 3);
        cart.set_quantity(ProductId::new(1), 0);
        assert_eq!(cart.lines()[0].quantity, 1);
        cart.set_quantity(ProductId::new(1), 5);
        assert_eq!(cart.lines()[0].quantity, 5);
        // u32 has no -5, but the clamp also covers the smallest legal input
        cart.set_quantity(ProductId::new(1), u32::MIN);
        assert_eq!(cart.lines()[0].quantity, 1);
    }

    #[test]
    fn test_set_quantity_never_deletes() {
        let mut cart = CartLedger::new();
        cart.add_line(product(1, 999), 2);
        cart.set_quantity(ProductId::new(1), 0);
        assert_eq!(cart.lines().len(), 1);
        cart.set_quantity(ProductId::new(99), 0);
        assert_eq!(cart.lines().len(), 1);
    }

    #[test]
    fn test_totals_match_independent_recompute() {
        let mut cart = CartLedger::new();
        cart.add_line(product(1, 999), 3);
        cart.add_line(product(2, 1250), 1);
        cart.add_line(product(1, 999), 2);
        cart.remove_line(ProductId::new(2));
        cart.add_line(product(3, 100), 4);
        cart.set_quantity(ProductId::new(3), 2);

        let expected_count: u32 = cart.lines().iter().map(|line| line.quantity).sum();
        let expected_price: Decimal = cart
            .lines()
            .iter()
            .map(|line| line.product.price * Decimal::from(line.quantity))
            .sum();
        assert_eq!(cart.total_item_count(), expected_count);
        assert_eq!(cart.total_price(), expected_price);
    }

    #[test]
    fn test_price_nine_ninety_nine_times_three() {
        let mut cart = CartLedger::new();
        cart.add_line(product(1, 999), 3);
        assert_eq!(cart.total_price(), Decimal::new(2997, 2));
    }

    #[test]
    fn test_snapshot_price_survives_backend_edit() {
        let mut cart = CartLedger::new();
        cart.add_line(product(1, 999), 1);
        // The backend later repriced the product; merging more units still
        // uses the id, and the existing snapshot keeps its price.
        cart.add_line(product(1, 1999), 1);
        assert_eq!(cart.lines()[0].quantity, 2);
        assert_eq!(cart.total_price(), Decimal::new(1998, 2));
    }

    #[test]
    fn test_clear_empties_everything() {
        let mut cart = CartLedger::new();
        cart.add_line(product(1, 999), 3);
        cart.add_line(product(2, 500), 1);
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total_item_count(), 0);
        assert_eq!(cart.total_price(), Decimal::ZERO);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut cart = CartLedger::new();
        cart.add_line(product(3, 100), 1);
        cart.add_line(product(1, 100), 1);
        cart.add_line(product(2, 100), 1);
        cart.add_line(product(1, 100), 1);
        let order: Vec<i64> = cart.lines().iter().map(|line| line.product.id.as_i64()).collect();
        assert_eq!(order, vec![3, 1, 2]);
    }
}
