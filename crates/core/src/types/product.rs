//! Product catalog records.
//!
//! Products are owned by the hosted backend; everything in this crate works
//! on read-through snapshots of its rows.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ProductId;

/// A product row as served by the hosted backend.
///
/// The cart stores these by value: a line keeps the price that was current
/// when the product was added, and later catalog edits do not reach into the
/// cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    /// Unit price in the shop currency. Decimal, not float - cart totals
    /// must come out exact.
    pub price: Decimal,
    /// Image URL. May be substituted wholesale for the visual profile.
    pub image: String,
    /// Stock ceiling. The ledger does not enforce this; the screen choosing
    /// how many to add does.
    pub stock: u32,
}

impl Product {
    /// True when there is at least one unit available to add.
    #[must_use]
    pub const fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Product {
        Product {
            id: ProductId::new(1),
            name: "Canvas Tote".to_string(),
            description: "Sturdy everyday tote".to_string(),
            price: Decimal::new(1250, 2),
            image: "https://cdn.example.com/tote.jpg".to_string(),
            stock: 3,
        }
    }

    #[test]
    fn test_in_stock() {
        let mut product = sample();
        assert!(product.in_stock());
        product.stock = 0;
        assert!(!product.in_stock());
    }

    #[test]
    fn test_serde_roundtrip() {
        let product = sample();
        let json = serde_json::to_string(&product).expect("serialize");
        let back: Product = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, product);
    }
}
