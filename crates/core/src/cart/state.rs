//! Cart line items and their transitions.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::Price;

/// Errors decoding a stored cart.
#[derive(Debug, Error)]
pub enum CartError {
    #[error("cart is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("cart contains {0} more than once")]
    DuplicateLine(String),
    #[error("cart line {0} has zero quantity")]
    ZeroQuantity(String),
    #[error("cart line {0} has a negative price")]
    NegativePrice(String),
}

/// One dish in the cart.
///
/// `name` is the line's identity. `price` is the price recorded when the dish
/// was first added and is never refreshed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub name: String,
    pub price: Price,
    pub quantity: u32,
}

impl LineItem {
    /// `price × quantity`.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.times(self.quantity)
    }
}

/// The ordered set of line items.
///
/// Invariants: at most one line per name, and every line has a quantity of
/// at least 1. Insertion order is display order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CartState {
    items: Vec<LineItem>,
}

impl CartState {
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Add one unit of `name`.
    ///
    /// An existing line keeps its original price; a new line is appended
    /// with quantity 1 at `price`.
    pub fn add_item(&mut self, name: &str, price: Price) {
        match self.line_mut(name) {
            Some(line) => line.quantity = line.quantity.saturating_add(1),
            None => self.items.push(LineItem {
                name: name.to_owned(),
                price,
                quantity: 1,
            }),
        }
    }

    /// Drop the line for `name`, if present.
    pub fn remove_item(&mut self, name: &str) {
        self.items.retain(|line| line.name != name);
    }

    /// Set the quantity of `name` exactly.
    ///
    /// A quantity of zero or below removes the line. A positive quantity for
    /// a name not in the cart changes nothing.
    pub fn update_quantity(&mut self, name: &str, new_quantity: i64) {
        if new_quantity <= 0 {
            self.remove_item(name);
            return;
        }
        if let Some(line) = self.line_mut(name) {
            line.quantity = u32::try_from(new_quantity).unwrap_or(u32::MAX);
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of `price × quantity` over all lines; zero when empty.
    #[must_use]
    pub fn calculate_total(&self) -> Price {
        self.items.iter().map(LineItem::line_total).sum()
    }

    /// Sum of all quantities, for the header badge.
    #[must_use]
    pub fn total_quantity(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |total, line| total.saturating_add(line.quantity))
    }

    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&LineItem> {
        self.items.iter().find(|line| line.name == name)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Serialize to the storage layout: a JSON array of
    /// `{name, price, quantity}` objects.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Decode a stored cart, enforcing the line invariants.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if the JSON does not parse, or if a name
    /// repeats, a quantity is zero, or a price is negative.
    pub fn from_json(raw: &str) -> Result<Self, CartError> {
        let items: Vec<LineItem> = serde_json::from_str(raw)?;
        Self::from_items(items)
    }

    /// Build a cart from already-decoded lines, enforcing the invariants.
    ///
    /// # Errors
    ///
    /// See [`CartState::from_json`].
    pub fn from_items(items: Vec<LineItem>) -> Result<Self, CartError> {
        let mut seen = HashSet::new();
        for line in &items {
            if !seen.insert(line.name.as_str()) {
                return Err(CartError::DuplicateLine(line.name.clone()));
            }
            if line.quantity == 0 {
                return Err(CartError::ZeroQuantity(line.name.clone()));
            }
            if line.price.is_negative() {
                return Err(CartError::NegativePrice(line.name.clone()));
            }
        }
        Ok(Self { items })
    }

    fn line_mut(&mut self, name: &str) -> Option<&mut LineItem> {
        self.items.iter_mut().find(|line| line.name == name)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn dollars(amount: i64) -> Price {
        Price::new(Decimal::from(amount))
    }

    #[test]
    fn test_add_same_name_twice_increments_and_keeps_first_price() {
        let mut cart = CartState::new();
        cart.add_item("Mafe", Price::from_cents(1799));
        cart.add_item("Mafe", Price::from_cents(2500));

        assert_eq!(cart.len(), 1);
        let line = cart.get("Mafe").unwrap();
        assert_eq!(line.quantity, 2);
        assert_eq!(line.price, Price::from_cents(1799));
    }

    #[test]
    fn test_add_preserves_insertion_order() {
        let mut cart = CartState::new();
        cart.add_item("Bissap", Price::from_cents(499));
        cart.add_item("Accara", Price::from_cents(899));
        cart.add_item("Bissap", Price::from_cents(499));

        let names: Vec<_> = cart.items().iter().map(|line| line.name.as_str()).collect();
        assert_eq!(names, ["Bissap", "Accara"]);
    }

    #[test]
    fn test_remove_item() {
        let mut cart = CartState::new();
        cart.add_item("Fataya", Price::from_cents(799));
        cart.remove_item("Fataya");
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_missing_item_is_noop() {
        let mut cart = CartState::new();
        cart.add_item("Fataya", Price::from_cents(799));
        cart.remove_item("Thiakry");
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_update_quantity_sets_exactly() {
        let mut cart = CartState::new();
        cart.add_item("Mafe", Price::from_cents(1799));
        cart.add_item("Mafe", Price::from_cents(1799));
        cart.update_quantity("Mafe", 5);
        assert_eq!(cart.get("Mafe").unwrap().quantity, 5);
    }

    #[test]
    fn test_update_quantity_zero_removes() {
        let mut cart = CartState::new();
        cart.add_item("Mafe", Price::from_cents(1799));
        cart.update_quantity("Mafe", 0);
        assert!(cart.get("Mafe").is_none());
    }

    #[test]
    fn test_update_quantity_negative_removes() {
        let mut cart = CartState::new();
        cart.add_item("Mafe", Price::from_cents(1799));
        cart.update_quantity("Mafe", -1);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_quantity_missing_name_is_noop() {
        let mut cart = CartState::new();
        cart.update_quantity("Mafe", 3);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_totals() {
        let cart = CartState::from_items(vec![
            LineItem {
                name: "A".to_string(),
                price: dollars(10),
                quantity: 2,
            },
            LineItem {
                name: "B".to_string(),
                price: dollars(5),
                quantity: 1,
            },
        ])
        .unwrap();

        assert_eq!(cart.calculate_total(), dollars(25));
        assert_eq!(cart.total_quantity(), 3);
    }

    #[test]
    fn test_clear_resets_totals() {
        let mut cart = CartState::new();
        cart.add_item("Bissap", Price::from_cents(499));
        cart.add_item("Mafe", Price::from_cents(1799));
        cart.clear();

        assert_eq!(cart.calculate_total(), Price::ZERO);
        assert_eq!(cart.total_quantity(), 0);
    }

    #[test]
    fn test_empty_cart_total_is_zero() {
        assert_eq!(CartState::new().calculate_total(), Price::ZERO);
    }

    #[test]
    fn test_json_round_trip_preserves_order() {
        let mut cart = CartState::new();
        cart.add_item("Thiakry", Price::from_cents(699));
        cart.add_item("Accara", Price::from_cents(899));
        cart.update_quantity("Accara", 3);

        let json = cart.to_json().unwrap();
        let restored = CartState::from_json(&json).unwrap();
        assert_eq!(restored, cart);
    }

    #[test]
    fn test_storage_layout() {
        let mut cart = CartState::new();
        cart.add_item("Bissap", Price::from_cents(499));
        assert_eq!(
            cart.to_json().unwrap(),
            r#"[{"name":"Bissap","price":"4.99","quantity":1}]"#
        );
    }

    #[test]
    fn test_from_json_accepts_numeric_prices() {
        let cart =
            CartState::from_json(r#"[{"name":"Bissap","price":4.99,"quantity":2}]"#).unwrap();
        assert_eq!(cart.get("Bissap").unwrap().price, Price::from_cents(499));
        assert_eq!(cart.total_quantity(), 2);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(matches!(
            CartState::from_json("not json"),
            Err(CartError::Malformed(_))
        ));
        assert!(matches!(
            CartState::from_json(r#"{"name":"Bissap"}"#),
            Err(CartError::Malformed(_))
        ));
    }

    #[test]
    fn test_from_json_rejects_duplicate_names() {
        let raw = r#"[{"name":"Mafe","price":"1","quantity":1},{"name":"Mafe","price":"1","quantity":1}]"#;
        assert!(matches!(
            CartState::from_json(raw),
            Err(CartError::DuplicateLine(name)) if name == "Mafe"
        ));
    }

    #[test]
    fn test_from_json_rejects_zero_quantity() {
        let raw = r#"[{"name":"Mafe","price":"1","quantity":0}]"#;
        assert!(matches!(
            CartState::from_json(raw),
            Err(CartError::ZeroQuantity(_))
        ));
    }

    #[test]
    fn test_from_json_rejects_negative_quantity_and_price() {
        assert!(matches!(
            CartState::from_json(r#"[{"name":"Mafe","price":"1","quantity":-2}]"#),
            Err(CartError::Malformed(_))
        ));
        assert!(matches!(
            CartState::from_json(r#"[{"name":"Mafe","price":"-1","quantity":1}]"#),
            Err(CartError::NegativePrice(_))
        ));
    }
}
