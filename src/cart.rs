//! Cart
//!
//! An ordered list of lines plus the open/closed flag of the cart panel. Every add creates
//! a new line, even for a product already in the cart, and totals are always derived from
//! `unit_price × quantity` rather than from any stored figure.

use jiff::Timestamp;
use rusty_money::{Money, iso::Currency};
use serde::{Deserialize, Serialize};

use crate::pricing::{to_money, total_price};

mod lines;

pub use lines::{CartLine, LineId, LineKind, NewLine};

/// Cart
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
    is_open: bool,
}

impl Cart {
    /// Create an empty, closed cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a line and return its id.
    ///
    /// The id is derived from the product, variant and `at`; if that id is already taken a
    /// numeric suffix keeps it unique.
    pub fn add_item(&mut self, line: NewLine, at: Timestamp) -> LineId {
        let base = LineId::generate(&line.product_id, line.variant_id.as_deref(), at);
        let id = self.unique_id(base);

        self.lines.push(CartLine::new(id.clone(), line));

        id
    }

    /// Remove a line, returning it if it existed.
    pub fn remove_item(&mut self, id: &LineId) -> Option<CartLine> {
        let position = self.lines.iter().position(|line| &line.id == id)?;

        Some(self.lines.remove(position))
    }

    /// Set a line's quantity, clamped to at least 1.
    pub fn update_quantity(&mut self, id: &LineId, quantity: i64) -> Option<&CartLine> {
        let line = self.lines.iter_mut().find(|line| &line.id == id)?;

        line.set_quantity(quantity);

        Some(&*line)
    }

    /// Increment or decrement a line's quantity; it never drops below 1.
    pub fn adjust_quantity(&mut self, id: &LineId, delta: i64) -> Option<&CartLine> {
        let current = self.get(id)?.quantity;

        self.update_quantity(id, i64::from(current).saturating_add(delta))
    }

    /// Remove every line.
    pub fn clear_cart(&mut self) {
        self.lines.clear();
    }

    /// Flip the panel visibility, returning the new state.
    pub fn toggle_cart(&mut self) -> bool {
        self.is_open = !self.is_open;
        self.is_open
    }

    /// Show the cart panel.
    pub fn open(&mut self) {
        self.is_open = true;
    }

    /// Hide the cart panel.
    pub fn close(&mut self) {
        self.is_open = false;
    }

    /// Whether the cart panel is visible.
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// Sum of `unit_price × quantity` over all lines, in CLP.
    pub fn total(&self) -> u64 {
        total_price(&self.lines)
    }

    /// Cart total as money.
    pub fn total_money(&self) -> Money<'static, Currency> {
        to_money(self.total())
    }

    /// Total number of units across lines.
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Find a line by id.
    pub fn get(&self, id: &LineId) -> Option<&CartLine> {
        self.lines.iter().find(|line| &line.id == id)
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn unique_id(&self, base: LineId) -> LineId {
        if self.get(&base).is_none() {
            return base;
        }

        // One of the first `len + 1` suffixes is always free.
        (2..=self.lines.len() + 2)
            .map(|n| LineId::from(format!("{base}-{n}")))
            .find(|candidate| self.get(candidate).is_none())
            .unwrap_or(base)
    }
}
