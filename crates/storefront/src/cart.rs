//! Shopping cart.
//!
//! Lines are keyed by product name: adding a product that is already in the
//! cart bumps its quantity instead of appending a second line. The cart is
//! ephemeral and lives for one shopping session.

use serde::Serialize;
use thiserror::Error;

use sheetshop_core::Price;

use crate::models::ProductRecord;

/// Cart mutation errors. A failed mutation leaves the cart unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CartError {
    #[error("no cart line at index {index} (cart has {len} lines)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("product {name:?} has no usable price")]
    UnpricedProduct { name: String },

    #[error("no published product named {name:?}")]
    UnknownProduct { name: String },
}

/// One product in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartLine {
    pub product_name: String,
    pub unit_price: Price,
    pub quantity: u32,
}

impl CartLine {
    /// `unit_price * quantity`, unrounded.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.unit_price.times(self.quantity)
    }
}

/// The shopper's cart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of a product.
    ///
    /// The unit price recorded on the first add is kept; later adds only
    /// increment the quantity.
    pub fn add_item(&mut self, product_name: &str, unit_price: Price) {
        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.product_name == product_name)
        {
            line.quantity = line.quantity.saturating_add(1);
            return;
        }

        self.lines.push(CartLine {
            product_name: product_name.to_owned(),
            unit_price,
            quantity: 1,
        });
    }

    /// Add one unit of a catalog record.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::UnpricedProduct`] if the record's price cell
    /// does not coerce to an amount.
    pub fn add_record(&mut self, record: &ProductRecord) -> Result<(), CartError> {
        let price = record
            .numeric_price()
            .ok_or_else(|| CartError::UnpricedProduct {
                name: record.name.clone(),
            })?;
        self.add_item(&record.name, price);
        Ok(())
    }

    /// Remove a whole line (not one unit).
    ///
    /// # Errors
    ///
    /// Returns [`CartError::IndexOutOfRange`] if there is no line at `index`.
    pub fn remove_line(&mut self, index: usize) -> Result<CartLine, CartError> {
        if index >= self.lines.len() {
            return Err(CartError::IndexOutOfRange {
                index,
                len: self.lines.len(),
            });
        }
        Ok(self.lines.remove(index))
    }

    /// Exact sum of all line subtotals.
    #[must_use]
    pub fn total(&self) -> Price {
        self.lines.iter().map(CartLine::subtotal).sum()
    }

    /// Sum of quantities, for the badge count.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0u32, |acc, line| acc.saturating_add(line.quantity))
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Presentation view with amounts formatted to two decimals.
    #[must_use]
    pub fn summary(&self) -> CartSummary {
        CartSummary {
            lines: self
                .lines
                .iter()
                .enumerate()
                .map(|(index, line)| CartLineSummary {
                    index,
                    product_name: line.product_name.clone(),
                    quantity: line.quantity,
                    unit_price: line.unit_price.to_string(),
                    subtotal: line.subtotal().to_string(),
                })
                .collect(),
            total: self.total().to_string(),
            item_count: self.item_count(),
        }
    }
}

/// Cart line formatted for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartLineSummary {
    /// Position to pass back to [`Cart::remove_line`].
    pub index: usize,
    pub product_name: String,
    pub quantity: u32,
    pub unit_price: String,
    pub subtotal: String,
}

/// Cart formatted for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartSummary {
    pub lines: Vec<CartLineSummary>,
    pub total: String,
    pub item_count: u32,
}
