//! Product records parsed from the feed.

use serde::{Deserialize, Serialize};

use sheetshop_core::{CoercionError, Price, ProductId, Visibility};

/// One published product row.
///
/// Price and stock are kept exactly as the sheet spells them; the numeric
/// accessors apply the coercion policy from [`sheetshop_core::Price`] at the
/// point of use and report failures as `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Feed identifier (informational).
    pub id: ProductId,
    /// Display name. Cart lines are keyed by this.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// Category used for grouping and filtering (case-sensitive).
    pub category: String,
    /// Raw price cell, e.g. `"1.50"` or `"$2"`.
    pub price: String,
    /// Raw stock cell.
    pub stock: String,
    /// Image URL or path as given by the feed.
    pub image_ref: String,
    /// Publication flag.
    pub visibility: Visibility,
}

impl ProductRecord {
    /// Returns `true` if the row is published.
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visibility.is_visible()
    }

    /// Coerce the price cell.
    ///
    /// # Errors
    ///
    /// Returns the [`CoercionError`] from [`Price::parse`].
    pub fn price_checked(&self) -> Result<Price, CoercionError> {
        Price::parse(&self.price)
    }

    /// The coerced price, or `None` when the cell is not a usable amount.
    #[must_use]
    pub fn numeric_price(&self) -> Option<Price> {
        self.price_checked().ok()
    }

    /// The coerced stock count, or `None` when the cell is not a whole,
    /// non-negative number.
    #[must_use]
    pub fn numeric_stock(&self) -> Option<u32> {
        self.stock.trim().parse().ok()
    }

    /// Price as shown on a product card: formatted when numeric, raw
    /// otherwise so a typo in the sheet is still visible to the shop owner.
    #[must_use]
    pub fn display_price(&self) -> String {
        self.numeric_price()
            .map_or_else(|| self.price.clone(), |price| price.to_string())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod tests {
    use super::*;

    /// Build a visible record for tests.
    pub(crate) fn record(id: &str, name: &str, category: &str, price: &str) -> ProductRecord {
        ProductRecord {
            id: ProductId::new(id),
            name: name.to_string(),
            description: format!("{name} description"),
            category: category.to_string(),
            price: price.to_string(),
            stock: "10".to_string(),
            image_ref: format!("img/{id}.jpg"),
            visibility: Visibility::Visible,
        }
    }

    #[test]
    fn test_numeric_price() {
        assert_eq!(
            record("1", "Apple", "Fruit", "$1.50").numeric_price(),
            Some(Price::from_cents(150))
        );
        assert_eq!(record("1", "Apple", "Fruit", "n/a").numeric_price(), None);
        assert_eq!(record("1", "Apple", "Fruit", "").numeric_price(), None);
        assert_eq!(
            record("1", "Apple", "Fruit", "1.50 USD").numeric_price(),
            Some(Price::from_cents(150))
        );
        assert_eq!(
            record("1", "Apple", "Fruit", "50000000000000000000000000000").numeric_price(),
            None
        );
    }

    #[test]
    fn test_numeric_stock() {
        let mut apple = record("1", "Apple", "Fruit", "1.50");
        assert_eq!(apple.numeric_stock(), Some(10));

        apple.stock = "-3".to_string();
        assert_eq!(apple.numeric_stock(), None);

        apple.stock = "many".to_string();
        assert_eq!(apple.numeric_stock(), None);
    }

    #[test]
    fn test_display_price() {
        assert_eq!(record("1", "Apple", "Fruit", "1.5").display_price(), "$1.50");
        assert_eq!(record("1", "Apple", "Fruit", "ask").display_price(), "ask");
    }

    #[test]
    fn test_serializes_for_view_consumers() {
        let json = serde_json::to_value(record("1", "Apple", "Fruit", "1.50")).unwrap();
        assert_eq!(json["name"], "Apple");
        assert_eq!(json["visibility"], "visible");
        assert_eq!(json["id"], "1");
    }
}
