//! Filter engine.
//!
//! A record passes when all four predicates hold:
//!
//! 1. the text query is a case-insensitive substring of its name or
//!    description (an empty query matches everything);
//! 2. the category filter is `All`, or equals its category exactly;
//! 3. there is no minimum price, or its price is at least the minimum;
//! 4. there is no maximum price, or its price is at most the maximum.
//!
//! A record whose price cannot be coerced passes (3) and (4) only while
//! both bounds are unset; once any bound is set it is filtered out.

use serde::{Deserialize, Serialize};

use sheetshop_core::Price;

use crate::models::ProductRecord;

/// Category selection.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryFilter {
    /// Every category.
    #[default]
    All,
    /// Exactly this category (case-sensitive).
    Only(String),
}

impl CategoryFilter {
    /// Interpret a category selector value.
    ///
    /// `""`, `"all"`, and `"todas"` (any case) select every category; any
    /// other value selects that category verbatim.
    #[must_use]
    pub fn from_selection(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case("all") || value.eq_ignore_ascii_case("todas") {
            Self::All
        } else {
            Self::Only(value.to_owned())
        }
    }

    fn matches(&self, category: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == category,
        }
    }
}

/// What the shopper currently wants to see.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub text_query: String,
    pub category: CategoryFilter,
    pub min_price: Option<Price>,
    pub max_price: Option<Price>,
}

impl FilterCriteria {
    /// Criteria that match every record.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Build criteria from raw form inputs.
    ///
    /// Price bounds go through [`Price::parse`]; input that does not coerce
    /// leaves the bound unset.
    #[must_use]
    pub fn from_inputs(text: &str, category: &str, min_price: &str, max_price: &str) -> Self {
        Self {
            text_query: text.to_owned(),
            category: CategoryFilter::from_selection(category),
            min_price: Price::parse(min_price).ok(),
            max_price: Price::parse(max_price).ok(),
        }
    }

    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text_query = text.into();
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = CategoryFilter::Only(category.into());
        self
    }

    #[must_use]
    pub const fn with_min_price(mut self, price: Price) -> Self {
        self.min_price = Some(price);
        self
    }

    #[must_use]
    pub const fn with_max_price(mut self, price: Price) -> Self {
        self.max_price = Some(price);
        self
    }

    /// Returns `true` if these criteria match every record.
    #[must_use]
    pub fn is_unfiltered(&self) -> bool {
        self.text_query.is_empty()
            && self.category == CategoryFilter::All
            && self.min_price.is_none()
            && self.max_price.is_none()
    }

    /// Check a single record.
    #[must_use]
    pub fn matches(&self, record: &ProductRecord) -> bool {
        self.matches_text(record) && self.category.matches(&record.category) && self.matches_price(record)
    }

    fn matches_text(&self, record: &ProductRecord) -> bool {
        if self.text_query.is_empty() {
            return true;
        }
        let query = self.text_query.to_lowercase();
        record.name.to_lowercase().contains(&query)
            || record.description.to_lowercase().contains(&query)
    }

    fn matches_price(&self, record: &ProductRecord) -> bool {
        if self.min_price.is_none() && self.max_price.is_none() {
            return true;
        }
        let Some(price) = record.numeric_price() else {
            return false;
        };
        self.min_price.is_none_or(|min| price >= min) && self.max_price.is_none_or(|max| price <= max)
    }
}

/// Narrow `records` to those matching `criteria`, keeping their order.
#[must_use]
pub fn filter_records(records: &[ProductRecord], criteria: &FilterCriteria) -> Vec<ProductRecord> {
    records
        .iter()
        .filter(|record| criteria.matches(record))
        .cloned()
        .collect()
}
