//! Catalog store.
//!
//! Holds the published records of the last successful feed load. The store
//! is replaced wholesale; records are never edited in place.

use chrono::{DateTime, Utc};

use super::filter::{FilterCriteria, filter_records};
use crate::feed::{ParsedFeed, RowError};
use crate::models::ProductRecord;

/// The current catalog.
#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    records: Vec<ProductRecord>,
    categories: Vec<String>,
    row_errors: Vec<RowError>,
    loaded_at: Option<DateTime<Utc>>,
}

impl CatalogStore {
    /// Create an empty store (nothing loaded yet).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from a parsed feed, stamped with the current time.
    #[must_use]
    pub fn from_feed(feed: ParsedFeed) -> Self {
        let mut store = Self::new();
        store.replace(feed);
        store
    }

    /// Replace the whole catalog with a freshly parsed feed.
    ///
    /// Unpublished records are dropped here as well, so the store never
    /// holds one even if a caller builds a [`ParsedFeed`] by hand.
    pub fn replace(&mut self, feed: ParsedFeed) {
        let records: Vec<ProductRecord> = feed
            .records
            .into_iter()
            .filter(ProductRecord::is_visible)
            .collect();

        let mut categories: Vec<String> = Vec::new();
        for record in &records {
            if !categories.contains(&record.category) {
                categories.push(record.category.clone());
            }
        }

        self.records = records;
        self.categories = categories;
        self.row_errors = feed.errors;
        self.loaded_at = Some(Utc::now());
    }

    /// Published records in feed order.
    #[must_use]
    pub fn records(&self) -> &[ProductRecord] {
        &self.records
    }

    /// Distinct categories, in first-seen order.
    #[must_use]
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Rows skipped by the last successful parse.
    #[must_use]
    pub fn row_errors(&self) -> &[RowError] {
        &self.row_errors
    }

    /// When the catalog was last replaced, `None` before the first load.
    #[must_use]
    pub const fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.loaded_at
    }

    /// Number of published records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if there are no published records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Look up a record by its display name.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&ProductRecord> {
        self.records.iter().find(|r| r.name == name)
    }

    /// Apply filter criteria to the catalog.
    #[must_use]
    pub fn filter(&self, criteria: &FilterCriteria) -> Vec<ProductRecord> {
        filter_records(&self.records, criteria)
    }
}
