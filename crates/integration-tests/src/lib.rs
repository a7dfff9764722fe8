//! Integration tests for sheetshop.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p sheetshop-integration-tests
//! ```
//!
//! Feeds are served by a local `wiremock` server, so no real network
//! traffic is made.
//!
//! # Test Categories
//!
//! - `feed_reload` - fetching, timeouts, and last-good catalog retention
//! - `catalog_filtering` - parsing and filter properties over whole feeds
//! - `cart_and_order` - cart arithmetic and order payloads
//! - `end_to_end` - a shopper session from feed to order link
//!
//! This crate holds the fixtures the test files share.

use std::cell::RefCell;

use sheetshop_core::Price;
use sheetshop_storefront::cart::CartLine;
use sheetshop_storefront::catalog::CategoryGroup;
use sheetshop_storefront::config::{ConfigError, StorefrontConfig};
use sheetshop_storefront::feed::FeedError;
use sheetshop_storefront::models::{CustomerDetails, ProductRecord};
use sheetshop_storefront::observer::StorefrontObserver;
use sheetshop_storefront::order::{OrderLink, OrderSink, SinkError};

/// Header row using the sheet's Spanish column names.
pub const FEED_HEADER: &str = "ID,Nombre,Descripcion,Categoria,Precio,Stock,Imagen,Visible";

/// Receiving number used by every test config.
pub const ORDER_PHONE: &str = "593993842259";

/// Join a header and rows into feed text with a trailing newline.
#[must_use]
pub fn feed(rows: &[&str]) -> String {
    let mut text = String::from(FEED_HEADER);
    text.push('\n');
    for row in rows {
        text.push_str(row);
        text.push('\n');
    }
    text
}

/// Config pointing at `feed_url` with the given fetch timeout.
///
/// # Errors
///
/// Returns a [`ConfigError`] if the URL is not http(s).
pub fn config_for(feed_url: &str, timeout_secs: u64) -> Result<StorefrontConfig, ConfigError> {
    let timeout = timeout_secs.to_string();
    StorefrontConfig::from_lookup(|key| match key {
        "SHEETSHOP_FEED_URL" => Some(feed_url.to_string()),
        "SHEETSHOP_FEED_TIMEOUT_SECS" => Some(timeout.clone()),
        "SHEETSHOP_ORDER_PHONE" => Some(ORDER_PHONE.to_string()),
        _ => None,
    })
}

/// A complete, valid order form.
#[must_use]
pub fn customer() -> CustomerDetails {
    CustomerDetails::new("Ana Ruiz", "+593 99 123 4567", "ana@example.com", "Av. Amazonas 100")
}

/// Observer that records every notification.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    pub catalog_updates: Vec<Vec<String>>,
    pub filter_results: Vec<Vec<String>>,
    pub cart_updates: Vec<(usize, Price, u32)>,
    pub reload_failures: Vec<String>,
}

impl StorefrontObserver for RecordingObserver {
    fn on_catalog_updated(&mut self, groups: &[CategoryGroup]) {
        self.catalog_updates
            .push(groups.iter().map(|g| g.category.clone()).collect());
    }

    fn on_filter_result(&mut self, records: &[ProductRecord]) {
        self.filter_results
            .push(records.iter().map(|r| r.name.clone()).collect());
    }

    fn on_cart_updated(&mut self, lines: &[CartLine], total: Price, item_count: u32) {
        self.cart_updates.push((lines.len(), total, item_count));
    }

    fn on_reload_failed(&mut self, error: &FeedError) {
        self.reload_failures.push(error.to_string());
    }
}

/// Sink that keeps every link it receives, or refuses them all.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub links: RefCell<Vec<OrderLink>>,
    pub refuse: bool,
}

impl RecordingSink {
    /// A sink that fails every submission.
    #[must_use]
    pub fn refusing() -> Self {
        Self {
            links: RefCell::default(),
            refuse: true,
        }
    }
}

impl OrderSink for RecordingSink {
    fn submit_order(&self, link: &OrderLink) -> Result<(), SinkError> {
        if self.refuse {
            return Err("messaging channel unavailable".into());
        }
        self.links.borrow_mut().push(link.clone());
        Ok(())
    }
}
