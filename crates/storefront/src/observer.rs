//! Notifications for the presentation layer.
//!
//! A [`ShopSession`](crate::session::ShopSession) calls these after each
//! state change. Every method has a no-op default so a view only implements
//! what it renders.

use sheetshop_core::Price;

use crate::cart::CartLine;
use crate::catalog::CategoryGroup;
use crate::feed::FeedError;
use crate::models::ProductRecord;

/// Receives catalog, filter, and cart updates.
pub trait StorefrontObserver {
    /// The grouped catalog view changed (after a reload or a filter).
    fn on_catalog_updated(&mut self, groups: &[CategoryGroup]) {
        let _ = groups;
    }

    /// The filtered record list changed.
    fn on_filter_result(&mut self, records: &[ProductRecord]) {
        let _ = records;
    }

    /// The cart changed.
    fn on_cart_updated(&mut self, lines: &[CartLine], total: Price, item_count: u32) {
        let _ = (lines, total, item_count);
    }

    /// A reload failed and the previous catalog is still shown.
    fn on_reload_failed(&mut self, error: &FeedError) {
        let _ = error;
    }
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl StorefrontObserver for NoopObserver {}
