//! Product feed ingestion.
//!
//! # Architecture
//!
//! - [`parser`] turns raw comma-separated text into [`ProductRecord`]s. It
//!   is pure and never fails on individual rows: malformed rows are skipped
//!   and reported as [`RowError`]s.
//! - [`client`] fetches the feed over HTTP with a bounded timeout.
//!
//! The feed is a published spreadsheet export. The first line is the header
//! and names the columns; quoting is not supported, so a literal comma
//! inside a cell splits it.
//!
//! # Example
//!
//! ```rust
//! use sheetshop_storefront::feed::parse_feed;
//!
//! let raw = "ID,Nombre,Descripcion,Categoria,Precio,Stock,Imagen,Visible\n\
//!            1,Apple,Crisp,Fruit,$1.50,4,apple.jpg,TRUE\n\
//!            2,Pear,Soft,Fruit,$2,0,pear.jpg,FALSE\n";
//!
//! let feed = parse_feed(raw).unwrap();
//! assert_eq!(feed.records.len(), 1);
//! assert_eq!(feed.records[0].name, "Apple");
//! ```
//!
//! [`ProductRecord`]: crate::models::ProductRecord

pub mod client;
pub mod parser;

pub use client::FeedClient;
pub use parser::{Column, ParsedFeed, RowError, RowErrorReason, parse_feed};

use std::time::Duration;

use thiserror::Error;

/// Errors that prevent a whole feed from loading.
///
/// None of these are fatal: the catalog keeps its last good contents and the
/// caller can retry the reload.
#[derive(Debug, Error)]
pub enum FeedError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The feed did not answer within the configured timeout.
    #[error("feed request timed out after {0:?}")]
    Timeout(Duration),

    /// Rate limited by the feed host.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// The feed host answered with a non-success status.
    #[error("unexpected HTTP status {status} from feed")]
    UnexpectedStatus {
        /// HTTP status code.
        status: u16,
    },

    /// The body had no header row.
    #[error("feed is empty")]
    EmptyFeed,

    /// The header row lacks a required column.
    #[error("feed header is missing the {0} column")]
    MissingColumn(Column),
}

impl FeedError {
    /// Returns `true` for failures worth retrying later without changes to
    /// the feed itself.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Http(_) | Self::Timeout(_) | Self::RateLimited(_) => true,
            Self::UnexpectedStatus { status } => *status >= 500,
            Self::EmptyFeed | Self::MissingColumn(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_error_display() {
        let err = FeedError::MissingColumn(Column::Visible);
        assert_eq!(err.to_string(), "feed header is missing the Visible column");

        let err = FeedError::UnexpectedStatus { status: 404 };
        assert_eq!(err.to_string(), "unexpected HTTP status 404 from feed");
    }

    #[test]
    fn test_is_transient() {
        assert!(FeedError::Timeout(Duration::from_secs(10)).is_transient());
        assert!(FeedError::RateLimited(3).is_transient());
        assert!(FeedError::UnexpectedStatus { status: 503 }.is_transient());
        assert!(!FeedError::UnexpectedStatus { status: 404 }.is_transient());
        assert!(!FeedError::EmptyFeed.is_transient());
        assert!(!FeedError::MissingColumn(Column::Price).is_transient());
    }
}
