//! Application state shared across shopping sessions.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard};

use tracing::instrument;

use crate::catalog::CatalogStore;
use crate::config::StorefrontConfig;
use crate::feed::{FeedClient, FeedError, ParsedFeed};

/// What a reload did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadOutcome {
    /// The catalog was replaced.
    Replaced(ReloadSummary),
    /// Another reload was already running; this one was ignored.
    AlreadyInFlight,
}

/// Counts from a successful reload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReloadSummary {
    /// Published records now in the catalog.
    pub records: usize,
    /// Rows dropped because they were unpublished.
    pub hidden: usize,
    /// Malformed rows that were skipped.
    pub skipped_rows: usize,
}

/// Application state shared across all sessions.
///
/// This struct is cheaply cloneable via `Arc`. Readers always see a complete
/// catalog: a reload swaps the store only after the new feed has been fully
/// fetched and parsed, and a failed reload leaves the previous one in place.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    feed: FeedClient,
    catalog: RwLock<CatalogStore>,
    reloading: AtomicBool,
}

impl AppState {
    /// Create a new application state with an empty catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the feed HTTP client cannot be built.
    pub fn new(config: StorefrontConfig) -> Result<Self, FeedError> {
        let feed = FeedClient::new(&config.feed)?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                feed,
                catalog: RwLock::new(CatalogStore::new()),
                reloading: AtomicBool::new(false),
            }),
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the feed client.
    #[must_use]
    pub fn feed(&self) -> &FeedClient {
        &self.inner.feed
    }

    /// Read access to the current catalog.
    ///
    /// Do not hold the guard across an `.await`.
    pub fn catalog(&self) -> RwLockReadGuard<'_, CatalogStore> {
        self.inner
            .catalog
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns `true` while a reload is running.
    #[must_use]
    pub fn is_reloading(&self) -> bool {
        self.inner.reloading.load(Ordering::Acquire)
    }

    /// Replace the catalog with an already parsed feed.
    pub fn install_feed(&self, feed: ParsedFeed) -> ReloadSummary {
        let summary = ReloadSummary {
            records: feed.records.len(),
            hidden: feed.hidden,
            skipped_rows: feed.errors.len(),
        };

        self.inner
            .catalog
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(feed);

        summary
    }

    /// Fetch the feed and replace the catalog.
    ///
    /// A reload requested while another is running returns
    /// [`ReloadOutcome::AlreadyInFlight`] immediately.
    ///
    /// # Errors
    ///
    /// Returns the [`FeedError`] if the fetch or parse fails. The previous
    /// catalog is kept.
    #[instrument(skip(self))]
    pub async fn reload(&self) -> Result<ReloadOutcome, FeedError> {
        let Some(_guard) = ReloadGuard::acquire(&self.inner.reloading) else {
            tracing::debug!("Reload already in flight, ignoring");
            return Ok(ReloadOutcome::AlreadyInFlight);
        };

        match self.inner.feed.load().await {
            Ok(feed) => {
                let summary = self.install_feed(feed);
                tracing::info!(
                    records = summary.records,
                    hidden = summary.hidden,
                    skipped_rows = summary.skipped_rows,
                    "Catalog reloaded"
                );
                Ok(ReloadOutcome::Replaced(summary))
            }
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    kept_records = self.catalog().len(),
                    "Feed reload failed, keeping previous catalog"
                );
                Err(err)
            }
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.inner.config)
            .field("reloading", &self.is_reloading())
            .finish_non_exhaustive()
    }
}

/// Holds the reload flag; clears it on drop, including when the reload
/// future is cancelled.
struct ReloadGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> ReloadGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for ReloadGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod tests {
    use super::*;
    use crate::feed::parse_feed;

    pub(crate) fn test_state() -> AppState {
        let config = StorefrontConfig::from_lookup(|key| match key {
            "SHEETSHOP_FEED_URL" => Some("http://127.0.0.1:9/feed.csv".to_string()),
            "SHEETSHOP_FEED_TIMEOUT_SECS" => Some("1".to_string()),
            "SHEETSHOP_ORDER_PHONE" => Some("593993842259".to_string()),
            _ => None,
        })
        .unwrap();
        AppState::new(config).unwrap()
    }

    const FEED: &str = "ID,Nombre,Descripcion,Categoria,Precio,Stock,Imagen,Visible\n\
                        1,Apple,Crisp,Fruit,$1.50,4,apple.jpg,TRUE\n\
                        2,Pear,Soft,Fruit,$2,0,pear.jpg,FALSE\n\
                        3,Bread\n";

    #[test]
    fn test_guard_is_exclusive_and_released_on_drop() {
        let flag = AtomicBool::new(false);

        let first = ReloadGuard::acquire(&flag);
        assert!(first.is_some());
        assert!(ReloadGuard::acquire(&flag).is_none());

        drop(first);
        assert!(ReloadGuard::acquire(&flag).is_some());
    }

    #[test]
    fn test_install_feed_replaces_catalog() {
        let state = test_state();
        assert!(state.catalog().is_empty());

        let summary = state.install_feed(parse_feed(FEED).unwrap());

        assert_eq!(
            summary,
            ReloadSummary {
                records: 1,
                hidden: 1,
                skipped_rows: 1
            }
        );
        assert_eq!(state.catalog().len(), 1);
        assert!(state.catalog().find_by_name("Apple").is_some());
    }

    #[test]
    fn test_clones_share_catalog() {
        let state = test_state();
        let other = state.clone();

        state.install_feed(parse_feed(FEED).unwrap());
        assert_eq!(other.catalog().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_reload_keeps_catalog() {
        let state = test_state();
        state.install_feed(parse_feed(FEED).unwrap());

        let err = state.reload().await.unwrap_err();

        assert!(err.is_transient());
        assert_eq!(state.catalog().len(), 1);
        assert!(!state.is_reloading());
    }

    #[tokio::test]
    async fn test_reload_while_in_flight_is_ignored() {
        let state = test_state();
        let _held = ReloadGuard::acquire(&state.inner.reloading).unwrap();

        let outcome = state.reload().await.unwrap();
        assert_eq!(outcome, ReloadOutcome::AlreadyInFlight);
    }

    #[test]
    fn test_debug_redacts_feed_url() {
        let debug_output = format!("{:?}", test_state());
        assert!(!debug_output.contains("127.0.0.1:9"));
    }
}
