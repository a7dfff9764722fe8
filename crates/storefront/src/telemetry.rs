//! Sentry and tracing setup for the process embedding the storefront.
//!
//! Call [`init_sentry`] first and keep the guard alive, then
//! [`init_tracing`]:
//!
//! ```rust,no_run
//! use sheetshop_storefront::{config::StorefrontConfig, telemetry};
//!
//! let config = StorefrontConfig::from_env()?;
//! let _sentry_guard = telemetry::init_sentry(&config);
//! telemetry::init_tracing()?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::StorefrontConfig;

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_LOG_FILTER: &str = "sheetshop_storefront=info";

/// Initialize Sentry error tracking and return guard that must be kept alive.
///
/// Returns `None` (and does nothing) when no DSN is configured.
pub fn init_sentry(config: &StorefrontConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Install the global tracing subscriber.
///
/// `EnvFilter` from `RUST_LOG` (default [`DEFAULT_LOG_FILTER`]), a `fmt`
/// layer, and the Sentry layer.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_tracing() -> Result<(), tracing_subscriber::util::TryInitError> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .try_init()
}

/// Where a tracing event of a given level ends up in Sentry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SentryRoute {
    Event,
    Breadcrumb,
    Ignore,
}

impl SentryRoute {
    fn for_level(level: tracing::Level) -> Self {
        match level {
            tracing::Level::ERROR | tracing::Level::WARN => Self::Event,
            tracing::Level::INFO | tracing::Level::DEBUG => Self::Breadcrumb,
            _ => Self::Ignore,
        }
    }
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match SentryRoute::for_level(*metadata.level()) {
        SentryRoute::Event => sentry_tracing::EventFilter::Event,
        SentryRoute::Breadcrumb => sentry_tracing::EventFilter::Breadcrumb,
        SentryRoute::Ignore => sentry_tracing::EventFilter::Ignore,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_sentry_routing_by_level() {
        assert_eq!(SentryRoute::for_level(tracing::Level::ERROR), SentryRoute::Event);
        assert_eq!(SentryRoute::for_level(tracing::Level::WARN), SentryRoute::Event);
        assert_eq!(SentryRoute::for_level(tracing::Level::INFO), SentryRoute::Breadcrumb);
        assert_eq!(SentryRoute::for_level(tracing::Level::DEBUG), SentryRoute::Breadcrumb);
        assert_eq!(SentryRoute::for_level(tracing::Level::TRACE), SentryRoute::Ignore);
    }

    #[test]
    fn test_init_sentry_without_dsn_is_none() {
        let config = StorefrontConfig::from_lookup(|key| match key {
            "SHEETSHOP_FEED_URL" => Some("https://sheets.example/pub".to_string()),
            "SHEETSHOP_ORDER_PHONE" => Some("593993842259".to_string()),
            _ => None,
        })
        .unwrap();

        assert!(init_sentry(&config).is_none());
    }
}
