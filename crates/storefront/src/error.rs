//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type for everything a [`ShopSession`]
//! command can fail with. Failures the shopper caused (bad cart index,
//! incomplete form) are returned as-is; failures of the feed or the order
//! channel are also captured to Sentry via [`AppError::report`].
//!
//! [`ShopSession`]: crate::session::ShopSession

use thiserror::Error;

use crate::cart::CartError;
use crate::config::ConfigError;
use crate::feed::FeedError;
use crate::order::OrderError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// The product feed could not be fetched or parsed.
    #[error("Feed error: {0}")]
    Feed(#[from] FeedError),

    /// A cart mutation was rejected.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    /// An order could not be submitted.
    #[error("Order error: {0}")]
    Order(#[from] OrderError),
}

impl AppError {
    /// Returns `true` for failures on our side rather than the shopper's.
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        match self {
            Self::Config(_) | Self::Feed(_) => true,
            Self::Order(err) => matches!(err, OrderError::Sink(_)),
            Self::Cart(_) => false,
        }
    }

    /// Capture server-side failures to Sentry and log them.
    ///
    /// Shopper errors are only logged at debug level.
    pub fn report(&self) {
        if self.is_server_error() {
            let event_id = sentry::capture_error(self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Storefront error"
            );
        } else {
            tracing::debug!(error = %self, "Rejected shopper action");
        }
    }

    /// Message that is safe to show to the shopper.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Config(_) => "The shop is not configured correctly".to_string(),
            Self::Feed(_) => "The catalog could not be refreshed, showing the last one".to_string(),
            Self::Cart(err) => err.to_string(),
            Self::Order(OrderError::Sink(_)) => {
                "The order could not be sent, please try again".to_string()
            }
            Self::Order(err) => err.to_string(),
        }
    }
}

/// Add a breadcrumb for user actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of user actions
/// leading up to an error.
///
/// # Example
///
/// ```rust
/// use sheetshop_storefront::error::add_breadcrumb;
///
/// add_breadcrumb("cart", "Added product", Some(&[("product", "Apple")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}
