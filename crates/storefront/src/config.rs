//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SHEETSHOP_FEED_URL` - Published CSV export of the product sheet
//! - `SHEETSHOP_ORDER_PHONE` - Messaging number that receives orders (digits,
//!   optional leading `+`, spaces and dashes are ignored)
//!
//! ## Optional
//! - `SHEETSHOP_FEED_TIMEOUT_SECS` - Feed fetch timeout (default: 10)
//! - `SHEETSHOP_ORDER_LINK_BASE` - Deep link base URL (default: `https://wa.me`)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;

const DEFAULT_FEED_TIMEOUT_SECS: u64 = 10;
const DEFAULT_ORDER_LINK_BASE: &str = "https://wa.me";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Product feed source
    pub feed: FeedConfig,
    /// Outbound order link settings
    pub order: OrderConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g. `production`)
    pub sentry_environment: Option<String>,
}

/// Product feed configuration.
///
/// Implements `Debug` manually to redact the URL: published-sheet URLs embed
/// the access key.
#[derive(Clone)]
pub struct FeedConfig {
    /// Feed URL
    pub url: SecretString,
    /// Fetch timeout
    pub timeout: Duration,
}

impl std::fmt::Debug for FeedConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeedConfig")
            .field("url", &"[REDACTED]")
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Outbound order link configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderConfig {
    /// Receiving number, digits only
    pub phone: String,
    /// Deep link base URL without trailing slash
    pub link_base: String,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env { lookup };

        Ok(Self {
            feed: FeedConfig::load(&env)?,
            order: OrderConfig::load(&env)?,
            sentry_dsn: env.optional("SENTRY_DSN"),
            sentry_environment: env.optional("SENTRY_ENVIRONMENT"),
        })
    }
}

impl FeedConfig {
    fn load<F: Fn(&str) -> Option<String>>(env: &Env<F>) -> Result<Self, ConfigError> {
        let url = env.required("SHEETSHOP_FEED_URL")?;
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            return Err(ConfigError::InvalidEnvVar(
                "SHEETSHOP_FEED_URL".to_string(),
                "must be an http(s) URL".to_string(),
            ));
        }

        let timeout_secs = env
            .or_default(
                "SHEETSHOP_FEED_TIMEOUT_SECS",
                &DEFAULT_FEED_TIMEOUT_SECS.to_string(),
            )
            .parse::<u64>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("SHEETSHOP_FEED_TIMEOUT_SECS".to_string(), e.to_string())
            })?;
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "SHEETSHOP_FEED_TIMEOUT_SECS".to_string(),
                "must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            url: SecretString::from(url),
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

impl OrderConfig {
    fn load<F: Fn(&str) -> Option<String>>(env: &Env<F>) -> Result<Self, ConfigError> {
        let phone = normalize_phone(&env.required("SHEETSHOP_ORDER_PHONE")?)
            .map_err(|reason| {
                ConfigError::InvalidEnvVar("SHEETSHOP_ORDER_PHONE".to_string(), reason)
            })?;

        let link_base = env.or_default("SHEETSHOP_ORDER_LINK_BASE", DEFAULT_ORDER_LINK_BASE);
        if !link_base.starts_with("https://") && !link_base.starts_with("http://") {
            return Err(ConfigError::InvalidEnvVar(
                "SHEETSHOP_ORDER_LINK_BASE".to_string(),
                "must be an http(s) URL".to_string(),
            ));
        }

        Ok(Self {
            phone,
            link_base: link_base.trim_end_matches('/').to_string(),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Variable lookup with the usual required/optional/default helpers.
struct Env<F> {
    lookup: F,
}

impl<F: Fn(&str) -> Option<String>> Env<F> {
    /// Get a required variable. Blank values count as missing.
    fn required(&self, key: &str) -> Result<String, ConfigError> {
        self.optional(key)
            .ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
    }

    /// Get an optional variable. Blank values count as unset.
    fn optional(&self, key: &str) -> Option<String> {
        (self.lookup)(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    /// Get a variable with a default value.
    fn or_default(&self, key: &str, default: &str) -> String {
        self.optional(key).unwrap_or_else(|| default.to_string())
    }
}

/// Reduce a phone number to the digits a messaging deep link expects.
fn normalize_phone(raw: &str) -> Result<String, String> {
    let trimmed = raw.trim();
    let without_plus = trimmed.strip_prefix('+').unwrap_or(trimmed);

    let mut digits = String::with_capacity(without_plus.len());
    for c in without_plus.chars() {
        match c {
            '0'..='9' => digits.push(c),
            ' ' | '-' | '(' | ')' => {}
            other => return Err(format!("unexpected character '{other}'")),
        }
    }

    if digits.len() < 7 {
        return Err(format!("too short ({} digits)", digits.len()));
    }
    Ok(digits)
}
