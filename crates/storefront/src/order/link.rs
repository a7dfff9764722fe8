//! Messaging deep links.

use std::fmt;

use serde::Serialize;

use crate::config::OrderConfig;

/// A deep link that opens a chat with the shop prefilled with the order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderLink {
    url: String,
    message: String,
}

impl OrderLink {
    /// Build `{link_base}/{phone}?text={percent-encoded message}`.
    #[must_use]
    pub fn build(config: &OrderConfig, message: &str) -> Self {
        let url = format!(
            "{}/{}?text={}",
            config.link_base,
            config.phone,
            urlencoding::encode(message)
        );
        Self {
            url,
            message: message.to_owned(),
        }
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The unencoded message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for OrderLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn config() -> OrderConfig {
        OrderConfig {
            phone: "593993842259".to_string(),
            link_base: "https://wa.me".to_string(),
        }
    }

    #[test]
    fn test_build_percent_encodes_message() {
        let link = OrderLink::build(&config(), "*TOTAL: $1.50*\nA&B=c?");

        assert_eq!(
            link.url(),
            "https://wa.me/593993842259?text=%2ATOTAL%3A%20%241.50%2A%0AA%26B%3Dc%3F"
        );
        assert_eq!(link.message(), "*TOTAL: $1.50*\nA&B=c?");
    }

    #[test]
    fn test_encodes_non_ascii_as_utf8() {
        let link = OrderLink::build(&config(), "✅ Piña");
        assert!(link.url().ends_with("?text=%E2%9C%85%20Pi%C3%B1a"));
    }

    #[test]
    fn test_display_is_url() {
        let link = OrderLink::build(&config(), "hi");
        assert_eq!(link.to_string(), "https://wa.me/593993842259?text=hi");
    }
}
