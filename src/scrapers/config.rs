//! Scraper configuration types.
//!
//! These structs define the TOML-configurable selectors and timing used to
//! expand a catalog page and map its listings into records.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// CSS selectors locating the page structure.
///
/// Listing sub-selectors are evaluated relative to each listing node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Selectors {
    /// One-time consent banner.
    pub cookie_banner: String,
    /// Accept control, relative to the banner.
    pub cookie_accept: String,
    /// "Load more" control.
    pub reveal_more: String,
    /// Wrapper of a single product listing.
    pub listing: String,
    /// Anchor carrying the product name in its `title` attribute.
    pub title: String,
    pub description: String,
    pub price: String,
    /// Repeated star marker; the match count is the rating.
    pub rating_star: String,
    pub review_count: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            cookie_banner: "#cookieBanner".to_string(),
            cookie_accept: ".acceptContainer > button.acceptCookies".to_string(),
            reveal_more: "a.ecomerce-items-scroll-more".to_string(),
            listing: ".product-wrapper".to_string(),
            title: ".caption > h4 > a".to_string(),
            description: ".caption > p.description".to_string(),
            price: ".caption > h4.float-end".to_string(),
            rating_star: ".ratings span.ws-icon-star".to_string(),
            review_count: ".ratings > p.review-count".to_string(),
        }
    }
}

/// Timing of the reveal-more loop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpandSettings {
    /// How long a visible reveal control may take to become clickable.
    pub interact_timeout_secs: u64,
    /// Pause after each click so new listings can render.
    pub settle_delay_ms: u64,
    /// Interval between interactability checks.
    pub poll_interval_ms: u64,
}

impl Default for ExpandSettings {
    fn default() -> Self {
        Self {
            interact_timeout_secs: 10,
            settle_delay_ms: 100,
            poll_interval_ms: 500,
        }
    }
}

impl ExpandSettings {
    pub fn interact_timeout(&self) -> Duration {
        Duration::from_secs(self.interact_timeout_secs)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}
