//! Browser automation capability consumed by the scraping core.
//!
//! Lookups return `Option`/`Vec` instead of failing on absence, so callers
//! branch on presence explicitly. Errors are reserved for real driver
//! failures (dead session, protocol errors).

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;

use crate::error::ScrapeError;

/// A node in the rendered page.
#[async_trait]
pub trait Element: Send + Sync + Sized {
    /// First descendant matching `selector`, if any.
    async fn find_one(&self, selector: &str) -> Result<Option<Self>, ScrapeError>;

    /// All descendants matching `selector`, in document order.
    async fn find_many(&self, selector: &str) -> Result<Vec<Self>, ScrapeError>;

    /// Rendered text of the element.
    async fn text(&self) -> Result<String, ScrapeError>;

    async fn attribute(&self, name: &str) -> Result<Option<String>, ScrapeError>;

    async fn is_displayed(&self) -> Result<bool, ScrapeError>;

    /// Displayed and enabled, so a click would reach it.
    async fn is_interactable(&self) -> Result<bool, ScrapeError>;

    async fn click(&self) -> Result<(), ScrapeError>;
}

/// A browser session driving a single tab.
#[async_trait]
pub trait Driver: Send + Sync {
    type Element: Element;

    /// Navigate the session to `url` and wait for the load to finish.
    async fn navigate(&self, url: &str) -> Result<(), ScrapeError>;

    async fn find_one(&self, selector: &str) -> Result<Option<Self::Element>, ScrapeError>;

    async fn find_many(&self, selector: &str) -> Result<Vec<Self::Element>, ScrapeError>;

    /// Tear the session down. Called once, after the last page.
    async fn close(&mut self) -> Result<(), ScrapeError>;
}

/// Poll `predicate` until it holds or `timeout` elapses.
///
/// Returns `Ok(true)` when the predicate held, `Ok(false)` on timeout.
/// The predicate is always evaluated at least once.
pub async fn wait_until<F, Fut>(
    timeout: Duration,
    poll: Duration,
    mut predicate: F,
) -> Result<bool, ScrapeError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<bool, ScrapeError>>,
{
    let deadline = Instant::now() + timeout;
    loop {
        if predicate().await? {
            return Ok(true);
        }
        let now = Instant::now();
        if now >= deadline {
            return Ok(false);
        }
        tokio::time::sleep(poll.min(deadline - now)).await;
    }
}
