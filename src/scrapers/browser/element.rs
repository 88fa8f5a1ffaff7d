//! [`Driver`] and [`Element`] over chromiumoxide.

use async_trait::async_trait;
use chromiumoxide::error::CdpError;
use tracing::debug;

use super::ChromeSession;
use crate::error::ScrapeError;
use crate::scrapers::driver::{Driver, Element};

/// Rendered, non-collapsed, and not hidden by style.
const IS_DISPLAYED_FN: &str = r#"
    function() {
        const style = window.getComputedStyle(this);
        const rect = this.getBoundingClientRect();
        return style.display !== 'none'
            && style.visibility !== 'hidden'
            && rect.width > 0
            && rect.height > 0;
    }
"#;

/// Displayed, enabled, and accepting pointer events.
const IS_INTERACTABLE_FN: &str = r#"
    function() {
        const style = window.getComputedStyle(this);
        const rect = this.getBoundingClientRect();
        return style.display !== 'none'
            && style.visibility !== 'hidden'
            && style.pointerEvents !== 'none'
            && rect.width > 0
            && rect.height > 0
            && !this.disabled
            && this.getAttribute('aria-disabled') !== 'true';
    }
"#;

impl From<CdpError> for ScrapeError {
    fn from(e: CdpError) -> Self {
        ScrapeError::Browser(e.to_string())
    }
}

/// A DOM node in the session's tab.
pub struct ChromeElement {
    inner: chromiumoxide::Element,
}

impl ChromeElement {
    async fn eval_bool(&self, function: &str) -> Result<bool, ScrapeError> {
        let ret = self.inner.call_js_fn(function, false).await?;
        Ok(ret
            .result
            .value
            .and_then(|v| v.as_bool())
            .unwrap_or(false))
    }
}

fn wrap(elements: Vec<chromiumoxide::Element>) -> Vec<ChromeElement> {
    elements
        .into_iter()
        .map(|inner| ChromeElement { inner })
        .collect()
}

#[async_trait]
impl Element for ChromeElement {
    async fn find_one(&self, selector: &str) -> Result<Option<Self>, ScrapeError> {
        Ok(self.find_many(selector).await?.into_iter().next())
    }

    async fn find_many(&self, selector: &str) -> Result<Vec<Self>, ScrapeError> {
        Ok(wrap(self.inner.find_elements(selector).await?))
    }

    async fn text(&self) -> Result<String, ScrapeError> {
        Ok(self.inner.inner_text().await?.unwrap_or_default())
    }

    async fn attribute(&self, name: &str) -> Result<Option<String>, ScrapeError> {
        Ok(self.inner.attribute(name).await?)
    }

    async fn is_displayed(&self) -> Result<bool, ScrapeError> {
        self.eval_bool(IS_DISPLAYED_FN).await
    }

    async fn is_interactable(&self) -> Result<bool, ScrapeError> {
        self.eval_bool(IS_INTERACTABLE_FN).await
    }

    async fn click(&self) -> Result<(), ScrapeError> {
        self.inner.click().await?;
        Ok(())
    }
}

#[async_trait]
impl Driver for ChromeSession {
    type Element = ChromeElement;

    async fn navigate(&self, url: &str) -> Result<(), ScrapeError> {
        self.page.goto(url).await?;
        debug!("Loaded {}", url);
        Ok(())
    }

    async fn find_one(&self, selector: &str) -> Result<Option<ChromeElement>, ScrapeError> {
        Ok(self.find_many(selector).await?.into_iter().next())
    }

    async fn find_many(&self, selector: &str) -> Result<Vec<ChromeElement>, ScrapeError> {
        Ok(wrap(self.page.find_elements(selector).await?))
    }

    async fn close(&mut self) -> Result<(), ScrapeError> {
        self.shutdown()
            .await
            .map_err(|e| ScrapeError::Browser(format!("{:#}", e)))
    }
}
