//! Drive a catalog page to its fully revealed state.
//!
//! The page is loaded, the consent banner dismissed if present, and the
//! "load more" control clicked until it disappears or hides.

use tracing::{debug, info};

use super::config::{ExpandSettings, Selectors};
use super::driver::{wait_until, Driver, Element};
use crate::error::ScrapeError;

/// Outcome of a single reveal attempt.
#[derive(Debug)]
pub enum RevealStep {
    /// The control was clicked; more content may follow.
    Continue,
    /// The control is gone or hidden; all content is visible.
    Exhausted,
    /// The control was visible but could not be activated.
    Failed(ScrapeError),
}

/// Per-page session state. Lives only while one page is processed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageSession {
    pub url: String,
    pub banner_dismissed: bool,
    pub exhausted: bool,
    pub activations: usize,
}

/// A fully revealed page and the listing nodes it contains.
pub struct ExpandedPage<E> {
    pub session: PageSession,
    pub listings: Vec<E>,
}

/// Expands catalog pages on a shared driver.
pub struct PageExpander<'a> {
    selectors: &'a Selectors,
    settings: &'a ExpandSettings,
}

impl<'a> PageExpander<'a> {
    pub fn new(selectors: &'a Selectors, settings: &'a ExpandSettings) -> Self {
        Self {
            selectors,
            settings,
        }
    }

    /// Load `url` and return every listing node once nothing is left to reveal.
    pub async fn expand<D: Driver>(
        &self,
        driver: &D,
        url: &str,
    ) -> Result<ExpandedPage<D::Element>, ScrapeError> {
        let mut session = PageSession {
            url: url.to_string(),
            ..Default::default()
        };

        info!("Navigating to {}", url);
        driver.navigate(url).await?;

        session.banner_dismissed = self.dismiss_banner(driver).await?;

        while !session.exhausted {
            match self.reveal_once(driver).await {
                RevealStep::Continue => {
                    session.activations += 1;
                    debug!("Reveal control activated ({} so far)", session.activations);
                    tokio::time::sleep(self.settings.settle_delay()).await;
                }
                RevealStep::Exhausted => session.exhausted = true,
                RevealStep::Failed(e) => return Err(e),
            }
        }

        let listings = driver.find_many(&self.selectors.listing).await?;
        info!(
            "Expanded {} after {} activation(s): {} listing(s)",
            url,
            session.activations,
            listings.len()
        );

        Ok(ExpandedPage { session, listings })
    }

    /// Accept the consent banner. Returns false if there was none.
    async fn dismiss_banner<D: Driver>(&self, driver: &D) -> Result<bool, ScrapeError> {
        let Some(banner) = driver.find_one(&self.selectors.cookie_banner).await? else {
            debug!("No cookie banner");
            return Ok(false);
        };
        match banner.find_one(&self.selectors.cookie_accept).await? {
            Some(accept) => {
                accept.click().await?;
                debug!("Cookie banner accepted");
                Ok(true)
            }
            None => {
                debug!("Cookie banner has no accept control");
                Ok(false)
            }
        }
    }

    /// Try to click the reveal control once.
    pub async fn reveal_once<D: Driver>(&self, driver: &D) -> RevealStep {
        match self.try_reveal(driver).await {
            Ok(true) => RevealStep::Continue,
            Ok(false) => RevealStep::Exhausted,
            Err(e) => RevealStep::Failed(e),
        }
    }

    async fn try_reveal<D: Driver>(&self, driver: &D) -> Result<bool, ScrapeError> {
        let selector = &self.selectors.reveal_more;
        let Some(control) = driver.find_one(selector).await? else {
            return Ok(false);
        };
        if !control.is_displayed().await? {
            return Ok(false);
        }

        let timeout = self.settings.interact_timeout();
        let ready = wait_until(timeout, self.settings.poll_interval(), || {
            control.is_interactable()
        })
        .await?;
        if !ready {
            return Err(ScrapeError::InteractTimeout {
                selector: selector.clone(),
                timeout,
            });
        }

        control.click().await?;
        Ok(true)
    }
}
