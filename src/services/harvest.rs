//! Catalog harvest service.
//!
//! Runs every configured target page through expansion, extraction and
//! CSV output on one shared browser session. The first hard failure aborts
//! the run; pages already written stay on disk.
//! Separated from UI concerns - emits events for progress tracking.

use std::path::PathBuf;

use tokio::sync::mpsc;
use tracing::{error, info, warn};
use url::Url;

use super::sink::write_records;
use crate::error::{HarvestError, Stage};
use crate::models::TargetPage;
use crate::scrapers::{Driver, ExpandSettings, PageExpander, RecordExtractor, Selectors};

/// Events emitted while harvesting.
#[derive(Debug, Clone)]
pub enum HarvestEvent {
    /// Processing of a page started.
    PageStarted {
        index: usize,
        total: usize,
        name: String,
    },
    /// Page written successfully.
    PageFinished {
        name: String,
        records: usize,
        path: PathBuf,
    },
    /// Page failed; the run stops after this event.
    PageFailed { name: String, error: String },
}

/// Outcome for one written page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageReport {
    pub name: String,
    pub url: String,
    pub activations: usize,
    pub records: usize,
    pub path: PathBuf,
}

/// Result of a completed harvest.
#[derive(Debug, Clone, Default)]
pub struct HarvestSummary {
    pub pages: Vec<PageReport>,
}

impl HarvestSummary {
    pub fn total_records(&self) -> usize {
        self.pages.iter().map(|p| p.records).sum()
    }
}

/// Configuration for the harvest service.
pub struct HarvestConfig {
    pub base_url: Url,
    pub output_dir: PathBuf,
    pub selectors: Selectors,
    pub expand: ExpandSettings,
}

/// Service scraping target pages into CSV files.
pub struct Harvester {
    config: HarvestConfig,
}

impl Harvester {
    pub fn new(config: HarvestConfig) -> Self {
        Self { config }
    }

    /// Harvest `pages` in order, then close `driver`.
    ///
    /// The driver is closed exactly once whether or not a page failed. A
    /// page failure takes precedence over a close failure.
    pub async fn run<D: Driver>(
        &self,
        mut driver: D,
        pages: &[TargetPage],
        event_tx: Option<mpsc::Sender<HarvestEvent>>,
    ) -> Result<HarvestSummary, HarvestError> {
        let outcome = self.harvest_all(&driver, pages, event_tx.as_ref()).await;

        let closed = driver.close().await;
        if let Err(e) = &closed {
            warn!("Failed to close browser session: {}", e);
        }

        let summary = outcome?;
        closed.map_err(|e| HarvestError::new("<session>", Stage::Shutdown, e))?;
        Ok(summary)
    }

    async fn harvest_all<D: Driver>(
        &self,
        driver: &D,
        pages: &[TargetPage],
        event_tx: Option<&mpsc::Sender<HarvestEvent>>,
    ) -> Result<HarvestSummary, HarvestError> {
        let mut summary = HarvestSummary::default();
        let total = pages.len();

        for (index, page) in pages.iter().enumerate() {
            emit(
                event_tx,
                HarvestEvent::PageStarted {
                    index,
                    total,
                    name: page.name.clone(),
                },
            )
            .await;

            match self.harvest_page(driver, page).await {
                Ok(report) => {
                    info!(
                        "{}: {} record(s) -> {}",
                        report.name,
                        report.records,
                        report.path.display()
                    );
                    emit(
                        event_tx,
                        HarvestEvent::PageFinished {
                            name: report.name.clone(),
                            records: report.records,
                            path: report.path.clone(),
                        },
                    )
                    .await;
                    summary.pages.push(report);
                }
                Err(e) => {
                    error!("{}", e);
                    emit(
                        event_tx,
                        HarvestEvent::PageFailed {
                            name: page.name.clone(),
                            error: e.to_string(),
                        },
                    )
                    .await;
                    return Err(e);
                }
            }
        }

        Ok(summary)
    }

    /// Expand, extract and write a single page.
    pub async fn harvest_page<D: Driver>(
        &self,
        driver: &D,
        page: &TargetPage,
    ) -> Result<PageReport, HarvestError> {
        let cfg = &self.config;
        let name = page.name.as_str();

        let url = page
            .resolve(&cfg.base_url)
            .map_err(|e| HarvestError::new(name, Stage::Expansion, e.into()))?;

        let expanded = PageExpander::new(&cfg.selectors, &cfg.expand)
            .expand(driver, url.as_str())
            .await
            .map_err(|e| HarvestError::new(name, Stage::Expansion, e))?;

        let records = RecordExtractor::new(&cfg.selectors)
            .extract_all(&expanded.listings)
            .await
            .map_err(|e| HarvestError::new(name, Stage::Extraction, e))?;

        let path = write_records(&cfg.output_dir, name, &records)
            .map_err(|e| HarvestError::new(name, Stage::Write, e))?;

        Ok(PageReport {
            name: page.name.clone(),
            url: url.to_string(),
            activations: expanded.session.activations,
            records: records.len(),
            path,
        })
    }
}

async fn emit(tx: Option<&mpsc::Sender<HarvestEvent>>, event: HarvestEvent) {
    if let Some(tx) = tx {
        let _ = tx.send(event).await;
    }
}
