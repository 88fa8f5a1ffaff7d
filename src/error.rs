//! Error types shared by the expansion, extraction and sink stages.

use std::fmt;
use std::time::Duration;

use thiserror::Error;

/// A hard failure while scraping a single target page.
///
/// Expected absences (no cookie banner, no reveal control) never surface
/// here; they are plain `None` values at the driver boundary.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Browser error: {0}")]
    Browser(String),
    #[error("Element not found: {selector}")]
    MissingElement { selector: String },
    #[error("Attribute '{attribute}' missing on {selector}")]
    MissingAttribute { selector: String, attribute: String },
    #[error("Field '{field}' is empty")]
    EmptyField { field: &'static str },
    #[error("Invalid {field} value {value:?}: {reason}")]
    Parse {
        field: &'static str,
        value: String,
        reason: String,
    },
    #[error("Timed out after {timeout:?} waiting for {selector} to become interactable")]
    InteractTimeout { selector: String, timeout: Duration },
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl ScrapeError {
    pub fn missing(selector: &str) -> Self {
        Self::MissingElement {
            selector: selector.to_string(),
        }
    }

    pub fn parse(field: &'static str, value: &str, reason: impl ToString) -> Self {
        Self::Parse {
            field,
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Pipeline step a target page was in when it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Expansion,
    Extraction,
    Write,
    Shutdown,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Stage::Expansion => "expansion",
            Stage::Extraction => "extraction",
            Stage::Write => "write",
            Stage::Shutdown => "session shutdown",
        };
        f.write_str(s)
    }
}

/// A scrape failure attributed to a target page and stage.
#[derive(Debug, Error)]
#[error("Page '{page}' failed during {stage}: {source}")]
pub struct HarvestError {
    pub page: String,
    pub stage: Stage,
    #[source]
    pub source: ScrapeError,
}

impl HarvestError {
    pub fn new(page: &str, stage: Stage, source: ScrapeError) -> Self {
        Self {
            page: page.to_string(),
            stage,
            source,
        }
    }
}
