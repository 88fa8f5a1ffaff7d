//! Target page definitions.

use serde::{Deserialize, Serialize};
use url::Url;

/// A named catalog page to scrape into `{name}.csv`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetPage {
    /// Output file stem.
    pub name: String,
    /// Path relative to the configured base URL.
    pub path: String,
}

impl TargetPage {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    /// Resolve this page's path against the base origin.
    pub fn resolve(&self, base: &Url) -> Result<Url, url::ParseError> {
        base.join(&self.path)
    }

    /// Output file name for this page.
    pub fn file_name(&self) -> String {
        format!("{}.csv", self.name)
    }
}
