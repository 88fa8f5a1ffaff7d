//! Catalog page expansion and listing extraction.

pub mod browser;
pub mod config;
pub mod driver;
pub mod expand;
pub mod extract;
#[cfg(test)]
pub(crate) mod testing;

#[cfg(feature = "browser")]
pub use browser::ChromeSession;
pub use browser::BrowserEngineConfig;
pub use config::{ExpandSettings, Selectors};
pub use driver::{Driver, Element};
pub use expand::{ExpandedPage, PageExpander, PageSession, RevealStep};
pub use extract::RecordExtractor;
