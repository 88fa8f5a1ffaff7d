//! catalog-scrape - expand and scrape JavaScript-rendered product catalogs.
//!
//! Each target page is loaded in a shared browser session, its "load more"
//! control clicked until every listing is visible, and the listings written
//! to `<page>.csv`.

pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod scrapers;
pub mod services;

pub use error::{HarvestError, ScrapeError, Stage};
pub use models::{Record, TargetPage};
