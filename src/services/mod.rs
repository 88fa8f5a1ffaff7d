//! Service layer for catalog scraping.
//!
//! This module contains domain logic separated from UI concerns.
//! Services can be used by the CLI or embedded in other tools.

pub mod harvest;
pub mod sink;

pub use harvest::{HarvestConfig, HarvestEvent, HarvestSummary, Harvester, PageReport};
pub use sink::{write_csv, write_records};
