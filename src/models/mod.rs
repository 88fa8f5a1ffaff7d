//! Data models for catalog scraping.

mod record;
mod target;

pub use record::{Record, CSV_HEADER};
pub use target::TargetPage;
