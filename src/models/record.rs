//! Extracted product listing records.

use serde::{Deserialize, Serialize};

/// Column header written at the top of every output file.
pub const CSV_HEADER: [&str; 5] = ["title", "description", "price", "rating", "num_of_reviews"];

/// One product listing, fully validated.
///
/// Field order matches [`CSV_HEADER`]; the CSV sink serializes records
/// positionally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Display name of the listing. Never empty.
    pub title: String,
    /// Description paragraph, verbatim. May be empty.
    pub description: String,
    /// Non-negative price with the currency symbol removed.
    pub price: f64,
    /// Number of filled star markers. Zero is a real rating.
    pub rating: u32,
    pub num_of_reviews: u32,
}
