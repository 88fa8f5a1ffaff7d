//! Map listing nodes into validated records.
//!
//! Every field except the rating is required: a missing sub-element or an
//! unparseable value fails the listing, and callers fail the whole page.

use super::config::Selectors;
use super::driver::Element;
use crate::error::ScrapeError;
use crate::models::Record;

/// Maps listing nodes to [`Record`]s using a fixed set of selectors.
///
/// The title always comes from the anchor's `title` attribute; the
/// visible link text is truncated on narrow layouts.
pub struct RecordExtractor<'a> {
    selectors: &'a Selectors,
}

impl<'a> RecordExtractor<'a> {
    pub fn new(selectors: &'a Selectors) -> Self {
        Self { selectors }
    }

    pub async fn extract<E: Element>(&self, node: &E) -> Result<Record, ScrapeError> {
        let sel = self.selectors;

        let title = required(node, &sel.title)
            .await?
            .attribute("title")
            .await?
            .ok_or_else(|| ScrapeError::MissingAttribute {
                selector: sel.title.clone(),
                attribute: "title".to_string(),
            })?;
        if title.trim().is_empty() {
            return Err(ScrapeError::EmptyField { field: "title" });
        }

        let description = required(node, &sel.description).await?.text().await?;
        let price = parse_price(&required(node, &sel.price).await?.text().await?)?;
        let rating = node.find_many(&sel.rating_star).await?.len() as u32;
        let num_of_reviews =
            parse_review_count(&required(node, &sel.review_count).await?.text().await?)?;

        Ok(Record {
            title,
            description,
            price,
            rating,
            num_of_reviews,
        })
    }

    /// Extract every node in order, stopping at the first failure.
    pub async fn extract_all<E: Element>(&self, nodes: &[E]) -> Result<Vec<Record>, ScrapeError> {
        let mut records = Vec::with_capacity(nodes.len());
        for node in nodes {
            records.push(self.extract(node).await?);
        }
        Ok(records)
    }
}

async fn required<E: Element>(node: &E, selector: &str) -> Result<E, ScrapeError> {
    node.find_one(selector)
        .await?
        .ok_or_else(|| ScrapeError::missing(selector))
}

/// Parse a price label such as `$1299.99`.
///
/// Only a single leading currency symbol is stripped. Thousands separators
/// are rejected rather than guessed at.
pub fn parse_price(text: &str) -> Result<f64, ScrapeError> {
    let trimmed = text.trim();
    let amount = match trimmed.chars().next() {
        Some(c) if !c.is_ascii_digit() && c != '.' && c != '-' && c != '+' => {
            trimmed[c.len_utf8()..].trim_start()
        }
        _ => trimmed,
    };

    let price: f64 = amount
        .parse()
        .map_err(|e| ScrapeError::parse("price", text, e))?;
    if !price.is_finite() || price.is_sign_negative() {
        return Err(ScrapeError::parse("price", text, "not a non-negative amount"));
    }
    Ok(price)
}

/// Parse the leading count of a label such as `12 reviews`.
pub fn parse_review_count(text: &str) -> Result<u32, ScrapeError> {
    let token = text
        .split_whitespace()
        .next()
        .ok_or_else(|| ScrapeError::parse("num_of_reviews", text, "empty label"))?;
    token
        .parse()
        .map_err(|e| ScrapeError::parse("num_of_reviews", text, e))
}
