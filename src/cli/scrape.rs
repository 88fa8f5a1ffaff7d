//! Scrape command.

#[cfg(feature = "browser")]
use console::style;
#[cfg(feature = "browser")]
use tokio::sync::mpsc;

#[cfg(feature = "browser")]
use super::progress::HarvestProgress;
use crate::config::Settings;
#[cfg(feature = "browser")]
use crate::scrapers::ChromeSession;
#[cfg(feature = "browser")]
use crate::services::{HarvestConfig, Harvester};

/// Scrape all selected target pages.
#[cfg(feature = "browser")]
pub async fn cmd_scrape(settings: Settings) -> anyhow::Result<()> {
    tokio::fs::create_dir_all(&settings.output_dir).await?;

    let session = ChromeSession::start(&settings.browser).await?;

    let progress = HarvestProgress::new(settings.pages.len() as u64, settings.base_url.as_str());
    let (tx, rx) = mpsc::channel(32);
    let display = tokio::spawn(progress.follow(rx));

    let harvester = Harvester::new(HarvestConfig {
        base_url: settings.base_url.clone(),
        output_dir: settings.output_dir.clone(),
        selectors: settings.selectors.clone(),
        expand: settings.expand.clone(),
    });
    let result = harvester.run(session, &settings.pages, Some(tx)).await;
    let _ = display.await;

    let summary = result?;
    println!(
        "\n{} Scraped {} record(s) across {} page(s)",
        style("✓").green(),
        summary.total_records(),
        summary.pages.len()
    );
    Ok(())
}

#[cfg(not(feature = "browser"))]
pub async fn cmd_scrape(_settings: Settings) -> anyhow::Result<()> {
    Err(anyhow::anyhow!(
        "Browser support not compiled. Rebuild with: cargo build --features browser"
    ))
}
