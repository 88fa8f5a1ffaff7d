//! Progress display for a harvest run.

use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::mpsc;

use crate::services::HarvestEvent;

/// Progress bar over target pages, driven by harvest events.
pub struct HarvestProgress {
    bar: ProgressBar,
}

impl HarvestProgress {
    pub fn new(total_pages: u64, origin: &str) -> Self {
        let bar = ProgressBar::new(total_pages);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} {msg} [{bar:30.cyan/blue}] {pos}/{len} ({elapsed})")
                .unwrap()
                .progress_chars("█▓░"),
        );
        bar.set_message(format!("Scraping products from {}", origin));
        Self { bar }
    }

    /// Consume events until the sender side is dropped.
    pub async fn follow(self, mut rx: mpsc::Receiver<HarvestEvent>) {
        while let Some(event) = rx.recv().await {
            match event {
                HarvestEvent::PageStarted { name, .. } => {
                    self.bar.set_message(format!("Scraping {}", name));
                }
                HarvestEvent::PageFinished {
                    name,
                    records,
                    path,
                } => {
                    self.bar.println(format!(
                        "  {} {} record(s) from {} -> {}",
                        console::style("✓").green(),
                        records,
                        name,
                        path.display()
                    ));
                    self.bar.inc(1);
                }
                HarvestEvent::PageFailed { name, .. } => {
                    self.bar
                        .println(format!("  {} {}", console::style("✗").red(), name));
                    self.bar.abandon_with_message(format!("Failed on {}", name));
                    return;
                }
            }
        }
        self.bar.finish_with_message("Done");
    }
}
