//! Target page listing.

use console::style;

use crate::config::Settings;

/// Print configured pages with their resolved URLs.
pub fn cmd_pages(settings: &Settings) -> anyhow::Result<()> {
    println!("\n{}", style("Target Pages").bold());
    println!("{}", "-".repeat(72));
    println!("{:<12} {:<16} URL", "Name", "Output");
    println!("{}", "-".repeat(72));

    for page in &settings.pages {
        let url = page.resolve(&settings.base_url)?;
        println!("{:<12} {:<16} {}", page.name, page.file_name(), url);
    }

    println!(
        "\n{} file(s) will be written to {}",
        settings.pages.len(),
        settings.output_dir.display()
    );
    Ok(())
}
