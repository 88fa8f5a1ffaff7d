//! CLI commands implementation.
//!
//! This module contains the CLI parser and dispatches to command-specific modules.

mod pages;
#[cfg(feature = "browser")]
mod progress;
mod scrape;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::{load_settings_with_options, LoadOptions};

#[derive(Parser)]
#[command(name = "catalog-scrape")]
#[command(about = "Expand and scrape JavaScript-rendered product catalogs into CSV")]
#[command(version)]
pub struct Cli {
    /// Config file path (TOML or JSON)
    #[arg(short, long, global = true, env = "CATALOG_SCRAPE_CONFIG")]
    config: Option<PathBuf>,

    /// Resolve relative paths from current working directory instead of config file location
    #[arg(long, global = true)]
    cwd: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape every configured target page into `<name>.csv`
    Scrape {
        /// Only scrape these pages (repeatable; default: all)
        #[arg(short, long = "page", value_name = "NAME")]
        pages: Vec<String>,
        /// Directory for CSV output (overrides config)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
        /// Show the browser window
        #[arg(long)]
        headful: bool,
        /// Attach to a running Chrome DevTools endpoint instead of launching one
        #[arg(long, env = "CHROME_REMOTE_URL")]
        remote_url: Option<String>,
    },

    /// List configured target pages and their URLs
    Pages,
}

/// Run the CLI.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let options = LoadOptions {
        config_path: cli.config,
        use_cwd: cli.cwd,
    };
    let mut settings = load_settings_with_options(options).await?;

    match cli.command {
        Commands::Scrape {
            pages,
            output_dir,
            headful,
            remote_url,
        } => {
            settings.select_pages(&pages)?;
            if let Some(dir) = output_dir {
                settings.output_dir = dir;
            }
            if headful {
                settings.browser.headless = false;
            }
            if remote_url.is_some() {
                settings.browser.remote_url = remote_url;
            }
            scrape::cmd_scrape(settings).await
        }
        Commands::Pages => pages::cmd_pages(&settings),
    }
}
