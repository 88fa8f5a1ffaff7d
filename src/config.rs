//! Configuration management for catalog-scrape.
//!
//! A `Config` is what lives in the optional TOML/JSON file; `Settings` is
//! the validated runtime view handed to the harvest service.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::models::TargetPage;
use crate::scrapers::{BrowserEngineConfig, ExpandSettings, Selectors};

/// Default catalog origin.
pub const DEFAULT_BASE_URL: &str = "https://webscraper.io/";

/// Environment variable overriding the base URL.
const BASE_URL_ENV: &str = "CATALOG_SCRAPE_BASE_URL";

/// Default target pages, in scrape order.
const DEFAULT_PAGES: &[(&str, &str)] = &[
    ("home", "test-sites/e-commerce/more/"),
    ("laptops", "test-sites/e-commerce/more/computers/laptops"),
    ("tablets", "test-sites/e-commerce/more/computers/tablets"),
    ("phones", "test-sites/e-commerce/more/phones"),
    ("touch", "test-sites/e-commerce/more/phones/touch"),
    ("computers", "test-sites/e-commerce/more/computers"),
];

pub fn default_pages() -> Vec<TargetPage> {
    DEFAULT_PAGES
        .iter()
        .map(|(name, path)| TargetPage::new(*name, *path))
        .collect()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

/// File-level configuration. Every key is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Origin every page path is resolved against.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Target pages in scrape order.
    #[serde(default = "default_pages")]
    pub pages: Vec<TargetPage>,
    /// Directory receiving the CSV files. Relative paths resolve against
    /// the config file's directory.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default)]
    pub selectors: Selectors,
    #[serde(default)]
    pub expand: ExpandSettings,
    #[serde(default)]
    pub browser: BrowserEngineConfig,
    /// Path the config was loaded from.
    #[serde(skip)]
    pub source_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            pages: default_pages(),
            output_dir: default_output_dir(),
            selectors: Selectors::default(),
            expand: ExpandSettings::default(),
            browser: BrowserEngineConfig::default(),
            source_path: None,
        }
    }
}

impl Config {
    /// Load configuration from a specific file path.
    /// TOML and JSON are chosen by file extension; anything else is TOML.
    pub async fn load_from_path(path: &Path) -> anyhow::Result<Self> {
        let contents = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("toml");
        let mut config: Config = match ext {
            "json" => serde_json::from_str(&contents).context("Failed to parse JSON config")?,
            _ => toml::from_str(&contents).context("Failed to parse TOML config")?,
        };

        config.source_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Get the base directory for resolving relative paths.
    /// Returns the config file's parent directory if available, otherwise None.
    pub fn base_dir(&self) -> Option<PathBuf> {
        self.source_path
            .as_ref()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
    }

    /// Check target pages map one-to-one onto output files.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.pages.is_empty() {
            anyhow::bail!("No target pages configured");
        }
        let mut seen = HashSet::new();
        for page in &self.pages {
            let name = page.name.as_str();
            if name.trim().is_empty() {
                anyhow::bail!("Target page with path '{}' has an empty name", page.path);
            }
            if name.contains(['/', '\\']) || name == "." || name == ".." {
                anyhow::bail!("Target page name '{}' must be a plain file stem", name);
            }
            if !seen.insert(name) {
                anyhow::bail!("Duplicate target page name '{}'", name);
            }
        }
        Ok(())
    }
}

/// Validated runtime settings.
#[derive(Debug, Clone)]
pub struct Settings {
    pub base_url: Url,
    pub pages: Vec<TargetPage>,
    pub output_dir: PathBuf,
    pub selectors: Selectors,
    pub expand: ExpandSettings,
    pub browser: BrowserEngineConfig,
}

impl Settings {
    /// Build settings from a config, resolving relative paths against `base_dir`.
    pub fn from_config(config: Config, base_dir: &Path) -> anyhow::Result<Self> {
        config.validate()?;

        let base_url = Url::parse(&config.base_url)
            .with_context(|| format!("Invalid base URL '{}'", config.base_url))?;
        let output_dir = if config.output_dir.is_absolute() {
            config.output_dir
        } else {
            base_dir.join(config.output_dir)
        };

        Ok(Self {
            base_url,
            pages: config.pages,
            output_dir,
            selectors: config.selectors,
            expand: config.expand,
            browser: config.browser,
        })
    }

    /// Keep only the named pages, preserving configured order.
    pub fn select_pages(&mut self, names: &[String]) -> anyhow::Result<()> {
        if names.is_empty() {
            return Ok(());
        }
        for name in names {
            if !self.pages.iter().any(|p| &p.name == name) {
                anyhow::bail!("Unknown target page '{}'", name);
            }
        }
        self.pages.retain(|p| names.contains(&p.name));
        Ok(())
    }
}

/// Options controlling where settings come from.
#[derive(Debug, Default)]
pub struct LoadOptions {
    /// Explicit config file.
    pub config_path: Option<PathBuf>,
    /// Resolve relative paths from the working directory instead of the
    /// config file location.
    pub use_cwd: bool,
}

/// Load settings with explicit options.
pub async fn load_settings_with_options(options: LoadOptions) -> anyhow::Result<Settings> {
    let mut config = match &options.config_path {
        Some(path) => Config::load_from_path(path).await?,
        None => Config::default(),
    };

    // Environment variable takes precedence over the file
    if let Some(base_url) = std::env::var(BASE_URL_ENV).ok().filter(|s| !s.is_empty()) {
        tracing::debug!("Using {} from environment: {}", BASE_URL_ENV, base_url);
        config.base_url = base_url;
    }

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let base_dir = if options.use_cwd {
        cwd
    } else {
        config.base_dir().unwrap_or(cwd)
    };

    Settings::from_config(config, &base_dir)
}
