//! Chrome-backed browser session.
//!
//! Uses chromiumoxide (CDP) to drive a single tab that is reused for every
//! target page. Launches a local Chrome/Chromium or attaches to a remote
//! DevTools endpoint.

mod config;
#[cfg(feature = "browser")]
mod element;

pub use config::BrowserEngineConfig;
#[cfg(feature = "browser")]
pub use element::ChromeElement;

#[cfg(feature = "browser")]
use std::path::PathBuf;
#[cfg(feature = "browser")]
use std::time::Duration;

#[cfg(feature = "browser")]
use anyhow::{Context, Result};
#[cfg(feature = "browser")]
use tokio::task::JoinHandle;
#[cfg(feature = "browser")]
use tracing::{debug, info, warn};

#[cfg(feature = "browser")]
use chromiumoxide::handler::{Handler, HandlerConfig};
#[cfg(feature = "browser")]
use chromiumoxide::{Browser, BrowserConfig, Page};
#[cfg(feature = "browser")]
use futures::StreamExt;

/// A live browser with one open tab.
#[cfg(feature = "browser")]
pub struct ChromeSession {
    pub(crate) browser: Browser,
    pub(crate) page: Page,
    handler: JoinHandle<()>,
    remote: bool,
    closed: bool,
}

#[cfg(feature = "browser")]
impl ChromeSession {
    /// Common Chrome executable paths to check.
    const CHROME_PATHS: &'static [&'static str] = &[
        // Linux
        "/usr/bin/google-chrome",
        "/usr/bin/google-chrome-stable",
        "/usr/bin/chromium",
        "/usr/bin/chromium-browser",
        "/snap/bin/chromium",
        // macOS
        "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
        "/Applications/Chromium.app/Contents/MacOS/Chromium",
        // Common install locations
        "/opt/google/chrome/google-chrome",
    ];

    /// Launch or connect to a browser and open the working tab.
    pub async fn start(config: &BrowserEngineConfig) -> Result<Self> {
        let (browser, handler, remote) = match config.remote_url.as_deref() {
            Some(url) => {
                let (browser, handler) = Self::connect_remote(url, config).await?;
                (browser, handler, true)
            }
            None => {
                let (browser, handler) = Self::launch(config).await?;
                (browser, handler, false)
            }
        };

        let handler = spawn_handler(handler);
        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                handler.abort();
                return Err(e).context("Failed to open browser tab");
            }
        };

        Ok(Self {
            browser,
            page,
            handler,
            remote,
            closed: false,
        })
    }

    /// Find Chrome executable.
    fn find_chrome(config: &BrowserEngineConfig) -> Result<PathBuf> {
        if let Some(path) = &config.executable {
            if path.exists() {
                return Ok(path.clone());
            }
            anyhow::bail!("Configured Chrome executable not found: {}", path.display());
        }

        for path in Self::CHROME_PATHS {
            let p = std::path::Path::new(path);
            if p.exists() {
                info!("Found Chrome at: {}", path);
                return Ok(p.to_path_buf());
            }
        }

        for cmd in [
            "google-chrome",
            "google-chrome-stable",
            "chromium",
            "chromium-browser",
        ] {
            if let Ok(path) = which::which(cmd) {
                info!("Found Chrome in PATH: {}", path.display());
                return Ok(path);
            }
        }

        Err(anyhow::anyhow!(
            "Chrome/Chromium not found. Please install it:\n\
             - Arch/Manjaro: sudo pacman -S chromium\n\
             - Ubuntu/Debian: sudo apt install chromium-browser\n\
             - Fedora: sudo dnf install chromium\n\
             - Or download from: https://www.google.com/chrome/"
        ))
    }

    async fn launch(config: &BrowserEngineConfig) -> Result<(Browser, Handler)> {
        info!("Launching browser (headless={})", config.headless);

        let chrome_path = Self::find_chrome(config)?;
        let mut builder = BrowserConfig::builder()
            .chrome_executable(chrome_path)
            .request_timeout(Duration::from_secs(config.timeout));

        // with_head means NOT headless
        if !config.headless {
            builder = builder.with_head();
        }

        builder = builder
            .arg("--log-level=3")
            .arg("--silent")
            .arg("--disable-infobars")
            .arg("--disable-dev-shm-usage")
            .arg("--no-first-run")
            .arg("--no-default-browser-check")
            .arg("--disable-background-networking")
            .arg("--disable-sync")
            .arg("--disable-translate")
            .arg("--no-sandbox") // Often needed for headless in containers
            .arg("--disable-gpu");

        for arg in &config.chrome_args {
            builder = builder.arg(arg);
        }

        let browser_config = builder
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build browser config: {}", e))?;

        Browser::launch(browser_config)
            .await
            .context("Failed to launch browser")
    }

    /// Connect to a remote Chrome instance.
    async fn connect_remote(url: &str, config: &BrowserEngineConfig) -> Result<(Browser, Handler)> {
        info!(
            "Connecting to remote browser at {} (timeout: {}s)",
            url, config.timeout
        );

        let ws_url = resolve_ws_url(url).await?;
        info!("Connecting to WebSocket: {}", ws_url);

        let handler_config = HandlerConfig {
            request_timeout: Duration::from_secs(config.timeout),
            ..Default::default()
        };

        Browser::connect_with_config(ws_url, handler_config)
            .await
            .context("Failed to connect to remote browser")
    }

    /// Shut the session down. Safe to call more than once.
    pub async fn shutdown(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;

        if self.remote {
            // Leave a shared remote browser running; only drop our tab.
            if let Err(e) = self.page.clone().close().await {
                warn!("Failed to close remote tab: {}", e);
            }
        } else {
            self.browser
                .close()
                .await
                .context("Failed to close browser")?;
            if let Err(e) = self.browser.wait().await {
                warn!("Browser process did not exit cleanly: {}", e);
            }
        }
        self.handler.abort();
        debug!("Browser session closed");
        Ok(())
    }
}

#[cfg(feature = "browser")]
impl Drop for ChromeSession {
    fn drop(&mut self) {
        if !self.closed {
            self.handler.abort();
        }
    }
}

/// Drive the CDP event loop until the connection ends.
#[cfg(feature = "browser")]
fn spawn_handler(mut handler: Handler) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(h) = handler.next().await {
            if h.is_err() {
                break;
            }
        }
    })
}

/// Get the WebSocket URL from the endpoint's /json/version document.
#[cfg(feature = "browser")]
async fn resolve_ws_url(url: &str) -> Result<String> {
    if url.contains("/devtools/browser/") {
        return Ok(url.to_string());
    }

    let http_url = url
        .replace("ws://", "http://")
        .replace("wss://", "https://");
    let version_url = format!("{}/json/version", http_url.trim_end_matches('/'));

    let client = reqwest::Client::new();
    let resp: serde_json::Value = client
        .get(&version_url)
        .send()
        .await
        .context("Failed to connect to remote browser")?
        .json()
        .await
        .context("Failed to parse browser version info")?;

    resp.get("webSocketDebuggerUrl")
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .ok_or_else(|| anyhow::anyhow!("No webSocketDebuggerUrl in response"))
}
