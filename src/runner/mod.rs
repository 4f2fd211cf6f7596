mod driver;
mod flow;

pub use driver::{Driver, PageDriver};

use crate::config::{BrowserConfig, Config};
use crate::Result;
use eoka::Browser;
use serde::Serialize;
use std::time::{Instant, SystemTime, UNIX_EPOCH};
use tracing::{debug, info, warn};

/// Result of a sync run.
#[derive(Debug, Serialize)]
pub struct SyncReport {
    /// Whether the run succeeded.
    pub success: bool,
    /// Error message if failed.
    pub error: Option<String>,
    /// Number of mirrors synced.
    pub repos_synced: usize,
    /// Number of mirrors configured.
    pub repos_total: usize,
    /// Total duration in milliseconds.
    pub duration_ms: u64,
}

/// Drives the login-and-sync flow against one browser window.
pub struct Runner {
    browser: Browser,
    driver: PageDriver,
}

impl Runner {
    /// Launch a browser from the config.
    pub async fn new(config: &BrowserConfig) -> Result<Self> {
        let stealth = eoka::StealthConfig {
            headless: config.headless,
            proxy: config.proxy.clone(),
            user_agent: config.user_agent.clone(),
            viewport_width: config.viewport.as_ref().map(|v| v.width).unwrap_or(1360),
            viewport_height: config.viewport.as_ref().map(|v| v.height).unwrap_or(768),
            ..Default::default()
        };

        debug!(
            "launching browser (headless: {}, proxy: {:?})",
            config.headless, config.proxy
        );
        let browser = Browser::launch_with_config(stealth).await?;
        let page = browser.new_page("about:blank").await?;

        Ok(Self {
            browser,
            driver: PageDriver::new(page),
        })
    }

    /// Access the driver (for custom steps around a run).
    pub fn driver(&self) -> &PageDriver {
        &self.driver
    }

    /// Log in, confirm the login, and sync every configured mirror.
    ///
    /// Flow failures are captured into the report (after the optional
    /// failure screenshot) rather than propagated, so the caller decides
    /// the exit code.
    pub async fn run(&mut self, config: &Config) -> Result<SyncReport> {
        let start = Instant::now();
        let repos_total = config.repos.len();

        match self.run_flow(config).await {
            Ok(synced) => {
                info!("synced {}/{} mirrors", synced, repos_total);
                Ok(SyncReport {
                    success: true,
                    error: None,
                    repos_synced: synced,
                    repos_total,
                    duration_ms: start.elapsed().as_millis() as u64,
                })
            }
            Err(e) => {
                warn!("run failed: {}", e);
                self.handle_failure(config).await;
                Ok(SyncReport {
                    success: false,
                    error: Some(e.to_string()),
                    repos_synced: 0,
                    repos_total,
                    duration_ms: start.elapsed().as_millis() as u64,
                })
            }
        }
    }

    async fn run_flow(&self, config: &Config) -> Result<usize> {
        flow::log_in(&self.driver, config).await?;
        flow::confirm_login(&self.driver, config).await?;
        flow::sync_all(&self.driver, config).await
    }

    async fn handle_failure(&self, config: &Config) {
        let Some(ref on_failure) = config.on_failure else {
            return;
        };
        let Some(ref screenshot_path) = on_failure.screenshot else {
            return;
        };

        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        let path = screenshot_path.replace("{timestamp}", &timestamp.to_string());
        info!("saving failure screenshot to: {}", path);
        match self.driver.screenshot().await {
            Ok(data) => {
                if let Err(e) = std::fs::write(&path, data) {
                    warn!("failed to save screenshot: {}", e);
                }
            }
            Err(e) => warn!("failed to capture screenshot: {}", e),
        }
    }

    /// Close the browser.
    pub async fn close(self) -> Result<()> {
        self.browser.close().await?;
        Ok(())
    }
}
