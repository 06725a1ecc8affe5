//! Chromiumoxide-backed browser session
//!
//! Handles launching a stealth-configured Chrome with a single page and
//! guarantees the process, its CDP handler task and its profile directory are
//! released when the session ends.

use chromiumoxide::browser::Browser;
use chromiumoxide::page::Page;
use std::path::PathBuf;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::{PageDriver, SessionLauncher};
use crate::browser_setup::{install_stealth_scripts, launch_browser};
use crate::errors::{NavigationError, ScrapeError};

/// One browser process with one page
///
/// Dropping the session aborts the handler task and removes the profile
/// directory; `Browser::drop()` kills the Chrome process. Prefer
/// [`PageDriver::shutdown`], which closes Chrome gracefully first.
pub struct BrowserSession {
    browser: Browser,
    page: Page,
    handler: JoinHandle<()>,
    user_data_dir: Option<PathBuf>,
}

impl BrowserSession {
    /// Clean up the profile directory (blocking operation)
    ///
    /// MUST be called AFTER `browser.wait()` completes to ensure Chrome
    /// has released all file handles.
    fn cleanup_temp_dir(&mut self) {
        if let Some(path) = self.user_data_dir.take() {
            debug!("Cleaning up profile directory: {}", path.display());
            if let Err(e) = std::fs::remove_dir_all(&path) {
                warn!(
                    "Failed to clean up profile directory {}: {}. Manual cleanup may be required.",
                    path.display(),
                    e
                );
            }
        }
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        self.handler.abort();

        if self.user_data_dir.is_some() {
            warn!("BrowserSession dropped without shutdown - removing profile directory in Drop");
            self.cleanup_temp_dir();
        }
    }
}

impl PageDriver for BrowserSession {
    async fn goto(&mut self, url: &str) -> Result<(), NavigationError> {
        self.page
            .goto(url)
            .await
            .map_err(|e| NavigationError::from_driver(url, e))?;
        self.page
            .wait_for_navigation()
            .await
            .map_err(|e| NavigationError::from_driver(url, e))?;
        Ok(())
    }

    async fn page_source(&mut self) -> Result<String, NavigationError> {
        let url = current_url(&self.page).await;
        self.page
            .content()
            .await
            .map_err(|e| NavigationError::from_driver(&url, e))
    }

    async fn scroll_by(&mut self, px: u32) -> Result<(), NavigationError> {
        let url = current_url(&self.page).await;
        let script = format!("window.scrollBy(0, {px});");
        self.page
            .evaluate(script.as_str())
            .await
            .map_err(|e| NavigationError::from_driver(&url, e))?;
        Ok(())
    }

    async fn document_height(&mut self) -> Result<u64, NavigationError> {
        let url = current_url(&self.page).await;
        self.page
            .evaluate("document.body.scrollHeight")
            .await
            .map_err(|e| NavigationError::from_driver(&url, e))?
            .into_value::<u64>()
            .map_err(|e| NavigationError::from_driver(&url, e))
    }

    async fn shutdown(mut self) {
        info!("Shutting down browser session");

        if let Err(e) = self.browser.close().await {
            warn!("Failed to close browser cleanly: {}", e);
        }

        // Wait for process to fully exit before touching the profile directory
        if let Err(e) = self.browser.wait().await {
            warn!("Failed to wait for browser exit: {}", e);
        }

        self.cleanup_temp_dir();
    }
}

/// Page URL for diagnostics; `about:blank` when unknown
async fn current_url(page: &Page) -> String {
    match page.url().await {
        Ok(Some(url)) => url,
        _ => "about:blank".to_string(),
    }
}

/// Launches a fresh [`BrowserSession`] with its own throwaway profile
#[derive(Debug, Clone)]
pub struct ChromeLauncher {
    headless: bool,
    profile_root: PathBuf,
    request_timeout: Duration,
}

impl ChromeLauncher {
    #[must_use]
    pub fn new(headless: bool, profile_root: Option<PathBuf>, request_timeout: Duration) -> Self {
        Self {
            headless,
            profile_root: profile_root.unwrap_or_else(std::env::temp_dir),
            request_timeout,
        }
    }

    /// Build a launcher from the run configuration
    #[must_use]
    pub fn from_config(config: &crate::config::ScrapeConfig) -> Self {
        Self::new(
            config.headless(),
            config.chrome_data_dir().cloned(),
            config.page_load_timeout(),
        )
    }
}

impl SessionLauncher for ChromeLauncher {
    type Driver = BrowserSession;

    async fn launch(&self) -> Result<BrowserSession, ScrapeError> {
        // Unique per session so back-to-back attempts never share a locked profile
        let user_data_dir = self
            .profile_root
            .join(format!("review_harvester_chrome_{}", uuid::Uuid::new_v4()));

        let (mut browser, handler) =
            launch_browser(self.headless, &user_data_dir, self.request_timeout)
                .await
                .map_err(|e| ScrapeError::SessionInit(format!("{e:#}")))?;

        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                let _ = browser.close().await;
                let _ = browser.wait().await;
                handler.abort();
                let _ = std::fs::remove_dir_all(&user_data_dir);
                return Err(ScrapeError::SessionInit(format!(
                    "Failed to create blank page: {e}"
                )));
            }
        };

        if let Err(e) = install_stealth_scripts(&page).await {
            // Stealth failure shouldn't block the run
            warn!("Failed to install stealth overrides: {e:#}");
        }

        info!("Browser session ready (profile: {})", user_data_dir.display());
        Ok(BrowserSession {
            browser,
            page,
            handler,
            user_data_dir: Some(user_data_dir),
        })
    }
}
