//! Page navigation over a single owned browser session
//!
//! Wraps a [`PageDriver`] with the load timeout, fixed settle waits and the
//! scroll-until-stable loop used to trigger lazily loaded review lists.

use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::ScrollPolicy;
use crate::errors::NavigationError;
use crate::extract::Document;
use crate::session::{PageDriver, with_page_timeout};

pub struct Navigator<D: PageDriver> {
    driver: D,
    page_load_timeout: Duration,
}

impl<D: PageDriver> Navigator<D> {
    pub fn new(driver: D, page_load_timeout: Duration) -> Self {
        Self {
            driver,
            page_load_timeout,
        }
    }

    /// Navigate to `url`, bounded by the page load timeout
    pub async fn open(&mut self, url: &str) -> Result<(), NavigationError> {
        debug!("Navigating to {}", url);
        with_page_timeout(self.driver.goto(url), self.page_load_timeout, url).await
    }

    /// Parse the page as currently rendered
    pub async fn current_document(&mut self) -> Result<Document, NavigationError> {
        let source = self.driver.page_source().await?;
        Ok(Document::parse(&source))
    }

    /// Fixed wait after a navigation
    pub async fn settle(&self, duration: Duration) {
        if !duration.is_zero() {
            tokio::time::sleep(duration).await;
        }
    }

    /// Scroll down until the document stops growing.
    ///
    /// Each step scrolls by `policy.step_px`, waits `policy.pause` and compares
    /// the new document height with the previous one. Stops on the first step
    /// that does not increase the height, after `policy.max_steps` steps, or
    /// when the driver fails. Returns the number of scroll steps performed.
    pub async fn scroll_to_stable(&mut self, policy: &ScrollPolicy) -> usize {
        let mut last_height = match self.driver.document_height().await {
            Ok(height) => height,
            Err(e) => {
                warn!("Could not read document height, skipping scroll: {}", e);
                return 0;
            }
        };

        let mut steps = 0;
        while steps < policy.max_steps {
            if let Err(e) = self.driver.scroll_by(policy.step_px).await {
                warn!("Scroll step {} failed: {}", steps + 1, e);
                break;
            }
            steps += 1;

            if !policy.pause.is_zero() {
                tokio::time::sleep(policy.pause).await;
            }

            let height = match self.driver.document_height().await {
                Ok(height) => height,
                Err(e) => {
                    warn!("Could not read document height after step {}: {}", steps, e);
                    break;
                }
            };

            if height <= last_height {
                debug!("Document height stable at {}px after {} steps", height, steps);
                break;
            }
            last_height = height;
        }

        if steps == policy.max_steps {
            info!("Reached scroll limit of {} steps", policy.max_steps);
        }
        steps
    }

    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    /// Give the session back, e.g. to shut it down
    pub fn into_driver(self) -> D {
        self.driver
    }
}
