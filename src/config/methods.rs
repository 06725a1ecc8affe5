//! Builder methods available for all states
//!
//! This module contains methods that can be called on the builder
//! regardless of its current type state.

use std::path::PathBuf;

use super::builder::ScrapeConfigBuilder;
use super::types::{Delays, RetryPolicy, ScrollPolicy};
use crate::extract::SiteSelectors;

impl<State> ScrapeConfigBuilder<State> {
    /// Number of products with at least one review to collect (1..=10)
    #[must_use]
    pub fn target_products(mut self, count: usize) -> Self {
        self.target_products = count;
        self
    }

    /// Storefront root, e.g. `https://www.myntra.com`
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Run the browser without a visible window (default: true)
    ///
    /// Execution mode only; the harvested table is the same either way.
    #[must_use]
    pub fn headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Navigation timeout for a single page load
    #[must_use]
    pub fn page_load_timeout_secs(mut self, secs: u64) -> Self {
        self.page_load_timeout_secs = secs;
        self
    }

    #[must_use]
    pub fn delays(mut self, delays: Delays) -> Self {
        self.delays = delays;
        self
    }

    #[must_use]
    pub fn scroll(mut self, scroll: ScrollPolicy) -> Self {
        self.scroll = scroll;
        self
    }

    #[must_use]
    pub fn retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Replace the markup strategy
    #[must_use]
    pub fn selectors(mut self, selectors: SiteSelectors) -> Self {
        self.selectors = selectors;
        self
    }

    /// Parent directory for per-session Chrome profiles
    #[must_use]
    pub fn chrome_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.chrome_data_dir = Some(dir.into());
        self
    }

    /// Remove every fixed wait: settle times, inter-candidate delay, scroll
    /// pause and retry backoff. Step and attempt budgets are unchanged.
    #[must_use]
    pub fn without_delays(mut self) -> Self {
        self.delays = Delays::none();
        self.scroll = self.scroll.without_pause();
        self.retry.backoff = std::time::Duration::ZERO;
        self
    }
}
