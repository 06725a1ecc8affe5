//! Getter methods for `ScrapeConfig`

use std::path::PathBuf;
use std::time::Duration;

use super::types::{Delays, RetryPolicy, ScrapeConfig, ScrollPolicy};
use crate::extract::{CompiledSelectors, SiteSelectors};
use crate::utils::CANDIDATE_BUDGET_FACTOR;

impl ScrapeConfig {
    #[must_use]
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    #[must_use]
    pub fn target_products(&self) -> usize {
        self.target_products
    }

    /// Most candidates a run may check given `available` discovered candidates
    #[must_use]
    pub fn candidate_budget(&self, available: usize) -> usize {
        available.min(self.target_products.saturating_mul(CANDIDATE_BUDGET_FACTOR))
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn headless(&self) -> bool {
        self.headless
    }

    #[must_use]
    pub fn page_load_timeout(&self) -> Duration {
        Duration::from_secs(self.page_load_timeout_secs)
    }

    #[must_use]
    pub fn delays(&self) -> &Delays {
        &self.delays
    }

    #[must_use]
    pub fn scroll(&self) -> &ScrollPolicy {
        &self.scroll
    }

    #[must_use]
    pub fn retry(&self) -> &RetryPolicy {
        &self.retry
    }

    #[must_use]
    pub fn selectors(&self) -> &SiteSelectors {
        &self.selectors
    }

    #[must_use]
    pub fn compiled_selectors(&self) -> &CompiledSelectors {
        &self.compiled_selectors
    }

    #[must_use]
    pub fn chrome_data_dir(&self) -> Option<&PathBuf> {
        self.chrome_data_dir.as_ref()
    }
}
