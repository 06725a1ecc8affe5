//! Core configuration types for harvesting runs

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::extract::{CompiledSelectors, SiteSelectors};
use crate::utils::constants::{
    DEFAULT_MAX_ATTEMPTS, INTER_CANDIDATE_DELAY_MS, PRODUCT_SETTLE_MS, RETRY_BACKOFF_SECS,
    SCROLL_MAX_STEPS, SCROLL_PAUSE_MS, SCROLL_STEP_PX, SEARCH_SETTLE_MS,
};

/// Main configuration struct for a harvesting run
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    /// Free-text search term, trimmed and validated non-empty
    pub(crate) search_term: String,
    /// Products with reviews to collect (1..=10)
    pub(crate) target_products: usize,
    /// Storefront root every relative link resolves against
    pub(crate) base_url: String,
    pub(crate) headless: bool,
    pub(crate) page_load_timeout_secs: u64,
    pub(crate) delays: Delays,
    pub(crate) scroll: ScrollPolicy,
    pub(crate) retry: RetryPolicy,
    pub(crate) selectors: SiteSelectors,

    /// Compiled from `selectors` at build time to keep parsing out of the hot path
    pub(crate) compiled_selectors: CompiledSelectors,

    /// Directory under which per-session Chrome profiles are created.
    /// Defaults to the system temp directory.
    pub(crate) chrome_data_dir: Option<PathBuf>,
}

/// Fixed waits inserted by the pipeline
///
/// These are deliberate throughput ceilings, not adaptive waits. Tests use
/// [`Delays::none`] so pipeline logic runs without sleeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delays {
    /// Settle time after loading the search results page
    pub search_settle: Duration,
    /// Settle time after loading a product page
    pub product_settle: Duration,
    /// Wait after every checked candidate
    pub between_candidates: Duration,
}

impl Delays {
    #[must_use]
    pub const fn none() -> Self {
        Self {
            search_settle: Duration::ZERO,
            product_settle: Duration::ZERO,
            between_candidates: Duration::ZERO,
        }
    }
}

impl Default for Delays {
    fn default() -> Self {
        Self {
            search_settle: Duration::from_millis(SEARCH_SETTLE_MS),
            product_settle: Duration::from_millis(PRODUCT_SETTLE_MS),
            between_candidates: Duration::from_millis(INTER_CANDIDATE_DELAY_MS),
        }
    }
}

/// Incremental scroll-to-load policy for lazy review lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrollPolicy {
    pub max_steps: usize,
    pub pause: Duration,
    pub step_px: u32,
}

impl ScrollPolicy {
    /// Same step budget, no pause between steps
    #[must_use]
    pub const fn without_pause(self) -> Self {
        Self {
            pause: Duration::ZERO,
            ..self
        }
    }
}

impl Default for ScrollPolicy {
    fn default() -> Self {
        Self {
            max_steps: SCROLL_MAX_STEPS,
            pause: Duration::from_millis(SCROLL_PAUSE_MS),
            step_px: SCROLL_STEP_PX,
        }
    }
}

/// Whole-run retry policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Total attempts including the first one
    pub max_attempts: u32,
    /// Wait before each retry
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            backoff: Duration::from_secs(RETRY_BACKOFF_SECS),
        }
    }
}
