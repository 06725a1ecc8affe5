//! Progress reporting abstraction for harvesting runs
//!
//! Defines the `ProgressReporter` trait for lifecycle event reporting
//! and provides a no-op and a tracing-backed implementation.

use tracing::{info, warn};

use super::types::RunOutcome;

/// Checked-candidate interval between "still searching" lines
pub const STILL_SEARCHING_INTERVAL: usize = 5;

/// Trait for reporting harvesting progress at key lifecycle events
pub trait ProgressReporter: Send + Sync {
    /// A pipeline run (attempt `attempt` of `max_attempts`) is starting
    fn report_attempt_started(&self, attempt: u32, max_attempts: u32);

    /// Discovery finished with `count` candidates, of which `budget` may be checked
    fn report_candidates_discovered(&self, count: usize, budget: usize);

    /// Candidate number `checked` (1-based) is being probed
    fn report_candidate_checked(&self, checked: usize, budget: usize, href: &str);

    /// A product contributed `reviews` records; `scraped` of `target` so far
    fn report_product_scraped(&self, product: &str, reviews: usize, scraped: usize, target: usize);

    /// A run ended with `outcome`
    fn report_attempt_finished(&self, attempt: u32, outcome: &RunOutcome);

    /// Report an error that occurred during a run
    fn report_error(&self, error: &str);
}

/// Progress reporter that does nothing
#[derive(Debug, Clone, Copy)]
pub struct NoOpProgress;

impl ProgressReporter for NoOpProgress {
    #[inline(always)]
    fn report_attempt_started(&self, _attempt: u32, _max_attempts: u32) {}

    #[inline(always)]
    fn report_candidates_discovered(&self, _count: usize, _budget: usize) {}

    #[inline(always)]
    fn report_candidate_checked(&self, _checked: usize, _budget: usize, _href: &str) {}

    #[inline(always)]
    fn report_product_scraped(&self, _product: &str, _reviews: usize, _scraped: usize, _target: usize) {}

    #[inline(always)]
    fn report_attempt_finished(&self, _attempt: u32, _outcome: &RunOutcome) {}

    #[inline(always)]
    fn report_error(&self, _error: &str) {}
}

/// Progress reporter that writes lifecycle events to `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingProgress;

impl ProgressReporter for TracingProgress {
    fn report_attempt_started(&self, attempt: u32, max_attempts: u32) {
        info!("Attempt {}/{}", attempt, max_attempts);
    }

    fn report_candidates_discovered(&self, count: usize, budget: usize) {
        info!("Found {} products, checking up to {}", count, budget);
    }

    fn report_candidate_checked(&self, checked: usize, budget: usize, _href: &str) {
        if checked % STILL_SEARCHING_INTERVAL == 0 {
            info!(
                "Still searching... checked {} of {} candidates",
                checked, budget
            );
        }
    }

    fn report_product_scraped(&self, product: &str, reviews: usize, scraped: usize, target: usize) {
        info!(
            "Scraped {} reviews for '{}' ({}/{} products)",
            reviews, product, scraped, target
        );
    }

    fn report_attempt_finished(&self, attempt: u32, outcome: &RunOutcome) {
        if outcome.is_collected() {
            info!("Attempt {} {}", attempt, outcome.describe());
        } else {
            warn!("Attempt {}: {}", attempt, outcome.describe());
        }
    }

    fn report_error(&self, error: &str) {
        warn!("{}", error);
    }
}
