pub mod analytics;
pub mod browser_setup;
pub mod config;
pub mod errors;
pub mod export;
pub mod extract;
pub mod navigator;
pub mod pipeline;
pub mod session;
pub mod utils;

pub use analytics::{LexiconScorer, ScoredReview, SentimentLabel, SentimentScorer, SentimentStats};
pub use browser_setup::{download_managed_browser, find_browser_executable, launch_browser};
pub use config::{Delays, RetryPolicy, ScrapeConfig, ScrapeConfigBuilder, ScrollPolicy};
pub use errors::{NavigationError, ScrapeError, ScrapeResult};
pub use extract::{Document, Extraction, Field, SiteSelectors};
pub use navigator::Navigator;
pub use pipeline::{
    Candidate, NoOpProgress, ProgressReporter, ReviewRecord, ReviewTable, RunOutcome, RunStats,
    TracingProgress, run_once, scrape_with_retry,
};
pub use session::{BrowserSession, ChromeLauncher, PageDriver, SessionLauncher};

/// Harvest reviews for `config` with a real browser, retrying whole runs
pub async fn harvest_reviews(config: &ScrapeConfig) -> RunOutcome {
    let launcher = ChromeLauncher::from_config(config);
    scrape_with_retry(&launcher, config, &TracingProgress).await
}
