//! The scraping pipeline
//!
//! Data flows strictly upward: the [`Navigator`](crate::navigator::Navigator)
//! feeds discovery and the harvester, the coordinator drives both over one
//! session, and the retry wrapper restarts whole runs.

pub mod coordinator;
pub mod discovery;
pub mod harvester;
pub mod progress;
pub mod retry;
pub mod types;

pub use coordinator::{collect, run_once};
pub use discovery::discover;
pub use harvester::{harvest, probe};
pub use progress::{NoOpProgress, ProgressReporter, TracingProgress};
pub use retry::{retry_runs, scrape_with_retry};
pub use types::{Candidate, ReviewRecord, ReviewTable, ReviewsHandle, RunOutcome, RunStats};
