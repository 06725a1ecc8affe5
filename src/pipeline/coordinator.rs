//! Pipeline coordinator: one full run over one fresh browser session
//!
//! Discovers candidates, then probes and harvests them in discovery order until
//! either the target number of products with reviews is reached or the
//! candidate budget is spent.

use tracing::{info, warn};

use super::discovery::discover;
use super::harvester::{harvest, probe};
use super::progress::ProgressReporter;
use super::types::{Candidate, ReviewRecord, ReviewTable, RunOutcome, RunStats};
use crate::config::ScrapeConfig;
use crate::errors::{NavigationError, ScrapeError};
use crate::navigator::Navigator;
use crate::session::{PageDriver, SessionLauncher};

/// Run the pipeline once with a session from `launcher`.
///
/// The session is shut down before returning on every path, including a lost
/// session or an empty search.
pub async fn run_once<L, P>(launcher: &L, config: &ScrapeConfig, progress: &P) -> RunOutcome
where
    L: SessionLauncher,
    P: ProgressReporter + ?Sized,
{
    let driver = match launcher.launch().await {
        Ok(driver) => driver,
        Err(e) => {
            progress.report_error(&e.to_string());
            return RunOutcome::Failed(e);
        }
    };

    let mut navigator = Navigator::new(driver, config.page_load_timeout());
    let outcome = collect(&mut navigator, config, progress).await;

    navigator.into_driver().shutdown().await;
    outcome
}

/// Drive discovery and harvesting over an already-open session
pub async fn collect<D, P>(
    navigator: &mut Navigator<D>,
    config: &ScrapeConfig,
    progress: &P,
) -> RunOutcome
where
    D: PageDriver,
    P: ProgressReporter + ?Sized,
{
    let candidates = match discover(navigator, config).await {
        Ok(candidates) => candidates,
        Err(e) => return session_lost(e, progress),
    };

    if candidates.is_empty() {
        return RunOutcome::NoCandidates;
    }

    let target = config.target_products();
    let mut stats = RunStats {
        discovered: candidates.len(),
        budget: config.candidate_budget(candidates.len()),
        ..RunStats::default()
    };
    progress.report_candidates_discovered(stats.discovered, stats.budget);

    let mut table = ReviewTable::new();
    for candidate in candidates {
        if stats.checked >= stats.budget || stats.scraped >= target {
            break;
        }
        stats.checked += 1;
        progress.report_candidate_checked(stats.checked, stats.budget, candidate.as_str());

        let records = match check_candidate(navigator, config, candidate).await {
            Ok(records) => records,
            Err(e) => return session_lost(e, progress),
        };

        if let Some(first) = records.first() {
            stats.scraped += 1;
            progress.report_product_scraped(first.product_name(), records.len(), stats.scraped, target);
            table.append(records);
        }

        navigator.settle(config.delays().between_candidates).await;
    }

    info!(
        "Checked {} of {} candidates, {} products with reviews",
        stats.checked, stats.discovered, stats.scraped
    );

    if table.is_empty() {
        RunOutcome::Exhausted(stats)
    } else {
        RunOutcome::Collected { table, stats }
    }
}

async fn check_candidate<D: PageDriver>(
    navigator: &mut Navigator<D>,
    config: &ScrapeConfig,
    candidate: Candidate,
) -> Result<Vec<ReviewRecord>, NavigationError> {
    match probe(navigator, config, candidate).await? {
        Some(handle) => harvest(navigator, config, handle).await,
        None => Ok(Vec::new()),
    }
}

fn session_lost<P: ProgressReporter + ?Sized>(error: NavigationError, progress: &P) -> RunOutcome {
    warn!("Browser session lost, ending run: {}", error);
    progress.report_error(&error.to_string());
    RunOutcome::Failed(ScrapeError::Navigation(error))
}
