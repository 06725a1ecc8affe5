//! Whole-run retry with a fixed backoff

use std::future::Future;
use tracing::info;

use super::coordinator::run_once;
use super::progress::ProgressReporter;
use super::types::RunOutcome;
use crate::config::{RetryPolicy, ScrapeConfig};
use crate::session::SessionLauncher;

/// Run the pipeline until it collects reviews or attempts run out.
///
/// Every attempt launches a brand-new session. Returns the first
/// [`RunOutcome::Collected`], or the outcome of the last attempt.
pub async fn scrape_with_retry<L, P>(launcher: &L, config: &ScrapeConfig, progress: &P) -> RunOutcome
where
    L: SessionLauncher,
    P: ProgressReporter + ?Sized,
{
    retry_runs(config.retry(), progress, move |_attempt| {
        run_once(launcher, config, progress)
    })
    .await
}

/// Retry loop behind [`scrape_with_retry`], generic over the run itself.
///
/// Anything other than `Collected` counts as a failed attempt. The backoff is
/// only slept when another attempt follows.
pub async fn retry_runs<F, Fut, P>(policy: &RetryPolicy, progress: &P, mut run: F) -> RunOutcome
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = RunOutcome>,
    P: ProgressReporter + ?Sized,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1;

    loop {
        progress.report_attempt_started(attempt, max_attempts);
        let outcome = run(attempt).await;
        progress.report_attempt_finished(attempt, &outcome);

        if outcome.is_collected() || attempt >= max_attempts {
            return outcome;
        }

        if !policy.backoff.is_zero() {
            info!("Retrying in {}s", policy.backoff.as_secs());
            tokio::time::sleep(policy.backoff).await;
        }
        attempt += 1;
    }
}
