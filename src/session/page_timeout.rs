//! Timeout utilities for page operations
//!
//! Provides async timeout wrappers to prevent indefinite hangs during
//! page navigation.

use std::future::Future;
use std::time::Duration;

use crate::errors::NavigationError;

/// Wrap a navigation future with an explicit timeout
///
/// Distinguishes a timeout (`NavigationError::Timeout` for `url`) from a
/// failure reported by the operation itself, which is passed through.
pub async fn with_page_timeout<F, T>(
    operation: F,
    timeout: Duration,
    url: &str,
) -> Result<T, NavigationError>
where
    F: Future<Output = Result<T, NavigationError>>,
{
    match tokio::time::timeout(timeout, operation).await {
        Ok(result) => result,
        Err(_) => Err(NavigationError::Timeout {
            url: url.to_string(),
            secs: timeout.as_secs(),
        }),
    }
}
