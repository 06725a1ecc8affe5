//! Product discovery: search term to ordered candidates

use tracing::{info, warn};

use super::types::Candidate;
use crate::config::ScrapeConfig;
use crate::errors::NavigationError;
use crate::extract::extract_result_links;
use crate::navigator::Navigator;
use crate::session::PageDriver;
use crate::utils::search_url;

/// Search the storefront for the configured term.
///
/// Returns every candidate link from the results list in document order. A
/// missing results list or a page-scoped navigation failure yields an empty
/// list; only a lost session is returned as an error.
pub async fn discover<D: PageDriver>(
    navigator: &mut Navigator<D>,
    config: &ScrapeConfig,
) -> Result<Vec<Candidate>, NavigationError> {
    let url = match search_url(config.base_url(), config.search_term()) {
        Ok(url) => url,
        Err(e) => {
            warn!("Could not build search URL: {e:#}");
            return Ok(Vec::new());
        }
    };

    info!("Searching for '{}' at {}", config.search_term(), url);
    if let Err(e) = navigator.open(url.as_str()).await {
        if e.is_fatal() {
            return Err(e);
        }
        warn!("Search page failed to load: {}", e);
        return Ok(Vec::new());
    }
    navigator.settle(config.delays().search_settle).await;

    let document = match navigator.current_document().await {
        Ok(document) => document,
        Err(e) if e.is_fatal() => return Err(e),
        Err(e) => {
            warn!("Could not read search results: {}", e);
            return Ok(Vec::new());
        }
    };

    let candidates: Vec<Candidate> = extract_result_links(&document, config.compiled_selectors())
        .into_iter()
        .map(Candidate::new)
        .collect();

    if candidates.is_empty() {
        warn!("No product links found for '{}'", config.search_term());
    }
    Ok(candidates)
}
