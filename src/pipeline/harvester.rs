//! Review harvesting: probe a candidate, then collect its reviews

use tracing::{debug, info, warn};

use super::types::{Candidate, ReviewRecord, ReviewsHandle};
use crate::config::ScrapeConfig;
use crate::errors::NavigationError;
use crate::extract::{extract_product_details, extract_reviews, extract_reviews_link};
use crate::navigator::Navigator;
use crate::session::PageDriver;
use crate::utils::{is_valid_url, resolve_link};

/// Keep page-scoped failures local; only a lost session propagates
fn recover<T>(result: Result<T, NavigationError>, context: &str) -> Result<Option<T>, NavigationError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.is_fatal() => Err(e),
        Err(e) => {
            warn!("{}: {}", context, e);
            Ok(None)
        }
    }
}

/// Open the candidate's product page and look for a reviews affordance.
///
/// `Ok(None)` means the candidate has nothing to harvest: its link could not
/// be resolved to an http(s) URL, its page failed to load, or it has no "view all reviews" link.
pub async fn probe<D: PageDriver>(
    navigator: &mut Navigator<D>,
    config: &ScrapeConfig,
    candidate: Candidate,
) -> Result<Option<ReviewsHandle>, NavigationError> {
    let product_url = match resolve_link(config.base_url(), candidate.as_str()) {
        Ok(url) if is_valid_url(url.as_str()) => url,
        Ok(url) => {
            warn!("Skipping candidate with non-http link: {}", url);
            return Ok(None);
        }
        Err(e) => {
            warn!("Skipping candidate: {e:#}");
            return Ok(None);
        }
    };

    let opened = navigator.open(product_url.as_str()).await;
    if recover(opened, "Product page failed to load")?.is_none() {
        return Ok(None);
    }
    navigator.settle(config.delays().product_settle).await;

    let Some(document) = recover(
        navigator.current_document().await,
        "Could not read product page",
    )?
    else {
        return Ok(None);
    };

    let selectors = config.compiled_selectors();
    let product = extract_product_details(&document, selectors);
    let Some(href) = extract_reviews_link(&document, selectors) else {
        info!("No reviews section for {}", product_url);
        return Ok(None);
    };

    match resolve_link(config.base_url(), &href) {
        Ok(url) if is_valid_url(url.as_str()) => {
            debug!("Reviews for '{}' at {}", product.title.as_str(), url);
            Ok(Some(ReviewsHandle { product, url }))
        }
        Ok(url) => {
            warn!("Unusable reviews link on {}: {}", product_url, url);
            Ok(None)
        }
        Err(e) => {
            warn!("Unusable reviews link on {}: {e:#}", product_url);
            Ok(None)
        }
    }
}

/// Load the full reviews page, scroll until every review is rendered and
/// extract one record per review, in container order.
pub async fn harvest<D: PageDriver>(
    navigator: &mut Navigator<D>,
    config: &ScrapeConfig,
    handle: ReviewsHandle,
) -> Result<Vec<ReviewRecord>, NavigationError> {
    let opened = navigator.open(handle.url.as_str()).await;
    if recover(opened, "Reviews page failed to load")?.is_none() {
        return Ok(Vec::new());
    }

    let steps = navigator.scroll_to_stable(config.scroll()).await;
    debug!("Scrolled reviews page {} times", steps);

    let Some(document) = recover(
        navigator.current_document().await,
        "Could not read reviews page",
    )?
    else {
        return Ok(Vec::new());
    };

    let records: Vec<ReviewRecord> = extract_reviews(&document, config.compiled_selectors())
        .into_iter()
        .map(|review| ReviewRecord::from_parts(&handle.product, review))
        .collect();

    if records.is_empty() {
        info!("Reviews page for '{}' had no reviews", handle.product.title.as_str());
    }
    Ok(records)
}
