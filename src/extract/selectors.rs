//! CSS selectors for storefront page parsing.
//!
//! The storefront's markup changes without notice, so selectors are data, not
//! code: [`SiteSelectors`] can be loaded from JSON and is compiled once when the
//! configuration is built.
//!
//! **Update process**: when a field starts coming back as its sentinel for
//! every review, capture the page HTML, update the selector, and add a fixture.

use anyhow::{Result, anyhow};
use scraper::Selector;
use serde::{Deserialize, Serialize};

/// Selector strings for every page the pipeline reads
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSelectors {
    /// Search results list; every anchor inside is a candidate
    pub results_container: String,
    /// Candidate anchor within the results list
    pub result_link: String,

    /// Product name, read from the first match
    pub product_title: String,
    /// Overall rating block; the last block on the page wins
    pub overall_rating: String,
    /// Value node inside the overall rating block
    pub overall_rating_value: String,
    /// Price node; the last match on the page wins
    pub price: String,
    /// "View all reviews" affordance carrying the reviews page href
    pub all_reviews_link: String,

    /// Container holding a run of user reviews
    pub review_container: String,
    /// Per-review rating block inside a container
    pub review_rating: String,
    /// Star value inside a rating block
    pub review_star: String,
    /// Per-review comment text inside a container
    pub review_comment: String,
    /// Per-review footer holding reviewer name then date
    pub review_meta: String,
    /// Parts inside the footer (first = reviewer, second = date)
    pub review_meta_part: String,
}

impl Default for SiteSelectors {
    fn default() -> Self {
        Self {
            results_container: "ul.results-base".to_string(),
            result_link: "a[href]".to_string(),
            product_title: "title".to_string(),
            overall_rating: "div.index-overallRating".to_string(),
            overall_rating_value: "div".to_string(),
            price: "span.pdp-price".to_string(),
            all_reviews_link: "a.detailed-reviews-allReviews".to_string(),
            review_container: "div.detailed-reviews-userReviewsContainer".to_string(),
            review_rating: "div.user-review-main.user-review-showRating".to_string(),
            review_star: "span.user-review-starRating".to_string(),
            review_comment: "div.user-review-reviewTextWrapper".to_string(),
            review_meta: "div.user-review-left".to_string(),
            review_meta_part: "span".to_string(),
        }
    }
}

impl SiteSelectors {
    /// Compile every selector, failing on the first one that does not parse.
    pub fn compile(&self) -> Result<CompiledSelectors> {
        Ok(CompiledSelectors {
            results_container: parse_selector("results_container", &self.results_container)?,
            result_link: parse_selector("result_link", &self.result_link)?,
            product_title: parse_selector("product_title", &self.product_title)?,
            overall_rating: parse_selector("overall_rating", &self.overall_rating)?,
            overall_rating_value: parse_selector(
                "overall_rating_value",
                &self.overall_rating_value,
            )?,
            price: parse_selector("price", &self.price)?,
            all_reviews_link: parse_selector("all_reviews_link", &self.all_reviews_link)?,
            review_container: parse_selector("review_container", &self.review_container)?,
            review_rating: parse_selector("review_rating", &self.review_rating)?,
            review_star: parse_selector("review_star", &self.review_star)?,
            review_comment: parse_selector("review_comment", &self.review_comment)?,
            review_meta: parse_selector("review_meta", &self.review_meta)?,
            review_meta_part: parse_selector("review_meta_part", &self.review_meta_part)?,
        })
    }
}

fn parse_selector(name: &str, css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| anyhow!("Invalid selector for {name} '{css}': {e:?}"))
}

/// Pre-compiled form of [`SiteSelectors`]
#[derive(Debug, Clone)]
pub struct CompiledSelectors {
    pub(crate) results_container: Selector,
    pub(crate) result_link: Selector,
    pub(crate) product_title: Selector,
    pub(crate) overall_rating: Selector,
    pub(crate) overall_rating_value: Selector,
    pub(crate) price: Selector,
    pub(crate) all_reviews_link: Selector,
    pub(crate) review_container: Selector,
    pub(crate) review_rating: Selector,
    pub(crate) review_star: Selector,
    pub(crate) review_comment: Selector,
    pub(crate) review_meta: Selector,
    pub(crate) review_meta_part: Selector,
}
