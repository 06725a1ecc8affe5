//! Test utilities for the review harvester test suite
//!
//! A scripted in-memory storefront ([`FakeSite`]) served through a
//! [`FakeDriver`], plus HTML builders for search, product and review pages.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use review_harvester::config::ScrapeConfig;
use review_harvester::errors::{NavigationError, ScrapeError};
use review_harvester::session::{PageDriver, SessionLauncher};

pub const BASE: &str = "https://shop.test";

/// Absolute URL on the fake storefront
pub fn url(path: &str) -> String {
    format!("{BASE}/{}", path.trim_start_matches('/'))
}

/// Search results URL for `term` on the fake storefront
pub fn search_url(term: &str) -> String {
    review_harvester::utils::search_url(BASE, term)
        .expect("search url")
        .to_string()
}

/// Config pointed at the fake storefront with every wait removed
pub fn test_config(term: &str, products: usize) -> ScrapeConfig {
    ScrapeConfig::builder()
        .base_url(BASE)
        .target_products(products)
        .without_delays()
        .search_term(term)
        .build()
        .expect("valid test config")
}

// ============================================================================
// Fake storefront
// ============================================================================

#[derive(Debug, Clone)]
struct FakePage {
    html: String,
    /// Successive `document_height` readings; the last one repeats
    heights: Vec<u64>,
}

#[derive(Debug, Clone, Default)]
pub struct FakeSite {
    pages: HashMap<String, FakePage>,
    failing: HashMap<String, NavigationError>,
    slow: HashMap<String, Duration>,
    scroll_fails: bool,
}

impl FakeSite {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, url: impl Into<String>, html: impl Into<String>) -> Self {
        self.pages.insert(
            url.into(),
            FakePage {
                html: html.into(),
                heights: vec![1000],
            },
        );
        self
    }

    pub fn page_with_heights(
        mut self,
        url: impl Into<String>,
        html: impl Into<String>,
        heights: Vec<u64>,
    ) -> Self {
        self.pages.insert(
            url.into(),
            FakePage {
                html: html.into(),
                heights,
            },
        );
        self
    }

    /// Navigating to `url` fails with `error`
    pub fn failing(mut self, url: impl Into<String>, error: NavigationError) -> Self {
        self.failing.insert(url.into(), error);
        self
    }

    /// Navigating to `url` takes `delay` before completing
    pub fn slow(mut self, url: impl Into<String>, delay: Duration) -> Self {
        self.slow.insert(url.into(), delay);
        self
    }

    pub fn with_failing_scroll(mut self) -> Self {
        self.scroll_fails = true;
        self
    }

    pub fn driver(self) -> FakeDriver {
        FakeDriver::new(Arc::new(self), Counters::default())
    }
}

/// Shared counters observed by tests after a run
#[derive(Debug, Clone, Default)]
pub struct Counters {
    pub launches: Arc<AtomicUsize>,
    pub shutdowns: Arc<AtomicUsize>,
    pub scrolls: Arc<AtomicUsize>,
    pub visits: Arc<Mutex<Vec<String>>>,
}

impl Counters {
    pub fn launches(&self) -> usize {
        self.launches.load(Ordering::SeqCst)
    }

    pub fn shutdowns(&self) -> usize {
        self.shutdowns.load(Ordering::SeqCst)
    }

    pub fn scrolls(&self) -> usize {
        self.scrolls.load(Ordering::SeqCst)
    }

    pub fn visits(&self) -> Vec<String> {
        self.visits.lock().expect("visits lock").clone()
    }
}

pub struct FakeDriver {
    site: Arc<FakeSite>,
    counters: Counters,
    current: Option<String>,
    height_reads: usize,
}

impl FakeDriver {
    fn new(site: Arc<FakeSite>, counters: Counters) -> Self {
        Self {
            site,
            counters,
            current: None,
            height_reads: 0,
        }
    }

    pub fn counters(&self) -> Counters {
        self.counters.clone()
    }
}

impl PageDriver for FakeDriver {
    async fn goto(&mut self, url: &str) -> Result<(), NavigationError> {
        self.counters
            .visits
            .lock()
            .expect("visits lock")
            .push(url.to_string());

        if let Some(delay) = self.site.slow.get(url) {
            tokio::time::sleep(*delay).await;
        }
        if let Some(error) = self.site.failing.get(url) {
            return Err(error.clone());
        }
        if !self.site.pages.contains_key(url) {
            return Err(NavigationError::Driver {
                url: url.to_string(),
                message: "net::ERR_HTTP_RESPONSE_CODE_FAILURE (404)".to_string(),
            });
        }
        self.current = Some(url.to_string());
        self.height_reads = 0;
        Ok(())
    }

    async fn page_source(&mut self) -> Result<String, NavigationError> {
        Ok(self
            .current
            .as_ref()
            .and_then(|url| self.site.pages.get(url))
            .map(|page| page.html.clone())
            .unwrap_or_else(|| "<html><head></head><body></body></html>".to_string()))
    }

    async fn scroll_by(&mut self, _px: u32) -> Result<(), NavigationError> {
        if self.site.scroll_fails {
            return Err(NavigationError::Driver {
                url: self.current.clone().unwrap_or_default(),
                message: "Evaluation failed".to_string(),
            });
        }
        self.counters.scrolls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn document_height(&mut self) -> Result<u64, NavigationError> {
        let heights = self
            .current
            .as_ref()
            .and_then(|url| self.site.pages.get(url))
            .map(|page| page.heights.as_slice())
            .unwrap_or(&[0]);
        let index = self.height_reads.min(heights.len().saturating_sub(1));
        self.height_reads += 1;
        Ok(heights.get(index).copied().unwrap_or(0))
    }

    async fn shutdown(self) {
        self.counters.shutdowns.fetch_add(1, Ordering::SeqCst);
    }
}

/// Launches [`FakeDriver`]s over one shared site and counts sessions
pub struct FakeLauncher {
    site: Arc<FakeSite>,
    counters: Counters,
    fail_launch: bool,
}

impl FakeLauncher {
    pub fn new(site: FakeSite) -> Self {
        Self {
            site: Arc::new(site),
            counters: Counters::default(),
            fail_launch: false,
        }
    }

    /// Every launch fails with `SessionInit`
    pub fn failing() -> Self {
        Self {
            fail_launch: true,
            ..Self::new(FakeSite::new())
        }
    }

    pub fn counters(&self) -> Counters {
        self.counters.clone()
    }
}

impl SessionLauncher for FakeLauncher {
    type Driver = FakeDriver;

    async fn launch(&self) -> Result<FakeDriver, ScrapeError> {
        self.counters.launches.fetch_add(1, Ordering::SeqCst);
        if self.fail_launch {
            return Err(ScrapeError::SessionInit("Chrome executable not found".to_string()));
        }
        Ok(FakeDriver::new(Arc::clone(&self.site), self.counters.clone()))
    }
}

// ============================================================================
// HTML builders
// ============================================================================

fn document(title: Option<&str>, body: &str) -> String {
    let title = title
        .map(|t| format!("<title>{}</title>", html_escape::encode_text(t)))
        .unwrap_or_default();
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    {title}
</head>
<body>
    {body}
</body>
</html>"#
    )
}

/// Search results page listing `hrefs` in order
pub fn search_page(hrefs: &[&str]) -> String {
    let items: String = hrefs
        .iter()
        .map(|href| {
            format!(
                r#"<li class="product-base"><a href="{}"><h3>Product</h3></a></li>"#,
                html_escape::encode_double_quoted_attribute(href)
            )
        })
        .collect();
    document(
        Some("Search results"),
        &format!(r#"<ul class="results-base">{items}</ul>"#),
    )
}

/// Product page fields; `None` leaves the node out
#[derive(Debug, Clone, Default)]
pub struct ProductSpec<'a> {
    pub title: Option<&'a str>,
    pub overall_rating: Option<&'a str>,
    pub price: Option<&'a str>,
    pub reviews_href: Option<&'a str>,
}

pub fn product_page(spec: &ProductSpec<'_>) -> String {
    let mut body = String::from(r#"<div class="pdp-details"><h1 class="pdp-title">Brand</h1>"#);
    if let Some(rating) = spec.overall_rating {
        body.push_str(&format!(
            r#"<div class="index-overallRating"><div>{}</div><span class="myntraweb-sprite index-starIcon"></span></div>"#,
            html_escape::encode_text(rating)
        ));
    }
    if let Some(price) = spec.price {
        body.push_str(&format!(
            r#"<p class="pdp-discount-container"><span class="pdp-price"><strong>{}</strong></span></p>"#,
            html_escape::encode_text(price)
        ));
    }
    body.push_str("</div>");
    if let Some(href) = spec.reviews_href {
        body.push_str(&format!(
            r#"<a class="detailed-reviews-allReviews" href="{}">View all reviews</a>"#,
            html_escape::encode_double_quoted_attribute(href)
        ));
    }
    document(spec.title, &body)
}

/// One review; `None` keeps the node but leaves its value out
#[derive(Debug, Clone, Default)]
pub struct ReviewSpec<'a> {
    pub rating: Option<&'a str>,
    pub comment: Option<&'a str>,
    pub reviewer: Option<&'a str>,
    pub date: Option<&'a str>,
}

impl<'a> ReviewSpec<'a> {
    pub fn full(rating: &'a str, comment: &'a str, reviewer: &'a str, date: &'a str) -> Self {
        Self {
            rating: Some(rating),
            comment: Some(comment),
            reviewer: Some(reviewer),
            date: Some(date),
        }
    }
}

fn review_html(spec: &ReviewSpec<'_>) -> String {
    let star = spec
        .rating
        .map(|r| {
            format!(
                r#"<span class="user-review-starRating">{}</span>"#,
                html_escape::encode_text(r)
            )
        })
        .unwrap_or_default();
    let comment = spec.comment.map(html_escape::encode_text).unwrap_or_default();
    let reviewer = spec.reviewer.map(html_escape::encode_text).unwrap_or_default();
    let date = spec
        .date
        .map(|d| format!("<span>{}</span>", html_escape::encode_text(d)))
        .unwrap_or_default();
    format!(
        r#"<div class="user-review-userReviewWrapper">
  <div class="user-review-main user-review-showRating">{star}</div>
  <div class="user-review-reviewTextWrapper">{comment}</div>
  <div class="user-review-footer"><div class="user-review-left"><span>{reviewer}</span>{date}</div></div>
</div>"#
    )
}

/// Reviews page with one container per inner slice
pub fn reviews_page(containers: &[Vec<ReviewSpec<'_>>]) -> String {
    let body: String = containers
        .iter()
        .map(|reviews| {
            let inner: String = reviews.iter().map(review_html).collect();
            format!(r#"<div class="detailed-reviews-userReviewsContainer">{inner}</div>"#)
        })
        .collect();
    document(Some("Ratings and reviews"), &body)
}

/// `count` complete reviews for product `n`, comments numbered in order
pub fn numbered_reviews(n: usize, count: usize) -> Vec<(String, String)> {
    (0..count)
        .map(|i| (format!("Review {i} of product {n}"), format!("Buyer {n}.{i}")))
        .collect()
}

/// Add a product page at `p/{n}` and, when `reviews` is `Some`, an affordance
/// to `reviews/{n}` holding that many reviews
pub fn add_product(site: FakeSite, n: usize, reviews: Option<usize>) -> FakeSite {
    let title = format!("Product {n}");
    let reviews_href = format!("/reviews/{n}");
    let spec = ProductSpec {
        title: Some(&title),
        overall_rating: Some("4.2"),
        price: Some("Rs. 2999"),
        reviews_href: reviews.map(|_| reviews_href.as_str()),
    };
    let site = site.page(url(&format!("p/{n}")), product_page(&spec));
    match reviews {
        Some(count) => {
            let texts = numbered_reviews(n, count);
            let specs: Vec<ReviewSpec<'_>> = texts
                .iter()
                .map(|(comment, reviewer)| ReviewSpec::full("5", comment, reviewer, "12 Mar 2024"))
                .collect();
            site.page(url(&format!("reviews/{n}")), reviews_page(&[specs]))
        }
        None => site,
    }
}

/// Storefront whose search for `term` lists `p/0..p/{n}`; entry `i` of
/// `reviews` decides product `i`'s affordance and review count
pub fn storefront(term: &str, reviews: &[Option<usize>]) -> FakeSite {
    let hrefs: Vec<String> = (0..reviews.len()).map(|i| format!("p/{i}")).collect();
    let href_refs: Vec<&str> = hrefs.iter().map(String::as_str).collect();
    let mut site = FakeSite::new().page(search_url(term), search_page(&href_refs));
    for (i, count) in reviews.iter().enumerate() {
        site = add_product(site, i, *count);
    }
    site
}
