//! Navigator behavior over a scripted driver

use std::time::Duration;

use review_harvester::config::ScrollPolicy;
use review_harvester::errors::NavigationError;
use review_harvester::navigator::Navigator;

mod common;
use common::{FakeSite, url};

fn policy(max_steps: usize) -> ScrollPolicy {
    ScrollPolicy {
        max_steps,
        pause: Duration::ZERO,
        step_px: 1000,
    }
}

#[tokio::test]
async fn test_scroll_stops_when_height_stabilizes() {
    let page = url("reviews/1");
    let driver = FakeSite::new()
        .page_with_heights(page.clone(), "<html></html>", vec![1000, 2000, 3000, 3000])
        .driver();
    let counters = driver.counters();
    let mut nav = Navigator::new(driver, Duration::from_secs(5));

    nav.open(&page).await.unwrap();
    let steps = nav.scroll_to_stable(&policy(20)).await;

    assert_eq!(steps, 3);
    assert_eq!(counters.scrolls(), 3);
}

#[tokio::test]
async fn test_scroll_respects_step_limit() {
    let page = url("reviews/endless");
    let heights: Vec<u64> = (1..=100).map(|i| i * 1000).collect();
    let driver = FakeSite::new().page_with_heights(page.clone(), "<html></html>", heights).driver();
    let counters = driver.counters();
    let mut nav = Navigator::new(driver, Duration::from_secs(5));

    nav.open(&page).await.unwrap();
    assert_eq!(nav.scroll_to_stable(&policy(20)).await, 20);
    assert_eq!(counters.scrolls(), 20);
}

#[tokio::test]
async fn test_scroll_failure_stops_quietly() {
    let page = url("reviews/1");
    let driver = FakeSite::new()
        .page_with_heights(page.clone(), "<html></html>", vec![1000, 2000])
        .with_failing_scroll()
        .driver();
    let mut nav = Navigator::new(driver, Duration::from_secs(5));

    nav.open(&page).await.unwrap();
    assert_eq!(nav.scroll_to_stable(&policy(20)).await, 0);
}

#[tokio::test]
async fn test_open_times_out() {
    let page = url("p/slow");
    let driver = FakeSite::new()
        .page(page.clone(), "<html></html>")
        .slow(page.clone(), Duration::from_secs(10))
        .driver();
    let mut nav = Navigator::new(driver, Duration::from_millis(50));

    let err = nav.open(&page).await.unwrap_err();
    assert!(matches!(err, NavigationError::Timeout { url: ref timed_out, .. } if *timed_out == page));
    assert!(!err.is_fatal());
}

#[tokio::test]
async fn test_open_passes_driver_errors_through() {
    let page = url("p/gone");
    let driver = FakeSite::new()
        .failing(page.clone(), NavigationError::SessionClosed("browser closed".into()))
        .driver();
    let mut nav = Navigator::new(driver, Duration::from_secs(5));

    let err = nav.open(&page).await.unwrap_err();
    assert!(err.is_fatal());
}

#[tokio::test]
async fn test_current_document_reflects_current_page() {
    let first = url("a");
    let second = url("b");
    let driver = FakeSite::new()
        .page(first.clone(), "<html><head><title>First</title></head></html>")
        .page(second.clone(), "<html><head><title>Second</title></head></html>")
        .driver();
    let mut nav = Navigator::new(driver, Duration::from_secs(5));
    let selectors = review_harvester::extract::SiteSelectors::default().compile().unwrap();

    nav.open(&first).await.unwrap();
    let doc = nav.current_document().await.unwrap();
    assert_eq!(review_harvester::extract::extract_product_title(&doc, &selectors).as_str(), "First");

    nav.open(&second).await.unwrap();
    let doc = nav.current_document().await.unwrap();
    assert_eq!(review_harvester::extract::extract_product_title(&doc, &selectors).as_str(), "Second");
}
