//! Coordinator runs against a scripted storefront

use std::time::Duration;

use review_harvester::config::{Delays, ScrapeConfig, ScrollPolicy};
use review_harvester::errors::{NavigationError, ScrapeError};
use review_harvester::pipeline::{NoOpProgress, RunOutcome, RunStats, run_once};

mod common;
use common::{BASE, FakeLauncher, FakeSite, search_page, search_url, storefront, test_config, url};

#[tokio::test]
async fn test_nike_shoes_scenario() {
    // Candidates 0, 2 and 4 have no reviews section; 1 and 3 have two reviews each
    let site = storefront(
        "Nike shoes",
        &[None, Some(2), None, Some(2), None, Some(2)],
    );
    let launcher = FakeLauncher::new(site);
    let config = test_config("Nike shoes", 2);

    let outcome = run_once(&launcher, &config, &NoOpProgress).await;

    let RunOutcome::Collected { table, stats } = outcome else {
        panic!("expected collected outcome, got {outcome:?}");
    };
    assert_eq!(table.len(), 4);
    assert_eq!(
        stats,
        RunStats {
            discovered: 6,
            checked: 4,
            scraped: 2,
            budget: 6,
        }
    );
    assert_eq!(table.product_names(), vec!["Product 1", "Product 3"]);

    // Candidate 5 was never opened
    let visits = launcher.counters().visits();
    assert!(!visits.contains(&url("p/5")));
    assert_eq!(launcher.counters().launches(), 1);
    assert_eq!(launcher.counters().shutdowns(), 1);
}

#[tokio::test]
async fn test_records_keep_candidate_and_document_order() {
    let site = storefront("levis jeans", &[Some(3), Some(2)]);
    let launcher = FakeLauncher::new(site);
    let config = test_config("levis jeans", 2);

    let table = run_once(&launcher, &config, &NoOpProgress)
        .await
        .into_table()
        .expect("reviews collected");

    let rows: Vec<(&str, &str)> = table
        .iter()
        .map(|r| (r.product_name(), r.comment()))
        .collect();
    assert_eq!(
        rows,
        vec![
            ("Product 0", "Review 0 of product 0"),
            ("Product 0", "Review 1 of product 0"),
            ("Product 0", "Review 2 of product 0"),
            ("Product 1", "Review 0 of product 1"),
            ("Product 1", "Review 1 of product 1"),
        ]
    );

    let first = &table.records()[0];
    assert_eq!(first.overall_rating(), "4.2");
    assert_eq!(first.price(), "Rs. 2999");
    assert_eq!(first.rating(), "5");
    assert_eq!(first.reviewer(), "Buyer 0.0");
    assert_eq!(first.date(), "12 Mar 2024");
}

#[tokio::test]
async fn test_empty_search_is_no_candidates() {
    let site = FakeSite::new().page(search_url("unobtainium"), search_page(&[]));
    let launcher = FakeLauncher::new(site);
    let config = test_config("unobtainium", 3);

    let outcome = run_once(&launcher, &config, &NoOpProgress).await;

    assert!(matches!(outcome, RunOutcome::NoCandidates));
    // Only the search page was visited: the harvester never ran
    assert_eq!(launcher.counters().visits(), vec![search_url("unobtainium")]);
    assert_eq!(launcher.counters().shutdowns(), 1);
}

#[tokio::test]
async fn test_search_page_failure_is_no_candidates() {
    let site = FakeSite::new().failing(
        search_url("Nike shoes"),
        NavigationError::Timeout {
            url: search_url("Nike shoes"),
            secs: 30,
        },
    );
    let launcher = FakeLauncher::new(site);
    let outcome = run_once(&launcher, &test_config("Nike shoes", 1), &NoOpProgress).await;

    assert!(matches!(outcome, RunOutcome::NoCandidates));
    assert_eq!(launcher.counters().shutdowns(), 1);
}

#[tokio::test]
async fn test_budget_is_three_per_target_product() {
    let site = storefront("socks", &[None; 10]);
    let launcher = FakeLauncher::new(site);
    let config = test_config("socks", 2);

    let outcome = run_once(&launcher, &config, &NoOpProgress).await;

    let RunOutcome::Exhausted(stats) = outcome else {
        panic!("expected exhausted outcome, got {outcome:?}");
    };
    assert_eq!(stats.discovered, 10);
    assert_eq!(stats.budget, 6);
    assert_eq!(stats.checked, 6);
    assert_eq!(stats.scraped, 0);
    assert!(!launcher.counters().visits().contains(&url("p/6")));
}

#[tokio::test]
async fn test_affordance_without_reviews_counts_as_checked_only() {
    let site = storefront("caps", &[Some(0), Some(1)]);
    let launcher = FakeLauncher::new(site);

    let outcome = run_once(&launcher, &test_config("caps", 1), &NoOpProgress).await;

    let RunOutcome::Collected { table, stats } = outcome else {
        panic!("expected collected outcome, got {outcome:?}");
    };
    assert_eq!(stats.checked, 2);
    assert_eq!(stats.scraped, 1);
    assert_eq!(table.product_names(), vec!["Product 1"]);
}

#[tokio::test]
async fn test_broken_product_page_is_skipped() {
    let site = storefront("belts", &[Some(1), Some(1)]).failing(
        url("p/0"),
        NavigationError::Driver {
            url: url("p/0"),
            message: "net::ERR_CONNECTION_RESET".into(),
        },
    );
    let launcher = FakeLauncher::new(site);

    let table = run_once(&launcher, &test_config("belts", 1), &NoOpProgress)
        .await
        .into_table()
        .expect("second product harvested");
    assert_eq!(table.product_names(), vec!["Product 1"]);
}

#[tokio::test]
async fn test_lost_session_fails_run_and_releases_session() {
    let site = storefront("watches", &[Some(1), Some(1), Some(1)]).failing(
        url("p/1"),
        NavigationError::SessionClosed("browser disconnected".into()),
    );
    let launcher = FakeLauncher::new(site);

    let outcome = run_once(&launcher, &test_config("watches", 3), &NoOpProgress).await;

    assert!(matches!(
        outcome,
        RunOutcome::Failed(ScrapeError::Navigation(NavigationError::SessionClosed(_)))
    ));
    assert!(!launcher.counters().visits().contains(&url("p/2")));
    assert_eq!(launcher.counters().shutdowns(), 1);
}

#[tokio::test]
async fn test_launch_failure_is_failed_outcome() {
    let launcher = FakeLauncher::failing();
    let outcome = run_once(&launcher, &test_config("shoes", 1), &NoOpProgress).await;

    assert!(matches!(outcome, RunOutcome::Failed(ScrapeError::SessionInit(_))));
    assert!(outcome.into_table().is_none());
    assert_eq!(launcher.counters().shutdowns(), 0);
}

#[tokio::test]
async fn test_product_without_title_uses_sentinel_in_records() {
    let site = FakeSite::new()
        .page(search_url("kurta"), search_page(&["p/x"]))
        .page(
            url("p/x"),
            common::product_page(&common::ProductSpec {
                reviews_href: Some("/reviews/x"),
                ..Default::default()
            }),
        )
        .page(
            url("reviews/x"),
            common::reviews_page(&[vec![common::ReviewSpec::full("4", "ok", "Sam", "1 Jan 2024")]]),
        );
    let launcher = FakeLauncher::new(site);

    let table = run_once(&launcher, &test_config("kurta", 1), &NoOpProgress)
        .await
        .into_table()
        .expect("review collected");
    let record = &table.records()[0];
    assert_eq!(record.product_name(), "Unknown Product");
    assert_eq!(record.overall_rating(), "N/A");
    assert_eq!(record.price(), "N/A");
    assert_eq!(record.comment(), "ok");
}

#[tokio::test]
async fn test_failed_reviews_page_counts_as_checked_not_scraped() {
    let site = storefront("scarves", &[Some(2), Some(1)]).failing(
        url("reviews/0"),
        NavigationError::Timeout {
            url: url("reviews/0"),
            secs: 30,
        },
    );
    let launcher = FakeLauncher::new(site);

    let outcome = run_once(&launcher, &test_config("scarves", 1), &NoOpProgress).await;

    let RunOutcome::Collected { table, stats } = outcome else {
        panic!("expected collected outcome, got {outcome:?}");
    };
    assert_eq!(stats.checked, 2);
    assert_eq!(stats.scraped, 1);
    assert_eq!(table.product_names(), vec!["Product 1"]);
    assert!(launcher.counters().visits().contains(&url("reviews/0")));
}

#[tokio::test(start_paused = true)]
async fn test_delay_follows_every_checked_candidate() {
    let between = Duration::from_secs(2);
    // Broken page, no affordance, harvested, zero reviews, harvested
    let site = storefront("hats", &[Some(1), None, Some(2), Some(0), Some(1), Some(1)]).failing(
        url("p/0"),
        NavigationError::Driver {
            url: url("p/0"),
            message: "net::ERR_CONNECTION_RESET".into(),
        },
    );
    let launcher = FakeLauncher::new(site);
    let config = ScrapeConfig::builder()
        .base_url(BASE)
        .target_products(2)
        .delays(Delays {
            between_candidates: between,
            ..Delays::none()
        })
        .scroll(ScrollPolicy::default().without_pause())
        .search_term("hats")
        .build()
        .expect("valid config");

    let start = tokio::time::Instant::now();
    let outcome = run_once(&launcher, &config, &NoOpProgress).await;
    let elapsed = start.elapsed();

    let stats = *outcome.stats().expect("run got past discovery");
    assert_eq!(stats.checked, 5);
    assert_eq!(stats.scraped, 2);
    assert_eq!(elapsed, between * stats.checked as u32);
}

#[tokio::test]
async fn test_non_http_candidates_are_never_opened() {
    let site = FakeSite::new().page(
        search_url("boots"),
        search_page(&["javascript:void(0)", "mailto:help@shop.test", "p/1"]),
    );
    let site = common::add_product(site, 1, Some(1));
    let launcher = FakeLauncher::new(site);

    let outcome = run_once(&launcher, &test_config("boots", 1), &NoOpProgress).await;

    let RunOutcome::Collected { table, stats } = outcome else {
        panic!("expected collected outcome, got {outcome:?}");
    };
    assert_eq!(stats.checked, 3);
    assert_eq!(table.product_names(), vec!["Product 1"]);
    assert_eq!(
        launcher.counters().visits(),
        vec![search_url("boots"), url("p/1"), url("reviews/1")]
    );
}
