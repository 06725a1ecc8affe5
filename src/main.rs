// Command-line front end: harvest reviews for a search term, print the
// summary report and optionally export the scored reviews.

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use review_harvester::analytics::{
    DEFAULT_TOP_KEYWORDS, LexiconScorer, SentimentStats, analyze, extract_keywords,
};
use review_harvester::export::{
    ExportFormat, summary_report, write_csv, write_json, write_summary, write_xlsx,
};
use review_harvester::utils::{DEFAULT_BASE_URL, DEFAULT_MAX_ATTEMPTS, DEFAULT_TARGET_PRODUCTS, RETRY_BACKOFF_SECS};
use review_harvester::{
    ChromeLauncher, RetryPolicy, RunOutcome, ScrapeConfig, SiteSelectors, TracingProgress,
    scrape_with_retry,
};

#[derive(Debug, Parser)]
#[command(
    name = "review-harvester",
    version,
    about = "Harvest product reviews with a real browser and summarize their sentiment"
)]
struct Cli {
    /// Product search term, e.g. "Nike shoes"
    #[arg(value_name = "TERM")]
    term: String,

    /// Products with reviews to collect (1-10)
    #[arg(short, long, value_name = "N", default_value_t = DEFAULT_TARGET_PRODUCTS)]
    products: usize,

    /// Show the browser window
    #[arg(long, default_value_t = false)]
    headed: bool,

    /// Whole-run attempts before giving up
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_ATTEMPTS)]
    attempts: u32,

    /// Wait between attempts
    #[arg(long, value_name = "SECS", default_value_t = RETRY_BACKOFF_SECS)]
    backoff_secs: u64,

    #[arg(long, value_name = "URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// JSON file overriding some or all CSS selectors
    #[arg(long, value_name = "FILE")]
    selectors: Option<PathBuf>,

    /// Write reviews and statistics as an Excel workbook (default name is timestamped)
    #[arg(long, value_name = "PATH", num_args = 0..=1)]
    xlsx: Option<Option<PathBuf>>,

    /// Write reviews as CSV (default name is timestamped)
    #[arg(long, value_name = "PATH", num_args = 0..=1)]
    csv: Option<Option<PathBuf>>,

    /// Write reviews as JSON (default name is timestamped)
    #[arg(long, value_name = "PATH", num_args = 0..=1)]
    json: Option<Option<PathBuf>>,

    /// Write the summary report to a file (default name is timestamped)
    #[arg(long, value_name = "PATH", num_args = 0..=1)]
    summary: Option<Option<PathBuf>>,
}

fn load_selectors(path: &Path) -> Result<SiteSelectors> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read selector file {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Invalid selector file {}", path.display()))
}

fn build_config(cli: &Cli) -> Result<ScrapeConfig> {
    let mut builder = ScrapeConfig::builder()
        .target_products(cli.products)
        .headless(!cli.headed)
        .base_url(cli.base_url.clone())
        .retry(RetryPolicy {
            max_attempts: cli.attempts,
            backoff: Duration::from_secs(cli.backoff_secs),
        });
    if let Some(path) = &cli.selectors {
        builder = builder.selectors(load_selectors(path)?);
    }
    builder.search_term(cli.term.clone()).build()
}

fn export_path(requested: Option<&PathBuf>, format: ExportFormat, now: chrono::DateTime<Local>) -> PathBuf {
    requested
        .cloned()
        .unwrap_or_else(|| format.default_filename(now))
}

async fn run(cli: Cli) -> Result<bool> {
    let config = build_config(&cli)?;
    info!(
        "Harvesting reviews for '{}' ({} products)",
        config.search_term(),
        config.target_products()
    );

    let launcher = ChromeLauncher::from_config(&config);
    let outcome = scrape_with_retry(&launcher, &config, &TracingProgress).await;

    let (table, stats) = match outcome {
        RunOutcome::Collected { table, stats } => (table, stats),
        other => {
            error!("{}", other.describe());
            println!("No reviews found for '{}'. Try a different search term.", config.search_term());
            return Ok(false);
        }
    };

    println!(
        "Collected {} reviews from {} products ({} of {} candidates checked)",
        table.len(),
        stats.scraped,
        stats.checked,
        stats.discovered
    );

    let scored = analyze(&table, &LexiconScorer::new());
    let sentiment = SentimentStats::from_scored(&scored);
    println!(
        "Sentiment: {} positive, {} neutral, {} negative",
        sentiment.positive, sentiment.neutral, sentiment.negative
    );
    for group in extract_keywords(&scored, DEFAULT_TOP_KEYWORDS) {
        let words: Vec<&str> = group.keywords.iter().take(10).map(|(w, _)| w.as_str()).collect();
        println!("{} keywords: {}", group.label, words.join(", "));
    }

    let now = Local::now();
    let report = summary_report(&scored, now);
    println!("\n{report}");

    if let Some(path) = &cli.xlsx {
        write_xlsx(&export_path(path.as_ref(), ExportFormat::Xlsx, now), &scored)?;
    }
    if let Some(path) = &cli.csv {
        write_csv(&export_path(path.as_ref(), ExportFormat::Csv, now), &scored)?;
    }
    if let Some(path) = &cli.json {
        write_json(&export_path(path.as_ref(), ExportFormat::Json, now), &scored)?;
    }
    if let Some(path) = &cli.summary {
        write_summary(&export_path(path.as_ref(), ExportFormat::Summary, now), &report)?;
    }

    Ok(true)
}

#[tokio::main]
async fn main() -> ExitCode {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new("info,chromiumoxide::handler=off,chromiumoxide::conn=off")
    });
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
