//! Plain-text summary report

use chrono::{DateTime, Local};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt::Write;

use crate::analytics::{ScoredReview, SentimentLabel, SentimentStats};
use crate::extract::Field;
use crate::utils::ellipsize;

const RULE_WIDTH: usize = 60;
const TOP_PRODUCTS: usize = 5;
const HIGHLIGHTS: usize = 3;
const PRODUCT_NAME_CHARS: usize = 50;
const COMMENT_CHARS: usize = 80;

fn percent(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 * 100.0 / total as f64
    }
}

/// Render the summary report for `reviews`, stamped with `generated_at`
#[must_use]
pub fn summary_report(reviews: &[ScoredReview], generated_at: DateTime<Local>) -> String {
    let stats = SentimentStats::from_scored(reviews);
    let heavy = "=".repeat(RULE_WIDTH);
    let rule = "\u{2500}".repeat(RULE_WIDTH);
    let mut out = String::new();

    // Writing to a String cannot fail
    let _ = writeln!(out, "{heavy}");
    let _ = writeln!(out, "REVIEW HARVESTER - SUMMARY REPORT");
    let _ = writeln!(out, "{heavy}");
    let _ = writeln!(out, "\nGenerated on: {}", generated_at.format("%Y-%m-%d %H:%M:%S"));
    let _ = writeln!(out, "\n{rule}\n");

    let _ = writeln!(out, "OVERVIEW:");
    let _ = writeln!(out, "  Total Reviews Scraped: {}", stats.total);
    let _ = writeln!(out, "  Unique Products: {}", stats.unique_products);
    let _ = writeln!(out, "  Date Range: {}", date_range(reviews));

    let _ = writeln!(out, "\n{rule}\n");
    let _ = writeln!(out, "RATING ANALYSIS:");
    match stats.average_rating {
        Some(avg) => {
            let _ = writeln!(out, "  Average Rating: {avg:.2} stars");
        }
        None => {
            let _ = writeln!(out, "  Average Rating: N/A");
        }
    }
    let mut ratings: BTreeMap<&str, usize> = BTreeMap::new();
    for review in reviews {
        *ratings.entry(review.record.rating()).or_default() += 1;
    }
    for (rating, count) in &ratings {
        let _ = writeln!(
            out,
            "  {rating} stars: {count} reviews ({:.1}%)",
            percent(*count, stats.total)
        );
    }

    let _ = writeln!(out, "\n{rule}\n");
    let _ = writeln!(out, "SENTIMENT ANALYSIS:");
    let mut labels: Vec<SentimentLabel> = SentimentLabel::ALL
        .into_iter()
        .filter(|label| stats.count(*label) > 0)
        .collect();
    labels.sort_by(|a, b| stats.count(*b).cmp(&stats.count(*a)));
    for label in labels {
        let _ = writeln!(
            out,
            "  {label}: {} reviews ({:.1}%)",
            stats.count(label),
            stats.percentage(label)
        );
    }
    let _ = writeln!(out, "  Average Sentiment Score: {:.3}", stats.average_score);

    let _ = writeln!(out, "\n{rule}\n");
    let _ = writeln!(out, "TOP PRODUCTS BY REVIEW COUNT:");
    for (idx, (product, count)) in top_products(reviews).into_iter().enumerate() {
        let _ = writeln!(
            out,
            "  {}. {} ({count} reviews)",
            idx + 1,
            ellipsize(product, PRODUCT_NAME_CHARS)
        );
    }

    let _ = writeln!(out, "\n{rule}\n");
    let _ = writeln!(out, "SENTIMENT HIGHLIGHTS:");
    let _ = writeln!(out, "\n  Most Positive Reviews:");
    for review in highlights(reviews, |a, b| b.score.total_cmp(&a.score)) {
        write_highlight(&mut out, review);
    }
    let _ = writeln!(out, "\n  Most Negative Reviews:");
    for review in highlights(reviews, |a, b| a.score.total_cmp(&b.score)) {
        write_highlight(&mut out, review);
    }

    let _ = writeln!(out, "\n{}", "\u{2550}".repeat(RULE_WIDTH));
    out
}

/// Lexicographic min and max of the known dates
fn date_range(reviews: &[ScoredReview]) -> String {
    let mut dates = reviews
        .iter()
        .map(|r| r.record.date())
        .filter(|d| *d != Field::Date.sentinel());
    let Some(first) = dates.next() else {
        return "N/A".to_string();
    };
    let (min, max) = dates.fold((first, first), |(min, max), d| (min.min(d), max.max(d)));
    format!("{min} to {max}")
}

/// Products by review count, most reviewed first; ties keep harvest order
fn top_products(reviews: &[ScoredReview]) -> Vec<(&str, usize)> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for review in reviews {
        let name = review.record.product_name();
        match counts.iter_mut().find(|(n, _)| *n == name) {
            Some((_, count)) => *count += 1,
            None => counts.push((name, 1)),
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(TOP_PRODUCTS);
    counts
}

fn highlights<F>(reviews: &[ScoredReview], order: F) -> Vec<&ScoredReview>
where
    F: Fn(&ScoredReview, &ScoredReview) -> Ordering,
{
    let mut sorted: Vec<&ScoredReview> = reviews.iter().collect();
    sorted.sort_by(|a, b| order(a, b));
    sorted.truncate(HIGHLIGHTS);
    sorted
}

fn write_highlight(out: &mut String, review: &ScoredReview) {
    let _ = writeln!(out, "    \u{2022} {}", ellipsize(review.record.comment(), COMMENT_CHARS));
    let _ = writeln!(
        out,
        "      Rating: {} | Sentiment: {:.2}",
        review.record.rating(),
        review.score
    );
}
