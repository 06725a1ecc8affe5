//! Scored reviews and aggregate statistics

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use tracing::info;

use super::sentiment::{SentimentLabel, SentimentScorer};
use crate::pipeline::{ReviewRecord, ReviewTable};

static RATING_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+\.?\d*)").expect("Invalid rating number regex"));

/// First decimal number in a rating string ("4.3", "5★"); `None` for sentinels
#[must_use]
pub fn parse_rating(raw: &str) -> Option<f64> {
    RATING_NUMBER
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

/// A review with its sentiment
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredReview {
    pub record: ReviewRecord,
    pub score: f64,
    pub label: SentimentLabel,
}

/// Score every comment in the table, preserving table order
pub fn analyze<S: SentimentScorer + ?Sized>(table: &ReviewTable, scorer: &S) -> Vec<ScoredReview> {
    info!("Starting sentiment analysis of {} reviews", table.len());
    let scored: Vec<ScoredReview> = table
        .iter()
        .map(|record| {
            let score = scorer.score(record.comment());
            ScoredReview {
                record: record.clone(),
                score,
                label: SentimentLabel::from_score(score),
            }
        })
        .collect();
    info!("Sentiment analysis completed");
    scored
}

fn mean(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}

/// Counts and averages over a set of scored reviews
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SentimentStats {
    pub total: usize,
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
    /// Mean compound score, 0 when empty
    pub average_score: f64,
    /// Mean of the ratings that parse as numbers
    pub average_rating: Option<f64>,
    pub unique_products: usize,
}

impl SentimentStats {
    #[must_use]
    pub fn from_scored(scored: &[ScoredReview]) -> Self {
        let count = |label| scored.iter().filter(|r| r.label == label).count();
        let mut products: Vec<&str> = scored.iter().map(|r| r.record.product_name()).collect();
        products.sort_unstable();
        products.dedup();

        Self {
            total: scored.len(),
            positive: count(SentimentLabel::Positive),
            neutral: count(SentimentLabel::Neutral),
            negative: count(SentimentLabel::Negative),
            average_score: mean(scored.iter().map(|r| r.score)).unwrap_or(0.0),
            average_rating: mean(scored.iter().filter_map(|r| parse_rating(r.record.rating()))),
            unique_products: products.len(),
        }
    }

    #[must_use]
    pub fn count(&self, label: SentimentLabel) -> usize {
        match label {
            SentimentLabel::Positive => self.positive,
            SentimentLabel::Neutral => self.neutral,
            SentimentLabel::Negative => self.negative,
        }
    }

    /// Share of `label` in percent, 0 when empty
    #[must_use]
    pub fn percentage(&self, label: SentimentLabel) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.count(label) as f64 * 100.0 / self.total as f64
        }
    }
}

/// Per-product aggregate
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductSummary {
    pub product_name: String,
    pub reviews: usize,
    pub average_score: f64,
    pub average_rating: Option<f64>,
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
}

/// One summary per product, in first-appearance order
#[must_use]
pub fn product_breakdown(scored: &[ScoredReview]) -> Vec<ProductSummary> {
    let mut names: Vec<&str> = Vec::new();
    for review in scored {
        if !names.contains(&review.record.product_name()) {
            names.push(review.record.product_name());
        }
    }

    names
        .into_iter()
        .map(|name| {
            let reviews: Vec<&ScoredReview> = scored
                .iter()
                .filter(|r| r.record.product_name() == name)
                .collect();
            let count = |label| reviews.iter().filter(|r| r.label == label).count();
            ProductSummary {
                product_name: name.to_string(),
                reviews: reviews.len(),
                average_score: mean(reviews.iter().map(|r| r.score)).unwrap_or(0.0),
                average_rating: mean(reviews.iter().filter_map(|r| parse_rating(r.record.rating()))),
                positive: count(SentimentLabel::Positive),
                neutral: count(SentimentLabel::Neutral),
                negative: count(SentimentLabel::Negative),
            }
        })
        .collect()
}
