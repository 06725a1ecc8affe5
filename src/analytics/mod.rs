//! Sentiment scoring and review statistics
//!
//! Runs after the pipeline over a finished [`ReviewTable`](crate::pipeline::ReviewTable).

pub mod keywords;
pub mod sentiment;
pub mod stats;

pub use keywords::{DEFAULT_TOP_KEYWORDS, KeywordGroup, extract_keywords};
pub use sentiment::{LexiconScorer, SentimentLabel, SentimentScorer};
pub use stats::{ProductSummary, ScoredReview, SentimentStats, analyze, parse_rating, product_breakdown};
