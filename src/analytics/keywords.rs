//! Keyword frequencies per sentiment label

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::HashMap;

use super::sentiment::SentimentLabel;
use super::stats::ScoredReview;

/// Default number of keywords kept per label
pub const DEFAULT_TOP_KEYWORDS: usize = 20;

const STOP_WORDS: &[&str] = &[
    "the", "is", "in", "and", "to", "a", "of", "for", "it", "this", "that", "on", "with", "as",
    "are", "was", "be", "but", "not", "have", "has", "had", "do", "does", "did", "will",
    "would", "can", "could", "should", "i", "you", "my", "me", "your",
];

static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b[a-z]{3,}\b").expect("Invalid word regex"));

/// Most frequent words for one label
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeywordGroup {
    pub label: SentimentLabel,
    /// `(word, count)`, most frequent first, ties alphabetical
    pub keywords: Vec<(String, usize)>,
}

/// Top `top_n` keywords for each label present, in first-appearance order of the labels
#[must_use]
pub fn extract_keywords(scored: &[ScoredReview], top_n: usize) -> Vec<KeywordGroup> {
    let mut labels: Vec<SentimentLabel> = Vec::new();
    for review in scored {
        if !labels.contains(&review.label) {
            labels.push(review.label);
        }
    }

    labels
        .into_iter()
        .map(|label| {
            let mut counts: HashMap<String, usize> = HashMap::new();
            for review in scored.iter().filter(|r| r.label == label) {
                let text = review.record.comment().to_lowercase();
                for word in WORD.find_iter(&text).map(|m| m.as_str()) {
                    if !STOP_WORDS.contains(&word) {
                        *counts.entry(word.to_string()).or_default() += 1;
                    }
                }
            }

            let mut keywords: Vec<(String, usize)> = counts.into_iter().collect();
            keywords.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
            keywords.truncate(top_n);
            KeywordGroup { label, keywords }
        })
        .collect()
}
