//! Lexicon-based sentiment scoring for review comments
//!
//! Weighted word scoring in the style of VADER: each known word carries a
//! valence, intensifiers and negations adjust it, and the summed valence is
//! normalized into [-1, 1].

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Scores free text on a [-1, 1] scale
pub trait SentimentScorer: Send + Sync {
    fn score(&self, text: &str) -> f64;
}

/// Label derived from a compound score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

impl SentimentLabel {
    /// Scores at or above this are positive
    pub const POSITIVE_THRESHOLD: f64 = 0.05;
    /// Scores at or below this are negative
    pub const NEGATIVE_THRESHOLD: f64 = -0.05;

    pub const ALL: [SentimentLabel; 3] = [Self::Positive, Self::Neutral, Self::Negative];

    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score >= Self::POSITIVE_THRESHOLD {
            Self::Positive
        } else if score <= Self::NEGATIVE_THRESHOLD {
            Self::Negative
        } else {
            Self::Neutral
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Positive => "Positive",
            Self::Neutral => "Neutral",
            Self::Negative => "Negative",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Scoring constants
// ============================================================================

/// Normalization constant for the compound score
const NORMALIZATION_ALPHA: f64 = 15.0;
/// Valence added (or removed) by an intensifier
const BOOSTER_INCREMENT: f64 = 0.293;
/// Multiplier applied to a word preceded by a negation
const NEGATION_SCALAR: f64 = -0.74;
/// How many preceding tokens a negation reaches
const NEGATION_WINDOW: usize = 3;
/// Weight of words before / after a contrastive "but"
const BEFORE_BUT_WEIGHT: f64 = 0.5;
const AFTER_BUT_WEIGHT: f64 = 1.5;

/// Word valences on the -4..=4 scale
const LEXICON: &[(&str, f64)] = &[
    // positive
    ("amazing", 2.8),
    ("awesome", 3.1),
    ("beautiful", 2.9),
    ("best", 3.2),
    ("better", 1.9),
    ("brilliant", 2.8),
    ("comfortable", 1.8),
    ("comfy", 1.8),
    ("cool", 1.3),
    ("durable", 1.5),
    ("excellent", 2.7),
    ("fantastic", 2.6),
    ("fine", 0.8),
    ("fit", 0.8),
    ("fits", 0.8),
    ("glad", 2.0),
    ("good", 1.9),
    ("gorgeous", 3.0),
    ("great", 3.1),
    ("happy", 2.7),
    ("impressed", 2.1),
    ("like", 1.5),
    ("liked", 1.8),
    ("love", 3.2),
    ("loved", 2.9),
    ("lovely", 2.8),
    ("nice", 1.8),
    ("perfect", 2.7),
    ("perfectly", 2.6),
    ("pleased", 1.9),
    ("recommend", 1.5),
    ("recommended", 1.8),
    ("satisfied", 1.8),
    ("smooth", 1.3),
    ("soft", 1.0),
    ("stylish", 1.7),
    ("superb", 3.1),
    ("value", 1.0),
    ("worth", 0.9),
    ("wonderful", 2.7),
    // negative
    ("awful", -2.9),
    ("bad", -2.5),
    ("broke", -1.9),
    ("broken", -2.1),
    ("cheap", -0.8),
    ("complaint", -1.6),
    ("damaged", -2.0),
    ("defective", -2.2),
    ("disappointed", -2.2),
    ("disappointing", -2.3),
    ("dislike", -1.6),
    ("faded", -1.1),
    ("fake", -2.1),
    ("hate", -2.7),
    ("hated", -3.2),
    ("horrible", -2.5),
    ("loose", -0.9),
    ("poor", -2.1),
    ("problem", -1.7),
    ("refund", -0.9),
    ("return", -0.6),
    ("returned", -0.9),
    ("terrible", -2.1),
    ("tight", -0.9),
    ("torn", -1.8),
    ("uncomfortable", -1.6),
    ("useless", -1.8),
    ("waste", -1.8),
    ("worse", -2.1),
    ("worst", -3.1),
    ("wrong", -2.1),
];

const BOOSTERS: &[(&str, f64)] = &[
    ("absolutely", BOOSTER_INCREMENT),
    ("completely", BOOSTER_INCREMENT),
    ("extremely", BOOSTER_INCREMENT),
    ("highly", BOOSTER_INCREMENT),
    ("really", BOOSTER_INCREMENT),
    ("so", BOOSTER_INCREMENT),
    ("super", BOOSTER_INCREMENT),
    ("totally", BOOSTER_INCREMENT),
    ("very", BOOSTER_INCREMENT),
    ("barely", -BOOSTER_INCREMENT),
    ("kinda", -BOOSTER_INCREMENT),
    ("slightly", -BOOSTER_INCREMENT),
    ("somewhat", -BOOSTER_INCREMENT),
];

const NEGATIONS: &[&str] = &[
    "aint", "cannot", "cant", "didnt", "doesnt", "dont", "hardly", "isnt", "never", "no",
    "nor", "not", "nothing", "wasnt", "without", "wont",
];

static LEXICON_MAP: Lazy<HashMap<&'static str, f64>> = Lazy::new(|| LEXICON.iter().copied().collect());
static BOOSTER_MAP: Lazy<HashMap<&'static str, f64>> = Lazy::new(|| BOOSTERS.iter().copied().collect());

/// Built-in word-list scorer
#[derive(Debug, Clone, Copy, Default)]
pub struct LexiconScorer;

impl LexiconScorer {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Sum of adjusted word valences before normalization
    fn raw_valence(tokens: &[String]) -> f64 {
        let but_index = tokens.iter().position(|t| t == "but");
        let mut total = 0.0;

        for (i, token) in tokens.iter().enumerate() {
            let Some(&base) = LEXICON_MAP.get(token.as_str()) else {
                continue;
            };
            let mut valence = base;

            // Intensifier directly before the word
            let boost = i
                .checked_sub(1)
                .and_then(|p| BOOSTER_MAP.get(tokens[p].as_str()).copied());
            if let Some(boost) = boost {
                // Boosters push away from zero, dampeners toward it
                valence += if base < 0.0 { -boost } else { boost };
            }

            let window_start = i.saturating_sub(NEGATION_WINDOW);
            if tokens[window_start..i]
                .iter()
                .any(|t| NEGATIONS.contains(&t.as_str()))
            {
                valence *= NEGATION_SCALAR;
            }

            if let Some(but) = but_index {
                if i < but {
                    valence *= BEFORE_BUT_WEIGHT;
                } else if i > but {
                    valence *= AFTER_BUT_WEIGHT;
                }
            }

            total += valence;
        }
        total
    }
}

impl SentimentScorer for LexiconScorer {
    fn score(&self, text: &str) -> f64 {
        let tokens = tokenize(text);
        let sum = Self::raw_valence(&tokens);
        if sum == 0.0 {
            return 0.0;
        }
        (sum / (sum * sum + NORMALIZATION_ALPHA).sqrt()).clamp(-1.0, 1.0)
    }
}

/// Lowercase word tokens with apostrophes folded away ("don't" -> "dont")
fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '\'' || c == '\u{2019}'))
        .map(|word| {
            word.chars()
                .filter(|c| *c != '\'' && *c != '\u{2019}')
                .flat_map(char::to_lowercase)
                .collect::<String>()
        })
        .filter(|word| !word.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_follow_thresholds() {
        assert_eq!(SentimentLabel::from_score(0.05), SentimentLabel::Positive);
        assert_eq!(SentimentLabel::from_score(0.049), SentimentLabel::Neutral);
        assert_eq!(SentimentLabel::from_score(-0.05), SentimentLabel::Negative);
        assert_eq!(SentimentLabel::from_score(0.0), SentimentLabel::Neutral);
    }

    #[test]
    fn tokenizer_folds_apostrophes() {
        assert_eq!(tokenize("Don't LOVE it!"), vec!["dont", "love", "it"]);
    }

    #[test]
    fn negation_flips_polarity() {
        let scorer = LexiconScorer::new();
        assert!(scorer.score("good shoes") > 0.0);
        assert!(scorer.score("not good shoes") < 0.0);
    }

    #[test]
    fn intensifier_strengthens() {
        let scorer = LexiconScorer::new();
        assert!(scorer.score("very good") > scorer.score("good"));
        assert!(scorer.score("very bad") < scorer.score("bad"));
    }

    #[test]
    fn clause_after_but_dominates() {
        let scorer = LexiconScorer::new();
        assert!(scorer.score("looks good but the sole is terrible") < 0.0);
    }

    #[test]
    fn scores_stay_in_range() {
        let scorer = LexiconScorer::new();
        let text = "best best best amazing awesome great love perfect superb ".repeat(10);
        let score = scorer.score(&text);
        assert!(score > 0.9 && score <= 1.0);
        assert_eq!(scorer.score("No comment"), 0.0);
        assert_eq!(scorer.score(""), 0.0);
    }
}
