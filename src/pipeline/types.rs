//! Records, tables and run outcomes produced by the pipeline

use serde::{Deserialize, Serialize};
use url::Url;

use crate::errors::ScrapeError;
use crate::extract::{Field, ProductDetails, ReviewFields};

/// Opaque handle to one product as listed on the search results page
///
/// Holds the raw href (absolute or site-relative). Each candidate is consumed
/// by exactly one probe.
#[derive(Debug, PartialEq, Eq)]
pub struct Candidate(String);

impl Candidate {
    pub fn new(href: impl Into<String>) -> Self {
        Self(href.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A product page that exposes a "view all reviews" affordance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewsHandle {
    /// Product-level fields read from the product page
    pub product: ProductDetails,
    /// Absolute URL of the full reviews page
    pub url: Url,
}

/// One harvested review, with product fields repeated on every row
///
/// Every field is always present: values that could not be extracted carry
/// their sentinel (see [`Field::sentinel`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewRecord {
    #[serde(rename = "Product Name")]
    product_name: String,
    #[serde(rename = "Overall Rating")]
    overall_rating: String,
    #[serde(rename = "Price")]
    price: String,
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Rating")]
    rating: String,
    #[serde(rename = "Reviewer")]
    reviewer: String,
    #[serde(rename = "Comment")]
    comment: String,
}

impl ReviewRecord {
    /// Column headers in serialization order
    pub const COLUMNS: [&'static str; 7] = [
        Field::ProductName.column(),
        Field::OverallRating.column(),
        Field::Price.column(),
        Field::Date.column(),
        Field::Rating.column(),
        Field::Reviewer.column(),
        Field::Comment.column(),
    ];

    /// Build a record from already-resolved values, in column order
    pub fn new(
        product_name: impl Into<String>,
        overall_rating: impl Into<String>,
        price: impl Into<String>,
        date: impl Into<String>,
        rating: impl Into<String>,
        reviewer: impl Into<String>,
        comment: impl Into<String>,
    ) -> Self {
        Self {
            product_name: product_name.into(),
            overall_rating: overall_rating.into(),
            price: price.into(),
            date: date.into(),
            rating: rating.into(),
            reviewer: reviewer.into(),
            comment: comment.into(),
        }
    }

    /// Combine the product's fields with one review's fields
    #[must_use]
    pub fn from_parts(product: &ProductDetails, review: ReviewFields) -> Self {
        Self {
            product_name: product.title.as_str().to_string(),
            overall_rating: product.overall_rating.as_str().to_string(),
            price: product.price.as_str().to_string(),
            date: review.date.into_value(),
            rating: review.rating.into_value(),
            reviewer: review.reviewer.into_value(),
            comment: review.comment.into_value(),
        }
    }

    #[must_use]
    pub fn product_name(&self) -> &str {
        &self.product_name
    }

    #[must_use]
    pub fn overall_rating(&self) -> &str {
        &self.overall_rating
    }

    #[must_use]
    pub fn price(&self) -> &str {
        &self.price
    }

    #[must_use]
    pub fn date(&self) -> &str {
        &self.date
    }

    #[must_use]
    pub fn rating(&self) -> &str {
        &self.rating
    }

    #[must_use]
    pub fn reviewer(&self) -> &str {
        &self.reviewer
    }

    #[must_use]
    pub fn comment(&self) -> &str {
        &self.comment
    }
}

/// Append-only, ordered table of harvested reviews
///
/// Rows are grouped by product in harvest order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReviewTable {
    records: Vec<ReviewRecord>,
}

impl ReviewTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, records: impl IntoIterator<Item = ReviewRecord>) {
        self.records.extend(records);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn records(&self) -> &[ReviewRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ReviewRecord> {
        self.records.iter()
    }

    /// Distinct product names in first-appearance order
    #[must_use]
    pub fn product_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for record in &self.records {
            if !names.contains(&record.product_name()) {
                names.push(record.product_name());
            }
        }
        names
    }
}

impl FromIterator<ReviewRecord> for ReviewTable {
    fn from_iter<I: IntoIterator<Item = ReviewRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for ReviewTable {
    type Item = ReviewRecord;
    type IntoIter = std::vec::IntoIter<ReviewRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a ReviewTable {
    type Item = &'a ReviewRecord;
    type IntoIter = std::slice::Iter<'a, ReviewRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Counters for one coordinator run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    /// Candidates returned by discovery
    pub discovered: usize,
    /// Candidates probed
    pub checked: usize,
    /// Products that contributed at least one record
    pub scraped: usize,
    /// Most candidates this run was allowed to probe
    pub budget: usize,
}

/// Result of one coordinator run
#[derive(Debug)]
pub enum RunOutcome {
    /// At least one record was harvested
    Collected { table: ReviewTable, stats: RunStats },
    /// The search returned no candidates
    NoCandidates,
    /// Candidates were checked but none yielded a review
    Exhausted(RunStats),
    /// The run could not proceed (session launch failed or was lost)
    Failed(ScrapeError),
}

impl RunOutcome {
    #[must_use]
    pub fn is_collected(&self) -> bool {
        matches!(self, Self::Collected { .. })
    }

    /// Stats of the run, when it got past discovery
    #[must_use]
    pub fn stats(&self) -> Option<&RunStats> {
        match self {
            Self::Collected { stats, .. } | Self::Exhausted(stats) => Some(stats),
            Self::NoCandidates | Self::Failed(_) => None,
        }
    }

    /// Collapse to the table, discarding why nothing was collected
    #[must_use]
    pub fn into_table(self) -> Option<ReviewTable> {
        match self {
            Self::Collected { table, .. } => Some(table),
            _ => None,
        }
    }

    /// Short description for logs and the CLI
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Collected { table, stats } => format!(
                "collected {} reviews from {} products ({} of {} candidates checked)",
                table.len(),
                stats.scraped,
                stats.checked,
                stats.discovered
            ),
            Self::NoCandidates => "search returned no products".to_string(),
            Self::Exhausted(stats) => format!(
                "no reviews found after checking {} of {} candidates",
                stats.checked, stats.discovered
            ),
            Self::Failed(e) => format!("run failed: {e}"),
        }
    }
}
