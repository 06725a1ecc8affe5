//! Per-field extractors and their sentinel policy.

use scraper::ElementRef;
use serde::{Deserialize, Serialize};
use tracing::trace;

use super::document::Document;
use super::selectors::CompiledSelectors;

/// One column of a review record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    ProductName,
    OverallRating,
    Price,
    Date,
    Rating,
    Reviewer,
    Comment,
}

impl Field {
    /// All fields in column order
    pub const ALL: [Field; 7] = [
        Field::ProductName,
        Field::OverallRating,
        Field::Price,
        Field::Date,
        Field::Rating,
        Field::Reviewer,
        Field::Comment,
    ];

    /// Placeholder substituted when the field cannot be extracted
    #[must_use]
    pub const fn sentinel(self) -> &'static str {
        match self {
            Field::ProductName => "Unknown Product",
            Field::OverallRating | Field::Price => "N/A",
            Field::Date => "Unknown date",
            Field::Rating => "No rating",
            Field::Reviewer => "Anonymous",
            Field::Comment => "No comment",
        }
    }

    /// Column header used by the table and every export
    #[must_use]
    pub const fn column(self) -> &'static str {
        match self {
            Field::ProductName => "Product Name",
            Field::OverallRating => "Overall Rating",
            Field::Price => "Price",
            Field::Date => "Date",
            Field::Rating => "Rating",
            Field::Reviewer => "Reviewer",
            Field::Comment => "Comment",
        }
    }
}

/// Outcome of extracting one field: the value, or the field's named sentinel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    Found(String),
    Sentinel(Field),
}

impl Extraction {
    fn from_text(field: Field, text: Option<String>) -> Self {
        match text {
            Some(value) if !value.is_empty() => Self::Found(value),
            _ => {
                trace!("{} not found, using sentinel '{}'", field.column(), field.sentinel());
                Self::Sentinel(field)
            }
        }
    }

    #[must_use]
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Found(value) => value,
            Self::Sentinel(field) => field.sentinel(),
        }
    }

    #[must_use]
    pub fn into_value(self) -> String {
        match self {
            Self::Found(value) => value,
            Self::Sentinel(field) => field.sentinel().to_string(),
        }
    }
}

/// Product-level fields shared by every review of one product page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDetails {
    pub title: Extraction,
    pub overall_rating: Extraction,
    pub price: Extraction,
}

/// Review-level fields for a single review
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewFields {
    pub rating: Extraction,
    pub comment: Extraction,
    pub reviewer: Extraction,
    pub date: Extraction,
}

fn element_text(element: ElementRef<'_>) -> Option<String> {
    let text = element.text().collect::<String>();
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Product name from the page title
pub fn extract_product_title(document: &Document, selectors: &CompiledSelectors) -> Extraction {
    let text = document.first(&selectors.product_title).and_then(element_text);
    Extraction::from_text(Field::ProductName, text)
}

/// Overall product rating; the last rating block holding a value node wins
pub fn extract_overall_rating(document: &Document, selectors: &CompiledSelectors) -> Extraction {
    let text = document
        .select(&selectors.overall_rating)
        .filter_map(|block| block.select(&selectors.overall_rating_value).next())
        .last()
        .and_then(element_text);
    Extraction::from_text(Field::OverallRating, text)
}

/// Listed price; the last price node on the page wins
pub fn extract_price(document: &Document, selectors: &CompiledSelectors) -> Extraction {
    let text = document.last(&selectors.price).and_then(element_text);
    Extraction::from_text(Field::Price, text)
}

/// All product-level fields of a product page
pub fn extract_product_details(
    document: &Document,
    selectors: &CompiledSelectors,
) -> ProductDetails {
    ProductDetails {
        title: extract_product_title(document, selectors),
        overall_rating: extract_overall_rating(document, selectors),
        price: extract_price(document, selectors),
    }
}

/// Href of the "view all reviews" affordance, if the page has one
pub fn extract_reviews_link(document: &Document, selectors: &CompiledSelectors) -> Option<String> {
    document
        .first(&selectors.all_reviews_link)
        .and_then(|a| a.value().attr("href"))
        .map(str::trim)
        .filter(|href| !href.is_empty())
        .map(ToString::to_string)
}

/// Every candidate href under every results container, in document order
pub fn extract_result_links(document: &Document, selectors: &CompiledSelectors) -> Vec<String> {
    document
        .select(&selectors.results_container)
        .flat_map(|container| container.select(&selectors.result_link))
        .filter_map(|a| a.value().attr("href"))
        .map(str::trim)
        .filter(|href| !href.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Star rating from a review's rating block
pub fn extract_rating(rating_block: Option<ElementRef<'_>>, selectors: &CompiledSelectors) -> Extraction {
    let text = rating_block
        .and_then(|block| block.select(&selectors.review_star).next())
        .and_then(element_text);
    Extraction::from_text(Field::Rating, text)
}

/// Review body text
pub fn extract_comment(comment_node: Option<ElementRef<'_>>) -> Extraction {
    Extraction::from_text(Field::Comment, comment_node.and_then(element_text))
}

/// Reviewer name: first part of the review footer
pub fn extract_reviewer(meta_node: Option<ElementRef<'_>>, selectors: &CompiledSelectors) -> Extraction {
    let text = meta_node
        .and_then(|meta| meta.select(&selectors.review_meta_part).next())
        .and_then(element_text);
    Extraction::from_text(Field::Reviewer, text)
}

/// Review date: second part of the review footer
pub fn extract_date(meta_node: Option<ElementRef<'_>>, selectors: &CompiledSelectors) -> Extraction {
    let text = meta_node
        .and_then(|meta| meta.select(&selectors.review_meta_part).nth(1))
        .and_then(element_text);
    Extraction::from_text(Field::Date, text)
}

/// Every review in every review container, in document order.
///
/// Inside a container the rating blocks, comments and footers are parallel
/// lists aligned by index. The longest list decides how many reviews the
/// container holds, so a review missing one node still yields a record with
/// that field's sentinel.
pub fn extract_reviews(document: &Document, selectors: &CompiledSelectors) -> Vec<ReviewFields> {
    let mut reviews = Vec::new();

    for container in document.select(&selectors.review_container) {
        let ratings: Vec<_> = container.select(&selectors.review_rating).collect();
        let comments: Vec<_> = container.select(&selectors.review_comment).collect();
        let metas: Vec<_> = container.select(&selectors.review_meta).collect();

        let count = ratings.len().max(comments.len()).max(metas.len());
        for i in 0..count {
            let meta = metas.get(i).copied();
            reviews.push(ReviewFields {
                rating: extract_rating(ratings.get(i).copied(), selectors),
                comment: extract_comment(comments.get(i).copied()),
                reviewer: extract_reviewer(meta, selectors),
                date: extract_date(meta, selectors),
            });
        }
    }

    reviews
}
