//! Best-effort field extraction from rendered storefront pages
//!
//! Every extractor is a pure function over a parsed [`Document`] (or one of its
//! elements) and never fails: a missing node, an empty list or blank text
//! resolves to the field's named sentinel via [`Extraction::Sentinel`].

mod document;
mod fields;
mod selectors;

pub use document::Document;
pub use fields::{
    Extraction, Field, ProductDetails, ReviewFields, extract_comment, extract_date,
    extract_overall_rating, extract_price, extract_product_details, extract_product_title,
    extract_rating, extract_result_links, extract_reviewer, extract_reviews, extract_reviews_link,
};
pub use selectors::{CompiledSelectors, SiteSelectors};
