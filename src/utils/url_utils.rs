//! URL utilities for search requests and site-relative links.

use anyhow::{Context, Result};
use url::Url;

/// Turn a free-text search term into the storefront's path slug.
///
/// Whitespace runs become a single hyphen and the result is percent-encoded.
///
/// ```
/// # use review_harvester::utils::url_utils::search_slug;
/// assert_eq!(search_slug("Nike shoes"), "Nike-shoes");
/// assert_eq!(search_slug("  levis   jeans "), "levis-jeans");
/// assert_eq!(search_slug("t-shirt & shorts"), "t-shirt-%26-shorts");
/// ```
#[must_use]
pub fn search_slug(term: &str) -> String {
    let hyphenated = term.split_whitespace().collect::<Vec<_>>().join("-");
    urlencoding::encode(&hyphenated).into_owned()
}

/// Build the search results URL for `term`: `{base}/{slug}?rawQuery={slug}`.
pub fn search_url(base_url: &str, term: &str) -> Result<Url> {
    let slug = search_slug(term);
    let base = site_root(base_url)?;
    // Slug is already percent-encoded, so it is joined as a raw path.
    let mut url = base
        .join(&slug)
        .with_context(|| format!("Failed to build search URL for '{term}'"))?;
    url.set_query(Some(&format!("rawQuery={slug}")));
    Ok(url)
}

/// Resolve an href (absolute, root-relative or path-relative) against the site root.
///
/// Product anchors on the results page are path-relative (`shoes/nike/123/buy`)
/// while review links are root-relative (`/reviews/123`); both resolve against
/// the site root, never against the current page.
pub fn resolve_link(base_url: &str, href: &str) -> Result<Url> {
    let base = site_root(base_url)?;
    base.join(href.trim())
        .with_context(|| format!("Failed to resolve link '{href}' against {base_url}"))
}

/// Parse the storefront root so that its path always ends in `/`.
///
/// `Url::join` replaces the last path segment of a base without a trailing
/// slash, which would drop `/store` from `https://shop.test/store`.
fn site_root(base_url: &str) -> Result<Url> {
    let mut base = Url::parse(base_url).with_context(|| format!("Invalid base URL: {base_url}"))?;
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    Ok(base)
}

/// Check if a URL is valid
#[must_use]
pub fn is_valid_url(url: &str) -> bool {
    if url.is_empty() {
        return false;
    }

    // Skip data URLs, javascript URLs, and other non-http schemes
    if url.starts_with("data:") || url.starts_with("javascript:") || url.starts_with("mailto:") {
        return false;
    }

    match Url::parse(url) {
        Ok(parsed) => matches!(parsed.scheme(), "http" | "https"),
        Err(_) => false,
    }
}
