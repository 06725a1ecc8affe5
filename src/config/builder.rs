//! Type-safe builder for `ScrapeConfig` using the typestate pattern
//!
//! A search term is the only required input; `build()` only exists once it
//! has been supplied.

use anyhow::{Result, anyhow, bail};
use std::marker::PhantomData;
use std::path::PathBuf;

use super::types::{Delays, RetryPolicy, ScrapeConfig, ScrollPolicy};
use crate::extract::SiteSelectors;
use crate::utils::{
    DEFAULT_BASE_URL, DEFAULT_TARGET_PRODUCTS, MAX_TARGET_PRODUCTS, MAX_TERM_LENGTH,
    PAGE_LOAD_TIMEOUT_SECS, is_valid_url,
};

// Type states for the builder
pub struct WithSearchTerm;

pub struct ScrapeConfigBuilder<State = ()> {
    pub(crate) search_term: Option<String>,
    pub(crate) target_products: usize,
    pub(crate) base_url: String,
    pub(crate) headless: bool,
    pub(crate) page_load_timeout_secs: u64,
    pub(crate) delays: Delays,
    pub(crate) scroll: ScrollPolicy,
    pub(crate) retry: RetryPolicy,
    pub(crate) selectors: SiteSelectors,
    pub(crate) chrome_data_dir: Option<PathBuf>,
    pub(crate) _phantom: PhantomData<State>,
}

impl Default for ScrapeConfigBuilder<()> {
    fn default() -> Self {
        Self {
            search_term: None,
            target_products: DEFAULT_TARGET_PRODUCTS,
            base_url: DEFAULT_BASE_URL.to_string(),
            headless: true,
            page_load_timeout_secs: PAGE_LOAD_TIMEOUT_SECS,
            delays: Delays::default(),
            scroll: ScrollPolicy::default(),
            retry: RetryPolicy::default(),
            selectors: SiteSelectors::default(),
            chrome_data_dir: None,
            _phantom: PhantomData,
        }
    }
}

impl ScrapeConfig {
    /// Create a builder for configuring a `ScrapeConfig` with a fluent interface
    #[must_use]
    pub fn builder() -> ScrapeConfigBuilder<()> {
        ScrapeConfigBuilder::default()
    }
}

impl ScrapeConfigBuilder<()> {
    pub fn search_term(self, term: impl Into<String>) -> ScrapeConfigBuilder<WithSearchTerm> {
        ScrapeConfigBuilder {
            search_term: Some(term.into()),
            target_products: self.target_products,
            base_url: self.base_url,
            headless: self.headless,
            page_load_timeout_secs: self.page_load_timeout_secs,
            delays: self.delays,
            scroll: self.scroll,
            retry: self.retry,
            selectors: self.selectors,
            chrome_data_dir: self.chrome_data_dir,
            _phantom: PhantomData,
        }
    }
}

// Build method only available when the search term is set
impl ScrapeConfigBuilder<WithSearchTerm> {
    pub fn build(self) -> Result<ScrapeConfig> {
        let search_term = self
            .search_term
            .ok_or_else(|| anyhow!("search_term is required"))?
            .trim()
            .to_string();

        if search_term.is_empty() {
            bail!(
                "Search term cannot be empty or whitespace-only. \
                 Please provide a product name such as \"Nike shoes\"."
            );
        }

        let term_chars = search_term.chars().count();
        if term_chars > MAX_TERM_LENGTH {
            bail!(
                "Search term is too long ({term_chars} characters). \
                 Maximum allowed: {MAX_TERM_LENGTH} characters."
            );
        }

        if !(1..=MAX_TARGET_PRODUCTS).contains(&self.target_products) {
            bail!(
                "target_products must be between 1 and {MAX_TARGET_PRODUCTS}, got {}",
                self.target_products
            );
        }

        if self.retry.max_attempts == 0 {
            bail!("retry.max_attempts must be at least 1");
        }

        if self.page_load_timeout_secs == 0 {
            bail!("page_load_timeout_secs must be at least 1");
        }

        let base_url = self.base_url.trim_end_matches('/').to_string();
        if !is_valid_url(&base_url) {
            bail!("base_url must be an absolute http(s) URL, got '{}'", self.base_url);
        }

        // Compile selectors once at config creation
        let compiled_selectors = self.selectors.compile()?;

        Ok(ScrapeConfig {
            search_term,
            target_products: self.target_products,
            base_url,
            headless: self.headless,
            page_load_timeout_secs: self.page_load_timeout_secs,
            delays: self.delays,
            scroll: self.scroll,
            retry: self.retry,
            selectors: self.selectors,
            compiled_selectors,
            chrome_data_dir: self.chrome_data_dir,
        })
    }
}
