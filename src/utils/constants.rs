//! Shared configuration constants for the review harvester
//!
//! Default values used by the config builder, the navigator and the pipeline.
//! Keeping them in one place avoids magic numbers scattered across modules.

/// Default storefront the pipeline searches.
pub const DEFAULT_BASE_URL: &str = "https://www.myntra.com";

/// Default number of products with reviews to collect per run.
pub const DEFAULT_TARGET_PRODUCTS: usize = 3;

/// Upper bound on the requested product count.
///
/// Each product costs several navigations plus up to 20 scroll steps, so the
/// request volume is kept human-sized.
pub const MAX_TARGET_PRODUCTS: usize = 10;

/// Candidates examined per requested product before a run gives up.
pub const CANDIDATE_BUDGET_FACTOR: usize = 3;

/// Maximum accepted search term length (characters).
pub const MAX_TERM_LENGTH: usize = 200;

/// Page load timeout for a single navigation (seconds).
pub const PAGE_LOAD_TIMEOUT_SECS: u64 = 30;

/// Settle time after loading the search results page (milliseconds).
pub const SEARCH_SETTLE_MS: u64 = 3_000;

/// Settle time after loading a product page (milliseconds).
pub const PRODUCT_SETTLE_MS: u64 = 2_000;

/// Delay between two candidates, regardless of outcome (milliseconds).
pub const INTER_CANDIDATE_DELAY_MS: u64 = 2_000;

/// Maximum scroll steps when loading a lazy review list.
pub const SCROLL_MAX_STEPS: usize = 20;

/// Pause after each scroll step (milliseconds).
pub const SCROLL_PAUSE_MS: u64 = 2_000;

/// Pixels scrolled per step.
pub const SCROLL_STEP_PX: u32 = 1_000;

/// Whole-run attempts made by the retry wrapper.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Backoff between two whole-run attempts (seconds).
pub const RETRY_BACKOFF_SECS: u64 = 5;

/// Browser window size used for consistent desktop layouts.
pub const WINDOW_WIDTH: u32 = 1920;
pub const WINDOW_HEIGHT: u32 = 1080;

/// Chrome user agent string for stealth mode
///
/// Chrome releases new stable versions ~every 4 weeks.
/// Update quarterly to stay within reasonable version window.
///
/// Reference: https://chromiumdash.appspot.com/schedule
pub const CHROME_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/132.0.6834.160 Safari/537.36";
