pub mod constants;
pub mod string_utils;
pub mod url_utils;

pub use constants::*;
pub use string_utils::{ellipsize, safe_truncate_chars};
pub use url_utils::{is_valid_url, resolve_link, search_slug, search_url};
