//! UTF-8-safe string truncation utilities
//!
//! Review comments and product names routinely contain multi-byte characters
//! (currency symbols, emoji, Devanagari). Byte slicing would panic on them, so
//! every truncation in the report code goes through these helpers.

/// Safely truncate a string to a maximum number of CHARACTERS (not bytes).
///
/// Respects UTF-8 character boundaries and never panics.
///
/// # Examples
/// ```
/// # use review_harvester::utils::string_utils::safe_truncate_chars;
/// assert_eq!(safe_truncate_chars("Hello, World!", 5), "Hello");
/// assert_eq!(safe_truncate_chars("₹1,299 only", 6), "₹1,299");
/// assert_eq!(safe_truncate_chars("Hi", 100), "Hi");
/// ```
#[inline]
pub fn safe_truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        None => s,
        Some((byte_idx, _)) => &s[..byte_idx],
    }
}

/// Truncate to `max_chars` characters and append `...` when anything was cut.
///
/// ```
/// # use review_harvester::utils::string_utils::ellipsize;
/// assert_eq!(ellipsize("Great fit", 80), "Great fit");
/// assert_eq!(ellipsize("Great fit and colour", 9), "Great fit...");
/// ```
pub fn ellipsize(s: &str, max_chars: usize) -> String {
    let truncated = safe_truncate_chars(s, max_chars);
    if truncated.len() < s.len() {
        format!("{truncated}...")
    } else {
        s.to_string()
    }
}
