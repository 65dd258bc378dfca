//! Log sanitization utilities
//!
//! Keeps vendor response bodies (mailbox lists, SSO links, API errors)
//! from flooding debug/error logs, and keeps API keys out of them.

/// Maximum number of bytes of a body included in log output.
const TRUNCATE_LIMIT: usize = 256;

/// Number of leading characters of a secret left visible.
const SECRET_VISIBLE_PREFIX: usize = 4;

/// Largest char boundary not after `index`.
fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }
    (0..=index)
        .rev()
        .find(|&i| s.is_char_boundary(i))
        .unwrap_or(0)
}

/// Truncate a response body for logging.
///
/// Bodies within the limit are returned unchanged; longer ones are cut at a char
/// boundary and suffixed with the total length.
pub fn truncate_for_log(s: &str) -> String {
    if s.len() <= TRUNCATE_LIMIT {
        s.to_string()
    } else {
        format!(
            "{}... [truncated, total {} bytes]",
            &s[..floor_char_boundary(s, TRUNCATE_LIMIT)],
            s.len()
        )
    }
}

/// Mask a secret so only a short prefix is visible (`"abcd****"`).
pub fn mask_secret(secret: &str) -> String {
    let visible: String = secret.chars().take(SECRET_VISIBLE_PREFIX).collect();
    if visible.len() == secret.len() {
        "****".to_string()
    } else {
        format!("{visible}****")
    }
}
