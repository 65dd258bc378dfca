//! Helpers shared by adapter implementations

use crate::error::{AdapterError, Result};

// ============ Address Checks ============

/// Whether `value` looks like `local@host` with exactly one `@`.
pub fn is_address(value: &str) -> bool {
    value
        .split_once('@')
        .is_some_and(|(local, host)| !local.is_empty() && !host.is_empty() && !host.contains('@'))
}

/// Whether `email` is a syntactically plain address whose domain part is `domain`.
///
/// Domain comparison is case-insensitive; the local part must be non-empty.
pub fn belongs_to_domain(email: &str, domain: &str) -> bool {
    match email.rsplit_once('@') {
        Some((_, host)) => is_address(email) && host.eq_ignore_ascii_case(domain),
        None => false,
    }
}

/// Reject an address that does not belong to the bound domain before any vendor call.
pub fn ensure_in_domain(adapter: &str, param: &str, email: &str, domain: &str) -> Result<()> {
    if belongs_to_domain(email, domain) {
        return Ok(());
    }
    Err(AdapterError::InvalidParameter {
        adapter: adapter.to_string(),
        param: param.to_string(),
        detail: format!("'{email}' is not an address of {domain}"),
    })
}

/// Reject a blank required parameter.
pub fn ensure_not_blank(adapter: &str, param: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AdapterError::InvalidParameter {
            adapter: adapter.to_string(),
            param: param.to_string(),
            detail: "must not be empty".to_string(),
        });
    }
    Ok(())
}

// ============ Paths ============

/// Percent-encode one path segment (mailbox addresses, domain names).
pub fn path_segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}
