//! Utility modules.

/// Date/time serialization helpers for vendor payloads.
pub mod datetime;

/// Log sanitization utilities to prevent sensitive data exposure.
pub mod log_sanitizer;

/// String-or-number identifier deserialization.
pub mod remote_id;
