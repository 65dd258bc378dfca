use serde::{Deserialize, Serialize};

/// Unified error type for all email server adapter operations.
///
/// Each variant includes an `adapter` field identifying which adapter produced the error,
/// plus variant-specific context. All variants are serializable for structured error reporting
/// so the host can render them in its admin UI.
///
/// # Transport Errors
///
/// [`TransportError`](Self::TransportError) and [`Timeout`](Self::Timeout) describe failures
/// below the vendor API (DNS, TLS, refused connections, slow servers). Adapters never retry
/// them; the host decides whether to try again.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum AdapterError {
    /// The vendor rejected the credentials or could not be reached while testing a connection.
    ConnectionError {
        /// Adapter that produced the error.
        adapter: String,
        /// Original error message, if available.
        raw_message: Option<String>,
    },

    /// A connection or account configuration value is missing or malformed.
    InvalidConfig {
        /// Adapter that produced the error.
        adapter: String,
        /// Name of the offending field.
        field: String,
        /// Description of what's wrong.
        detail: String,
    },

    /// A request parameter is invalid before it ever reaches the vendor.
    InvalidParameter {
        /// Adapter that produced the error.
        adapter: String,
        /// Name of the invalid parameter.
        param: String,
        /// Description of what's wrong.
        detail: String,
    },

    /// The operation targets a resource that does not exist on the vendor.
    NotFound {
        /// Adapter that produced the error.
        adapter: String,
        /// The domain, mailbox or forwarding rule that was not found.
        resource: String,
        /// Original error message from the vendor API, if available.
        raw_message: Option<String>,
    },

    /// The vendor refused to provision or deprovision a domain.
    ProvisioningError {
        /// Adapter that produced the error.
        adapter: String,
        /// Domain being provisioned.
        domain: String,
        /// Original error message from the vendor API.
        raw_message: String,
    },

    /// The vendor refused to create a mailbox (duplicate address, quota over plan, ...).
    AccountCreationError {
        /// Adapter that produced the error.
        adapter: String,
        /// Mailbox address.
        email: String,
        /// Original error message from the vendor API.
        raw_message: String,
    },

    /// The vendor refused to create a forwarding rule.
    ForwarderCreationError {
        /// Adapter that produced the error.
        adapter: String,
        /// Source address of the rule.
        email: String,
        /// Original error message from the vendor API.
        raw_message: String,
    },

    /// The vendor could not issue a webmail single sign-on link.
    SsoUnavailable {
        /// Adapter that produced the error.
        adapter: String,
        /// Mailbox address.
        email: String,
        /// Original error message from the vendor API, if available.
        raw_message: Option<String>,
    },

    /// The credentials are valid but lack permission for the requested operation.
    PermissionDenied {
        /// Adapter that produced the error.
        adapter: String,
        /// Original error message from the vendor API, if available.
        raw_message: Option<String>,
    },

    /// The vendor API rate limit has been exceeded (HTTP 429).
    RateLimited {
        /// Adapter that produced the error.
        adapter: String,
        /// Suggested wait time in seconds, if provided by the vendor.
        retry_after: Option<u64>,
        /// Original error message from the vendor API, if available.
        raw_message: Option<String>,
    },

    /// A network-level error occurred (DNS resolution, TLS, connection refused, 502-504).
    TransportError {
        /// Adapter that produced the error.
        adapter: String,
        /// Error details.
        detail: String,
    },

    /// The HTTP request timed out.
    Timeout {
        /// Adapter that produced the error.
        adapter: String,
        /// Error details.
        detail: String,
    },

    /// The host's record store failed to persist a domain record.
    StorageError {
        /// Adapter that produced the error.
        adapter: String,
        /// Error details.
        detail: String,
    },

    /// No adapter is registered under the requested server type.
    UnknownAdapter {
        /// The unrecognised server type tag.
        server_type: String,
    },

    /// Failed to parse the vendor's API response.
    ParseError {
        /// Adapter that produced the error.
        adapter: String,
        /// Details about the parse failure.
        detail: String,
    },

    /// An unrecognized error from the vendor API.
    ///
    /// Catch-all for status codes and error codes not mapped to a specific variant.
    Unknown {
        /// Adapter that produced the error.
        adapter: String,
        /// Raw error code from the API, if available.
        raw_code: Option<String>,
        /// Raw error message from the API.
        raw_message: String,
    },
}

impl AdapterError {
    /// Whether the error stems from user input or vendor-side state rather than a fault.
    ///
    /// Expected errors are logged at `warn`, everything else at `error`.
    /// **Update this when adding variants.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::ConnectionError { .. }
                | Self::InvalidConfig { .. }
                | Self::InvalidParameter { .. }
                | Self::NotFound { .. }
                | Self::ProvisioningError { .. }
                | Self::AccountCreationError { .. }
                | Self::ForwarderCreationError { .. }
                | Self::SsoUnavailable { .. }
                | Self::PermissionDenied { .. }
        )
    }

    /// Whether the failure happened below the vendor API (network or timeout).
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::TransportError { .. } | Self::Timeout { .. })
    }

    /// Whether the vendor reported the target resource as missing.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl std::fmt::Display for AdapterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ConnectionError {
                adapter,
                raw_message,
            } => {
                if let Some(msg) = raw_message {
                    write!(f, "[{adapter}] Connection failed: {msg}")
                } else {
                    write!(f, "[{adapter}] Connection failed")
                }
            }
            Self::InvalidConfig {
                adapter,
                field,
                detail,
            } => {
                write!(f, "[{adapter}] Invalid configuration '{field}': {detail}")
            }
            Self::InvalidParameter {
                adapter,
                param,
                detail,
            } => {
                write!(f, "[{adapter}] Invalid parameter '{param}': {detail}")
            }
            Self::NotFound {
                adapter,
                resource,
                raw_message,
            } => {
                if let Some(msg) = raw_message {
                    write!(f, "[{adapter}] '{resource}' not found: {msg}")
                } else {
                    write!(f, "[{adapter}] '{resource}' not found")
                }
            }
            Self::ProvisioningError {
                adapter,
                domain,
                raw_message,
            } => {
                write!(f, "[{adapter}] Provisioning of '{domain}' failed: {raw_message}")
            }
            Self::AccountCreationError {
                adapter,
                email,
                raw_message,
            } => {
                write!(f, "[{adapter}] Cannot create account '{email}': {raw_message}")
            }
            Self::ForwarderCreationError {
                adapter,
                email,
                raw_message,
            } => {
                write!(f, "[{adapter}] Cannot create forwarder '{email}': {raw_message}")
            }
            Self::SsoUnavailable {
                adapter,
                email,
                raw_message,
            } => {
                if let Some(msg) = raw_message {
                    write!(f, "[{adapter}] Webmail SSO unavailable for '{email}': {msg}")
                } else {
                    write!(f, "[{adapter}] Webmail SSO unavailable for '{email}'")
                }
            }
            Self::PermissionDenied {
                adapter,
                raw_message,
            } => {
                if let Some(msg) = raw_message {
                    write!(f, "[{adapter}] Permission denied: {msg}")
                } else {
                    write!(f, "[{adapter}] Permission denied")
                }
            }
            Self::RateLimited {
                adapter,
                retry_after,
                ..
            } => {
                if let Some(secs) = retry_after {
                    write!(f, "[{adapter}] Rate limited (retry after {secs}s)")
                } else {
                    write!(f, "[{adapter}] Rate limited")
                }
            }
            Self::TransportError { adapter, detail } => {
                write!(f, "[{adapter}] Network error: {detail}")
            }
            Self::Timeout { adapter, detail } => {
                write!(f, "[{adapter}] Request timeout: {detail}")
            }
            Self::StorageError { adapter, detail } => {
                write!(f, "[{adapter}] Storage error: {detail}")
            }
            Self::UnknownAdapter { server_type } => {
                write!(f, "No email server adapter registered for '{server_type}'")
            }
            Self::ParseError { adapter, detail } => {
                write!(f, "[{adapter}] Parse error: {detail}")
            }
            Self::Unknown {
                adapter,
                raw_message,
                ..
            } => {
                write!(f, "[{adapter}] {raw_message}")
            }
        }
    }
}

impl std::error::Error for AdapterError {}

/// Convenience type alias for `Result<T, AdapterError>`.
pub type Result<T> = std::result::Result<T, AdapterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_connection_error_with_message() {
        let e = AdapterError::ConnectionError {
            adapter: "sample".to_string(),
            raw_message: Some("bad key".to_string()),
        };
        assert_eq!(e.to_string(), "[sample] Connection failed: bad key");
    }

    #[test]
    fn display_connection_error_without_message() {
        let e = AdapterError::ConnectionError {
            adapter: "sample".to_string(),
            raw_message: None,
        };
        assert_eq!(e.to_string(), "[sample] Connection failed");
    }

    #[test]
    fn display_not_found() {
        let e = AdapterError::NotFound {
            adapter: "sample".to_string(),
            resource: "a@example.com".to_string(),
            raw_message: None,
        };
        assert_eq!(e.to_string(), "[sample] 'a@example.com' not found");
    }

    #[test]
    fn display_provisioning_error() {
        let e = AdapterError::ProvisioningError {
            adapter: "sample".to_string(),
            domain: "example.com".to_string(),
            raw_message: "domain already exists".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "[sample] Provisioning of 'example.com' failed: domain already exists"
        );
    }

    #[test]
    fn display_account_creation_error() {
        let e = AdapterError::AccountCreationError {
            adapter: "sample".to_string(),
            email: "a@example.com".to_string(),
            raw_message: "quota exceeds plan".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "[sample] Cannot create account 'a@example.com': quota exceeds plan"
        );
    }

    #[test]
    fn display_sso_unavailable() {
        let e = AdapterError::SsoUnavailable {
            adapter: "sample".to_string(),
            email: "a@example.com".to_string(),
            raw_message: None,
        };
        assert_eq!(
            e.to_string(),
            "[sample] Webmail SSO unavailable for 'a@example.com'"
        );
    }

    #[test]
    fn display_rate_limited_with_retry() {
        let e = AdapterError::RateLimited {
            adapter: "sample".to_string(),
            retry_after: Some(30),
            raw_message: None,
        };
        assert_eq!(e.to_string(), "[sample] Rate limited (retry after 30s)");
    }

    #[test]
    fn display_unknown_adapter() {
        let e = AdapterError::UnknownAdapter {
            server_type: "plesk".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "No email server adapter registered for 'plesk'"
        );
    }

    #[test]
    fn display_unknown() {
        let e = AdapterError::Unknown {
            adapter: "sample".to_string(),
            raw_code: Some("E001".to_string()),
            raw_message: "something broke".to_string(),
        };
        assert_eq!(e.to_string(), "[sample] something broke");
    }

    #[test]
    fn serialize_carries_code_tag() {
        let e = AdapterError::NotFound {
            adapter: "sample".to_string(),
            resource: "example.com".to_string(),
            raw_message: Some("no such domain".to_string()),
        };
        let json_res = serde_json::to_string(&e);
        assert!(json_res.is_ok(), "serialize failed: {json_res:?}");
        let Ok(json) = json_res else {
            return;
        };
        assert!(json.contains("\"code\":\"NotFound\""));
        assert!(json.contains("\"resource\":\"example.com\""));
    }

    #[test]
    fn deserialize_restores_variant() {
        let original = AdapterError::TransportError {
            adapter: "sample".to_string(),
            detail: "connection refused".to_string(),
        };
        let json = serde_json::to_string(&original).unwrap_or_default();
        let back: serde_json::Result<AdapterError> = serde_json::from_str(&json);
        assert!(
            matches!(&back, Ok(AdapterError::TransportError { detail, .. }) if detail == "connection refused"),
            "unexpected result: {back:?}"
        );
    }

    #[test]
    fn transport_classification() {
        let network = AdapterError::TransportError {
            adapter: "t".into(),
            detail: "x".into(),
        };
        let timeout = AdapterError::Timeout {
            adapter: "t".into(),
            detail: "x".into(),
        };
        let not_found = AdapterError::NotFound {
            adapter: "t".into(),
            resource: "x".into(),
            raw_message: None,
        };
        assert!(network.is_transport());
        assert!(timeout.is_transport());
        assert!(!not_found.is_transport());
        assert!(not_found.is_not_found());
    }

    #[test]
    fn expected_variants_are_user_facing() {
        assert!(
            AdapterError::ProvisioningError {
                adapter: "t".into(),
                domain: "x".into(),
                raw_message: "y".into(),
            }
            .is_expected()
        );
        assert!(
            !AdapterError::TransportError {
                adapter: "t".into(),
                detail: "x".into(),
            }
            .is_expected()
        );
        assert!(
            !AdapterError::ParseError {
                adapter: "t".into(),
                detail: "x".into(),
            }
            .is_expected()
        );
    }
}
