//! Sample API error mapping

use crate::error::AdapterError;
use crate::traits::{ErrorContext, Operation, RawApiError, VendorErrorMapper};

use super::{ADAPTER_ID, SampleApi};

/// Sample API status/code mapping
///
/// The status decides first; for other 4xx the operation in flight picks the
/// rejection variant, and a few vendor codes are recognised for the rest.
impl VendorErrorMapper for SampleApi {
    fn adapter_name(&self) -> &'static str {
        ADAPTER_ID
    }

    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> AdapterError {
        let adapter = self.adapter_name().to_string();
        match raw.status {
            401 => AdapterError::ConnectionError {
                adapter,
                raw_message: Some(raw.message),
            },

            403 => AdapterError::PermissionDenied {
                adapter,
                raw_message: Some(raw.message),
            },

            404 => AdapterError::NotFound {
                adapter,
                resource: context.resource_or_unknown(),
                raw_message: Some(raw.message),
            },

            400..=499 => match context.operation {
                Operation::CreateDomain | Operation::DeleteDomain => {
                    AdapterError::ProvisioningError {
                        adapter,
                        domain: context.resource_or_unknown(),
                        raw_message: raw.message,
                    }
                }
                Operation::CreateAccount => AdapterError::AccountCreationError {
                    adapter,
                    email: context.resource_or_unknown(),
                    raw_message: raw.message,
                },
                Operation::CreateForwarder => AdapterError::ForwarderCreationError {
                    adapter,
                    email: context.resource_or_unknown(),
                    raw_message: raw.message,
                },
                Operation::WebmailSso => AdapterError::SsoUnavailable {
                    adapter,
                    email: context.resource_or_unknown(),
                    raw_message: Some(raw.message),
                },
                Operation::TestConnection => AdapterError::ConnectionError {
                    adapter,
                    raw_message: Some(raw.message),
                },
                Operation::Query
                | Operation::UpdateAccount
                | Operation::DeleteAccount
                | Operation::DeleteForwarder => self.map_code(raw),
            },

            _ => self.unknown_error(raw),
        }
    }
}

impl SampleApi {
    /// Vendor codes with a meaning outside any particular operation.
    fn map_code(&self, raw: RawApiError) -> AdapterError {
        let param = match raw.code.as_deref() {
            Some("quota_exceeds_plan") => "quota",
            Some("invalid_password") => "password",
            Some("invalid_domain") => "domain",
            _ => return self.unknown_error(raw),
        };
        AdapterError::InvalidParameter {
            adapter: self.adapter_name().to_string(),
            param: param.to_string(),
            detail: raw.message,
        }
    }
}
