//! `EmailForwarder` trait implementation

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use crate::error::{AdapterError, Result};
use crate::providers::common::{ensure_in_domain, ensure_not_blank, is_address};
use crate::traits::{EmailForwarder, ErrorContext, Operation};
use crate::types::CreateForwarderParams;
use crate::vendor::ApiRequest;

use super::{ADAPTER_ID, SampleApi};

/// Forwarding rule operations for one domain.
pub(crate) struct SampleForwarderAdapter {
    api: Arc<SampleApi>,
    domain: String,
}

impl SampleForwarderAdapter {
    pub(crate) fn new(api: Arc<SampleApi>, domain: &str) -> Self {
        Self {
            api,
            domain: domain.to_string(),
        }
    }
}

#[async_trait]
impl EmailForwarder for SampleForwarderAdapter {
    async fn create(&self, params: &CreateForwarderParams) -> Result<()> {
        if !params.domain.eq_ignore_ascii_case(&self.domain) {
            return Err(AdapterError::InvalidParameter {
                adapter: ADAPTER_ID.to_string(),
                param: "domain".to_string(),
                detail: format!("expected {}, got {}", self.domain, params.domain),
            });
        }
        ensure_in_domain(ADAPTER_ID, "email", &params.email, &self.domain)?;
        ensure_not_blank(ADAPTER_ID, "destination", &params.destination)?;
        if !is_address(&params.destination) {
            return Err(AdapterError::InvalidParameter {
                adapter: ADAPTER_ID.to_string(),
                param: "destination".to_string(),
                detail: format!("'{}' is not an email address", params.destination),
            });
        }

        let request = ApiRequest::post("/email/forwarders").json(json!({
            "domain": self.domain,
            "email": params.email,
            "destination": params.destination,
        }));
        self.api
            .execute(
                request,
                ErrorContext::new(Operation::CreateForwarder, params.email.as_str()),
            )
            .await?;

        log::info!(
            "[{ADAPTER_ID}] Created forwarder {} -> {}",
            params.email,
            params.destination
        );
        Ok(())
    }

    async fn delete(&self, email: &str, forward_to: &str) -> Result<()> {
        ensure_not_blank(ADAPTER_ID, "email", email)?;
        ensure_not_blank(ADAPTER_ID, "forward_to", forward_to)?;

        let request = ApiRequest::delete("/email/forwarders")
            .query("domain", self.domain.as_str())
            .query("email", email)
            .query("forward_to", forward_to);
        self.api
            .execute(
                request,
                ErrorContext::new(Operation::DeleteForwarder, format!("{email} -> {forward_to}")),
            )
            .await?;

        log::info!("[{ADAPTER_ID}] Deleted forwarder {email} -> {forward_to}");
        Ok(())
    }
}
