//! `EmailServer` trait implementation

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;
use crate::providers::common::path_segment;
use crate::schema::AdapterMetadata;
use crate::traits::{EmailDomain, EmailServer, ErrorContext, Operation, VendorErrorMapper};
use crate::types::{
    DomainRecord, RemoteDomain, SelectOption, ServerConfig, ServerValues, UsageSnapshot,
};
use crate::vendor::ApiRequest;

use super::domain::SampleDomainAdapter;
use super::types::{DomainListResponse, DomainResponse, SampleConfigValue};
use super::{ADAPTER_ID, SampleApi, SampleEmailServer};

impl SampleApi {
    /// `GET /email/domains/{domain}`; a vendor 404 is `None`.
    pub(crate) async fn find_domain(&self, domain: &str) -> Result<Option<RemoteDomain>> {
        let request = ApiRequest::get(format!("/email/domains/{}", path_segment(domain)));
        match self
            .call::<Option<DomainResponse>>(request, ErrorContext::new(Operation::Query, domain))
            .await
        {
            Ok(response) => Ok(response.and_then(|r| r.domain).map(Into::into)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// `GET /email/usage` totals over `domains`.
    pub(crate) async fn usage(&self, domains: &[String]) -> Result<UsageSnapshot> {
        let request = domains
            .iter()
            .fold(ApiRequest::get("/email/usage"), |req, d| {
                req.query("domains[]", d.as_str())
            });
        self.call(request, ErrorContext::default()).await
    }
}

#[async_trait]
impl EmailServer for SampleEmailServer {
    fn id(&self) -> &'static str {
        ADAPTER_ID
    }

    fn metadata() -> AdapterMetadata {
        super::metadata()
    }

    fn config(&self) -> &ServerConfig {
        &self.config
    }

    fn domain(&self, mut record: DomainRecord) -> Box<dyn EmailDomain> {
        record.server_id.clone_from(&self.config.id);
        Box::new(SampleDomainAdapter::new(
            self.api.clone(),
            self.store.clone(),
            record,
        ))
    }

    async fn list_domains(&self) -> Result<Vec<RemoteDomain>> {
        let response: DomainListResponse = self
            .api
            .call(ApiRequest::get("/email/domains"), ErrorContext::default())
            .await?;
        Ok(response.domains.into_iter().map(Into::into).collect())
    }

    async fn find_domain(&self, domain: &str) -> Result<Option<RemoteDomain>> {
        self.api.find_domain(domain).await
    }

    async fn usage(&self) -> Result<UsageSnapshot> {
        let mut domains: Vec<String> = self
            .store
            .list_by_server(&self.config.id)
            .await?
            .into_iter()
            .map(|record| record.domain)
            .collect();
        domains.sort();
        domains.dedup();

        log::debug!(
            "[{ADAPTER_ID}] Usage of server {} over {} domain(s)",
            self.config.id,
            domains.len()
        );
        self.api.usage(&domains).await
    }

    async fn available_server_values(&self) -> Result<ServerValues> {
        let metadata = Self::metadata();
        let dynamic: Vec<&str> = metadata.dynamic_fields().map(|f| f.name.as_str()).collect();
        if dynamic.is_empty() {
            return Ok(ServerValues::new());
        }

        let raw: Option<HashMap<String, Value>> = self
            .api
            .call(ApiRequest::get("/email/config-values"), ErrorContext::default())
            .await?;
        let mut raw = raw.unwrap_or_default();

        let mut values = ServerValues::new();
        for name in dynamic {
            let Some(options) = raw.remove(name) else {
                continue;
            };
            let options: Vec<SampleConfigValue> =
                serde_json::from_value(options).map_err(|e| self.api.parse_error(e))?;
            values.insert(
                name.to_string(),
                options.into_iter().map(SelectOption::from).collect(),
            );
        }
        Ok(values)
    }
}
