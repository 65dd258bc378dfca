//! `EmailDomain` trait implementation

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use crate::error::Result;
use crate::store::DomainRecordStore;
use crate::traits::{
    EmailAccount, EmailDomain, EmailForwarder, ErrorContext, Operation, VendorErrorMapper,
};
use crate::types::{DomainRecord, Forwarder, MailAccount, REMOTE_ID_KEY, UsageSnapshot};
use crate::vendor::ApiRequest;

use super::account::SampleAccountAdapter;
use super::forwarder::SampleForwarderAdapter;
use super::types::{AccountListResponse, DomainResponse, ForwarderListResponse};
use super::{ADAPTER_ID, SampleApi};

/// Sample adapter bound to one domain record.
pub(crate) struct SampleDomainAdapter {
    api: Arc<SampleApi>,
    store: Arc<dyn DomainRecordStore>,
    record: DomainRecord,
}

impl SampleDomainAdapter {
    pub(crate) fn new(
        api: Arc<SampleApi>,
        store: Arc<dyn DomainRecordStore>,
        record: DomainRecord,
    ) -> Self {
        Self { api, store, record }
    }

    fn context(&self, operation: Operation) -> ErrorContext {
        ErrorContext::new(operation, self.record.domain.as_str())
    }
}

#[async_trait]
impl EmailDomain for SampleDomainAdapter {
    fn record(&self) -> &DomainRecord {
        &self.record
    }

    fn account(&self) -> Box<dyn EmailAccount> {
        Box::new(SampleAccountAdapter::new(self.api.clone(), &self.record))
    }

    fn forwarder(&self) -> Box<dyn EmailForwarder> {
        Box::new(SampleForwarderAdapter::new(
            self.api.clone(),
            &self.record.domain,
        ))
    }

    async fn exists(&self) -> Result<bool> {
        Ok(self.api.find_domain(&self.record.domain).await?.is_some())
    }

    async fn create(&mut self) -> Result<()> {
        let domain = self.record.domain.clone();
        let config = super::metadata().resolve_plan(&self.record.plan);
        log::info!("[{ADAPTER_ID}] Provisioning domain {domain}");

        let request = ApiRequest::post("/email/create-domain").json(json!({
            "domain": domain,
            "config": config,
        }));
        let response: Option<DomainResponse> = self
            .api
            .call(request, self.context(Operation::CreateDomain))
            .await?;
        let remote = response
            .and_then(|r| r.domain)
            .ok_or_else(|| self.api.parse_error("create-domain response carries no domain"))?;

        self.record.set_detail(REMOTE_ID_KEY, remote.id.clone());
        self.store.save(&self.record).await?;
        log::info!(
            "[{ADAPTER_ID}] Provisioned domain {domain} (remote id {})",
            remote.id
        );
        Ok(())
    }

    async fn delete(&mut self) -> Result<()> {
        let domain = self.record.domain.clone();
        log::info!("[{ADAPTER_ID}] Deprovisioning domain {domain}");

        let mut request = ApiRequest::delete("/email/delete-domain").query("domain", domain.as_str());
        if let Some(remote_id) = self.record.remote_id() {
            request = request.query("remote_id", remote_id);
        }
        self.api
            .execute(request, self.context(Operation::DeleteDomain))
            .await?;

        self.record.remove_detail(REMOTE_ID_KEY);
        self.store.save(&self.record).await?;
        log::info!("[{ADAPTER_ID}] Deprovisioned domain {domain}");
        Ok(())
    }

    async fn list_accounts(&self) -> Result<Vec<MailAccount>> {
        let request =
            ApiRequest::get("/email/accounts").query("domain", self.record.domain.as_str());
        let response: AccountListResponse =
            self.api.call(request, self.context(Operation::Query)).await?;
        Ok(response.accounts)
    }

    async fn list_forwarders(&self) -> Result<Vec<Forwarder>> {
        let request =
            ApiRequest::get("/email/forwarders").query("domain", self.record.domain.as_str());
        let response: ForwarderListResponse =
            self.api.call(request, self.context(Operation::Query)).await?;
        Ok(response.forwarders)
    }

    async fn usage(&self) -> Result<UsageSnapshot> {
        self.api.usage(std::slice::from_ref(&self.record.domain)).await
    }
}
