//! `EmailAccount` trait implementation

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value, json};

use crate::error::{AdapterError, Result};
use crate::providers::common::{ensure_in_domain, ensure_not_blank, path_segment};
use crate::traits::{EmailAccount, ErrorContext, Operation};
use crate::types::{
    AccountConfiguration, CreateAccountParams, DomainRecord, SsoLink, UpdateAccountParams,
};
use crate::vendor::ApiRequest;

use super::types::{SampleAccountSettings, SsoResponse};
use super::{ADAPTER_ID, SampleApi};

/// Mailbox operations for one domain.
pub(crate) struct SampleAccountAdapter {
    api: Arc<SampleApi>,
    domain: String,
    /// Plan values resolved against the account config fields.
    plan: Map<String, Value>,
}

impl SampleAccountAdapter {
    pub(crate) fn new(api: Arc<SampleApi>, record: &DomainRecord) -> Self {
        Self {
            api,
            domain: record.domain.clone(),
            plan: super::metadata().resolve_plan(&record.plan),
        }
    }

    fn path(email: &str) -> String {
        format!("/email/accounts/{}", path_segment(email))
    }

    fn settings_request(&self, email: &str) -> ApiRequest {
        ApiRequest::get(Self::path(email)).query("domain", self.domain.as_str())
    }

    fn check_email(&self, email: &str) -> Result<()> {
        ensure_in_domain(ADAPTER_ID, "email", email, &self.domain)
    }
}

#[async_trait]
impl EmailAccount for SampleAccountAdapter {
    async fn create(&self, params: &CreateAccountParams) -> Result<()> {
        self.check_email(&params.email)?;
        ensure_not_blank(ADAPTER_ID, "password", &params.password)?;

        let quota = (!params.unlimited_quota).then_some(params.quota);
        let request = ApiRequest::post(Self::path(&params.email)).json(json!({
            "domain": self.domain,
            "password": params.password,
            "quota": quota,
            "unlimited_quota": params.unlimited_quota,
            "plan": self.plan,
        }));
        self.api
            .execute(
                request,
                ErrorContext::new(Operation::CreateAccount, params.email.as_str()),
            )
            .await?;

        log::info!(
            "[{ADAPTER_ID}] Created mailbox {} ({})",
            params.email,
            quota.map_or_else(|| "unlimited".to_string(), |q| format!("{q} MB"))
        );
        Ok(())
    }

    async fn update(&self, email: &str, params: &UpdateAccountParams) -> Result<()> {
        self.check_email(email)?;
        if let Some(ref password) = params.password {
            ensure_not_blank(ADAPTER_ID, "password", password)?;
        }
        if params.is_empty() {
            // Empty update: only confirm the mailbox exists.
            log::debug!("[{ADAPTER_ID}] Nothing to update for {email}, checking it exists");
            return self
                .api
                .execute(
                    self.settings_request(email),
                    ErrorContext::new(Operation::UpdateAccount, email),
                )
                .await;
        }

        let mut body = Map::new();
        body.insert("domain".to_string(), Value::from(self.domain.as_str()));
        if let Some(ref password) = params.password {
            body.insert("password".to_string(), Value::from(password.as_str()));
        }
        if let Some(quota) = params.quota {
            body.insert("quota".to_string(), Value::from(quota));
        }
        if let Some(unlimited) = params.unlimited_quota {
            body.insert("unlimited_quota".to_string(), Value::from(unlimited));
        }

        self.api
            .execute(
                ApiRequest::put(Self::path(email)).json(Value::Object(body)),
                ErrorContext::new(Operation::UpdateAccount, email),
            )
            .await
    }

    async fn delete(&self, email: &str) -> Result<()> {
        self.check_email(email)?;
        let request = ApiRequest::delete(Self::path(email)).query("domain", self.domain.as_str());
        self.api
            .execute(request, ErrorContext::new(Operation::DeleteAccount, email))
            .await?;
        log::info!("[{ADAPTER_ID}] Deleted mailbox {email}");
        Ok(())
    }

    async fn configuration(&self, email: &str) -> Result<AccountConfiguration> {
        self.check_email(email)?;
        let request = self.settings_request(email);
        let settings: Option<SampleAccountSettings> = self
            .api
            .call(request, ErrorContext::new(Operation::Query, email))
            .await?;

        let defaults = AccountConfiguration::defaults(email, &self.domain);
        Ok(settings.unwrap_or_default().apply_to(defaults))
    }

    async fn webmail_sso_url(&self, email: &str) -> Result<SsoLink> {
        self.check_email(email)?;
        let request = ApiRequest::post(format!("{}/webmail-sso", Self::path(email)))
            .json(json!({ "domain": self.domain }));
        let response: Option<SsoResponse> = self
            .api
            .call(request, ErrorContext::new(Operation::WebmailSso, email))
            .await?;

        match response {
            Some(SsoResponse {
                url: Some(url),
                expires_at,
            }) if !url.trim().is_empty() => Ok(SsoLink { url, expires_at }),
            _ => Err(AdapterError::SsoUnavailable {
                adapter: ADAPTER_ID.to_string(),
                email: email.to_string(),
                raw_message: Some("vendor response carries no url".to_string()),
            }),
        }
    }
}
