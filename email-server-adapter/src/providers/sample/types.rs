//! Sample API wire types

use serde::Deserialize;
use serde_json::Value;

use crate::types::{
    AccountConfiguration, Forwarder, MailAccount, RemoteDomain, RemoteDomainDetails, SelectOption,
};

/// Error envelope: `{"error": {"code": "...", "message": "..."}}`
#[derive(Debug, Deserialize)]
pub struct SampleErrorEnvelope {
    pub error: Option<SampleErrorBody>,
}

#[derive(Debug, Deserialize)]
pub struct SampleErrorBody {
    /// String or numeric vendor code.
    #[serde(default)]
    pub code: Option<Value>,
    #[serde(default)]
    pub message: Option<String>,
}

impl SampleErrorBody {
    pub fn code_string(&self) -> Option<String> {
        match self.code.as_ref()? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

/// Domain as returned by the sample API
#[derive(Debug, Deserialize)]
pub struct SampleDomain {
    #[serde(deserialize_with = "crate::utils::remote_id::deserialize")]
    pub id: String,
    pub name: String,
}

impl From<SampleDomain> for RemoteDomain {
    fn from(d: SampleDomain) -> Self {
        Self {
            domain: d.name,
            details: RemoteDomainDetails { remote_id: d.id },
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct DomainListResponse {
    #[serde(default)]
    pub domains: Vec<SampleDomain>,
}

#[derive(Debug, Deserialize)]
pub struct DomainResponse {
    #[serde(default)]
    pub domain: Option<SampleDomain>,
}

#[derive(Debug, Deserialize)]
pub struct AccountListResponse {
    #[serde(default)]
    pub accounts: Vec<MailAccount>,
}

#[derive(Debug, Deserialize)]
pub struct ForwarderListResponse {
    #[serde(default)]
    pub forwarders: Vec<Forwarder>,
}

/// One option of a dynamic config field
#[derive(Debug, Deserialize)]
pub struct SampleConfigValue {
    #[serde(deserialize_with = "crate::utils::remote_id::deserialize")]
    pub id: String,
    pub name: String,
}

impl From<SampleConfigValue> for SelectOption {
    fn from(v: SampleConfigValue) -> Self {
        Self {
            text: v.name,
            value: v.id,
        }
    }
}

/// Client settings; the vendor may send any subset.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SampleAccountSettings {
    pub account: Option<String>,
    pub display: Option<String>,
    pub domain: Option<String>,
    pub inbox_host: Option<String>,
    pub pop3_port: Option<u16>,
    pub pop3_insecure_port: Option<u16>,
    pub imap_port: Option<u16>,
    pub imap_insecure_port: Option<u16>,
    pub inbox_username: Option<String>,
    pub mail_domain: Option<String>,
    pub smtp_host: Option<String>,
    pub smtp_insecure_port: Option<u16>,
    pub smtp_port: Option<u16>,
    pub smtp_username: Option<String>,
}

impl SampleAccountSettings {
    /// Overlay vendor values onto `base`.
    pub fn apply_to(self, base: AccountConfiguration) -> AccountConfiguration {
        AccountConfiguration {
            account: self.account.unwrap_or(base.account),
            display: self.display.unwrap_or(base.display),
            domain: self.domain.unwrap_or(base.domain),
            inbox_host: self.inbox_host.unwrap_or(base.inbox_host),
            pop3_port: self.pop3_port.unwrap_or(base.pop3_port),
            pop3_insecure_port: self.pop3_insecure_port.unwrap_or(base.pop3_insecure_port),
            imap_port: self.imap_port.unwrap_or(base.imap_port),
            imap_insecure_port: self.imap_insecure_port.unwrap_or(base.imap_insecure_port),
            inbox_username: self.inbox_username.unwrap_or(base.inbox_username),
            mail_domain: self.mail_domain.unwrap_or(base.mail_domain),
            smtp_host: self.smtp_host.unwrap_or(base.smtp_host),
            smtp_insecure_port: self.smtp_insecure_port.unwrap_or(base.smtp_insecure_port),
            smtp_port: self.smtp_port.unwrap_or(base.smtp_port),
            smtp_username: self.smtp_username.unwrap_or(base.smtp_username),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SsoResponse {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default, with = "crate::utils::datetime")]
    pub expires_at: Option<chrono::DateTime<chrono::Utc>>,
}
