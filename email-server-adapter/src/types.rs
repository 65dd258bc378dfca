use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Raw configuration values as the host stores them (field name → form value).
pub type ConfigValues = HashMap<String, Value>;

/// Account/plan configuration attached to the service that owns a domain.
///
/// Keys are the names of the adapter's account config fields.
pub type PlanConfig = HashMap<String, Value>;

/// Dynamic option lists keyed by account config field name.
pub type ServerValues = BTreeMap<String, Vec<SelectOption>>;

/// Detail key under which adapters store the vendor-assigned domain identifier.
pub const REMOTE_ID_KEY: &str = "remote_id";

// ============ Host Records ============

/// A configured email server, as registered by an administrator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host-side identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Adapter type tag (e.g. `"sample-email-server"`).
    #[serde(rename = "type")]
    pub server_type: String,
    /// API connection details, validated against the adapter's connection fields.
    pub connection_config: ConfigValues,
    /// Additional details such as the server IP address.
    #[serde(default)]
    pub details: serde_json::Map<String, Value>,
}

/// A domain provisioned (or about to be provisioned) on an email server.
///
/// Adapters read `domain` and write vendor identifiers into `details`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DomainRecord {
    /// Host-side identifier.
    pub id: String,
    /// [`ServerConfig::id`] of the server the domain lives on.
    ///
    /// Stamped by [`EmailServer::domain`](crate::EmailServer::domain).
    #[serde(default)]
    pub server_id: String,
    /// Owning user.
    pub user_id: String,
    /// Owning service/subscription.
    pub service_id: String,
    /// Server account the domain lives under, if the host tracks one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_account_id: Option<String>,
    /// The DNS domain name.
    pub domain: String,
    /// Adapter-specific remote identifiers.
    #[serde(default)]
    pub details: serde_json::Map<String, Value>,
    /// Plan values of the owning service.
    #[serde(default)]
    pub plan: PlanConfig,
}

impl DomainRecord {
    /// Create a record for `domain` with no owners or details yet.
    pub fn new(id: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            domain: domain.into(),
            ..Self::default()
        }
    }

    /// The vendor-assigned identifier, once provisioned.
    ///
    /// Hosts may have stored it as a JSON string or number.
    pub fn remote_id(&self) -> Option<String> {
        match self.details.get(REMOTE_ID_KEY)? {
            Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            Value::Number(n) if n.is_u64() || n.is_i64() => Some(n.to_string()),
            _ => None,
        }
    }

    pub fn set_detail(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.details.insert(key.into(), value.into());
    }

    pub fn remove_detail(&mut self, key: &str) -> Option<Value> {
        self.details.remove(key)
    }
}

// ============ Vendor-side Views ============

/// Vendor-side identifiers of a domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteDomainDetails {
    /// Identifier assigned by the vendor.
    pub remote_id: String,
}

/// A domain as known to the vendor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteDomain {
    /// Domain name.
    pub domain: String,
    pub details: RemoteDomainDetails,
}

/// A mailbox on the vendor server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MailAccount {
    /// Mailbox address.
    pub email: String,
    /// Used storage in MB.
    pub disk_usage: u64,
    /// Storage cap in MB, `None` for unlimited.
    pub disk_quota: Option<u64>,
}

/// A forwarding rule on the vendor server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Forwarder {
    /// Source address.
    pub email: String,
    /// Destination address.
    pub forward_to: String,
}

// ============ Usage ============

/// Usage of one resource kind.
///
/// `maximum = None` means no cap. `usage` may exceed `maximum` when a plan was lowered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageCounter {
    pub usage: u64,
    #[serde(default)]
    pub maximum: Option<u64>,
}

impl UsageCounter {
    pub fn is_unlimited(&self) -> bool {
        self.maximum.is_none()
    }
}

/// Account and forwarder usage, computed fresh on every call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageSnapshot {
    pub email_accounts: UsageCounter,
    pub forwarders: UsageCounter,
}

// ============ Requests ============

/// Parameters for creating a mailbox.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAccountParams {
    /// Address to create.
    pub email: String,
    /// Initial password.
    pub password: String,
    /// Storage quota in MB. Ignored when `unlimited_quota` is set.
    pub quota: u64,
    #[serde(default)]
    pub unlimited_quota: bool,
}

/// Partial mailbox update. Only `Some` fields are changed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateAccountParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quota: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unlimited_quota: Option<bool>,
}

impl UpdateAccountParams {
    pub fn is_empty(&self) -> bool {
        self.password.is_none() && self.quota.is_none() && self.unlimited_quota.is_none()
    }
}

/// Parameters for creating a forwarding rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateForwarderParams {
    /// Source address.
    pub email: String,
    /// Domain of the source address.
    pub domain: String,
    /// Destination address.
    pub destination: String,
}

// ============ Responses ============

/// Client settings an email program needs to connect to a mailbox.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountConfiguration {
    pub account: String,
    pub display: String,
    pub domain: String,
    pub inbox_host: String,
    pub pop3_port: u16,
    pub pop3_insecure_port: u16,
    pub imap_port: u16,
    pub imap_insecure_port: u16,
    pub inbox_username: String,
    pub mail_domain: String,
    pub smtp_host: String,
    pub smtp_insecure_port: u16,
    pub smtp_port: u16,
    pub smtp_username: String,
}

impl AccountConfiguration {
    pub const POP3_PORT: u16 = 995;
    pub const POP3_INSECURE_PORT: u16 = 110;
    pub const IMAP_PORT: u16 = 993;
    pub const IMAP_INSECURE_PORT: u16 = 143;
    pub const SMTP_PORT: u16 = 465;
    pub const SMTP_INSECURE_PORT: u16 = 25;

    /// Settings with the well-known ports, `email` as every login and `domain` as every host.
    pub fn defaults(email: &str, domain: &str) -> Self {
        Self {
            account: email.to_string(),
            display: email.to_string(),
            domain: domain.to_string(),
            inbox_host: domain.to_string(),
            pop3_port: Self::POP3_PORT,
            pop3_insecure_port: Self::POP3_INSECURE_PORT,
            imap_port: Self::IMAP_PORT,
            imap_insecure_port: Self::IMAP_INSECURE_PORT,
            inbox_username: email.to_string(),
            mail_domain: domain.to_string(),
            smtp_host: domain.to_string(),
            smtp_insecure_port: Self::SMTP_INSECURE_PORT,
            smtp_port: Self::SMTP_PORT,
            smtp_username: email.to_string(),
        }
    }
}

/// A link granting webmail access without a separate login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SsoLink {
    pub url: String,
    /// When the link stops working, if the vendor says.
    #[serde(with = "crate::utils::datetime")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// One choice of a dynamic select field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    /// Label shown to the user.
    pub text: String,
    /// Value stored in the plan.
    pub value: String,
}
