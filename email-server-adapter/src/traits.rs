use async_trait::async_trait;

use crate::error::{AdapterError, Result};
use crate::schema::AdapterMetadata;
use crate::types::{
    AccountConfiguration, CreateAccountParams, CreateForwarderParams, DomainRecord, Forwarder,
    MailAccount, RemoteDomain, ServerConfig, ServerValues, SsoLink, UpdateAccountParams,
    UsageSnapshot,
};

/// Vendor operation being performed (internal use).
/// Decides which rejection variant a vendor 4xx maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum Operation {
    #[default]
    Query,
    TestConnection,
    CreateDomain,
    DeleteDomain,
    CreateAccount,
    UpdateAccount,
    DeleteAccount,
    WebmailSso,
    CreateForwarder,
    DeleteForwarder,
}

/// Raw vendor API error (internal use).
#[derive(Debug, Clone)]
pub(crate) struct RawApiError {
    /// HTTP status code.
    pub status: u16,
    /// Vendor error code, if the body carried one.
    pub code: Option<String>,
    /// Vendor error message.
    pub message: String,
}

impl RawApiError {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            code: None,
            message: message.into(),
        }
    }

    pub fn with_code(status: u16, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            code: Some(code.into()),
            message: message.into(),
        }
    }
}

/// Error context (internal use).
#[derive(Debug, Clone, Default)]
pub(crate) struct ErrorContext {
    pub operation: Operation,
    /// Domain, mailbox or forwarding rule the request targets.
    pub resource: Option<String>,
}

impl ErrorContext {
    pub fn new(operation: Operation, resource: impl Into<String>) -> Self {
        Self {
            operation,
            resource: Some(resource.into()),
        }
    }

    pub fn resource_or_unknown(&self) -> String {
        self.resource
            .clone()
            .unwrap_or_else(|| "<unknown>".to_string())
    }
}

/// Vendor error mapping trait (internal use).
/// Each adapter maps raw vendor errors onto [`AdapterError`].
pub(crate) trait VendorErrorMapper {
    /// Adapter identifier used in error messages.
    fn adapter_name(&self) -> &'static str;

    /// Map a raw vendor error to the unified error type.
    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> AdapterError;

    fn parse_error(&self, detail: impl ToString) -> AdapterError {
        AdapterError::ParseError {
            adapter: self.adapter_name().to_string(),
            detail: detail.to_string(),
        }
    }

    fn unknown_error(&self, raw: RawApiError) -> AdapterError {
        AdapterError::Unknown {
            adapter: self.adapter_name().to_string(),
            raw_code: raw.code.or_else(|| Some(raw.status.to_string())),
            raw_message: raw.message,
        }
    }
}

/// Email server adapter bound to one configured server.
///
/// The entry point of the contract. Obtain one through
/// [`create_email_server()`](crate::create_email_server) or an
/// [`AdapterRegistry`](crate::AdapterRegistry).
#[async_trait]
pub trait EmailServer: Send + Sync {
    /// Adapter type tag.
    fn id(&self) -> &'static str;

    /// Type-level metadata: name, description, config fields.
    ///
    /// Available before any server is configured.
    fn metadata() -> AdapterMetadata
    where
        Self: Sized;

    /// The server configuration this adapter is bound to.
    fn config(&self) -> &ServerConfig;

    /// Scope the adapter to one domain. No I/O.
    ///
    /// The record's `server_id` is set to this server's id.
    fn domain(&self, record: DomainRecord) -> Box<dyn EmailDomain>;

    /// All domains known to the vendor account. Order is vendor-defined.
    async fn list_domains(&self) -> Result<Vec<RemoteDomain>>;

    /// Look up a domain by exact name. `Ok(None)` when the vendor does not know it.
    async fn find_domain(&self, domain: &str) -> Result<Option<RemoteDomain>>;

    /// Usage across every domain the host associates with this server.
    async fn usage(&self) -> Result<UsageSnapshot>;

    /// Vendor-supplied options for account config fields with dynamic options.
    ///
    /// Fields without dynamic options are absent from the result.
    async fn available_server_values(&self) -> Result<ServerValues>;
}

/// Adapter scoped to one (server, domain) pair.
#[async_trait]
pub trait EmailDomain: Send + Sync {
    /// The bound domain record, including any details written by `create`/`delete`.
    fn record(&self) -> &DomainRecord;

    /// Mailbox operations for this domain. No I/O.
    fn account(&self) -> Box<dyn EmailAccount>;

    /// Forwarder operations for this domain. No I/O.
    fn forwarder(&self) -> Box<dyn EmailForwarder>;

    /// Whether the vendor knows this domain.
    ///
    /// A vendor "not found" is `Ok(false)`; transport and auth failures are returned as errors.
    async fn exists(&self) -> Result<bool>;

    /// Provision the domain and persist the vendor identifiers into the record.
    async fn create(&mut self) -> Result<()>;

    /// Deprovision the domain and persist the cleared record. Not idempotent.
    async fn delete(&mut self) -> Result<()>;

    async fn list_accounts(&self) -> Result<Vec<MailAccount>>;

    async fn list_forwarders(&self) -> Result<Vec<Forwarder>>;

    /// Usage of this domain alone.
    async fn usage(&self) -> Result<UsageSnapshot>;
}

/// Mailbox operations within one domain, keyed by address.
#[async_trait]
pub trait EmailAccount: Send + Sync {
    async fn create(&self, params: &CreateAccountParams) -> Result<()>;

    /// Partial update: only the supplied fields change.
    async fn update(&self, email: &str, params: &UpdateAccountParams) -> Result<()>;

    async fn delete(&self, email: &str) -> Result<()>;

    /// Client connection settings for the mailbox.
    async fn configuration(&self, email: &str) -> Result<AccountConfiguration>;

    /// A link that opens webmail without a separate login.
    async fn webmail_sso_url(&self, email: &str) -> Result<SsoLink>;
}

/// Forwarding rule operations within one domain.
#[async_trait]
pub trait EmailForwarder: Send + Sync {
    async fn create(&self, params: &CreateForwarderParams) -> Result<()>;

    /// Delete the rule identified by both source and destination.
    async fn delete(&self, email: &str, forward_to: &str) -> Result<()>;
}
