//! # email-server-adapter
//!
//! The contract a hosting control panel uses to drive third-party email servers:
//! connection testing, domain provisioning, mailboxes, forwarders, usage reporting
//! and webmail single sign-on. Ships a sample adapter for a documented REST API.
//!
//! ## Supported Adapters
//!
//! | Adapter | Feature Flag | Auth Method |
//! |---------|-------------|-------------|
//! | Sample Email Server (`sample-email-server`) | `sample` | Bearer API key |
//!
//! ## Feature Flags
//!
//! - **`sample`** *(default)*: the sample REST adapter.
//! - **`all-adapters`**: every adapter above.
//! - **`native-tls`** *(default)*: platform TLS.
//! - **`rustls`**: rustls, for cross-compilation.
//!
//! ## Component Layout
//!
//! ```text
//! EmailServer ── domain(record) ──▶ EmailDomain ── account()   ──▶ EmailAccount
//!                                              └─ forwarder() ──▶ EmailForwarder
//! ```
//!
//! Each call is one request/response round trip. Adapters keep no state beyond their
//! bound identifiers, never retry and never cache. The one write-back is
//! [`EmailDomain::create`]/[`EmailDomain::delete`], which persist the vendor's domain id
//! through the host's [`DomainRecordStore`].
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use email_server_adapter::{
//!     AdapterRegistry, CreateAccountParams, DomainRecord, InMemoryDomainRecordStore,
//!     ServerConfig,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let registry = AdapterRegistry::builtin();
//!     let config = ServerConfig {
//!         id: "1".into(),
//!         name: "Mail cluster".into(),
//!         server_type: "sample-email-server".into(),
//!         connection_config: [
//!             ("api_url".to_string(), "https://mail.example.net/api".into()),
//!             ("api_key".to_string(), "secret".into()),
//!         ]
//!         .into(),
//!         ..Default::default()
//!     };
//!
//!     // 1. Check the connection before saving the server
//!     registry
//!         .test_connection(&config.server_type, &config.connection_config)
//!         .await?;
//!
//!     // 2. Provision a domain
//!     let server = registry.create(config, Arc::new(InMemoryDomainRecordStore::new()))?;
//!     let mut domain = server.domain(DomainRecord::new("42", "example.com"));
//!     domain.create().await?;
//!
//!     // 3. Add a mailbox
//!     domain
//!         .account()
//!         .create(&CreateAccountParams {
//!             email: "info@example.com".into(),
//!             password: "s3cret".into(),
//!             quota: 1024,
//!             unlimited_quota: false,
//!         })
//!         .await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, AdapterError>`](AdapterError). Vendor statuses map
//! onto structured variants:
//!
//! - [`AdapterError::ConnectionError`]: credentials rejected (HTTP 401) or connection test failed
//! - [`AdapterError::NotFound`]: domain, mailbox or forwarder missing (HTTP 404)
//! - [`AdapterError::ProvisioningError`], [`AdapterError::AccountCreationError`],
//!   [`AdapterError::ForwarderCreationError`], [`AdapterError::SsoUnavailable`]: vendor rejections
//! - [`AdapterError::TransportError`] / [`AdapterError::Timeout`]: the vendor was not reached

mod error;
mod http_client;
mod providers;
mod registry;
mod schema;
mod store;
mod traits;
mod types;
mod utils;
pub mod vendor;

// Re-export error types
pub use error::{AdapterError, Result};

// Re-export registry
pub use registry::{
    AdapterDescriptor, AdapterRegistry, ConstructFn, TestConnectionFn, create_email_server,
    get_all_adapter_metadata,
};

// Re-export contract traits (internal error mapping is not exported)
pub use traits::{EmailAccount, EmailDomain, EmailForwarder, EmailServer};

// Re-export schema
pub use schema::{AdapterMetadata, ConfigField, ConfigValidationError, ConnectionConfig, FieldType};

// Re-export store
pub use store::{DomainRecordStore, InMemoryDomainRecordStore};

// Re-export types
pub use types::{
    AccountConfiguration, ConfigValues, CreateAccountParams, CreateForwarderParams, DomainRecord,
    Forwarder, MailAccount, PlanConfig, REMOTE_ID_KEY, RemoteDomain, RemoteDomainDetails,
    SelectOption, ServerConfig, ServerValues, SsoLink, UpdateAccountParams, UsageCounter,
    UsageSnapshot,
};

// Re-export vendor transports
pub use vendor::{HttpVendorApi, InMemoryVendor, VendorApi, VendorLimits};

// Re-export utils module
pub use utils::datetime;

// Re-export concrete adapters (behind feature flags)
#[cfg(feature = "sample")]
pub use providers::SampleEmailServer;
