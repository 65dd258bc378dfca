//! Sample email server adapter
//!
//! Drives the documented sample REST API (`/email/...` endpoints, bearer-token auth).
//! A template for real vendor integrations: swap the wire types and paths, keep the shape.

mod account;
mod domain;
mod error;
mod forwarder;
mod http;
mod server;
mod types;

use std::sync::Arc;

use futures::future::BoxFuture;

use crate::error::{AdapterError, Result};
use crate::registry::AdapterDescriptor;
use crate::schema::{AdapterMetadata, ConfigField, ConnectionConfig};
use crate::store::DomainRecordStore;
use crate::traits::{EmailServer, ErrorContext, Operation};
use crate::types::{ConfigValues, ServerConfig};
use crate::vendor::{ApiRequest, HttpVendorApi, VendorApi};

pub(crate) const ADAPTER_ID: &str = "sample-email-server";
const ADAPTER_NAME: &str = "Sample Email Server";
const ADAPTER_DESCRIPTION: &str = "Sample Email Server - Description about Email Server Module";

/// Account config field: mail plan selected per service.
pub(crate) const EMAIL_PLAN_FIELD: &str = "email_plan";
/// Account config field: server-side spam filtering.
pub(crate) const SPAM_FILTER_FIELD: &str = "spam_filter";

/// Vendor client shared by the server, domain, account and forwarder adapters.
pub(crate) struct SampleApi {
    vendor: Arc<dyn VendorApi>,
}

impl SampleApi {
    pub(crate) fn new(vendor: Arc<dyn VendorApi>) -> Self {
        Self { vendor }
    }
}

/// Sample Email Server adapter
pub struct SampleEmailServer {
    pub(crate) config: ServerConfig,
    pub(crate) api: Arc<SampleApi>,
    pub(crate) store: Arc<dyn DomainRecordStore>,
}

impl SampleEmailServer {
    /// Build an adapter talking HTTPS to the server's configured API.
    ///
    /// Fails with [`AdapterError::InvalidConfig`] when the connection config does not validate.
    pub fn new(config: ServerConfig, store: Arc<dyn DomainRecordStore>) -> Result<Self> {
        let connection = ConnectionConfig::from_values(&config.connection_config)
            .map_err(|e| e.into_adapter_error(ADAPTER_ID))?;
        let vendor = HttpVendorApi::new(ADAPTER_ID, &connection)?;
        Ok(Self::with_vendor(config, Arc::new(vendor), store))
    }

    /// Build an adapter over an arbitrary vendor transport (e.g. [`InMemoryVendor`](crate::InMemoryVendor)).
    pub fn with_vendor(
        config: ServerConfig,
        vendor: Arc<dyn VendorApi>,
        store: Arc<dyn DomainRecordStore>,
    ) -> Self {
        Self {
            config,
            api: Arc::new(SampleApi::new(vendor)),
            store,
        }
    }

    /// Verify that the given connection values reach a working vendor API.
    ///
    /// Validation failures, rejected credentials and unreachable hosts all come back as
    /// [`AdapterError::ConnectionError`]. Nothing is persisted.
    pub async fn test_connection(values: &ConfigValues) -> Result<()> {
        let connection = ConnectionConfig::from_values(values).map_err(connection_error)?;
        let vendor = HttpVendorApi::new(ADAPTER_ID, &connection).map_err(connection_error)?;
        Self::check_connection(Arc::new(vendor)).await
    }

    /// Connection test against an already-built transport.
    pub async fn check_connection(vendor: Arc<dyn VendorApi>) -> Result<()> {
        let api = SampleApi::new(vendor);
        let result = api
            .execute(
                ApiRequest::get("/email/domains"),
                ErrorContext {
                    operation: Operation::TestConnection,
                    resource: None,
                },
            )
            .await;

        match result {
            Ok(()) => {
                log::info!("[{ADAPTER_ID}] Connection test succeeded");
                Ok(())
            }
            Err(e @ AdapterError::ConnectionError { .. }) => Err(e),
            Err(e) => Err(connection_error(e)),
        }
    }
}

fn connection_error(e: impl ToString) -> AdapterError {
    AdapterError::ConnectionError {
        adapter: ADAPTER_ID.to_string(),
        raw_message: Some(e.to_string()),
    }
}

/// Account config fields applied when provisioning a domain.
fn account_config_fields() -> Vec<ConfigField> {
    vec![
        ConfigField::text(EMAIL_PLAN_FIELD, "Email Plan")
            .with_default("Default")
            .with_dynamic_options(),
        ConfigField::checkbox(SPAM_FILTER_FIELD, "Spam Filter").with_default("1"),
    ]
}

pub(crate) fn metadata() -> AdapterMetadata {
    AdapterMetadata {
        id: ADAPTER_ID.to_string(),
        name: ADAPTER_NAME.to_string(),
        description: ADAPTER_DESCRIPTION.to_string(),
        config_fields: ConnectionConfig::fields(),
        account_config_fields: account_config_fields(),
    }
}

fn construct(
    config: ServerConfig,
    store: Arc<dyn DomainRecordStore>,
) -> Result<Arc<dyn EmailServer>> {
    Ok(Arc::new(SampleEmailServer::new(config, store)?))
}

fn test_connection(values: &ConfigValues) -> BoxFuture<'_, Result<()>> {
    Box::pin(SampleEmailServer::test_connection(values))
}

/// Registry entry for this adapter.
pub(crate) fn descriptor() -> AdapterDescriptor {
    AdapterDescriptor {
        id: ADAPTER_ID,
        metadata,
        construct,
        test_connection,
    }
}
