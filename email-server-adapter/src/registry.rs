//! Adapter registry: server type tag → constructor.

use std::collections::BTreeMap;
use std::sync::Arc;

use futures::future::BoxFuture;

use crate::error::{AdapterError, Result};
use crate::schema::AdapterMetadata;
use crate::store::DomainRecordStore;
use crate::traits::EmailServer;
use crate::types::{ConfigValues, ServerConfig};

/// Builds an adapter bound to one configured server.
pub type ConstructFn =
    fn(ServerConfig, Arc<dyn DomainRecordStore>) -> Result<Arc<dyn EmailServer>>;

/// Tests connection values without building an adapter.
pub type TestConnectionFn = for<'a> fn(&'a ConfigValues) -> BoxFuture<'a, Result<()>>;

/// Everything the host needs to know about one adapter type.
#[derive(Clone, Copy)]
pub struct AdapterDescriptor {
    /// Server type tag, matching [`ServerConfig::server_type`].
    pub id: &'static str,
    pub metadata: fn() -> AdapterMetadata,
    pub construct: ConstructFn,
    pub test_connection: TestConnectionFn,
}

impl std::fmt::Debug for AdapterDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdapterDescriptor")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

/// Maps server type tags to adapter descriptors.
///
/// The host picks an adapter from [`ServerConfig::server_type`] at configuration time.
#[derive(Debug, Clone, Default)]
pub struct AdapterRegistry {
    adapters: BTreeMap<&'static str, AdapterDescriptor>,
}

impl AdapterRegistry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every adapter enabled via feature flags.
    #[must_use]
    pub fn builtin() -> Self {
        #[allow(unused_mut)]
        let mut registry = Self::new();
        #[cfg(feature = "sample")]
        registry.register(crate::providers::sample_descriptor());
        registry
    }

    /// Add or replace an adapter. Returns the descriptor it replaced, if any.
    pub fn register(&mut self, descriptor: AdapterDescriptor) -> Option<AdapterDescriptor> {
        self.adapters.insert(descriptor.id, descriptor)
    }

    pub fn get(&self, server_type: &str) -> Option<&AdapterDescriptor> {
        self.adapters.get(server_type)
    }

    /// Registered type tags, sorted.
    pub fn ids(&self) -> Vec<&'static str> {
        self.adapters.keys().copied().collect()
    }

    /// Metadata of every registered adapter, sorted by id.
    pub fn metadata(&self) -> Vec<AdapterMetadata> {
        self.adapters.values().map(|d| (d.metadata)()).collect()
    }

    fn require(&self, server_type: &str) -> Result<&AdapterDescriptor> {
        self.get(server_type)
            .ok_or_else(|| AdapterError::UnknownAdapter {
                server_type: server_type.to_string(),
            })
    }

    /// Build the adapter selected by `config.server_type`.
    pub fn create(
        &self,
        config: ServerConfig,
        store: Arc<dyn DomainRecordStore>,
    ) -> Result<Arc<dyn EmailServer>> {
        let descriptor = self.require(&config.server_type)?;
        log::debug!(
            "Creating {} adapter for server {}",
            descriptor.id,
            config.id
        );
        (descriptor.construct)(config, store)
    }

    /// Run the connection test of adapter `server_type` on raw form values.
    pub async fn test_connection(&self, server_type: &str, values: &ConfigValues) -> Result<()> {
        let descriptor = self.require(server_type)?;
        (descriptor.test_connection)(values).await
    }
}

/// Creates an [`EmailServer`] for the given server config using the builtin adapters.
///
/// # Examples
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use email_server_adapter::{create_email_server, InMemoryDomainRecordStore, ServerConfig};
///
/// let config = ServerConfig {
///     id: "1".into(),
///     name: "Mail".into(),
///     server_type: "sample-email-server".into(),
///     connection_config: [
///         ("api_url".to_string(), "https://mail.example.net".into()),
///         ("api_key".to_string(), "secret".into()),
///     ]
///     .into(),
///     ..Default::default()
/// };
/// let server = create_email_server(config, Arc::new(InMemoryDomainRecordStore::new()));
/// ```
pub fn create_email_server(
    config: ServerConfig,
    store: Arc<dyn DomainRecordStore>,
) -> Result<Arc<dyn EmailServer>> {
    AdapterRegistry::builtin().create(config, store)
}

/// Returns metadata for all adapters enabled via feature flags.
pub fn get_all_adapter_metadata() -> Vec<AdapterMetadata> {
    AdapterRegistry::builtin().metadata()
}
