//! Host-side domain record persistence

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{AdapterError, Result};
use crate::types::DomainRecord;

const STORE_NAME: &str = "memory-store";

/// Domain Record Store Trait
///
/// Implemented by the host application over its own model layer.
/// Adapters call it for exactly two things:
/// - reading the domain set of a server for usage aggregation
/// - writing back vendor details after provisioning/deprovisioning
#[async_trait]
pub trait DomainRecordStore: Send + Sync {
    /// All domain records the host associates with a server.
    ///
    /// # Arguments
    /// * `server_id` - [`ServerConfig::id`](crate::ServerConfig::id)
    async fn list_by_server(&self, server_id: &str) -> Result<Vec<DomainRecord>>;

    /// Persist a domain record (insert or replace by `id`).
    async fn save(&self, record: &DomainRecord) -> Result<()>;
}

/// In-memory domain record store
///
/// For tests, demos and hosts that keep records elsewhere. Records are keyed by
/// [`DomainRecord::id`] and grouped by [`DomainRecord::server_id`].
#[derive(Clone, Default)]
pub struct InMemoryDomainRecordStore {
    /// record id -> record
    records: Arc<RwLock<HashMap<String, DomainRecord>>>,
    /// If Some, `save` returns this error
    save_error: Arc<RwLock<Option<String>>>,
}

impl InMemoryDomainRecordStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Associate a record with a server without going through an adapter.
    pub async fn insert(&self, server_id: &str, mut record: DomainRecord) {
        record.server_id = server_id.to_string();
        self.records.write().await.insert(record.id.clone(), record);
    }

    /// Look up a record by its host id.
    pub async fn get(&self, record_id: &str) -> Option<DomainRecord> {
        self.records.read().await.get(record_id).cloned()
    }

    /// Make subsequent `save` calls fail (or succeed again with `None`).
    pub async fn set_save_error(&self, err: Option<String>) {
        *self.save_error.write().await = err;
    }
}

#[async_trait]
impl DomainRecordStore for InMemoryDomainRecordStore {
    async fn list_by_server(&self, server_id: &str) -> Result<Vec<DomainRecord>> {
        let mut records: Vec<DomainRecord> = self
            .records
            .read()
            .await
            .values()
            .filter(|r| r.server_id == server_id)
            .cloned()
            .collect();
        records.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(records)
    }

    async fn save(&self, record: &DomainRecord) -> Result<()> {
        if let Some(ref msg) = *self.save_error.read().await {
            return Err(AdapterError::StorageError {
                adapter: STORE_NAME.to_string(),
                detail: msg.clone(),
            });
        }
        if record.server_id.trim().is_empty() {
            return Err(AdapterError::StorageError {
                adapter: STORE_NAME.to_string(),
                detail: format!("record {} is not associated with a server", record.id),
            });
        }

        self.records
            .write()
            .await
            .insert(record.id.clone(), record.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn save_files_record_under_its_server() {
        let store = InMemoryDomainRecordStore::new();
        let mut record = DomainRecord::new("d1", "example.com");
        record.server_id = "srv-1".to_string();
        assert!(store.save(&record).await.is_ok());

        let listed = store.list_by_server("srv-1").await.unwrap_or_default();
        assert_eq!(listed, [record]);
        assert!(matches!(store.list_by_server("srv-2").await, Ok(v) if v.is_empty()));
    }

    #[tokio::test]
    async fn save_without_server_is_rejected() {
        let store = InMemoryDomainRecordStore::new();
        let res = store.save(&DomainRecord::new("d1", "example.com")).await;
        assert!(matches!(res, Err(AdapterError::StorageError { .. })));
        assert!(store.get("d1").await.is_none());
    }

    #[tokio::test]
    async fn save_replaces_existing_record() {
        let store = InMemoryDomainRecordStore::new();
        store
            .insert("srv-1", DomainRecord::new("d1", "example.com"))
            .await;

        let mut updated = store.get("d1").await.unwrap_or_default();
        updated.set_detail("remote_id", "r-1");
        assert!(store.save(&updated).await.is_ok());

        let listed = store.list_by_server("srv-1").await.unwrap_or_default();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].remote_id().as_deref(), Some("r-1"));
    }

    #[tokio::test]
    async fn list_unknown_server_is_empty() {
        let store = InMemoryDomainRecordStore::new();
        let listed = store.list_by_server("nope").await;
        assert!(matches!(listed, Ok(v) if v.is_empty()));
    }

    #[tokio::test]
    async fn save_error_is_reported() {
        let store = InMemoryDomainRecordStore::new();
        store.set_save_error(Some("disk full".to_string())).await;
        let mut record = DomainRecord::new("d1", "example.com");
        record.server_id = "srv-1".to_string();
        let res = store.save(&record).await;
        assert!(matches!(res, Err(AdapterError::StorageError { detail, .. }) if detail == "disk full"));
    }
}
