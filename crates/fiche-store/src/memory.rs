//! # In-Memory Store
//!
//! Default `RecordStore`: an insertion-ordered map behind a tokio `RwLock`.
//! Readers share the lock, writers take it exclusively, so two writes to the
//! same key are serialized and the last one wins.

use async_trait::async_trait;
use indexmap::IndexMap;
use tokio::sync::RwLock;
use tracing::debug;

use fiche_core::{Identifier, ProductRecord};

use crate::error::StoreResult;
use crate::store::RecordStore;

/// Records kept in process memory; lost on restart.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    records: RwLock<IndexMap<Identifier, ProductRecord>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for InMemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn put(&self, record: ProductRecord) -> StoreResult<()> {
        let mut records = self.records.write().await;
        let key = record.identifier.clone();
        // IndexMap::insert keeps the original position of an existing key
        let replaced = records.insert(key, record).is_some();
        debug!(replaced, total = records.len(), "Stored product record");
        Ok(())
    }

    async fn get(&self, id: &Identifier) -> StoreResult<Option<ProductRecord>> {
        Ok(self.records.read().await.get(id).cloned())
    }

    async fn list(&self) -> StoreResult<Vec<ProductRecord>> {
        Ok(self.records.read().await.values().cloned().collect())
    }

    async fn count(&self) -> StoreResult<usize> {
        Ok(self.records.read().await.len())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
