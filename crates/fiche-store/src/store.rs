//! # Record Store Contract
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  The whole contract a persistence layer must honor:                    │
//! │                                                                         │
//! │  put(record)      overwrite on equal Identifier (last write wins),     │
//! │                   first-insertion position is kept                      │
//! │  get(id)          Some(record) | None                                  │
//! │  list()           every record, insertion order                        │
//! │                                                                         │
//! │  Concurrent reads allowed, writes to one key serialized.               │
//! │  Crash durability is optional (InMemoryStore has none).                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;

use fiche_core::{Identifier, ProductRecord};

use crate::error::StoreResult;

/// Keyed collection of finalized product records.
///
/// Handlers receive it as `Arc<dyn RecordStore>`; nothing in the pipeline
/// knows which implementation is behind it.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Short name for logs (`memory`, `sqlite`).
    fn backend(&self) -> &'static str;

    /// Stores a record under its identifier, replacing any previous one.
    async fn put(&self, record: ProductRecord) -> StoreResult<()>;

    /// Returns the record stored under `id`.
    async fn get(&self, id: &Identifier) -> StoreResult<Option<ProductRecord>>;

    /// Returns every record in insertion order.
    async fn list(&self) -> StoreResult<Vec<ProductRecord>>;

    /// Number of stored records.
    async fn count(&self) -> StoreResult<usize>;

    /// True when the backend can serve requests.
    async fn health_check(&self) -> bool {
        true
    }
}
