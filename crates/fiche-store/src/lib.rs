//! # fiche-store: Record Store
//!
//! Keyed storage for finalized product records.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Product Sheet Data Flow                          │
//! │                                                                         │
//! │  ProductSheetPipeline::lookup (fiche-pipeline)                         │
//! │       │  store.put(record)                                              │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   fiche-store (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │            ┌──────────────────────────────┐                     │   │
//! │  │            │   trait RecordStore          │                     │   │
//! │  │            │   put / get / list / count   │                     │   │
//! │  │            └──────────────┬───────────────┘                     │   │
//! │  │                ┌──────────┴──────────┐                          │   │
//! │  │        ┌───────▼───────┐     ┌───────▼───────┐  ┌────────────┐  │   │
//! │  │        │ InMemoryStore │     │  SqliteStore  │◄─│ Migrations │  │   │
//! │  │        │ RwLock +      │     │  SqlitePool   │  │ (embedded) │  │   │
//! │  │        │ IndexMap      │     │  WAL mode     │  └────────────┘  │   │
//! │  │        └───────────────┘     └───────────────┘                  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       ▲                                                                 │
//! │       │  store.get / store.list                                         │
//! │  HTTP handlers (apps/fiche-api): views and CSV export                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - The `RecordStore` contract
//! - [`memory`] - In-memory implementation (default)
//! - [`sqlite`] - SQLite implementation and pool configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Store error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use fiche_store::{InMemoryStore, RecordStore};
//!
//! let store = InMemoryStore::new();
//! store.put(record.clone()).await?;
//! assert_eq!(store.get(&record.identifier).await?, Some(record));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod memory;
pub mod migrations;
pub mod sqlite;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use memory::InMemoryStore;
pub use sqlite::{SqliteStore, StoreConfig};
pub use store::RecordStore;
