//! # Source Providers
//!
//! A source provider answers "what do you know about this identifier?".
//! The resolver asks them in priority order and keeps the first non-empty
//! answer.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  fetch(id) ──► Ok(Some(data))   product known                           │
//! │            ──► Ok(None)         product unknown to this source          │
//! │            ──► Err(e)           source broken, resolver moves on        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;

use fiche_core::{Identifier, IdentifierKind, PartialProductData};

use crate::error::ProviderError;

pub mod open_food_facts;
pub mod static_catalog;

pub use open_food_facts::OpenFoodFactsProvider;
pub use static_catalog::StaticCatalogProvider;

/// A pluggable product data source.
#[async_trait]
pub trait SourceProvider: Send + Sync {
    /// Short name, recorded as `ProductRecord::source`.
    fn name(&self) -> &str;

    /// Whether this source can look up identifiers of `kind`.
    fn supports(&self, _kind: IdentifierKind) -> bool {
        true
    }

    /// Looks up one identifier. A single attempt, no retries.
    async fn fetch(&self, id: &Identifier) -> Result<Option<PartialProductData>, ProviderError>;
}
