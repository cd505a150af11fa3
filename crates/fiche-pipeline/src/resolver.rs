//! # Lookup Resolver
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Resolution Policy                               │
//! │                                                                         │
//! │  for provider in providers (priority order):                           │
//! │      skip if !provider.supports(id.kind())                             │
//! │      timeout(provider_timeout, provider.fetch(id))                     │
//! │        Ok(Some(data)) non-empty  → found record, STOP                  │
//! │        Ok(None) / empty data     → next provider                       │
//! │        Err(e) / elapsed          → warn!, next provider                │
//! │                                                                         │
//! │  nothing found → ProductRecord::not_found (found = false)             │
//! │                                                                         │
//! │  The first non-empty answer wins; answers are never merged.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use fiche_core::{Identifier, PartialProductData, ProductRecord};

use crate::error::ProviderError;
use crate::provider::SourceProvider;

/// Asks providers in order until one knows the product.
#[derive(Clone)]
pub struct LookupResolver {
    providers: Vec<Arc<dyn SourceProvider>>,
    provider_timeout: Duration,
}

impl LookupResolver {
    pub fn new(providers: Vec<Arc<dyn SourceProvider>>, provider_timeout: Duration) -> Self {
        LookupResolver {
            providers,
            provider_timeout,
        }
    }

    /// Provider names in priority order.
    pub fn provider_names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// Resolves an identifier. Never fails: unknown products yield a
    /// not-found record.
    pub async fn resolve(&self, id: &Identifier) -> ProductRecord {
        for provider in &self.providers {
            if !provider.supports(id.kind()) {
                debug!(provider = provider.name(), identifier = %id, "Provider skipped for identifier kind");
                continue;
            }

            match self.fetch_bounded(provider.as_ref(), id).await {
                Ok(Some(data)) => {
                    info!(provider = provider.name(), identifier = %id, "Product found");
                    return ProductRecord::from_partial(id.clone(), data, provider.name(), Utc::now());
                }
                Ok(None) => {
                    debug!(provider = provider.name(), identifier = %id, "No data from provider");
                }
                Err(e) => {
                    warn!(provider = provider.name(), identifier = %id, error = %e, "Provider failed, trying next");
                }
            }
        }

        info!(identifier = %id, "Product not found in any provider");
        ProductRecord::not_found(id.clone(), Utc::now())
    }

    async fn fetch_bounded(
        &self,
        provider: &dyn SourceProvider,
        id: &Identifier,
    ) -> Result<Option<PartialProductData>, ProviderError> {
        match tokio::time::timeout(self.provider_timeout, provider.fetch(id)).await {
            Ok(result) => result.map(|data| data.filter(|d| !d.is_empty())),
            Err(_) => Err(ProviderError::Timeout(self.provider_timeout)),
        }
    }
}
