//! # Static Catalog Provider
//!
//! Products known locally, typically exported from the merchant's own PIM.
//! Queried first so local data always beats public databases.
//!
//! ## Catalog File Format
//! ```toml
//! [[products]]
//! ean = "4006381333931"
//! name = "Stabilo Point 88"
//! brand = "Stabilo"
//! category = "Fournitures de bureau"
//! description = "Fine liner pen with a 0.4 mm tip."
//! language = "en"
//! price = "1.20"
//!
//! [[products]]
//! sku = "ABC-123"
//! name = "Gourde inox"
//! description = "Gourde isotherme de 500 ml."
//! language = "fr"
//! ```

use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

use fiche_core::{Identifier, Money, PartialProductData, SearchRequest};

use crate::error::{ConfigError, ProviderError};
use crate::provider::SourceProvider;

/// Default provider name.
pub const CATALOG_PROVIDER_NAME: &str = "catalog";

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    products: Vec<CatalogEntry>,
}

#[derive(Debug, Deserialize)]
struct CatalogEntry {
    ean: Option<String>,
    sku: Option<String>,
    name: Option<String>,
    brand: Option<String>,
    category: Option<String>,
    description: Option<String>,
    language: Option<String>,
    price: Option<String>,
    image_url: Option<String>,
}

/// In-memory catalog keyed by identifier.
#[derive(Debug, Clone)]
pub struct StaticCatalogProvider {
    name: String,
    products: HashMap<Identifier, PartialProductData>,
}

impl StaticCatalogProvider {
    /// Empty catalog.
    pub fn new(name: impl Into<String>) -> Self {
        StaticCatalogProvider {
            name: name.into(),
            products: HashMap::new(),
        }
    }

    /// Adds or replaces one product.
    pub fn insert(&mut self, id: Identifier, data: PartialProductData) {
        self.products.insert(id, data);
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with_product(mut self, id: Identifier, data: PartialProductData) -> Self {
        self.insert(id, data);
        self
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Loads a catalog file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let catalog = Self::from_toml_str(&contents).map_err(|e| match e {
            ConfigError::Parse { message, .. } => ConfigError::Parse {
                path: path.display().to_string(),
                message,
            },
            other => other,
        })?;

        info!(?path, products = catalog.len(), "Loaded static catalog");
        Ok(catalog)
    }

    /// Parses catalog TOML. Every entry needs exactly one of `ean` / `sku`.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let file: CatalogFile = toml::from_str(contents).map_err(|e| ConfigError::Parse {
            path: "<catalog>".to_string(),
            message: e.to_string(),
        })?;

        let mut catalog = StaticCatalogProvider::new(CATALOG_PROVIDER_NAME);
        for (index, entry) in file.products.into_iter().enumerate() {
            let invalid = |reason: String| {
                ConfigError::Invalid(format!("catalog entry {}: {}", index + 1, reason))
            };

            let id = SearchRequest {
                ean: entry.ean,
                sku: entry.sku,
            }
            .identifier()
            .map_err(|e| invalid(e.to_string()))?;

            let price = entry
                .price
                .as_deref()
                .map(Money::parse_decimal)
                .transpose()
                .map_err(|e| invalid(e.to_string()))?;

            catalog.insert(
                id,
                PartialProductData {
                    name: entry.name,
                    brand: entry.brand,
                    category: entry.category,
                    source_description: entry.description,
                    source_language: entry.language,
                    price,
                    image_url: entry.image_url,
                },
            );
        }

        Ok(catalog)
    }
}

#[async_trait]
impl SourceProvider for StaticCatalogProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self, id: &Identifier) -> Result<Option<PartialProductData>, ProviderError> {
        let hit = self.products.get(id).cloned();
        debug!(provider = %self.name, identifier = %id, hit = hit.is_some(), "Catalog lookup");
        Ok(hit)
    }
}
