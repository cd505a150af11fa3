//! # Product Sheet Pipeline
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     ProductSheetPipeline::lookup                        │
//! │                                                                         │
//! │  SearchRequest ──► validate ──► resolve ──► synthesize ──► store.put   │
//! │                       │            │            │              │        │
//! │                  InvalidIdentifier │       never fails     Store error  │
//! │                  (only user-facing │                        (internal)  │
//! │                   failure)    never fails                               │
//! │                                                                         │
//! │  Export and publishing read the stored record afterwards.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;
use tracing::{info, instrument};

use fiche_core::{Identifier, ProductRecord, SearchRequest};
use fiche_store::RecordStore;

use crate::config::PipelineConfig;
use crate::error::{ConfigError, PipelineResult};
use crate::provider::{OpenFoodFactsProvider, SourceProvider, StaticCatalogProvider};
use crate::resolver::LookupResolver;
use crate::sink::{CatalogSink, PrestaShopSink};
use crate::synthesizer::DescriptionSynthesizer;
use crate::translate::{DisabledTranslator, LibreTranslateClient, Translator};

/// Wires validator, resolver, synthesizer and store together.
#[derive(Clone)]
pub struct ProductSheetPipeline {
    resolver: LookupResolver,
    synthesizer: DescriptionSynthesizer,
    store: Arc<dyn RecordStore>,
    sink: Option<Arc<dyn CatalogSink>>,
}

impl ProductSheetPipeline {
    pub fn new(
        resolver: LookupResolver,
        synthesizer: DescriptionSynthesizer,
        store: Arc<dyn RecordStore>,
    ) -> Self {
        ProductSheetPipeline {
            resolver,
            synthesizer,
            store,
            sink: None,
        }
    }

    /// Enables publishing.
    pub fn with_sink(mut self, sink: Arc<dyn CatalogSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Assembles the pipeline described by `config`.
    ///
    /// Provider order: static catalog (if configured), then Open Food Facts
    /// (if enabled). Translation is disabled without an endpoint URL.
    pub fn from_config(config: &PipelineConfig, store: Arc<dyn RecordStore>) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut providers: Vec<Arc<dyn SourceProvider>> = Vec::new();
        if let Some(ref path) = config.catalog_path {
            providers.push(Arc::new(StaticCatalogProvider::load(path)?));
        }
        if config.open_food_facts.enabled {
            let off = OpenFoodFactsProvider::new(config.open_food_facts.base_url.clone())
                .map_err(|e| ConfigError::Invalid(e.to_string()))?;
            providers.push(Arc::new(off));
        }

        let translator: Arc<dyn Translator> = match config.translation.url {
            Some(ref url) => Arc::new(
                LibreTranslateClient::new(url.clone(), config.translation.api_key.clone())
                    .map_err(|e| ConfigError::Invalid(e.to_string()))?,
            ),
            None => Arc::new(DisabledTranslator),
        };

        let resolver = LookupResolver::new(providers, config.provider_timeout());
        let synthesizer = DescriptionSynthesizer::new(translator, config.translation_timeout());

        info!(
            providers = ?resolver.provider_names(),
            translator = synthesizer.translator_name(),
            store = store.backend(),
            "Pipeline assembled"
        );

        let mut pipeline = ProductSheetPipeline::new(resolver, synthesizer, store);
        if let Some(ref shop) = config.prestashop {
            let sink = PrestaShopSink::new(shop.base_url.clone(), shop.api_key.clone())
                .map_err(|e| ConfigError::Invalid(e.to_string()))?;
            pipeline = pipeline.with_sink(Arc::new(sink));
        }
        Ok(pipeline)
    }

    /// Validates the request, then runs [`lookup_identifier`](Self::lookup_identifier).
    pub async fn lookup(&self, request: &SearchRequest) -> PipelineResult<ProductRecord> {
        let id = request.identifier()?;
        self.lookup_identifier(&id).await
    }

    /// Resolves, synthesizes and stores the record for `id`.
    ///
    /// A new lookup replaces any record already stored for the identifier.
    #[instrument(skip(self, id), fields(identifier = %id))]
    pub async fn lookup_identifier(&self, id: &Identifier) -> PipelineResult<ProductRecord> {
        let resolved = self.resolver.resolve(id).await;
        let record = self.synthesizer.synthesize(resolved).await;
        debug_assert!(record.is_synthesized(), "record stored without a description");

        self.store.put(record.clone()).await?;

        info!(found = record.found, source = ?record.source, "Lookup complete");
        Ok(record)
    }

    pub fn store(&self) -> &Arc<dyn RecordStore> {
        &self.store
    }

    /// The configured catalog sink, if publishing is enabled.
    pub fn sink(&self) -> Option<&Arc<dyn CatalogSink>> {
        self.sink.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TranslationSettings;
    use fiche_store::InMemoryStore;

    #[tokio::test]
    async fn test_from_config_without_remote_sources() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = dir.path().join("catalog.toml");
        std::fs::write(
            &catalog,
            "[[products]]\nsku = \"ABC123\"\nname = \"Widget\"\nbrand = \"Acme\"\ncategory = \"Outils\"\n",
        )
        .unwrap();

        let mut config = PipelineConfig::default();
        config.catalog_path = Some(catalog);
        config.open_food_facts.enabled = false;
        config.translation = TranslationSettings::default();

        let pipeline = ProductSheetPipeline::from_config(&config, Arc::new(InMemoryStore::new())).unwrap();
        assert!(pipeline.sink().is_none());

        let record = pipeline
            .lookup(&SearchRequest {
                sku: Some("ABC123".into()),
                ..Default::default()
            })
            .await
            .unwrap();

        assert!(record.found);
        assert!(record.is_synthesized());
        assert_eq!(record.source.as_deref(), Some("catalog"));
        assert_eq!(record.brand.as_deref(), Some("Acme"));
        assert_eq!(
            record.french_description.as_deref(),
            Some("Widget est un produit de la catégorie Outils.")
        );

        let stored = pipeline.store().get(&record.identifier).await.unwrap().unwrap();
        assert!(stored.is_synthesized());
        assert_eq!(stored, record);
        assert_eq!(pipeline.store().count().await.unwrap(), 1);
    }

    #[test]
    fn test_from_config_rejects_missing_catalog() {
        let mut config = PipelineConfig::default();
        config.catalog_path = Some("/nonexistent/catalog.toml".into());

        let result = ProductSheetPipeline::from_config(&config, Arc::new(InMemoryStore::new()));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
