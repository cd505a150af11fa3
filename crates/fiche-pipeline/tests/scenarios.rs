//! End-to-end lookups through validator, resolver, synthesizer, store and
//! export, with stub providers and a stub translator.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use fiche_core::description::NOT_FOUND_DESCRIPTION;
use fiche_core::{to_export_row, write_csv, Identifier, PartialProductData, SearchRequest};
use fiche_pipeline::{
    DescriptionSynthesizer, LookupResolver, PipelineError, ProductSheetPipeline, ProviderError,
    SourceProvider, StaticCatalogProvider, TranslationError, Translator,
};
use fiche_store::{InMemoryStore, RecordStore};

// =============================================================================
// Stubs
// =============================================================================

/// Fake English→French translator with a tiny dictionary.
struct DictionaryTranslator;

#[async_trait]
impl Translator for DictionaryTranslator {
    fn name(&self) -> &str {
        "dictionary"
    }

    async fn translate(&self, text: &str, source: &str, target: &str) -> Result<String, TranslationError> {
        assert_eq!((source, target), ("en", "fr"));
        match text {
            "A sturdy widget." => Ok("Un widget robuste.".to_string()),
            other => Err(TranslationError::Unavailable(format!("no entry for {}", other))),
        }
    }
}

/// Counts calls and knows nothing.
#[derive(Default)]
struct CountingProvider {
    calls: AtomicUsize,
}

#[async_trait]
impl SourceProvider for CountingProvider {
    fn name(&self) -> &str {
        "counting"
    }

    async fn fetch(&self, _id: &Identifier) -> Result<Option<PartialProductData>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(None)
    }
}

struct Harness {
    pipeline: ProductSheetPipeline,
    store: Arc<InMemoryStore>,
    counter: Arc<CountingProvider>,
}

fn harness(catalog: StaticCatalogProvider) -> Harness {
    let store = Arc::new(InMemoryStore::new());
    let counter = Arc::new(CountingProvider::default());

    let providers: Vec<Arc<dyn SourceProvider>> = vec![Arc::new(catalog), counter.clone()];
    let resolver = LookupResolver::new(providers, Duration::from_secs(5));
    let synthesizer = DescriptionSynthesizer::new(Arc::new(DictionaryTranslator), Duration::from_secs(5));

    Harness {
        pipeline: ProductSheetPipeline::new(resolver, synthesizer, store.clone()),
        store,
        counter,
    }
}

fn ean(value: &str) -> SearchRequest {
    SearchRequest {
        ean: Some(value.to_string()),
        sku: None,
    }
}

fn sku(value: &str) -> SearchRequest {
    SearchRequest {
        ean: None,
        sku: Some(value.to_string()),
    }
}

fn widget(description: Option<&str>) -> PartialProductData {
    PartialProductData {
        name: Some("Widget".to_string()),
        category: Some("Tools".to_string()),
        source_description: description.map(str::to_string),
        ..Default::default()
    }
}

fn widget_catalog(description: Option<&str>) -> StaticCatalogProvider {
    let id = ean("4006381333931").identifier().unwrap();
    StaticCatalogProvider::new("stub").with_product(id, widget(description))
}

// =============================================================================
// Scenarios
// =============================================================================

#[tokio::test]
async fn unknown_sku_yields_not_found_sheet() {
    let h = harness(StaticCatalogProvider::new("empty"));

    let record = h.pipeline.lookup(&sku("ABC123")).await.unwrap();

    assert!(!record.found);
    assert_eq!(record.french_description.as_deref(), Some(NOT_FOUND_DESCRIPTION));

    let row = to_export_row(&record);
    assert_eq!(row.get("Description"), Some(NOT_FOUND_DESCRIPTION));
    assert_eq!(row.get("Identifier"), Some("ABC123"));
    assert_eq!(row.get("Name"), Some(""));

    assert_eq!(h.store.get(&record.identifier).await.unwrap(), Some(record));
}

#[tokio::test]
async fn english_description_is_translated() {
    let h = harness(widget_catalog(Some("A sturdy widget.")));

    let record = h.pipeline.lookup(&ean("4006381333931")).await.unwrap();

    assert!(record.found);
    assert_eq!(record.source.as_deref(), Some("stub"));
    assert_eq!(record.french_description.as_deref(), Some("Un widget robuste."));
    assert_eq!(h.counter.calls.load(Ordering::SeqCst), 0);

    let row = to_export_row(&record);
    assert_eq!(row.get("Name"), Some("Widget"));
    assert_eq!(row.get("Category"), Some("Tools"));
    assert_eq!(row.get("Description"), Some("Un widget robuste."));
    assert_eq!(row.get("Identifier"), Some("4006381333931"));
}

#[tokio::test]
async fn missing_description_uses_generic_sentence() {
    let h = harness(widget_catalog(None));

    let record = h.pipeline.lookup(&ean("4006381333931")).await.unwrap();

    assert_eq!(
        record.french_description.as_deref(),
        Some("Widget est un produit de la catégorie Tools.")
    );
}

#[tokio::test]
async fn bad_checksum_never_reaches_resolver() {
    let h = harness(StaticCatalogProvider::new("empty"));

    let err = h.pipeline.lookup(&ean("1234567890123")).await.unwrap_err();

    assert!(matches!(err, PipelineError::InvalidIdentifier(_)));
    assert_eq!(h.counter.calls.load(Ordering::SeqCst), 0);
    assert_eq!(h.store.count().await.unwrap(), 0);
}

// =============================================================================
// Store and export behavior across lookups
// =============================================================================

#[tokio::test]
async fn both_or_neither_field_is_rejected() {
    let h = harness(StaticCatalogProvider::new("empty"));

    let both = SearchRequest {
        ean: Some("4006381333931".to_string()),
        sku: Some("ABC123".to_string()),
    };
    assert!(matches!(
        h.pipeline.lookup(&both).await,
        Err(PipelineError::InvalidIdentifier(_))
    ));
    assert!(matches!(
        h.pipeline.lookup(&SearchRequest::default()).await,
        Err(PipelineError::InvalidIdentifier(_))
    ));
}

#[tokio::test]
async fn relookup_overwrites_and_keeps_order() {
    let h = harness(widget_catalog(Some("A sturdy widget.")));

    h.pipeline.lookup(&ean("4006381333931")).await.unwrap();
    h.pipeline.lookup(&sku("ABC123")).await.unwrap();
    h.pipeline.lookup(&ean("4006381333931")).await.unwrap();

    let records = h.store.list().await.unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].identifier.value(), "4006381333931");
    assert_eq!(records[1].identifier.value(), "ABC123");
}

#[tokio::test]
async fn export_of_all_records_is_deterministic() {
    let h = harness(widget_catalog(Some("A sturdy widget.")));
    h.pipeline.lookup(&ean("4006381333931")).await.unwrap();
    h.pipeline.lookup(&sku("ABC123")).await.unwrap();

    let rows: Vec<_> = h.store.list().await.unwrap().iter().map(to_export_row).collect();
    let first = write_csv(&rows).unwrap();
    let second = write_csv(&rows).unwrap();

    assert_eq!(first, second);
    assert_eq!(first.lines().count(), 3);
    assert!(first.starts_with("Name;Price;Description;Identifier;Category;Image URL"));
}
