//! # Description Synthesizer
//!
//! Gives every record a non-empty French description. The decision order is
//! documented in `fiche_core::description`; this module adds the translation
//! call and its time bound.

use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use fiche_core::description::{finish_sentence, generic_description, is_french, NOT_FOUND_DESCRIPTION};
use fiche_core::{ProductRecord, DEFAULT_SOURCE_LANGUAGE, TARGET_LANGUAGE};

use crate::error::TranslationError;
use crate::translate::Translator;

/// Produces `french_description` for resolved records.
#[derive(Clone)]
pub struct DescriptionSynthesizer {
    translator: Arc<dyn Translator>,
    translation_timeout: Duration,
}

impl DescriptionSynthesizer {
    pub fn new(translator: Arc<dyn Translator>, translation_timeout: Duration) -> Self {
        DescriptionSynthesizer {
            translator,
            translation_timeout,
        }
    }

    pub fn translator_name(&self) -> &str {
        self.translator.name()
    }

    /// Returns the record with `french_description` set. Never fails.
    pub async fn synthesize(&self, record: ProductRecord) -> ProductRecord {
        if !record.found {
            return record.with_french_description(NOT_FOUND_DESCRIPTION);
        }

        if let Some(french) = self.french_from_source(&record).await {
            return record.with_french_description(french);
        }

        let generic = generic_description(record.name.as_deref(), record.category.as_deref());
        debug!(identifier = %record.identifier, "Using generic description");
        record.with_french_description(generic)
    }

    async fn french_from_source(&self, record: &ProductRecord) -> Option<String> {
        let text = record
            .source_description
            .as_deref()
            .filter(|s| !s.trim().is_empty())?;
        let language = record
            .source_language
            .as_deref()
            .unwrap_or(DEFAULT_SOURCE_LANGUAGE);

        if is_french(language) {
            return finish_sentence(text);
        }

        match self.translate_bounded(text, language).await {
            Ok(translated) => {
                let sentence = finish_sentence(&translated);
                if sentence.is_none() {
                    warn!(identifier = %record.identifier, "Translation came back empty");
                }
                sentence
            }
            Err(e) => {
                warn!(
                    identifier = %record.identifier,
                    translator = self.translator.name(),
                    error = %e,
                    "Translation unavailable, falling back to template"
                );
                None
            }
        }
    }

    async fn translate_bounded(&self, text: &str, source: &str) -> Result<String, TranslationError> {
        tokio::time::timeout(
            self.translation_timeout,
            self.translator.translate(text, source, TARGET_LANGUAGE),
        )
        .await
        .map_err(|_| TranslationError::Timeout(self.translation_timeout))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use fiche_core::validation::validate_sku;
    use fiche_core::PartialProductData;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Prefixes the text so tests can tell it went through translation.
    #[derive(Default)]
    struct EchoTranslator {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl Translator for EchoTranslator {
        fn name(&self) -> &str {
            "echo"
        }

        async fn translate(&self, text: &str, source: &str, target: &str) -> Result<String, TranslationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(format!("[{}→{}] {}", source, target, text))
        }
    }

    struct BlankTranslator;

    #[async_trait]
    impl Translator for BlankTranslator {
        fn name(&self) -> &str {
            "blank"
        }

        async fn translate(&self, _: &str, _: &str, _: &str) -> Result<String, TranslationError> {
            Ok("   ".to_string())
        }
    }

    struct StuckTranslator;

    #[async_trait]
    impl Translator for StuckTranslator {
        fn name(&self) -> &str {
            "stuck"
        }

        async fn translate(&self, _: &str, _: &str, _: &str) -> Result<String, TranslationError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok("trop tard".to_string())
        }
    }

    fn found(data: PartialProductData) -> ProductRecord {
        ProductRecord::from_partial(validate_sku("ABC123").unwrap(), data, "test", Utc::now())
    }

    fn widget_with_description(language: Option<&str>) -> ProductRecord {
        found(PartialProductData {
            name: Some("Widget".to_string()),
            category: Some("Tools".to_string()),
            source_description: Some("A sturdy widget".to_string()),
            source_language: language.map(str::to_string),
            ..Default::default()
        })
    }

    fn synthesizer(translator: Arc<dyn Translator>) -> DescriptionSynthesizer {
        DescriptionSynthesizer::new(translator, Duration::from_secs(5))
    }

    #[tokio::test]
    async fn test_not_found_gets_fixed_message() {
        let record = ProductRecord::not_found(validate_sku("NOPE").unwrap(), Utc::now());
        let translator = Arc::new(EchoTranslator::default());

        let out = synthesizer(translator.clone()).synthesize(record).await;

        assert_eq!(out.french_description.as_deref(), Some(NOT_FOUND_DESCRIPTION));
        assert_eq!(translator.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_source_description_is_translated() {
        let out = synthesizer(Arc::new(EchoTranslator::default()))
            .synthesize(widget_with_description(None))
            .await;

        assert_eq!(out.french_description.as_deref(), Some("[en→fr] A sturdy widget."));
    }

    #[tokio::test]
    async fn test_french_source_is_kept() {
        let translator = Arc::new(EchoTranslator::default());
        let out = synthesizer(translator.clone())
            .synthesize(widget_with_description(Some("fr")))
            .await;

        assert_eq!(out.french_description.as_deref(), Some("A sturdy widget."));
        assert_eq!(translator.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_translation_failure_falls_back_to_template() {
        let out = synthesizer(Arc::new(crate::translate::DisabledTranslator))
            .synthesize(widget_with_description(Some("en")))
            .await;

        assert_eq!(
            out.french_description.as_deref(),
            Some("Widget est un produit de la catégorie Tools.")
        );
    }

    #[tokio::test]
    async fn test_blank_translation_falls_back_to_template() {
        let out = synthesizer(Arc::new(BlankTranslator))
            .synthesize(widget_with_description(Some("de")))
            .await;

        assert_eq!(
            out.french_description.as_deref(),
            Some("Widget est un produit de la catégorie Tools.")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_translation_timeout_falls_back_to_template() {
        let out = synthesizer(Arc::new(StuckTranslator))
            .synthesize(widget_with_description(Some("en")))
            .await;

        assert_eq!(
            out.french_description.as_deref(),
            Some("Widget est un produit de la catégorie Tools.")
        );
    }

    #[tokio::test]
    async fn test_found_without_anything_uses_placeholders() {
        let record = found(PartialProductData {
            image_url: Some("https://img.example/x.png".to_string()),
            ..Default::default()
        });

        let out = synthesizer(Arc::new(EchoTranslator::default()))
            .synthesize(record)
            .await;

        assert_eq!(
            out.french_description.as_deref(),
            Some("Ce produit est un produit de la catégorie général.")
        );
    }
}
