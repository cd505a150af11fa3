//! # Translation
//!
//! The synthesizer only sees the [`Translator`] trait. Which service sits
//! behind it is decided when the pipeline is assembled.

use async_trait::async_trait;

use crate::error::TranslationError;

pub mod libretranslate;

pub use libretranslate::LibreTranslateClient;

/// Machine translation capability.
#[async_trait]
pub trait Translator: Send + Sync {
    fn name(&self) -> &str;

    /// Translates `text` from `source` to `target` (ISO 639-1 codes).
    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, TranslationError>;
}

/// Used when no translation service is configured. Every call fails, so
/// the synthesizer always falls back to its template.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledTranslator;

#[async_trait]
impl Translator for DisabledTranslator {
    fn name(&self) -> &str {
        "disabled"
    }

    async fn translate(
        &self,
        _text: &str,
        _source: &str,
        _target: &str,
    ) -> Result<String, TranslationError> {
        Err(TranslationError::Unavailable(
            "no translation service configured".into(),
        ))
    }
}
