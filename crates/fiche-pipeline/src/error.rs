//! # Pipeline Error Types
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Pipeline Error Categories                          │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  ProviderError  │  │TranslationError │  │      SinkError          │ │
//! │  │  (degrades)     │  │  (degrades)     │  │  (publish only)         │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  Unavailable    │  │  Unavailable    │  │  Http                   │ │
//! │  │  Timeout        │  │  Timeout        │  │  Rejected               │ │
//! │  │  Http / Parse   │  │  Http / Parse   │  │                         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │                                                                         │
//! │  ┌─────────────────────────────────────┐  ┌─────────────────────────┐ │
//! │  │           PipelineError             │  │      ConfigError        │ │
//! │  │  InvalidIdentifier (user-visible)   │  │  Io / Parse / Invalid   │ │
//! │  │  Store (internal)                   │  │                         │ │
//! │  └─────────────────────────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Provider and translation failures never leave the pipeline: the resolver
//! and synthesizer log them and fall back.

use std::time::Duration;

use fiche_core::ValidationError;
use fiche_store::StoreError;
use thiserror::Error;

/// Result type alias for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

// =============================================================================
// Provider Errors
// =============================================================================

/// A source provider could not answer.
///
/// ## When This Occurs
/// - The remote API is down or refuses the connection
/// - The call exceeds the provider timeout
/// - The response is not the JSON the provider expects
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Provider is not reachable or not configured.
    #[error("Provider unavailable: {0}")]
    Unavailable(String),

    /// Provider did not answer in time.
    #[error("Provider timed out after {0:?}")]
    Timeout(Duration),

    /// Provider answered with a non-success status.
    #[error("Provider returned HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// Provider response could not be decoded.
    #[error("Provider response could not be parsed: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ProviderError::Parse(err.to_string())
        } else {
            ProviderError::Unavailable(err.to_string())
        }
    }
}

// =============================================================================
// Translation Errors
// =============================================================================

/// Translation could not produce French text.
///
/// ## When This Occurs
/// - No translation endpoint is configured (`DisabledTranslator`)
/// - The service is down, slow, or returns an error status
/// - The service returns an empty translation
#[derive(Debug, Error)]
pub enum TranslationError {
    /// Translation service not configured or not reachable.
    #[error("Translation unavailable: {0}")]
    Unavailable(String),

    /// Translation did not finish in time.
    #[error("Translation timed out after {0:?}")]
    Timeout(Duration),

    /// Translation service answered with a non-success status.
    #[error("Translation service returned HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// Translation response could not be decoded.
    #[error("Translation response could not be parsed: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for TranslationError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            TranslationError::Parse(err.to_string())
        } else {
            TranslationError::Unavailable(err.to_string())
        }
    }
}

// =============================================================================
// Sink Errors
// =============================================================================

/// Publishing a record to the catalog platform failed.
#[derive(Debug, Error)]
pub enum SinkError {
    /// Catalog platform not reachable.
    #[error("Catalog platform unreachable: {0}")]
    Http(String),

    /// Catalog platform refused the payload.
    #[error("Catalog platform rejected the product (HTTP {status}): {message}")]
    Rejected { status: u16, message: String },
}

impl From<reqwest::Error> for SinkError {
    fn from(err: reqwest::Error) -> Self {
        SinkError::Http(err.to_string())
    }
}

// =============================================================================
// Pipeline Errors
// =============================================================================

/// Errors a lookup can return to its caller.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The identifier was rejected before any lookup happened.
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(#[from] ValidationError),

    /// The finalized record could not be stored.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

// =============================================================================
// Configuration Errors
// =============================================================================

/// Pipeline configuration could not be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config or catalog file could not be read.
    #[error("Failed to read {path}: {message}")]
    Io { path: String, message: String },

    /// File is not valid TOML for the expected shape.
    #[error("Failed to parse {path}: {message}")]
    Parse { path: String, message: String },

    /// A value is present but unusable.
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl From<url::ParseError> for ConfigError {
    fn from(err: url::ParseError) -> Self {
        ConfigError::Invalid(format!("invalid URL: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_identifier_message_carries_reason() {
        let err = PipelineError::from(ValidationError::Required {
            field: "sku".to_string(),
        });
        assert!(matches!(err, PipelineError::InvalidIdentifier(_)));
        assert!(err.to_string().starts_with("Invalid identifier: "));
    }

    #[test]
    fn test_timeout_messages() {
        let err = ProviderError::Timeout(Duration::from_secs(5));
        assert_eq!(err.to_string(), "Provider timed out after 5s");

        let err = TranslationError::Timeout(Duration::from_millis(250));
        assert_eq!(err.to_string(), "Translation timed out after 250ms");
    }
}
