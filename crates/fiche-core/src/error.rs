//! # Error Types
//!
//! Domain-specific error types for fiche-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  fiche-core errors (this file)                                         │
//! │  ├── ValidationError  - Input validation failures (user-visible)       │
//! │  └── ExportError      - Export defects (never user-facing)             │
//! │                                                                         │
//! │  fiche-store errors (separate crate)                                   │
//! │  └── StoreError       - Persistence failures                           │
//! │                                                                         │
//! │  fiche-pipeline errors (separate crate)                                │
//! │  ├── ProviderError    - Recovered inside the resolver                  │
//! │  └── TranslationError - Recovered inside the synthesizer               │
//! │                                                                         │
//! │  Flow: ValidationError → PipelineError → ApiError → HTTP 400           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Messages are shown to the caller as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Invalid format (non-digit EAN, bad SKU characters, bad price).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// EAN length is not one of the accepted GTIN lengths.
    #[error("{field} must have {expected} digits, got {actual}")]
    InvalidLength {
        field: String,
        expected: String,
        actual: usize,
    },

    /// EAN check digit does not match the body.
    #[error("{field} check digit is {actual}, expected {expected}")]
    InvalidChecksum {
        field: String,
        expected: u8,
        actual: u8,
    },

    /// Exactly one of several fields must be given.
    #[error("exactly one of {fields:?} must be provided")]
    ExactlyOne { fields: Vec<String> },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Export Error
// =============================================================================

/// Export failures.
///
/// The export mapper is total, so any of these is an internal defect rather
/// than something a caller can fix.
#[derive(Debug, Error)]
pub enum ExportError {
    /// A row did not carry the fixed column set.
    #[error("Export schema violation: expected {expected} columns, got {actual}")]
    SchemaViolation { expected: usize, actual: usize },

    /// The delimited-text writer failed.
    #[error("Export write failed: {0}")]
    Write(String),
}

impl From<csv::Error> for ExportError {
    fn from(err: csv::Error) -> Self {
        ExportError::Write(err.to_string())
    }
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================
