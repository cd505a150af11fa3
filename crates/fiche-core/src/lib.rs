//! # fiche-core: Pure Logic for the Product Sheet Generator
//!
//! This crate is the **heart** of the product sheet pipeline. It holds every
//! rule that can be expressed without I/O: identifier validation, records,
//! description templates, the export schema and the catalog payload.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Product Sheet Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    apps/fiche-api (axum)                        │   │
//! │  │   POST /api/search ──► GET /api/products ──► GET /api/export    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │           fiche-pipeline (providers, translation)               │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ fiche-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │  ┌────────────┐ ┌──────────┐ ┌─────────────┐ ┌──────────────┐  │   │
//! │  │  │ validation │ │  types   │ │ description │ │    export    │  │   │
//! │  │  │ EAN / SKU  │ │ Record   │ │ templates   │ │ CSV columns  │  │   │
//! │  │  └────────────┘ └──────────┘ └─────────────┘ └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Identifier, ProductRecord, PartialProductData, ProductView
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - EAN / SKU validation
//! - [`description`] - French description templates
//! - [`export`] - Export row mapping and CSV rendering
//! - [`prestashop`] - PrestaShop Webservice product payload
//!
//! ## Example Usage
//!
//! ```rust
//! use fiche_core::validation::validate_ean;
//! use fiche_core::IdentifierKind;
//!
//! let id = validate_ean("4006381333931").unwrap();
//! assert_eq!(id.kind(), IdentifierKind::Ean);
//! assert_eq!(id.value(), "4006381333931");
//!
//! // Bad check digit
//! assert!(validate_ean("1234567890123").is_err());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod description;
pub mod error;
pub mod export;
pub mod money;
pub mod prestashop;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{ExportError, ValidationError};
pub use export::{to_export_row, write_csv, ExportRow};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Language every generated description is written in (ISO 639-1).
pub const TARGET_LANGUAGE: &str = "fr";

/// Language assumed for provider descriptions that do not declare one.
pub const DEFAULT_SOURCE_LANGUAGE: &str = "en";

/// Maximum SKU length accepted by the validator.
///
/// ## Business Reason
/// PrestaShop's `reference` column is 64 characters; 50 leaves room for
/// supplier prefixes added at import time.
pub const MAX_SKU_LENGTH: usize = 50;
