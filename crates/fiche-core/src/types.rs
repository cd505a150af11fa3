//! # Domain Types
//!
//! Core domain types used throughout the product sheet pipeline.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────────┐   ┌─────────────────┐   │
//! │  │   Identifier    │   │ PartialProductData  │   │  ProductRecord  │   │
//! │  │  ─────────────  │   │  ─────────────────  │   │  ─────────────  │   │
//! │  │  kind (EAN/SKU) │   │  name? brand?       │   │  identifier     │   │
//! │  │  value          │   │  category?          │   │  name? ...      │   │
//! │  └─────────────────┘   │  source_description?│   │  french_desc?   │   │
//! │                        │  price? image_url?  │   │  found          │   │
//! │                        └─────────────────────┘   └────────┬────────┘   │
//! │                         (one provider answer)             │            │
//! │                                                           ▼            │
//! │                                                   ┌─────────────────┐  │
//! │                                                   │   ProductView   │  │
//! │                                                   │ (presentation)  │  │
//! │                                                   └─────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Record Lifecycle
//! ```text
//! Resolver ──► ProductRecord (french_description = None)
//!                  │
//!                  ▼
//! Synthesizer ──► with_french_description(..)   ← only place it is set
//!                  │
//!                  ▼
//! Store.put ──► read-only until the next explicit lookup overwrites it
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ValidationError, ValidationResult};
use crate::money::Money;
use crate::validation;

// =============================================================================
// Identifier Kind
// =============================================================================

/// Which kind of product identifier a value is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentifierKind {
    /// EAN-8 / UPC-A / EAN-13 barcode.
    Ean,
    /// Merchant stock keeping unit.
    Sku,
}

impl IdentifierKind {
    /// Maps a request field / path segment name to a kind.
    ///
    /// ## Example
    /// ```rust
    /// use fiche_core::IdentifierKind;
    ///
    /// assert_eq!(IdentifierKind::from_field_name("ean").unwrap(), IdentifierKind::Ean);
    /// assert!(IdentifierKind::from_field_name("isbn").is_err());
    /// ```
    pub fn from_field_name(field: &str) -> ValidationResult<Self> {
        match field.trim().to_ascii_lowercase().as_str() {
            "ean" => Ok(IdentifierKind::Ean),
            "sku" => Ok(IdentifierKind::Sku),
            _ => Err(ValidationError::NotAllowed {
                field: "identifier type".to_string(),
                allowed: vec!["ean".to_string(), "sku".to_string()],
            }),
        }
    }

    /// Lowercase field name (`ean` / `sku`).
    pub const fn field_name(&self) -> &'static str {
        match self {
            IdentifierKind::Ean => "ean",
            IdentifierKind::Sku => "sku",
        }
    }

    /// Uppercase label used in views and generated names.
    pub const fn label(&self) -> &'static str {
        match self {
            IdentifierKind::Ean => "EAN",
            IdentifierKind::Sku => "SKU",
        }
    }
}

impl fmt::Display for IdentifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Identifier
// =============================================================================

/// A validated, normalized product identifier.
///
/// Fields are private: the only ways to obtain one are the functions in
/// [`crate::validation`] and deserialization, which re-validates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "IdentifierRepr")]
pub struct Identifier {
    kind: IdentifierKind,
    value: String,
}

/// Wire shape of an identifier; validated before becoming an [`Identifier`].
#[derive(Deserialize)]
struct IdentifierRepr {
    kind: IdentifierKind,
    value: String,
}

impl TryFrom<IdentifierRepr> for Identifier {
    type Error = ValidationError;

    fn try_from(repr: IdentifierRepr) -> Result<Self, Self::Error> {
        validation::validate(repr.kind, &repr.value)
    }
}

impl Identifier {
    /// Only called by the validators once every rule has passed.
    pub(crate) fn from_validated(kind: IdentifierKind, value: String) -> Self {
        Identifier { kind, value }
    }

    /// Returns the identifier kind.
    #[inline]
    pub fn kind(&self) -> IdentifierKind {
        self.kind
    }

    /// Returns the normalized value.
    #[inline]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// True for EAN identifiers.
    #[inline]
    pub fn is_ean(&self) -> bool {
        self.kind == IdentifierKind::Ean
    }

    /// Key used by persistent stores: `ean:<value>` / `sku:<value>`.
    ///
    /// An EAN and a SKU with the same characters are different products.
    pub fn storage_key(&self) -> String {
        format!("{}:{}", self.kind.field_name(), self.value)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind.label(), self.value)
    }
}

// =============================================================================
// Search Request
// =============================================================================

/// Lookup request carrying exactly one of `ean` / `sku`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchRequest {
    /// EAN code (8, 12 or 13 digits).
    #[serde(default)]
    pub ean: Option<String>,
    /// Merchant SKU.
    #[serde(default)]
    pub sku: Option<String>,
}

impl SearchRequest {
    /// Picks the field that was supplied and validates it.
    ///
    /// Blank strings count as absent. Supplying both fields is rejected
    /// rather than guessing which one the caller meant.
    pub fn identifier(&self) -> ValidationResult<Identifier> {
        fn present(v: &Option<String>) -> Option<&str> {
            v.as_deref().filter(|s| !s.trim().is_empty())
        }

        match (present(&self.ean), present(&self.sku)) {
            (Some(ean), None) => validation::validate_ean(ean),
            (None, Some(sku)) => validation::validate_sku(sku),
            _ => Err(ValidationError::ExactlyOne {
                fields: vec!["ean".to_string(), "sku".to_string()],
            }),
        }
    }
}

// =============================================================================
// Partial Product Data
// =============================================================================

/// What a single source provider knows about a product.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialProductData {
    pub name: Option<String>,
    /// Manufacturer or brand name.
    pub brand: Option<String>,
    pub category: Option<String>,
    /// Description in the provider's language.
    pub source_description: Option<String>,
    /// ISO 639-1 code of `source_description` (`en` when unknown).
    pub source_language: Option<String>,
    pub price: Option<Money>,
    pub image_url: Option<String>,
}

impl PartialProductData {
    /// True when no product attribute is present.
    ///
    /// `source_language` alone does not describe a product.
    pub fn is_empty(&self) -> bool {
        let blank = |v: &Option<String>| v.as_deref().map_or(true, |s| s.trim().is_empty());

        blank(&self.name)
            && blank(&self.brand)
            && blank(&self.category)
            && blank(&self.source_description)
            && blank(&self.image_url)
            && self.price.is_none()
    }
}

// =============================================================================
// Product Record
// =============================================================================

/// The product sheet for one identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    /// The key.
    pub identifier: Identifier,
    pub name: Option<String>,
    /// Not part of the export columns; carried to the catalog payload.
    #[serde(default)]
    pub brand: Option<String>,
    pub category: Option<String>,
    /// Description as the provider returned it.
    pub source_description: Option<String>,
    pub source_language: Option<String>,
    /// Set by the synthesizer and nowhere else.
    pub french_description: Option<String>,
    pub price: Option<Money>,
    pub image_url: Option<String>,
    /// True only if a source provider returned data.
    pub found: bool,
    /// Name of the provider that supplied the data.
    pub source: Option<String>,
    pub looked_up_at: DateTime<Utc>,
}

impl ProductRecord {
    /// Record for an identifier no provider knows about.
    pub fn not_found(identifier: Identifier, looked_up_at: DateTime<Utc>) -> Self {
        ProductRecord {
            identifier,
            name: None,
            brand: None,
            category: None,
            source_description: None,
            source_language: None,
            french_description: None,
            price: None,
            image_url: None,
            found: false,
            source: None,
            looked_up_at,
        }
    }

    /// Record built from the winning provider's answer.
    ///
    /// Blank strings are dropped so downstream code only sees `Some` for
    /// real values.
    pub fn from_partial(
        identifier: Identifier,
        data: PartialProductData,
        source: impl Into<String>,
        looked_up_at: DateTime<Utc>,
    ) -> Self {
        ProductRecord {
            identifier,
            name: non_blank(data.name),
            brand: non_blank(data.brand),
            category: non_blank(data.category),
            source_description: non_blank(data.source_description),
            source_language: non_blank(data.source_language),
            french_description: None,
            price: data.price,
            image_url: non_blank(data.image_url),
            found: true,
            source: Some(source.into()),
            looked_up_at,
        }
    }

    /// Returns the record with its French description set.
    pub fn with_french_description(mut self, description: impl Into<String>) -> Self {
        self.french_description = Some(description.into());
        self
    }

    /// True once the synthesizer has run.
    pub fn is_synthesized(&self) -> bool {
        self.french_description.is_some()
    }

    /// Name to show when the record has none: `Produit EAN 4006381333931`.
    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!(
                "Produit {} {}",
                self.identifier.kind().label(),
                self.identifier.value()
            ),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

// =============================================================================
// Product View
// =============================================================================

/// Read-only projection of a record for the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductView {
    pub identifier: String,
    pub identifier_type: String,
    pub found: bool,
    pub name: Option<String>,
    pub brand: Option<String>,
    pub category: Option<String>,
    pub description: String,
    /// Export format (`12.50`).
    pub price: Option<String>,
    /// Display format (`12,50 €`).
    pub price_display: Option<String>,
    pub image: Option<String>,
    pub source: Option<String>,
    pub looked_up_at: DateTime<Utc>,
}

impl From<&ProductRecord> for ProductView {
    fn from(record: &ProductRecord) -> Self {
        ProductView {
            identifier: record.identifier.value().to_string(),
            identifier_type: record.identifier.kind().label().to_string(),
            found: record.found,
            name: record.name.clone(),
            brand: record.brand.clone(),
            category: record.category.clone(),
            description: record.french_description.clone().unwrap_or_default(),
            price: record.price.map(|p| p.to_decimal_string()),
            price_display: record.price.map(|p| p.to_string()),
            image: record.image_url.clone(),
            source: record.source.clone(),
            looked_up_at: record.looked_up_at,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{validate_ean, validate_sku};
    use chrono::TimeZone;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_identifier_display_and_key() {
        let id = validate_ean("4006381333931").unwrap();
        assert_eq!(id.to_string(), "EAN:4006381333931");
        assert_eq!(id.storage_key(), "ean:4006381333931");

        let sku = validate_sku("ABC123").unwrap();
        assert_eq!(sku.storage_key(), "sku:ABC123");
    }

    #[test]
    fn test_identifier_deserialization_revalidates() {
        let ok: Identifier =
            serde_json::from_str(r#"{"kind":"ean","value":"4006381333931"}"#).unwrap();
        assert!(ok.is_ean());

        let bad = serde_json::from_str::<Identifier>(r#"{"kind":"ean","value":"1234567890123"}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn test_search_request_requires_exactly_one() {
        let req = SearchRequest {
            ean: Some("4006381333931".to_string()),
            sku: None,
        };
        assert_eq!(req.identifier().unwrap().kind(), IdentifierKind::Ean);

        let req = SearchRequest {
            ean: Some("  ".to_string()),
            sku: Some("ABC123".to_string()),
        };
        assert_eq!(req.identifier().unwrap().kind(), IdentifierKind::Sku);

        let both = SearchRequest {
            ean: Some("4006381333931".to_string()),
            sku: Some("ABC123".to_string()),
        };
        assert!(matches!(
            both.identifier(),
            Err(ValidationError::ExactlyOne { .. })
        ));

        assert!(SearchRequest::default().identifier().is_err());
    }

    #[test]
    fn test_partial_data_is_empty() {
        assert!(PartialProductData::default().is_empty());

        let only_language = PartialProductData {
            source_language: Some("en".to_string()),
            name: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(only_language.is_empty());

        let branded = PartialProductData {
            brand: Some("Ferrero".to_string()),
            ..Default::default()
        };
        assert!(!branded.is_empty());

        let priced = PartialProductData {
            price: Some(Money::from_cents(100)),
            ..Default::default()
        };
        assert!(!priced.is_empty());
    }

    #[test]
    fn test_not_found_record_is_empty() {
        let record = ProductRecord::not_found(validate_sku("ABC123").unwrap(), at());
        assert!(!record.found);
        assert!(record.name.is_none());
        assert!(record.price.is_none());
        assert!(!record.is_synthesized());
        assert_eq!(record.display_name(), "Produit SKU ABC123");
    }

    #[test]
    fn test_from_partial_drops_blank_fields() {
        let data = PartialProductData {
            name: Some(" Widget ".to_string()),
            brand: Some(" ".to_string()),
            category: Some("".to_string()),
            ..Default::default()
        };
        let record =
            ProductRecord::from_partial(validate_sku("W-1").unwrap(), data, "catalog", at());
        assert!(record.found);
        assert_eq!(record.name.as_deref(), Some("Widget"));
        assert!(record.brand.is_none());
        assert!(record.category.is_none());
        assert_eq!(record.source.as_deref(), Some("catalog"));
    }

    #[test]
    fn test_record_without_brand_deserializes() {
        let record = ProductRecord::not_found(validate_sku("ABC123").unwrap(), at());
        let mut json = serde_json::to_value(&record).unwrap();
        json.as_object_mut().unwrap().remove("brand");

        let restored: ProductRecord = serde_json::from_value(json).unwrap();
        assert_eq!(restored, record);
    }

    #[test]
    fn test_view_projection() {
        let record = ProductRecord::from_partial(
            validate_ean("4006381333931").unwrap(),
            PartialProductData {
                name: Some("Widget".to_string()),
                brand: Some("Acme".to_string()),
                price: Some(Money::from_cents(1250)),
                ..Default::default()
            },
            "catalog",
            at(),
        )
        .with_french_description("Un widget.");

        let view = ProductView::from(&record);
        assert_eq!(view.identifier_type, "EAN");
        assert_eq!(view.brand.as_deref(), Some("Acme"));
        assert_eq!(view.description, "Un widget.");
        assert_eq!(view.price.as_deref(), Some("12.50"));
        assert_eq!(view.price_display.as_deref(), Some("12,50 €"));
    }
}
