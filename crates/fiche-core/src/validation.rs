//! # Validation Module
//!
//! Identifier validation for the product sheet pipeline.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Identifier Validation                              │
//! │                                                                         │
//! │  Request: { "ean": " 4006381333931 " }                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Field name decides the kind (ean → EAN, sku → SKU)                    │
//! │  The validator NEVER guesses from the shape of the value               │
//! │       │                                                                 │
//! │       ├── EAN: trim → digits only → length 8/12/13 → check digit       │
//! │       │                                                                 │
//! │       └── SKU: trim → non-empty → ≤ 50 chars → [A-Za-z0-9._-]          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Identifier (immutable, normalized)                                    │
//! │                                                                         │
//! │  Any failure → ValidationError → HTTP 400, pipeline never resolves     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use fiche_core::validation::{validate, validate_sku};
//! use fiche_core::IdentifierKind;
//!
//! let sku = validate_sku("  ABC123 ").unwrap();
//! assert_eq!(sku.value(), "ABC123");
//!
//! let ean = validate(IdentifierKind::Ean, "4006381333931").unwrap();
//! assert_eq!(ean.kind(), IdentifierKind::Ean);
//! ```

use crate::error::{ValidationError, ValidationResult};
use crate::types::{Identifier, IdentifierKind};
use crate::MAX_SKU_LENGTH;

/// GTIN lengths accepted as "EAN": EAN-8, UPC-A, EAN-13.
pub const EAN_LENGTHS: [usize; 3] = [8, 12, 13];

// =============================================================================
// Entry Point
// =============================================================================

/// Validates `raw` as an identifier of the given kind.
///
/// The kind always comes from the caller (the request field name), so a
/// value like `"12345678"` that is both a valid EAN-8 and a valid SKU is
/// never ambiguous here.
pub fn validate(kind: IdentifierKind, raw: &str) -> ValidationResult<Identifier> {
    match kind {
        IdentifierKind::Ean => validate_ean(raw),
        IdentifierKind::Sku => validate_sku(raw),
    }
}

// =============================================================================
// EAN
// =============================================================================

/// Validates an EAN / GTIN barcode.
///
/// ## Rules
/// - Leading/trailing whitespace is ignored
/// - Must contain only ASCII digits
/// - Must be 8, 12 or 13 digits long
/// - Last digit must match the GS1 check digit of the others
///
/// ## Example
/// ```rust
/// use fiche_core::validation::validate_ean;
///
/// assert!(validate_ean("4006381333931").is_ok());  // EAN-13
/// assert!(validate_ean("96385074").is_ok());       // EAN-8
/// assert!(validate_ean("1234567890123").is_err()); // bad check digit
/// ```
pub fn validate_ean(raw: &str) -> ValidationResult<Identifier> {
    let ean = raw.trim();

    if ean.is_empty() {
        return Err(ValidationError::Required {
            field: "ean".to_string(),
        });
    }

    if !ean.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "ean".to_string(),
            reason: "must contain only digits".to_string(),
        });
    }

    if !EAN_LENGTHS.contains(&ean.len()) {
        return Err(ValidationError::InvalidLength {
            field: "ean".to_string(),
            expected: "8, 12 or 13".to_string(),
            actual: ean.len(),
        });
    }

    let (body, check) = ean.split_at(ean.len() - 1);
    let actual = check.as_bytes()[0] - b'0';
    // body is non-empty and all digits at this point
    let expected = ean_check_digit(body).ok_or_else(|| ValidationError::InvalidFormat {
        field: "ean".to_string(),
        reason: "must contain only digits".to_string(),
    })?;

    if actual != expected {
        return Err(ValidationError::InvalidChecksum {
            field: "ean".to_string(),
            expected,
            actual,
        });
    }

    Ok(Identifier::from_validated(IdentifierKind::Ean, ean.to_string()))
}

/// Computes the GS1 check digit for a GTIN body (all digits but the last).
///
/// ## Algorithm
/// ```text
/// Body:    4 0 0 6 3 8 1 3 3 3 9 3
/// Weights: 1 3 1 3 1 3 1 3 1 3 1 3   (3 on the rightmost body digit)
/// Sum:     89
/// Check:   (10 - 89 % 10) % 10 = 1
/// ```
///
/// Returns `None` for an empty body or any non-digit character.
pub fn ean_check_digit(body: &str) -> Option<u8> {
    if body.is_empty() {
        return None;
    }

    let mut sum: u32 = 0;
    for (i, c) in body.chars().rev().enumerate() {
        let digit = c.to_digit(10)?;
        let weight = if i % 2 == 0 { 3 } else { 1 };
        sum += digit * weight;
    }

    Some(((10 - sum % 10) % 10) as u8)
}

// =============================================================================
// SKU
// =============================================================================

/// Validates a SKU (Stock Keeping Unit).
///
/// ## Rules
/// - Must not be empty after trimming
/// - Must be at most 50 characters
/// - Letters, digits, hyphens, underscores and dots only
///
/// ## Example
/// ```rust
/// use fiche_core::validation::validate_sku;
///
/// assert!(validate_sku("ABC123").is_ok());
/// assert!(validate_sku("").is_err());
/// assert!(validate_sku("has space").is_err());
/// ```
pub fn validate_sku(raw: &str) -> ValidationResult<Identifier> {
    let sku = raw.trim();

    if sku.is_empty() {
        return Err(ValidationError::Required {
            field: "sku".to_string(),
        });
    }

    if sku.chars().count() > MAX_SKU_LENGTH {
        return Err(ValidationError::TooLong {
            field: "sku".to_string(),
            max: MAX_SKU_LENGTH,
        });
    }

    if !sku
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.')
    {
        return Err(ValidationError::InvalidFormat {
            field: "sku".to_string(),
            reason: "must contain only letters, numbers, hyphens, underscores and dots"
                .to_string(),
        });
    }

    Ok(Identifier::from_validated(IdentifierKind::Sku, sku.to_string()))
}

// =============================================================================
// Unit Tests
// =============================================================================
