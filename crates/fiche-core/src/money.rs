//! # Money Module
//!
//! Provides the `Money` type for product prices.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Provider JSON: "price": 19.99                                          │
//! │  As f64:        19.989999999999998...                                   │
//! │  Naive export:  "19.989999999999998"  ❌ PrestaShop rejects the row     │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    "19.99" ──parse_decimal──► 1999 cents ──► "19.99" (export)          │
//! │                                          └─► "19,99 €" (display)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use fiche_core::money::Money;
//!
//! let price = Money::parse_decimal("12.5").unwrap();
//! assert_eq!(price.cents(), 1250);
//! assert_eq!(price.to_decimal_string(), "12.50");
//! assert_eq!(price.to_string(), "12,50 €");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ValidationError, ValidationResult};

// =============================================================================
// Money Type
// =============================================================================

/// A non-negative price in the smallest currency unit (euro cents).
///
/// ## Where Money is Used
/// ```text
/// Provider data ──► PartialProductData.price ──► ProductRecord.price
///                                                    │
///                          ┌─────────────────────────┼──────────────────┐
///                          ▼                         ▼                  ▼
///                  ExportRow "Price"        ProductView "price"   PrestaShop <price>
///                     "12.50"                  "12,50 €"             "12.50"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (euros) portion.
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Parses a decimal price string such as `"12"`, `"12.5"` or `"12,50"`.
    ///
    /// ## Rules
    /// - Dot or comma as decimal separator (providers and French input)
    /// - At most two decimals (no silent rounding)
    /// - Negative values rejected (a catalog price cannot be negative)
    ///
    /// ## Example
    /// ```rust
    /// use fiche_core::money::Money;
    ///
    /// assert_eq!(Money::parse_decimal("19.99").unwrap().cents(), 1999);
    /// assert_eq!(Money::parse_decimal("7").unwrap().cents(), 700);
    /// assert!(Money::parse_decimal("1.999").is_err());
    /// assert!(Money::parse_decimal("-3").is_err());
    /// ```
    pub fn parse_decimal(raw: &str) -> ValidationResult<Self> {
        let invalid = |reason: &str| ValidationError::InvalidFormat {
            field: "price".to_string(),
            reason: reason.to_string(),
        };

        let raw = raw.trim();
        if raw.is_empty() {
            return Err(ValidationError::Required {
                field: "price".to_string(),
            });
        }
        if raw.starts_with('-') {
            return Err(invalid("must not be negative"));
        }

        let (major, minor) = match raw.split_once(['.', ',']) {
            Some((major, minor)) => (major, minor),
            None => (raw, ""),
        };

        if major.is_empty() || !major.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid("expected a decimal number such as 12.50"));
        }
        if minor.len() > 2 || !minor.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid("at most two decimals are allowed"));
        }

        let major: i64 = major
            .parse()
            .map_err(|_| invalid("amount is too large"))?;
        let minor: i64 = match minor.len() {
            0 => 0,
            1 => minor.parse::<i64>().unwrap_or(0) * 10,
            _ => minor.parse::<i64>().unwrap_or(0),
        };

        major
            .checked_mul(100)
            .and_then(|c| c.checked_add(minor))
            .map(Money)
            .ok_or_else(|| invalid("amount is too large"))
    }

    /// Renders the amount with exactly two decimals and a dot separator.
    ///
    /// This is the export format; it never varies with locale.
    pub fn to_decimal_string(&self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!("{}{}.{:02}", sign, self.major().abs(), self.cents_part())
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// French display format: `12,50 €`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{},{:02} €", sign, self.major().abs(), self.cents_part())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.major(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_parse_decimal() {
        assert_eq!(Money::parse_decimal("19.99").unwrap().cents(), 1999);
        assert_eq!(Money::parse_decimal("19,99").unwrap().cents(), 1999);
        assert_eq!(Money::parse_decimal("12.5").unwrap().cents(), 1250);
        assert_eq!(Money::parse_decimal("0.05").unwrap().cents(), 5);
        assert_eq!(Money::parse_decimal(" 7 ").unwrap().cents(), 700);
        assert_eq!(Money::parse_decimal("7.").unwrap().cents(), 700);
    }

    #[test]
    fn test_parse_decimal_rejects_garbage() {
        assert!(Money::parse_decimal("").is_err());
        assert!(Money::parse_decimal("abc").is_err());
        assert!(Money::parse_decimal(".50").is_err());
        assert!(Money::parse_decimal("1.2.3").is_err());
        assert!(Money::parse_decimal("1.999").is_err());
        assert!(Money::parse_decimal("-1.00").is_err());
        assert!(Money::parse_decimal("99999999999999999999").is_err());
    }

    #[test]
    fn test_decimal_string() {
        assert_eq!(Money::from_cents(1250).to_decimal_string(), "12.50");
        assert_eq!(Money::from_cents(5).to_decimal_string(), "0.05");
        assert_eq!(Money::zero().to_decimal_string(), "0.00");
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "10,99 €");
        assert_eq!(format!("{}", Money::from_cents(500)), "5,00 €");
        assert_eq!(format!("{}", Money::from_cents(0)), "0,00 €");
    }
}
