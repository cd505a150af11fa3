//! # Export Mapper
//!
//! Projects product records onto the catalog import schema and renders the
//! delimited-text file.
//!
//! ## Schema
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Column        Source                         Absent value             │
//! │  ───────────   ────────────────────────────   ──────────────           │
//! │  Name          record.name                    ""                       │
//! │  Price         record.price (2 decimals, .)   ""                       │
//! │  Description   record.french_description      ""                       │
//! │  Identifier    record.identifier.value        (always present)         │
//! │  Category      record.category                ""                       │
//! │  Image URL     record.image_url               ""                       │
//! │                                                                         │
//! │  Delimiter ';' (PrestaShop import default), standard CSV quoting       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The order and names never vary with the input.

use crate::error::ExportError;
use crate::types::ProductRecord;

/// Column names, in file order.
pub const EXPORT_COLUMNS: [&str; 6] = [
    "Name",
    "Price",
    "Description",
    "Identifier",
    "Category",
    "Image URL",
];

/// Field delimiter of the import file.
pub const EXPORT_DELIMITER: u8 = b';';

/// One flat, ordered row of the import file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRow {
    fields: Vec<(&'static str, String)>,
}

impl ExportRow {
    /// Value of a column, if the column exists.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| *name == column)
            .map(|(_, value)| value.as_str())
    }

    /// Column names in order.
    pub fn columns(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|(name, _)| *name)
    }

    /// Values in column order.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(_, value)| value.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Maps a record to its export row. Total and deterministic.
pub fn to_export_row(record: &ProductRecord) -> ExportRow {
    let text = |v: &Option<String>| v.clone().unwrap_or_default();

    let values = [
        text(&record.name),
        record
            .price
            .map(|p| p.to_decimal_string())
            .unwrap_or_default(),
        text(&record.french_description),
        record.identifier.value().to_string(),
        text(&record.category),
        text(&record.image_url),
    ];

    ExportRow {
        fields: EXPORT_COLUMNS.into_iter().zip(values).collect(),
    }
}

/// Renders a header line plus one line per row.
///
/// ## Errors
/// [`ExportError::SchemaViolation`] if a row does not carry exactly the
/// schema columns in order. Rows built by [`to_export_row`] always do.
pub fn write_csv(rows: &[ExportRow]) -> Result<String, ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(EXPORT_DELIMITER)
        .from_writer(Vec::new());

    writer.write_record(EXPORT_COLUMNS)?;

    for row in rows {
        if !row.columns().eq(EXPORT_COLUMNS) {
            return Err(ExportError::SchemaViolation {
                expected: EXPORT_COLUMNS.len(),
                actual: row.len(),
            });
        }
        writer.write_record(row.values())?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Write(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ExportError::Write(e.to_string()))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::description::NOT_FOUND_DESCRIPTION;
    use crate::money::Money;
    use crate::types::PartialProductData;
    use crate::validation::{validate_ean, validate_sku};
    use chrono::{TimeZone, Utc};

    fn widget() -> ProductRecord {
        ProductRecord::from_partial(
            validate_ean("4006381333931").unwrap(),
            PartialProductData {
                name: Some("Widget".to_string()),
                category: Some("Tools".to_string()),
                price: Some(Money::from_cents(1999)),
                image_url: Some("https://img.example/w.png".to_string()),
                ..Default::default()
            },
            "catalog",
            Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        )
        .with_french_description("Un widget robuste; pratique.")
    }

    #[test]
    fn test_row_has_fixed_columns() {
        let row = to_export_row(&widget());
        assert!(row.columns().eq(EXPORT_COLUMNS));
        assert_eq!(row.get("Name"), Some("Widget"));
        assert_eq!(row.get("Price"), Some("19.99"));
        assert_eq!(row.get("Identifier"), Some("4006381333931"));
        assert_eq!(row.get("Category"), Some("Tools"));
        assert_eq!(row.get("Brand"), None);
    }

    #[test]
    fn test_absent_fields_are_empty_strings() {
        let record = ProductRecord::not_found(
            validate_sku("ABC123").unwrap(),
            Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        )
        .with_french_description(NOT_FOUND_DESCRIPTION);

        let row = to_export_row(&record);
        assert_eq!(
            row.values().collect::<Vec<_>>(),
            vec!["", "", NOT_FOUND_DESCRIPTION, "ABC123", "", ""]
        );
    }

    #[test]
    fn test_csv_quotes_delimiters() {
        let csv = write_csv(&[to_export_row(&widget())]).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("Name;Price;Description;Identifier;Category;Image URL")
        );
        assert_eq!(
            lines.next(),
            Some("Widget;19.99;\"Un widget robuste; pratique.\";4006381333931;Tools;https://img.example/w.png")
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_export_is_idempotent() {
        let record = widget();
        let first = write_csv(&[to_export_row(&record)]).unwrap();
        let second = write_csv(&[to_export_row(&record)]).unwrap();
        assert_eq!(first.as_bytes(), second.as_bytes());
    }

    #[test]
    fn test_schema_violation_is_detected() {
        let broken = ExportRow {
            fields: vec![("Name", "x".to_string())],
        };
        assert!(matches!(
            write_csv(&[broken]),
            Err(ExportError::SchemaViolation {
                expected: 6,
                actual: 1
            })
        ));
    }
}
