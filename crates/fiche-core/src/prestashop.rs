//! # PrestaShop Payload
//!
//! Builds the XML body the PrestaShop Webservice expects on
//! `POST /api/products`. Transport and authentication live in
//! `fiche-pipeline::sink`; this module only shapes the document.
//!
//! ## Field Mapping
//! ```text
//! ProductRecord                     PrestaShop <product>
//! ─────────────────────────────     ─────────────────────────────
//! display_name()               ──►  <name><language id="1">
//! brand                        ──►  <manufacturer_name>
//! price (0.00 when absent)     ──►  <price>
//! SKU value                    ──►  <reference>
//! EAN-13 / EAN-8 value         ──►  <ean13>
//! UPC-A (12 digit EAN) value   ──►  <upc>
//! french_description           ──►  <description><language id="1">
//! (fixed)                      ──►  <id_category_default>2 + association
//! ```

use crate::money::Money;
use crate::types::{IdentifierKind, ProductRecord};

/// PrestaShop "Home" category, present in every shop.
pub const DEFAULT_CATEGORY_ID: u32 = 2;

/// Language id of the shop's default language.
pub const DEFAULT_LANGUAGE_ID: u32 = 1;

/// Renders the product creation payload for a record.
pub fn product_payload(record: &ProductRecord) -> String {
    let id = &record.identifier;
    let (reference, ean13, upc) = match id.kind() {
        IdentifierKind::Sku => (id.value(), "", ""),
        IdentifierKind::Ean if id.value().len() == 12 => ("", "", id.value()),
        IdentifierKind::Ean => ("", id.value(), ""),
    };

    let price = record.price.unwrap_or(Money::zero()).to_decimal_string();

    format!(
        r#"<prestashop xmlns:xlink="http://www.w3.org/1999/xlink">
  <product>
    <active>1</active>
    <name>
      <language id="{lang}">{name}</language>
    </name>
    <manufacturer_name>{brand}</manufacturer_name>
    <price>{price}</price>
    <reference>{reference}</reference>
    <ean13>{ean13}</ean13>
    <upc>{upc}</upc>
    <description>
      <language id="{lang}">{description}</language>
    </description>
    <id_category_default>{category}</id_category_default>
    <associations>
      <categories>
        <category>
          <id>{category}</id>
        </category>
      </categories>
    </associations>
  </product>
</prestashop>"#,
        lang = DEFAULT_LANGUAGE_ID,
        name = escape_xml(&record.display_name()),
        brand = escape_xml(record.brand.as_deref().unwrap_or_default()),
        price = price,
        reference = escape_xml(reference),
        ean13 = ean13,
        upc = upc,
        description = escape_xml(record.french_description.as_deref().unwrap_or_default()),
        category = DEFAULT_CATEGORY_ID,
    )
}

/// Escapes the five XML special characters.
pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
    out
}
