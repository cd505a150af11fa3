//! # Open Food Facts Provider
//!
//! Public product database, EAN lookups only.
//!
//! ```text
//! GET {base}/api/v2/product/{ean}.json
//!
//! { "status": 1, "product": { "product_name": "...", "categories": "...",
//!                             "brands": "...", "generic_name": "...",
//!                             "lang": "en", ... } }
//!
//! status != 1 or HTTP 404  →  Ok(None)
//! ```
//!
//! The HTTP part is a thin shell around [`map_response`], which is pure and
//! tested without the network.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use fiche_core::{Identifier, IdentifierKind, PartialProductData, DEFAULT_SOURCE_LANGUAGE};

use crate::error::ProviderError;
use crate::provider::SourceProvider;

const USER_AGENT: &str = concat!("fiche-produit/", env!("CARGO_PKG_VERSION"));

/// Client-level timeout; the resolver applies its own, usually shorter, bound.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Raw API response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OffResponse {
    #[serde(default)]
    pub status: i64,
    #[serde(default)]
    pub product: Option<OffProduct>,
}

/// The subset of the product object we read.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OffProduct {
    pub product_name: Option<String>,
    pub product_name_fr: Option<String>,
    /// Comma separated, main brand first.
    pub brands: Option<String>,
    pub generic_name: Option<String>,
    pub generic_name_fr: Option<String>,
    pub ingredients_text: Option<String>,
    /// Comma separated, most generic first.
    pub categories: Option<String>,
    pub image_front_url: Option<String>,
    pub image_url: Option<String>,
    /// Main language of the product page.
    pub lang: Option<String>,
}

/// Maps an API response to provider data.
///
/// French fields win over the page language. The most specific category
/// (the last one listed) and the main brand (the first one) are kept.
pub fn map_response(response: OffResponse) -> Option<PartialProductData> {
    if response.status != 1 {
        return None;
    }
    let product = response.product?;

    let name = first_present([product.product_name_fr, product.product_name]);
    let brand = list_items(product.brands.as_deref()).next();
    let category = list_items(product.categories.as_deref()).last();

    let (source_description, source_language) = match present(product.generic_name_fr) {
        Some(french) => (Some(french), Some("fr".to_string())),
        None => (
            first_present([product.generic_name, product.ingredients_text]),
            Some(present(product.lang).unwrap_or_else(|| DEFAULT_SOURCE_LANGUAGE.to_string())),
        ),
    };

    let data = PartialProductData {
        name,
        brand,
        category,
        source_description,
        source_language,
        price: None,
        image_url: first_present([product.image_front_url, product.image_url]),
    };

    if data.is_empty() {
        None
    } else {
        Some(data)
    }
}

fn present(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn list_items(list: Option<&str>) -> impl Iterator<Item = String> + '_ {
    list.unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn first_present<const N: usize>(values: [Option<String>; N]) -> Option<String> {
    values.into_iter().find_map(present)
}

/// Open Food Facts HTTP client.
pub struct OpenFoodFactsProvider {
    http_client: reqwest::Client,
    base_url: String,
}

impl OpenFoodFactsProvider {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ProviderError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(|e| ProviderError::Unavailable(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn product_url(&self, ean: &str) -> String {
        format!("{}/api/v2/product/{}.json", self.base_url, ean)
    }
}

#[async_trait]
impl SourceProvider for OpenFoodFactsProvider {
    fn name(&self) -> &str {
        "openfoodfacts"
    }

    fn supports(&self, kind: IdentifierKind) -> bool {
        kind == IdentifierKind::Ean
    }

    async fn fetch(&self, id: &Identifier) -> Result<Option<PartialProductData>, ProviderError> {
        let url = self.product_url(id.value());
        debug!(identifier = %id, url = %url, "Querying Open Food Facts");

        let response = self.http_client.get(&url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ProviderError::Http {
                status: status.as_u16(),
                message,
            });
        }

        let body: OffResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Parse(e.to_string()))?;

        Ok(map_response(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> OffResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_maps_found_product() {
        let response = parse(
            r#"{
                "status": 1,
                "product": {
                    "product_name": "Nutella",
                    "brands": "Ferrero, Nutella",
                    "categories": "Spreads, Sweet spreads, Hazelnut spreads",
                    "generic_name": "Hazelnut spread with cocoa",
                    "lang": "en",
                    "image_front_url": "https://images.example/nutella.jpg"
                }
            }"#,
        );

        let data = map_response(response).unwrap();
        assert_eq!(data.name.as_deref(), Some("Nutella"));
        assert_eq!(data.brand.as_deref(), Some("Ferrero"));
        assert_eq!(data.category.as_deref(), Some("Hazelnut spreads"));
        assert_eq!(
            data.source_description.as_deref(),
            Some("Hazelnut spread with cocoa")
        );
        assert_eq!(data.source_language.as_deref(), Some("en"));
        assert_eq!(
            data.image_url.as_deref(),
            Some("https://images.example/nutella.jpg")
        );
        assert!(data.price.is_none());
    }

    #[test]
    fn test_prefers_french_fields() {
        let response = parse(
            r#"{
                "status": 1,
                "product": {
                    "product_name": "Water",
                    "product_name_fr": "Eau minérale",
                    "generic_name": "Mineral water",
                    "generic_name_fr": "Eau minérale naturelle",
                    "lang": "en"
                }
            }"#,
        );

        let data = map_response(response).unwrap();
        assert_eq!(data.name.as_deref(), Some("Eau minérale"));
        assert_eq!(
            data.source_description.as_deref(),
            Some("Eau minérale naturelle")
        );
        assert_eq!(data.source_language.as_deref(), Some("fr"));
    }

    #[test]
    fn test_brand_alone_is_a_hit() {
        let response = parse(r#"{"status": 1, "product": {"brands": " , Evian", "lang": "fr"}}"#);

        let data = map_response(response).unwrap();
        assert_eq!(data.brand.as_deref(), Some("Evian"));
        assert!(data.name.is_none());
        assert!(data.category.is_none());
    }

    #[test]
    fn test_status_zero_is_not_found() {
        let response = parse(r#"{"status": 0, "status_verbose": "product not found"}"#);
        assert!(map_response(response).is_none());
    }

    #[test]
    fn test_blank_product_is_not_found() {
        let response = parse(r#"{"status": 1, "product": {"product_name": "  ", "lang": "fr"}}"#);
        assert!(map_response(response).is_none());
    }

    #[test]
    fn test_only_supports_ean() {
        let provider = OpenFoodFactsProvider::new("https://world.openfoodfacts.org/").unwrap();
        assert!(provider.supports(IdentifierKind::Ean));
        assert!(!provider.supports(IdentifierKind::Sku));
        assert_eq!(
            provider.product_url("3017620422003"),
            "https://world.openfoodfacts.org/api/v2/product/3017620422003.json"
        );
    }
}
