//! # Catalog Sink
//!
//! Pushes finalized records to an e-commerce platform. The payload itself
//! is built in `fiche_core::prestashop`; this module only moves bytes.

use async_trait::async_trait;
use std::time::Duration;
use tracing::info;

use fiche_core::{prestashop, ProductRecord};

use crate::error::SinkError;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Destination for published products.
#[async_trait]
pub trait CatalogSink: Send + Sync {
    fn name(&self) -> &str;

    /// Creates the product on the platform.
    async fn publish(&self, record: &ProductRecord) -> Result<(), SinkError>;
}

/// PrestaShop Webservice sink.
///
/// Authenticates with the webservice key as basic-auth user and an empty
/// password. PrestaShop answers 201 on creation, some versions 200.
pub struct PrestaShopSink {
    http_client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl PrestaShopSink {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self, SinkError> {
        let http_client = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    fn products_url(&self) -> String {
        format!("{}/api/products", self.base_url)
    }
}

#[async_trait]
impl CatalogSink for PrestaShopSink {
    fn name(&self) -> &str {
        "prestashop"
    }

    async fn publish(&self, record: &ProductRecord) -> Result<(), SinkError> {
        let payload = prestashop::product_payload(record);

        let response = self
            .http_client
            .post(self.products_url())
            .basic_auth(&self.api_key, Some(""))
            .header(reqwest::header::CONTENT_TYPE, "application/xml")
            .header(reqwest::header::ACCEPT, "application/xml")
            .body(payload)
            .send()
            .await?;

        let status = response.status();
        if status != reqwest::StatusCode::OK && status != reqwest::StatusCode::CREATED {
            let message = response.text().await.unwrap_or_default();
            return Err(SinkError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        info!(identifier = %record.identifier, "Product published to PrestaShop");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_products_url() {
        let sink = PrestaShopSink::new("https://shop.example.com/", "KEY").unwrap();
        assert_eq!(sink.products_url(), "https://shop.example.com/api/products");
        assert_eq!(sink.name(), "prestashop");
    }
}
