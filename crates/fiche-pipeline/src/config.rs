//! # Pipeline Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority, applied by fiche-api)     │
//! │     FICHE_TRANSLATE_URL=http://localhost:5000                          │
//! │     FICHE_PROVIDER_TIMEOUT_SECS=3                                      │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     pipeline.toml                                                      │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     5 s timeouts, Open Food Facts enabled, translation disabled        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! provider_timeout_secs = 5
//! translation_timeout_secs = 5
//! catalog_path = "./catalog.toml"
//!
//! [open_food_facts]
//! enabled = true
//! base_url = "https://world.openfoodfacts.org"
//!
//! [translation]
//! url = "http://localhost:5000"
//! api_key = "secret"
//!
//! [prestashop]
//! base_url = "https://shop.example.com"
//! api_key = "WEBSERVICEKEY"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;
use url::Url;

use crate::error::ConfigError;

/// Public Open Food Facts instance.
pub const DEFAULT_OPEN_FOOD_FACTS_URL: &str = "https://world.openfoodfacts.org";

// =============================================================================
// Section Settings
// =============================================================================

/// Open Food Facts provider settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenFoodFactsSettings {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_open_food_facts_url")]
    pub base_url: String,
}

impl Default for OpenFoodFactsSettings {
    fn default() -> Self {
        OpenFoodFactsSettings {
            enabled: true,
            base_url: default_open_food_facts_url(),
        }
    }
}

/// LibreTranslate-compatible endpoint. No `url` means translation is off.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationSettings {
    #[serde(default)]
    pub url: Option<String>,

    #[serde(default)]
    pub api_key: Option<String>,
}

/// PrestaShop Webservice credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrestaShopSettings {
    pub base_url: String,
    pub api_key: String,
}

fn default_true() -> bool {
    true
}

fn default_open_food_facts_url() -> String {
    DEFAULT_OPEN_FOOD_FACTS_URL.to_string()
}

fn default_provider_timeout() -> u64 {
    5
}

fn default_translation_timeout() -> u64 {
    5
}

// =============================================================================
// Main Pipeline Configuration
// =============================================================================

/// Everything needed to assemble a `ProductSheetPipeline`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Upper bound for one provider call (seconds).
    #[serde(default = "default_provider_timeout")]
    pub provider_timeout_secs: u64,

    /// Upper bound for one translation call (seconds).
    #[serde(default = "default_translation_timeout")]
    pub translation_timeout_secs: u64,

    /// TOML catalog queried before any remote provider.
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,

    #[serde(default)]
    pub open_food_facts: OpenFoodFactsSettings,

    #[serde(default)]
    pub translation: TranslationSettings,

    /// Publishing is disabled when absent.
    #[serde(default)]
    pub prestashop: Option<PrestaShopSettings>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            provider_timeout_secs: default_provider_timeout(),
            translation_timeout_secs: default_translation_timeout(),
            catalog_path: None,
            open_food_facts: OpenFoodFactsSettings::default(),
            translation: TranslationSettings::default(),
            prestashop: None,
        }
    }
}

impl PipelineConfig {
    /// Loads and validates a TOML config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        info!(?path, "Loading pipeline config from file");
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let config: PipelineConfig = toml::from_str(&contents).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validates timeouts and endpoint URLs.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.provider_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "provider_timeout_secs must be greater than 0".into(),
            ));
        }
        if self.translation_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "translation_timeout_secs must be greater than 0".into(),
            ));
        }

        if self.open_food_facts.enabled {
            validate_http_url(&self.open_food_facts.base_url)?;
        }
        if let Some(ref url) = self.translation.url {
            validate_http_url(url)?;
        }
        if let Some(ref shop) = self.prestashop {
            validate_http_url(&shop.base_url)?;
            if shop.api_key.trim().is_empty() {
                return Err(ConfigError::Invalid("PrestaShop API key is empty".into()));
            }
        }

        Ok(())
    }

    pub fn provider_timeout(&self) -> Duration {
        Duration::from_secs(self.provider_timeout_secs)
    }

    pub fn translation_timeout(&self) -> Duration {
        Duration::from_secs(self.translation_timeout_secs)
    }
}

/// Parses `raw` and requires an `http` or `https` scheme.
pub fn validate_http_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw)?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::Invalid(format!(
            "URL must start with http:// or https://, got scheme '{}' in {}",
            other, raw
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PipelineConfig::default();
        assert_eq!(config.provider_timeout(), Duration::from_secs(5));
        assert_eq!(config.translation_timeout(), Duration::from_secs(5));
        assert!(config.open_food_facts.enabled);
        assert!(config.translation.url.is_none());
        assert!(config.prestashop.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: PipelineConfig = toml::from_str(
            r#"
            provider_timeout_secs = 2

            [translation]
            url = "http://localhost:5000"
            "#,
        )
        .unwrap();

        assert_eq!(config.provider_timeout_secs, 2);
        assert_eq!(config.translation_timeout_secs, 5);
        assert_eq!(config.open_food_facts.base_url, DEFAULT_OPEN_FOOD_FACTS_URL);
        assert_eq!(config.translation.url.as_deref(), Some("http://localhost:5000"));
    }

    #[test]
    fn test_config_validation() {
        let mut config = PipelineConfig::default();

        config.provider_timeout_secs = 0;
        assert!(config.validate().is_err());
        config.provider_timeout_secs = 5;

        config.translation.url = Some("ftp://translate.local".to_string());
        assert!(config.validate().is_err());
        config.translation.url = Some("not a url".to_string());
        assert!(config.validate().is_err());
        config.translation.url = Some("https://translate.local".to_string());
        assert!(config.validate().is_ok());

        config.prestashop = Some(PrestaShopSettings {
            base_url: "https://shop.example.com".to_string(),
            api_key: "  ".to_string(),
        });
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pipeline.toml");
        std::fs::write(
            &path,
            "translation_timeout_secs = 3\n[open_food_facts]\nenabled = false\n",
        )
        .unwrap();

        let config = PipelineConfig::load(&path).unwrap();
        assert_eq!(config.translation_timeout(), Duration::from_secs(3));
        assert!(!config.open_food_facts.enabled);

        let missing = PipelineConfig::load(&dir.path().join("missing.toml"));
        assert!(matches!(missing, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_toml_serialization() {
        let config = PipelineConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[open_food_facts]"));
    }
}
