//! API configuration module.
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults. Pipeline settings may also come from a TOML file named by
//! `FICHE_CONFIG_PATH`; environment variables override it.

use std::env;
use std::path::PathBuf;

use fiche_pipeline::config::{PipelineConfig, PrestaShopSettings};

/// Fiche API configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// HTTP server port
    pub port: u16,

    /// SQLite database file; `None` keeps records in memory
    pub database_path: Option<PathBuf>,

    /// Providers, translation, timeouts, PrestaShop
    pub pipeline: PipelineConfig,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let mut pipeline = match var("FICHE_CONFIG_PATH") {
            Some(path) => PipelineConfig::load(&PathBuf::from(path))?,
            None => PipelineConfig::default(),
        };

        let port = match var("FICHE_PORT") {
            Some(raw) => parse("FICHE_PORT", &raw)?,
            None => 8000,
        };

        if let Some(path) = var("FICHE_CATALOG_PATH") {
            pipeline.catalog_path = Some(PathBuf::from(path));
        }
        if let Some(url) = var("FICHE_OPENFOODFACTS_URL") {
            pipeline.open_food_facts.base_url = url;
        }
        if let Some(raw) = var("FICHE_OPENFOODFACTS_ENABLED") {
            pipeline.open_food_facts.enabled = parse("FICHE_OPENFOODFACTS_ENABLED", &raw)?;
        }
        if let Some(url) = var("FICHE_TRANSLATE_URL") {
            pipeline.translation.url = Some(url);
        }
        if let Some(key) = var("FICHE_TRANSLATE_API_KEY") {
            pipeline.translation.api_key = Some(key);
        }
        if let Some(raw) = var("FICHE_PROVIDER_TIMEOUT_SECS") {
            pipeline.provider_timeout_secs = parse("FICHE_PROVIDER_TIMEOUT_SECS", &raw)?;
        }
        if let Some(raw) = var("FICHE_TRANSLATION_TIMEOUT_SECS") {
            pipeline.translation_timeout_secs = parse("FICHE_TRANSLATION_TIMEOUT_SECS", &raw)?;
        }

        match (var("PRESTASHOP_BASE_URL"), var("PRESTASHOP_API_KEY")) {
            (Some(base_url), Some(api_key)) => {
                pipeline.prestashop = Some(PrestaShopSettings { base_url, api_key });
            }
            (None, None) => {}
            (Some(_), None) => return Err(ConfigError::MissingRequired("PRESTASHOP_API_KEY".into())),
            (None, Some(_)) => return Err(ConfigError::MissingRequired("PRESTASHOP_BASE_URL".into())),
        }

        pipeline.validate()?;

        Ok(ApiConfig {
            port,
            database_path: var("FICHE_DATABASE_PATH").map(PathBuf::from),
            pipeline,
        })
    }
}

fn parse<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue(key.to_string()))
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),

    #[error(transparent)]
    Pipeline(#[from] fiche_pipeline::ConfigError),
}
