//! # fiche-pipeline: Lookup and Normalization Pipeline
//!
//! Resolves identifiers against pluggable data sources, produces the French
//! description and stores the finalized record.
//!
//! ## Architecture Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Pipeline Architecture                             │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │              ProductSheetPipeline (orchestrator)                 │  │
//! │  └────────────────────────────┬─────────────────────────────────────┘  │
//! │                               │                                         │
//! │         ┌─────────────────────┼─────────────────────┐                  │
//! │         ▼                     ▼                     ▼                   │
//! │  ┌────────────────┐  ┌────────────────┐  ┌────────────────────────┐    │
//! │  │ LookupResolver │  │ Description    │  │ RecordStore            │    │
//! │  │                │  │ Synthesizer    │  │ (fiche-store)          │    │
//! │  │ SourceProvider │  │                │  │                        │    │
//! │  │ list, timeout  │  │ Translator +   │  │ put after synthesis    │    │
//! │  │ per call       │  │ templates      │  │                        │    │
//! │  └────────────────┘  └────────────────┘  └────────────────────────┘    │
//! │                                                                         │
//! │  CatalogSink (PrestaShop) publishes stored records on demand.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//! - [`pipeline`] - `ProductSheetPipeline` orchestrator
//! - [`resolver`] - Provider priority, timeouts, failure isolation
//! - [`provider`] - `SourceProvider` trait, static catalog, Open Food Facts
//! - [`synthesizer`] - French description synthesis
//! - [`translate`] - `Translator` trait, LibreTranslate client
//! - [`sink`] - `CatalogSink` trait, PrestaShop Webservice
//! - [`config`] - Pipeline configuration (TOML)
//! - [`error`] - Error types

pub mod config;
pub mod error;
pub mod pipeline;
pub mod provider;
pub mod resolver;
pub mod sink;
pub mod synthesizer;
pub mod translate;

pub use config::PipelineConfig;
pub use error::{ConfigError, PipelineError, PipelineResult, ProviderError, SinkError, TranslationError};
pub use pipeline::ProductSheetPipeline;
pub use provider::{OpenFoodFactsProvider, SourceProvider, StaticCatalogProvider};
pub use resolver::LookupResolver;
pub use sink::{CatalogSink, PrestaShopSink};
pub use synthesizer::DescriptionSynthesizer;
pub use translate::{DisabledTranslator, LibreTranslateClient, Translator};
