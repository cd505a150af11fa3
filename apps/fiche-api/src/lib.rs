//! # Fiche Produit API
//!
//! JSON and CSV endpoints over the product sheet pipeline.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Fiche API Server                               │
//! │                                                                         │
//! │  client ───► axum Router ───► ProductSheetPipeline ───► RecordStore    │
//! │                   │                                          │          │
//! │                   └──── CSV export / PrestaShop publish ◄────┘          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use fiche_pipeline::ProductSheetPipeline;

/// Shared application state.
pub struct AppState {
    pub pipeline: ProductSheetPipeline,
}

impl AppState {
    pub fn new(pipeline: ProductSheetPipeline) -> Self {
        AppState { pipeline }
    }
}

/// Builds the HTTP router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/search", post(routes::search))
        .route("/api/products", get(routes::list_products))
        .route("/api/products/{kind}/{value}", get(routes::get_product))
        .route(
            "/api/products/{kind}/{value}/publish",
            post(routes::publish_product),
        )
        .route("/api/export", get(routes::export_all))
        .route("/api/export/{kind}/{value}", get(routes::export_product))
        .route("/api/health", get(routes::health))
        .with_state(state)
}
