//! HTTP handlers.
//!
//! ```text
//! POST /api/search                               lookup + store
//! GET  /api/products                             every stored sheet
//! GET  /api/products/{kind}/{value}              one stored sheet
//! POST /api/products/{kind}/{value}/publish      push to PrestaShop
//! GET  /api/export                               CSV, every sheet
//! GET  /api/export/{kind}/{value}                CSV, one sheet
//! GET  /api/health                               liveness + record count
//! ```

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};
use tracing::info;

use fiche_core::validation::validate;
use fiche_core::{to_export_row, write_csv, Identifier, IdentifierKind, ProductRecord, ProductView, SearchRequest};

use crate::error::ApiError;
use crate::AppState;

type ApiResult<T> = Result<T, ApiError>;

pub async fn search(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let Json(request) = payload?;
    let record = state.pipeline.lookup(&request).await?;
    Ok(Json(json!({
        "success": true,
        "product": ProductView::from(&record),
    })))
}

pub async fn list_products(State(state): State<Arc<AppState>>) -> ApiResult<Json<Value>> {
    let products: Vec<ProductView> = state
        .pipeline
        .store()
        .list()
        .await?
        .iter()
        .map(ProductView::from)
        .collect();

    Ok(Json(json!({
        "success": true,
        "products": products,
    })))
}

pub async fn get_product(
    State(state): State<Arc<AppState>>,
    Path((kind, value)): Path<(String, String)>,
) -> ApiResult<Json<Value>> {
    let record = stored_record(&state, &kind, &value).await?;
    Ok(Json(json!({
        "success": true,
        "product": ProductView::from(&record),
    })))
}

pub async fn publish_product(
    State(state): State<Arc<AppState>>,
    Path((kind, value)): Path<(String, String)>,
) -> ApiResult<Json<Value>> {
    let sink = state.pipeline.sink().ok_or(ApiError::SinkNotConfigured)?;
    let record = stored_record(&state, &kind, &value).await?;

    sink.publish(&record).await?;

    info!(identifier = %record.identifier, sink = sink.name(), "Product published");
    Ok(Json(json!({
        "success": true,
        "message": format!("Produit {} publié", record.identifier.value()),
    })))
}

pub async fn export_product(
    State(state): State<Arc<AppState>>,
    Path((kind, value)): Path<(String, String)>,
) -> ApiResult<Response> {
    let record = stored_record(&state, &kind, &value).await?;
    let filename = format!("fiche_{}.csv", record.identifier.value());
    csv_attachment(&[record], &filename)
}

pub async fn export_all(State(state): State<Arc<AppState>>) -> ApiResult<Response> {
    let records = state.pipeline.store().list().await?;
    csv_attachment(&records, "fiches.csv")
}

pub async fn health(State(state): State<Arc<AppState>>) -> ApiResult<Response> {
    let store = state.pipeline.store();
    if !store.health_check().await {
        let body = json!({ "status": "UNAVAILABLE", "store": store.backend() });
        return Ok((StatusCode::SERVICE_UNAVAILABLE, Json(body)).into_response());
    }

    let count = store.count().await?;
    Ok(Json(json!({
        "status": "OK",
        "products_count": count,
        "store": store.backend(),
    }))
    .into_response())
}

// =============================================================================
// Helpers
// =============================================================================

fn parse_identifier(kind: &str, value: &str) -> ApiResult<Identifier> {
    let kind = IdentifierKind::from_field_name(kind)?;
    Ok(validate(kind, value)?)
}

async fn stored_record(state: &AppState, kind: &str, value: &str) -> ApiResult<ProductRecord> {
    let id = parse_identifier(kind, value)?;
    state
        .pipeline
        .store()
        .get(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound(id.to_string()))
}

fn csv_attachment(records: &[ProductRecord], filename: &str) -> ApiResult<Response> {
    let rows: Vec<_> = records.iter().map(to_export_row).collect();
    let body = write_csv(&rows)?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        body,
    )
        .into_response())
}
