//! Liveness and store status.

use axum::{Json, Router, extract::State, routing::get};
use bahi_store::DocumentStore;
use serde::Serialize;

use crate::AppState;
use crate::error::ApiResult;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always `"healthy"` when the store can be read.
    pub status: &'static str,
    /// Service version.
    pub version: &'static str,
    /// Ledgers held by the store.
    pub ledgers: usize,
    /// Vouchers held by the store.
    pub vouchers: usize,
    /// Inventory items held by the store.
    pub items: usize,
}

async fn health_check<S: DocumentStore + 'static>(
    State(state): State<AppState<S>>,
) -> ApiResult<Json<HealthResponse>> {
    let books = state.store.snapshot().await?;
    Ok(Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        ledgers: books.ledgers.len(),
        vouchers: books.vouchers.len(),
        items: books.items.len(),
    }))
}

/// Creates the health routes.
pub fn routes<S: DocumentStore + 'static>() -> Router<AppState<S>> {
    Router::new().route("/health", get(health_check::<S>))
}
