//! Inventory item routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get},
};
use bahi_core::engine::ReplayEngine;
use bahi_core::inventory::{InventoryItem, OpeningStock, StockStatement};
use bahi_shared::types::{GodownId, ItemId, MAX_AMOUNT, within_limit};
use bahi_store::DocumentStore;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{PeriodQuery, ReportResponse};
use crate::AppState;
use crate::error::{ApiError, ApiResult};

/// Creates the inventory routes.
pub fn routes<S: DocumentStore + 'static>() -> Router<AppState<S>> {
    Router::new()
        .route("/items", get(list_items::<S>).post(save_item::<S>))
        .route("/items/{item_id}", delete(delete_item::<S>))
        .route("/items/{item_id}/stock-statement", get(get_stock_statement::<S>))
}

/// Item with its totals across godowns.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemResponse {
    /// Item document.
    #[serde(flatten)]
    pub item: InventoryItem,
    /// Quantity across all godowns.
    pub total_quantity: Decimal,
    /// Quantity at purchase price.
    pub stock_value: Decimal,
}

/// Request body for creating or replacing an item.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveItemRequest {
    /// Existing id to replace; a new id is assigned when absent.
    pub id: Option<ItemId>,
    /// Display name.
    pub name: String,
    /// Stock keeping unit.
    #[serde(default)]
    pub sku: String,
    /// Unit of measure.
    #[serde(default)]
    pub unit: String,
    /// Purchase price per unit.
    #[serde(default)]
    pub purchase_price: Decimal,
    /// Quantity on hand per godown.
    #[serde(default)]
    pub stock: BTreeMap<GodownId, Decimal>,
}

impl SaveItemRequest {
    fn validate(&self) -> ApiResult<()> {
        if self.name.trim().is_empty() {
            return Err(ApiError::validation("Item name is required"));
        }
        if self.purchase_price < Decimal::ZERO {
            return Err(ApiError::validation("Purchase price must not be negative"));
        }
        let mut amounts = std::iter::once(&self.purchase_price).chain(self.stock.values());
        if amounts.any(|value| !within_limit(*value)) {
            return Err(ApiError::validation(format!(
                "Price and quantities must not exceed {MAX_AMOUNT}"
            )));
        }
        Ok(())
    }
}

/// Query parameters for the stock statement.
#[derive(Debug, Deserialize)]
pub struct StockStatementQuery {
    /// Start date.
    pub from: Option<NaiveDate>,
    /// End date.
    pub to: Option<NaiveDate>,
    /// `live` (default) or `reconstructed`.
    pub opening: Option<String>,
}

/// GET /items
async fn list_items<S: DocumentStore + 'static>(
    State(state): State<AppState<S>>,
) -> ApiResult<Json<Vec<ItemResponse>>> {
    let items = state.store.get_all_items().await?;
    Ok(Json(
        items
            .into_iter()
            .map(|item| ItemResponse {
                total_quantity: item.total_quantity(),
                stock_value: item.stock_value(),
                item,
            })
            .collect(),
    ))
}

/// POST /items
///
/// Stock quantities are taken as given; posted vouchers move them from here.
async fn save_item<S: DocumentStore + 'static>(
    State(state): State<AppState<S>>,
    Json(request): Json<SaveItemRequest>,
) -> ApiResult<impl IntoResponse> {
    request.validate()?;

    let mut item = InventoryItem::new(request.name.trim(), request.unit, request.purchase_price);
    if let Some(id) = request.id {
        item.id = id;
    }
    item.sku = request.sku;
    item.stock = request.stock;

    let saved = state.store.save_item(item).await?;
    tracing::info!(item_id = %saved.id, name = %saved.name, "item saved");

    Ok((
        StatusCode::CREATED,
        Json(ItemResponse {
            total_quantity: saved.total_quantity(),
            stock_value: saved.stock_value(),
            item: saved,
        }),
    ))
}

/// DELETE /items/{item_id}
async fn delete_item<S: DocumentStore + 'static>(
    State(state): State<AppState<S>>,
    Path(item_id): Path<ItemId>,
) -> ApiResult<StatusCode> {
    if state.store.delete_item(item_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found(format!("Item {item_id}")))
    }
}

/// GET /items/{item_id}/stock-statement
async fn get_stock_statement<S: DocumentStore + 'static>(
    State(state): State<AppState<S>>,
    Path(item_id): Path<ItemId>,
    Query(query): Query<StockStatementQuery>,
) -> ApiResult<Json<ReportResponse<StockStatement>>> {
    let range = PeriodQuery {
        from: query.from,
        to: query.to,
    }
    .range()?;
    let opening: OpeningStock = match query.opening.as_deref() {
        Some(basis) => basis.parse()?,
        None => OpeningStock::default(),
    };

    let books = state.store.snapshot().await?;
    let report = ReplayEngine::new(books.snapshot())
        .generate_stock_statement(item_id, range, opening)
        .ok_or_else(|| ApiError::not_found(format!("Item {item_id}")))?;

    Ok(Json(ReportResponse {
        business: books.profile,
        report,
    }))
}
