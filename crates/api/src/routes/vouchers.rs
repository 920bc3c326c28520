//! Voucher routes.

use std::collections::HashSet;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get},
};
use bahi_core::ledger::ordered;
use bahi_core::voucher::{RawVoucher, RawVoucherLine, SecondaryLegTarget, Voucher, VoucherType};
use bahi_shared::types::{ItemId, LedgerId, MAX_AMOUNT, VoucherId, saturating_sum, within_limit};
use bahi_store::DocumentStore;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::AppState;
use crate::error::{ApiError, ApiResult};

/// Creates the voucher routes.
pub fn routes<S: DocumentStore + 'static>() -> Router<AppState<S>> {
    Router::new()
        .route("/vouchers", get(list_vouchers::<S>).post(create_voucher::<S>))
        .route("/vouchers/{voucher_id}", delete(delete_voucher::<S>))
}

/// Query parameters for the voucher list.
#[derive(Debug, Deserialize)]
pub struct VoucherListQuery {
    /// Only vouchers on or after this date.
    pub from: Option<NaiveDate>,
    /// Only vouchers on or before this date.
    pub to: Option<NaiveDate>,
    /// Only vouchers involving this ledger.
    pub ledger_id: Option<LedgerId>,
}

/// Request body as posted by the voucher-entry form.
///
/// Lines carry a bare `itemId`; they are resolved to ledger or stock lines
/// against the item master before saving.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveVoucherRequest {
    /// Existing id to replace; a new id is assigned when absent.
    pub id: Option<VoucherId>,
    /// Voucher type.
    #[serde(rename = "type")]
    pub voucher_type: VoucherType,
    /// Transaction date.
    pub date: NaiveDate,
    /// Reference number.
    #[serde(default)]
    pub reference_no: String,
    /// Party ledger.
    pub party_ledger_id: LedgerId,
    /// Lines.
    #[serde(default)]
    pub items: Vec<RawVoucherLine>,
    /// Party leg amount (defaults to the sum of line amounts).
    pub total_amount: Option<Decimal>,
    /// Narration.
    #[serde(default)]
    pub narration: String,
}

/// GET /vouchers
async fn list_vouchers<S: DocumentStore + 'static>(
    State(state): State<AppState<S>>,
    Query(query): Query<VoucherListQuery>,
) -> ApiResult<Json<Vec<Voucher>>> {
    let vouchers = state.store.get_all_vouchers().await?;
    let selected = ordered(&vouchers, |v| {
        query.from.is_none_or(|from| v.date >= from)
            && query.to.is_none_or(|to| v.date <= to)
            && query.ledger_id.is_none_or(|id| v.involves(id))
    });

    Ok(Json(selected.into_iter().cloned().collect()))
}

/// POST /vouchers
async fn create_voucher<S: DocumentStore + 'static>(
    State(state): State<AppState<S>>,
    Json(request): Json<SaveVoucherRequest>,
) -> ApiResult<impl IntoResponse> {
    let books = state.store.snapshot().await?;
    let ledgers: HashSet<LedgerId> = books.ledgers.iter().map(|l| l.id).collect();
    let known_items: HashSet<ItemId> = books.items.iter().map(|i| i.id).collect();

    if !ledgers.contains(&request.party_ledger_id) {
        return Err(ApiError::validation(format!(
            "Unknown party ledger {}",
            request.party_ledger_id
        )));
    }
    if request.items.iter().any(|line| line.amount < Decimal::ZERO) {
        return Err(ApiError::validation("Line amounts must not be negative"));
    }
    if request
        .items
        .iter()
        .any(|line| ![line.amount, line.quantity, line.rate].into_iter().all(within_limit))
    {
        return Err(ApiError::validation(format!(
            "Line amounts, quantities and rates must not exceed {MAX_AMOUNT}"
        )));
    }

    let total_amount = request
        .total_amount
        .unwrap_or_else(|| saturating_sum(request.items.iter().map(|line| line.amount)));
    if total_amount < Decimal::ZERO {
        return Err(ApiError::validation("Total amount must not be negative"));
    }
    if !within_limit(total_amount) {
        return Err(ApiError::validation(format!(
            "Total amount must not exceed {MAX_AMOUNT}"
        )));
    }

    let voucher = RawVoucher {
        id: request.id.unwrap_or_default(),
        voucher_type: request.voucher_type,
        date: request.date,
        reference_no: request.reference_no,
        party_ledger_id: request.party_ledger_id,
        items: request.items,
        total_amount,
        narration: request.narration,
    }
    .resolve(|id| known_items.contains(&id));

    if let Some(unknown) = voucher.items.iter().find_map(|line| match line.target {
        SecondaryLegTarget::Ledger(id) if !ledgers.contains(&id) => Some(id),
        _ => None,
    }) {
        return Err(ApiError::validation(format!(
            "Line references unknown ledger or item {unknown}"
        )));
    }

    let saved = state.store.save_voucher(voucher).await?;
    tracing::info!(
        voucher_id = %saved.id,
        voucher_type = %saved.voucher_type,
        date = %saved.date,
        total = %saved.total_amount,
        "voucher saved"
    );
    Ok((StatusCode::CREATED, Json(saved)))
}

/// DELETE /vouchers/{voucher_id}
async fn delete_voucher<S: DocumentStore + 'static>(
    State(state): State<AppState<S>>,
    Path(voucher_id): Path<VoucherId>,
) -> ApiResult<StatusCode> {
    if state.store.delete_voucher(voucher_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found(format!("Voucher {voucher_id}")))
    }
}
