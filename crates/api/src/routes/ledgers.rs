//! Ledger routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get},
};
use bahi_core::chart::AccountGroup;
use bahi_core::engine::ReplayEngine;
use bahi_core::ledger::{Ledger, LedgerStatement, PortalCredentials};
use bahi_shared::types::{BalanceSide, LedgerId, MAX_AMOUNT, within_limit};
use bahi_store::DocumentStore;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{PeriodQuery, ReportResponse, today};
use crate::AppState;
use crate::error::{ApiError, ApiResult};
use crate::middleware::PortalLogin;

/// Creates the ledger routes.
pub fn routes<S: DocumentStore + 'static>() -> Router<AppState<S>> {
    Router::new()
        .route("/ledgers", get(list_ledgers::<S>).post(create_ledger::<S>))
        .route("/ledgers/{ledger_id}", delete(delete_ledger::<S>))
        .route("/ledgers/{ledger_id}/statement", get(get_statement::<S>))
        .route("/statements", get(get_group_statement::<S>))
        .route(
            "/portal/ledgers/{ledger_id}/statement",
            get(get_portal_statement::<S>),
        )
}

// ============================================================================
// Request / Response Types
// ============================================================================

/// Query parameters for the ledger list.
#[derive(Debug, Deserialize)]
pub struct LedgerListQuery {
    /// Balances as of this date (defaults to today).
    pub as_of: Option<NaiveDate>,
}

/// Query parameters for a group statement.
#[derive(Debug, Deserialize)]
pub struct GroupStatementQuery {
    /// Group label, e.g. `Sundry Debtors`.
    pub group: String,
    /// Start date.
    pub from: Option<NaiveDate>,
    /// End date.
    pub to: Option<NaiveDate>,
}

/// Request body for creating or replacing a ledger.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveLedgerRequest {
    /// Existing id to replace; a new id is assigned when absent.
    pub id: Option<LedgerId>,
    /// Short code, unique across ledgers.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Group label.
    pub group: AccountGroup,
    /// Opening balance amount.
    #[serde(default)]
    pub opening_balance: Decimal,
    /// Opening balance side (defaults to Dr).
    pub opening_balance_type: Option<BalanceSide>,
    /// GSTIN.
    pub gstin: Option<String>,
    /// Partner portal login.
    pub portal_credentials: Option<PortalCredentials>,
}

/// Ledger in the list, with its current balance.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerResponse {
    /// Ledger document without portal credentials.
    #[serde(flatten)]
    pub ledger: Ledger,
    /// Whether the party can use the portal.
    pub portal_enabled: bool,
    /// Signed balance.
    pub balance: Decimal,
    /// Balance as "1234.00 Dr".
    pub balance_label: String,
}

/// Ledger as returned after a save.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedLedgerResponse {
    /// Ledger document without portal credentials.
    #[serde(flatten)]
    pub ledger: Ledger,
    /// Whether the party can use the portal.
    pub portal_enabled: bool,
}

/// Party header on a portal statement.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortalParty {
    /// Ledger name.
    pub name: String,
    /// Ledger code.
    pub code: String,
    /// GSTIN.
    pub gstin: Option<String>,
}

/// Statement as seen by the party through the portal.
#[derive(Debug, Serialize)]
pub struct PortalStatement {
    /// Party header.
    pub party: PortalParty,
    /// Statement body.
    pub statement: LedgerStatement,
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET /ledgers
async fn list_ledgers<S: DocumentStore + 'static>(
    State(state): State<AppState<S>>,
    Query(query): Query<LedgerListQuery>,
) -> ApiResult<Json<Vec<LedgerResponse>>> {
    let books = state.store.snapshot().await?;
    let as_of = query.as_of.unwrap_or_else(today);
    let engine = ReplayEngine::new(books.snapshot());

    let response = books
        .ledgers
        .iter()
        .zip(engine.ledger_balances(as_of))
        .map(|(ledger, summary)| {
            let (ledger, portal_enabled) = without_credentials(ledger.clone());
            LedgerResponse {
                ledger,
                portal_enabled,
                balance: summary.balance,
                balance_label: summary.label.to_string(),
            }
        })
        .collect();

    Ok(Json(response))
}

/// POST /ledgers
async fn create_ledger<S: DocumentStore + 'static>(
    State(state): State<AppState<S>>,
    Json(request): Json<SaveLedgerRequest>,
) -> ApiResult<impl IntoResponse> {
    if request.name.trim().is_empty() {
        return Err(ApiError::validation("Ledger name is required"));
    }
    if request.opening_balance < Decimal::ZERO {
        return Err(ApiError::validation(
            "Opening balance must not be negative; use the Dr/Cr side instead",
        ));
    }
    if !within_limit(request.opening_balance) {
        return Err(ApiError::validation(format!(
            "Opening balance must not exceed {MAX_AMOUNT}"
        )));
    }

    let mut ledger = Ledger::new(request.code.trim(), request.name.trim(), request.group)
        .with_opening(
            request.opening_balance,
            request.opening_balance_type.unwrap_or(BalanceSide::Dr),
        );
    if let Some(id) = request.id {
        ledger.id = id;
    }
    ledger.gstin = request.gstin.filter(|g| !g.trim().is_empty());
    ledger.portal_credentials = request.portal_credentials;

    let saved = state.store.save_ledger(ledger).await?;
    tracing::info!(ledger_id = %saved.id, code = %saved.code, group = %saved.group, "ledger saved");

    let (ledger, portal_enabled) = without_credentials(saved);
    Ok((
        StatusCode::CREATED,
        Json(SavedLedgerResponse {
            ledger,
            portal_enabled,
        }),
    ))
}

fn without_credentials(mut ledger: Ledger) -> (Ledger, bool) {
    let portal_enabled = ledger.portal_credentials.take().is_some();
    (ledger, portal_enabled)
}

/// DELETE /ledgers/{ledger_id}
async fn delete_ledger<S: DocumentStore + 'static>(
    State(state): State<AppState<S>>,
    Path(ledger_id): Path<LedgerId>,
) -> ApiResult<StatusCode> {
    if state.store.delete_ledger(ledger_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found(format!("Ledger {ledger_id}")))
    }
}

/// GET /ledgers/{ledger_id}/statement
async fn get_statement<S: DocumentStore + 'static>(
    State(state): State<AppState<S>>,
    Path(ledger_id): Path<LedgerId>,
    Query(query): Query<PeriodQuery>,
) -> ApiResult<Json<ReportResponse<LedgerStatement>>> {
    let range = query.range()?;
    let books = state.store.snapshot().await?;
    let report = ReplayEngine::new(books.snapshot())
        .generate_statement(ledger_id, range)
        .ok_or_else(|| ApiError::not_found(format!("Ledger {ledger_id}")))?;

    Ok(Json(ReportResponse {
        business: books.profile,
        report,
    }))
}

/// GET /statements?group=
///
/// One statement per ledger of the group. An unknown label yields no rows.
async fn get_group_statement<S: DocumentStore + 'static>(
    State(state): State<AppState<S>>,
    Query(query): Query<GroupStatementQuery>,
) -> ApiResult<Json<ReportResponse<Vec<LedgerStatement>>>> {
    let range = PeriodQuery {
        from: query.from,
        to: query.to,
    }
    .range()?;
    let group = AccountGroup::from_label(&query.group);

    let books = state.store.snapshot().await?;
    let report = ReplayEngine::new(books.snapshot()).generate_group_statement(&group, range);

    Ok(Json(ReportResponse {
        business: books.profile,
        report,
    }))
}

/// GET /portal/ledgers/{ledger_id}/statement
///
/// Only ledgers with portal credentials are visible here, and only to a
/// caller presenting those credentials.
async fn get_portal_statement<S: DocumentStore + 'static>(
    State(state): State<AppState<S>>,
    Path(ledger_id): Path<LedgerId>,
    login: PortalLogin,
    Query(query): Query<PeriodQuery>,
) -> ApiResult<Json<ReportResponse<PortalStatement>>> {
    let range = query.range()?;
    let books = state.store.snapshot().await?;
    let engine = ReplayEngine::new(books.snapshot());

    let not_found = || ApiError::not_found(format!("Portal ledger {ledger_id}"));
    let ledger = engine.ledger(ledger_id).ok_or_else(not_found)?;
    let Some(stored) = &ledger.portal_credentials else {
        return Err(not_found());
    };
    if !login.matches(stored) {
        tracing::warn!(%ledger_id, "portal login rejected");
        return Err(ApiError::unauthorized("Invalid portal credentials"));
    }
    let statement = engine
        .generate_statement(ledger_id, range)
        .ok_or_else(not_found)?;

    let report = PortalStatement {
        party: PortalParty {
            name: ledger.name.clone(),
            code: ledger.code.clone(),
            gstin: ledger.gstin.clone(),
        },
        statement,
    };
    tracing::info!(%ledger_id, lines = report.statement.lines.len(), "portal statement served");

    Ok(Json(ReportResponse {
        business: books.profile.clone(),
        report,
    }))
}
