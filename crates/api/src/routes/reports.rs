//! Report routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use bahi_core::aging::{AgingReport, AgingRequest, Perspective};
use bahi_core::chart::AccountGroup;
use bahi_core::engine::ReplayEngine;
use bahi_core::reports::{FinancialReport, ReportKind};
use bahi_store::DocumentStore;
use chrono::NaiveDate;
use serde::Deserialize;

use super::{PeriodQuery, ReportResponse, today};
use crate::AppState;
use crate::error::ApiResult;

/// Creates the report routes.
pub fn routes<S: DocumentStore + 'static>() -> Router<AppState<S>> {
    Router::new()
        .route("/reports/aging", get(get_aging_report::<S>))
        .route("/reports/{kind}", get(get_financial_report::<S>))
}

/// Query parameters for the aging report.
#[derive(Debug, Deserialize)]
pub struct AgingQuery {
    /// `receivable` (default) or `payable`.
    pub perspective: Option<String>,
    /// Age bills as of this date (defaults to today).
    pub as_of: Option<NaiveDate>,
    /// Group label to age instead of the perspective's default group.
    pub group: Option<String>,
}

/// GET /reports/aging
async fn get_aging_report<S: DocumentStore + 'static>(
    State(state): State<AppState<S>>,
    Query(query): Query<AgingQuery>,
) -> ApiResult<Json<ReportResponse<AgingReport>>> {
    let perspective: Perspective = match query.perspective.as_deref() {
        Some(p) => p.parse()?,
        None => Perspective::default(),
    };
    let request = AgingRequest {
        perspective,
        as_of: query.as_of.unwrap_or_else(today),
        group: query.group.as_deref().map(AccountGroup::from_label),
    };

    let books = state.store.snapshot().await?;
    let report = ReplayEngine::new(books.snapshot()).generate_aging_report(&request);

    Ok(Json(ReportResponse {
        business: books.profile,
        report,
    }))
}

/// GET /reports/{kind}
///
/// `kind` is `tb`, `pl` or `bs`. Balances are taken as of `to`.
async fn get_financial_report<S: DocumentStore + 'static>(
    State(state): State<AppState<S>>,
    Path(kind): Path<String>,
    Query(query): Query<PeriodQuery>,
) -> ApiResult<Json<ReportResponse<FinancialReport>>> {
    let kind: ReportKind = kind.parse()?;
    let range = query.range()?;

    let books = state.store.snapshot().await?;
    let report = ReplayEngine::new(books.snapshot()).generate_financial_report(kind, range);

    Ok(Json(ReportResponse {
        business: books.profile,
        report,
    }))
}
