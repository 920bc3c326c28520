//! API route definitions.

use axum::Router;
use bahi_core::engine::BusinessProfile;
use bahi_core::period::DateRange;
use bahi_core::reports::ReportError;
use bahi_store::DocumentStore;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::AppState;

pub mod health;
pub mod items;
pub mod ledgers;
pub mod profile;
pub mod reports;
pub mod vouchers;

/// Creates the API router with all routes.
pub fn api_routes<S: DocumentStore + 'static>() -> Router<AppState<S>> {
    Router::new()
        .merge(health::routes())
        .merge(ledgers::routes())
        .merge(vouchers::routes())
        .merge(items::routes())
        .merge(profile::routes())
        .merge(reports::routes())
}

/// `?from=YYYY-MM-DD&to=YYYY-MM-DD`, both optional.
#[derive(Debug, Default, Deserialize)]
pub struct PeriodQuery {
    /// Start date (defaults to the start of the fiscal year containing `to`).
    pub from: Option<NaiveDate>,
    /// End date (defaults to today).
    pub to: Option<NaiveDate>,
}

impl PeriodQuery {
    /// Resolves the window, rejecting `from > to`.
    pub fn range(&self) -> Result<DateRange, ReportError> {
        let to = self.to.unwrap_or_else(today);
        match self.from {
            Some(from) => DateRange::validated(from, to),
            None => Ok(DateRange::fiscal_year_to_date(to)),
        }
    }
}

/// Statement or report with the business header.
#[derive(Debug, Serialize)]
pub struct ReportResponse<T> {
    /// Business header.
    pub business: BusinessProfile,
    /// Body.
    pub report: T,
}

pub(crate) fn today() -> NaiveDate {
    chrono::Utc::now().date_naive()
}
