//! Report error types.
//!
//! The replay engine itself never fails: a missing account yields no result and
//! an empty period yields an empty statement. These errors cover request
//! parsing and validation in front of the engine.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can occur while building a report request.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Invalid date range.
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange {
        /// Start date.
        start: NaiveDate,
        /// End date.
        end: NaiveDate,
    },

    /// Unknown financial report kind.
    #[error("Unknown report kind: {0} (expected tb, pl or bs)")]
    UnknownReportKind(String),

    /// Unknown aging perspective.
    #[error("Unknown aging perspective: {0} (expected receivable or payable)")]
    UnknownPerspective(String),

    /// Unknown opening stock basis.
    #[error("Unknown opening stock basis: {0} (expected live or reconstructed)")]
    UnknownOpeningStock(String),
}

impl ReportError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidDateRange { .. } => "INVALID_DATE_RANGE",
            Self::UnknownReportKind(_) => "UNKNOWN_REPORT_KIND",
            Self::UnknownPerspective(_) => "UNKNOWN_PERSPECTIVE",
            Self::UnknownOpeningStock(_) => "UNKNOWN_OPENING_STOCK",
        }
    }
}
