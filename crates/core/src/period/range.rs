//! Inclusive date ranges for statements.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::reports::ReportError;

/// An inclusive `[start, end]` reporting window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    /// First day of the window.
    pub start: NaiveDate,
    /// Last day of the window.
    pub end: NaiveDate,
}

impl DateRange {
    /// Creates a range without validation.
    ///
    /// An inverted range is legal and simply contains no dates.
    #[must_use]
    pub const fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Creates a range, rejecting `start > end`.
    pub fn validated(start: NaiveDate, end: NaiveDate) -> Result<Self, ReportError> {
        if start > end {
            return Err(ReportError::InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Returns true if the date falls within this range.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// From the start of the April-March fiscal year containing `end` up to `end`.
    #[must_use]
    pub fn fiscal_year_to_date(end: NaiveDate) -> Self {
        Self::new(fiscal_year_start(end), end)
    }
}

/// First day (1 April) of the fiscal year containing `date`.
#[must_use]
pub fn fiscal_year_start(date: NaiveDate) -> NaiveDate {
    let year = if date.month() >= 4 {
        date.year()
    } else {
        date.year() - 1
    };
    NaiveDate::from_ymd_opt(year, 4, 1).unwrap_or(date)
}
