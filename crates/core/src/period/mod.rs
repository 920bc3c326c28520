//! Reporting periods.

pub mod range;

pub use range::{DateRange, fiscal_year_start};
