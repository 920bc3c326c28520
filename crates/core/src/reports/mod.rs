//! Financial statement aggregation.
//!
//! One balance pass over every classified account feeds three reports:
//! - Trial Balance
//! - Profit & Loss
//! - Balance Sheet

pub mod error;
pub mod service;
pub mod types;


pub use error::ReportError;
pub use service::ReportService;
pub use types::*;
