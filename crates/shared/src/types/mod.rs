//! Common types used across the application.

pub mod id;
pub mod money;

pub use id::*;
pub use money::{
    BALANCE_EPSILON, BalanceSide, DrCrAmount, MAX_AMOUNT, is_material, saturating_sum, within_limit,
};
