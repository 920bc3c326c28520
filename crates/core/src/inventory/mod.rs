//! Inventory items and the stock ledger.

pub mod movement;
pub mod stock;
pub mod types;

pub use movement::{post_movements, reverse_movements};
pub use stock::{OpeningStock, StockLine, StockStatement, stock_statement};
pub use types::{InventoryItem, MAIN_GODOWN};
