//! Inventory costing and stock-signal calculations.
//!
//! Pure, synchronous functions over a caller-supplied snapshot of the ledger,
//! reorder policies and lots (no IO, no storage, no shared state).

pub mod costing;
pub mod error;
pub mod item;
pub mod ledger;
pub mod lot;
pub mod reorder;
pub mod units;

pub use costing::{inventory_value, receipts_in_order, weighted_average_cost};
pub use error::InventoryError;
pub use item::{ItemKind, ItemRef};
pub use ledger::{average_daily_usage, on_hand_quantity, InventoryTransaction, TransactionKind};
pub use lot::{
    days_until_expiry, fefo_order, generate_lot_code, is_expiring_soon, parse_date, ExpiryBand,
    ExpiryThresholds, Lot, DEFAULT_EXPIRY_WARNING_DAYS, DEFAULT_EXPIRY_WATCH_DAYS,
};
pub use reorder::{reorder_point, ReorderPolicy, ReorderStatus};
pub use units::{convert, convert_str, Unit};
