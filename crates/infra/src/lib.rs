//! Infrastructure layer: data access seam, configuration, stock-signal service.

pub mod config;
pub mod signals;
pub mod source;

pub use config::SignalConfig;
pub use signals::{LotSignal, StockSignal, StockSignalService, ValuationSummary};
pub use source::{InMemoryInventorySource, InventorySource};
