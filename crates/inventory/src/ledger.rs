//! Inventory ledger records and aggregation over a ledger snapshot.
//!
//! The ledger is append-only and owned by the persistence layer. Functions here
//! only read a caller-supplied slice of it.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use opsboard_core::{DomainError, DomainResult, TransactionId};

use crate::item::ItemRef;

/// Kind of ledger entry.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionKind {
    /// Stock received (purchase, production output). Only kind used for costing.
    Receipt,
    /// Stock consumed by production.
    Consume,
    /// Manual correction; quantity carries its own sign.
    Adjust,
    /// Stock sold.
    Sale,
    /// Stock returned by a customer.
    Return,
}

impl TransactionKind {
    /// Direction applied to the recorded quantity when computing on-hand stock.
    ///
    /// `Adjust` returns `1.0`: its quantity is already signed.
    pub fn direction(&self) -> f64 {
        match self {
            TransactionKind::Receipt | TransactionKind::Return | TransactionKind::Adjust => 1.0,
            TransactionKind::Consume | TransactionKind::Sale => -1.0,
        }
    }

    /// Whether this kind counts towards usage (demand) statistics.
    pub fn is_usage(&self) -> bool {
        matches!(self, TransactionKind::Consume | TransactionKind::Sale)
    }
}

/// A single immutable ledger entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryTransaction {
    pub id: TransactionId,
    pub item: ItemRef,
    pub kind: TransactionKind,
    /// Magnitude for every kind except `Adjust`, which is signed.
    pub quantity: f64,
    /// Cost per unit in currency units.
    pub unit_cost: f64,
    pub occurred_at: DateTime<Utc>,
}

impl InventoryTransaction {
    /// Build an entry without validation (e.g. when reading trusted rows).
    pub fn new(
        item: ItemRef,
        kind: TransactionKind,
        quantity: f64,
        unit_cost: f64,
        occurred_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: TransactionId::new(),
            item,
            kind,
            quantity,
            unit_cost,
            occurred_at,
        }
    }

    /// Build a receipt, rejecting negative or non-finite quantity/cost.
    pub fn receipt(
        item: ItemRef,
        quantity: f64,
        unit_cost: f64,
        occurred_at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        if !(quantity.is_finite() && quantity >= 0.0) {
            return Err(DomainError::validation(
                "receipt quantity must be a finite non-negative number",
            ));
        }
        if !(unit_cost.is_finite() && unit_cost >= 0.0) {
            return Err(DomainError::validation(
                "receipt unit cost must be a finite non-negative number",
            ));
        }
        Ok(Self::new(
            item,
            TransactionKind::Receipt,
            quantity,
            unit_cost,
            occurred_at,
        ))
    }

    pub fn with_id(mut self, id: TransactionId) -> Self {
        self.id = id;
        self
    }

    /// Quantity with the stock direction of its kind applied.
    pub fn signed_quantity(&self) -> f64 {
        self.quantity * self.kind.direction()
    }
}

/// Current stock derived from the ledger.
pub fn on_hand_quantity(transactions: &[InventoryTransaction]) -> f64 {
    transactions.iter().map(|t| t.signed_quantity()).sum()
}

/// Average daily usage (consumption + sales) over the trailing window ending at `now`.
///
/// Entries in the future relative to `now` are ignored. A zero-day window yields 0.
pub fn average_daily_usage(
    transactions: &[InventoryTransaction],
    window_days: u32,
    now: DateTime<Utc>,
) -> f64 {
    if window_days == 0 {
        return 0.0;
    }
    let since = now - Duration::days(i64::from(window_days));
    let used: f64 = transactions
        .iter()
        .filter(|t| t.kind.is_usage() && t.occurred_at > since && t.occurred_at <= now)
        .map(|t| t.quantity.abs())
        .sum();
    used / f64::from(window_days)
}
