//! Receipt-weighted unit cost (COGS) and valuation.

use crate::ledger::{InventoryTransaction, TransactionKind};

/// Receipts from the snapshot, oldest first.
///
/// The sort is stable: receipts with equal timestamps keep their input order.
pub fn receipts_in_order(transactions: &[InventoryTransaction]) -> Vec<&InventoryTransaction> {
    let mut receipts: Vec<&InventoryTransaction> = transactions
        .iter()
        .filter(|t| t.kind == TransactionKind::Receipt)
        .collect();
    receipts.sort_by_key(|t| t.occurred_at);
    receipts
}

/// Weighted average unit cost over all receipts in the snapshot.
///
/// `Σ(qty × unit_cost) / Σ(qty)`; returns `0.0` when there is no received quantity.
pub fn weighted_average_cost(transactions: &[InventoryTransaction]) -> f64 {
    let mut total_cost = 0.0;
    let mut total_qty = 0.0;

    for txn in receipts_in_order(transactions) {
        total_cost += txn.quantity * txn.unit_cost;
        total_qty += txn.quantity;
    }

    if total_qty > 0.0 {
        total_cost / total_qty
    } else {
        0.0
    }
}

/// Value of the stock on hand at the given unit cost (0 when nothing is on hand).
pub fn inventory_value(on_hand: f64, unit_cost: f64) -> f64 {
    if on_hand > 0.0 { on_hand * unit_cost } else { 0.0 }
}
