//! Stock signals: per-item cost, valuation, reorder and expiry status.
//!
//! Composes the pure calculators in `opsboard-inventory` over snapshots read
//! from an [`InventorySource`]. Presentation layers consume the resulting
//! read models instead of hardcoding thresholds per screen.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use opsboard_core::{DomainError, DomainResult, LotId};
use opsboard_inventory::{
    average_daily_usage, inventory_value, on_hand_quantity, weighted_average_cost, ExpiryBand,
    ItemRef, Lot, ReorderStatus,
};

use crate::config::SignalConfig;
use crate::source::InventorySource;

/// Expiry view of a single lot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LotSignal {
    pub lot_id: LotId,
    pub item: ItemRef,
    pub code: String,
    pub quantity: f64,
    pub expires_at: DateTime<Utc>,
    pub days_left: i64,
    pub band: ExpiryBand,
    pub expiring_soon: bool,
}

/// Derived stock status for one item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockSignal {
    pub item: ItemRef,
    pub on_hand: f64,
    /// Receipt-weighted unit cost (COGS).
    pub average_unit_cost: f64,
    pub inventory_value: f64,
    pub avg_daily_usage: f64,
    pub reorder_point: u64,
    pub reorder_status: ReorderStatus,
    pub suggested_order_qty: f64,
    /// Lots in FEFO order.
    pub lots: Vec<LotSignal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationSummary {
    pub total_items: usize,
    /// Items with a reorder policy whose status is not `Good`.
    pub flagged_items: usize,
    pub reorder_now: usize,
    pub total_value: f64,
    /// Lots inside the expiry warning window.
    pub expiring_lots: usize,
}

/// Computes stock signals from an explicitly supplied source and config.
#[derive(Debug)]
pub struct StockSignalService<S> {
    source: S,
    config: SignalConfig,
}

impl<S> StockSignalService<S>
where
    S: InventorySource,
{
    pub fn new(source: S, config: SignalConfig) -> Self {
        Self { source, config }
    }

    pub fn config(&self) -> &SignalConfig {
        &self.config
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Signal for one item. Fails with `NotFound` when the item has no reorder policy.
    pub fn item_signal(&self, item: &ItemRef, now: DateTime<Utc>) -> DomainResult<StockSignal> {
        let policy = self
            .source
            .reorder_policy(item)
            .ok_or_else(|| DomainError::not_found(format!("reorder policy for {item}")))?;
        let ledger = self.source.transactions(item);

        let on_hand = on_hand_quantity(&ledger);
        let average_unit_cost = weighted_average_cost(&ledger);
        let usage = average_daily_usage(&ledger, self.config.usage_window_days, now);
        let lead_time = policy
            .lead_time_days
            .unwrap_or(self.config.default_lead_time_days);
        let reorder_point = policy.reorder_point(usage, lead_time);
        let reorder_status = policy.evaluate(on_hand, Some(reorder_point));

        tracing::debug!(
            %item,
            on_hand,
            average_unit_cost,
            reorder_point,
            status = %reorder_status,
            "computed stock signal"
        );

        Ok(StockSignal {
            item: *item,
            on_hand,
            average_unit_cost,
            inventory_value: inventory_value(on_hand, average_unit_cost),
            avg_daily_usage: usage,
            reorder_point,
            reorder_status,
            suggested_order_qty: policy.suggested_order_qty(on_hand, reorder_status),
            lots: self.lot_signals(item, now),
        })
    }

    /// Signals for every item that has a reorder policy.
    pub fn signals(&self, now: DateTime<Utc>) -> DomainResult<Vec<StockSignal>> {
        let mut out = Vec::new();
        for item in self.source.items() {
            if self.source.reorder_policy(&item).is_none() {
                tracing::debug!(%item, "no reorder policy; skipping stock signal");
                continue;
            }
            out.push(self.item_signal(&item, now)?);
        }
        Ok(out)
    }

    /// Items that need restocking, `ReorderNow` first.
    pub fn reorder_flags(&self, now: DateTime<Utc>) -> DomainResult<Vec<StockSignal>> {
        let mut flagged: Vec<_> = self
            .signals(now)?
            .into_iter()
            .filter(|s| s.reorder_status.needs_reorder())
            .collect();
        flagged.sort_by_key(|s| match s.reorder_status {
            ReorderStatus::ReorderNow => 0,
            ReorderStatus::ReorderSoon => 1,
            ReorderStatus::Good => 2,
        });

        if !flagged.is_empty() {
            tracing::info!(count = flagged.len(), "items flagged for reorder");
        }
        Ok(flagged)
    }

    /// Lots across all items inside the watch window, soonest first.
    pub fn expiring_lots(&self, now: DateTime<Utc>) -> Vec<LotSignal> {
        let mut lots: Vec<LotSignal> = self
            .source
            .items()
            .iter()
            .flat_map(|item| self.lot_signals(item, now))
            .filter(|l| l.days_left <= self.config.expiry_watch_days)
            .collect();
        lots.sort_by(|a, b| a.days_left.cmp(&b.days_left).then_with(|| a.code.cmp(&b.code)));
        lots
    }

    /// Totals across every item, whether or not it has a policy.
    pub fn valuation_summary(&self, now: DateTime<Utc>) -> DomainResult<ValuationSummary> {
        let items = self.source.items();
        let total_value: f64 = items
            .iter()
            .map(|item| {
                let ledger = self.source.transactions(item);
                inventory_value(on_hand_quantity(&ledger), weighted_average_cost(&ledger))
            })
            .sum();

        let signals = self.signals(now)?;
        let flagged_items = signals
            .iter()
            .filter(|s| s.reorder_status.needs_reorder())
            .count();
        let reorder_now = signals
            .iter()
            .filter(|s| s.reorder_status == ReorderStatus::ReorderNow)
            .count();
        let expiring_lots = self
            .expiring_lots(now)
            .iter()
            .filter(|l| l.expiring_soon)
            .count();

        Ok(ValuationSummary {
            total_items: items.len(),
            flagged_items,
            reorder_now,
            total_value,
            expiring_lots,
        })
    }

    fn lot_signals(&self, item: &ItemRef, now: DateTime<Utc>) -> Vec<LotSignal> {
        let mut lots = self.source.lots(item);
        opsboard_inventory::fefo_order(&mut lots);
        lots.iter().map(|lot| self.lot_signal(lot, now)).collect()
    }

    fn lot_signal(&self, lot: &Lot, now: DateTime<Utc>) -> LotSignal {
        let days_left = lot.days_until_expiry(now);
        LotSignal {
            lot_id: lot.id,
            item: lot.item,
            code: lot.code.clone(),
            quantity: lot.quantity,
            expires_at: lot.expires_at,
            days_left,
            band: ExpiryBand::classify(days_left, self.config.expiry_thresholds()),
            expiring_soon: days_left <= self.config.expiry_warning_days,
        }
    }
}
