//! Reorder point arithmetic and reorder policy evaluation.

use serde::{Deserialize, Serialize};

/// Threshold quantity at which restocking should be triggered.
///
/// `ceil(avg_daily_usage × lead_time_days + safety_stock)`. Inputs are expected
/// to be non-negative; a negative result saturates to 0.
pub fn reorder_point(avg_daily_usage: f64, lead_time_days: f64, safety_stock: f64) -> u64 {
    (avg_daily_usage * lead_time_days + safety_stock).ceil() as u64
}

/// Outcome of evaluating stock against a reorder policy.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReorderStatus {
    ReorderNow,
    ReorderSoon,
    Good,
}

impl ReorderStatus {
    pub fn needs_reorder(&self) -> bool {
        !matches!(self, ReorderStatus::Good)
    }

    pub fn label(&self) -> &'static str {
        match self {
            ReorderStatus::ReorderNow => "Reorder Now",
            ReorderStatus::ReorderSoon => "Reorder Soon",
            ReorderStatus::Good => "Good",
        }
    }
}

impl core::fmt::Display for ReorderStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-item restocking thresholds (configuration, not derived).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReorderPolicy {
    pub min_qty: f64,
    pub target_qty: f64,
    pub safety_stock_qty: f64,
    /// Supplier lead time; callers fall back to a configured default when absent.
    #[serde(default)]
    pub lead_time_days: Option<f64>,
}

impl ReorderPolicy {
    pub fn new(min_qty: f64, target_qty: f64, safety_stock_qty: f64) -> Self {
        Self {
            min_qty,
            target_qty,
            safety_stock_qty,
            lead_time_days: None,
        }
    }

    pub fn with_lead_time_days(mut self, days: f64) -> Self {
        self.lead_time_days = Some(days);
        self
    }

    /// Reorder point for this policy given observed usage.
    pub fn reorder_point(&self, avg_daily_usage: f64, lead_time_days: f64) -> u64 {
        reorder_point(avg_daily_usage, lead_time_days, self.safety_stock_qty)
    }

    /// Single evaluation of stock against this policy.
    ///
    /// - at or below `min_qty`: `ReorderNow`
    /// - at or below `min_qty + safety_stock_qty`, or at or below the usage-based
    ///   reorder point when one is known: `ReorderSoon`
    /// - otherwise `Good`
    pub fn evaluate(&self, on_hand: f64, reorder_point: Option<u64>) -> ReorderStatus {
        if on_hand <= self.min_qty {
            return ReorderStatus::ReorderNow;
        }

        let buffer = self.min_qty + self.safety_stock_qty;
        let soon_at = match reorder_point {
            Some(rp) => buffer.max(rp as f64),
            None => buffer,
        };

        if on_hand <= soon_at {
            ReorderStatus::ReorderSoon
        } else {
            ReorderStatus::Good
        }
    }

    /// Quantity needed to bring stock back up to `target_qty` (0 when stock is `Good`).
    pub fn suggested_order_qty(&self, on_hand: f64, status: ReorderStatus) -> f64 {
        if !status.needs_reorder() {
            return 0.0;
        }
        (self.target_qty - on_hand).max(0.0)
    }
}
