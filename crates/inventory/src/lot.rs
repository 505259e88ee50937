//! Lots and expiry proximity.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use opsboard_core::{DomainError, DomainResult, LotId};

use crate::error::InventoryError;
use crate::item::ItemRef;

const MS_PER_DAY: i64 = 86_400_000;

/// Days before expiry at which a lot counts as expiring soon.
pub const DEFAULT_EXPIRY_WARNING_DAYS: i64 = 30;

/// Days before expiry at which a lot starts being watched.
pub const DEFAULT_EXPIRY_WATCH_DAYS: i64 = 60;

/// A batch of physical stock sharing manufacture/expiry dates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lot {
    pub id: LotId,
    pub item: ItemRef,
    pub code: String,
    pub quantity: f64,
    pub manufactured_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Lot {
    pub fn new(
        item: ItemRef,
        code: impl Into<String>,
        quantity: f64,
        manufactured_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        let code = code.into();
        if code.trim().is_empty() {
            return Err(DomainError::validation("lot code cannot be empty"));
        }
        if !(quantity.is_finite() && quantity >= 0.0) {
            return Err(DomainError::validation(
                "lot quantity must be a finite non-negative number",
            ));
        }
        if expires_at < manufactured_at {
            return Err(DomainError::validation(
                "lot cannot expire before it was manufactured",
            ));
        }
        Ok(Self {
            id: LotId::new(),
            item,
            code,
            quantity,
            manufactured_at,
            expires_at,
        })
    }

    pub fn days_until_expiry(&self, now: DateTime<Utc>) -> i64 {
        days_until_expiry(self.expires_at, now)
    }

    pub fn band(&self, now: DateTime<Utc>, thresholds: ExpiryThresholds) -> ExpiryBand {
        ExpiryBand::classify(self.days_until_expiry(now), thresholds)
    }
}

/// Whole days until `expires_at`, rounded up.
///
/// Negative once the lot has expired by at least a full day.
pub fn days_until_expiry(expires_at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let ms = (expires_at - now).num_milliseconds();
    (ms as f64 / MS_PER_DAY as f64).ceil() as i64
}

/// `true` when the lot expires within `threshold_days` (inclusive), expired lots included.
pub fn is_expiring_soon(
    expires_at: DateTime<Utc>,
    now: DateTime<Utc>,
    threshold_days: i64,
) -> bool {
    days_until_expiry(expires_at, now) <= threshold_days
}

/// Parse an RFC 3339 timestamp or a bare `YYYY-MM-DD` date (midnight UTC).
pub fn parse_date(input: &str) -> Result<DateTime<Utc>, InventoryError> {
    let s = input.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Ok(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .ok_or_else(|| InventoryError::InvalidDate(input.to_string()))
}

/// Day thresholds used to classify lots by expiry proximity.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpiryThresholds {
    pub warning_days: i64,
    pub watch_days: i64,
}

impl Default for ExpiryThresholds {
    fn default() -> Self {
        Self {
            warning_days: DEFAULT_EXPIRY_WARNING_DAYS,
            watch_days: DEFAULT_EXPIRY_WATCH_DAYS,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpiryBand {
    /// Zero or fewer days left.
    Expired,
    /// Within the warning window.
    Critical,
    /// Within the watch window.
    Warning,
    Fresh,
}

impl ExpiryBand {
    pub fn classify(days_left: i64, thresholds: ExpiryThresholds) -> Self {
        if days_left <= 0 {
            ExpiryBand::Expired
        } else if days_left <= thresholds.warning_days {
            ExpiryBand::Critical
        } else if days_left <= thresholds.watch_days {
            ExpiryBand::Warning
        } else {
            ExpiryBand::Fresh
        }
    }
}

/// Sort lots First-Expired-First-Out; equal expiry falls back to lot code.
pub fn fefo_order(lots: &mut [Lot]) {
    lots.sort_by(|a, b| {
        a.expires_at
            .cmp(&b.expires_at)
            .then_with(|| a.code.cmp(&b.code))
    });
}

/// Generate a human-readable lot code: `PREFIX-<base36 millis>-<3 random chars>`.
pub fn generate_lot_code(prefix: &str, now: DateTime<Utc>) -> String {
    let millis = u64::try_from(now.timestamp_millis()).unwrap_or(0);
    let random = uuid::Uuid::now_v7();
    let suffix: String = random.as_bytes()[13..16]
        .iter()
        .map(|b| base36_digit(u64::from(*b) % 36))
        .collect();
    format!("{prefix}-{}-{suffix}", to_base36(millis))
}

fn base36_digit(d: u64) -> char {
    char::from_digit(d as u32, 36)
        .unwrap_or('0')
        .to_ascii_uppercase()
}

fn to_base36(mut n: u64) -> String {
    if n == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while n > 0 {
        digits.push(base36_digit(n % 36));
        n /= 36;
    }
    digits.iter().rev().collect()
}
