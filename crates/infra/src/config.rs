//! Configuration loading and representation.

use std::str::FromStr;

use anyhow::{ensure, Context};

use opsboard_inventory::{
    ExpiryThresholds, DEFAULT_EXPIRY_WARNING_DAYS, DEFAULT_EXPIRY_WATCH_DAYS,
};

pub const ENV_EXPIRY_WARNING_DAYS: &str = "OPSBOARD_EXPIRY_WARNING_DAYS";
pub const ENV_EXPIRY_WATCH_DAYS: &str = "OPSBOARD_EXPIRY_WATCH_DAYS";
pub const ENV_USAGE_WINDOW_DAYS: &str = "OPSBOARD_USAGE_WINDOW_DAYS";
pub const ENV_DEFAULT_LEAD_TIME_DAYS: &str = "OPSBOARD_DEFAULT_LEAD_TIME_DAYS";

/// Thresholds and windows used when deriving stock signals.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalConfig {
    /// Lots at or below this many days left are "expiring soon".
    pub expiry_warning_days: i64,
    /// Lots at or below this many days left show up on the expiring list.
    pub expiry_watch_days: i64,
    /// Trailing window for average daily usage.
    pub usage_window_days: u32,
    /// Lead time used when a policy has none.
    pub default_lead_time_days: f64,
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            expiry_warning_days: DEFAULT_EXPIRY_WARNING_DAYS,
            expiry_watch_days: DEFAULT_EXPIRY_WATCH_DAYS,
            usage_window_days: 30,
            default_lead_time_days: 14.0,
        }
    }
}

impl SignalConfig {
    /// Load from process environment; unset variables keep their defaults.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary variable lookup (environment, file, test map).
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let config = Self {
            expiry_warning_days: parse_var(
                &lookup,
                ENV_EXPIRY_WARNING_DAYS,
                defaults.expiry_warning_days,
            )?,
            expiry_watch_days: parse_var(&lookup, ENV_EXPIRY_WATCH_DAYS, defaults.expiry_watch_days)?,
            usage_window_days: parse_var(&lookup, ENV_USAGE_WINDOW_DAYS, defaults.usage_window_days)?,
            default_lead_time_days: parse_var(
                &lookup,
                ENV_DEFAULT_LEAD_TIME_DAYS,
                defaults.default_lead_time_days,
            )?,
        };
        config.validate()?;

        tracing::debug!(?config, "loaded signal config");
        Ok(config)
    }

    pub fn with_expiry_warning_days(mut self, days: i64) -> Self {
        self.expiry_warning_days = days;
        self
    }

    pub fn with_expiry_watch_days(mut self, days: i64) -> Self {
        self.expiry_watch_days = days;
        self
    }

    pub fn with_usage_window_days(mut self, days: u32) -> Self {
        self.usage_window_days = days;
        self
    }

    pub fn with_default_lead_time_days(mut self, days: f64) -> Self {
        self.default_lead_time_days = days;
        self
    }

    pub fn expiry_thresholds(&self) -> ExpiryThresholds {
        ExpiryThresholds {
            warning_days: self.expiry_warning_days,
            watch_days: self.expiry_watch_days,
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            self.expiry_warning_days >= 0,
            "{ENV_EXPIRY_WARNING_DAYS} must not be negative"
        );
        ensure!(
            self.expiry_watch_days >= self.expiry_warning_days,
            "{ENV_EXPIRY_WATCH_DAYS} must be at least {ENV_EXPIRY_WARNING_DAYS}"
        );
        ensure!(
            self.default_lead_time_days.is_finite() && self.default_lead_time_days >= 0.0,
            "{ENV_DEFAULT_LEAD_TIME_DAYS} must be a finite non-negative number"
        );
        Ok(())
    }
}

fn parse_var<T, F>(lookup: &F, key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("invalid value for {key}: {raw:?}")),
    }
}
