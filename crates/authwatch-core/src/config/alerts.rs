//! Alert classification and acknowledgement configuration.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Alert engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertsConfig {
    /// Tier cut-offs for expiry and usage classification.
    #[serde(default)]
    pub thresholds: AlertThresholds,
    /// How acknowledging an alert is persisted.
    #[serde(default)]
    pub acknowledgement: AcknowledgementMode,
    /// Maximum number of acknowledged records returned by a listing.
    #[serde(default = "default_saved_alert_limit")]
    pub saved_alert_limit: u32,
}

impl Default for AlertsConfig {
    fn default() -> Self {
        Self {
            thresholds: AlertThresholds::default(),
            acknowledgement: AcknowledgementMode::default(),
            saved_alert_limit: default_saved_alert_limit(),
        }
    }
}

/// How repeated acknowledgements of the same alert are stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AcknowledgementMode {
    /// Every acknowledgement inserts a new record.
    #[default]
    Append,
    /// One record per `(authorization, alert type)`; later acknowledgements
    /// overwrite the action fields.
    Upsert,
}

/// Day and percentage cut-offs for the alert tiers.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AlertThresholds {
    /// Expiry tier cut-offs.
    #[serde(default)]
    pub expiry: ExpiryThresholds,
    /// Usage tier cut-offs.
    #[serde(default)]
    pub usage: UsageThresholds,
}

/// Upper bounds (inclusive, in days remaining) of the expiry tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpiryThresholds {
    /// `0 < d <= critical_days` raises a critical expiring alert.
    #[serde(default = "default_critical_days")]
    pub critical_days: i64,
    /// `critical_days < d <= high_days` raises a high expiring-soon alert.
    #[serde(default = "default_high_days")]
    pub high_days: i64,
    /// `high_days < d <= warning_days` raises a warning expiring-soon alert.
    #[serde(default = "default_warning_days")]
    pub warning_days: i64,
}

impl Default for ExpiryThresholds {
    fn default() -> Self {
        Self {
            critical_days: default_critical_days(),
            high_days: default_high_days(),
            warning_days: default_warning_days(),
        }
    }
}

/// Lower bounds (inclusive, in percent used) of the usage tiers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UsageThresholds {
    /// `p >= warning_percent` raises a warning units-low alert.
    #[serde(default = "default_warning_percent")]
    pub warning_percent: f64,
    /// `p >= high_percent` raises a high units-low alert.
    #[serde(default = "default_high_percent")]
    pub high_percent: f64,
}

impl Default for UsageThresholds {
    fn default() -> Self {
        Self {
            warning_percent: default_warning_percent(),
            high_percent: default_high_percent(),
        }
    }
}

/// Usage at or above this percentage means the units are exhausted.
pub const EXHAUSTED_PERCENT: f64 = 100.0;

impl AlertThresholds {
    /// Check that the tiers are strictly ordered and non-overlapping.
    pub fn validate(&self) -> Result<(), AppError> {
        let e = &self.expiry;
        if !(0 < e.critical_days && e.critical_days < e.high_days && e.high_days < e.warning_days)
        {
            return Err(AppError::configuration(format!(
                "alerts.thresholds.expiry must satisfy 0 < critical_days < high_days < warning_days \
                 (got {}, {}, {})",
                e.critical_days, e.high_days, e.warning_days
            )));
        }

        let u = &self.usage;
        if !(u.warning_percent > 0.0
            && u.warning_percent < u.high_percent
            && u.high_percent < EXHAUSTED_PERCENT)
        {
            return Err(AppError::configuration(format!(
                "alerts.thresholds.usage must satisfy 0 < warning_percent < high_percent < 100 \
                 (got {}, {})",
                u.warning_percent, u.high_percent
            )));
        }

        Ok(())
    }
}

fn default_saved_alert_limit() -> u32 {
    100
}

fn default_critical_days() -> i64 {
    7
}

fn default_high_days() -> i64 {
    14
}

fn default_warning_days() -> i64 {
    30
}

fn default_warning_percent() -> f64 {
    80.0
}

fn default_high_percent() -> f64 {
    90.0
}
