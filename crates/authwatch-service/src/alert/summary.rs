//! Aggregate counts over a set of alerts.

use serde::{Deserialize, Serialize};

use authwatch_entity::alert::{Alert, AlertSeverity};

/// Counts shown alongside the alert list.
///
/// `critical + high + warning == total`, and `expiring + low_units == total`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertSummary {
    /// Number of alerts.
    pub total: usize,
    /// Alerts with `CRITICAL` severity.
    pub critical: usize,
    /// Alerts with `HIGH` severity.
    pub high: usize,
    /// Alerts with `WARNING` severity.
    pub warning: usize,
    /// Expiry-family alerts (`EXPIRING_SOON`, `EXPIRING_CRITICAL`, `EXPIRED`).
    pub expiring: usize,
    /// Usage-family alerts (`UNITS_LOW`, `UNITS_EXHAUSTED`).
    pub low_units: usize,
}

impl AlertSummary {
    /// Tally `alerts`.
    pub fn from_alerts(alerts: &[Alert]) -> Self {
        alerts.iter().fold(Self::default(), |mut summary, alert| {
            summary.total += 1;
            match alert.severity {
                AlertSeverity::Critical => summary.critical += 1,
                AlertSeverity::High => summary.high += 1,
                AlertSeverity::Warning => summary.warning += 1,
            }
            if alert.alert_type.is_expiry() {
                summary.expiring += 1;
            }
            if alert.alert_type.is_usage() {
                summary.low_units += 1;
            }
            summary
        })
    }
}
