//! Classified alert conditions.
//!
//! Every alert is derived from exactly one [`AlertCondition`]. The type,
//! severity, id label, and message are all functions of the condition, so
//! the classification table is checked for exhaustiveness at compile time.

use serde::{Deserialize, Serialize};

use super::key::AlertKind;
use super::kind::{AlertSeverity, AlertType};

/// The tier an authorization fell into, with the quantity that placed it there.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "tier", rename_all = "snake_case")]
pub enum AlertCondition {
    /// The validity window has ended (`days_remaining <= 0`).
    Expired {
        /// Unclamped days remaining.
        days_remaining: i64,
    },
    /// Expires inside the critical window.
    ExpiringCritical {
        /// Days remaining.
        days_remaining: i64,
    },
    /// Expires inside the high window; reauthorization is needed.
    ExpiringHigh {
        /// Days remaining.
        days_remaining: i64,
    },
    /// Expires inside the warning window.
    ExpiringWarning {
        /// Days remaining.
        days_remaining: i64,
    },
    /// All units used (`usage_percentage >= 100`).
    UnitsExhausted {
        /// Unclamped usage percentage.
        usage_percentage: f64,
    },
    /// Usage inside the high band.
    UnitsHigh {
        /// Usage percentage.
        usage_percentage: f64,
    },
    /// Usage inside the warning band.
    UnitsWarning {
        /// Usage percentage.
        usage_percentage: f64,
    },
}

impl AlertCondition {
    /// The alert type reported for this condition.
    pub fn alert_type(&self) -> AlertType {
        match self {
            Self::Expired { .. } => AlertType::Expired,
            Self::ExpiringCritical { .. } => AlertType::ExpiringCritical,
            Self::ExpiringHigh { .. } | Self::ExpiringWarning { .. } => AlertType::ExpiringSoon,
            Self::UnitsExhausted { .. } => AlertType::UnitsExhausted,
            Self::UnitsHigh { .. } | Self::UnitsWarning { .. } => AlertType::UnitsLow,
        }
    }

    /// The severity tier of this condition.
    pub fn severity(&self) -> AlertSeverity {
        match self {
            Self::Expired { .. } | Self::ExpiringCritical { .. } | Self::UnitsExhausted { .. } => {
                AlertSeverity::Critical
            }
            Self::ExpiringHigh { .. } | Self::UnitsHigh { .. } => AlertSeverity::High,
            Self::ExpiringWarning { .. } | Self::UnitsWarning { .. } => AlertSeverity::Warning,
        }
    }

    /// The id label of this condition's tier.
    pub fn kind(&self) -> AlertKind {
        match self {
            Self::Expired { .. } => AlertKind::Expired,
            Self::ExpiringCritical { .. } => AlertKind::ExpiringCritical,
            Self::ExpiringHigh { .. } | Self::ExpiringWarning { .. } => AlertKind::ExpiringSoon,
            Self::UnitsExhausted { .. } => AlertKind::Exhausted,
            Self::UnitsHigh { .. } => AlertKind::Usage90,
            Self::UnitsWarning { .. } => AlertKind::Usage80,
        }
    }

    /// Human-readable message including the quantitative basis.
    pub fn message(&self) -> String {
        match self {
            Self::Expired { .. } => "Authorization has expired".to_string(),
            Self::ExpiringCritical { days_remaining } => {
                format!("URGENT: Authorization expires in {days_remaining} days")
            }
            Self::ExpiringHigh { days_remaining } => format!(
                "Authorization expires in {days_remaining} days - reauthorization needed"
            ),
            Self::ExpiringWarning { days_remaining } => {
                format!("Authorization expires in {days_remaining} days")
            }
            Self::UnitsExhausted { .. } => "All authorized units have been used".to_string(),
            Self::UnitsHigh { usage_percentage } | Self::UnitsWarning { usage_percentage } => {
                format!("{:.1}% of units remaining", 100.0 - usage_percentage)
            }
        }
    }
}
