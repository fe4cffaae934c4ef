//! Alert type and severity enumerations.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of condition an alert reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "alert_type", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertType {
    /// Expires within the warning or high window.
    ExpiringSoon,
    /// Expires within the critical window.
    ExpiringCritical,
    /// Validity window has ended.
    Expired,
    /// Most authorized units are consumed.
    UnitsLow,
    /// All authorized units are consumed.
    UnitsExhausted,
}

impl AlertType {
    /// Return the type as an uppercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ExpiringSoon => "EXPIRING_SOON",
            Self::ExpiringCritical => "EXPIRING_CRITICAL",
            Self::Expired => "EXPIRED",
            Self::UnitsLow => "UNITS_LOW",
            Self::UnitsExhausted => "UNITS_EXHAUSTED",
        }
    }

    /// Whether this type belongs to the expiry family.
    pub fn is_expiry(&self) -> bool {
        matches!(
            self,
            Self::ExpiringSoon | Self::ExpiringCritical | Self::Expired
        )
    }

    /// Whether this type belongs to the usage family.
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::UnitsLow | Self::UnitsExhausted)
    }
}

impl fmt::Display for AlertType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Severity tier of an alert, ordered from least to most urgent.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(type_name = "alert_severity", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum AlertSeverity {
    /// Needs attention soon.
    Warning,
    /// Needs attention this week.
    High,
    /// Needs attention now.
    Critical,
}

impl AlertSeverity {
    /// Return the severity as an uppercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Warning => "WARNING",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_families_partition_types() {
        for t in [
            AlertType::ExpiringSoon,
            AlertType::ExpiringCritical,
            AlertType::Expired,
            AlertType::UnitsLow,
            AlertType::UnitsExhausted,
        ] {
            assert_ne!(t.is_expiry(), t.is_usage(), "{t} must be in exactly one family");
        }
    }

    #[test]
    fn test_severity_ordering() {
        assert!(AlertSeverity::Critical > AlertSeverity::High);
        assert!(AlertSeverity::High > AlertSeverity::Warning);
    }

    #[test]
    fn test_serde_uses_screaming_case() {
        let json = serde_json::to_string(&AlertType::UnitsExhausted).unwrap();
        assert_eq!(json, "\"UNITS_EXHAUSTED\"");
        let severity: AlertSeverity = serde_json::from_str("\"HIGH\"").unwrap();
        assert_eq!(severity, AlertSeverity::High);
    }
}
