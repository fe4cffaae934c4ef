//! Single-authorization usage detail.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use authwatch_core::config::AlertThresholds;
use authwatch_core::types::AuthorizationId;
use authwatch_entity::authorization::Authorization;

use super::engine::{days_remaining, usage_percentage};

/// Display figures for one authorization.
///
/// Flags agree with the alert tiers: `is_nearing_limit` is set exactly when
/// a usage alert would fire, `is_expiring_soon` or `is_expired` exactly when
/// an expiry alert would.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorizationUsage {
    /// Authorization ID.
    pub authorization_id: AuthorizationId,
    /// Units used (missing counts as zero).
    pub used_units: f64,
    /// Units granted.
    pub authorized_units: Option<f64>,
    /// Percent used, clamped to `[0, 100]`. `None` without authorized units.
    pub usage_percentage: Option<f64>,
    /// Units left, never negative. `None` without authorized units.
    pub remaining_units: Option<f64>,
    /// Days until the end date, never negative. `None` without an end date.
    pub days_remaining: Option<i64>,
    /// End date.
    pub end_date: Option<NaiveDate>,
    /// Ends within the warning window but has not ended.
    pub is_expiring_soon: bool,
    /// The end date has passed.
    pub is_expired: bool,
    /// Usage is at or above the warning cut-off.
    pub is_nearing_limit: bool,
}

impl AuthorizationUsage {
    /// Compute the detail for `authorization` as of `now`.
    pub fn compute(
        authorization: &Authorization,
        thresholds: &AlertThresholds,
        now: DateTime<Utc>,
    ) -> Self {
        let used = authorization.used_units.unwrap_or(0.0);
        let percentage = usage_percentage(authorization);
        let days = authorization.end_date.map(|end| days_remaining(end, now));

        Self {
            authorization_id: authorization.id,
            used_units: used,
            authorized_units: authorization.authorized_units,
            usage_percentage: percentage.map(|p| p.clamp(0.0, 100.0)),
            remaining_units: authorization
                .authorized_units
                .map(|authorized| (authorized - used).max(0.0)),
            days_remaining: days.map(|d| d.max(0)),
            end_date: authorization.end_date,
            is_expiring_soon: days
                .is_some_and(|d| d > 0 && d <= thresholds.expiry.warning_days),
            is_expired: days.is_some_and(|d| d <= 0),
            is_nearing_limit: percentage.is_some_and(|p| p >= thresholds.usage.warning_percent),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alert::engine::AlertEngine;
    use authwatch_core::types::{ClientId, TenantId};
    use authwatch_entity::authorization::AuthorizationStatus;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 10, 0, 0, 0).unwrap()
    }

    fn authorization(authorized: Option<f64>, used: Option<f64>, end_in_days: Option<i64>) -> Authorization {
        Authorization {
            id: AuthorizationId::new(),
            tenant_id: TenantId::new(),
            client_id: ClientId::new(),
            client_name: "Mary Seacole".to_string(),
            client_identifier: None,
            authorization_number: None,
            service_type: Some("Physical Therapy".to_string()),
            authorized_units: authorized,
            used_units: used,
            start_date: None,
            end_date: end_in_days.map(|d| now().date_naive() + Duration::days(d)),
            status: AuthorizationStatus::Active,
            created_at: now(),
            updated_at: now(),
        }
    }

    fn detail(auth: &Authorization) -> AuthorizationUsage {
        AlertEngine::default().usage_detail(auth, now())
    }

    #[test]
    fn test_overused_authorization_is_clamped() {
        let usage = detail(&authorization(Some(40.0), Some(52.0), Some(-4)));
        assert_eq!(usage.usage_percentage, Some(100.0));
        assert_eq!(usage.remaining_units, Some(0.0));
        assert_eq!(usage.days_remaining, Some(0));
        assert!(usage.is_expired);
        assert!(!usage.is_expiring_soon);
        assert!(usage.is_nearing_limit);
    }

    #[test]
    fn test_typical_authorization() {
        let usage = detail(&authorization(Some(40.0), Some(10.0), Some(30)));
        assert_eq!(usage.used_units, 10.0);
        assert_eq!(usage.usage_percentage, Some(25.0));
        assert_eq!(usage.remaining_units, Some(30.0));
        assert_eq!(usage.days_remaining, Some(30));
        assert!(usage.is_expiring_soon);
        assert!(!usage.is_expired);
        assert!(!usage.is_nearing_limit);
    }

    #[test]
    fn test_missing_fields() {
        let usage = detail(&authorization(None, None, None));
        assert_eq!(usage.used_units, 0.0);
        assert_eq!(usage.usage_percentage, None);
        assert_eq!(usage.remaining_units, None);
        assert_eq!(usage.days_remaining, None);
        assert!(!usage.is_expiring_soon && !usage.is_expired && !usage.is_nearing_limit);
    }

    #[test]
    fn test_flags_agree_with_alert_tiers() {
        let engine = AlertEngine::default();
        for days in [-2, 0, 1, 7, 14, 30, 31, 90] {
            for used in [0.0, 79.0, 80.0, 95.0, 100.0, 250.0] {
                let auth = authorization(Some(100.0), Some(used), Some(days));
                let usage = engine.usage_detail(&auth, now());
                let evaluation = engine.evaluate(std::slice::from_ref(&auth), now());

                let has_usage_alert = evaluation.alerts.iter().any(|a| a.alert_type.is_usage());
                let has_expiry_alert = evaluation.alerts.iter().any(|a| a.alert_type.is_expiry());
                assert_eq!(usage.is_nearing_limit, has_usage_alert, "used {used}");
                assert_eq!(
                    usage.is_expiring_soon || usage.is_expired,
                    has_expiry_alert,
                    "days {days}"
                );
            }
        }
    }
}
