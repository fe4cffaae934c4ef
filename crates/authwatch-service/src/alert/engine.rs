//! The alert engine.
//!
//! A pure, synchronous classification of authorization snapshots into
//! expiry-tier and usage-tier alerts. The evaluation time is always passed
//! in; nothing here reads a clock or touches a store.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use authwatch_core::config::{AlertThresholds, EXHAUSTED_PERCENT};
use authwatch_core::types::AuthorizationId;
use authwatch_entity::alert::{Alert, AlertCondition};
use authwatch_entity::authorization::Authorization;

use super::summary::AlertSummary;
use super::usage::AuthorizationUsage;

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Which classification branch was skipped for an authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkippedBranch {
    /// No end date, so no expiry tier.
    Expiry,
    /// No authorized units, so no usage tier.
    Usage,
}

/// A non-fatal note that one branch of classification could not run for a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComputationSkipped {
    /// The authorization that was partially skipped.
    pub authorization_id: AuthorizationId,
    /// The branch that was skipped.
    pub branch: SkippedBranch,
    /// Why.
    pub reason: &'static str,
}

/// Result of one evaluation pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    /// Alerts, most severe first; input order within a severity.
    pub alerts: Vec<Alert>,
    /// Counts over `alerts`.
    pub summary: AlertSummary,
    /// Branches that could not be classified.
    pub skipped: Vec<ComputationSkipped>,
}

/// Classifies authorizations against configured tier cut-offs.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlertEngine {
    thresholds: AlertThresholds,
}

impl AlertEngine {
    /// Creates an engine using `thresholds`.
    pub fn new(thresholds: AlertThresholds) -> Self {
        Self { thresholds }
    }

    /// Evaluate `authorizations` as of `now`.
    ///
    /// Callers pass only the tenant's `ACTIVE` authorizations. Each record
    /// contributes at most one expiry alert and at most one usage alert; a
    /// record missing dates or units still contributes whatever branch it can.
    pub fn evaluate(&self, authorizations: &[Authorization], now: DateTime<Utc>) -> Evaluation {
        let mut alerts = Vec::new();
        let mut skipped = Vec::new();

        for authorization in authorizations {
            for (branch, condition) in [
                (SkippedBranch::Expiry, self.classify_expiry(authorization, now)),
                (SkippedBranch::Usage, self.classify_usage(authorization)),
            ] {
                match condition {
                    Ok(Some(condition)) => alerts.push(Alert::new(condition, authorization, now)),
                    Ok(None) => {}
                    Err(reason) => {
                        warn!(
                            authorization_id = %authorization.id,
                            branch = ?branch,
                            reason,
                            "Skipping alert classification"
                        );
                        skipped.push(ComputationSkipped {
                            authorization_id: authorization.id,
                            branch,
                            reason,
                        });
                    }
                }
            }
        }

        // Stable, so equal severities keep input order.
        alerts.sort_by(|a, b| b.severity.cmp(&a.severity));
        let summary = AlertSummary::from_alerts(&alerts);

        Evaluation {
            alerts,
            summary,
            skipped,
        }
    }

    /// Usage and expiry figures for a single authorization detail view.
    pub fn usage_detail(
        &self,
        authorization: &Authorization,
        now: DateTime<Utc>,
    ) -> AuthorizationUsage {
        AuthorizationUsage::compute(authorization, &self.thresholds, now)
    }

    /// The expiry-tier condition for `authorization`, if any.
    pub fn classify_expiry(
        &self,
        authorization: &Authorization,
        now: DateTime<Utc>,
    ) -> Result<Option<AlertCondition>, &'static str> {
        let end_date = authorization.end_date.ok_or("authorization has no end date")?;
        let days_remaining = days_remaining(end_date, now);
        let tiers = &self.thresholds.expiry;

        Ok(if days_remaining <= 0 {
            Some(AlertCondition::Expired { days_remaining })
        } else if days_remaining <= tiers.critical_days {
            Some(AlertCondition::ExpiringCritical { days_remaining })
        } else if days_remaining <= tiers.high_days {
            Some(AlertCondition::ExpiringHigh { days_remaining })
        } else if days_remaining <= tiers.warning_days {
            Some(AlertCondition::ExpiringWarning { days_remaining })
        } else {
            None
        })
    }

    /// The usage-tier condition for `authorization`, if any.
    pub fn classify_usage(
        &self,
        authorization: &Authorization,
    ) -> Result<Option<AlertCondition>, &'static str> {
        let usage_percentage =
            usage_percentage(authorization).ok_or("authorization has no authorized units")?;
        let tiers = &self.thresholds.usage;

        Ok(if usage_percentage >= EXHAUSTED_PERCENT {
            Some(AlertCondition::UnitsExhausted { usage_percentage })
        } else if usage_percentage >= tiers.high_percent {
            Some(AlertCondition::UnitsHigh { usage_percentage })
        } else if usage_percentage >= tiers.warning_percent {
            Some(AlertCondition::UnitsWarning { usage_percentage })
        } else {
            None
        })
    }
}

/// Whole days from `now` until midnight UTC of `end_date`, rounded up.
///
/// Negative once the end date has passed; zero during the final partial day.
pub fn days_remaining(end_date: NaiveDate, now: DateTime<Utc>) -> i64 {
    let end = end_date.and_time(NaiveTime::MIN).and_utc();
    let millis = (end - now).num_milliseconds();
    let days = millis.div_euclid(MILLIS_PER_DAY);
    if millis.rem_euclid(MILLIS_PER_DAY) > 0 {
        days + 1
    } else {
        days
    }
}

/// Unclamped percentage of authorized units used.
///
/// `None` when the authorization has no authorized units. Zero or negative
/// authorized units divide by one instead.
pub fn usage_percentage(authorization: &Authorization) -> Option<f64> {
    let authorized = authorization.authorized_units?;
    let used = authorization.used_units.unwrap_or(0.0);
    let divisor = if authorized > 0.0 { authorized } else { 1.0 };
    Some(used / divisor * 100.0)
}
