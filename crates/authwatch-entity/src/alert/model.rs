//! Real-time alert model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::authorization::{Authorization, AuthorizationRef};

use super::condition::AlertCondition;
use super::key::AlertKey;
use super::kind::{AlertSeverity, AlertType};

/// A classified alert computed from an authorization snapshot.
///
/// Not persisted; recomputed on every evaluation with a stable `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    /// Deterministic id: `"{label}-{authorization_id}"`.
    pub id: AlertKey,
    /// Alert type.
    #[serde(rename = "type")]
    pub alert_type: AlertType,
    /// Severity tier.
    pub severity: AlertSeverity,
    /// Human-readable message.
    pub message: String,
    /// The classified condition the alert was derived from.
    pub condition: AlertCondition,
    /// Source authorization snapshot.
    pub authorization: AuthorizationRef,
    /// When the alert was computed.
    pub created_at: DateTime<Utc>,
}

impl Alert {
    /// Build the alert for `condition` on `authorization`, computed at `now`.
    pub fn new(condition: AlertCondition, authorization: &Authorization, now: DateTime<Utc>) -> Self {
        Self {
            id: AlertKey::realtime(condition.kind(), authorization.id),
            alert_type: condition.alert_type(),
            severity: condition.severity(),
            message: condition.message(),
            condition,
            authorization: authorization.reference(),
            created_at: now,
        }
    }
}
