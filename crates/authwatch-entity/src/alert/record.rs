//! Persisted alert record model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use authwatch_core::types::{AlertRecordId, AuthorizationId, TenantId, UserId};

use super::kind::{AlertSeverity, AlertType};
use super::model::Alert;

/// `action_taken` value written when a user acknowledges an alert.
pub const ACTION_ACKNOWLEDGED: &str = "ACKNOWLEDGED";

/// A durable copy of an alert, created when a user acknowledges a real-time
/// alert or when a scheduled scan records a newly firing one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct AcknowledgedAlertRecord {
    /// Record ID.
    pub id: AlertRecordId,
    /// Owning tenant.
    pub tenant_id: TenantId,
    /// Authorization the alert was raised for.
    pub authorization_id: AuthorizationId,
    /// Alert type. Sent as `type`, matching [`Alert`].
    #[serde(rename = "type")]
    pub alert_type: AlertType,
    /// Severity at the time the record was written.
    pub severity: AlertSeverity,
    /// Message at the time the record was written.
    pub message: String,
    /// Whether a user has read (acknowledged) the alert.
    pub is_read: bool,
    /// When it was read.
    pub read_at: Option<DateTime<Utc>>,
    /// Action recorded against the alert.
    pub action_taken: Option<String>,
    /// When the action was taken.
    pub action_taken_at: Option<DateTime<Utc>>,
    /// Who took the action.
    pub action_taken_by_id: Option<UserId>,
    /// When the record was written.
    pub created_at: DateTime<Utc>,
}

impl AcknowledgedAlertRecord {
    /// A record of `alert` acknowledged by `user_id` at `now`.
    pub fn acknowledged(
        tenant_id: TenantId,
        alert: &Alert,
        user_id: UserId,
        now: DateTime<Utc>,
    ) -> Self {
        let mut record = Self::unread(tenant_id, alert, now);
        record.acknowledge(user_id, now);
        record
    }

    /// An unread record of `alert`, written by a scheduled scan.
    pub fn unread(tenant_id: TenantId, alert: &Alert, now: DateTime<Utc>) -> Self {
        Self {
            id: AlertRecordId::new(),
            tenant_id,
            authorization_id: alert.authorization.id,
            alert_type: alert.alert_type,
            severity: alert.severity,
            message: alert.message.clone(),
            is_read: false,
            read_at: None,
            action_taken: None,
            action_taken_at: None,
            action_taken_by_id: None,
            created_at: now,
        }
    }

    /// Mark the record read and acknowledged by `user_id`.
    pub fn acknowledge(&mut self, user_id: UserId, now: DateTime<Utc>) {
        self.is_read = true;
        self.read_at = Some(now);
        self.action_taken = Some(ACTION_ACKNOWLEDGED.to_string());
        self.action_taken_at = Some(now);
        self.action_taken_by_id = Some(user_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alert::AlertCondition;
    use crate::authorization::{Authorization, AuthorizationStatus};
    use authwatch_core::types::ClientId;
    use chrono::TimeZone;

    fn alert() -> Alert {
        let now = Utc.with_ymd_and_hms(2026, 2, 1, 12, 0, 0).unwrap();
        let authorization = Authorization {
            id: AuthorizationId::new(),
            tenant_id: TenantId::new(),
            client_id: ClientId::new(),
            client_name: "Clara Barton".to_string(),
            client_identifier: None,
            authorization_number: None,
            service_type: None,
            authorized_units: Some(10.0),
            used_units: Some(10.0),
            start_date: None,
            end_date: None,
            status: AuthorizationStatus::Active,
            created_at: now,
            updated_at: now,
        };
        Alert::new(
            AlertCondition::UnitsExhausted {
                usage_percentage: 100.0,
            },
            &authorization,
            now,
        )
    }

    #[test]
    fn test_acknowledged_sets_action_fields() {
        let alert = alert();
        let user = UserId::new();
        let record =
            AcknowledgedAlertRecord::acknowledged(TenantId::new(), &alert, user, alert.created_at);

        assert!(record.is_read);
        assert_eq!(record.read_at, Some(alert.created_at));
        assert_eq!(record.action_taken.as_deref(), Some(ACTION_ACKNOWLEDGED));
        assert_eq!(record.action_taken_by_id, Some(user));
        assert_eq!(record.authorization_id, alert.authorization.id);
    }

    #[test]
    fn test_record_and_alert_share_type_field_name() {
        let alert = alert();
        let record = AcknowledgedAlertRecord::unread(TenantId::new(), &alert, alert.created_at);

        let alert_json = serde_json::to_value(&alert).unwrap();
        let record_json = serde_json::to_value(&record).unwrap();
        assert_eq!(alert_json["type"], "UNITS_EXHAUSTED");
        assert_eq!(record_json["type"], "UNITS_EXHAUSTED");
        assert!(record_json.get("alert_type").is_none());
    }
}
