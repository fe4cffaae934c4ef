//! Authorization entity model.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use authwatch_core::types::{AuthorizationId, ClientId, TenantId};

use super::status::AuthorizationStatus;

/// A payer-granted allowance of service units for a client over a date range.
///
/// Created and updated by billing workflows; read-only to AuthWatch.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Authorization {
    /// Unique authorization identifier.
    pub id: AuthorizationId,
    /// Owning tenant.
    pub tenant_id: TenantId,
    /// Client receiving the authorized services.
    pub client_id: ClientId,
    /// Client display name.
    pub client_name: String,
    /// Client identifier shown to staff (e.g. medical record number).
    pub client_identifier: Option<String>,
    /// Payer-issued authorization number.
    pub authorization_number: Option<String>,
    /// Service or discipline the units apply to.
    pub service_type: Option<String>,
    /// Total units granted.
    pub authorized_units: Option<f64>,
    /// Units consumed so far.
    pub used_units: Option<f64>,
    /// First day of the validity window.
    pub start_date: Option<NaiveDate>,
    /// Last day of the validity window.
    pub end_date: Option<NaiveDate>,
    /// Lifecycle status.
    pub status: AuthorizationStatus,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Authorization {
    /// Whether this authorization is eligible for real-time alerts.
    pub fn is_active(&self) -> bool {
        self.status.is_alertable()
    }

    /// The instant the validity window ends: midnight UTC of `end_date`.
    pub fn ends_at(&self) -> Option<DateTime<Utc>> {
        self.end_date
            .map(|date| date.and_time(NaiveTime::MIN).and_utc())
    }

    /// Read-only snapshot carried into alerts for display.
    pub fn reference(&self) -> AuthorizationRef {
        AuthorizationRef {
            id: self.id,
            client_id: self.client_id,
            client_name: self.client_name.clone(),
            client_identifier: self.client_identifier.clone(),
            authorization_number: self.authorization_number.clone(),
            service_type: self.service_type.clone(),
            authorized_units: self.authorized_units,
            used_units: self.used_units,
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }
}

/// Display snapshot of the authorization an alert was derived from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorizationRef {
    /// Authorization ID.
    pub id: AuthorizationId,
    /// Client ID.
    pub client_id: ClientId,
    /// Client display name.
    pub client_name: String,
    /// Client identifier.
    pub client_identifier: Option<String>,
    /// Authorization number.
    pub authorization_number: Option<String>,
    /// Service type.
    pub service_type: Option<String>,
    /// Units granted.
    pub authorized_units: Option<f64>,
    /// Units used.
    pub used_units: Option<f64>,
    /// Start date.
    pub start_date: Option<NaiveDate>,
    /// End date.
    pub end_date: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn authorization(end_date: Option<NaiveDate>) -> Authorization {
        let now = Utc::now();
        Authorization {
            id: AuthorizationId::new(),
            tenant_id: TenantId::new(),
            client_id: ClientId::new(),
            client_name: "Ada Lovelace".to_string(),
            client_identifier: Some("MRN-1815".to_string()),
            authorization_number: None,
            service_type: Some("Skilled Nursing".to_string()),
            authorized_units: Some(40.0),
            used_units: Some(12.0),
            start_date: NaiveDate::from_ymd_opt(2026, 1, 1),
            end_date,
            status: AuthorizationStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_ends_at_is_midnight_utc() {
        let auth = authorization(NaiveDate::from_ymd_opt(2026, 3, 31));
        assert_eq!(
            auth.ends_at(),
            Some(Utc.with_ymd_and_hms(2026, 3, 31, 0, 0, 0).unwrap())
        );
        assert_eq!(authorization(None).ends_at(), None);
    }

    #[test]
    fn test_reference_copies_display_fields() {
        let auth = authorization(None);
        let reference = auth.reference();
        assert_eq!(reference.id, auth.id);
        assert_eq!(reference.client_name, "Ada Lovelace");
        assert_eq!(reference.used_units, Some(12.0));
    }
}
