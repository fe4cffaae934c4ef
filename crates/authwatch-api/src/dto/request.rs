//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use authwatch_service::AlertQuery;

/// Query string of `GET /api/alerts`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ListAlertsParams {
    /// `false` (default) lists unread saved records, `true` acknowledged ones.
    #[serde(default)]
    pub acknowledged: bool,
}

impl From<ListAlertsParams> for AlertQuery {
    fn from(params: ListAlertsParams) -> Self {
        Self {
            acknowledged: params.acknowledged,
        }
    }
}

/// Body of `POST /api/alerts`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct AcknowledgeAlertRequest {
    /// Real-time alert id (`"{label}-{authorization_id}"`) or saved record id.
    #[serde(default, alias = "alertId")]
    #[validate(length(min = 1, message = "alertId is required"))]
    pub alert_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_camel_case_alert_id() {
        let req: AcknowledgeAlertRequest =
            serde_json::from_str(r#"{"alertId":"expired-123"}"#).unwrap();
        assert_eq!(req.alert_id, "expired-123");
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_missing_alert_id_fails_validation() {
        let req: AcknowledgeAlertRequest = serde_json::from_str("{}").unwrap();
        assert!(req.validate().is_err());
    }
}
