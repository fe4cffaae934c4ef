//! Alert handlers.

use axum::Json;
use axum::extract::{Query, State};
use validator::Validate;

use authwatch_core::error::AppError;
use authwatch_entity::alert::AcknowledgedAlertRecord;
use authwatch_service::AlertFeed;

use crate::dto::request::{AcknowledgeAlertRequest, ListAlertsParams};
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::TenantContext;
use crate::state::AppState;

/// GET /api/alerts
pub async fn list_alerts(
    State(state): State<AppState>,
    tenant: TenantContext,
    Query(params): Query<ListAlertsParams>,
) -> Result<Json<ApiResponse<AlertFeed>>, ApiError> {
    let feed = state
        .alert_service
        .list_alerts(&tenant, params.into())
        .await?;
    Ok(Json(ApiResponse::ok(feed)))
}

/// POST /api/alerts
pub async fn acknowledge_alert(
    State(state): State<AppState>,
    tenant: TenantContext,
    Json(req): Json<AcknowledgeAlertRequest>,
) -> Result<Json<ApiResponse<AcknowledgedAlertRecord>>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(format!("Invalid request: {e}")))?;

    let record = state
        .alert_service
        .acknowledge(&tenant, &req.alert_id)
        .await?;
    Ok(Json(ApiResponse::ok(record)))
}
