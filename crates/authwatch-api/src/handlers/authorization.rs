//! Authorization detail handlers.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use authwatch_core::types::AuthorizationId;
use authwatch_service::AuthorizationUsage;

use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::TenantContext;
use crate::state::AppState;

/// GET /api/authorizations/{id}/usage
pub async fn authorization_usage(
    State(state): State<AppState>,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<AuthorizationUsage>>, ApiError> {
    let usage = state
        .alert_service
        .authorization_usage(&tenant, AuthorizationId::from_uuid(id))
        .await?;
    Ok(Json(ApiResponse::ok(usage)))
}
