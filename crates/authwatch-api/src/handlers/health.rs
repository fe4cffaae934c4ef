//! Health check handler.

use axum::Json;
use axum::extract::State;
use chrono::Utc;

use authwatch_core::config::StoreBackend;

use crate::dto::response::{ApiResponse, HealthResponse};
use crate::state::AppState;

/// GET /api/health
pub async fn health(State(state): State<AppState>) -> Json<ApiResponse<HealthResponse>> {
    let now = Utc::now();
    let (status, database) = match state.alert_service.health_check().await {
        Ok(()) => ("ok", "connected"),
        Err(e) => {
            tracing::warn!(error = %e, "Store health check failed");
            ("degraded", "unavailable")
        }
    };
    let store = match state.config.database.backend {
        StoreBackend::Postgres => "postgres",
        StoreBackend::Memory => "memory",
    };

    Json(ApiResponse::ok(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        store: store.to_string(),
        database: database.to_string(),
        uptime_seconds: (now - state.started_at).num_seconds(),
        server_time: now,
    }))
}
