//! Route definitions for the AuthWatch HTTP API.
//!
//! All routes are mounted under `/api` and receive `AppState` through
//! Axum's `State` extractor.

use axum::{
    Router, middleware as axum_middleware,
    routing::get,
};

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the API router without transport layers.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(alert_routes())
        .merge(authorization_routes())
        .merge(health_routes());

    Router::new()
        .nest("/api", api_routes)
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Real-time alerts and acknowledgement
fn alert_routes() -> Router<AppState> {
    Router::new().route(
        "/alerts",
        get(handlers::alerts::list_alerts).post(handlers::alerts::acknowledge_alert),
    )
}

/// Single-authorization detail
fn authorization_routes() -> Router<AppState> {
    Router::new().route(
        "/authorizations/{id}/usage",
        get(handlers::authorization::authorization_usage),
    )
}

/// Liveness and store health
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use authwatch_core::config::AppConfig;
    use authwatch_database::{MemoryAlertRecordStore, MemoryAuthorizationStore};
    use authwatch_service::AlertService;

    fn router() -> Router {
        let config = AppConfig::default();
        let service = AlertService::new(
            Arc::new(MemoryAuthorizationStore::new()),
            Arc::new(MemoryAlertRecordStore::new()),
            &config.alerts,
        );
        build_router(AppState::new(config, Arc::new(service)))
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let response = router()
            .oneshot(Request::get("/api/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_health_does_not_require_tenant() {
        let response = router()
            .oneshot(Request::get("/api/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_alerts_require_tenant() {
        let response = router()
            .oneshot(Request::get("/api/alerts").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
