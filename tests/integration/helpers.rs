//! Shared test helpers for integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode};
use chrono::{Duration, Utc};
use serde_json::Value;
use tower::ServiceExt;

use authwatch_api::{AppState, build_app};
use authwatch_core::config::{AppConfig, StoreBackend};
use authwatch_core::types::{AuthorizationId, ClientId, TenantId, UserId};
use authwatch_database::{MemoryAlertRecordStore, MemoryAuthorizationStore};
use authwatch_entity::authorization::{Authorization, AuthorizationStatus};
use authwatch_service::AlertService;

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Authorizations visible to the service
    pub authorizations: Arc<MemoryAuthorizationStore>,
    /// Persisted alert records
    pub records: Arc<MemoryAlertRecordStore>,
    /// Tenant used by default requests
    pub tenant_id: TenantId,
    /// Acting user used by default requests
    pub user_id: UserId,
}

impl TestApp {
    /// Create a new test application on empty in-memory stores
    pub fn new() -> Self {
        let mut config = AppConfig::default();
        config.database.backend = StoreBackend::Memory;
        config.worker.enabled = false;

        let authorizations = Arc::new(MemoryAuthorizationStore::new());
        let records = Arc::new(MemoryAlertRecordStore::new());
        let service = Arc::new(AlertService::new(
            authorizations.clone(),
            records.clone(),
            &config.alerts,
        ));

        Self {
            router: build_app(AppState::new(config, service)),
            authorizations,
            records,
            tenant_id: TenantId::new(),
            user_id: UserId::new(),
        }
    }

    /// Seed an active authorization for the default tenant ending
    /// `end_in_days` from today.
    pub fn seed(&self, used: f64, authorized: f64, end_in_days: i64) -> AuthorizationId {
        self.seed_for(self.tenant_id, used, authorized, end_in_days)
    }

    /// Seed an active authorization for `tenant_id`.
    pub fn seed_for(
        &self,
        tenant_id: TenantId,
        used: f64,
        authorized: f64,
        end_in_days: i64,
    ) -> AuthorizationId {
        let now = Utc::now();
        let authorization = Authorization {
            id: AuthorizationId::new(),
            tenant_id,
            client_id: ClientId::new(),
            client_name: "Mary Breckinridge".to_string(),
            client_identifier: Some("MRN-1925".to_string()),
            authorization_number: Some("PA-00042".to_string()),
            service_type: Some("Home Health Aide".to_string()),
            authorized_units: Some(authorized),
            used_units: Some(used),
            start_date: Some(now.date_naive() - Duration::days(60)),
            end_date: Some(now.date_naive() + Duration::days(end_in_days)),
            status: AuthorizationStatus::Active,
            created_at: now,
            updated_at: now,
        };
        let id = authorization.id;
        self.authorizations.put(authorization);
        id
    }

    /// GET as the default tenant
    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(Method::GET)
            .uri(uri)
            .header("x-tenant-id", self.tenant_id.to_string())
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    /// GET as another tenant
    pub async fn get_as(&self, tenant_id: TenantId, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(Method::GET)
            .uri(uri)
            .header("x-tenant-id", tenant_id.to_string())
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    /// POST an acknowledgement as the default tenant and user
    pub async fn acknowledge(&self, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/alerts")
            .header("content-type", "application/json")
            .header("x-tenant-id", self.tenant_id.to_string())
            .header("x-user-id", self.user_id.to_string())
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    /// Send a raw request
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, body)
    }
}
