//! Authorization repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use authwatch_core::error::{AppError, ErrorKind};
use authwatch_core::result::AppResult;
use authwatch_core::types::{AuthorizationId, TenantId};
use authwatch_entity::authorization::{Authorization, AuthorizationStatus};

use crate::store::AuthorizationStore;

/// Read-only repository over the `authorizations` table.
#[derive(Debug, Clone)]
pub struct AuthorizationRepository {
    pool: PgPool,
}

impl AuthorizationRepository {
    /// Create a new authorization repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuthorizationStore for AuthorizationRepository {
    async fn list_active(&self, tenant_id: TenantId) -> AppResult<Vec<Authorization>> {
        sqlx::query_as::<_, Authorization>(
            "SELECT * FROM authorizations WHERE tenant_id = $1 AND status = $2 \
             ORDER BY end_date ASC NULLS LAST, id",
        )
        .bind(tenant_id)
        .bind(AuthorizationStatus::Active)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list active authorizations", e)
        })
    }

    async fn get_by_id(
        &self,
        tenant_id: TenantId,
        id: AuthorizationId,
    ) -> AppResult<Option<Authorization>> {
        sqlx::query_as::<_, Authorization>(
            "SELECT * FROM authorizations WHERE id = $1 AND tenant_id = $2",
        )
        .bind(id)
        .bind(tenant_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find authorization", e))
    }

    async fn list_tenants_with_active(&self) -> AppResult<Vec<TenantId>> {
        sqlx::query_scalar::<_, TenantId>(
            "SELECT DISTINCT tenant_id FROM authorizations WHERE status = $1 ORDER BY tenant_id",
        )
        .bind(AuthorizationStatus::Active)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list tenants", e))
    }

    async fn health_check(&self) -> AppResult<()> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| ())
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Health check failed", e))
    }
}
