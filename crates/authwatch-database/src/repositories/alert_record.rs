//! Alert record repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use authwatch_core::error::{AppError, ErrorKind};
use authwatch_core::result::AppResult;
use authwatch_core::types::{AlertRecordId, AuthorizationId, TenantId, UserId};
use authwatch_entity::alert::{ACTION_ACKNOWLEDGED, AcknowledgedAlertRecord, AlertType};

use crate::store::AlertRecordStore;

/// Repository over the `alert_records` table.
#[derive(Debug, Clone)]
pub struct AlertRecordRepository {
    pool: PgPool,
}

impl AlertRecordRepository {
    /// Create a new alert record repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn db_error(message: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| AppError::with_source(ErrorKind::Database, message, e)
}

#[async_trait]
impl AlertRecordStore for AlertRecordRepository {
    async fn insert(&self, record: AcknowledgedAlertRecord) -> AppResult<AcknowledgedAlertRecord> {
        sqlx::query_as::<_, AcknowledgedAlertRecord>(
            "INSERT INTO alert_records (id, tenant_id, authorization_id, alert_type, severity, message, \
             is_read, read_at, action_taken, action_taken_at, action_taken_by_id, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) RETURNING *",
        )
        .bind(record.id)
        .bind(record.tenant_id)
        .bind(record.authorization_id)
        .bind(record.alert_type)
        .bind(record.severity)
        .bind(&record.message)
        .bind(record.is_read)
        .bind(record.read_at)
        .bind(&record.action_taken)
        .bind(record.action_taken_at)
        .bind(record.action_taken_by_id)
        .bind(record.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("Failed to create alert record"))
    }

    async fn upsert_acknowledgement(
        &self,
        record: AcknowledgedAlertRecord,
    ) -> AppResult<AcknowledgedAlertRecord> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;

        // Serialize upserts for the key even when no row exists yet. The lock
        // is released when the transaction ends.
        sqlx::query(
            "SELECT pg_advisory_xact_lock(hashtextextended(\
             $1::text || ':' || $2::text || ':' || $3, 0))",
        )
        .bind(record.tenant_id)
        .bind(record.authorization_id)
        .bind(record.alert_type.as_str())
        .execute(&mut *tx)
        .await
        .map_err(db_error("Failed to lock alert record key"))?;

        let existing: Option<AlertRecordId> = sqlx::query_scalar(
            "SELECT id FROM alert_records \
             WHERE tenant_id = $1 AND authorization_id = $2 AND alert_type = $3 \
             ORDER BY created_at DESC LIMIT 1 FOR UPDATE",
        )
        .bind(record.tenant_id)
        .bind(record.authorization_id)
        .bind(record.alert_type)
        .fetch_optional(&mut *tx)
        .await
        .map_err(db_error("Failed to look up alert record"))?;

        let saved = match existing {
            Some(id) => sqlx::query_as::<_, AcknowledgedAlertRecord>(
                "UPDATE alert_records SET severity = $2, message = $3, is_read = $4, read_at = $5, \
                 action_taken = $6, action_taken_at = $7, action_taken_by_id = $8 \
                 WHERE id = $1 RETURNING *",
            )
            .bind(id)
            .bind(record.severity)
            .bind(&record.message)
            .bind(record.is_read)
            .bind(record.read_at)
            .bind(&record.action_taken)
            .bind(record.action_taken_at)
            .bind(record.action_taken_by_id)
            .fetch_one(&mut *tx)
            .await
            .map_err(db_error("Failed to update alert record"))?,
            None => sqlx::query_as::<_, AcknowledgedAlertRecord>(
                "INSERT INTO alert_records (id, tenant_id, authorization_id, alert_type, severity, message, \
                 is_read, read_at, action_taken, action_taken_at, action_taken_by_id, created_at) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) RETURNING *",
            )
            .bind(record.id)
            .bind(record.tenant_id)
            .bind(record.authorization_id)
            .bind(record.alert_type)
            .bind(record.severity)
            .bind(&record.message)
            .bind(record.is_read)
            .bind(record.read_at)
            .bind(&record.action_taken)
            .bind(record.action_taken_at)
            .bind(record.action_taken_by_id)
            .bind(record.created_at)
            .fetch_one(&mut *tx)
            .await
            .map_err(db_error("Failed to create alert record"))?,
        };

        tx.commit()
            .await
            .map_err(db_error("Failed to commit alert record"))?;
        Ok(saved)
    }

    async fn find_by_id(
        &self,
        tenant_id: TenantId,
        id: AlertRecordId,
    ) -> AppResult<Option<AcknowledgedAlertRecord>> {
        sqlx::query_as::<_, AcknowledgedAlertRecord>(
            "SELECT * FROM alert_records WHERE id = $1 AND tenant_id = $2",
        )
        .bind(id)
        .bind(tenant_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to find alert record"))
    }

    async fn has_unread(
        &self,
        tenant_id: TenantId,
        authorization_id: AuthorizationId,
        alert_type: AlertType,
    ) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM alert_records \
             WHERE tenant_id = $1 AND authorization_id = $2 AND alert_type = $3 AND is_read = FALSE)",
        )
        .bind(tenant_id)
        .bind(authorization_id)
        .bind(alert_type)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("Failed to check unread alert records"))
    }

    async fn list(
        &self,
        tenant_id: TenantId,
        acknowledged: bool,
        limit: u32,
    ) -> AppResult<Vec<AcknowledgedAlertRecord>> {
        sqlx::query_as::<_, AcknowledgedAlertRecord>(
            "SELECT * FROM alert_records WHERE tenant_id = $1 AND is_read = $2 \
             ORDER BY created_at DESC LIMIT $3",
        )
        .bind(tenant_id)
        .bind(acknowledged)
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list alert records"))
    }

    async fn mark_acknowledged(
        &self,
        tenant_id: TenantId,
        id: AlertRecordId,
        user_id: UserId,
        now: DateTime<Utc>,
    ) -> AppResult<Option<AcknowledgedAlertRecord>> {
        sqlx::query_as::<_, AcknowledgedAlertRecord>(
            "UPDATE alert_records SET is_read = TRUE, read_at = $3, action_taken = $4, \
             action_taken_at = $3, action_taken_by_id = $5 \
             WHERE id = $1 AND tenant_id = $2 RETURNING *",
        )
        .bind(id)
        .bind(tenant_id)
        .bind(now)
        .bind(ACTION_ACKNOWLEDGED)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to acknowledge alert record"))
    }
}
