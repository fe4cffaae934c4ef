//! Store traits the alert service depends on.
//!
//! Both traits are object safe so the service can hold them as
//! `Arc<dyn ...>` and swap PostgreSQL for the in-memory stores.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use authwatch_core::result::AppResult;
use authwatch_core::types::{AlertRecordId, AuthorizationId, TenantId, UserId};
use authwatch_entity::alert::{AcknowledgedAlertRecord, AlertType};
use authwatch_entity::authorization::Authorization;

/// Read access to authorizations. Writes belong to billing workflows.
#[async_trait]
pub trait AuthorizationStore: Send + Sync + std::fmt::Debug + 'static {
    /// All `ACTIVE` authorizations for a tenant, ordered by end date
    /// (earliest first, open-ended last).
    async fn list_active(&self, tenant_id: TenantId) -> AppResult<Vec<Authorization>>;

    /// A single authorization scoped to the tenant, in any status.
    async fn get_by_id(
        &self,
        tenant_id: TenantId,
        id: AuthorizationId,
    ) -> AppResult<Option<Authorization>>;

    /// Tenants that own at least one `ACTIVE` authorization.
    async fn list_tenants_with_active(&self) -> AppResult<Vec<TenantId>>;

    /// Verify the store is reachable.
    async fn health_check(&self) -> AppResult<()>;
}

/// Persistence for alert records.
#[async_trait]
pub trait AlertRecordStore: Send + Sync + std::fmt::Debug + 'static {
    /// Insert a new record.
    async fn insert(&self, record: AcknowledgedAlertRecord) -> AppResult<AcknowledgedAlertRecord>;

    /// Insert `record`, or overwrite the acknowledgement fields of the
    /// existing record for the same tenant, authorization, and alert type.
    async fn upsert_acknowledgement(
        &self,
        record: AcknowledgedAlertRecord,
    ) -> AppResult<AcknowledgedAlertRecord>;

    /// Find a record by ID within a tenant.
    async fn find_by_id(
        &self,
        tenant_id: TenantId,
        id: AlertRecordId,
    ) -> AppResult<Option<AcknowledgedAlertRecord>>;

    /// Whether an unread record exists for the authorization and alert type.
    async fn has_unread(
        &self,
        tenant_id: TenantId,
        authorization_id: AuthorizationId,
        alert_type: AlertType,
    ) -> AppResult<bool>;

    /// Records filtered by read state, newest first, at most `limit`.
    async fn list(
        &self,
        tenant_id: TenantId,
        acknowledged: bool,
        limit: u32,
    ) -> AppResult<Vec<AcknowledgedAlertRecord>>;

    /// Mark an existing record acknowledged. Returns `None` when no record
    /// with that ID exists in the tenant.
    async fn mark_acknowledged(
        &self,
        tenant_id: TenantId,
        id: AlertRecordId,
        user_id: UserId,
        now: DateTime<Utc>,
    ) -> AppResult<Option<AcknowledgedAlertRecord>>;
}
