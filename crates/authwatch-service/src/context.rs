//! Request context carrying the tenant, the acting user, and the evaluation time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use authwatch_core::error::AppError;
use authwatch_core::types::{TenantId, UserId};

/// Context for the current request.
///
/// Built from trusted gateway headers (HTTP) or command arguments (CLI) and
/// passed into every service method. `request_time` is the `now` every
/// computation for the request is evaluated against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The tenant all reads and writes are scoped to.
    pub tenant_id: TenantId,
    /// The acting user, when one was supplied.
    pub user_id: Option<UserId>,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a context for `tenant_id` evaluated at the current time.
    pub fn new(tenant_id: TenantId, user_id: Option<UserId>) -> Self {
        Self {
            tenant_id,
            user_id,
            request_time: Utc::now(),
        }
    }

    /// Replaces the evaluation time.
    pub fn at(mut self, request_time: DateTime<Utc>) -> Self {
        self.request_time = request_time;
        self
    }

    /// Returns the acting user, or an authentication error when absent.
    pub fn require_user(&self) -> Result<UserId, AppError> {
        self.user_id
            .ok_or_else(|| AppError::authentication("An acting user is required"))
    }
}
