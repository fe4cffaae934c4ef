//! Authorization status enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of a payer authorization.
///
/// Only [`AuthorizationStatus::Active`] authorizations are eligible for
/// real-time alert generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "authorization_status", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum AuthorizationStatus {
    /// Requested but not yet granted by the payer.
    Pending,
    /// Granted and currently usable.
    Active,
    /// All units consumed.
    Exhausted,
    /// Validity window has ended.
    Expired,
    /// Ended early by the payer.
    Terminated,
    /// Withdrawn before use.
    Cancelled,
}

impl AuthorizationStatus {
    /// Return the status as an uppercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Active => "ACTIVE",
            Self::Exhausted => "EXHAUSTED",
            Self::Expired => "EXPIRED",
            Self::Terminated => "TERMINATED",
            Self::Cancelled => "CANCELLED",
        }
    }

    /// Whether alerts are computed for authorizations in this status.
    pub fn is_alertable(&self) -> bool {
        matches!(self, Self::Active)
    }
}

impl fmt::Display for AuthorizationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AuthorizationStatus {
    type Err = authwatch_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "PENDING" => Ok(Self::Pending),
            "ACTIVE" => Ok(Self::Active),
            "EXHAUSTED" => Ok(Self::Exhausted),
            "EXPIRED" => Ok(Self::Expired),
            "TERMINATED" => Ok(Self::Terminated),
            "CANCELLED" => Ok(Self::Cancelled),
            _ => Err(authwatch_core::AppError::validation(format!(
                "Invalid authorization status: '{s}'"
            ))),
        }
    }
}
