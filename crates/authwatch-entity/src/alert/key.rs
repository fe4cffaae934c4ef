//! Structured alert identity.
//!
//! Real-time alerts are recomputed on every request, so their identity is a
//! pure function of `(tier label, authorization id)`. The textual form is
//! `"{label}-{authorization_id}"`; parsing matches the closed set of labels
//! as a prefix so hyphens inside the authorization id never split wrongly.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

use authwatch_core::types::{AlertRecordId, AuthorizationId};

use super::kind::AlertType;

/// Id label of an alert tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlertKind {
    /// `expired`
    Expired,
    /// `expiring_critical`
    ExpiringCritical,
    /// `expiring_soon` (both the high and warning expiry tiers)
    ExpiringSoon,
    /// `exhausted`
    Exhausted,
    /// `usage-90` (high usage tier)
    Usage90,
    /// `usage-80` (warning usage tier)
    Usage80,
}

impl AlertKind {
    /// All labels, in no particular order.
    pub const ALL: [AlertKind; 6] = [
        Self::Expired,
        Self::ExpiringCritical,
        Self::ExpiringSoon,
        Self::Exhausted,
        Self::Usage90,
        Self::Usage80,
    ];

    /// The textual label used in alert ids.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Expired => "expired",
            Self::ExpiringCritical => "expiring_critical",
            Self::ExpiringSoon => "expiring_soon",
            Self::Exhausted => "exhausted",
            Self::Usage90 => "usage-90",
            Self::Usage80 => "usage-80",
        }
    }

    /// The alert type this label reports.
    pub fn alert_type(&self) -> AlertType {
        match self {
            Self::Expired => AlertType::Expired,
            Self::ExpiringCritical => AlertType::ExpiringCritical,
            Self::ExpiringSoon => AlertType::ExpiringSoon,
            Self::Exhausted => AlertType::UnitsExhausted,
            Self::Usage90 | Self::Usage80 => AlertType::UnitsLow,
        }
    }
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Identity of an alert a caller can act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlertKey {
    /// A real-time alert recomputed from an authorization.
    Realtime {
        /// Tier label.
        kind: AlertKind,
        /// Source authorization.
        authorization_id: AuthorizationId,
    },
    /// A persisted alert record.
    Saved {
        /// Record ID.
        record_id: AlertRecordId,
    },
}

impl AlertKey {
    /// Build a real-time key.
    pub fn realtime(kind: AlertKind, authorization_id: AuthorizationId) -> Self {
        Self::Realtime {
            kind,
            authorization_id,
        }
    }
}

impl fmt::Display for AlertKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Realtime {
                kind,
                authorization_id,
            } => write!(f, "{}-{}", kind.label(), authorization_id),
            Self::Saved { record_id } => write!(f, "{record_id}"),
        }
    }
}

/// The string is not a recognised alert id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unrecognised alert id: '{0}'")]
pub struct InvalidAlertKey(pub String);

impl FromStr for AlertKey {
    type Err = InvalidAlertKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        for kind in AlertKind::ALL {
            let Some(rest) = s
                .strip_prefix(kind.label())
                .and_then(|rest| rest.strip_prefix('-'))
            else {
                continue;
            };
            if let Ok(uuid) = Uuid::parse_str(rest) {
                return Ok(Self::realtime(kind, AuthorizationId::from_uuid(uuid)));
            }
        }

        Uuid::parse_str(s)
            .map(|uuid| Self::Saved {
                record_id: AlertRecordId::from_uuid(uuid),
            })
            .map_err(|_| InvalidAlertKey(s.to_string()))
    }
}

impl Serialize for AlertKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for AlertKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_realtime_key_format() {
        let uuid = Uuid::parse_str("0b6f3c1e-9a43-4f0e-8d7a-2f1c5e9b7a10").unwrap();
        let key = AlertKey::realtime(AlertKind::Usage90, AuthorizationId::from_uuid(uuid));
        assert_eq!(
            key.to_string(),
            "usage-90-0b6f3c1e-9a43-4f0e-8d7a-2f1c5e9b7a10"
        );
    }

    #[test]
    fn test_hyphenated_labels_and_ids_parse_unambiguously() {
        let id = AuthorizationId::new();
        for kind in AlertKind::ALL {
            let text = format!("{}-{}", kind.label(), id);
            assert_eq!(
                text.parse::<AlertKey>().unwrap(),
                AlertKey::realtime(kind, id),
                "{text}"
            );
        }
    }

    #[test]
    fn test_bare_uuid_is_saved_record() {
        let record_id = AlertRecordId::new();
        let key: AlertKey = record_id.to_string().parse().unwrap();
        assert_eq!(key, AlertKey::Saved { record_id });
    }

    #[test]
    fn test_rejects_unknown_shapes() {
        assert!("".parse::<AlertKey>().is_err());
        assert!("usage-90".parse::<AlertKey>().is_err());
        assert!("usage-70-0b6f3c1e-9a43-4f0e-8d7a-2f1c5e9b7a10"
            .parse::<AlertKey>()
            .is_err());
        assert!("expired-12345".parse::<AlertKey>().is_err());
    }
}
