//! Alert entities: classification enums, conditions, keys, and records.

pub mod condition;
pub mod key;
pub mod kind;
pub mod model;
pub mod record;

pub use condition::AlertCondition;
pub use key::{AlertKey, AlertKind, InvalidAlertKey};
pub use kind::{AlertSeverity, AlertType};
pub use model::Alert;
pub use record::{AcknowledgedAlertRecord, ACTION_ACKNOWLEDGED};
