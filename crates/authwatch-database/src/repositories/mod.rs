//! PostgreSQL implementations of the store traits.

pub mod alert_record;
pub mod authorization;

pub use alert_record::AlertRecordRepository;
pub use authorization::AuthorizationRepository;
