//! # authwatch-database
//!
//! Storage collaborators for the alert engine: the store traits the
//! service layer depends on, their PostgreSQL implementations, and
//! in-memory implementations for development and tests.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use memory::{MemoryAlertRecordStore, MemoryAuthorizationStore};
pub use repositories::{AlertRecordRepository, AuthorizationRepository};
pub use store::{AlertRecordStore, AuthorizationStore};
