//! # authwatch-entity
//!
//! Domain entity models for AuthWatch. Database rows derive
//! `sqlx::FromRow`; derived values (alerts, conditions, keys) are plain
//! serde types.

pub mod alert;
pub mod authorization;
