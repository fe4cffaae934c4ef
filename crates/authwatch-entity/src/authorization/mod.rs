//! Payer authorization entities.

pub mod model;
pub mod status;

pub use model::{Authorization, AuthorizationRef};
pub use status::AuthorizationStatus;
