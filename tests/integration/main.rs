//! HTTP-level integration tests over in-memory stores.

mod alerts_test;
mod helpers;
