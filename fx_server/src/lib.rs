//! # fx_server
//!
//! HTTP surface for the exchange-rate lookup service: an axum router over
//! the shared rate table, admission-controlled by a process-wide token
//! bucket.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod tracing_setup;
