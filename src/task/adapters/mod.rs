//! Adapter implementations of the task ports.
//!
//! - [`memory`]: in-memory repository and the process-local cache
//! - [`postgres`]: Diesel-backed `PostgreSQL` repository

pub mod memory;
pub mod postgres;
