//! Taskdesk: task CRUD with a read-through, write-invalidate cache.
//!
//! # Architecture
//!
//! Taskdesk follows hexagonal architecture principles:
//!
//! - **Domain**: task records, validation and paging with no infrastructure
//!   dependencies
//! - **Ports**: the persistence gateway and cache contracts
//! - **Adapters**: `PostgreSQL` and in-memory implementations of the ports
//!
//! # Modules
//!
//! - [`task`]: task records, storage, caching and the CRUD service
//! - [`config`]: environment-driven settings
//! - [`telemetry`]: `tracing` subscriber installation

pub mod config;
pub mod task;
pub mod telemetry;
