//! Task management.
//!
//! Tasks are listed, fetched, created, updated and deleted through
//! [`services::TaskService`], which serves reads from a two-region cache
//! (tasks by identifier, pages by limit and offset) and flushes both regions
//! after every successful write. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
