//! Step definitions for cached task CRUD scenarios.

pub mod then;
pub mod world;
