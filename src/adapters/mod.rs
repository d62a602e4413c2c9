//! Adapters Layer - Hexagonal Architecture Outer Ring
//!
//! Implements the port traits defined in `crate::ports` and the
//! presentation glue around the engine.
//!
//! Adapter categories:
//! - `fixtures`: TOML fixture file loading
//! - `lookup`: football-data.org match data client
//! - `report`: Terminal rendering and CSV export

pub mod fixtures;
pub mod lookup;
pub mod report;
