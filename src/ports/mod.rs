//! Ports Layer - Hexagonal Architecture Boundaries
//!
//! Defines the interfaces (traits) that the usecases layer
//! requires from the outside world. Adapters implement these traits.
//!
//! Port categories:
//! - `MatchDataSource`: Third-party match data (head-to-head, league rates)

pub mod match_data;

pub use match_data::{FixtureRef, ManualOnly, MatchDataSource};
