//! Use Cases Layer - Application Business Logic
//!
//! Orchestrates domain logic with port interfaces to implement
//! the predictor's workflows.
//!
//! Use cases:
//! - `intake`: Boundary validation of operator input
//! - `DrawAnalyzer`: Single-fixture analysis pipeline
//! - `batch`: Concurrent multi-fixture scan
//! - `SessionHistory`: Caller-owned append-only analysis log

pub mod analyzer;
pub mod batch;
pub mod intake;
pub mod session;

pub use analyzer::DrawAnalyzer;
pub use intake::{FixtureInput, GoalHistoryInput, ValidatedFixture};
pub use session::{SessionHistory, TierSummary};
