//! Match Data Lookup Adapters
//!
//! Implements the `MatchDataSource` port against football-data.org.
//! Lookups only fill features the operator left empty.

pub mod client;
pub mod types;

pub use client::{FootballDataClient, FootballDataConfig, LookupError};
