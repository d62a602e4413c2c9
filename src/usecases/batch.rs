//! Batch Scan - Concurrent Multi-Fixture Analysis
//!
//! Runs one analysis per fixture on the tokio runtime, bounded by a
//! semaphore. Analyses share nothing but the read-only analyzer, so no
//! further coordination is needed. Results come back in input order.

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{info, instrument};

use crate::domain::analysis::AnalysisRecord;
use crate::ports::match_data::MatchDataSource;

use super::analyzer::DrawAnalyzer;
use super::intake::FixtureInput;

/// Analyze every fixture, at most `max_concurrent` at a time.
#[instrument(skip(analyzer, fixtures), fields(fixtures = fixtures.len()))]
pub async fn scan<S: MatchDataSource>(
  analyzer: Arc<DrawAnalyzer<S>>,
  fixtures: Vec<FixtureInput>,
  max_concurrent: usize,
) -> Result<Vec<AnalysisRecord>> {
  let started = Instant::now();
  let total = fixtures.len();
  let semaphore = Arc::new(Semaphore::new(max_concurrent.max(1)));
  let mut tasks = JoinSet::new();

  for (index, fixture) in fixtures.into_iter().enumerate() {
    let analyzer = Arc::clone(&analyzer);
    let semaphore = Arc::clone(&semaphore);
    tasks.spawn(async move {
      let _permit = semaphore.acquire_owned().await.ok();
      (index, analyzer.analyze(&fixture).await)
    });
  }

  let mut slots: Vec<Option<AnalysisRecord>> = vec![None; total];
  while let Some(joined) = tasks.join_next().await {
    let (index, record) = joined.context("Analysis task panicked")?;
    slots[index] = Some(record);
  }

  let records: Vec<AnalysisRecord> = slots.into_iter().flatten().collect();

  info!(
    analysed = records.len(),
    elapsed_ms = started.elapsed().as_millis() as u64,
    "Batch scan complete"
  );

  Ok(records)
}
