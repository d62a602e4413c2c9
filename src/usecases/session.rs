//! Session History - Append-only Record of Analyses
//!
//! Owned by the caller (the CLI session), never by the engine. Records
//! can be appended and read, never edited or removed.

use serde::Serialize;

use crate::domain::analysis::AnalysisRecord;
use crate::domain::scorer::VerdictTier;

/// Tier counts across a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TierSummary {
  pub strong: usize,
  pub moderate: usize,
  pub avoid: usize,
}

impl TierSummary {
  pub fn total(&self) -> usize {
    self.strong + self.moderate + self.avoid
  }
}

/// Append-only list of analysis records for one session.
#[derive(Debug, Clone, Default)]
pub struct SessionHistory {
  records: Vec<AnalysisRecord>,
}

impl SessionHistory {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn push(&mut self, record: AnalysisRecord) {
    self.records.push(record);
  }

  pub fn extend(&mut self, records: impl IntoIterator<Item = AnalysisRecord>) {
    self.records.extend(records);
  }

  /// Records in the order they were added.
  pub fn records(&self) -> &[AnalysisRecord] {
    &self.records
  }

  pub fn len(&self) -> usize {
    self.records.len()
  }

  pub fn is_empty(&self) -> bool {
    self.records.is_empty()
  }

  pub fn summary(&self) -> TierSummary {
    self
      .records
      .iter()
      .fold(TierSummary::default(), |mut s, r| {
        match r.tier() {
          VerdictTier::Strong => s.strong += 1,
          VerdictTier::Moderate => s.moderate += 1,
          VerdictTier::Avoid => s.avoid += 1,
        }
        s
      })
  }
}
