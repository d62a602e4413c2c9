//! CSV export of session history.
//!
//! One row per analysis record, with a score column per layer.

use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::domain::analysis::AnalysisRecord;
use crate::domain::layers::LayerKind;

const BASE_HEADERS: [&str; 15] = [
    "id",
    "created_at",
    "home_team",
    "away_team",
    "lambda_home",
    "lambda_away",
    "draw_probability",
    "halftime_probability",
    "core_score",
    "informational_score",
    "tier",
    "stake_advice",
    "kelly_fraction",
    "preset",
    "warnings",
];

fn layer_columns() -> impl Iterator<Item = LayerKind> {
    LayerKind::CORE.into_iter().chain(LayerKind::INFORMATIONAL)
}

fn headers() -> Vec<String> {
    BASE_HEADERS
        .iter()
        .map(|h| (*h).to_string())
        .chain(layer_columns().map(|k| k.name().to_string()))
        .collect()
}

fn row(record: &AnalysisRecord) -> Vec<String> {
    let est = &record.estimate;
    let v = &record.verdict;
    let warnings = record
        .warnings
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ");

    let mut fields = vec![
        record.id.to_string(),
        record.created_at.to_rfc3339(),
        record.fixture.home_team.clone(),
        record.fixture.away_team.clone(),
        format!("{:.3}", est.lambda_home),
        format!("{:.3}", est.lambda_away),
        format!("{:.4}", est.full_time),
        est.half_time.map(|p| format!("{p:.4}")).unwrap_or_default(),
        format!("{:.1}", v.core_score),
        format!("{:.1}", v.informational_score),
        v.tier.label().to_string(),
        v.stake_advice.clone(),
        format!("{:.4}", record.kelly_fraction),
        record.preset.clone(),
        warnings,
    ];
    fields.extend(layer_columns().map(|kind| {
        v.layer(kind)
            .map(|l| format!("{:.1}", l.score))
            .unwrap_or_default()
    }));
    fields
}

/// Write records as CSV to any writer.
pub fn export_csv<W: io::Write>(records: &[AnalysisRecord], writer: W) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(headers())
        .context("Failed to write CSV header")?;
    for record in records {
        csv.write_record(row(record))
            .with_context(|| format!("Failed to write CSV row for {}", record.id))?;
    }
    csv.flush().context("Failed to flush CSV output")?;
    Ok(())
}

/// Write records as CSV to `path`, replacing any existing file.
pub fn write_csv_file(path: impl AsRef<Path>, records: &[AnalysisRecord]) -> Result<()> {
    let path = path.as_ref();
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create export file: {}", path.display()))?;
    export_csv(records, io::BufWriter::new(file))?;
    info!(path = %path.display(), rows = records.len(), "Session history exported");
    Ok(())
}
