//! Terminal rendering of analysis records.

use std::fmt::Write;

use crate::domain::analysis::AnalysisRecord;
use crate::domain::layers::LayerResult;
use crate::usecases::session::SessionHistory;

/// Bar width for a full 1.0 layer score.
const BAR_WIDTH: usize = 20;

/// Verdict banner, layer breakdown, score chart, and warnings.
pub fn render_record(record: &AnalysisRecord) -> String {
    let mut out = String::new();
    let v = &record.verdict;
    let est = &record.estimate;

    let _ = writeln!(out, "== {} ==", record.fixture.title());
    let _ = writeln!(
        out,
        "Verdict : {}  (core {:.1} / {:.0}, informational {:+.1})",
        v.tier,
        v.core_score,
        v.max_core_score(),
        v.informational_score
    );
    let _ = writeln!(
        out,
        "Stake   : {}  (Kelly suggests {:.2}% of bankroll)",
        v.stake_advice,
        record.kelly_fraction * 100.0
    );
    let _ = write!(
        out,
        "Model   : lambda {:.2} v {:.2}, full-time draw {:.1}%",
        est.lambda_home,
        est.lambda_away,
        est.full_time * 100.0
    );
    if let Some(ht) = est.half_time {
        let _ = write!(out, ", half-time draw {:.1}%", ht * 100.0);
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "Preset  : {}", record.preset);

    let _ = writeln!(out);
    let _ = writeln!(out, "{:<24} {:<8} {:>5}  Detail", "Layer", "Status", "Score");
    for layer in v.core_layers() {
        push_layer_row(&mut out, layer, "");
    }
    for layer in v.informational_layers() {
        push_layer_row(&mut out, layer, " (info)");
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Scores");
    for layer in &v.layers {
        let _ = writeln!(out, "{:<24} {} {:.1}", layer.name(), bar(layer.score), layer.score);
    }

    if !record.warnings.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Warnings");
        for w in &record.warnings {
            let _ = writeln!(out, " - {w}");
        }
    }

    out
}

fn push_layer_row(out: &mut String, layer: &LayerResult, suffix: &str) {
    let name = format!("{}{suffix}", layer.name());
    let _ = writeln!(
        out,
        "{:<24} {:<8} {:>5.1}  {}",
        name,
        layer.status.to_string(),
        layer.score,
        layer.explanation
    );
}

/// Horizontal bar for a score in [0, 1].
pub fn bar(score: f64) -> String {
    let filled = ((score.clamp(0.0, 1.0) * BAR_WIDTH as f64).round()) as usize;
    format!("{}{}", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled))
}

/// One line per record plus tier totals.
pub fn render_history(history: &SessionHistory) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<32} {:>7} {:>6}  {}",
        "Fixture", "P(draw)", "Score", "Verdict"
    );
    for r in history.records() {
        let _ = writeln!(
            out,
            "{:<32} {:>6.1}% {:>6.1}  {}",
            r.fixture.title(),
            r.draw_probability() * 100.0,
            r.verdict.core_score,
            r.tier()
        );
    }
    let s = history.summary();
    let _ = writeln!(
        out,
        "{} analysed: {} strong, {} moderate, {} avoid",
        s.total(),
        s.strong,
        s.moderate,
        s.avoid
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_widths() {
        assert_eq!(bar(1.0), "#".repeat(20));
        assert_eq!(bar(0.5), format!("{}{}", "#".repeat(10), ".".repeat(10)));
        assert_eq!(bar(0.0), ".".repeat(20));
        assert_eq!(bar(3.0).len(), 20);
    }

    #[test]
    fn test_empty_history_renders_totals() {
        let text = render_history(&SessionHistory::new());
        assert!(text.contains("0 analysed"));
    }
}
