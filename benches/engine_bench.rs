//! Draw Engine Benchmarks - Per-Fixture Hot Path
//!
//! Benchmarks the pure engine steps that run once per analysed fixture.
//!
//! Run with: cargo bench --bench engine_bench

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use draw_predictor::config::{AppConfig, InputLimits};
use draw_predictor::domain::features::{ContextualFeatures, MatchContext};
use draw_predictor::domain::kelly::KellySizer;
use draw_predictor::domain::poisson::{HalftimeModel, PoissonDrawModel};
use draw_predictor::domain::scorer::{TierCutoffs, VerdictScorer};
use draw_predictor::domain::thresholds::LayerThresholds;
use draw_predictor::ports::match_data::ManualOnly;
use draw_predictor::usecases::analyzer::DrawAnalyzer;
use draw_predictor::usecases::intake::{FixtureInput, GoalHistoryInput};

/// Benchmark the truncated Poisson draw sum.
fn bench_draw_probability(c: &mut Criterion) {
    let model = PoissonDrawModel::default();

    c.bench_function("poisson_draw_probability", |b| {
        b.iter(|| {
            let _p = model.draw_probability(black_box(1.2), black_box(1.1));
        });
    });
}

/// Benchmark the half-time variant.
fn bench_halftime(c: &mut Criterion) {
    let model = HalftimeModel::default();

    c.bench_function("poisson_halftime_probability", |b| {
        b.iter(|| {
            let _p = model.draw_probability(black_box(1.2), black_box(1.1), black_box(10));
        });
    });
}

/// Benchmark all nine layers plus tier mapping.
fn bench_scorer(c: &mut Criterion) {
    let scorer = VerdictScorer::new(LayerThresholds::standard(), TierCutoffs::default());
    let features = ContextualFeatures {
        draw_odds: 3.1,
        table_gap: 2,
        combined_wins: 3,
        draw_scorelines: 3,
        h2h_draws: Some(1),
        league_draw_rate: Some(28.0),
        goal_density: Some(1.05),
        context: MatchContext::Derby,
    };

    c.bench_function("verdict_scorer_evaluate", |b| {
        b.iter(|| {
            let _v = scorer.evaluate(black_box(&features), black_box(0.29));
        });
    });
}

/// Benchmark Kelly sizing through the Decimal path.
fn bench_kelly(c: &mut Criterion) {
    let sizer = KellySizer::new(0.25, 0.05);

    c.bench_function("kelly_draw_fraction", |b| {
        b.iter(|| {
            let _f = sizer.optimal_fraction(black_box(0.34), black_box(3.2));
        });
    });
}

/// Benchmark intake validation plus the full pure engine step.
fn bench_analyzer_evaluate(c: &mut Criterion) {
    let analyzer = DrawAnalyzer::new(Arc::new(ManualOnly), &AppConfig::default());
    let limits = InputLimits::default();
    let input = FixtureInput {
        home_team: "Torino".to_string(),
        away_team: "Genoa".to_string(),
        home_goals: GoalHistoryInput::Text("1,1,0,2,1,0,1,1,2,0".to_string()),
        away_goals: GoalHistoryInput::Text("0,1,1,1,2,1,0,0,1,1".to_string()),
        draw_odds: 3.1,
        table_gap: 2,
        combined_wins: 3,
        draw_scorelines: 3,
        h2h_draws: Some(1),
        league_draw_rate: Some(27.5),
        goal_density: None,
        context: MatchContext::Neutral,
        match_id: None,
        competition: None,
    };

    c.bench_function("analyzer_validate_and_evaluate", |b| {
        b.iter(|| {
            let _record = analyzer.evaluate(black_box(&input).validate(&limits));
        });
    });
}

criterion_group!(
    benches,
    bench_draw_probability,
    bench_halftime,
    bench_scorer,
    bench_kelly,
    bench_analyzer_evaluate,
);
criterion_main!(benches);
