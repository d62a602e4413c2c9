//! Domain layer - Draw probability engine and verdict scorer.
//!
//! Pure, synchronous, stateless logic. No I/O and no shared state:
//! every call reads only its arguments, so analyses can run in parallel
//! without coordination.

pub mod analysis;
pub mod features;
pub mod goals;
pub mod kelly;
pub mod layers;
pub mod poisson;
pub mod scorer;
pub mod thresholds;

// Re-export core types for convenience
pub use analysis::{AnalysisRecord, DataWarning, FixtureSnapshot, Side};
pub use features::{ContextualFeatures, MatchContext};
pub use goals::{GoalRecord, estimate_lambda};
pub use kelly::{KellyCriterion, KellySizer};
pub use layers::{LayerKind, LayerResult, LayerStatus};
pub use poisson::{DrawEstimate, HalftimeModel, PoissonDrawModel, draw_probability};
pub use scorer::{TierCutoffs, Verdict, VerdictScorer, VerdictTier};
pub use thresholds::{LayerThresholds, ThresholdOverrides, ThresholdPreset};
