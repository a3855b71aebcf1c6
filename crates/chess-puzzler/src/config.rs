use std::time::Duration;

/// Default time budget for the per-ply score query.
pub const DEFAULT_SCORE_BUDGET: Duration = Duration::from_millis(10);

/// Default time budget for the mating-line query.
pub const DEFAULT_PV_BUDGET: Duration = Duration::from_millis(100);

/// Default longest accepted solution, in half-moves.
pub const DEFAULT_MAX_COMPLEXITY: usize = 9;

/// Tunables shared by the evaluator and the solution extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Engine time per played position.
    pub score_budget: Duration,
    /// Engine time per mating-line query. Expected to exceed `score_budget`.
    pub pv_budget: Duration,
    /// Longest solution (in half-moves) that still becomes a puzzle.
    pub max_complexity: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            score_budget: DEFAULT_SCORE_BUDGET,
            pv_budget: DEFAULT_PV_BUDGET,
            max_complexity: DEFAULT_MAX_COMPLEXITY,
        }
    }
}
