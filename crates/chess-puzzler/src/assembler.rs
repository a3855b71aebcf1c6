//! Puzzle assembler: classify, extract and collect puzzles across games.

use chess_core::GameRecord;
use tracing::info;

use crate::classifier::has_forced_mate;
use crate::config::PipelineConfig;
use crate::engine::{EngineError, Evaluator};
use crate::evaluator::{evaluate_games, EvaluatedGame};
use crate::extractor::extract_puzzles;
use crate::puzzle::PuzzleCatalog;

/// Collect puzzles from evaluated games, in game order then ply order.
///
/// Games without a mate-scored position never reach the engine again.
pub async fn assemble<E: Evaluator>(
    engine: &mut E,
    games: &[EvaluatedGame],
    config: &PipelineConfig,
) -> Result<PuzzleCatalog, EngineError> {
    let mut catalog = PuzzleCatalog::new();

    for game in games {
        if !has_forced_mate(&game.trace) {
            continue;
        }
        catalog.extend(extract_puzzles(engine, game, config).await?);
    }

    Ok(catalog)
}

/// Outcome of running the whole pipeline over a batch of records.
#[derive(Debug, Default)]
pub struct GenerationReport {
    pub catalog: PuzzleCatalog,
    pub evaluated: usize,
    pub skipped: usize,
    pub with_mate: usize,
}

impl GenerationReport {
    /// Append another batch's report, keeping catalog order.
    pub fn merge(&mut self, other: GenerationReport) {
        self.catalog.extend(other.catalog);
        self.evaluated += other.evaluated;
        self.skipped += other.skipped;
        self.with_mate += other.with_mate;
    }
}

/// Evaluate `records`, then assemble their puzzles on the same engine session.
pub async fn generate_puzzles<E: Evaluator>(
    engine: &mut E,
    records: Vec<GameRecord>,
    config: &PipelineConfig,
) -> Result<GenerationReport, EngineError> {
    let run = evaluate_games(engine, records, config).await?;
    let with_mate = run.games.iter().filter(|g| has_forced_mate(&g.trace)).count();
    info!(
        evaluated = run.games.len(),
        skipped = run.skipped,
        with_mate,
        "Extracting mating lines"
    );

    let catalog = assemble(engine, &run.games, config).await?;

    Ok(GenerationReport {
        catalog,
        evaluated: run.games.len(),
        skipped: run.skipped,
        with_mate,
    })
}
