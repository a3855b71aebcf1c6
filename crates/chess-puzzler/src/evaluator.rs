//! Game evaluator: one engine score per played position.

use std::time::Duration;

use chess_core::{parse_mainline, GameRecord, Mainline};
use shakmaty::Position;
use tracing::{debug, info, warn};

use crate::config::PipelineConfig;
use crate::engine::{EngineError, Evaluation, Evaluator};

/// One element of an evaluation trace, from White's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlyEval {
    /// Centipawns, positive = White is better.
    Score(i32),
    /// Forced mate found from this position. `moves` is positive when White mates.
    Mate { moves: i32 },
}

impl PlyEval {
    pub fn is_mate(&self) -> bool {
        matches!(self, PlyEval::Mate { .. })
    }
}

impl From<Evaluation> for PlyEval {
    fn from(eval: Evaluation) -> Self {
        match eval {
            Evaluation::Centipawns(cp) => PlyEval::Score(cp),
            Evaluation::Mate(moves) => PlyEval::Mate { moves },
        }
    }
}

/// A game with its parsed mainline and its evaluation trace.
///
/// `trace[i]` scores the position before half-move `i`; the trace always has
/// one entry per half-move.
#[derive(Debug, Clone)]
pub struct EvaluatedGame {
    pub record: GameRecord,
    pub mainline: Mainline,
    pub trace: Vec<PlyEval>,
}

/// Games that made it through evaluation, plus how many were skipped.
#[derive(Debug, Default)]
pub struct EvaluationRun {
    pub games: Vec<EvaluatedGame>,
    pub skipped: usize,
}

/// Score every position of `mainline` before its move is played.
pub async fn evaluate_game<E: Evaluator>(
    engine: &mut E,
    record: GameRecord,
    mainline: Mainline,
    budget: Duration,
) -> Result<EvaluatedGame, EngineError> {
    let mut trace: Vec<PlyEval> = Vec::with_capacity(mainline.len());

    for (_, position, _) in mainline.replay() {
        let eval = engine.score(&position, budget).await?;
        trace.push(eval.for_white(position.turn()).into());
    }

    debug!(
        game_id = %record.id,
        plies = trace.len(),
        mates = trace.iter().filter(|e| e.is_mate()).count(),
        "Game evaluated"
    );

    Ok(EvaluatedGame {
        record,
        mainline,
        trace,
    })
}

/// Parse and evaluate `records` in order.
///
/// Games whose move-text cannot be replayed are skipped; an engine failure
/// aborts the whole batch.
pub async fn evaluate_games<E: Evaluator>(
    engine: &mut E,
    records: Vec<GameRecord>,
    config: &PipelineConfig,
) -> Result<EvaluationRun, EngineError> {
    let total = records.len();
    let mut run = EvaluationRun::default();

    for (i, record) in records.into_iter().enumerate() {
        let mainline = match parse_mainline(&record.pgn) {
            Ok(mainline) => mainline,
            Err(e) => {
                warn!(game_id = %record.id, error = %e, "Skipping unreadable game");
                run.skipped += 1;
                continue;
            }
        };

        let game = evaluate_game(engine, record, mainline, config.score_budget).await?;
        run.games.push(game);

        if (i + 1) % 10 == 0 || i + 1 == total {
            info!(evaluated = i + 1, total, "Evaluation progress");
        }
    }

    Ok(run)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedEngine;

    const GAME: &str = "1. e4 e5 2. Nf3 Nc6 3. Bc4 Nf6 *";

    #[tokio::test]
    async fn test_trace_has_one_entry_per_ply() {
        let mut engine = ScriptedEngine::default();
        let mainline = parse_mainline(GAME).unwrap();
        let game = evaluate_game(
            &mut engine,
            GameRecord::new("g1", GAME),
            mainline,
            Duration::from_millis(10),
        )
        .await
        .unwrap();

        assert_eq!(game.trace.len(), 6);
        assert_eq!(engine.score_calls, 6);
    }

    #[tokio::test]
    async fn test_scores_are_from_whites_perspective() {
        let mut engine = ScriptedEngine::default();
        let mainline = parse_mainline(GAME).unwrap();
        let plies: Vec<_> = mainline.replay().collect();
        // Black to move at ply 1, mating in 3 from Black's point of view.
        engine.mate_at(&plies[1].1, 3, &[]);

        let game = evaluate_game(
            &mut engine,
            GameRecord::new("g1", GAME),
            mainline,
            Duration::from_millis(10),
        )
        .await
        .unwrap();

        assert_eq!(game.trace[0], PlyEval::Score(20));
        assert_eq!(game.trace[1], PlyEval::Mate { moves: -3 });
        assert_eq!(game.trace[2], PlyEval::Score(20));
        assert_eq!(game.trace[3], PlyEval::Score(-20));
    }

    #[tokio::test]
    async fn test_unreadable_games_are_skipped() {
        let mut engine = ScriptedEngine::default();
        let records = vec![
            GameRecord::new("bad", "1. e4 e5 2. Ke3 *"),
            GameRecord::new("empty", ""),
            GameRecord::new("good", GAME),
        ];

        let run = evaluate_games(&mut engine, records, &PipelineConfig::default())
            .await
            .unwrap();

        assert_eq!(run.skipped, 2);
        assert_eq!(run.games.len(), 1);
        assert_eq!(run.games[0].record.id, "good");
    }

    #[tokio::test]
    async fn test_engine_failure_aborts_batch() {
        let mut engine = ScriptedEngine {
            fail_after: Some(3),
            ..Default::default()
        };
        let records = vec![GameRecord::new("g1", GAME), GameRecord::new("g2", GAME)];

        let result = evaluate_games(&mut engine, records, &PipelineConfig::default()).await;

        assert!(matches!(result, Err(EngineError::Closed)));
    }
}
