//! Solution extractor: turns forced-mate positions into puzzles.

use chess_core::pgn::{to_fen, to_uci};
use shakmaty::uci::UciMove;
use shakmaty::{Chess, Position};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::PipelineConfig;
use crate::engine::{EngineError, Evaluator};
use crate::evaluator::EvaluatedGame;
use crate::puzzle::Puzzle;

/// The engine's line could not be turned into a playable solution.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VariationError {
    #[error("engine returned an empty line")]
    Empty,

    #[error("unparseable move {token:?} at index {index}")]
    InvalidToken { index: usize, token: String },

    #[error("illegal move {token:?} at index {index}")]
    IllegalMove { index: usize, token: String },
}

/// Convert raw UCI tokens into a solution, checking every move is legal when
/// played in order from `position`.
pub fn solution_from_variation(
    position: &Chess,
    tokens: &[String],
) -> Result<Vec<String>, VariationError> {
    if tokens.is_empty() {
        return Err(VariationError::Empty);
    }

    let mut board = position.clone();
    let mut solution = Vec::with_capacity(tokens.len());

    for (index, token) in tokens.iter().enumerate() {
        let uci: UciMove = token.parse().map_err(|_| VariationError::InvalidToken {
            index,
            token: token.clone(),
        })?;
        let mv = uci.to_move(&board).map_err(|_| VariationError::IllegalMove {
            index,
            token: token.clone(),
        })?;
        solution.push(to_uci(&mv));
        board.play_unchecked(mv);
    }

    Ok(solution)
}

/// A line becomes a puzzle only if it is non-empty, no longer than
/// `max_complexity`, and odd so the solver plays both first and last.
pub fn accept_solution(len: usize, max_complexity: usize) -> bool {
    len >= 1 && len <= max_complexity && len % 2 == 1
}

/// Emit at most one puzzle per mate-scored ply of `game`.
///
/// The replay always follows the moves actually played, never the engine's
/// line. Only engine failures are returned as errors.
pub async fn extract_puzzles<E: Evaluator>(
    engine: &mut E,
    game: &EvaluatedGame,
    config: &PipelineConfig,
) -> Result<Vec<Puzzle>, EngineError> {
    let mut puzzles = Vec::new();

    for ((ply, position, _), eval) in game.mainline.replay().zip(&game.trace) {
        if !eval.is_mate() {
            continue;
        }

        let tokens = engine
            .principal_variation(&position, config.pv_budget)
            .await?;

        let solution = match solution_from_variation(&position, &tokens) {
            Ok(solution) => solution,
            Err(e) => {
                warn!(game_id = %game.record.id, ply, error = %e, "Discarding mating line");
                continue;
            }
        };

        if !accept_solution(solution.len(), config.max_complexity) {
            debug!(
                game_id = %game.record.id,
                ply,
                length = solution.len(),
                "Mating line rejected"
            );
            continue;
        }

        puzzles.push(Puzzle::checkmate(
            game.record.id.clone(),
            to_fen(&position),
            solution,
        ));
    }

    Ok(puzzles)
}
