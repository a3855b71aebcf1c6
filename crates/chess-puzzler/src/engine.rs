//! Evaluation adapter seam: the operations the pipeline needs from an
//! analysis engine session.

use std::time::Duration;

use shakmaty::{Chess, Color};
use thiserror::Error;

/// Engine score for one position, relative to the side to move (UCI convention).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Evaluation {
    /// Centipawns, positive = side to move is better.
    Centipawns(i32),
    /// Mate in N moves, positive = side to move delivers mate.
    Mate(i32),
}

impl Evaluation {
    /// Flip a side-to-move score into White's perspective.
    pub fn for_white(self, side_to_move: Color) -> Self {
        let sign = if side_to_move == Color::White { 1 } else { -1 };
        match self {
            Evaluation::Centipawns(cp) => Evaluation::Centipawns(cp * sign),
            Evaluation::Mate(n) => Evaluation::Mate(n * sign),
        }
    }
}

/// Fatal engine session failures. Any of these aborts the run.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("failed to spawn engine {path}: {source}")]
    Spawn {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("engine I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("engine closed its output")]
    Closed,

    #[error("unexpected engine response: {0}")]
    Protocol(String),
}

/// One long-lived engine session.
///
/// Implementations own their connection; callers are responsible for closing
/// it when the run ends.
#[allow(async_fn_in_trait)]
pub trait Evaluator {
    /// Score `position` within `budget`.
    async fn score(&mut self, position: &Chess, budget: Duration)
        -> Result<Evaluation, EngineError>;

    /// Best line from `position` within `budget`, as raw UCI move tokens.
    async fn principal_variation(
        &mut self,
        position: &Chess,
        budget: Duration,
    ) -> Result<Vec<String>, EngineError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_white_flips_black_scores() {
        assert_eq!(
            Evaluation::Centipawns(35).for_white(Color::White),
            Evaluation::Centipawns(35)
        );
        assert_eq!(
            Evaluation::Centipawns(35).for_white(Color::Black),
            Evaluation::Centipawns(-35)
        );
        assert_eq!(Evaluation::Mate(2).for_white(Color::Black), Evaluation::Mate(-2));
    }
}
