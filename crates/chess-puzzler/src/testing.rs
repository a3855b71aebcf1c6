//! In-memory engine answering from FEN-keyed scripts.

use std::collections::HashMap;
use std::time::Duration;

use chess_core::pgn::to_fen;
use shakmaty::Chess;

use crate::engine::{EngineError, Evaluation, Evaluator};

#[derive(Default)]
pub struct ScriptedEngine {
    pub scores: HashMap<String, Evaluation>,
    pub lines: HashMap<String, Vec<String>>,
    pub score_calls: usize,
    pub pv_calls: Vec<Duration>,
    /// Fail every query once this many queries (scores and lines) have been answered.
    pub fail_after: Option<usize>,
}

impl ScriptedEngine {
    pub fn mate_at(&mut self, position: &Chess, moves: i32, line: &[&str]) {
        let fen = to_fen(position);
        self.scores.insert(fen.clone(), Evaluation::Mate(moves));
        self.lines
            .insert(fen, line.iter().map(|s| s.to_string()).collect());
    }

    fn check_alive(&self) -> Result<(), EngineError> {
        let answered = self.score_calls + self.pv_calls.len();
        if self.fail_after.is_some_and(|n| answered >= n) {
            return Err(EngineError::Closed);
        }
        Ok(())
    }
}

impl Evaluator for ScriptedEngine {
    async fn score(
        &mut self,
        position: &Chess,
        _budget: Duration,
    ) -> Result<Evaluation, EngineError> {
        self.check_alive()?;
        self.score_calls += 1;
        Ok(self
            .scores
            .get(&to_fen(position))
            .copied()
            .unwrap_or(Evaluation::Centipawns(20)))
    }

    async fn principal_variation(
        &mut self,
        position: &Chess,
        budget: Duration,
    ) -> Result<Vec<String>, EngineError> {
        self.check_alive()?;
        self.pv_calls.push(budget);
        Ok(self
            .lines
            .get(&to_fen(position))
            .cloned()
            .unwrap_or_default())
    }
}
