//! Shared helpers: a deterministic engine scripted by position.

use std::collections::HashMap;
use std::time::Duration;

use chess_core::pgn::to_fen;
use chess_core::parse_mainline;
use chess_puzzler::{EngineError, Evaluation, Evaluator};
use shakmaty::Chess;

/// Four-move opening used by most scenarios (8 plies).
pub const ITALIAN: &str = r#"[Event "Live Chess"]
[Site "Chess.com"]
[White "alice"]
[Black "bob"]
[Result "*"]

1. e4 {[%clk 0:09:59]} 1... e5 {[%clk 0:09:58]} 2. Nf3 Nc6 3. Bc4 Bc5 4. c3 Nf6 *"#;

#[derive(Default, Clone)]
pub struct ScriptedEngine {
    scores: HashMap<String, Evaluation>,
    lines: HashMap<String, Vec<String>>,
    pub pv_queries: usize,
}

impl ScriptedEngine {
    /// Score the position before `ply` of `pgn` as mate and answer with `line`.
    pub fn mate_before_ply(&mut self, pgn: &str, ply: usize, line: &[&str]) {
        let position = position_before(pgn, ply);
        let fen = to_fen(&position);
        self.scores.insert(fen.clone(), Evaluation::Mate(1));
        self.lines
            .insert(fen, line.iter().map(|s| s.to_string()).collect());
    }

    pub fn score_before_ply(&mut self, pgn: &str, ply: usize, cp: i32) {
        let position = position_before(pgn, ply);
        self.scores.insert(to_fen(&position), Evaluation::Centipawns(cp));
    }
}

impl Evaluator for ScriptedEngine {
    async fn score(
        &mut self,
        position: &Chess,
        _budget: Duration,
    ) -> Result<Evaluation, EngineError> {
        Ok(self
            .scores
            .get(&to_fen(position))
            .copied()
            .unwrap_or(Evaluation::Centipawns(0)))
    }

    async fn principal_variation(
        &mut self,
        position: &Chess,
        _budget: Duration,
    ) -> Result<Vec<String>, EngineError> {
        self.pv_queries += 1;
        Ok(self
            .lines
            .get(&to_fen(position))
            .cloned()
            .unwrap_or_default())
    }
}

pub fn position_before(pgn: &str, ply: usize) -> Chess {
    let mainline = parse_mainline(pgn).expect("test PGN must parse");
    mainline
        .replay()
        .nth(ply)
        .map(|(_, position, _)| position)
        .expect("ply out of range")
}

pub fn fen_before(pgn: &str, ply: usize) -> String {
    to_fen(&position_before(pgn, ply))
}
