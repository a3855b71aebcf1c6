//! PGN parsing: a `pgn-reader` visitor that keeps the mainline and replays it
//! with legality checks.

use std::ops::ControlFlow;

use pgn_reader::{RawTag, Reader, SanPlus, Skip, Visitor};
use shakmaty::fen::Fen;
use shakmaty::{CastlingMode, Chess, EnPassantMode, Move, Position};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PgnError {
    #[error("invalid FEN header: {0}")]
    InvalidFen(String),

    #[error("no moves in move-text")]
    NoMoves,

    #[error("illegal move {san:?} at ply {ply}")]
    IllegalMove { ply: usize, san: String },

    #[error("unreadable PGN: {0}")]
    Read(String),
}

/// A game's mainline: the starting position and the legal moves played from it.
#[derive(Debug, Clone)]
pub struct Mainline {
    pub start: Chess,
    pub moves: Vec<Move>,
}

impl Mainline {
    /// Number of half-moves played.
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Walk the mainline, yielding `(ply, position before the move, move)`.
    pub fn replay(&self) -> Replay<'_> {
        Replay {
            position: self.start.clone(),
            moves: self.moves.iter().enumerate(),
        }
    }
}

pub struct Replay<'a> {
    position: Chess,
    moves: std::iter::Enumerate<std::slice::Iter<'a, Move>>,
}

impl<'a> Iterator for Replay<'a> {
    type Item = (usize, Chess, &'a Move);

    fn next(&mut self) -> Option<Self::Item> {
        let (ply, mv) = self.moves.next()?;
        let before = self.position.clone();
        // Moves were legality-checked when the mainline was parsed.
        self.position.play_unchecked(mv.clone());
        Some((ply, before, mv))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.moves.size_hint()
    }
}

#[derive(Default)]
struct GameTags {
    fen: Option<String>,
}

struct MainlineState {
    start: Chess,
    position: Chess,
    moves: Vec<Move>,
}

/// Collects the mainline of a single game, skipping every variation.
struct MainlineBuilder;

impl Visitor for MainlineBuilder {
    type Tags = GameTags;
    type Movetext = MainlineState;
    type Output = Result<Mainline, PgnError>;

    fn begin_tags(&mut self) -> ControlFlow<Self::Output, GameTags> {
        ControlFlow::Continue(GameTags::default())
    }

    fn tag(
        &mut self,
        tags: &mut GameTags,
        name: &[u8],
        value: RawTag<'_>,
    ) -> ControlFlow<Self::Output> {
        if name == b"FEN" {
            let fen = value.decode_utf8_lossy().trim().to_string();
            if !fen.is_empty() {
                tags.fen = Some(fen);
            }
        }
        ControlFlow::Continue(())
    }

    fn begin_movetext(&mut self, tags: GameTags) -> ControlFlow<Self::Output, MainlineState> {
        let start = match tags.fen {
            Some(fen) => match position_from_fen(&fen) {
                Ok(position) => position,
                Err(e) => return ControlFlow::Break(Err(e)),
            },
            None => Chess::default(),
        };
        ControlFlow::Continue(MainlineState {
            position: start.clone(),
            start,
            moves: Vec::new(),
        })
    }

    fn begin_variation(
        &mut self,
        _state: &mut MainlineState,
    ) -> ControlFlow<Self::Output, Skip> {
        ControlFlow::Continue(Skip(true))
    }

    fn san(&mut self, state: &mut MainlineState, san_plus: SanPlus) -> ControlFlow<Self::Output> {
        let ply = state.moves.len();
        match san_plus.san.to_move(&state.position) {
            Ok(mv) => {
                state.position.play_unchecked(mv.clone());
                state.moves.push(mv);
                ControlFlow::Continue(())
            }
            Err(_) => ControlFlow::Break(Err(PgnError::IllegalMove {
                ply,
                san: san_plus.to_string(),
            })),
        }
    }

    fn end_game(&mut self, state: MainlineState) -> Self::Output {
        if state.moves.is_empty() {
            return Err(PgnError::NoMoves);
        }
        Ok(Mainline {
            start: state.start,
            moves: state.moves,
        })
    }
}

/// Parse the first game of a PGN into a legality-checked mainline.
///
/// Starts from the `[FEN]` tag position when one is present, otherwise from
/// the standard initial position. Comments and variations, nested or not,
/// are skipped.
pub fn parse_mainline(pgn: &str) -> Result<Mainline, PgnError> {
    let mut reader = Reader::new(pgn.as_bytes());
    match reader.read_game(&mut MainlineBuilder) {
        Ok(Some(result)) => result,
        Ok(None) => Err(PgnError::NoMoves),
        Err(e) => Err(PgnError::Read(e.to_string())),
    }
}

fn position_from_fen(fen: &str) -> Result<Chess, PgnError> {
    let parsed: Fen = fen
        .parse()
        .map_err(|_| PgnError::InvalidFen(fen.to_string()))?;
    parsed
        .into_position(CastlingMode::Standard)
        .map_err(|_| PgnError::InvalidFen(fen.to_string()))
}

/// Canonical FEN of a position, en passant square only when capturable.
pub fn to_fen(position: &Chess) -> String {
    Fen::from_position(position, EnPassantMode::Legal).to_string()
}

/// UCI notation of a move (`e2e4`, `e7e8q`, `e1g1`).
pub fn to_uci(mv: &Move) -> String {
    mv.to_uci(CastlingMode::Standard).to_string()
}
