//! Puzzle data model and catalog serialization

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PuzzleKind {
    Checkmate,
}

/// A forced-mate puzzle taken from a played game.
///
/// Field names on the wire match what the puzzle board front-end reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Puzzle {
    #[serde(rename = "puzzle-uuid")]
    pub game_id: String,
    /// Starting position; the side to move is the solver.
    #[serde(rename = "puzzle-fen")]
    pub fen: String,
    /// UCI moves, solver first and last.
    #[serde(rename = "puzzle-solution")]
    pub solution: Vec<String>,
    #[serde(rename = "puzzle_type")]
    pub kind: PuzzleKind,
    /// Number of half-moves in `solution`.
    #[serde(rename = "puzzle-complexity")]
    pub complexity: usize,
}

impl Puzzle {
    pub fn checkmate(game_id: impl Into<String>, fen: impl Into<String>, solution: Vec<String>) -> Self {
        Self {
            game_id: game_id.into(),
            fen: fen.into(),
            complexity: solution.len(),
            solution,
            kind: PuzzleKind::Checkmate,
        }
    }
}

pub type PuzzleCatalog = Vec<Puzzle>;

/// Render a catalog as a pretty-printed JSON array, four-space indented.
pub fn catalog_to_json(catalog: &[Puzzle]) -> serde_json::Result<Vec<u8>> {
    let mut out = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut out, formatter);
    catalog.serialize(&mut ser)?;
    Ok(out)
}
