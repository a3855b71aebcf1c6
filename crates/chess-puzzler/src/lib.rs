//! Forced-mate puzzle extraction: per-ply engine evaluation, mate
//! classification, solution extraction and catalog assembly.

pub mod assembler;
pub mod classifier;
pub mod config;
pub mod engine;
pub mod evaluator;
pub mod extractor;
pub mod puzzle;

#[cfg(test)]
pub(crate) mod testing;

pub use assembler::{assemble, generate_puzzles, GenerationReport};
pub use classifier::has_forced_mate;
pub use config::PipelineConfig;
pub use engine::{EngineError, Evaluation, Evaluator};
pub use evaluator::{evaluate_game, evaluate_games, EvaluatedGame, EvaluationRun, PlyEval};
pub use extractor::{accept_solution, extract_puzzles, solution_from_variation, VariationError};
pub use puzzle::{catalog_to_json, Puzzle, PuzzleCatalog, PuzzleKind};
