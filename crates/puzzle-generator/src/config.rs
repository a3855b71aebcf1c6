//! Generator configuration from command-line flags and environment variables

use std::path::PathBuf;
use std::time::Duration;

use chess_puzzler::PipelineConfig;
use clap::Parser;

use crate::chess_com::DEFAULT_API_BASE;
use crate::error::GeneratorError;

/// Generate checkmate puzzles from a chess.com player's games.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct GeneratorConfig {
    /// Chess.com username whose games are analysed
    #[arg(short, long, env = "CHESSCOM_USERNAME")]
    pub username: String,

    /// Path to a UCI engine binary (Stockfish)
    #[arg(short = 'p', long, env = "STOCKFISH_PATH")]
    pub engine_path: String,

    /// Number of games to evaluate
    #[arg(short = 'n', long = "games", env = "N_GAMES", default_value_t = 100)]
    pub max_games: usize,

    /// Where the puzzle catalog is written (overwritten each run)
    #[arg(
        short,
        long,
        env = "PUZZLES_OUTPUT",
        default_value = "src/assets/puzzles.json"
    )]
    pub output: PathBuf,

    /// Longest accepted solution, in half-moves
    #[arg(long, default_value_t = 9)]
    pub max_complexity: usize,

    /// Engine time per played position, in milliseconds
    #[arg(long, default_value_t = 10)]
    pub score_time_ms: u64,

    /// Engine time per mating-line query, in milliseconds
    #[arg(long, default_value_t = 100)]
    pub pv_time_ms: u64,

    /// Engine sessions run side by side (0 = one per CPU)
    #[arg(short, long, env = "PUZZLE_JOBS", default_value_t = 1)]
    pub jobs: usize,

    /// Engine hash table size per session, in MB
    #[arg(long, default_value_t = 256)]
    pub hash_mb: u32,

    /// Base URL of the chess.com public API
    #[arg(long, env = "CHESSCOM_API_BASE", default_value = DEFAULT_API_BASE, hide = true)]
    pub api_base: String,
}

impl GeneratorConfig {
    /// Reject settings the pipeline cannot run with.
    pub fn validate(&self) -> Result<(), GeneratorError> {
        if self.username.trim().is_empty() {
            return Err(GeneratorError::Config("username must not be empty".into()));
        }
        if self.max_games == 0 {
            return Err(GeneratorError::Config("number of games must be at least 1".into()));
        }
        if self.max_complexity == 0 {
            return Err(GeneratorError::Config("max complexity must be at least 1".into()));
        }
        if self.score_time_ms == 0 {
            return Err(GeneratorError::Config("score time must be at least 1 ms".into()));
        }
        if self.pv_time_ms <= self.score_time_ms {
            return Err(GeneratorError::Config(format!(
                "mating-line time ({} ms) must exceed per-position time ({} ms)",
                self.pv_time_ms, self.score_time_ms
            )));
        }
        Ok(())
    }

    pub fn pipeline(&self) -> PipelineConfig {
        PipelineConfig {
            score_budget: Duration::from_millis(self.score_time_ms),
            pv_budget: Duration::from_millis(self.pv_time_ms),
            max_complexity: self.max_complexity,
        }
    }

    /// Number of engine sessions to open for `games` games.
    pub fn sessions(&self, games: usize) -> usize {
        let jobs = if self.jobs == 0 { num_cpus::get() } else { self.jobs };
        jobs.min(games).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> GeneratorConfig {
        let mut argv = vec!["puzzle-generator", "-u", "someone", "-p", "/usr/bin/stockfish"];
        argv.extend_from_slice(args);
        GeneratorConfig::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = parse(&[]);
        config.validate().unwrap();
        assert_eq!(config.max_games, 100);
        assert_eq!(config.output, PathBuf::from("src/assets/puzzles.json"));

        let pipeline = config.pipeline();
        assert_eq!(pipeline, PipelineConfig::default());
    }

    #[test]
    fn test_short_flags() {
        let config = parse(&["-n", "5", "-o", "out.json", "--max-complexity", "5"]);
        assert_eq!(config.max_games, 5);
        assert_eq!(config.output, PathBuf::from("out.json"));
        assert_eq!(config.pipeline().max_complexity, 5);
    }

    #[test]
    fn test_validate_rejects_bad_budgets() {
        let config = parse(&["--score-time-ms", "50", "--pv-time-ms", "50"]);
        assert!(matches!(config.validate(), Err(GeneratorError::Config(_))));

        let config = parse(&["-n", "0"]);
        assert!(config.validate().is_err());

        let config = parse(&["--max-complexity", "0"]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_sessions_never_exceed_games() {
        let config = parse(&["--jobs", "4"]);
        assert_eq!(config.sessions(10), 4);
        assert_eq!(config.sessions(2), 2);
        assert_eq!(config.sessions(0), 1);
        assert!(parse(&["--jobs", "0"]).sessions(1000) >= 1);
    }
}
