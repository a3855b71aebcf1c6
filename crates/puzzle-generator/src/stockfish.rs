//! Stockfish engine wrapper using UCI protocol (async I/O)

use std::time::Duration;

use chess_core::pgn::to_fen;
use chess_puzzler::{EngineError, Evaluation, Evaluator};
use shakmaty::Chess;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};
use tracing::debug;

/// What one `go` search reported before `bestmove`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResult {
    /// Centipawn score (side to move)
    pub cp: Option<i32>,
    /// Mate in N moves (positive = side to move mates)
    pub mate: Option<i32>,
    /// Principal variation of the last reported line
    pub pv: Vec<String>,
    /// Best move in UCI notation
    pub best_move: String,
}

/// Stockfish engine instance
pub struct StockfishEngine {
    process: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
}

impl StockfishEngine {
    /// Spawn a new Stockfish process and initialize UCI
    pub async fn new(path: &str, hash_mb: u32) -> Result<Self, EngineError> {
        let mut process = Command::new(path)
            .stdin(std::process::Stdio::piped())
            .stdout(std::process::Stdio::piped())
            .stderr(std::process::Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| EngineError::Spawn {
                path: path.to_string(),
                source,
            })?;

        let stdin = process
            .stdin
            .take()
            .ok_or_else(|| EngineError::Protocol("engine stdin not captured".into()))?;
        let stdout = process
            .stdout
            .take()
            .ok_or_else(|| EngineError::Protocol("engine stdout not captured".into()))?;

        let mut engine = Self {
            process,
            stdin,
            stdout: BufReader::new(stdout),
        };

        // Initialize UCI
        engine.send("uci").await?;
        engine.wait_for("uciok").await?;

        engine.send("setoption name Threads value 1").await?;
        engine
            .send(&format!("setoption name Hash value {hash_mb}"))
            .await?;
        engine.send("isready").await?;
        engine.wait_for("readyok").await?;

        Ok(engine)
    }

    /// Send a command to Stockfish
    async fn send(&mut self, cmd: &str) -> Result<(), EngineError> {
        debug!(cmd, "SF <");
        self.stdin.write_all(format!("{cmd}\n").as_bytes()).await?;
        self.stdin.flush().await?;
        Ok(())
    }

    /// Read one trimmed line; end of output means the process is gone.
    async fn read_line(&mut self, line: &mut String) -> Result<(), EngineError> {
        line.clear();
        if self.stdout.read_line(line).await? == 0 {
            return Err(EngineError::Closed);
        }
        let trimmed_len = line.trim_end().len();
        line.truncate(trimmed_len);
        Ok(())
    }

    /// Wait for a specific response line
    async fn wait_for(&mut self, expected: &str) -> Result<(), EngineError> {
        let mut line = String::new();
        loop {
            self.read_line(&mut line).await?;
            debug!(line = line.trim(), "SF >");
            if line.trim() == expected {
                return Ok(());
            }
        }
    }

    /// Search a position for a fixed time and collect the final report
    pub async fn search(
        &mut self,
        position: &Chess,
        budget: Duration,
    ) -> Result<SearchResult, EngineError> {
        let movetime = budget.as_millis().max(1);
        self.send(&format!("position fen {}", to_fen(position)))
            .await?;
        self.send(&format!("go movetime {movetime}")).await?;

        let mut result = SearchResult::default();
        let mut line = String::new();
        loop {
            self.read_line(&mut line).await?;
            let trimmed = line.trim();

            if trimmed.starts_with("info") && trimmed.contains(" pv ") {
                if let Some(cp) = parse_cp(trimmed) {
                    result.cp = Some(cp);
                    result.mate = None;
                }
                if let Some(mate) = parse_mate(trimmed) {
                    result.mate = Some(mate);
                    result.cp = None;
                }
                result.pv = parse_pv(trimmed);
            } else if trimmed.starts_with("bestmove") {
                result.best_move = parse_bestmove(trimmed).ok_or_else(|| {
                    EngineError::Protocol(format!("malformed bestmove line: {trimmed}"))
                })?;
                break;
            }
        }

        Ok(result)
    }

    /// Send quit command and wait for process to exit
    pub async fn quit(&mut self) {
        let _ = self.send("quit").await;
        let _ = self.process.wait().await;
    }

    #[cfg(test)]
    pub(crate) fn has_exited(&mut self) -> bool {
        matches!(self.process.try_wait(), Ok(Some(_)))
    }
}

impl Evaluator for StockfishEngine {
    async fn score(
        &mut self,
        position: &Chess,
        budget: Duration,
    ) -> Result<Evaluation, EngineError> {
        let result = self.search(position, budget).await?;
        match (result.mate, result.cp) {
            (Some(mate), _) => Ok(Evaluation::Mate(mate)),
            (None, Some(cp)) => Ok(Evaluation::Centipawns(cp)),
            (None, None) => Err(EngineError::Protocol(
                "search finished without a score".into(),
            )),
        }
    }

    async fn principal_variation(
        &mut self,
        position: &Chess,
        budget: Duration,
    ) -> Result<Vec<String>, EngineError> {
        let result = self.search(position, budget).await?;
        if !result.pv.is_empty() {
            return Ok(result.pv);
        }
        if result.best_move == "(none)" {
            return Ok(Vec::new());
        }
        Ok(vec![result.best_move])
    }
}

impl Drop for StockfishEngine {
    fn drop(&mut self) {
        // Best-effort synchronous kill in drop
        let _ = self.process.start_kill();
    }
}

/// Parse centipawn score from info line
fn parse_cp(line: &str) -> Option<i32> {
    parse_after(line, "cp")
}

/// Parse mate score from info line
fn parse_mate(line: &str) -> Option<i32> {
    parse_after(line, "mate")
}

fn parse_after(line: &str, key: &str) -> Option<i32> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    for (i, part) in parts.iter().enumerate() {
        if *part == key && i + 1 < parts.len() {
            return parts[i + 1].parse().ok();
        }
    }
    None
}

/// Parse PV moves from info line
fn parse_pv(line: &str) -> Vec<String> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let mut in_pv = false;
    let mut moves = Vec::new();

    for part in parts {
        if part == "pv" {
            in_pv = true;
            continue;
        }
        if in_pv {
            // PV ends at next keyword or end of line
            if part.starts_with("bmc") || part == "string" {
                break;
            }
            moves.push(part.to_string());
        }
    }

    moves
}

fn parse_bestmove(line: &str) -> Option<String> {
    line.split_whitespace().nth(1).map(str::to_string)
}
