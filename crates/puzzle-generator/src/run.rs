//! Run orchestration: download, evaluate, extract, write.

use chess_core::GameRecord;
use chess_puzzler::{generate_puzzles, EngineError, Evaluator, GenerationReport, PipelineConfig};
use futures::future::try_join_all;
use tracing::{error, info};

use crate::chess_com::ChessComClient;
use crate::config::GeneratorConfig;
use crate::error::GeneratorError;
use crate::output::write_catalog;
use crate::stockfish::StockfishEngine;

/// Generate the puzzle catalog for `config.username` and write it to disk.
///
/// Archive failures surface before any engine is started. Engine sessions are
/// always shut down, including when the pipeline fails.
pub async fn run(config: &GeneratorConfig) -> Result<GenerationReport, GeneratorError> {
    config.validate()?;

    let client = ChessComClient::new(config.api_base.as_str())?;
    let games = client
        .fetch_user_games(&config.username, config.max_games)
        .await?;
    info!(username = %config.username, games = games.len(), "Games downloaded");

    let report = if games.is_empty() {
        GenerationReport::default()
    } else {
        let sessions = config.sessions(games.len());
        let mut engines = open_engines(&config.engine_path, config.hash_mb, sessions).await?;
        info!(sessions, engine = %config.engine_path, "Engine sessions ready");

        process_and_release(&mut engines, games, &config.pipeline()).await?
    };

    write_catalog(&config.output, &report.catalog)?;
    info!(
        evaluated = report.evaluated,
        skipped = report.skipped,
        with_mate = report.with_mate,
        puzzles = report.catalog.len(),
        "Run complete"
    );

    Ok(report)
}

/// Start `sessions` engines. If one fails to start, the ones already running
/// are shut down before the error is returned.
async fn open_engines(
    engine_path: &str,
    hash_mb: u32,
    sessions: usize,
) -> Result<Vec<StockfishEngine>, EngineError> {
    let mut engines = Vec::with_capacity(sessions);
    for _ in 0..sessions {
        match StockfishEngine::new(engine_path, hash_mb).await {
            Ok(engine) => engines.push(engine),
            Err(e) => {
                error!(error = %e, "Failed to start engine");
                release(&mut engines).await;
                return Err(e);
            }
        }
    }
    Ok(engines)
}

/// Run the batches, then shut every session down whether or not they succeeded.
pub async fn process_and_release(
    engines: &mut [StockfishEngine],
    games: Vec<GameRecord>,
    pipeline: &PipelineConfig,
) -> Result<GenerationReport, EngineError> {
    let result = process_batches(engines, games, pipeline).await;

    info!("Shutting down engine sessions");
    release(engines).await;

    result
}

async fn release(engines: &mut [StockfishEngine]) {
    for engine in engines {
        engine.quit().await;
    }
}

/// Split `games` into contiguous batches, one per engine session, run them
/// side by side and stitch the reports back together in batch order.
pub async fn process_batches<E: Evaluator>(
    engines: &mut [E],
    games: Vec<GameRecord>,
    pipeline: &PipelineConfig,
) -> Result<GenerationReport, EngineError> {
    let batches = chunk_games(games, engines.len());

    let reports = try_join_all(
        engines
            .iter_mut()
            .zip(batches)
            .map(|(engine, batch)| generate_puzzles(engine, batch, pipeline)),
    )
    .await?;

    let mut merged = GenerationReport::default();
    for report in reports {
        merged.merge(report);
    }
    Ok(merged)
}

fn chunk_games(games: Vec<GameRecord>, sessions: usize) -> Vec<Vec<GameRecord>> {
    let size = games.len().div_ceil(sessions.max(1)).max(1);
    games.chunks(size).map(<[GameRecord]>::to_vec).collect()
}
