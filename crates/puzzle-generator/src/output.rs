//! Catalog file writer

use std::path::Path;

use chess_puzzler::{catalog_to_json, Puzzle};
use tracing::info;

use crate::error::GeneratorError;

/// Write `catalog` to `path`, replacing whatever was there.
pub fn write_catalog(path: &Path, catalog: &[Puzzle]) -> Result<(), GeneratorError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, catalog_to_json(catalog)?)?;
    info!(path = %path.display(), puzzles = catalog.len(), "Puzzle catalog written");
    Ok(())
}
