//! Log filter setup.

use tracing_subscriber::EnvFilter;

/// Build the log filter from `RUST_LOG`-style directives.
///
/// Missing or unparseable directives fall back to `info`.
pub fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}
