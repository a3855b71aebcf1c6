//! Mate classifier: cheap pre-filter before the solution extractor.

use crate::evaluator::PlyEval;

/// True if any position in the trace was scored as a forced mate.
///
/// Mate direction and distance are ignored; lines for the losing side are
/// rejected later by the parity filter.
pub fn has_forced_mate(trace: &[PlyEval]) -> bool {
    trace.iter().any(PlyEval::is_mate)
}
