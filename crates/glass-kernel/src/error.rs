//! Error types for Glass kernel operations.

use crate::position::Position;

/// Errors raised by an algorithm while turning a belief into a measurement.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AlgorithmError {
    /// The algorithm reported a failure of its own.
    #[error("algorithm failed: {0}")]
    Failed(String),

    /// A scripted algorithm raised while evaluating.
    #[error("script error: {0}")]
    Script(String),

    /// The algorithm produced something other than a mapping.
    #[error("algorithm returned a {found}, expected a mapping")]
    NonMappingResult { found: String },
}

/// Errors arising from landscape placement or from a run cycle.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LandscapeError {
    /// The position is not on the staggered grid: `(row + col)` is odd.
    #[error("position {position} is not a valid staggered-grid position")]
    InvalidPosition { position: Position },

    /// The position lies outside `[0, rows) × [0, cols)`.
    #[error("position {position} is outside the grid ({rows}×{cols})")]
    OutOfBounds {
        position: Position,
        rows: usize,
        cols: usize,
    },

    /// A node's algorithm failed; the run cycle was aborted at this node.
    #[error("computation failed at {position}: {source}")]
    Computation {
        position: Position,
        #[source]
        source: AlgorithmError,
    },
}

impl LandscapeError {
    /// Whether this is a placement error (parity or bounds).
    pub fn is_placement(&self) -> bool {
        matches!(self, Self::InvalidPosition { .. } | Self::OutOfBounds { .. })
    }
}
