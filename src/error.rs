//! Error types for boundary extraction, fence layering and cell lookups.

use thiserror::Error;

/// Errors raised while building fences or answering cell lookups.
///
/// The geometric core treats every variant except the input/config ones as
/// recoverable: it logs them and returns a partial result instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FenceError {
    /// The grid collaborator could not resolve a cell's boundary.
    #[error("boundary unavailable for cell {cell}: {reason}")]
    BoundaryUnavailable { cell: String, reason: String },

    /// An extracted boundary could not be mapped back to any contributing cell,
    /// even through the proximity fallback.
    #[error("layer {layer} could not be attributed to any remaining cell")]
    Unattributable { layer: usize },

    /// A non-empty remainder yielded no closed boundary loop.
    #[error("no boundary loop could be extracted from {remaining} remaining cells")]
    NoBoundary { remaining: usize },

    /// A directed-edge walk ran out of unused outgoing edges before closing.
    #[error("chain walk dead-ended after {steps} steps")]
    DeadEndChain { steps: usize },

    /// A directed-edge walk hit the safety ceiling.
    #[error("chain walk exceeded {limit} steps")]
    IterationLimitExceeded { limit: usize },

    #[error("invalid coordinate ({lat}, {lng})")]
    InvalidCoordinate { lat: f64, lng: f64 },

    #[error("invalid resolution {0}, expected 0..=15")]
    InvalidResolution(u8),

    #[error("invalid ring size {0}, expected 0..=10")]
    InvalidRing(u32),

    #[error("malformed input: {0}")]
    MalformedInput(String),

    #[error("invalid fence configuration: {0}")]
    InvalidConfig(String),
}

impl FenceError {
    /// True for the errors the geometric core absorbs instead of propagating.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            FenceError::BoundaryUnavailable { .. }
                | FenceError::Unattributable { .. }
                | FenceError::NoBoundary { .. }
                | FenceError::DeadEndChain { .. }
                | FenceError::IterationLimitExceeded { .. }
        )
    }
}
