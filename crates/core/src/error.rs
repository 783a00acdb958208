//! Error types for the smoke-engine core.

use thiserror::Error;

/// Errors produced by simulation operations.
///
/// The taxonomy is narrow because the solver operates on fixed-size
/// preallocated arrays: construction can fail, and the force-injection
/// entry point can be handed an out-of-range cell. Everything else is a
/// defined no-op branch (zero wavenumber, zero-length vectors).
#[derive(Debug, Error)]
pub enum SimError {
    /// Grid side was zero, odd, or overflowed `usize` when allocating.
    ///
    /// The packed half-complex layout assumes an even side, so odd sizes
    /// are rejected at construction rather than mishandled later.
    #[error("invalid dimensions: grid side must be non-zero and even")]
    InvalidDimensions,

    /// A cell index outside `[0, dim)` was passed to `insert_forces`.
    ///
    /// Callers (drag/click handlers) are responsible for pre-clamping.
    #[error("cell ({x}, {y}) out of bounds for grid of side {dim}")]
    CellOutOfBounds { x: usize, y: usize, dim: usize },
}
