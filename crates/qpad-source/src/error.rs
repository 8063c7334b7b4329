//! Error types for instruction sources.

use thiserror::Error;

/// Errors that can occur while turning an instruction source into a circuit.
///
/// Malformed textual statements are not errors; they are skipped.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SourceError {
    /// The grid has no rows, so there are no qubits to build on.
    #[error("Grid has no rows")]
    EmptyGrid,

    /// Grid rows differ in length.
    #[error("Grid row {row} has {got} cells, expected {expected}")]
    RaggedGrid {
        /// Index of the offending row.
        row: usize,
        /// Length of the first row.
        expected: usize,
        /// Length of the offending row.
        got: usize,
    },

    /// IR error during circuit construction.
    #[error("Circuit error: {0}")]
    Ir(#[from] qpad_ir::IrError),
}

/// Result type for source operations.
pub type SourceResult<T> = Result<T, SourceError>;
