//! Error types for the simulator.

use qpad_ir::QubitId;
use thiserror::Error;

/// Errors that abort a simulation run.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SimError {
    /// A qubit is used by a non-measure instruction after it was measured.
    #[error(
        "Qubit {qubit} is used by '{instruction}' at position {position} after being measured"
    )]
    MeasurementOrder {
        /// The offending qubit.
        qubit: QubitId,
        /// Index of the offending instruction in the circuit.
        position: usize,
        /// Name of the offending instruction.
        instruction: &'static str,
    },

    /// A qubit is never measured but counts or memory were requested.
    #[error("Qubit {qubit} is never measured; counts and memory need every qubit measured")]
    UnmeasuredQubit {
        /// The qubit without a measurement.
        qubit: QubitId,
    },

    /// The circuit exceeds the simulator's qubit limit.
    #[error("Circuit has {num_qubits} qubits but simulator only supports {max_qubits}")]
    CircuitTooLarge {
        /// Qubits in the circuit.
        num_qubits: usize,
        /// Configured limit.
        max_qubits: u32,
    },

    /// An output mode string was not recognised.
    #[error("Unknown output mode '{0}' (expected statevector, counts or memory)")]
    UnknownMode(String),

    /// Circuit IR error.
    #[error("Circuit IR error: {0}")]
    Ir(#[from] qpad_ir::IrError),
}

/// Result type for simulation.
pub type SimResult<T> = Result<T, SimError>;
