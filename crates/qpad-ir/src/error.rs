//! Error types for the IR crate.

use crate::qubit::{ClbitId, QubitId};
use thiserror::Error;

/// Errors that can occur while building a circuit model.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// An instruction references a qubit beyond the declared register.
    #[error("Qubit {qubit} out of range for circuit with {num_qubits} qubits (gate: {gate_name})")]
    QubitOutOfRange {
        /// The offending qubit.
        qubit: QubitId,
        /// Number of qubits declared by the circuit.
        num_qubits: u32,
        /// Name of the instruction being appended.
        gate_name: &'static str,
    },

    /// A measurement targets a classical bit beyond the declared register.
    #[error("Classical bit {clbit} out of range for circuit with {num_clbits} classical bits")]
    ClbitOutOfRange {
        /// The offending classical bit.
        clbit: ClbitId,
        /// Number of classical bits declared by the circuit.
        num_clbits: u32,
    },

    /// A two-qubit gate was given the same qubit twice.
    #[error("Duplicate qubit {qubit} in operation (gate: {gate_name})")]
    DuplicateQubit {
        /// The duplicated qubit.
        qubit: QubitId,
        /// Name of the instruction being appended.
        gate_name: &'static str,
    },

    /// A circuit must hold at least one qubit.
    #[error("Circuit must have at least one qubit")]
    NoQubits,
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
