//! Primitive instructions understood by the simulator.

use serde::{Deserialize, Serialize};

use crate::qubit::{ClbitId, QubitId};

/// A single primitive instruction.
///
/// Every named gate is lowered onto these variants when it is appended to a
/// [`CircuitModel`](crate::CircuitModel), so executors only ever match on
/// this closed set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum GateInstruction {
    /// Pauli-X (bit flip).
    X {
        /// Target qubit.
        qubit: QubitId,
    },
    /// Rotation around the X axis by `theta` radians.
    Rx {
        /// Rotation angle.
        theta: f64,
        /// Target qubit.
        qubit: QubitId,
    },
    /// Hadamard.
    H {
        /// Target qubit.
        qubit: QubitId,
    },
    /// Controlled-X (CNOT).
    Cx {
        /// Control qubit.
        control: QubitId,
        /// Target qubit.
        target: QubitId,
    },
    /// Record that `qubit` is read out into `clbit`. Does not collapse the state.
    Measure {
        /// Measured qubit.
        qubit: QubitId,
        /// Destination classical bit.
        clbit: ClbitId,
    },
    /// Identity; occupies a qubit without changing the state.
    Id {
        /// Target qubit.
        qubit: QubitId,
    },
}

impl GateInstruction {
    /// Lowercase mnemonic of the instruction.
    pub fn name(&self) -> &'static str {
        match self {
            GateInstruction::X { .. } => "x",
            GateInstruction::Rx { .. } => "rx",
            GateInstruction::H { .. } => "h",
            GateInstruction::Cx { .. } => "cx",
            GateInstruction::Measure { .. } => "measure",
            GateInstruction::Id { .. } => "id",
        }
    }

    /// Check whether this instruction is a measurement.
    pub fn is_measure(&self) -> bool {
        matches!(self, GateInstruction::Measure { .. })
    }

    /// Whether `qubit` is an operand of this instruction.
    pub fn touches(&self, qubit: QubitId) -> bool {
        match *self {
            GateInstruction::Cx { control, target } => control == qubit || target == qubit,
            GateInstruction::X { qubit: q }
            | GateInstruction::Rx { qubit: q, .. }
            | GateInstruction::H { qubit: q }
            | GateInstruction::Measure { qubit: q, .. }
            | GateInstruction::Id { qubit: q } => q == qubit,
        }
    }

    /// Qubit operands in declaration order (control before target).
    pub fn qubits(&self) -> Vec<QubitId> {
        match *self {
            GateInstruction::Cx { control, target } => vec![control, target],
            GateInstruction::X { qubit }
            | GateInstruction::Rx { qubit, .. }
            | GateInstruction::H { qubit }
            | GateInstruction::Measure { qubit, .. }
            | GateInstruction::Id { qubit } => vec![qubit],
        }
    }
}
