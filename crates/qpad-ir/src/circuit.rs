//! Circuit model and gate decomposition.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{IrError, IrResult};
use crate::instruction::GateInstruction;
use crate::qubit::{ClbitId, QubitId};

/// An ordered list of primitive instructions over fixed-size registers.
///
/// Only X, H, RX and CX (plus measurement and identity) are stored. Named
/// gates such as Z, S or T are expanded into these primitives on append, so
/// the resulting amplitudes, including global phase, are fixed by the
/// decomposition rules below rather than by the executor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircuitModel {
    num_qubits: u32,
    num_clbits: u32,
    instructions: Vec<GateInstruction>,
}

impl CircuitModel {
    /// Create an empty circuit with the given register sizes.
    pub fn new(num_qubits: u32, num_clbits: u32) -> IrResult<Self> {
        if num_qubits == 0 {
            return Err(IrError::NoQubits);
        }
        Ok(Self {
            num_qubits,
            num_clbits,
            instructions: Vec::new(),
        })
    }

    // =========================================================================
    // Primitives
    // =========================================================================

    /// Apply Pauli-X gate.
    pub fn x(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(GateInstruction::X { qubit })
    }

    /// Apply Hadamard gate.
    pub fn h(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(GateInstruction::H { qubit })
    }

    /// Apply Rx rotation gate.
    pub fn rx(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(GateInstruction::Rx { theta, qubit })
    }

    /// Apply CNOT (CX) gate.
    pub fn cx(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.push(GateInstruction::Cx { control, target })
    }

    /// Measure a qubit to a classical bit.
    pub fn measure(&mut self, qubit: QubitId, clbit: ClbitId) -> IrResult<&mut Self> {
        self.push(GateInstruction::Measure { qubit, clbit })
    }

    /// Apply the identity.
    pub fn id(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(GateInstruction::Id { qubit })
    }

    // =========================================================================
    // Decomposed gates
    // =========================================================================

    /// Apply Rz rotation gate as `H; RX(theta); H`.
    pub fn rz(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.check_qubit(qubit, "rz")?;
        self.h(qubit)?.rx(theta, qubit)?.h(qubit)
    }

    /// Apply Ry rotation gate as `RX(pi/2); RZ(theta); RX(-pi/2)`.
    pub fn ry(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.check_qubit(qubit, "ry")?;
        self.rx(PI / 2.0, qubit)?
            .rz(theta, qubit)?
            .rx(-PI / 2.0, qubit)
    }

    /// Apply Pauli-Z gate as `RZ(pi)`.
    pub fn z(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.rz(PI, qubit)
    }

    /// Apply Pauli-Y gate as `RZ(pi); X`.
    pub fn y(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.rz(PI, qubit)?.x(qubit)
    }

    /// Apply S gate as `RZ(pi/2)`.
    pub fn s(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.rz(PI / 2.0, qubit)
    }

    /// Apply S-dagger gate as `RZ(-pi/2)`.
    pub fn sdg(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.rz(-PI / 2.0, qubit)
    }

    /// Apply T gate as `RZ(pi/4)`.
    pub fn t(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.rz(PI / 4.0, qubit)
    }

    /// Apply T-dagger gate as `RZ(-pi/4)`.
    pub fn tdg(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.rz(-PI / 4.0, qubit)
    }

    /// Measure qubit `i` into classical bit `i` for every index both registers share.
    pub fn measure_all(&mut self) -> IrResult<&mut Self> {
        for i in 0..self.num_qubits.min(self.num_clbits) {
            self.measure(QubitId(i), ClbitId(i))?;
        }
        Ok(self)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits as usize
    }

    /// Get the number of classical bits.
    pub fn num_clbits(&self) -> usize {
        self.num_clbits as usize
    }

    /// Instructions in execution order.
    pub fn instructions(&self) -> &[GateInstruction] {
        &self.instructions
    }

    /// Number of primitive instructions.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Whether the circuit holds no instructions.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Number of measurement instructions.
    pub fn num_measurements(&self) -> usize {
        self.instructions.iter().filter(|i| i.is_measure()).count()
    }

    // =========================================================================
    // Pre-built circuits
    // =========================================================================

    /// Create a Bell state circuit with both qubits measured.
    pub fn bell() -> IrResult<Self> {
        let mut circuit = Self::new(2, 2)?;
        circuit
            .h(QubitId(0))?
            .cx(QubitId(0), QubitId(1))?
            .measure_all()?;
        Ok(circuit)
    }

    /// Create an `n`-qubit GHZ state circuit with every qubit measured.
    pub fn ghz(n: u32) -> IrResult<Self> {
        let mut circuit = Self::new(n, n)?;
        circuit.h(QubitId(0))?;
        for i in 0..n - 1 {
            circuit.cx(QubitId(i), QubitId(i + 1))?;
        }
        circuit.measure_all()?;
        Ok(circuit)
    }

    // =========================================================================
    // Validation
    // =========================================================================

    fn push(&mut self, instruction: GateInstruction) -> IrResult<&mut Self> {
        let name = instruction.name();
        for qubit in instruction.qubits() {
            self.check_qubit(qubit, name)?;
        }
        match instruction {
            GateInstruction::Cx { control, target } if control == target => {
                return Err(IrError::DuplicateQubit {
                    qubit: control,
                    gate_name: name,
                });
            }
            GateInstruction::Measure { clbit, .. } if clbit.0 >= self.num_clbits => {
                return Err(IrError::ClbitOutOfRange {
                    clbit,
                    num_clbits: self.num_clbits,
                });
            }
            _ => {}
        }
        trace!(?instruction, "append");
        self.instructions.push(instruction);
        Ok(self)
    }

    fn check_qubit(&self, qubit: QubitId, gate_name: &'static str) -> IrResult<()> {
        if qubit.0 >= self.num_qubits {
            return Err(IrError::QubitOutOfRange {
                qubit,
                num_qubits: self.num_qubits,
                gate_name,
            });
        }
        Ok(())
    }
}
