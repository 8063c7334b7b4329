//! Qpad Circuit Model
//!
//! This crate holds the circuit representation consumed by the qpad
//! statevector simulator. A [`CircuitModel`] is a pair of register sizes and
//! an ordered list of [`GateInstruction`]s drawn from a deliberately small
//! primitive basis.
//!
//! # Primitive Basis
//!
//! | Instruction | Qubits | Description |
//! |-------------|--------|-------------|
//! | `X` | 1 | Pauli-X |
//! | `H` | 1 | Hadamard |
//! | `Rx(θ)` | 1 | Rotation about X |
//! | `Cx` | 2 | Controlled-NOT |
//! | `Measure` | 1 | Read-out record (no collapse) |
//! | `Id` | 1 | Identity |
//!
//! # Decomposed Gates
//!
//! | Gate | Expansion |
//! |------|-----------|
//! | `Rz(θ)` | `H; Rx(θ); H` |
//! | `Ry(θ)` | `Rx(π/2); Rz(θ); Rx(-π/2)` |
//! | `Z`, `S`, `Sdg`, `T`, `Tdg` | `Rz(π)`, `Rz(π/2)`, `Rz(-π/2)`, `Rz(π/4)`, `Rz(-π/4)` |
//! | `Y` | `Rz(π); X` |
//!
//! # Example
//!
//! ```rust
//! use qpad_ir::{CircuitModel, ClbitId, QubitId};
//!
//! let mut circuit = CircuitModel::new(2, 2).unwrap();
//! circuit
//!     .h(QubitId(0))
//!     .unwrap()
//!     .cx(QubitId(0), QubitId(1))
//!     .unwrap()
//!     .measure(QubitId(0), ClbitId(0))
//!     .unwrap();
//!
//! assert_eq!(circuit.len(), 3);
//! ```

pub mod circuit;
pub mod error;
pub mod instruction;
pub mod qubit;

pub use circuit::CircuitModel;
pub use error::{IrError, IrResult};
pub use instruction::GateInstruction;
pub use qubit::{ClbitId, QubitId};
