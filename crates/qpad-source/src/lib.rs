//! Instruction sources for qpad circuits.
//!
//! Two front ends produce the same [`CircuitModel`](qpad_ir::CircuitModel):
//!
//! - [`parse_text`] reads a `;`-separated program of `qreg`, `creg` and
//!   single-qubit gate statements. Unrecognised statements are skipped and
//!   parsing never fails; `None` means no qubits were declared.
//! - [`build_from_grid`] scans a [`CircuitGridState`] column by column,
//!   translating cell codes through a [`CellCodeTable`].
//!
//! # Example: Text
//!
//! ```rust
//! use qpad_source::parse_text;
//!
//! let circuit = parse_text("qreg q[2]; creg c[2]; h q[0]; x q[1];").unwrap();
//! assert_eq!(circuit.num_qubits(), 2);
//! assert_eq!(circuit.len(), 2);
//! ```
//!
//! # Example: Grid
//!
//! ```rust
//! use qpad_source::{CellCodeTable, CircuitGridState, build_from_grid};
//!
//! // wire 0: H then nothing, wire 1: nothing then X
//! let grid = CircuitGridState::new(vec![vec![1, 0], vec![0, 2]]);
//! let circuit = build_from_grid(&grid, &CellCodeTable::default()).unwrap();
//! assert_eq!(circuit.len(), 2);
//! ```

pub mod error;
pub mod grid;
pub mod keyword;
pub mod text;

pub use error::{SourceError, SourceResult};
pub use grid::{CellCodeTable, CircuitGridState, build_from_grid};
pub use keyword::GateKeyword;
pub use text::parse_text;
