//! Qpad Local Statevector Simulator
//!
//! This crate executes a [`CircuitModel`](qpad_ir::CircuitModel) on a dense
//! statevector and reduces the final state to one of three outputs.
//!
//! # Output modes
//!
//! | Mode | Result | Needs measurement |
//! |------|--------|-------------------|
//! | `statevector` | `2^n` complex amplitudes | No |
//! | `counts` | Histogram of sampled classical bit strings | Yes |
//! | `memory` | Per-qubit "ends in a measurement" flag | Yes |
//!
//! Measurement never collapses the state. A measure instruction only records
//! which qubit feeds which classical bit; counts are then sampled from the
//! final probabilities. For that to be meaningful every qubit must be
//! measured and no qubit may be touched again after it is measured;
//! counts/memory modes reject circuits that break either rule.
//!
//! # Bit ordering
//!
//! Basis index bit `i` is qubit `i`. In count keys classical bit 0 is the
//! rightmost character.
//!
//! # Performance
//!
//! | Qubits | Memory |
//! |--------|--------|
//! | 10 | ~16 KB |
//! | 16 | ~1 MB |
//! | 20 | ~16 MB |
//! | 25 | ~512 MB |
//!
//! # Example
//!
//! ```
//! use qpad_adapter_sim::{OutputMode, SimulationOutput, Simulator};
//! use qpad_ir::CircuitModel;
//!
//! let circuit = CircuitModel::bell()?;
//! let output = Simulator::new().with_seed(7).run(&circuit, 1000, OutputMode::Counts)?;
//!
//! if let SimulationOutput::Counts(counts) = output {
//!     // Expect ~50% |00⟩ and ~50% |11⟩
//!     assert_eq!(counts.get("00") + counts.get("11"), 1000);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod error;
mod measurement;
mod sampler;
mod simulator;
mod statevector;

pub use error::{SimError, SimResult};
pub use measurement::MeasurementMap;
pub use sampler::{
    Counts, OutputMode, SimulationOutput, measurement_presence, sample_outcome, simulate,
    simulate_with_rng,
};
pub use simulator::{DEFAULT_MAX_QUBITS, Simulator};
pub use statevector::{Execution, MAX_QUBITS, Statevector, execute};
