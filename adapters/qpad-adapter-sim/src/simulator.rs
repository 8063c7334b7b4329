//! Configured simulator entry point.

use std::time::Instant;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, instrument};

use qpad_ir::CircuitModel;

use crate::error::{SimError, SimResult};
use crate::sampler::{OutputMode, SimulationOutput, simulate_with_rng};

/// Default qubit limit. A 16-qubit statevector is 1 MiB of amplitudes.
pub const DEFAULT_MAX_QUBITS: u32 = 16;

/// Local statevector simulator.
///
/// Wraps [`simulate_with_rng`] with a qubit limit and an optional seed so
/// that repeated runs of the same circuit return identical counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Simulator {
    /// Maximum number of qubits supported.
    max_qubits: u32,
    /// Seed for the shot sampler; `None` draws from the thread RNG.
    seed: Option<u64>,
}

impl Simulator {
    /// Create a new simulator with default settings.
    pub fn new() -> Self {
        Self {
            max_qubits: DEFAULT_MAX_QUBITS,
            seed: None,
        }
    }

    /// Set the qubit limit.
    pub fn with_max_qubits(mut self, max_qubits: u32) -> Self {
        self.max_qubits = max_qubits;
        self
    }

    /// Fix the sampler seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// The configured qubit limit.
    pub fn max_qubits(&self) -> u32 {
        self.max_qubits
    }

    /// The configured seed, if any.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Simulate `circuit` and reduce it according to `mode`.
    ///
    /// # Errors
    ///
    /// [`SimError::CircuitTooLarge`] if the circuit exceeds the qubit limit,
    /// plus anything [`simulate_with_rng`] reports.
    #[instrument(skip(self, circuit))]
    pub fn run(
        &self,
        circuit: &CircuitModel,
        shots: u32,
        mode: OutputMode,
    ) -> SimResult<SimulationOutput> {
        if circuit.num_qubits() > self.max_qubits as usize {
            return Err(SimError::CircuitTooLarge {
                num_qubits: circuit.num_qubits(),
                max_qubits: self.max_qubits,
            });
        }

        let start = Instant::now();
        debug!(
            "Starting simulation: {} qubits, {} shots",
            circuit.num_qubits(),
            shots
        );

        let output = match self.seed {
            Some(seed) => simulate_with_rng(circuit, shots, mode, &mut StdRng::seed_from_u64(seed)),
            None => simulate_with_rng(circuit, shots, mode, &mut rand::thread_rng()),
        }?;

        debug!("Simulation completed in {:?}", start.elapsed());
        Ok(output)
    }
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulator_defaults() {
        let sim = Simulator::default();
        assert_eq!(sim.max_qubits(), 16);
        assert_eq!(sim.seed(), None);
    }

    #[test]
    fn test_simulator_bell_state() {
        let sim = Simulator::new().with_seed(42);
        let circuit = CircuitModel::bell().unwrap();
        let SimulationOutput::Counts(counts) = sim.run(&circuit, 1000, OutputMode::Counts).unwrap()
        else {
            panic!("expected counts");
        };

        assert_eq!(counts.total_shots(), 1000);
        // Bell state should only have |00⟩ and |11⟩
        assert_eq!(counts.get("00") + counts.get("11"), 1000);
        assert!(counts.get("00") > 400);
        assert!(counts.get("11") > 400);
    }

    #[test]
    fn test_simulator_ghz_state() {
        let sim = Simulator::new();
        let circuit = CircuitModel::ghz(3).unwrap();
        let SimulationOutput::Counts(counts) = sim.run(&circuit, 1000, OutputMode::Counts).unwrap()
        else {
            panic!("expected counts");
        };

        // GHZ state should only have |000⟩ and |111⟩
        assert_eq!(counts.get("000") + counts.get("111"), 1000);
    }

    #[test]
    fn test_seed_is_reproducible() {
        let circuit = CircuitModel::ghz(4).unwrap();
        let a = Simulator::new().with_seed(9).run(&circuit, 500, OutputMode::Counts).unwrap();
        let b = Simulator::new().with_seed(9).run(&circuit, 500, OutputMode::Counts).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_circuit_too_large() {
        let sim = Simulator::new().with_max_qubits(2);
        let circuit = CircuitModel::ghz(3).unwrap();
        assert!(matches!(
            sim.run(&circuit, 10, OutputMode::Statevector),
            Err(SimError::CircuitTooLarge {
                num_qubits: 3,
                max_qubits: 2
            })
        ));
    }
}
