//! Reduction of an executed circuit to an observable output.

use std::fmt;
use std::str::FromStr;

use num_complex::Complex64;
use rand::Rng;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use qpad_ir::{CircuitModel, QubitId};

use crate::error::{SimError, SimResult};
use crate::statevector::{MAX_QUBITS, execute};

/// What [`simulate`] should return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// Raw final amplitudes.
    Statevector,
    /// Histogram of sampled classical bit strings.
    Counts,
    /// Per-qubit flag telling whether the qubit ends in a measurement.
    Memory,
}

impl OutputMode {
    /// Lowercase name of the mode.
    pub fn as_str(self) -> &'static str {
        match self {
            OutputMode::Statevector => "statevector",
            OutputMode::Counts => "counts",
            OutputMode::Memory => "memory",
        }
    }

    /// Whether the mode reads measurement results.
    pub fn needs_measurement(self) -> bool {
        !matches!(self, OutputMode::Statevector)
    }
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputMode {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "statevector" => Ok(OutputMode::Statevector),
            "counts" => Ok(OutputMode::Counts),
            "memory" => Ok(OutputMode::Memory),
            other => Err(SimError::UnknownMode(other.to_string())),
        }
    }
}

/// Measurement counts from sampling.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Counts {
    counts: FxHashMap<String, u64>,
}

impl Counts {
    /// Create empty counts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `n` occurrences of `bitstring`.
    pub fn insert(&mut self, bitstring: impl Into<String>, n: u64) {
        *self.counts.entry(bitstring.into()).or_insert(0) += n;
    }

    /// Occurrences of `bitstring`, zero if never seen.
    pub fn get(&self, bitstring: &str) -> u64 {
        self.counts.get(bitstring).copied().unwrap_or(0)
    }

    /// Total number of recorded shots.
    pub fn total_shots(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Number of distinct bit strings.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Entries ordered by descending count, ties broken by bit string.
    pub fn sorted(&self) -> Vec<(&String, &u64)> {
        let mut entries: Vec<_> = self.counts.iter().collect();
        entries.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
        entries
    }

    /// Iterate over `(bitstring, count)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &u64)> {
        self.counts.iter()
    }
}

/// Result of a simulation, shaped by the requested [`OutputMode`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", content = "data", rename_all = "lowercase")]
pub enum SimulationOutput {
    /// Final amplitudes, serialised as `[re, im]` pairs.
    Statevector(Vec<Complex64>),
    /// Sampled histogram.
    Counts(Counts),
    /// Measurement-presence flag per qubit.
    Memory(Vec<bool>),
}

impl SimulationOutput {
    /// The mode this output answers.
    pub fn mode(&self) -> OutputMode {
        match self {
            SimulationOutput::Statevector(_) => OutputMode::Statevector,
            SimulationOutput::Counts(_) => OutputMode::Counts,
            SimulationOutput::Memory(_) => OutputMode::Memory,
        }
    }
}

/// Simulate `circuit` using the thread-local random source for sampling.
pub fn simulate(circuit: &CircuitModel, shots: u32, mode: OutputMode) -> SimResult<SimulationOutput> {
    simulate_with_rng(circuit, shots, mode, &mut rand::thread_rng())
}

/// Simulate `circuit`, drawing shot samples from `rng`.
///
/// `shots` is ignored in statevector mode. Counts and memory modes first
/// check that every qubit is measured and that none is used afterwards.
///
/// # Errors
///
/// [`SimError::CircuitTooLarge`] when the circuit has more than
/// [`MAX_QUBITS`] qubits. In counts and memory modes,
/// [`SimError::MeasurementOrder`] when a measured qubit is reused and
/// [`SimError::UnmeasuredQubit`] when a qubit is never measured.
#[instrument(skip(circuit, rng), fields(qubits = circuit.num_qubits(), instructions = circuit.len()))]
pub fn simulate_with_rng<R: Rng + ?Sized>(
    circuit: &CircuitModel,
    shots: u32,
    mode: OutputMode,
    rng: &mut R,
) -> SimResult<SimulationOutput> {
    if circuit.num_qubits() > MAX_QUBITS as usize {
        return Err(SimError::CircuitTooLarge {
            num_qubits: circuit.num_qubits(),
            max_qubits: MAX_QUBITS,
        });
    }

    let presence = if mode.needs_measurement() {
        Some(measurement_presence(circuit)?)
    } else {
        None
    };

    let execution = execute(circuit);

    let output = match (mode, presence) {
        (OutputMode::Memory, Some(presence)) => SimulationOutput::Memory(presence),
        (OutputMode::Counts, Some(_)) => {
            let probabilities = execution.statevector.probabilities();
            let mut counts = Counts::new();
            for shot in 0..shots {
                let outcome = sample_outcome(&probabilities, rng);
                counts.insert(execution.measurements.bitstring(outcome), 1);
                if shot > 0 && shot % 1000 == 0 {
                    debug!("Completed {} shots", shot);
                }
            }
            SimulationOutput::Counts(counts)
        }
        _ => SimulationOutput::Statevector(execution.statevector.into_amplitudes()),
    };

    debug!(mode = %output.mode(), "simulation complete");
    Ok(output)
}

/// Per qubit, whether its last touching instruction is a measurement.
///
/// The instruction list is scanned once per qubit in declaration order. A
/// vector is only returned when every qubit passes, so on success it is all
/// `true`.
///
/// # Errors
///
/// [`SimError::MeasurementOrder`] if a measured qubit is later touched by
/// any other instruction; [`SimError::UnmeasuredQubit`] for the first qubit
/// that is never measured.
pub fn measurement_presence(circuit: &CircuitModel) -> SimResult<Vec<bool>> {
    let mut presence = Vec::with_capacity(circuit.num_qubits());
    for q in 0..circuit.num_qubits() as u32 {
        let qubit = QubitId(q);
        let mut measured = false;
        for (position, instruction) in circuit.instructions().iter().enumerate() {
            if !instruction.touches(qubit) {
                continue;
            }
            if instruction.is_measure() {
                measured = true;
            } else if measured {
                return Err(SimError::MeasurementOrder {
                    qubit,
                    position,
                    instruction: instruction.name(),
                });
            }
        }
        if !measured {
            return Err(SimError::UnmeasuredQubit { qubit });
        }
        presence.push(measured);
    }

    Ok(presence)
}

/// Draw one basis index from `probabilities` by a cumulative walk.
///
/// The first index whose running sum exceeds the uniform draw wins. If
/// rounding leaves the draw above the final sum, the last index with
/// non-zero probability is returned.
pub fn sample_outcome<R: Rng + ?Sized>(probabilities: &[f64], rng: &mut R) -> usize {
    let r: f64 = rng.r#gen();

    let mut cumulative = 0.0;
    for (i, p) in probabilities.iter().enumerate() {
        cumulative += p;
        if r < cumulative {
            return i;
        }
    }

    probabilities
        .iter()
        .rposition(|&p| p > 0.0)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use qpad_ir::ClbitId;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_mode_parsing() {
        assert_eq!("counts".parse::<OutputMode>().unwrap(), OutputMode::Counts);
        assert_eq!(
            "statevector".parse::<OutputMode>().unwrap(),
            OutputMode::Statevector
        );
        assert_eq!("memory".parse::<OutputMode>().unwrap(), OutputMode::Memory);
        assert!(matches!(
            "histogram".parse::<OutputMode>(),
            Err(SimError::UnknownMode(_))
        ));
    }

    #[test]
    fn test_counts_accumulate() {
        let mut counts = Counts::new();
        counts.insert("01", 1);
        counts.insert("01", 2);
        counts.insert("11", 1);
        assert_eq!(counts.get("01"), 3);
        assert_eq!(counts.get("10"), 0);
        assert_eq!(counts.total_shots(), 4);
        let sorted = counts.sorted();
        assert_eq!(sorted[0], (&"01".to_string(), &3));
    }

    #[test]
    fn test_sample_deterministic() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            assert_eq!(sample_outcome(&[0.0, 0.0, 1.0, 0.0], &mut rng), 2);
        }
    }

    #[test]
    fn test_sample_rounding_fallback() {
        // Sum below any draw: falls back to the last non-zero bucket.
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(sample_outcome(&[0.0, 1e-300, 0.0], &mut rng), 1);
    }

    #[test]
    fn test_presence_rejects_unmeasured_qubit() {
        let mut circuit = CircuitModel::new(3, 3).unwrap();
        circuit
            .h(QubitId(0))
            .unwrap()
            .measure(QubitId(0), ClbitId(0))
            .unwrap()
            .measure(QubitId(2), ClbitId(2))
            .unwrap();
        assert!(matches!(
            measurement_presence(&circuit),
            Err(SimError::UnmeasuredQubit { qubit: QubitId(1) })
        ));
    }

    #[test]
    fn test_presence_all_measured() {
        let circuit = CircuitModel::ghz(3).unwrap();
        assert_eq!(measurement_presence(&circuit).unwrap(), vec![true; 3]);
    }

    #[test]
    fn test_presence_rejects_gate_after_measure() {
        let mut circuit = CircuitModel::new(2, 2).unwrap();
        circuit
            .measure(QubitId(1), ClbitId(1))
            .unwrap()
            .cx(QubitId(0), QubitId(1))
            .unwrap();
        let err = measurement_presence(&circuit).unwrap_err();
        assert!(matches!(
            err,
            SimError::MeasurementOrder {
                qubit: QubitId(1),
                position: 1,
                instruction: "cx"
            }
        ));
    }

    #[test]
    fn test_presence_allows_repeated_measure() {
        let mut circuit = CircuitModel::new(1, 2).unwrap();
        circuit
            .measure(QubitId(0), ClbitId(0))
            .unwrap()
            .measure(QubitId(0), ClbitId(1))
            .unwrap();
        assert_eq!(measurement_presence(&circuit).unwrap(), vec![true]);
    }

    #[test]
    fn test_presence_requires_a_measurement() {
        let mut circuit = CircuitModel::new(1, 1).unwrap();
        circuit.h(QubitId(0)).unwrap();
        assert!(matches!(
            measurement_presence(&circuit),
            Err(SimError::UnmeasuredQubit { qubit: QubitId(0) })
        ));
    }

    #[test]
    fn test_oversized_circuit_rejected_before_allocation() {
        let circuit = CircuitModel::new(64, 0).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(
            simulate_with_rng(&circuit, 0, OutputMode::Statevector, &mut rng),
            Err(SimError::CircuitTooLarge {
                num_qubits: 64,
                max_qubits: MAX_QUBITS
            })
        ));
    }

    #[test]
    fn test_output_serialization() {
        let output = SimulationOutput::Memory(vec![true, false]);
        let json = serde_json::to_string(&output).unwrap();
        assert_eq!(json, r#"{"mode":"memory","data":[true,false]}"#);

        let output = SimulationOutput::Statevector(vec![Complex64::new(1.0, 0.0)]);
        let json = serde_json::to_string(&output).unwrap();
        assert_eq!(json, r#"{"mode":"statevector","data":[[1.0,0.0]]}"#);
    }
}
