//! Statevector simulation engine.

use num_complex::Complex64;
use tracing::trace;

use qpad_ir::{CircuitModel, GateInstruction, QubitId};

use crate::measurement::MeasurementMap;

/// Largest register the engine will allocate; 2^30 amplitudes take 16 GiB.
pub const MAX_QUBITS: u32 = 30;

/// A statevector representing a quantum state.
#[derive(Debug, Clone, PartialEq)]
pub struct Statevector {
    /// The state amplitudes (2^n complex numbers).
    amplitudes: Vec<Complex64>,
    /// Number of qubits.
    num_qubits: usize,
}

/// Final state of one circuit execution.
#[derive(Debug, Clone)]
pub struct Execution {
    /// Amplitudes after the last instruction.
    pub statevector: Statevector,
    /// Clbit to qubit assignments recorded by measure instructions.
    pub measurements: MeasurementMap,
}

/// Run every instruction of `circuit`, in order, on a fresh |0...0⟩ state.
pub fn execute(circuit: &CircuitModel) -> Execution {
    let mut statevector = Statevector::new(circuit.num_qubits());
    let mut measurements = MeasurementMap::new(circuit.num_clbits());
    for instruction in circuit.instructions() {
        statevector.apply(instruction, &mut measurements);
    }
    Execution {
        statevector,
        measurements,
    }
}

impl Statevector {
    /// Create a new statevector initialized to |0...0⟩.
    ///
    /// Callers keep `num_qubits` at or below [`MAX_QUBITS`].
    pub fn new(num_qubits: usize) -> Self {
        let size = 1 << num_qubits;
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); size];
        amplitudes[0] = Complex64::new(1.0, 0.0);
        Self {
            amplitudes,
            num_qubits,
        }
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// The amplitudes, indexed by basis state with qubit 0 as the lowest bit.
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// Consume the statevector and return its amplitudes.
    pub fn into_amplitudes(self) -> Vec<Complex64> {
        self.amplitudes
    }

    /// |amplitude|² for each basis state.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(|a| a.norm_sqr()).collect()
    }

    /// Sum of squared magnitudes; 1 up to rounding for any reachable state.
    pub fn norm_sqr(&self) -> f64 {
        self.amplitudes.iter().map(|a| a.norm_sqr()).sum()
    }

    /// Apply an instruction to the statevector.
    ///
    /// Measurements leave the amplitudes untouched and are only recorded in
    /// `measurements`.
    pub fn apply(&mut self, instruction: &GateInstruction, measurements: &mut MeasurementMap) {
        trace!(?instruction, "apply");
        match *instruction {
            GateInstruction::X { qubit } => self.apply_x(qubit),
            GateInstruction::H { qubit } => self.apply_h(qubit),
            GateInstruction::Rx { theta, qubit } => self.apply_rx(qubit, theta),
            GateInstruction::Cx { control, target } => self.apply_cx(control, target),
            GateInstruction::Measure { qubit, clbit } => measurements.record(clbit, qubit),
            GateInstruction::Id { .. } => {}
        }
    }

    // =========================================================================
    // Single-qubit gate implementations
    // =========================================================================

    /// Visit each pair of basis indices that differ only in bit `qubit`,
    /// low index first.
    fn for_each_pair(&mut self, qubit: QubitId, mut f: impl FnMut(&mut [Complex64], usize, usize)) {
        let bit = qubit.index();
        let stride = 1 << bit;
        for upper in 0..(1 << (self.num_qubits - bit - 1)) {
            let base = upper << (bit + 1);
            for lower in 0..stride {
                let a = base | lower;
                f(&mut self.amplitudes[..], a, a | stride);
            }
        }
    }

    fn apply_x(&mut self, qubit: QubitId) {
        self.for_each_pair(qubit, |amps, a, b| amps.swap(a, b));
    }

    fn apply_h(&mut self, qubit: QubitId) {
        let r2 = 1.0 / 2.0_f64.sqrt();
        self.for_each_pair(qubit, |amps, a, b| {
            let x = amps[a];
            let y = amps[b];
            amps[a] = Complex64::new((x.re + y.re) * r2, (x.im + y.im) * r2);
            amps[b] = Complex64::new((x.re - y.re) * r2, (x.im - y.im) * r2);
        });
    }

    fn apply_rx(&mut self, qubit: QubitId, theta: f64) {
        let c = (theta / 2.0).cos();
        let s = (theta / 2.0).sin();
        self.for_each_pair(qubit, |amps, a, b| {
            let x = amps[a];
            let y = amps[b];
            amps[a] = Complex64::new(x.re * c + y.im * s, x.im * c - y.re * s);
            amps[b] = Complex64::new(y.re * c + x.im * s, y.im * c - x.re * s);
        });
    }

    // =========================================================================
    // Two-qubit gate implementations
    // =========================================================================

    /// Swap amplitudes of every control-set pair, enumerating the index
    /// space as three free bit ranges around the two fixed bits.
    fn apply_cx(&mut self, control: QubitId, target: QubitId) {
        let (control, target) = (control.index(), target.index());
        let low = control.min(target);
        let high = control.max(target);
        let ctrl_mask = 1 << control;
        let tgt_mask = 1 << target;

        for top in 0..(1 << (self.num_qubits - high - 1)) {
            for mid in 0..(1 << (high - low - 1)) {
                for bottom in 0..(1 << low) {
                    let i = bottom | (mid << (low + 1)) | (top << (high + 1)) | ctrl_mask;
                    self.amplitudes.swap(i, i | tgt_mask);
                }
            }
        }
    }
}
