//! Gate vocabulary shared by the text and grid sources.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use qpad_ir::{CircuitModel, IrResult, QubitId};

/// A named single-qubit gate that an instruction source may emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GateKeyword {
    /// Hadamard.
    H,
    /// Pauli-X.
    X,
    /// Pauli-Z.
    Z,
    /// S gate.
    S,
    /// S-dagger gate.
    Sdg,
    /// T gate.
    T,
    /// T-dagger gate.
    Tdg,
}

impl GateKeyword {
    /// All keywords in table order.
    pub const ALL: [GateKeyword; 7] = [
        GateKeyword::H,
        GateKeyword::X,
        GateKeyword::Z,
        GateKeyword::S,
        GateKeyword::Sdg,
        GateKeyword::T,
        GateKeyword::Tdg,
    ];

    /// The textual keyword.
    pub fn as_str(self) -> &'static str {
        match self {
            GateKeyword::H => "h",
            GateKeyword::X => "x",
            GateKeyword::Z => "z",
            GateKeyword::S => "s",
            GateKeyword::Sdg => "sdg",
            GateKeyword::T => "t",
            GateKeyword::Tdg => "tdg",
        }
    }

    /// Append this gate, decomposed into primitives, to `circuit`.
    pub fn apply(self, circuit: &mut CircuitModel, qubit: QubitId) -> IrResult<()> {
        match self {
            GateKeyword::H => circuit.h(qubit)?,
            GateKeyword::X => circuit.x(qubit)?,
            GateKeyword::Z => circuit.z(qubit)?,
            GateKeyword::S => circuit.s(qubit)?,
            GateKeyword::Sdg => circuit.sdg(qubit)?,
            GateKeyword::T => circuit.t(qubit)?,
            GateKeyword::Tdg => circuit.tdg(qubit)?,
        };
        Ok(())
    }
}

impl fmt::Display for GateKeyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GateKeyword {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GateKeyword::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_round_trip() {
        for keyword in GateKeyword::ALL {
            assert_eq!(keyword.as_str().parse::<GateKeyword>(), Ok(keyword));
        }
    }

    #[test]
    fn test_keywords_are_case_sensitive() {
        assert!("H".parse::<GateKeyword>().is_err());
        assert!("cx".parse::<GateKeyword>().is_err());
    }

    #[test]
    fn test_apply_expands_phase_gates() {
        let mut circuit = CircuitModel::new(1, 0).unwrap();
        GateKeyword::T.apply(&mut circuit, QubitId(0)).unwrap();
        assert_eq!(circuit.len(), 3);

        let mut circuit = CircuitModel::new(1, 0).unwrap();
        GateKeyword::X.apply(&mut circuit, QubitId(0)).unwrap();
        assert_eq!(circuit.len(), 1);
    }
}
