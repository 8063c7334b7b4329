//! Grid instruction source.
//!
//! A grid is a rectangular array of integer cell codes indexed
//! `[wire][time_step]`. Each wire is one qubit; columns are scanned left to
//! right and, within a column, wires top to bottom.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use qpad_ir::{CircuitModel, QubitId};

use crate::error::{SourceError, SourceResult};
use crate::keyword::GateKeyword;

/// Caller-owned grid contents, one row per qubit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CircuitGridState {
    cells: Vec<Vec<i32>>,
}

impl CircuitGridState {
    /// Wrap a row-major array of cell codes.
    pub fn new(cells: Vec<Vec<i32>>) -> Self {
        Self { cells }
    }

    /// A grid of `wires` rows and `steps` columns filled with `code`.
    pub fn filled(wires: usize, steps: usize, code: i32) -> Self {
        Self {
            cells: vec![vec![code; steps]; wires],
        }
    }

    /// Number of wires (qubits).
    pub fn num_wires(&self) -> usize {
        self.cells.len()
    }

    /// Number of time steps, taken from the first row.
    pub fn num_steps(&self) -> usize {
        self.cells.first().map_or(0, Vec::len)
    }

    /// Cell code at `(wire, step)`.
    pub fn get(&self, wire: usize, step: usize) -> Option<i32> {
        self.cells.get(wire)?.get(step).copied()
    }

    /// Overwrite the cell at `(wire, step)`. Out-of-bounds writes are ignored.
    pub fn set(&mut self, wire: usize, step: usize, code: i32) {
        if let Some(cell) = self.cells.get_mut(wire).and_then(|row| row.get_mut(step)) {
            *cell = code;
        }
    }

    /// Raw rows.
    pub fn rows(&self) -> &[Vec<i32>] {
        &self.cells
    }

    fn validate(&self) -> SourceResult<()> {
        let expected = self.num_steps();
        if self.cells.is_empty() {
            return Err(SourceError::EmptyGrid);
        }
        for (row, cells) in self.cells.iter().enumerate() {
            if cells.len() != expected {
                return Err(SourceError::RaggedGrid {
                    row,
                    expected,
                    got: cells.len(),
                });
            }
        }
        Ok(())
    }
}

/// Lookup from grid cell codes to gates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellCodeTable {
    /// Code of an empty cell.
    pub empty: i32,
    /// Code for each gate.
    pub gates: FxHashMap<i32, GateKeyword>,
}

impl CellCodeTable {
    /// Look up the gate for `code`. Empty and unknown codes yield `None`.
    pub fn lookup(&self, code: i32) -> Option<GateKeyword> {
        if code == self.empty {
            return None;
        }
        self.gates.get(&code).copied()
    }
}

impl Default for CellCodeTable {
    /// `0` is empty; `1..=7` map to h, x, z, s, sdg, t, tdg.
    fn default() -> Self {
        let gates = GateKeyword::ALL
            .into_iter()
            .zip(1..)
            .map(|(keyword, code)| (code, keyword))
            .collect();
        Self { empty: 0, gates }
    }
}

/// Build a circuit from a grid.
///
/// The circuit has one qubit and one classical bit per wire. When every
/// cell is empty a single identity on qubit 0 is emitted so consumers always
/// see at least one instruction.
#[instrument(skip_all, fields(wires = grid.num_wires(), steps = grid.num_steps()))]
pub fn build_from_grid(grid: &CircuitGridState, table: &CellCodeTable) -> SourceResult<CircuitModel> {
    grid.validate()?;
    let wires = grid.num_wires() as u32;
    let mut circuit = CircuitModel::new(wires, wires)?;

    for step in 0..grid.num_steps() {
        for (wire, row) in grid.rows().iter().enumerate() {
            let code = row[step];
            match table.lookup(code) {
                Some(keyword) => keyword.apply(&mut circuit, QubitId(wire as u32))?,
                None if code != table.empty => {
                    debug!(wire, step, code, "skipping unknown cell code");
                }
                None => {}
            }
        }
    }

    if circuit.is_empty() {
        circuit.id(QubitId(0))?;
    }
    debug!(instructions = circuit.len(), "grid circuit built");
    Ok(circuit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use qpad_ir::GateInstruction;

    #[test]
    fn test_default_table() {
        let table = CellCodeTable::default();
        assert_eq!(table.lookup(0), None);
        assert_eq!(table.lookup(1), Some(GateKeyword::H));
        assert_eq!(table.lookup(2), Some(GateKeyword::X));
        assert_eq!(table.lookup(7), Some(GateKeyword::Tdg));
        assert_eq!(table.lookup(8), None);
    }

    #[test]
    fn test_empty_grid_fallback() {
        let grid = CircuitGridState::filled(4, 8, 0);
        let circuit = build_from_grid(&grid, &CellCodeTable::default()).unwrap();
        assert_eq!(circuit.num_qubits(), 4);
        assert_eq!(
            circuit.instructions(),
            &[GateInstruction::Id { qubit: QubitId(0) }]
        );
    }

    #[test]
    fn test_column_major_scan() {
        // wire 0: H . X
        // wire 1: X H .
        let grid = CircuitGridState::new(vec![vec![1, 0, 2], vec![2, 1, 0]]);
        let circuit = build_from_grid(&grid, &CellCodeTable::default()).unwrap();
        assert_eq!(
            circuit.instructions(),
            &[
                GateInstruction::H { qubit: QubitId(0) },
                GateInstruction::X { qubit: QubitId(1) },
                GateInstruction::H { qubit: QubitId(1) },
                GateInstruction::X { qubit: QubitId(0) },
            ]
        );
    }

    #[test]
    fn test_unknown_codes_skipped() {
        let grid = CircuitGridState::new(vec![vec![42, -1]]);
        let circuit = build_from_grid(&grid, &CellCodeTable::default()).unwrap();
        assert_eq!(circuit.len(), 1);
        assert!(matches!(circuit.instructions()[0], GateInstruction::Id { .. }));
    }

    #[test]
    fn test_no_rows_rejected() {
        let grid = CircuitGridState::new(vec![]);
        assert!(matches!(
            build_from_grid(&grid, &CellCodeTable::default()),
            Err(SourceError::EmptyGrid)
        ));
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let grid = CircuitGridState::new(vec![vec![0, 0], vec![0]]);
        assert!(matches!(
            build_from_grid(&grid, &CellCodeTable::default()),
            Err(SourceError::RaggedGrid {
                row: 1,
                expected: 2,
                got: 1
            })
        ));
    }

    #[test]
    fn test_custom_table() {
        let mut gates = FxHashMap::default();
        gates.insert(9, GateKeyword::Z);
        let table = CellCodeTable { empty: -1, gates };
        let grid = CircuitGridState::new(vec![vec![-1, 9]]);
        let circuit = build_from_grid(&grid, &table).unwrap();
        assert_eq!(circuit.len(), 3);
    }

    #[test]
    fn test_grid_state_accessors() {
        let mut grid = CircuitGridState::filled(2, 3, 0);
        grid.set(1, 2, 5);
        grid.set(9, 9, 5);
        assert_eq!(grid.get(1, 2), Some(5));
        assert_eq!(grid.get(2, 0), None);
        assert_eq!(grid.num_wires(), 2);
        assert_eq!(grid.num_steps(), 3);
    }

    #[test]
    fn test_grid_deserializes_from_json() {
        let grid: CircuitGridState = serde_json::from_str("[[1, 0], [0, 2]]").unwrap();
        assert_eq!(grid.num_wires(), 2);
        assert_eq!(grid.get(1, 1), Some(2));
    }
}
