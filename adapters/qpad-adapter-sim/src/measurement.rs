//! Classical bit assignments recorded during execution.

use serde::Serialize;

use qpad_ir::{ClbitId, QubitId};

/// Maps each classical bit to the qubit last measured into it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MeasurementMap {
    slots: Vec<Option<QubitId>>,
}

impl MeasurementMap {
    /// An empty map over `num_clbits` classical bits.
    pub fn new(num_clbits: usize) -> Self {
        Self {
            slots: vec![None; num_clbits],
        }
    }

    /// Record that `qubit` is read into `clbit`, replacing any earlier entry.
    pub fn record(&mut self, clbit: ClbitId, qubit: QubitId) {
        if let Some(slot) = self.slots.get_mut(clbit.index()) {
            *slot = Some(qubit);
        }
    }

    /// The qubit assigned to `clbit`, if any.
    pub fn get(&self, clbit: ClbitId) -> Option<QubitId> {
        self.slots.get(clbit.index()).copied().flatten()
    }

    /// Number of classical bits.
    pub fn num_clbits(&self) -> usize {
        self.slots.len()
    }

    /// Whether no classical bit has been assigned.
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Project a basis-state index onto the classical register.
    ///
    /// Classical bit 0 is the rightmost character; unassigned bits are `'0'`.
    pub fn bitstring(&self, outcome: usize) -> String {
        self.slots
            .iter()
            .rev()
            .map(|slot| match slot {
                Some(q) if (outcome >> q.index()) & 1 == 1 => '1',
                _ => '0',
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_writer_wins() {
        let mut map = MeasurementMap::new(2);
        map.record(ClbitId(0), QubitId(0));
        map.record(ClbitId(0), QubitId(3));
        assert_eq!(map.get(ClbitId(0)), Some(QubitId(3)));
        assert_eq!(map.get(ClbitId(1)), None);
    }

    #[test]
    fn test_bitstring_order() {
        let mut map = MeasurementMap::new(3);
        map.record(ClbitId(0), QubitId(0));
        map.record(ClbitId(2), QubitId(1));
        // outcome: q0 = 1, q1 = 0
        assert_eq!(map.bitstring(0b01), "001");
        // outcome: q0 = 0, q1 = 1
        assert_eq!(map.bitstring(0b10), "100");
    }

    #[test]
    fn test_unmapped_bits_render_zero() {
        let map = MeasurementMap::new(2);
        assert!(map.is_empty());
        assert_eq!(map.bitstring(0b11), "00");
    }

    #[test]
    fn test_swapped_assignment() {
        let mut map = MeasurementMap::new(2);
        map.record(ClbitId(0), QubitId(1));
        map.record(ClbitId(1), QubitId(0));
        // q0 = 1, q1 = 0 -> c1 = 1, c0 = 0
        assert_eq!(map.bitstring(0b01), "10");
    }
}
