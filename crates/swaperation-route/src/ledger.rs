//! Remaining two-qubit gate multiplicities per logical pair.
//!
//! Drives the "how much work is left between these two qubits" overlay of
//! a front end; the engine itself never reads it.

use rustc_hash::FxHashMap;
use swaperation_ir::Circuit;

use crate::mapping::Mapping;
use crate::session::RoutingSession;

/// Remaining two-qubit gate count per unordered logical pair.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GateAdjacencyLedger {
    counts: FxHashMap<(u32, u32), usize>,
    next_pair: Option<(u32, u32)>,
}

impl GateAdjacencyLedger {
    /// Count the two-qubit gates of `circuit` from `start` on.
    pub fn from_circuit(circuit: &Circuit, start: usize) -> Self {
        let mut counts: FxHashMap<(u32, u32), usize> = FxHashMap::default();
        let mut next_pair = None;
        for gate in circuit.gates().iter().skip(start) {
            if let Some((a, b)) = gate.pair() {
                let key = ordered(a.0, b.0);
                next_pair.get_or_insert(key);
                *counts.entry(key).or_insert(0) += 1;
            }
        }
        Self { counts, next_pair }
    }

    /// Remaining gates on logical `(a, b)`, in either order.
    pub fn count(&self, a: u32, b: u32) -> usize {
        self.counts.get(&ordered(a, b)).copied().unwrap_or(0)
    }

    /// The pair of the next pending two-qubit gate, smaller index first.
    pub fn next_pair(&self) -> Option<(u32, u32)> {
        self.next_pair
    }

    /// Display weight in `(5, 10)` growing with the remaining count; 0 for
    /// pairs with nothing left.
    pub fn emphasis(&self, a: u32, b: u32) -> f64 {
        match self.count(a, b) {
            0 => 0.0,
            n => 10.0 - 1.0 / (0.2 + 0.1 * (n - 1) as f64),
        }
    }

    /// Pairs with work left, sorted.
    pub fn pairs(&self) -> Vec<((u32, u32), usize)> {
        let mut pairs: Vec<_> = self.counts.iter().map(|(&k, &v)| (k, v)).collect();
        pairs.sort_unstable();
        pairs
    }

    /// The same pairs located on physical qubits under `mapping`.
    pub fn physical_pairs(&self, mapping: &Mapping) -> Vec<((u32, u32), usize)> {
        let mut pairs: Vec<_> = self
            .counts
            .iter()
            .filter_map(|(&(a, b), &n)| {
                let pa = mapping.physical(a)?;
                let pb = mapping.physical(b)?;
                Some((ordered(pa, pb), n))
            })
            .collect();
        pairs.sort_unstable();
        pairs
    }

    /// Total remaining two-qubit gates.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }
}

impl RoutingSession {
    /// Ledger of the two-qubit gates still to be committed.
    pub fn ledger(&self) -> GateAdjacencyLedger {
        GateAdjacencyLedger::from_circuit(self.original_circuit(), self.current_gate_index())
    }
}

fn ordered(a: u32, b: u32) -> (u32, u32) {
    if a <= b { (a, b) } else { (b, a) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swaperation_ir::Gate;

    fn circuit() -> Circuit {
        Circuit::with_gates(
            "ledger",
            3,
            [Gate::cx(1, 0), Gate::cx(0, 1), Gate::cx(2, 1), Gate::cx(0, 1)],
        )
        .unwrap()
    }

    #[test]
    fn test_counts_are_unordered() {
        let ledger = GateAdjacencyLedger::from_circuit(&circuit(), 0);
        assert_eq!(ledger.count(0, 1), 3);
        assert_eq!(ledger.count(1, 0), 3);
        assert_eq!(ledger.count(1, 2), 1);
        assert_eq!(ledger.count(0, 2), 0);
        assert_eq!(ledger.next_pair(), Some((0, 1)));
        assert_eq!(ledger.total(), 4);
        assert_eq!(ledger.pairs(), vec![((0, 1), 3), ((1, 2), 1)]);
    }

    #[test]
    fn test_emphasis_curve() {
        let ledger = GateAdjacencyLedger::from_circuit(&circuit(), 0);
        assert!((ledger.emphasis(1, 2) - 5.0).abs() < 1e-12);
        assert!((ledger.emphasis(0, 1) - (10.0 - 1.0 / 0.4)).abs() < 1e-12);
        assert_eq!(ledger.emphasis(0, 2), 0.0);
    }

    #[test]
    fn test_start_offset_and_physical_pairs() {
        let ledger = GateAdjacencyLedger::from_circuit(&circuit(), 2);
        assert_eq!(ledger.next_pair(), Some((1, 2)));
        let mapping = Mapping::from_vec(vec![2, 0, 1]).unwrap();
        assert_eq!(ledger.physical_pairs(&mapping), vec![((0, 1), 1), ((0, 2), 1)]);
    }
}
