//! Remaining-work accounting.

use serde::{Deserialize, Serialize};

use crate::session::RoutingSession;

/// Progress counters of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    /// Two-qubit gates in the original circuit.
    pub total_two_qubit_gates: usize,
    /// Original two-qubit gates already committed.
    pub committed_two_qubit_gates: usize,
    /// Routing-stage swaps accepted.
    pub num_swaps: u32,
    /// See [`RoutingSession::gates_remaining`].
    pub gates_remaining: usize,
    /// Best finished score before the last restart.
    pub best_score: Option<u32>,
}

impl RoutingSession {
    /// Two-qubit gates of the original circuit still to be committed,
    /// counted as `total - routed_two_qubit + 3 * num_swaps`.
    ///
    /// Each accepted swap appends three two-qubit gates to the routed
    /// circuit, so the value reaches 0 exactly when the session is Done.
    pub fn gates_remaining(&self) -> usize {
        let total = self.original_circuit().two_qubit_count();
        let routed = self.routed_circuit().two_qubit_count();
        let swap_gates = 3 * self.num_swaps() as usize;
        (total + swap_gates).saturating_sub(routed)
    }

    /// Snapshot of the counters.
    pub fn progress(&self) -> Progress {
        let total = self.original_circuit().two_qubit_count();
        let gates_remaining = self.gates_remaining();
        Progress {
            total_two_qubit_gates: total,
            committed_two_qubit_gates: total - gates_remaining,
            num_swaps: self.num_swaps(),
            gates_remaining,
            best_score: self.best_score(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use swaperation_ir::{Architecture, Circuit, Gate};

    use crate::session::RoutingSession;

    #[test]
    fn test_gates_remaining_counts_down_through_swaps() {
        let circuit =
            Circuit::with_gates("two", 3, [Gate::cx(0, 1), Gate::cx(1, 2)]).unwrap();
        let arch = Architecture::from_edges([(0, 1), (0, 2)]).unwrap();
        let mut s = RoutingSession::new(Arc::new(circuit), Arc::new(arch)).unwrap();

        assert_eq!(s.gates_remaining(), 2);
        s.swap(1, 2).unwrap(); // placement: free
        assert_eq!(s.gates_remaining(), 2);
        s.restart();

        s.advance().unwrap();
        assert_eq!(s.gates_remaining(), 1);
        s.swap(0, 2).unwrap();
        assert_eq!(s.gates_remaining(), 1);
        s.advance().unwrap();
        assert_eq!(s.gates_remaining(), 0);

        let p = s.progress();
        assert_eq!(p.total_two_qubit_gates, 2);
        assert_eq!(p.committed_two_qubit_gates, 2);
        assert_eq!(p.num_swaps, 1);
    }
}
