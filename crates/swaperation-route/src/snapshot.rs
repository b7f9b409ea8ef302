//! Per-step read model.

use serde::{Deserialize, Serialize};

use crate::mapping::Mapping;
use crate::session::{PendingGate, RoutingSession, Stage};

/// Everything a front end needs to draw one step of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub stage: Stage,
    pub current_gate_index: usize,
    pub current_mapping: Mapping,
    pub initial_mapping: Mapping,
    pub num_swaps: u32,
    pub gates_remaining: usize,
    pub best_score: Option<u32>,
    pub pending_gate: Option<PendingGate>,
    pub gate_ready: bool,
}

impl RoutingSession {
    /// Capture the current state.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            stage: self.stage(),
            current_gate_index: self.current_gate_index(),
            current_mapping: self.current_mapping().clone(),
            initial_mapping: self.initial_mapping().clone(),
            num_swaps: self.num_swaps(),
            gates_remaining: self.gates_remaining(),
            best_score: self.best_score(),
            pending_gate: self.pending_gate(),
            gate_ready: self.is_gate_ready(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use swaperation_ir::{Architecture, Circuit, Gate};

    use super::*;

    #[test]
    fn test_snapshot_json() {
        let circuit = Circuit::with_gates("snap", 3, [Gate::cx(1, 2)]).unwrap();
        let arch = Architecture::from_edges([(0, 1), (0, 2)]).unwrap();
        let session = RoutingSession::new(Arc::new(circuit), Arc::new(arch)).unwrap();

        let snap = session.snapshot();
        assert_eq!(snap.stage, Stage::Placement);
        assert!(!snap.gate_ready);
        assert_eq!(
            snap.pending_gate,
            Some(PendingGate {
                index: 0,
                logical: (1, 2),
                physical: (1, 2),
                ready: false,
            })
        );

        let json = serde_json::to_value(&snap).unwrap();
        assert_eq!(json["stage"], "placement");
        assert_eq!(json["current_mapping"], serde_json::json!([0, 1, 2]));

        let back: SessionSnapshot = serde_json::from_value(json).unwrap();
        assert_eq!(back, snap);
    }
}
