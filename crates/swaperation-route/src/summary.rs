//! Records produced when a session finishes.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use swaperation_ir::{Architecture, Circuit};

use crate::mapping::Mapping;

/// Summary of one finished routing run.
///
/// This is the `details_*.json` record the verifier consumes: the mappings
/// are logical-to-physical arrays over the architecture's qubits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutingSummary {
    /// Logical qubits of the original circuit.
    pub num_circuit_qubits: u32,
    /// Physical qubits of the architecture.
    pub num_arc_qubits: u32,
    /// Architecture edge list.
    pub architecture: Architecture,
    /// Mapping frozen at the end of placement.
    pub initial_mapping: Mapping,
    /// Mapping after the last committed gate.
    pub final_mapping: Mapping,
    /// Routing-stage swaps.
    pub num_swaps: u32,
}

/// Original circuit, routed circuit and summary of a finished session.
#[derive(Debug, Clone)]
pub struct RoutingOutcome {
    pub original: Arc<Circuit>,
    pub routed: Circuit,
    pub summary: RoutingSummary,
}
