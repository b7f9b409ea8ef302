//! The routing state machine.
//!
//! A [`RoutingSession`] replays an original circuit onto physical qubits one
//! two-qubit gate at a time. The driver chooses swaps; the session decides
//! whether each request is legal, keeps the logical-to-physical mapping,
//! counts the cost, and emits the routed circuit.
//!
//! ```text
//!   Placement ──advance()──▶ Routing ──advance() on last gate──▶ Done
//!      │  ▲                    │  ▲
//!      └──┘ swap(): free       └──┘ swap(): edge only, 3 CX, +1 swap
//! ```
//!
//! Every rejected request leaves the session exactly as it was.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use swaperation_ir::{Architecture, Circuit, Gate, QubitId};
use tracing::{debug, info, instrument, warn};

use crate::error::{RouteError, RouteResult};
use crate::mapping::Mapping;
use crate::summary::{RoutingOutcome, RoutingSummary};

/// Lifecycle stage of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    /// Choosing the initial layout; swaps are free relabelings.
    Placement,
    /// Executing gates; swaps must follow architecture edges and cost 3 CX.
    Routing,
    /// Every gate committed; no further mutation.
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Placement => write!(f, "placement"),
            Stage::Routing => write!(f, "routing"),
            Stage::Done => write!(f, "done"),
        }
    }
}

/// What an accepted `swap` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapOutcome {
    /// Placement-stage relabeling; nothing emitted, no cost.
    Relabeled,
    /// Routing-stage SWAP emitted as three CX gates.
    Inserted,
}

/// What an accepted `advance` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdvanceOutcome {
    /// Two-qubit gates committed, including same-pair followers.
    pub committed: usize,
    /// Single-qubit gates flushed to the routed circuit.
    pub flushed: usize,
    /// Stage after the call.
    pub stage: Stage,
}

/// The next two-qubit gate waiting to be committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingGate {
    /// Index in the original circuit.
    pub index: usize,
    /// Logical `(control, target)`.
    pub logical: (u32, u32),
    /// Physical `(control, target)` under the current mapping.
    pub physical: (u32, u32),
    /// Whether the physical pair is an architecture edge.
    pub ready: bool,
}

/// Interactive routing of one circuit onto one architecture.
#[derive(Debug, Clone)]
pub struct RoutingSession {
    circuit: Arc<Circuit>,
    architecture: Arc<Architecture>,
    stage: Stage,
    current_gate_index: usize,
    num_swaps: u32,
    initial_mapping: Mapping,
    current_mapping: Mapping,
    routed: Circuit,
    best_score: Option<u32>,
}

impl RoutingSession {
    /// Start a session in the Placement stage with identity mappings.
    ///
    /// Fails if the architecture has fewer physical qubits than the circuit
    /// has logical ones.
    pub fn new(circuit: Arc<Circuit>, architecture: Arc<Architecture>) -> RouteResult<Self> {
        let physical = architecture.num_qubits();
        let logical = circuit.num_qubits();
        if physical < logical {
            return Err(RouteError::Configuration { physical, logical });
        }
        if !architecture.is_connected() {
            warn!(
                components = architecture.num_components(),
                "Architecture is disconnected; some gates may be unroutable"
            );
        }
        info!(
            circuit = circuit.name(),
            logical,
            physical,
            two_qubit_gates = circuit.two_qubit_count(),
            "Starting routing session"
        );
        Ok(Self::fresh(circuit, architecture, None))
    }

    fn fresh(circuit: Arc<Circuit>, architecture: Arc<Architecture>, best_score: Option<u32>) -> Self {
        let n = architecture.num_qubits();
        let routed = Circuit::new(format!("{}_routed", circuit.name()), n);
        Self {
            circuit,
            architecture,
            stage: Stage::Placement,
            current_gate_index: 0,
            num_swaps: 0,
            initial_mapping: Mapping::identity(n),
            current_mapping: Mapping::identity(n),
            routed,
            best_score,
        }
    }

    /// Get the current stage.
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Index of the next original gate not yet committed.
    pub fn current_gate_index(&self) -> usize {
        self.current_gate_index
    }

    /// Routing-stage swaps accepted so far.
    pub fn num_swaps(&self) -> u32 {
        self.num_swaps
    }

    /// Lowest swap count of any finished play-through before the last restart.
    pub fn best_score(&self) -> Option<u32> {
        self.best_score
    }

    /// Mapping at the start of the Routing stage.
    pub fn initial_mapping(&self) -> &Mapping {
        &self.initial_mapping
    }

    /// Mapping right now.
    pub fn current_mapping(&self) -> &Mapping {
        &self.current_mapping
    }

    /// Routed circuit emitted so far.
    pub fn routed_circuit(&self) -> &Circuit {
        &self.routed
    }

    /// The circuit being routed.
    pub fn original_circuit(&self) -> &Arc<Circuit> {
        &self.circuit
    }

    /// The target architecture.
    pub fn architecture(&self) -> &Arc<Architecture> {
        &self.architecture
    }

    /// Whether the session reached Done.
    pub fn is_done(&self) -> bool {
        self.stage == Stage::Done
    }

    /// The next two-qubit gate, if any remain.
    pub fn pending_gate(&self) -> Option<PendingGate> {
        if self.stage == Stage::Done {
            return None;
        }
        let index = self.circuit.next_two_qubit_index(self.current_gate_index)?;
        let (control, target) = self.circuit.gates()[index].pair()?;
        let physical = (
            self.current_mapping.map_qubit(control).0,
            self.current_mapping.map_qubit(target).0,
        );
        Some(PendingGate {
            index,
            logical: (control.0, target.0),
            physical,
            ready: self.architecture.is_edge(physical.0, physical.1),
        })
    }

    /// Whether `advance` would succeed without a swap first.
    pub fn is_gate_ready(&self) -> bool {
        match self.stage {
            Stage::Done => false,
            _ => self.pending_gate().is_none_or(|p| p.ready),
        }
    }

    /// Exchange the logical qubits on physical `x` and `y`.
    ///
    /// In Placement this is a free relabeling of both the initial and the
    /// current mapping. In Routing `(x, y)` must be an architecture edge;
    /// the swap is emitted as `CX(x,y) CX(y,x) CX(x,y)` and counted.
    pub fn swap(&mut self, x: u32, y: u32) -> RouteResult<SwapOutcome> {
        if self.stage == Stage::Done {
            return Err(RouteError::SessionFinished);
        }
        let n = self.architecture.num_qubits();
        for q in [x, y] {
            if q >= n {
                warn!(qubit = q, num_qubits = n, "Rejected swap: qubit out of range");
                return Err(RouteError::QubitOutOfRange {
                    qubit: q,
                    num_qubits: n,
                });
            }
        }

        match self.stage {
            Stage::Placement => {
                self.current_mapping.swap_physical(x, y)?;
                self.initial_mapping = self.current_mapping.clone();
                debug!(x, y, mapping = ?self.current_mapping.as_slice(), "Relabeled placement");
                Ok(SwapOutcome::Relabeled)
            }
            Stage::Routing => {
                if !self.architecture.is_edge(x, y) {
                    warn!(x, y, "Rejected swap: not an architecture edge");
                    return Err(RouteError::InvalidSwapRequest { x, y });
                }
                let (px, py) = (QubitId(x), QubitId(y));
                self.routed.cx(px, py)?.cx(py, px)?.cx(px, py)?;
                self.current_mapping.swap_physical(x, y)?;
                self.num_swaps += 1;
                debug!(x, y, num_swaps = self.num_swaps, "Inserted swap");
                Ok(SwapOutcome::Inserted)
            }
            Stage::Done => Err(RouteError::SessionFinished),
        }
    }

    /// Commit the pending two-qubit gate and the single-qubit gates after it.
    ///
    /// From Placement this first flushes the single-qubit prefix and enters
    /// Routing. Following two-qubit gates on the same logical pair are
    /// committed in the same call. Fails with
    /// [`RouteError::GateNotRoutable`] and no state change if the pending
    /// gate's physical operands are not adjacent.
    #[instrument(level = "debug", skip(self), fields(stage = %self.stage, index = self.current_gate_index))]
    pub fn advance(&mut self) -> RouteResult<AdvanceOutcome> {
        if self.stage == Stage::Done {
            return Err(RouteError::SessionFinished);
        }

        let Some(pending) = self.pending_gate() else {
            // No two-qubit gates left: everything remaining is single-qubit.
            let flushed = self.flush_until(self.circuit.len())?;
            self.finish_routing();
            return Ok(AdvanceOutcome {
                committed: 0,
                flushed,
                stage: self.stage,
            });
        };

        if !pending.ready {
            warn!(
                index = pending.index,
                logical = ?pending.logical,
                physical = ?pending.physical,
                "Rejected advance: gate not routable"
            );
            return Err(RouteError::GateNotRoutable {
                index: pending.index,
                logical: pending.logical,
                physical: pending.physical,
            });
        }

        let mut flushed = self.flush_until(pending.index)?;
        if self.stage == Stage::Placement {
            self.stage = Stage::Routing;
            debug!(mapping = ?self.initial_mapping.as_slice(), "Placement frozen");
        }

        let pair = pending.logical;
        let mut index = pending.index;
        let mut committed = 0;
        loop {
            let gate = self.circuit.gates()[index];
            self.commit(&gate)?;
            committed += 1;
            self.current_gate_index = index + 1;

            match self.circuit.next_two_qubit_index(self.current_gate_index) {
                None => {
                    flushed += self.flush_until(self.circuit.len())?;
                    self.finish_routing();
                    break;
                }
                Some(next) => {
                    flushed += self.flush_until(next)?;
                    let same_pair = self.circuit.gates()[next]
                        .pair()
                        .is_some_and(|(c, t)| same_logical_pair((c.0, t.0), pair));
                    if !same_pair {
                        break;
                    }
                    index = next;
                }
            }
        }

        debug!(committed, flushed, stage = %self.stage, "Advanced");
        Ok(AdvanceOutcome {
            committed,
            flushed,
            stage: self.stage,
        })
    }

    /// Start over with the same circuit and architecture.
    ///
    /// A finished play-through updates the best score; an unfinished one
    /// leaves it unchanged.
    pub fn restart(&mut self) {
        let best_score = match (self.stage, self.best_score) {
            (Stage::Done, Some(best)) => Some(best.min(self.num_swaps)),
            (Stage::Done, None) => Some(self.num_swaps),
            (_, best) => best,
        };
        info!(
            num_swaps = self.num_swaps,
            finished = self.stage == Stage::Done,
            ?best_score,
            "Restarting routing session"
        );
        *self = Self::fresh(
            Arc::clone(&self.circuit),
            Arc::clone(&self.architecture),
            best_score,
        );
    }

    /// Session summary record. Meaningful at any stage; final once Done.
    pub fn summary(&self) -> RoutingSummary {
        RoutingSummary {
            num_circuit_qubits: self.circuit.num_qubits(),
            num_arc_qubits: self.architecture.num_qubits(),
            architecture: (*self.architecture).clone(),
            initial_mapping: self.initial_mapping.clone(),
            final_mapping: self.current_mapping.clone(),
            num_swaps: self.num_swaps,
        }
    }

    /// Hand over the original circuit, routed circuit and summary.
    pub fn finish(&self) -> RouteResult<RoutingOutcome> {
        if self.stage != Stage::Done {
            return Err(RouteError::NotFinished(self.stage));
        }
        Ok(RoutingOutcome {
            original: Arc::clone(&self.circuit),
            routed: self.routed.clone(),
            summary: self.summary(),
        })
    }

    fn commit(&mut self, gate: &Gate) -> RouteResult<()> {
        let mapping = &self.current_mapping;
        self.routed.push(gate.remap(|q| mapping.map_qubit(q)))?;
        Ok(())
    }

    /// Commit every single-qubit gate from the current index up to `end`.
    fn flush_until(&mut self, end: usize) -> RouteResult<usize> {
        let start = self.current_gate_index;
        for index in start..end {
            let gate = self.circuit.gates()[index];
            self.commit(&gate)?;
        }
        self.current_gate_index = end;
        Ok(end - start)
    }

    fn finish_routing(&mut self) {
        self.stage = Stage::Done;
        info!(
            num_swaps = self.num_swaps,
            routed_gates = self.routed.len(),
            final_mapping = ?self.current_mapping.as_slice(),
            "Routing complete"
        );
    }
}

fn same_logical_pair(a: (u32, u32), b: (u32, u32)) -> bool {
    a == b || (a.0 == b.1 && a.1 == b.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(gates: Vec<Gate>, logical: u32, edges: &[(u32, u32)]) -> RoutingSession {
        let circuit = Circuit::with_gates("test", logical, gates).unwrap();
        let arch = Architecture::from_edges(edges.iter().copied()).unwrap();
        RoutingSession::new(Arc::new(circuit), Arc::new(arch)).unwrap()
    }

    fn h(q: u32) -> Gate {
        Gate::single(
            swaperation_ir::SingleQubitOp::U2 {
                phi: 0.0,
                lambda: std::f64::consts::PI,
            },
            q,
        )
    }

    #[test]
    fn test_configuration_error() {
        let circuit = Circuit::new("wide", 4);
        let arch = Architecture::linear(3).unwrap();
        let err = RoutingSession::new(Arc::new(circuit), Arc::new(arch)).unwrap_err();
        assert!(matches!(err, RouteError::Configuration { physical: 3, logical: 4 }));
    }

    #[test]
    fn test_placement_swap_is_free_and_unconstrained() {
        let mut s = session(vec![Gate::cx(0, 1)], 2, &[(0, 1), (1, 2)]);
        assert_eq!(s.swap(0, 2).unwrap(), SwapOutcome::Relabeled);
        assert_eq!(s.num_swaps(), 0);
        assert!(s.routed_circuit().is_empty());
        assert_eq!(s.initial_mapping().as_slice(), &[2, 1, 0]);
        assert_eq!(s.current_mapping(), s.initial_mapping());
    }

    #[test]
    fn test_single_qubit_prefix_flushed_with_placement_mapping() {
        let mut s = session(vec![h(0), Gate::cx(0, 1)], 2, &[(0, 1), (1, 2)]);
        s.swap(0, 2).unwrap();
        s.swap(1, 2).unwrap();
        // logical 0 -> 1, logical 1 -> 2
        assert_eq!(s.current_mapping().as_slice(), &[1, 2, 0]);
        let out = s.advance().unwrap();
        assert_eq!(out.flushed, 1);
        assert_eq!(out.committed, 1);
        assert_eq!(out.stage, Stage::Done);
        assert_eq!(s.routed_circuit().gates()[0], h(1));
        assert_eq!(s.routed_circuit().gates()[1], Gate::cx(1, 2));
    }

    #[test]
    fn test_advance_not_routable_leaves_placement() {
        let mut s = session(vec![h(2), Gate::cx(1, 2)], 3, &[(0, 1), (0, 2)]);
        let err = s.advance().unwrap_err();
        assert!(matches!(err, RouteError::GateNotRoutable { index: 1, .. }));
        assert_eq!(s.stage(), Stage::Placement);
        assert!(s.routed_circuit().is_empty());
        assert_eq!(s.current_gate_index(), 0);
    }

    #[test]
    fn test_routing_swap_emits_three_cx() {
        let mut s = session(
            vec![Gate::cx(0, 1), Gate::cx(1, 2)],
            3,
            &[(0, 1), (0, 2)],
        );
        s.advance().unwrap();
        assert_eq!(s.stage(), Stage::Routing);
        assert_eq!(s.swap(0, 2).unwrap(), SwapOutcome::Inserted);
        let tail: Vec<_> = s.routed_circuit().gates()[1..]
            .iter()
            .filter_map(Gate::pair)
            .map(|(c, t)| (c.0, t.0))
            .collect();
        assert_eq!(tail, vec![(0, 2), (2, 0), (0, 2)]);
        assert_eq!(s.num_swaps(), 1);
    }

    #[test]
    fn test_same_pair_run_commits_together() {
        let mut s = session(
            vec![Gate::cx(0, 1), h(0), Gate::cx(1, 0), Gate::cx(0, 1), Gate::cx(1, 2)],
            3,
            &[(0, 1), (1, 2)],
        );
        let out = s.advance().unwrap();
        assert_eq!(out.committed, 3);
        assert_eq!(out.flushed, 1);
        assert_eq!(s.current_gate_index(), 4);
        assert_eq!(s.pending_gate().map(|p| p.logical), Some((1, 2)));
    }

    #[test]
    fn test_zero_two_qubit_gates() {
        let mut s = session(vec![h(0), h(1)], 2, &[(0, 1)]);
        assert!(s.is_gate_ready());
        let out = s.advance().unwrap();
        assert_eq!(out, AdvanceOutcome { committed: 0, flushed: 2, stage: Stage::Done });
        assert!(matches!(s.advance(), Err(RouteError::SessionFinished)));
        assert!(matches!(s.swap(0, 1), Err(RouteError::SessionFinished)));
    }

    #[test]
    fn test_restart_tracks_best_score() {
        let mut s = session(
            vec![Gate::cx(0, 1), Gate::cx(1, 2)],
            3,
            &[(0, 1), (0, 2)],
        );
        s.restart();
        assert_eq!(s.best_score(), None);

        s.advance().unwrap();
        s.swap(0, 1).unwrap();
        s.swap(0, 1).unwrap();
        s.swap(0, 2).unwrap();
        s.advance().unwrap();
        assert!(s.is_done());
        s.restart();
        assert_eq!(s.best_score(), Some(3));
        assert_eq!(s.stage(), Stage::Placement);
        assert_eq!(s.num_swaps(), 0);

        s.advance().unwrap();
        s.swap(0, 2).unwrap();
        s.advance().unwrap();
        s.restart();
        assert_eq!(s.best_score(), Some(1));

        // unfinished play-through keeps the previous best
        s.advance().unwrap();
        s.restart();
        assert_eq!(s.best_score(), Some(1));
    }

    #[test]
    fn test_finish_requires_done() {
        let s = session(vec![Gate::cx(0, 1)], 2, &[(0, 1)]);
        assert!(matches!(s.finish(), Err(RouteError::NotFinished(Stage::Placement))));
    }
}
