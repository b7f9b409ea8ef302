//! Shortest-path swap driver.

use tracing::{debug, info};

use crate::error::{RouteError, RouteResult};
use crate::session::RoutingSession;

/// Drive `session` to Done by walking each unreachable gate's control
/// along a shortest path towards its target.
///
/// Simple and greedy: far from optimal, but always terminates on a
/// connected architecture. Returns the number of routing swaps.
pub fn route_greedily(session: &mut RoutingSession) -> RouteResult<u32> {
    let architecture = std::sync::Arc::clone(session.architecture());
    while !session.is_done() {
        if let Some(pending) = session.pending_gate().filter(|p| !p.ready) {
            let (p0, p1) = pending.physical;
            let path = architecture.shortest_path(p0, p1).ok_or(
                RouteError::GateNotRoutable {
                    index: pending.index,
                    logical: pending.logical,
                    physical: pending.physical,
                },
            )?;
            debug!(index = pending.index, ?path, "Routing along path");
            // The last hop is the gate itself.
            for hop in path.windows(2).take(path.len().saturating_sub(2)) {
                session.swap(hop[0], hop[1])?;
            }
        }
        session.advance()?;
    }
    info!(num_swaps = session.num_swaps(), "Greedy routing finished");
    Ok(session.num_swaps())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use swaperation_ir::{Architecture, Circuit, Gate};

    use super::*;

    #[test]
    fn test_linear_chain() {
        let circuit = Circuit::with_gates("far", 5, [Gate::cx(0, 4), Gate::cx(1, 2)]).unwrap();
        let arch = Architecture::linear(5).unwrap();
        let mut s = RoutingSession::new(Arc::new(circuit), Arc::new(arch)).unwrap();
        // first gate is placed for free, so no routing swaps are needed
        let swaps = route_greedily(&mut s).unwrap();
        assert!(s.is_done());
        assert_eq!(s.gates_remaining(), 0);
        assert_eq!(swaps, 0);
    }

    #[test]
    fn test_disconnected_fails() {
        let circuit = Circuit::with_gates("split", 4, [Gate::cx(0, 3)]).unwrap();
        let arch = Architecture::from_edges([(0, 1), (2, 3)]).unwrap();
        let mut s = RoutingSession::new(Arc::new(circuit), Arc::new(arch)).unwrap();
        assert!(matches!(
            route_greedily(&mut s),
            Err(RouteError::GateNotRoutable { index: 0, .. })
        ));
    }
}
