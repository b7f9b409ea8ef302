//! Property-based tests for the routing state machine.

use std::sync::Arc;

use proptest::prelude::*;
use swaperation_ir::{Architecture, RandomCircuitConfig, random_circuit};
use swaperation_route::{
    Mapping, RouteError, RoutingSession, Stage, apply_swap, compose, perm_diff, route_greedily,
};

fn arb_architecture() -> impl Strategy<Value = Architecture> {
    prop_oneof![
        (2u32..7).prop_map(|n| Architecture::linear(n).unwrap()),
        (3u32..7).prop_map(|n| Architecture::star(n).unwrap()),
        (2u32..4, 2u32..4).prop_map(|(r, c)| Architecture::lattice(r, c).unwrap()),
    ]
}

fn arb_session() -> impl Strategy<Value = RoutingSession> {
    (arb_architecture(), 1u32..4, any::<u64>()).prop_flat_map(|(arch, depth, seed)| {
        (2..=arch.num_qubits()).prop_map(move |qubits| {
            let circuit = random_circuit(&RandomCircuitConfig::new(qubits, depth, seed)).unwrap();
            RoutingSession::new(Arc::new(circuit), Arc::new(arch.clone())).unwrap()
        })
    })
}

fn arb_mapping(n: u32) -> impl Strategy<Value = Mapping> {
    Just((0..n).collect::<Vec<u32>>())
        .prop_shuffle()
        .prop_map(|v| Mapping::from_vec(v).unwrap())
}

proptest! {
    #[test]
    fn swaps_preserve_bijection(
        mut session in arb_session(),
        requests in prop::collection::vec((0u32..8, 0u32..8, any::<bool>()), 0..40),
    ) {
        for (x, y, step) in requests {
            let before = session.snapshot();
            let accepted_routing = session.stage() == Stage::Routing;
            match session.swap(x, y) {
                Ok(_) => {
                    if accepted_routing {
                        prop_assert_eq!(session.num_swaps(), before.num_swaps + 1);
                    } else {
                        prop_assert_eq!(session.num_swaps(), before.num_swaps);
                    }
                }
                Err(_) => prop_assert_eq!(session.snapshot(), before),
            }
            prop_assert!(session.current_mapping().is_bijection());
            if step {
                let before = session.snapshot();
                if session.advance().is_err() {
                    prop_assert_eq!(session.snapshot(), before);
                }
            }
        }
    }

    #[test]
    fn greedy_routing_is_adjacent_and_complete(mut session in arb_session()) {
        let total = session.original_circuit().two_qubit_count();
        let swaps = route_greedily(&mut session).unwrap();
        prop_assert!(session.is_done());
        prop_assert_eq!(session.gates_remaining(), 0);

        let arch = Arc::clone(session.architecture());
        let routed = session.routed_circuit();
        for gate in routed.gates() {
            if let Some((a, b)) = gate.pair() {
                prop_assert!(arch.is_edge(a.0, b.0));
            }
        }
        prop_assert_eq!(routed.two_qubit_count(), total + 3 * swaps as usize);
        prop_assert_eq!(routed.len(), session.original_circuit().len() + 3 * swaps as usize);
        prop_assert!(matches!(session.advance(), Err(RouteError::SessionFinished)));
    }

    #[test]
    fn apply_swap_matches_in_place(
        m in (2u32..8).prop_flat_map(arb_mapping),
        x in 0u32..8,
        y in 0u32..8,
    ) {
        let n = m.len() as u32;
        let (x, y) = (x % n, y % n);
        let mut in_place = m.clone();
        in_place.swap_physical(x, y).unwrap();
        prop_assert_eq!(apply_swap(&m, x, y).unwrap(), in_place);
    }

    #[test]
    fn inverse_and_diff_laws(
        (a, b) in (2u32..8).prop_flat_map(|n| (arb_mapping(n), arb_mapping(n))),
    ) {
        let n = a.len() as u32;
        prop_assert_eq!(compose(&a, &a.inverse()).unwrap(), Mapping::identity(n));
        let diff = perm_diff(&a, &b).unwrap();
        // initial[diff[i]] == final[i]
        prop_assert_eq!(compose(&a, &diff).unwrap(), b);
    }
}
