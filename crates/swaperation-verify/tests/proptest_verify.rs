//! End-to-end: routed random circuits verify; tampered runs do not.

use std::sync::Arc;

use proptest::prelude::*;
use swaperation_ir::{Architecture, Circuit, Gate, RandomCircuitConfig, random_circuit};
use swaperation_route::{Mapping, RoutingSession, route_greedily};
use swaperation_verify::{Tolerance, VerifyError, verify};

fn arb_architecture() -> impl Strategy<Value = Architecture> {
    prop_oneof![
        (2u32..6).prop_map(|n| Architecture::linear(n).unwrap()),
        (3u32..6).prop_map(|n| Architecture::star(n).unwrap()),
        Just(Architecture::lattice(2, 3).unwrap()),
        Just(
            Architecture::from_edges([(0, 1), (1, 2), (1, 3), (3, 4), (4, 0)]).unwrap()
        ),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn greedy_routes_verify(
        arch in arb_architecture(),
        qubits_offset in 0u32..4,
        depth in 1u32..5,
        seed in any::<u64>(),
        placement in prop::collection::vec((0u32..6, 0u32..6), 0..6),
    ) {
        let n = arch.num_qubits();
        let qubits = (2 + qubits_offset).min(n);
        let circuit = random_circuit(&RandomCircuitConfig::new(qubits, depth, seed)).unwrap();
        let mut session = RoutingSession::new(Arc::new(circuit), Arc::new(arch)).unwrap();
        for (x, y) in placement {
            session.swap(x % n, y % n).unwrap();
        }
        route_greedily(&mut session).unwrap();

        let outcome = session.finish().unwrap();
        let report = verify(&outcome.summary, &outcome.original, &outcome.routed, Tolerance::default())
            .unwrap();
        prop_assert!(report.is_ok(), "{}", report);
        prop_assert_eq!(report.compliance.checked, outcome.routed.two_qubit_count());
    }
}

fn finished_scenario() -> swaperation_route::RoutingOutcome {
    let circuit = Circuit::with_gates("scenario", 3, [Gate::cx(0, 1), Gate::cx(1, 2)]).unwrap();
    let arch = Architecture::from_edges([(0, 1), (0, 2)]).unwrap();
    let mut session = RoutingSession::new(Arc::new(circuit), Arc::new(arch)).unwrap();
    session.advance().unwrap();
    session.swap(0, 2).unwrap();
    session.advance().unwrap();
    session.finish().unwrap()
}

#[test]
fn test_scenario_verifies() {
    let outcome = finished_scenario();
    let report = verify(&outcome.summary, &outcome.original, &outcome.routed, Tolerance::default())
        .unwrap()
        .ensure()
        .unwrap();
    assert_eq!(report.compliance.checked, 5);
}

#[test]
fn test_wrong_final_mapping_fails() {
    let mut outcome = finished_scenario();
    outcome.summary.final_mapping = Mapping::identity(3);
    let report = verify(&outcome.summary, &outcome.original, &outcome.routed, Tolerance::default())
        .unwrap();
    assert!(!report.equivalence.is_equivalent());
    assert!(report.compliance.is_compliant());
    assert!(matches!(report.ensure(), Err(VerifyError::VerificationFailure(_))));
}

#[test]
fn test_foreign_architecture_fails_compliance() {
    let mut outcome = finished_scenario();
    outcome.summary.architecture = Architecture::linear(3).unwrap();
    let report = verify(&outcome.summary, &outcome.original, &outcome.routed, Tolerance::default())
        .unwrap();
    assert!(report.equivalence.is_equivalent());
    let violation = report.compliance.violation.unwrap();
    assert_eq!(violation.index, 1);
    assert_eq!(violation.pair, (0, 2));
}

#[test]
fn test_shape_mismatch() {
    let mut outcome = finished_scenario();
    outcome.summary.num_arc_qubits = 4;
    assert!(matches!(
        verify(&outcome.summary, &outcome.original, &outcome.routed, Tolerance::default()),
        Err(VerifyError::ShapeMismatch(_))
    ));
}
