//! Property-based tests for QASM 2.0 roundtrip conversion.
//!
//! Tests that circuit → QASM → circuit reproduces the normalized circuit
//! exactly, angles included.

use proptest::prelude::*;
use swaperation_ir::{Circuit, Gate, QubitId, SingleQubitOp};
use swaperation_qasm::{emit, parse};

fn arb_angle() -> impl Strategy<Value = f64> {
    prop_oneof![
        -10.0_f64..10.0,
        Just(0.0),
        Just(std::f64::consts::PI),
        -1e-12_f64..1e-12,
        1e12_f64..1e20,
    ]
}

fn arb_op() -> impl Strategy<Value = SingleQubitOp> {
    prop_oneof![
        Just(SingleQubitOp::Id),
        arb_angle().prop_map(|lambda| SingleQubitOp::U1 { lambda }),
        (arb_angle(), arb_angle()).prop_map(|(phi, lambda)| SingleQubitOp::U2 { phi, lambda }),
        (arb_angle(), arb_angle(), arb_angle())
            .prop_map(|(theta, phi, lambda)| SingleQubitOp::U3 { theta, phi, lambda }),
    ]
}

fn arb_gate(num_qubits: u32) -> BoxedStrategy<Gate> {
    let single = (arb_op(), 0..num_qubits).prop_map(|(op, q)| Gate::single(op, q));
    if num_qubits < 2 {
        single.boxed()
    } else {
        prop_oneof![
            single,
            (0..num_qubits, 0..num_qubits)
                .prop_filter("Control and target must differ", |(c, t)| c != t)
                .prop_map(|(c, t)| Gate::cx(c, t)),
        ]
        .boxed()
    }
}

/// Generate a random normalized circuit with 1-6 qubits and up to 20 gates.
fn arb_circuit() -> impl Strategy<Value = Circuit> {
    (1_u32..=6).prop_flat_map(|n| {
        prop::collection::vec(arb_gate(n), 0..=20)
            .prop_map(move |gates| Circuit::with_gates("qasm_circuit", n, gates).unwrap())
    })
}

proptest! {
    /// Emit then parse gives back the same gates, bit-exact.
    #[test]
    fn test_roundtrip_is_exact(circuit in arb_circuit()) {
        let qasm = emit(&circuit);
        let parsed = parse(&qasm).expect("emitted QASM must parse");
        prop_assert_eq!(parsed.num_qubits(), circuit.num_qubits());
        prop_assert_eq!(parsed.gates(), circuit.gates());
    }

    /// Emission is deterministic.
    #[test]
    fn test_emit_is_deterministic(circuit in arb_circuit()) {
        prop_assert_eq!(emit(&circuit), emit(&circuit));
    }

    /// Empty circuits still declare their register.
    #[test]
    fn test_empty_circuit_roundtrip(num_qubits in 1_u32..=12) {
        let circuit = Circuit::new("empty", num_qubits);
        let parsed = parse(&emit(&circuit)).unwrap();
        prop_assert_eq!(parsed.num_qubits(), num_qubits);
        prop_assert!(parsed.is_empty());
    }
}

#[test]
fn test_qelib_gates_normalize() {
    let source = r#"
        OPENQASM 2.0;
        include "qelib1.inc";
        qreg q[3];
        x q[0];
        u3(pi/2, 0, pi) q[1];
        swap q[0], q[2];
        ccx q[0], q[1], q[2];
    "#;
    let circuit = parse(source).unwrap();
    assert_eq!(circuit.two_qubit_count(), 3 + 6);
    assert_eq!(
        circuit.gates()[1],
        Gate::single(
            SingleQubitOp::U3 {
                theta: std::f64::consts::FRAC_PI_2,
                phi: 0.0,
                lambda: std::f64::consts::PI
            },
            QubitId(1)
        )
    );
}
