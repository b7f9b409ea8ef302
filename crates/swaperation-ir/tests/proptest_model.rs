//! Property-based tests for normalization and architecture graphs.

use swaperation_ir::{
    Architecture, Circuit, Gate, Instruction, QubitId, RandomCircuitConfig, StandardGate,
    random_circuit, random_instructions,
};
use proptest::prelude::*;

/// CX gates each input gate normalizes into.
fn cx_cost(gate: &StandardGate) -> usize {
    match gate {
        StandardGate::CX | StandardGate::CY | StandardGate::CZ | StandardGate::CH => 1,
        StandardGate::CRz(_) | StandardGate::CP(_) => 2,
        StandardGate::Swap => 3,
        StandardGate::CCX => 6,
        _ => 0,
    }
}

fn arb_gate(max_arity: u32) -> impl Strategy<Value = StandardGate> {
    let angle = -10.0_f64..10.0;
    let one = prop_oneof![
        Just(StandardGate::I),
        Just(StandardGate::X),
        Just(StandardGate::Y),
        Just(StandardGate::Z),
        Just(StandardGate::H),
        Just(StandardGate::Sdg),
        Just(StandardGate::Tdg),
        Just(StandardGate::SXdg),
        angle.clone().prop_map(StandardGate::Rx),
        angle.clone().prop_map(StandardGate::P),
        (angle.clone(), angle.clone()).prop_map(|(a, b)| StandardGate::U2(a, b)),
    ];
    let two = prop_oneof![
        Just(StandardGate::CX),
        Just(StandardGate::CY),
        Just(StandardGate::CZ),
        Just(StandardGate::CH),
        Just(StandardGate::Swap),
        angle.clone().prop_map(StandardGate::CRz),
        angle.prop_map(StandardGate::CP),
    ];
    match max_arity {
        1 => one.boxed(),
        2 => prop_oneof![one, two].boxed(),
        _ => prop_oneof![one, two, Just(StandardGate::CCX)].boxed(),
    }
}

fn arb_instruction(num_qubits: u32) -> impl Strategy<Value = Instruction> {
    let order = Just((0..num_qubits).map(QubitId).collect::<Vec<_>>()).prop_shuffle();
    (arb_gate(num_qubits.min(3)), order).prop_map(|(gate, order)| {
        let arity = gate.num_qubits() as usize;
        Instruction::new(gate, order.into_iter().take(arity))
    })
}

fn arb_program() -> impl Strategy<Value = (u32, Vec<Instruction>)> {
    (1_u32..=5).prop_flat_map(|n| (Just(n), prop::collection::vec(arb_instruction(n), 0..=12)))
}

proptest! {
    /// Normalization yields a well-formed circuit with the expected CX count.
    #[test]
    fn test_normalize_cx_count((n, insts) in arb_program()) {
        let circuit = Circuit::from_instructions("prop", n, &insts).unwrap();
        let expected: usize = insts.iter().map(|i| cx_cost(&i.gate)).sum();
        prop_assert_eq!(circuit.two_qubit_count(), expected);
        for gate in circuit.gates() {
            for q in gate.qubits() {
                prop_assert!(q.0 < n);
            }
            if let Gate::Two { control, target } = *gate {
                prop_assert_ne!(control, target);
            }
        }
    }

    /// Single-qubit instructions become exactly one normalized gate each.
    #[test]
    fn test_single_qubit_gates_map_one_to_one(gates in prop::collection::vec(arb_gate(1), 0..20)) {
        let insts: Vec<_> = gates
            .into_iter()
            .map(|g| Instruction::single_qubit_gate(g, QubitId(0)))
            .collect();
        let circuit = Circuit::from_instructions("single", 1, &insts).unwrap();
        prop_assert_eq!(circuit.len(), insts.len());
    }

    /// Random circuits are reproducible and stay inside their register.
    #[test]
    fn test_random_circuit_reproducible(qubits in 1_u32..=8, depth in 0_u32..=4, seed in any::<u64>()) {
        let config = RandomCircuitConfig::new(qubits, depth, seed);
        let a = random_circuit(&config).unwrap();
        let b = random_circuit(&config).unwrap();
        prop_assert_eq!(&a, &b);
        prop_assert_eq!(a.num_qubits(), qubits);
        let touched: usize = random_instructions(&config).iter().map(|i| i.qubits.len()).sum();
        prop_assert_eq!(touched, (qubits * depth) as usize);
    }

    /// Lattice edge count and symmetric distances.
    #[test]
    fn test_lattice_shape(rows in 1_u32..=5, cols in 1_u32..=5) {
        prop_assume!(rows * cols >= 2);
        let arch = Architecture::lattice(rows, cols).unwrap();
        prop_assert_eq!(arch.num_qubits(), rows * cols);
        prop_assert_eq!(arch.edges().len() as u32, rows * (cols - 1) + cols * (rows - 1));
        prop_assert!(arch.is_connected());
        let last = rows * cols - 1;
        prop_assert_eq!(arch.distance(0, last), Some(rows - 1 + cols - 1));
        prop_assert_eq!(arch.distance(last, 0), arch.distance(0, last));
    }

    /// Consecutive hops on a shortest path are edges.
    #[test]
    fn test_shortest_path_walks_edges(n in 2_u32..=9, from in 0_u32..9, to in 0_u32..9) {
        prop_assume!(from < n && to < n);
        let arch = Architecture::linear(n).unwrap();
        let path = arch.shortest_path(from, to).unwrap();
        prop_assert_eq!(path.len() as u32, arch.distance(from, to).unwrap() + 1);
        for hop in path.windows(2) {
            prop_assert!(arch.is_edge(hop[0], hop[1]));
        }
    }
}
