//! Swaperation circuit model
//!
//! This crate provides the data structures every other Swaperation crate
//! consumes: normalized circuits, the input gate vocabulary and its
//! normalizer, hardware architecture graphs, and a seeded random circuit
//! generator for level data.
//!
//! # Normalized gate set
//!
//! Routing only cares about gate arity, so circuits are normalized to a
//! small closed set before anything else sees them:
//!
//! | Gate | Qubits | Parameters |
//! |------|--------|------------|
//! | `id` | 1 | none |
//! | `u1` | 1 | λ |
//! | `u2` | 1 | φ, λ |
//! | `u3` | 1 | θ, φ, λ |
//! | `cx` | 2 | none |
//!
//! # Example
//!
//! ```rust
//! use swaperation_ir::{Architecture, Circuit, Instruction, QubitId, StandardGate};
//!
//! let insts = vec![
//!     Instruction::single_qubit_gate(StandardGate::H, QubitId(0)),
//!     Instruction::two_qubit_gate(StandardGate::CZ, QubitId(0), QubitId(2)),
//! ];
//! let circuit = Circuit::from_instructions("demo", 3, &insts).unwrap();
//! assert_eq!(circuit.two_qubit_count(), 1);
//!
//! let arch = Architecture::lattice(2, 2).unwrap();
//! assert!(arch.is_edge(0, 2));
//! assert!(!arch.is_edge(0, 3));
//! ```

pub mod architecture;
pub mod circuit;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod normalize;
pub mod qubit;
pub mod random;

pub use architecture::Architecture;
pub use circuit::Circuit;
pub use error::{IrError, IrResult};
pub use gate::{Gate, SingleQubitOp, StandardGate};
pub use instruction::Instruction;
pub use normalize::normalize;
pub use qubit::QubitId;
pub use random::{RandomCircuitConfig, random_circuit, random_instructions};
