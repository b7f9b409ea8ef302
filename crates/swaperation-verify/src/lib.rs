//! Swaperation routing verifier
//!
//! Checks a finished routing run from the outside: given the original
//! circuit, the routed circuit and the recorded [`RoutingSummary`], it
//! confirms that
//!
//! 1. **Equivalence**: the routed circuit implements the original unitary
//!    once the initial and final layouts are accounted for, and
//! 2. **Compliance**: every two-qubit gate of the routed circuit acts on an
//!    architecture edge.
//!
//! Unitaries are dense `ndarray` matrices, so registers are limited to
//! [`MAX_VERIFY_QUBITS`].
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use swaperation_ir::{Architecture, Circuit, Gate};
//! use swaperation_route::RoutingSession;
//! use swaperation_verify::{Tolerance, verify};
//!
//! let circuit = Circuit::with_gates("demo", 3, [Gate::cx(0, 1), Gate::cx(1, 2)]).unwrap();
//! let arch = Architecture::from_edges([(0, 1), (0, 2)]).unwrap();
//! let mut session = RoutingSession::new(Arc::new(circuit), Arc::new(arch)).unwrap();
//! session.advance().unwrap();
//! session.swap(0, 2).unwrap();
//! session.advance().unwrap();
//!
//! let outcome = session.finish().unwrap();
//! let report = verify(&outcome.summary, &outcome.original, &outcome.routed, Tolerance::default())
//!     .unwrap()
//!     .ensure()
//!     .unwrap();
//! assert!(report.is_ok());
//! ```
//!
//! [`RoutingSummary`]: swaperation_route::RoutingSummary

pub mod compliance;
pub mod equivalence;
pub mod error;
pub mod permutation;
pub mod report;
pub mod unitary;

pub use compliance::check_compliance;
pub use equivalence::{
    Tolerance, check_equivalence, check_unitaries, equal_up_to_global_phase, first_mismatch,
};
pub use error::{VerifyError, VerifyResult};
pub use permutation::BasisPermutation;
pub use report::{ComplianceReport, EquivalenceReport, Mismatch, VerificationReport, Violation};
pub use unitary::{MAX_VERIFY_QUBITS, Unitary2x2, circuit_unitary};

use swaperation_ir::Circuit;
use swaperation_route::RoutingSummary;
use tracing::{info, instrument};

/// Run the shape, equivalence and compliance checks on a finished run.
///
/// Returns the report whether or not it passed; call
/// [`VerificationReport::ensure`] to turn a failure into an error.
#[instrument(level = "debug", skip_all, fields(circuit = original.name()))]
pub fn verify(
    summary: &RoutingSummary,
    original: &Circuit,
    routed: &Circuit,
    tolerance: Tolerance,
) -> VerifyResult<VerificationReport> {
    check_shapes(summary, original, routed)?;

    let compliance = check_compliance(routed, &summary.architecture);
    let equivalence = check_equivalence(
        original,
        routed,
        &summary.initial_mapping,
        &summary.final_mapping,
        tolerance,
    )?;
    let report = VerificationReport {
        equivalence,
        compliance,
    };
    info!(
        circuit = original.name(),
        num_swaps = summary.num_swaps,
        ok = report.is_ok(),
        "Verified routing"
    );
    Ok(report)
}

fn check_shapes(summary: &RoutingSummary, original: &Circuit, routed: &Circuit) -> VerifyResult<()> {
    let arc = summary.num_arc_qubits;
    let mismatch = |what: String| Err(VerifyError::ShapeMismatch(what));
    if original.num_qubits() != summary.num_circuit_qubits {
        return mismatch(format!(
            "original circuit has {} qubits, summary says {}",
            original.num_qubits(),
            summary.num_circuit_qubits
        ));
    }
    if summary.num_circuit_qubits > arc {
        return mismatch(format!(
            "{} circuit qubits exceed {arc} architecture qubits",
            summary.num_circuit_qubits
        ));
    }
    if routed.num_qubits() != arc || summary.architecture.num_qubits() != arc {
        return mismatch(format!(
            "routed circuit has {} qubits and architecture {}, summary says {arc}",
            routed.num_qubits(),
            summary.architecture.num_qubits()
        ));
    }
    for (name, mapping) in [
        ("initial", &summary.initial_mapping),
        ("final", &summary.final_mapping),
    ] {
        if mapping.len() != arc as usize {
            return mismatch(format!(
                "{name} mapping has length {}, expected {arc}",
                mapping.len()
            ));
        }
    }
    Ok(())
}
