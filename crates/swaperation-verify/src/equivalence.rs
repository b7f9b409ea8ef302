//! Functional equivalence of an original and a routed circuit.
//!
//! The routed circuit acts on physical qubits and starts and ends under
//! different layouts. With `I` and `F` the physical-to-logical orderings
//! at the start and end of routing, `P1 = perm(I)` and
//! `P2 = perm(perm_diff(I, F))`, the circuits agree iff
//!
//! ```text
//! U_original ≈ P1⁻¹ · P2⁻¹ · U_routed · P1
//! ```

use ndarray::{Array2, Zip};
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use swaperation_ir::Circuit;
use swaperation_route::{Mapping, perm_diff};
use tracing::{debug, instrument};

use crate::error::{VerifyError, VerifyResult};
use crate::permutation::BasisPermutation;
use crate::report::{EquivalenceReport, Mismatch};
use crate::unitary::circuit_unitary;

/// Element-wise closeness: `|a - b| <= atol + rtol * |b|`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tolerance {
    pub atol: f64,
    pub rtol: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            atol: 1e-5,
            rtol: 1e-5,
        }
    }
}

impl Tolerance {
    /// Same absolute and relative tolerance.
    pub fn uniform(tol: f64) -> Self {
        Self {
            atol: tol,
            rtol: tol,
        }
    }

    pub fn is_close(&self, a: Complex64, b: Complex64) -> bool {
        (a - b).norm() <= self.atol + self.rtol * b.norm()
    }
}

/// First element where `a` and `b` differ beyond `tol`.
pub fn first_mismatch(
    a: &Array2<Complex64>,
    b: &Array2<Complex64>,
    tol: Tolerance,
) -> Option<Mismatch> {
    a.indexed_iter()
        .zip(b.iter())
        .find(|((_, x), y)| !tol.is_close(**x, **y))
        .map(|(((row, col), x), y)| Mismatch {
            row,
            col,
            expected: *x,
            actual: *y,
        })
}

/// Whether `a = e^{iφ} b` for some global phase φ.
pub fn equal_up_to_global_phase(
    a: &Array2<Complex64>,
    b: &Array2<Complex64>,
    tol: Tolerance,
) -> bool {
    if a.raw_dim() != b.raw_dim() {
        return false;
    }
    let Some((&pa, &pb)) = a
        .iter()
        .zip(b.iter())
        .max_by(|x, y| x.0.norm().total_cmp(&y.0.norm()))
    else {
        return true;
    };
    if pb.norm() <= tol.atol {
        return false;
    }
    let phase = pa / pb;
    let mut ok = true;
    Zip::from(a).and(b).for_each(|&x, &y| {
        ok &= tol.is_close(x, phase * y);
    });
    ok
}

/// Compare two unitaries on the same register given the physical-to-logical
/// orderings at the start and end of routing.
pub fn check_unitaries(
    original: &Array2<Complex64>,
    routed: &Array2<Complex64>,
    initial_order: &[u32],
    final_order: &[u32],
    tol: Tolerance,
) -> VerifyResult<EquivalenceReport> {
    if original.raw_dim() != routed.raw_dim() {
        return Err(VerifyError::ShapeMismatch(format!(
            "unitaries of shape {:?} and {:?}",
            original.shape(),
            routed.shape()
        )));
    }
    let num_qubits = initial_order.len() as u32;
    let initial = to_mapping(initial_order)?;
    let final_ = to_mapping(final_order)?;
    let diff = perm_diff(&initial, &final_).map_err(|e| VerifyError::InvalidMapping(e.to_string()))?;

    let p1 = BasisPermutation::from_qubit_ordering(num_qubits, initial.as_slice())?;
    let p2 = BasisPermutation::from_qubit_ordering(num_qubits, diff.as_slice())?;

    let corrected = p1.apply_right(routed)?;
    let corrected = p2.inverse().apply_left(&corrected)?;
    let corrected = p1.inverse().apply_left(&corrected)?;

    let mismatch = first_mismatch(original, &corrected, tol);
    debug!(num_qubits, equivalent = mismatch.is_none(), "Compared unitaries");
    Ok(EquivalenceReport {
        num_qubits,
        mismatch,
    })
}

/// Check `routed` against `original` given the recorded logical-to-physical
/// mappings.
///
/// `original` is padded with idle qubits up to the mapping size.
#[instrument(level = "debug", skip_all, fields(original = original.name()))]
pub fn check_equivalence(
    original: &Circuit,
    routed: &Circuit,
    initial_mapping: &Mapping,
    final_mapping: &Mapping,
    tol: Tolerance,
) -> VerifyResult<EquivalenceReport> {
    let n = routed.num_qubits();
    if initial_mapping.len() != n as usize || final_mapping.len() != n as usize {
        return Err(VerifyError::ShapeMismatch(format!(
            "mappings of length {} and {} for a {n}-qubit routed circuit",
            initial_mapping.len(),
            final_mapping.len()
        )));
    }
    let u_original = circuit_unitary(original, n)?;
    let u_routed = circuit_unitary(routed, n)?;
    check_unitaries(
        &u_original,
        &u_routed,
        initial_mapping.inverse().as_slice(),
        final_mapping.inverse().as_slice(),
        tol,
    )
}

fn to_mapping(order: &[u32]) -> VerifyResult<Mapping> {
    Mapping::from_vec(order.to_vec()).map_err(|e| VerifyError::InvalidMapping(e.to_string()))
}
