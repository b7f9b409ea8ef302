//! Dense unitaries of normalized circuits.
//!
//! Basis indices are big-endian: qubit 0 is the most significant bit, so
//! on `n` qubits qubit `q` toggles bit `1 << (n - 1 - q)`.

use ndarray::{Array2, Zip, s};
use num_complex::Complex64;
use std::f64::consts::FRAC_PI_2;
use swaperation_ir::{Circuit, Gate, SingleQubitOp};
use tracing::debug;

use crate::error::{VerifyError, VerifyResult};

/// Largest register a dense unitary is built for (`4^12` amplitudes).
pub const MAX_VERIFY_QUBITS: u32 = 12;

/// A 2x2 unitary matrix in row-major order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Unitary2x2 {
    /// The matrix elements in row-major order: [[a, b], [c, d]].
    pub data: [Complex64; 4],
}

impl Unitary2x2 {
    /// Create a new 2x2 unitary matrix.
    pub fn new(a: Complex64, b: Complex64, c: Complex64, d: Complex64) -> Self {
        Self { data: [a, b, c, d] }
    }

    /// Create the identity matrix.
    pub fn identity() -> Self {
        Self::new(
            Complex64::new(1.0, 0.0),
            Complex64::new(0.0, 0.0),
            Complex64::new(0.0, 0.0),
            Complex64::new(1.0, 0.0),
        )
    }

    /// Create a U gate U(theta, phi, lambda).
    pub fn u(theta: f64, phi: f64, lambda: f64) -> Self {
        let c = (theta / 2.0).cos();
        let s = (theta / 2.0).sin();
        Self::new(
            Complex64::new(c, 0.0),
            -Complex64::from_polar(s, lambda),
            Complex64::from_polar(s, phi),
            Complex64::from_polar(c, phi + lambda),
        )
    }

    /// The matrix of a normalized single-qubit operation.
    pub fn from_op(op: &SingleQubitOp) -> Self {
        match *op {
            SingleQubitOp::Id => Self::identity(),
            SingleQubitOp::U1 { lambda } => Self::new(
                Complex64::new(1.0, 0.0),
                Complex64::new(0.0, 0.0),
                Complex64::new(0.0, 0.0),
                Complex64::from_polar(1.0, lambda),
            ),
            SingleQubitOp::U2 { phi, lambda } => Self::u(FRAC_PI_2, phi, lambda),
            SingleQubitOp::U3 { theta, phi, lambda } => Self::u(theta, phi, lambda),
        }
    }

    /// Multiply this matrix by another: self * other.
    #[allow(clippy::many_single_char_names)]
    #[must_use]
    pub fn mul(&self, other: &Self) -> Self {
        let [a, b, c, d] = self.data;
        let [e, f, g, h] = other.data;
        Self::new(a * e + b * g, a * f + b * h, c * e + d * g, c * f + d * h)
    }

    /// Get the conjugate transpose (dagger).
    #[must_use]
    pub fn dagger(&self) -> Self {
        Self::new(
            self.data[0].conj(),
            self.data[2].conj(),
            self.data[1].conj(),
            self.data[3].conj(),
        )
    }
}

/// Identity of dimension `2^num_qubits`.
pub fn identity(num_qubits: u32) -> VerifyResult<Array2<Complex64>> {
    check_size(num_qubits)?;
    Ok(Array2::eye(1 << num_qubits))
}

/// Unitary of `circuit` embedded in `num_qubits >= circuit.num_qubits()`
/// qubits; the extra qubits are idle.
pub fn circuit_unitary(circuit: &Circuit, num_qubits: u32) -> VerifyResult<Array2<Complex64>> {
    if num_qubits < circuit.num_qubits() {
        return Err(VerifyError::ShapeMismatch(format!(
            "cannot embed {}-qubit circuit '{}' in {num_qubits} qubits",
            circuit.num_qubits(),
            circuit.name()
        )));
    }
    let mut u = identity(num_qubits)?;
    for gate in circuit.gates() {
        apply_gate(&mut u, gate, num_qubits);
    }
    debug!(
        circuit = circuit.name(),
        num_qubits,
        gates = circuit.len(),
        "Built circuit unitary"
    );
    Ok(u)
}

/// Left-multiply `u` by `gate` acting on an `num_qubits`-qubit register.
pub fn apply_gate(u: &mut Array2<Complex64>, gate: &Gate, num_qubits: u32) {
    let mask = |q: u32| 1usize << (num_qubits - 1 - q);
    match gate {
        Gate::Single { op, qubit } => {
            apply_single(u, &Unitary2x2::from_op(op), mask(qubit.0));
        }
        Gate::Two { control, target } => {
            apply_cx(u, mask(control.0), mask(target.0));
        }
    }
}

fn apply_single(u: &mut Array2<Complex64>, m: &Unitary2x2, mask: usize) {
    let [a, b, c, d] = m.data;
    for i in 0..u.nrows() {
        if i & mask == 0 {
            let j = i | mask;
            let (mut row_i, mut row_j) = u.multi_slice_mut((s![i, ..], s![j, ..]));
            Zip::from(&mut row_i).and(&mut row_j).for_each(|x, y| {
                let (p, q) = (*x, *y);
                *x = a * p + b * q;
                *y = c * p + d * q;
            });
        }
    }
}

fn apply_cx(u: &mut Array2<Complex64>, ctrl_mask: usize, tgt_mask: usize) {
    for i in 0..u.nrows() {
        if (i & ctrl_mask != 0) && (i & tgt_mask == 0) {
            let j = i | tgt_mask;
            let (mut row_i, mut row_j) = u.multi_slice_mut((s![i, ..], s![j, ..]));
            Zip::from(&mut row_i)
                .and(&mut row_j)
                .for_each(std::mem::swap);
        }
    }
}

fn check_size(num_qubits: u32) -> VerifyResult<()> {
    if num_qubits > MAX_VERIFY_QUBITS {
        return Err(VerifyError::TooManyQubits {
            num_qubits,
            max: MAX_VERIFY_QUBITS,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;
    use swaperation_ir::QubitId;

    fn approx_eq(a: Complex64, b: Complex64) -> bool {
        (a - b).norm() < 1e-10
    }

    #[test]
    fn test_hadamard_from_u2() {
        let h = Unitary2x2::from_op(&SingleQubitOp::U2 { phi: 0.0, lambda: PI });
        let s = 1.0 / 2.0_f64.sqrt();
        let expected = [s, s, s, -s];
        for (got, want) in h.data.iter().zip(expected) {
            assert!(approx_eq(*got, Complex64::new(want, 0.0)));
        }
    }

    #[test]
    fn test_u_times_dagger_is_identity() {
        let u = Unitary2x2::u(0.3, 1.1, -2.0);
        let prod = u.mul(&u.dagger());
        for (got, want) in prod.data.iter().zip(Unitary2x2::identity().data) {
            assert!(approx_eq(*got, want));
        }
    }

    #[test]
    fn test_cx_is_big_endian() {
        let mut circuit = Circuit::new("cx", 2);
        circuit.cx(QubitId(0), QubitId(1)).unwrap();
        let u = circuit_unitary(&circuit, 2).unwrap();
        // |10> (index 2) -> |11> (index 3)
        assert!(approx_eq(u[[3, 2]], Complex64::new(1.0, 0.0)));
        assert!(approx_eq(u[[2, 3]], Complex64::new(1.0, 0.0)));
        assert!(approx_eq(u[[1, 1]], Complex64::new(1.0, 0.0)));
    }

    #[test]
    fn test_padding_keeps_extra_qubits_idle() {
        let mut circuit = Circuit::new("x", 1);
        circuit.u3(PI, 0.0, PI, QubitId(0)).unwrap();
        let u = circuit_unitary(&circuit, 2).unwrap();
        // X on the most significant qubit: |00> -> |10>, |01> -> |11>
        assert!(approx_eq(u[[2, 0]], Complex64::new(1.0, 0.0)));
        assert!(approx_eq(u[[3, 1]], Complex64::new(1.0, 0.0)));
        assert!(approx_eq(u[[0, 0]], Complex64::new(0.0, 0.0)));
    }

    #[test]
    fn test_size_limits() {
        let circuit = Circuit::new("wide", 3);
        assert!(matches!(
            circuit_unitary(&circuit, 2),
            Err(VerifyError::ShapeMismatch(_))
        ));
        assert!(matches!(
            identity(MAX_VERIFY_QUBITS + 1),
            Err(VerifyError::TooManyQubits { .. })
        ));
    }
}
