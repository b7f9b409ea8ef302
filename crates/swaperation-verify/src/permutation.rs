//! Basis permutations induced by qubit reorderings.

use ndarray::Array2;
use num_complex::Complex64;

use crate::error::{VerifyError, VerifyResult};
use crate::unitary::MAX_VERIFY_QUBITS;

/// The permutation operator of a qubit reordering.
///
/// For `order` on `n` qubits it maps basis state `|b⟩` to `|c⟩` with
/// `c[j] = b[order[j]]`, bit 0 being the most significant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasisPermutation {
    num_qubits: u32,
    /// `image[b] = c`.
    image: Vec<usize>,
}

impl BasisPermutation {
    /// Build the operator for `order`, which must be a permutation of `[0, n)`.
    pub fn from_qubit_ordering(num_qubits: u32, order: &[u32]) -> VerifyResult<Self> {
        if num_qubits > MAX_VERIFY_QUBITS {
            return Err(VerifyError::TooManyQubits {
                num_qubits,
                max: MAX_VERIFY_QUBITS,
            });
        }
        let n = num_qubits as usize;
        let mut seen = vec![false; n];
        if order.len() != n {
            return Err(VerifyError::InvalidMapping(format!(
                "ordering of length {} on {num_qubits} qubits",
                order.len()
            )));
        }
        for &q in order {
            match seen.get_mut(q as usize) {
                Some(slot) if !*slot => *slot = true,
                _ => {
                    return Err(VerifyError::InvalidMapping(format!(
                        "{order:?} is not a permutation of 0..{num_qubits}"
                    )));
                }
            }
        }

        let bit = |b: usize, q: usize| (b >> (n - 1 - q)) & 1;
        let image = (0..1usize << n)
            .map(|b| {
                order
                    .iter()
                    .enumerate()
                    .fold(0, |c, (j, &q)| c | (bit(b, q as usize) << (n - 1 - j)))
            })
            .collect();
        Ok(Self { num_qubits, image })
    }

    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// Image of basis index `b`.
    pub fn apply_index(&self, b: usize) -> usize {
        self.image[b]
    }

    /// The inverse operator.
    #[must_use]
    pub fn inverse(&self) -> Self {
        let mut image = vec![0; self.image.len()];
        for (b, &c) in self.image.iter().enumerate() {
            image[c] = b;
        }
        Self {
            num_qubits: self.num_qubits,
            image,
        }
    }

    /// `P · m`: row `b` of `m` moves to row `P(b)`.
    pub fn apply_left(&self, m: &Array2<Complex64>) -> VerifyResult<Array2<Complex64>> {
        self.check_dim(m)?;
        let mut out = Array2::zeros(m.raw_dim());
        for (b, &c) in self.image.iter().enumerate() {
            out.row_mut(c).assign(&m.row(b));
        }
        Ok(out)
    }

    /// `m · P`: column `b` of the result is column `P(b)` of `m`.
    pub fn apply_right(&self, m: &Array2<Complex64>) -> VerifyResult<Array2<Complex64>> {
        self.check_dim(m)?;
        let mut out = Array2::zeros(m.raw_dim());
        for (b, &c) in self.image.iter().enumerate() {
            out.column_mut(b).assign(&m.column(c));
        }
        Ok(out)
    }

    /// Dense 0/1 matrix.
    pub fn to_matrix(&self) -> Array2<Complex64> {
        let dim = self.image.len();
        let mut out = Array2::zeros((dim, dim));
        for (b, &c) in self.image.iter().enumerate() {
            out[[c, b]] = Complex64::new(1.0, 0.0);
        }
        out
    }

    fn check_dim(&self, m: &Array2<Complex64>) -> VerifyResult<()> {
        let dim = self.image.len();
        if m.nrows() != dim || m.ncols() != dim {
            return Err(VerifyError::ShapeMismatch(format!(
                "{}x{} matrix against {}-qubit permutation",
                m.nrows(),
                m.ncols(),
                self.num_qubits
            )));
        }
        Ok(())
    }
}
