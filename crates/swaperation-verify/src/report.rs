//! Verification results.

use std::fmt;

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::error::{VerifyError, VerifyResult};

/// First unitary element outside tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Mismatch {
    pub row: usize,
    pub col: usize,
    /// Entry of the original circuit's unitary.
    pub expected: Complex64,
    /// Entry of the permutation-corrected routed unitary.
    pub actual: Complex64,
}

/// Outcome of the functional equivalence check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquivalenceReport {
    pub num_qubits: u32,
    pub mismatch: Option<Mismatch>,
}

impl EquivalenceReport {
    pub fn is_equivalent(&self) -> bool {
        self.mismatch.is_none()
    }
}

/// Two-qubit gate on a pair the architecture does not connect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Gate index in the routed circuit.
    pub index: usize,
    pub pair: (u32, u32),
}

/// Outcome of the architecture compliance check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceReport {
    /// Two-qubit gates inspected.
    pub checked: usize,
    pub violation: Option<Violation>,
}

impl ComplianceReport {
    pub fn is_compliant(&self) -> bool {
        self.violation.is_none()
    }
}

/// Combined result of [`verify`](crate::verify).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationReport {
    pub equivalence: EquivalenceReport,
    pub compliance: ComplianceReport,
}

impl VerificationReport {
    /// Both checks passed.
    pub fn is_ok(&self) -> bool {
        self.equivalence.is_equivalent() && self.compliance.is_compliant()
    }

    /// Turn a failed report into [`VerifyError::VerificationFailure`].
    pub fn ensure(self) -> VerifyResult<Self> {
        if self.is_ok() {
            Ok(self)
        } else {
            Err(VerifyError::VerificationFailure(Box::new(self)))
        }
    }
}

impl fmt::Display for VerificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.equivalence.mismatch {
            None => write!(f, "equivalent")?,
            Some(m) => write!(
                f,
                "not equivalent at ({}, {}): expected {:.6}, got {:.6}",
                m.row, m.col, m.expected, m.actual
            )?,
        }
        write!(f, "; ")?;
        match &self.compliance.violation {
            None => write!(f, "compliant ({} two-qubit gates)", self.compliance.checked),
            Some(v) => write!(
                f,
                "gate {} acts on ({}, {}), which is not an architecture edge",
                v.index, v.pair.0, v.pair.1
            ),
        }
    }
}
