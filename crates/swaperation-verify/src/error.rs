//! Error types for the verifier.

use thiserror::Error;

use crate::report::VerificationReport;

/// Errors raised while checking a routed circuit.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum VerifyError {
    /// The routed circuit is not equivalent or not compliant.
    #[error("Verification failed: {0}")]
    VerificationFailure(Box<VerificationReport>),

    /// Dense unitaries beyond this size are not built.
    #[error("Cannot build a unitary over {num_qubits} qubits (limit {max})")]
    TooManyQubits {
        /// Requested qubit count.
        num_qubits: u32,
        /// Supported maximum.
        max: u32,
    },

    /// Circuits, summary and mappings disagree on sizes.
    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),

    /// A recorded mapping is not a permutation.
    #[error("Invalid mapping: {0}")]
    InvalidMapping(String),
}

/// Result type for verification.
pub type VerifyResult<T> = Result<T, VerifyError>;
