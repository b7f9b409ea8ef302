//! Error types for the routing crate.

use swaperation_ir::IrError;
use thiserror::Error;

use crate::session::Stage;

/// Errors returned by routing sessions.
///
/// Every variant except [`RouteError::MalformedCircuit`] and
/// [`RouteError::Configuration`] is recoverable: the request was refused and
/// the session is exactly as it was before the call.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RouteError {
    /// Routing-stage swap between physical qubits that share no edge.
    #[error("Cannot swap physical qubits {x} and {y}: not an architecture edge")]
    InvalidSwapRequest {
        /// First physical qubit.
        x: u32,
        /// Second physical qubit.
        y: u32,
    },

    /// Physical qubit index outside the architecture.
    #[error("Physical qubit {qubit} out of range for {num_qubits}-qubit architecture")]
    QubitOutOfRange {
        /// The offending index.
        qubit: u32,
        /// Number of physical qubits.
        num_qubits: u32,
    },

    /// The pending two-qubit gate sits on non-adjacent physical qubits.
    #[error(
        "Gate {index} on logical ({}, {}) maps to physical ({}, {}), which are not adjacent",
        .logical.0, .logical.1, .physical.0, .physical.1
    )]
    GateNotRoutable {
        /// Index of the gate in the original circuit.
        index: usize,
        /// Logical operands.
        logical: (u32, u32),
        /// Physical operands under the current mapping.
        physical: (u32, u32),
    },

    /// The session reached its terminal stage.
    #[error("Routing session is finished")]
    SessionFinished,

    /// The operation needs a finished session.
    #[error("Routing session is not finished (stage: {0})")]
    NotFinished(Stage),

    /// Architecture too small for the circuit.
    #[error(
        "Architecture has {physical} physical qubits but the circuit needs {logical}"
    )]
    Configuration {
        /// Physical qubits available.
        physical: u32,
        /// Logical qubits required.
        logical: u32,
    },

    /// Array that is not a bijection on `[0, n)`.
    #[error("Invalid mapping: {0}")]
    InvalidMapping(String),

    /// Circuit could not be built.
    #[error("Malformed circuit: {0}")]
    MalformedCircuit(#[from] IrError),

    /// A thread panicked while holding the shared session.
    #[error("Shared routing session lock poisoned")]
    Poisoned,
}

/// Result type for routing operations.
pub type RouteResult<T> = Result<T, RouteError>;
