//! Gate types.
//!
//! Two vocabularies live here. [`StandardGate`] is the input gate set a
//! circuit may be written in. [`Gate`] is the normalized set the router and
//! verifier consume: parametrized single-qubit operations and the
//! unparametrized two-qubit CX.

use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::qubit::QubitId;

/// Input gates with known semantics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum StandardGate {
    // Single-qubit Pauli gates
    /// Identity gate.
    I,
    /// Pauli-X gate.
    X,
    /// Pauli-Y gate.
    Y,
    /// Pauli-Z gate.
    Z,

    // Single-qubit Clifford gates
    /// Hadamard gate.
    H,
    /// S gate (sqrt(Z)).
    S,
    /// S-dagger gate.
    Sdg,
    /// T gate (fourth root of Z).
    T,
    /// T-dagger gate.
    Tdg,
    /// sqrt(X) gate.
    SX,
    /// sqrt(X)-dagger gate.
    SXdg,

    // Single-qubit rotation gates
    /// Rotation around X axis.
    Rx(f64),
    /// Rotation around Y axis.
    Ry(f64),
    /// Rotation around Z axis.
    Rz(f64),
    /// Phase gate.
    P(f64),
    /// Diagonal phase gate U1(λ).
    U1(f64),
    /// U2(φ, λ) = U(π/2, φ, λ).
    U2(f64, f64),
    /// Universal single-qubit gate U(θ, φ, λ).
    U(f64, f64, f64),

    // Two-qubit gates
    /// Controlled-X (CNOT) gate.
    CX,
    /// Controlled-Y gate.
    CY,
    /// Controlled-Z gate.
    CZ,
    /// Controlled-Hadamard gate.
    CH,
    /// SWAP gate.
    Swap,
    /// Controlled rotation around Z.
    CRz(f64),
    /// Controlled phase gate.
    CP(f64),

    // Three-qubit gates
    /// Toffoli gate (CCX).
    CCX,
}

impl StandardGate {
    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            StandardGate::I => "id",
            StandardGate::X => "x",
            StandardGate::Y => "y",
            StandardGate::Z => "z",
            StandardGate::H => "h",
            StandardGate::S => "s",
            StandardGate::Sdg => "sdg",
            StandardGate::T => "t",
            StandardGate::Tdg => "tdg",
            StandardGate::SX => "sx",
            StandardGate::SXdg => "sxdg",
            StandardGate::Rx(_) => "rx",
            StandardGate::Ry(_) => "ry",
            StandardGate::Rz(_) => "rz",
            StandardGate::P(_) => "p",
            StandardGate::U1(_) => "u1",
            StandardGate::U2(_, _) => "u2",
            StandardGate::U(_, _, _) => "u3",
            StandardGate::CX => "cx",
            StandardGate::CY => "cy",
            StandardGate::CZ => "cz",
            StandardGate::CH => "ch",
            StandardGate::Swap => "swap",
            StandardGate::CRz(_) => "crz",
            StandardGate::CP(_) => "cp",
            StandardGate::CCX => "ccx",
        }
    }

    /// Get the number of qubits this gate operates on.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            StandardGate::CX
            | StandardGate::CY
            | StandardGate::CZ
            | StandardGate::CH
            | StandardGate::Swap
            | StandardGate::CRz(_)
            | StandardGate::CP(_) => 2,
            StandardGate::CCX => 3,
            _ => 1,
        }
    }

    /// Get the number of angle parameters this gate takes.
    #[inline]
    pub fn num_params(&self) -> usize {
        match self {
            StandardGate::Rx(_)
            | StandardGate::Ry(_)
            | StandardGate::Rz(_)
            | StandardGate::P(_)
            | StandardGate::U1(_)
            | StandardGate::CRz(_)
            | StandardGate::CP(_) => 1,
            StandardGate::U2(_, _) => 2,
            StandardGate::U(_, _, _) => 3,
            _ => 0,
        }
    }

    /// Look up a gate by its textual name and bind its parameters.
    ///
    /// Accepts the common aliases `i`/`id`, `u`/`u3`, `cnot`/`cx`,
    /// `cphase`/`cp`.
    pub fn from_name(name: &str, params: &[f64]) -> IrResult<Self> {
        let expected = match name {
            "rx" | "ry" | "rz" | "p" | "phase" | "u1" | "crz" | "cp" | "cphase" | "cu1" => 1,
            "u2" => 2,
            "u" | "u3" | "U" => 3,
            _ => 0,
        };
        if params.len() != expected {
            // Unknown names fall through with expected == 0; report those as unknown.
            if expected == 0 && Self::nullary(name).is_none() {
                return Err(IrError::UnknownGate(name.to_string()));
            }
            return Err(IrError::ParameterCountMismatch {
                gate_name: name.to_string(),
                expected,
                got: params.len(),
            });
        }

        let gate = match name {
            "rx" => StandardGate::Rx(params[0]),
            "ry" => StandardGate::Ry(params[0]),
            "rz" => StandardGate::Rz(params[0]),
            "p" | "phase" => StandardGate::P(params[0]),
            "u1" => StandardGate::U1(params[0]),
            "crz" => StandardGate::CRz(params[0]),
            "cp" | "cphase" | "cu1" => StandardGate::CP(params[0]),
            "u2" => StandardGate::U2(params[0], params[1]),
            "u" | "u3" | "U" => StandardGate::U(params[0], params[1], params[2]),
            other => Self::nullary(other).ok_or_else(|| IrError::UnknownGate(other.to_string()))?,
        };
        Ok(gate)
    }

    fn nullary(name: &str) -> Option<Self> {
        Some(match name {
            "id" | "i" => StandardGate::I,
            "x" => StandardGate::X,
            "y" => StandardGate::Y,
            "z" => StandardGate::Z,
            "h" => StandardGate::H,
            "s" => StandardGate::S,
            "sdg" => StandardGate::Sdg,
            "t" => StandardGate::T,
            "tdg" => StandardGate::Tdg,
            "sx" => StandardGate::SX,
            "sxdg" => StandardGate::SXdg,
            "cx" | "CX" | "cnot" => StandardGate::CX,
            "cy" => StandardGate::CY,
            "cz" => StandardGate::CZ,
            "ch" => StandardGate::CH,
            "swap" => StandardGate::Swap,
            "ccx" | "toffoli" => StandardGate::CCX,
            _ => return None,
        })
    }
}

/// Parametrized single-qubit operation of the normalized gate set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum SingleQubitOp {
    /// Identity.
    Id,
    /// Diagonal phase `diag(1, e^{iλ})`.
    U1 {
        /// Phase angle.
        lambda: f64,
    },
    /// `U3(π/2, φ, λ)`.
    U2 {
        /// First phase angle.
        phi: f64,
        /// Second phase angle.
        lambda: f64,
    },
    /// General rotation `U3(θ, φ, λ)`.
    U3 {
        /// Polar angle.
        theta: f64,
        /// First phase angle.
        phi: f64,
        /// Second phase angle.
        lambda: f64,
    },
}

impl SingleQubitOp {
    /// Name of the operation in the textual circuit format.
    pub fn name(&self) -> &'static str {
        match self {
            SingleQubitOp::Id => "id",
            SingleQubitOp::U1 { .. } => "u1",
            SingleQubitOp::U2 { .. } => "u2",
            SingleQubitOp::U3 { .. } => "u3",
        }
    }

    /// Angle parameters in textual order.
    pub fn params(&self) -> Vec<f64> {
        match *self {
            SingleQubitOp::Id => vec![],
            SingleQubitOp::U1 { lambda } => vec![lambda],
            SingleQubitOp::U2 { phi, lambda } => vec![phi, lambda],
            SingleQubitOp::U3 { theta, phi, lambda } => vec![theta, phi, lambda],
        }
    }

    /// The `(θ, φ, λ)` angles of the equivalent `U3`.
    pub fn euler_angles(&self) -> (f64, f64, f64) {
        match *self {
            SingleQubitOp::Id => (0.0, 0.0, 0.0),
            SingleQubitOp::U1 { lambda } => (0.0, 0.0, lambda),
            SingleQubitOp::U2 { phi, lambda } => (std::f64::consts::FRAC_PI_2, phi, lambda),
            SingleQubitOp::U3 { theta, phi, lambda } => (theta, phi, lambda),
        }
    }
}

/// A gate of the normalized set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Gate {
    /// Single-qubit operation.
    Single {
        /// The operation applied.
        op: SingleQubitOp,
        /// Target qubit.
        qubit: QubitId,
    },
    /// CX between two distinct qubits.
    Two {
        /// Control qubit.
        control: QubitId,
        /// Target qubit.
        target: QubitId,
    },
}

impl Gate {
    /// Single-qubit gate shorthand.
    pub fn single(op: SingleQubitOp, qubit: impl Into<QubitId>) -> Self {
        Gate::Single {
            op,
            qubit: qubit.into(),
        }
    }

    /// CX shorthand.
    pub fn cx(control: impl Into<QubitId>, target: impl Into<QubitId>) -> Self {
        Gate::Two {
            control: control.into(),
            target: target.into(),
        }
    }

    /// Gate name in the textual circuit format.
    pub fn name(&self) -> &'static str {
        match self {
            Gate::Single { op, .. } => op.name(),
            Gate::Two { .. } => "cx",
        }
    }

    /// Whether this is a two-qubit gate.
    #[inline]
    pub fn is_two_qubit(&self) -> bool {
        matches!(self, Gate::Two { .. })
    }

    /// The `(control, target)` pair of a two-qubit gate.
    #[inline]
    pub fn pair(&self) -> Option<(QubitId, QubitId)> {
        match *self {
            Gate::Two { control, target } => Some((control, target)),
            Gate::Single { .. } => None,
        }
    }

    /// Qubits this gate touches.
    pub fn qubits(&self) -> Vec<QubitId> {
        match *self {
            Gate::Single { qubit, .. } => vec![qubit],
            Gate::Two { control, target } => vec![control, target],
        }
    }

    /// The same gate with every qubit passed through `f`.
    #[must_use]
    pub fn remap(&self, mut f: impl FnMut(QubitId) -> QubitId) -> Self {
        match *self {
            Gate::Single { op, qubit } => Gate::Single { op, qubit: f(qubit) },
            Gate::Two { control, target } => Gate::Two {
                control: f(control),
                target: f(target),
            },
        }
    }
}
