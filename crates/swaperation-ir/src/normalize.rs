//! Normalization of the input gate vocabulary into `{id, u1, u2, u3, cx}`.
//!
//! Every decomposition preserves the unitary action up to global phase and
//! keeps source order: the gates produced for one instruction appear in the
//! output exactly where the instruction stood.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use crate::circuit::Circuit;
use crate::error::IrResult;
use crate::gate::{Gate, SingleQubitOp, StandardGate};
use crate::instruction::Instruction;
use crate::qubit::QubitId;

/// Normalize a sequence of input instructions into a circuit.
///
/// Fails on the first instruction with a missing, duplicate or
/// out-of-range operand.
pub fn normalize(
    name: impl Into<String>,
    num_qubits: u32,
    instructions: &[Instruction],
) -> IrResult<Circuit> {
    let mut circuit = Circuit::new(name, num_qubits);
    for inst in instructions {
        inst.validate(num_qubits)?;
        for gate in decompose(&inst.gate, &inst.qubits) {
            circuit.push(gate)?;
        }
    }
    Ok(circuit)
}

fn u1(lambda: f64, q: QubitId) -> Gate {
    Gate::single(SingleQubitOp::U1 { lambda }, q)
}

fn u2(phi: f64, lambda: f64, q: QubitId) -> Gate {
    Gate::single(SingleQubitOp::U2 { phi, lambda }, q)
}

fn u3(theta: f64, phi: f64, lambda: f64, q: QubitId) -> Gate {
    Gate::single(SingleQubitOp::U3 { theta, phi, lambda }, q)
}

fn h(q: QubitId) -> Gate {
    u2(0.0, PI, q)
}

/// Decompose one validated instruction.
///
/// `qubits` must already have the operand count of `gate`.
#[allow(clippy::many_single_char_names)]
fn decompose(gate: &StandardGate, qubits: &[QubitId]) -> Vec<Gate> {
    let a = qubits[0];
    match *gate {
        StandardGate::I => vec![Gate::single(SingleQubitOp::Id, a)],

        // Paulis as U3 with fixed angles
        StandardGate::X => vec![u3(PI, 0.0, PI, a)],
        StandardGate::Y => vec![u3(PI, FRAC_PI_2, FRAC_PI_2, a)],
        StandardGate::Z => vec![u1(PI, a)],

        StandardGate::H => vec![h(a)],
        StandardGate::S => vec![u1(FRAC_PI_2, a)],
        StandardGate::Sdg => vec![u1(-FRAC_PI_2, a)],
        StandardGate::T => vec![u1(FRAC_PI_4, a)],
        StandardGate::Tdg => vec![u1(-FRAC_PI_4, a)],

        // SX = e^{iπ/4} · U3(π/2, -π/2, π/2)
        StandardGate::SX => vec![u3(FRAC_PI_2, -FRAC_PI_2, FRAC_PI_2, a)],
        StandardGate::SXdg => vec![u3(-FRAC_PI_2, -FRAC_PI_2, FRAC_PI_2, a)],

        StandardGate::Rx(theta) => vec![u3(theta, -FRAC_PI_2, FRAC_PI_2, a)],
        StandardGate::Ry(theta) => vec![u3(theta, 0.0, 0.0, a)],
        // Rz(φ) = e^{-iφ/2} · U1(φ)
        StandardGate::Rz(phi) | StandardGate::P(phi) | StandardGate::U1(phi) => vec![u1(phi, a)],
        StandardGate::U2(phi, lambda) => vec![u2(phi, lambda, a)],
        StandardGate::U(theta, phi, lambda) => vec![u3(theta, phi, lambda, a)],

        StandardGate::CX => vec![Gate::cx(a, qubits[1])],

        // CZ = H(t) · CX · H(t)
        StandardGate::CZ => {
            let b = qubits[1];
            vec![h(b), Gate::cx(a, b), h(b)]
        }

        // CY = S(t) · CX · Sdg(t)
        StandardGate::CY => {
            let b = qubits[1];
            vec![u1(-FRAC_PI_2, b), Gate::cx(a, b), u1(FRAC_PI_2, b)]
        }

        StandardGate::CH => {
            let b = qubits[1];
            vec![
                u1(FRAC_PI_2, b),
                h(b),
                u1(FRAC_PI_4, b),
                Gate::cx(a, b),
                u1(-FRAC_PI_4, b),
                h(b),
                u1(-FRAC_PI_2, b),
            ]
        }

        StandardGate::Swap => {
            let b = qubits[1];
            vec![Gate::cx(a, b), Gate::cx(b, a), Gate::cx(a, b)]
        }

        StandardGate::CP(lambda) => {
            let b = qubits[1];
            vec![
                u1(lambda / 2.0, a),
                Gate::cx(a, b),
                u1(-lambda / 2.0, b),
                Gate::cx(a, b),
                u1(lambda / 2.0, b),
            ]
        }

        StandardGate::CRz(lambda) => {
            let b = qubits[1];
            vec![
                u1(lambda / 2.0, b),
                Gate::cx(a, b),
                u1(-lambda / 2.0, b),
                Gate::cx(a, b),
            ]
        }

        // Standard 6-CX Toffoli
        StandardGate::CCX => {
            let b = qubits[1];
            let c = qubits[2];
            vec![
                h(c),
                Gate::cx(b, c),
                u1(-FRAC_PI_4, c),
                Gate::cx(a, c),
                u1(FRAC_PI_4, c),
                Gate::cx(b, c),
                u1(-FRAC_PI_4, c),
                Gate::cx(a, c),
                u1(FRAC_PI_4, b),
                u1(FRAC_PI_4, c),
                h(c),
                Gate::cx(a, b),
                u1(FRAC_PI_4, a),
                u1(-FRAC_PI_4, b),
                Gate::cx(a, b),
            ]
        }
    }
}
