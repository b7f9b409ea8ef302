//! Normalized circuits.

use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::gate::{Gate, SingleQubitOp};
use crate::instruction::Instruction;
use crate::normalize::normalize;
use crate::qubit::QubitId;

/// An ordered sequence of normalized gates over a fixed register.
///
/// Every gate pushed is checked against the register size, and two-qubit
/// gates must act on distinct qubits, so a `Circuit` that exists is always
/// well formed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circuit {
    name: String,
    num_qubits: u32,
    gates: Vec<Gate>,
}

impl Circuit {
    /// Create an empty circuit over `num_qubits` qubits.
    pub fn new(name: impl Into<String>, num_qubits: u32) -> Self {
        Self {
            name: name.into(),
            num_qubits,
            gates: Vec::new(),
        }
    }

    /// Create a circuit from already-normalized gates.
    pub fn with_gates(
        name: impl Into<String>,
        num_qubits: u32,
        gates: impl IntoIterator<Item = Gate>,
    ) -> IrResult<Self> {
        let mut circuit = Self::new(name, num_qubits);
        for gate in gates {
            circuit.push(gate)?;
        }
        Ok(circuit)
    }

    /// Normalize input instructions into a circuit.
    pub fn from_instructions(
        name: impl Into<String>,
        num_qubits: u32,
        instructions: &[Instruction],
    ) -> IrResult<Self> {
        normalize(name, num_qubits, instructions)
    }

    /// Get the circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// Get the gates in order.
    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    /// Get the gate at `index`.
    pub fn gate(&self, index: usize) -> Option<&Gate> {
        self.gates.get(index)
    }

    /// Number of gates.
    pub fn len(&self) -> usize {
        self.gates.len()
    }

    /// Whether the circuit has no gates.
    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    /// Number of two-qubit gates.
    pub fn two_qubit_count(&self) -> usize {
        self.gates.iter().filter(|g| g.is_two_qubit()).count()
    }

    /// Index of the first two-qubit gate at or after `start`.
    pub fn next_two_qubit_index(&self, start: usize) -> Option<usize> {
        self.gates
            .iter()
            .skip(start)
            .position(Gate::is_two_qubit)
            .map(|offset| start + offset)
    }

    /// Append a gate after checking its operands.
    pub fn push(&mut self, gate: Gate) -> IrResult<&mut Self> {
        for q in gate.qubits() {
            self.check_qubit(q, gate.name())?;
        }
        if let Gate::Two { control, target } = gate {
            if control == target {
                return Err(IrError::DuplicateQubit {
                    qubit: control,
                    gate_name: Some("cx".into()),
                });
            }
        }
        self.gates.push(gate);
        Ok(self)
    }

    /// Apply identity.
    pub fn id(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Gate::single(SingleQubitOp::Id, qubit))
    }

    /// Apply `U1(λ)`.
    pub fn u1(&mut self, lambda: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Gate::single(SingleQubitOp::U1 { lambda }, qubit))
    }

    /// Apply `U2(φ, λ)`.
    pub fn u2(&mut self, phi: f64, lambda: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Gate::single(SingleQubitOp::U2 { phi, lambda }, qubit))
    }

    /// Apply `U3(θ, φ, λ)`.
    pub fn u3(&mut self, theta: f64, phi: f64, lambda: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Gate::single(SingleQubitOp::U3 { theta, phi, lambda }, qubit))
    }

    /// Apply CX.
    pub fn cx(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.push(Gate::cx(control, target))
    }

    fn check_qubit(&self, qubit: QubitId, gate_name: &str) -> IrResult<()> {
        if qubit.0 >= self.num_qubits {
            return Err(IrError::QubitOutOfRange {
                qubit,
                num_qubits: self.num_qubits,
                gate_name: Some(gate_name.to_string()),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_chain() {
        let mut circuit = Circuit::new("chain", 3);
        circuit
            .u2(0.0, std::f64::consts::PI, QubitId(0))
            .unwrap()
            .cx(QubitId(0), QubitId(1))
            .unwrap()
            .cx(QubitId(1), QubitId(2))
            .unwrap();
        assert_eq!(circuit.len(), 3);
        assert_eq!(circuit.two_qubit_count(), 2);
        assert_eq!(circuit.next_two_qubit_index(0), Some(1));
        assert_eq!(circuit.next_two_qubit_index(2), Some(2));
        assert_eq!(circuit.next_two_qubit_index(3), None);
    }

    #[test]
    fn test_push_rejects_out_of_range() {
        let mut circuit = Circuit::new("bad", 2);
        let err = circuit.cx(QubitId(0), QubitId(2)).unwrap_err();
        assert!(matches!(err, IrError::QubitOutOfRange { num_qubits: 2, .. }));
        assert!(circuit.is_empty());
    }

    #[test]
    fn test_push_rejects_self_cx() {
        let mut circuit = Circuit::new("bad", 2);
        assert!(matches!(
            circuit.cx(QubitId(1), QubitId(1)),
            Err(IrError::DuplicateQubit { .. })
        ));
    }
}
