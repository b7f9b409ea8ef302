//! Input instructions combining a [`StandardGate`] with its operands.

use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::gate::StandardGate;
use crate::qubit::QubitId;

/// A gate from the input vocabulary applied to concrete qubits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    /// The gate.
    pub gate: StandardGate,
    /// Operands, controls first.
    pub qubits: Vec<QubitId>,
}

impl Instruction {
    /// Create an instruction.
    pub fn new(gate: StandardGate, qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            gate,
            qubits: qubits.into_iter().collect(),
        }
    }

    /// Create a single-qubit instruction.
    pub fn single_qubit_gate(gate: StandardGate, qubit: QubitId) -> Self {
        Self::new(gate, [qubit])
    }

    /// Create a two-qubit instruction.
    pub fn two_qubit_gate(gate: StandardGate, q1: QubitId, q2: QubitId) -> Self {
        Self::new(gate, [q1, q2])
    }

    /// Check operand count, range and distinctness against a register of `num_qubits`.
    pub fn validate(&self, num_qubits: u32) -> IrResult<()> {
        let expected = self.gate.num_qubits();
        let got = self.qubits.len() as u32;
        if got != expected {
            return Err(IrError::QubitCountMismatch {
                gate_name: self.gate.name().to_string(),
                expected,
                got,
            });
        }
        for (i, &q) in self.qubits.iter().enumerate() {
            if q.0 >= num_qubits {
                return Err(IrError::QubitOutOfRange {
                    qubit: q,
                    num_qubits,
                    gate_name: Some(self.gate.name().to_string()),
                });
            }
            if self.qubits[..i].contains(&q) {
                return Err(IrError::DuplicateQubit {
                    qubit: q,
                    gate_name: Some(self.gate.name().to_string()),
                });
            }
        }
        Ok(())
    }
}
