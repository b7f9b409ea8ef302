//! AST lowering to input instructions.

use rustc_hash::FxHashMap;
use swaperation_ir::{Instruction, IrError, QubitId, StandardGate};

use crate::ast::{GateCall, Program, QubitRef, Statement};
use crate::error::{ParseError, ParseResult};

/// Lower an AST Program to its qubit count and instruction list.
///
/// Quantum registers are flattened in declaration order. Whole-register
/// operands broadcast element-wise as in QASM 2.0.
pub(crate) fn lower_to_instructions(program: &Program) -> ParseResult<(u32, Vec<Instruction>)> {
    let mut lowerer = Lowerer::default();
    lowerer.lower(program)
}

#[derive(Default)]
struct Lowerer {
    /// Qubit registers: name -> (`start_id`, size).
    qregs: FxHashMap<String, (u32, u32)>,
    /// Classical registers, tracked only to catch name clashes.
    cregs: FxHashMap<String, u32>,
    /// Next qubit ID.
    next_qubit: u32,
}

impl Lowerer {
    fn lower(&mut self, program: &Program) -> ParseResult<(u32, Vec<Instruction>)> {
        // First pass: collect declarations
        for stmt in &program.statements {
            match stmt {
                Statement::QReg { name, size } => {
                    if self.qregs.contains_key(name) || self.cregs.contains_key(name) {
                        return Err(ParseError::DuplicateDeclaration(name.clone()));
                    }
                    self.qregs.insert(name.clone(), (self.next_qubit, *size));
                    self.next_qubit += size;
                }
                Statement::CReg { name, size } => {
                    if self.qregs.contains_key(name) || self.cregs.contains_key(name) {
                        return Err(ParseError::DuplicateDeclaration(name.clone()));
                    }
                    self.cregs.insert(name.clone(), *size);
                }
                _ => {}
            }
        }

        // Second pass: lower statements
        let mut instructions = Vec::new();
        for stmt in &program.statements {
            match stmt {
                Statement::Include(_) | Statement::QReg { .. } | Statement::CReg { .. } => {}
                Statement::Gate(call) => self.lower_gate_call(call, &mut instructions)?,
                Statement::Barrier { qubits } => {
                    // No unitary action; only check the operands exist.
                    for r in qubits {
                        self.resolve(r)?;
                    }
                }
                Statement::Measure { line, .. } => {
                    return Err(ParseError::Unsupported {
                        line: *line,
                        what: "measure is not a unitary operation".into(),
                    });
                }
                Statement::Reset { line, .. } => {
                    return Err(ParseError::Unsupported {
                        line: *line,
                        what: "reset is not a unitary operation".into(),
                    });
                }
                Statement::Unsupported { keyword, line } => {
                    return Err(ParseError::Unsupported {
                        line: *line,
                        what: format!("'{keyword}' statements"),
                    });
                }
            }
        }

        Ok((self.next_qubit, instructions))
    }

    fn lower_gate_call(&self, call: &GateCall, out: &mut Vec<Instruction>) -> ParseResult<()> {
        let params = call
            .params
            .iter()
            .map(|p| p.as_f64().ok_or(ParseError::InvalidExpression(call.line)))
            .collect::<ParseResult<Vec<_>>>()?;

        let gate = StandardGate::from_name(&call.name, &params).map_err(|e| match e {
            IrError::UnknownGate(name) => ParseError::UnknownGate {
                line: call.line,
                name,
            },
            IrError::ParameterCountMismatch {
                gate_name,
                expected,
                got,
            } => ParseError::WrongParameterCount {
                line: call.line,
                gate: gate_name,
                expected,
                got,
            },
            other => ParseError::Circuit(other),
        })?;

        let arity = gate.num_qubits() as usize;
        if call.qubits.len() != arity {
            return Err(ParseError::WrongQubitCount {
                line: call.line,
                gate: call.name.clone(),
                expected: arity,
                got: call.qubits.len(),
            });
        }

        let operands = call
            .qubits
            .iter()
            .map(|r| self.resolve(r))
            .collect::<ParseResult<Vec<_>>>()?;

        // Every whole-register operand must share one broadcast width.
        let mut width = 1;
        for ids in &operands {
            if ids.len() != 1 {
                if width != 1 && width != ids.len() {
                    return Err(ParseError::BroadcastMismatch {
                        line: call.line,
                        gate: call.name.clone(),
                    });
                }
                width = ids.len();
            }
        }

        for i in 0..width {
            let qubits = operands
                .iter()
                .map(|ids| if ids.len() == 1 { ids[0] } else { ids[i] });
            out.push(Instruction::new(gate, qubits));
        }
        Ok(())
    }

    fn resolve(&self, r: &QubitRef) -> ParseResult<Vec<QubitId>> {
        let (start, size) = *self
            .qregs
            .get(&r.register)
            .ok_or_else(|| ParseError::UndefinedRegister(r.register.clone()))?;

        match r.index {
            Some(idx) if idx >= size => Err(ParseError::IndexOutOfBounds {
                register: r.register.clone(),
                index: idx as usize,
                size: size as usize,
            }),
            Some(idx) => Ok(vec![QubitId(start + idx)]),
            None => Ok((start..start + size).map(QubitId).collect()),
        }
    }
}
