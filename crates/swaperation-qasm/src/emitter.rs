//! QASM 2.0 emitter for normalized circuits.

use swaperation_ir::{Circuit, Gate, SingleQubitOp};

/// Emit a circuit as QASM 2.0 source code.
///
/// Angles are written with the shortest representation that parses back to
/// the identical `f64`, so `parse(&emit(c))` reproduces `c` gate for gate.
pub fn emit(circuit: &Circuit) -> String {
    let mut emitter = Emitter::new();
    emitter.emit_circuit(circuit);
    emitter.output
}

struct Emitter {
    output: String,
}

impl Emitter {
    fn new() -> Self {
        Self {
            output: String::new(),
        }
    }

    fn emit_circuit(&mut self, circuit: &Circuit) {
        self.writeln("OPENQASM 2.0;");
        self.writeln("include \"qelib1.inc\";");
        self.writeln(&format!("qreg q[{}];", circuit.num_qubits()));

        for gate in circuit.gates() {
            self.emit_gate(gate);
        }
    }

    fn emit_gate(&mut self, gate: &Gate) {
        match *gate {
            Gate::Single { op, qubit } => {
                let params = emit_params(&op);
                if params.is_empty() {
                    self.writeln(&format!("{} q[{}];", op.name(), qubit.0));
                } else {
                    self.writeln(&format!("{}({params}) q[{}];", op.name(), qubit.0));
                }
            }
            Gate::Two { control, target } => {
                self.writeln(&format!("cx q[{}],q[{}];", control.0, target.0));
            }
        }
    }

    fn writeln(&mut self, line: &str) {
        self.output.push_str(line);
        self.output.push('\n');
    }
}

fn emit_params(op: &SingleQubitOp) -> String {
    op.params()
        .iter()
        .map(|p| format_angle(*p))
        .collect::<Vec<_>>()
        .join(",")
}

/// Shortest round-trip form; exponent notation for very large or small magnitudes.
fn format_angle(value: f64) -> String {
    format!("{value:?}")
}
