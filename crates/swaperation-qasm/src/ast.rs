//! Abstract Syntax Tree for `OpenQASM` 2.0.

use serde::{Deserialize, Serialize};

/// A complete QASM 2.0 program.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Program {
    /// QASM version (e.g., "2.0").
    pub version: String,
    /// Statements in the program.
    pub statements: Vec<Statement>,
}

/// A statement in a QASM 2.0 program.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Statement {
    /// Include statement.
    Include(String),

    /// Quantum register: `qreg name[n];`
    QReg { name: String, size: u32 },

    /// Classical register: `creg name[n];`
    CReg { name: String, size: u32 },

    /// Gate application.
    Gate(GateCall),

    /// Barrier: `barrier q;`
    Barrier { qubits: Vec<QubitRef> },

    /// Measurement: `measure q -> c;`
    Measure {
        qubits: Vec<QubitRef>,
        bits: Vec<QubitRef>,
        line: usize,
    },

    /// Reset: `reset q;`
    Reset { qubits: Vec<QubitRef>, line: usize },

    /// Constructs that are recognised but cannot be lowered (`gate`, `opaque`, `if`).
    Unsupported { keyword: String, line: usize },
}

/// A gate call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateCall {
    /// Gate name.
    pub name: String,
    /// Gate parameters (angles).
    pub params: Vec<Expression>,
    /// Operands.
    pub qubits: Vec<QubitRef>,
    /// Source line, for diagnostics.
    pub line: usize,
}

/// Reference to a whole register (`q`) or one element (`q[i]`).
///
/// Classical bit operands use the same shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QubitRef {
    /// Register name.
    pub register: String,
    /// Element index, `None` for the whole register.
    pub index: Option<u32>,
}

impl QubitRef {
    /// Create a reference to a single qubit.
    pub fn single(register: &str, index: u32) -> Self {
        Self {
            register: register.to_string(),
            index: Some(index),
        }
    }

    /// Create a reference to an entire register.
    pub fn register(register: &str) -> Self {
        Self {
            register: register.to_string(),
            index: None,
        }
    }
}

/// A classical parameter expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expression {
    /// Integer literal.
    Int(u64),
    /// Float literal.
    Float(f64),
    /// The constant π.
    Pi,
    /// Unary negation.
    Neg(Box<Expression>),
    /// Binary operation.
    BinOp {
        left: Box<Expression>,
        op: BinOp,
        right: Box<Expression>,
    },
    /// Parenthesized expression.
    Paren(Box<Expression>),
    /// Call to a built-in unary function (`sin`, `cos`, `tan`, `exp`, `ln`, `sqrt`).
    FnCall { name: String, arg: Box<Expression> },
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl Expression {
    /// Evaluate to a number. `None` for calls to unknown functions.
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Expression::Int(v) => Some(*v as f64),
            Expression::Float(v) => Some(*v),
            Expression::Pi => Some(std::f64::consts::PI),
            Expression::Neg(e) => e.as_f64().map(|v| -v),
            Expression::Paren(e) => e.as_f64(),
            Expression::BinOp { left, op, right } => {
                let l = left.as_f64()?;
                let r = right.as_f64()?;
                Some(match op {
                    BinOp::Add => l + r,
                    BinOp::Sub => l - r,
                    BinOp::Mul => l * r,
                    BinOp::Div => l / r,
                    BinOp::Pow => l.powf(r),
                })
            }
            Expression::FnCall { name, arg } => {
                let v = arg.as_f64()?;
                match name.as_str() {
                    "sin" => Some(v.sin()),
                    "cos" => Some(v.cos()),
                    "tan" => Some(v.tan()),
                    "exp" => Some(v.exp()),
                    "ln" => Some(v.ln()),
                    "sqrt" => Some(v.sqrt()),
                    _ => None,
                }
            }
        }
    }
}
