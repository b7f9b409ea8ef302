//! `OpenQASM` 2.0 reader and writer for Swaperation
//!
//! Circuits enter and leave Swaperation as QASM 2.0 text. Parsing lowers
//! the source into the input gate vocabulary and normalizes it to
//! `{id, u1, u2, u3, cx}`; emitting writes exactly that gate set back out.
//!
//! # Supported Features
//!
//! | Feature | Status | Example |
//! |---------|--------|---------|
//! | Version declaration | ✅ | `OPENQASM 2.0;` |
//! | Include | ✅ (ignored) | `include "qelib1.inc";` |
//! | Registers | ✅ | `qreg q[5];`, `creg c[5];` |
//! | Standard gates | ✅ | `h q[0];`, `cx q[0],q[1];` |
//! | Parameterized gates | ✅ | `u3(pi/2,0,pi) q[0];` |
//! | Register broadcast | ✅ | `h q;`, `cx a,b;` |
//! | Barriers | ✅ (dropped) | `barrier q;` |
//! | Measure / reset | ❌ | not unitary |
//! | Gate definitions, `if` | ❌ | |
//!
//! # Example: Round-Trip
//!
//! ```rust
//! use swaperation_qasm::{emit, parse};
//!
//! let source = r#"
//! OPENQASM 2.0;
//! include "qelib1.inc";
//! qreg q[3];
//! h q[0];
//! cx q[0],q[1];
//! cz q[1],q[2];
//! "#;
//!
//! let circuit = parse(source).unwrap();
//! assert_eq!(circuit.two_qubit_count(), 2);
//!
//! let reparsed = parse(&emit(&circuit)).unwrap();
//! assert_eq!(reparsed.gates(), circuit.gates());
//! ```

mod ast;
mod emitter;
mod error;
mod lexer;
mod parser;

pub use emitter::emit;
pub use error::{ParseError, ParseResult};
pub use parser::{parse, parse_ast, parse_named};

/// AST types for callers that need the statement structure.
pub mod syntax {
    pub use crate::ast::*;
}
