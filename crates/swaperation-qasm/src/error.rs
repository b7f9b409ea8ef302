//! Error types for the QASM parser.

use swaperation_ir::IrError;
use thiserror::Error;

/// Errors that can occur during parsing.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ParseError {
    /// Lexer error (invalid token).
    #[error("Lexer error at line {line} (byte {position}): {message}")]
    LexerError {
        position: usize,
        line: usize,
        message: String,
    },

    /// Unexpected token.
    #[error("Unexpected token at line {line}: expected {expected}, found {found}")]
    UnexpectedToken {
        line: usize,
        expected: String,
        found: String,
    },

    /// Unexpected end of input.
    #[error("Unexpected end of input: {0}")]
    UnexpectedEof(String),

    /// Invalid version.
    #[error("Invalid OPENQASM version: {0} (expected 2.0)")]
    InvalidVersion(String),

    /// Undefined register.
    #[error("Undefined register: {0}")]
    UndefinedRegister(String),

    /// Duplicate register declaration.
    #[error("Duplicate declaration: {0}")]
    DuplicateDeclaration(String),

    /// Unknown gate.
    #[error("Unknown gate at line {line}: {name}")]
    UnknownGate { line: usize, name: String },

    /// Wrong number of operands.
    #[error("Gate '{gate}' at line {line} expects {expected} qubits, got {got}")]
    WrongQubitCount {
        line: usize,
        gate: String,
        expected: usize,
        got: usize,
    },

    /// Wrong number of parameters.
    #[error("Gate '{gate}' at line {line} expects {expected} parameters, got {got}")]
    WrongParameterCount {
        line: usize,
        gate: String,
        expected: usize,
        got: usize,
    },

    /// Broadcast over registers of different sizes.
    #[error("Register size mismatch in '{gate}' at line {line}")]
    BroadcastMismatch { line: usize, gate: String },

    /// Index out of bounds.
    #[error("Index {index} out of bounds for register '{register}' of size {size}")]
    IndexOutOfBounds {
        register: String,
        index: usize,
        size: usize,
    },

    /// Parameter expression that does not evaluate to a number.
    #[error("Cannot evaluate parameter expression at line {0}")]
    InvalidExpression(usize),

    /// Construct that has no unitary meaning or is outside the supported subset.
    #[error("Unsupported construct at line {line}: {what}")]
    Unsupported { line: usize, what: String },

    /// IR error during circuit construction.
    #[error("Circuit error: {0}")]
    Circuit(#[from] IrError),
}

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;
