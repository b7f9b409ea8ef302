//! Parser for `OpenQASM` 2.0.

mod expression;
mod lowering;
mod statement;

pub(crate) use lowering::lower_to_instructions;

use swaperation_ir::Circuit;

use crate::ast::Program;
use crate::error::{ParseError, ParseResult};
use crate::lexer::{SpannedToken, Token, tokenize};

/// Parse a QASM 2.0 source string into a normalized circuit.
pub fn parse(source: &str) -> ParseResult<Circuit> {
    parse_named("qasm_circuit", source)
}

/// Parse a QASM 2.0 source string into a normalized circuit with the given name.
pub fn parse_named(name: &str, source: &str) -> ParseResult<Circuit> {
    let program = parse_ast(source)?;
    let (num_qubits, instructions) = lower_to_instructions(&program)?;
    Ok(Circuit::from_instructions(name, num_qubits, &instructions)?)
}

/// Parse a QASM 2.0 source string into an AST Program.
pub fn parse_ast(source: &str) -> ParseResult<Program> {
    let mut parser = Parser::new(source)?;
    parser.parse_program()
}

/// Parser state.
pub(super) struct Parser {
    pub(super) tokens: Vec<SpannedToken>,
    pub(super) pos: usize,
}

impl Parser {
    /// Create a new parser from source.
    fn new(source: &str) -> ParseResult<Self> {
        let mut tokens = Vec::new();
        for result in tokenize(source) {
            match result {
                Ok(t) => tokens.push(t),
                Err((position, line, message)) => {
                    return Err(ParseError::LexerError {
                        position,
                        line,
                        message,
                    });
                }
            }
        }
        Ok(Self { tokens, pos: 0 })
    }

    /// Line of the current token, or of the last one at end of input.
    pub(super) fn line(&self) -> usize {
        self.tokens
            .get(self.pos)
            .or_else(|| self.tokens.last())
            .map_or(1, |t| t.line)
    }

    /// Check if we've reached the end.
    pub(super) fn is_eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Peek at the current token.
    pub(super) fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|t| &t.token)
    }

    /// Advance and return the current token.
    pub(super) fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos)?.token.clone();
        self.pos += 1;
        Some(token)
    }

    /// Expect a specific token.
    #[allow(clippy::needless_pass_by_value)]
    pub(super) fn expect(&mut self, expected: Token) -> ParseResult<()> {
        let line = self.line();
        let found = self
            .advance()
            .ok_or_else(|| ParseError::UnexpectedEof(format!("expected {expected}")))?;

        if std::mem::discriminant(&found) != std::mem::discriminant(&expected) {
            return Err(ParseError::UnexpectedToken {
                line,
                expected: expected.to_string(),
                found: found.to_string(),
            });
        }
        Ok(())
    }

    /// Check if current token matches.
    pub(super) fn check(&self, token: &Token) -> bool {
        self.peek()
            .is_some_and(|t| std::mem::discriminant(t) == std::mem::discriminant(token))
    }

    /// Consume token if it matches.
    pub(super) fn consume(&mut self, token: &Token) -> bool {
        if self.check(token) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Parse the entire program.
    fn parse_program(&mut self) -> ParseResult<Program> {
        self.expect(Token::OpenQasm)?;
        let version = self.parse_version()?;
        self.expect(Token::Semicolon)?;

        let mut statements = Vec::new();
        while !self.is_eof() {
            statements.push(self.parse_statement()?);
        }

        Ok(Program {
            version,
            statements,
        })
    }

    /// Parse version number. Only the 2.x line is accepted.
    fn parse_version(&mut self) -> ParseResult<String> {
        let version = match self.advance() {
            Some(Token::FloatLiteral(v)) => format!("{v:?}"),
            Some(Token::IntLiteral(v)) => format!("{v}.0"),
            Some(other) => return Err(ParseError::InvalidVersion(other.to_string())),
            None => return Err(ParseError::UnexpectedEof("version number".into())),
        };
        if !version.starts_with("2.") {
            return Err(ParseError::InvalidVersion(version));
        }
        Ok(version)
    }

    /// Parse an identifier.
    pub(super) fn parse_identifier(&mut self) -> ParseResult<String> {
        let line = self.line();
        match self.advance() {
            Some(Token::Identifier(s)) => Ok(s),
            Some(other) => Err(ParseError::UnexpectedToken {
                line,
                expected: "identifier".into(),
                found: other.to_string(),
            }),
            None => Err(ParseError::UnexpectedEof("identifier".into())),
        }
    }

    /// Parse an integer literal that fits a register index.
    pub(super) fn parse_index(&mut self) -> ParseResult<u32> {
        let line = self.line();
        match self.advance() {
            Some(Token::IntLiteral(v)) => u32::try_from(v).map_err(|_| ParseError::UnexpectedToken {
                line,
                expected: "index below 2^32".into(),
                found: v.to_string(),
            }),
            Some(other) => Err(ParseError::UnexpectedToken {
                line,
                expected: "integer".into(),
                found: other.to_string(),
            }),
            None => Err(ParseError::UnexpectedEof("integer".into())),
        }
    }
}
