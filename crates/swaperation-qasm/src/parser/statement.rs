//! Statement parsing for QASM 2.0.

use super::Parser;
use crate::ast::{GateCall, QubitRef, Statement};
use crate::error::{ParseError, ParseResult};
use crate::lexer::Token;

impl Parser {
    /// Parse a statement.
    pub(super) fn parse_statement(&mut self) -> ParseResult<Statement> {
        let line = self.line();
        let token = self
            .peek()
            .cloned()
            .ok_or_else(|| ParseError::UnexpectedEof("statement".into()))?;

        match token {
            Token::Include => self.parse_include(),
            Token::QReg => self.parse_register(true),
            Token::CReg => self.parse_register(false),
            Token::Measure => self.parse_measure(),
            Token::Reset => self.parse_reset(),
            Token::Barrier => self.parse_barrier(),
            Token::Gate | Token::Opaque | Token::If => self.skip_unsupported(&token),
            Token::Identifier(_) => self.parse_gate_call(),
            _ => Err(ParseError::UnexpectedToken {
                line,
                expected: "statement".into(),
                found: token.to_string(),
            }),
        }
    }

    /// Parse include statement.
    fn parse_include(&mut self) -> ParseResult<Statement> {
        self.expect(Token::Include)?;
        let line = self.line();
        let path = match self.advance() {
            Some(Token::StringLiteral(s)) => s,
            Some(other) => {
                return Err(ParseError::UnexpectedToken {
                    line,
                    expected: "string literal".into(),
                    found: other.to_string(),
                });
            }
            None => return Err(ParseError::UnexpectedEof("include path".into())),
        };
        self.expect(Token::Semicolon)?;
        Ok(Statement::Include(path))
    }

    /// Parse `qreg name[n];` or `creg name[n];`.
    fn parse_register(&mut self, quantum: bool) -> ParseResult<Statement> {
        self.advance();
        let name = self.parse_identifier()?;
        self.expect(Token::LBracket)?;
        let size = self.parse_index()?;
        self.expect(Token::RBracket)?;
        self.expect(Token::Semicolon)?;

        Ok(if quantum {
            Statement::QReg { name, size }
        } else {
            Statement::CReg { name, size }
        })
    }

    /// Parse measure statement.
    fn parse_measure(&mut self) -> ParseResult<Statement> {
        let line = self.line();
        self.expect(Token::Measure)?;
        let qubits = vec![self.parse_qubit_ref()?];
        self.expect(Token::Arrow)?;
        let bits = vec![self.parse_qubit_ref()?];
        self.expect(Token::Semicolon)?;
        Ok(Statement::Measure { qubits, bits, line })
    }

    /// Parse reset statement.
    fn parse_reset(&mut self) -> ParseResult<Statement> {
        let line = self.line();
        self.expect(Token::Reset)?;
        let qubits = vec![self.parse_qubit_ref()?];
        self.expect(Token::Semicolon)?;
        Ok(Statement::Reset { qubits, line })
    }

    /// Parse barrier statement.
    fn parse_barrier(&mut self) -> ParseResult<Statement> {
        self.expect(Token::Barrier)?;
        let qubits = self.parse_qubit_refs()?;
        self.expect(Token::Semicolon)?;
        Ok(Statement::Barrier { qubits })
    }

    /// Skip a `gate`/`opaque` definition or an `if` statement so lowering can
    /// report it with its line.
    fn skip_unsupported(&mut self, keyword: &Token) -> ParseResult<Statement> {
        let line = self.line();
        self.advance();
        let mut depth = 0usize;
        loop {
            match self.advance() {
                Some(Token::LBrace) => depth += 1,
                Some(Token::RBrace) => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        break;
                    }
                }
                Some(Token::Semicolon) if depth == 0 => break,
                Some(_) => {}
                None => return Err(ParseError::UnexpectedEof(format!("end of {keyword}"))),
            }
        }
        Ok(Statement::Unsupported {
            keyword: keyword.to_string(),
            line,
        })
    }

    /// Parse gate call.
    fn parse_gate_call(&mut self) -> ParseResult<Statement> {
        let line = self.line();
        let name = self.parse_identifier()?;

        let params = if self.consume(&Token::LParen) {
            let p = self.parse_expression_list()?;
            self.expect(Token::RParen)?;
            p
        } else {
            vec![]
        };

        let qubits = self.parse_qubit_refs()?;
        self.expect(Token::Semicolon)?;

        Ok(Statement::Gate(GateCall {
            name,
            params,
            qubits,
            line,
        }))
    }

    /// Parse qubit references.
    fn parse_qubit_refs(&mut self) -> ParseResult<Vec<QubitRef>> {
        let mut refs = vec![self.parse_qubit_ref()?];
        while self.consume(&Token::Comma) {
            refs.push(self.parse_qubit_ref()?);
        }
        Ok(refs)
    }

    /// Parse a single qubit reference.
    fn parse_qubit_ref(&mut self) -> ParseResult<QubitRef> {
        let register = self.parse_identifier()?;
        let index = if self.consume(&Token::LBracket) {
            let index = self.parse_index()?;
            self.expect(Token::RBracket)?;
            Some(index)
        } else {
            None
        };
        Ok(QubitRef { register, index })
    }
}
