//! Expression parsing for QASM 2.0 gate parameters.

use super::Parser;
use crate::ast::{BinOp, Expression};
use crate::error::{ParseError, ParseResult};
use crate::lexer::Token;

impl Parser {
    /// Parse an expression.
    pub(super) fn parse_expression(&mut self) -> ParseResult<Expression> {
        self.parse_binary_expr(0)
    }

    /// Parse binary expression with precedence climbing.
    fn parse_binary_expr(&mut self, min_prec: u8) -> ParseResult<Expression> {
        let mut left = self.parse_unary_expr()?;

        while let Some(op) = self.peek_binary_op() {
            let prec = op_precedence(op);
            if prec < min_prec {
                break;
            }
            self.advance();

            // `^` is right-associative
            let next_min = if op == BinOp::Pow { prec } else { prec + 1 };
            let right = self.parse_binary_expr(next_min)?;
            left = Expression::BinOp {
                left: Box::new(left),
                op,
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    /// Parse unary expression.
    fn parse_unary_expr(&mut self) -> ParseResult<Expression> {
        if self.consume(&Token::Minus) {
            let expr = self.parse_unary_expr()?;
            return Ok(Expression::Neg(Box::new(expr)));
        }
        if self.consume(&Token::Plus) {
            return self.parse_unary_expr();
        }
        self.parse_primary_expr()
    }

    /// Parse primary expression.
    fn parse_primary_expr(&mut self) -> ParseResult<Expression> {
        let line = self.line();
        let token = self
            .advance()
            .ok_or_else(|| ParseError::UnexpectedEof("expression".into()))?;

        match token {
            Token::IntLiteral(v) => Ok(Expression::Int(v)),
            Token::FloatLiteral(v) => Ok(Expression::Float(v)),
            Token::Pi => Ok(Expression::Pi),
            Token::Identifier(name) => {
                self.expect(Token::LParen)?;
                let arg = self.parse_expression()?;
                self.expect(Token::RParen)?;
                Ok(Expression::FnCall {
                    name,
                    arg: Box::new(arg),
                })
            }
            Token::LParen => {
                let expr = self.parse_expression()?;
                self.expect(Token::RParen)?;
                Ok(Expression::Paren(Box::new(expr)))
            }
            other => Err(ParseError::UnexpectedToken {
                line,
                expected: "expression".into(),
                found: other.to_string(),
            }),
        }
    }

    /// Peek at binary operator.
    fn peek_binary_op(&self) -> Option<BinOp> {
        match self.peek()? {
            Token::Plus => Some(BinOp::Add),
            Token::Minus => Some(BinOp::Sub),
            Token::Star => Some(BinOp::Mul),
            Token::Slash => Some(BinOp::Div),
            Token::Caret => Some(BinOp::Pow),
            _ => None,
        }
    }

    /// Parse expression list.
    pub(super) fn parse_expression_list(&mut self) -> ParseResult<Vec<Expression>> {
        if self.check(&Token::RParen) {
            return Ok(vec![]);
        }
        let mut exprs = vec![self.parse_expression()?];
        while self.consume(&Token::Comma) {
            exprs.push(self.parse_expression()?);
        }
        Ok(exprs)
    }
}

/// Get operator precedence.
fn op_precedence(op: BinOp) -> u8 {
    match op {
        BinOp::Add | BinOp::Sub => 1,
        BinOp::Mul | BinOp::Div => 2,
        BinOp::Pow => 3,
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::parse_ast;
    use crate::ast::Statement;

    fn first_param(source: &str) -> f64 {
        let program = parse_ast(source).unwrap();
        let call = program
            .statements
            .iter()
            .find_map(|s| match s {
                Statement::Gate(call) => Some(call.clone()),
                _ => None,
            })
            .unwrap();
        call.params[0].as_f64().unwrap()
    }

    #[test]
    fn test_precedence() {
        let v = first_param("OPENQASM 2.0; qreg q[1]; u1(1+2*3) q[0];");
        assert!((v - 7.0).abs() < 1e-12);
    }

    #[test]
    fn test_unary_minus_and_pi() {
        let v = first_param("OPENQASM 2.0; qreg q[1]; u1(-pi/4) q[0];");
        assert!((v + std::f64::consts::FRAC_PI_4).abs() < 1e-15);
    }

    #[test]
    fn test_power_right_assoc() {
        let v = first_param("OPENQASM 2.0; qreg q[1]; u1(2^3^2) q[0];");
        assert!((v - 512.0).abs() < 1e-9);
    }

    #[test]
    fn test_function_call() {
        let v = first_param("OPENQASM 2.0; qreg q[1]; u1(cos(0)) q[0];");
        assert!((v - 1.0).abs() < 1e-15);
    }
}
