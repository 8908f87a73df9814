/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use super::Error;
use super::tokenizer::{OperatorToken, Token};

/// Parenthesized groups and unary signs deeper than this are rejected instead
/// of recursing further.
const MAX_NESTING_DEPTH: usize = 128;

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Expr {
    Binary(Box<Expr>, BinaryOperator, Box<Expr>),
    Negate(Box<Expr>),
    Number(f64),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum BinaryOperator {
    /// `+`
    Add,
    /// `-`
    Subtract,
    /// `*`
    Multiply,
    /// `/`
    Divide,
}

impl Expr {
    pub(crate) fn evaluate(&self) -> f64 {
        match self {
            Expr::Number(value) => *value,
            Expr::Negate(expr) => -expr.evaluate(),
            Expr::Binary(lhs, operator, rhs) => {
                let (lhs, rhs) = (lhs.evaluate(), rhs.evaluate());
                match operator {
                    BinaryOperator::Add => lhs + rhs,
                    BinaryOperator::Subtract => lhs - rhs,
                    BinaryOperator::Multiply => lhs * rhs,
                    BinaryOperator::Divide => lhs / rhs,
                }
            },
        }
    }
}

struct Parser<'a> {
    tokens: &'a [Token],
    position: usize,
    depth: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.position).copied()
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.peek()?;
        self.position += 1;
        Some(token)
    }

    fn enter(&mut self) -> Result<(), Error> {
        self.depth += 1;
        if self.depth > MAX_NESTING_DEPTH {
            return Err(Error::NestingTooDeep);
        }
        Ok(())
    }

    /// `Sum ::= Product (("+" | "-") Product)*`
    fn parse_sum(&mut self) -> Result<Expr, Error> {
        let mut expr = self.parse_product()?;
        loop {
            let operator = match self.peek() {
                Some(Token::Operator(OperatorToken::Add)) => BinaryOperator::Add,
                Some(Token::Operator(OperatorToken::Subtract)) => BinaryOperator::Subtract,
                _ => return Ok(expr),
            };
            self.position += 1;
            let rhs = self.parse_product()?;
            expr = Expr::Binary(Box::new(expr), operator, Box::new(rhs));
        }
    }

    /// `Product ::= Unary (("*" | "/") Unary)*`
    fn parse_product(&mut self) -> Result<Expr, Error> {
        let mut expr = self.parse_unary()?;
        loop {
            let operator = match self.peek() {
                Some(Token::Operator(OperatorToken::Multiply)) => BinaryOperator::Multiply,
                Some(Token::Operator(OperatorToken::Divide)) => BinaryOperator::Divide,
                _ => return Ok(expr),
            };
            self.position += 1;
            let rhs = self.parse_unary()?;
            expr = Expr::Binary(Box::new(expr), operator, Box::new(rhs));
        }
    }

    /// `Unary ::= ("+" | "-") Unary | Primary`
    fn parse_unary(&mut self) -> Result<Expr, Error> {
        match self.peek() {
            Some(Token::Operator(OperatorToken::Subtract)) => {
                self.position += 1;
                self.enter()?;
                let operand = self.parse_unary()?;
                self.depth -= 1;
                Ok(Expr::Negate(Box::new(operand)))
            },
            Some(Token::Operator(OperatorToken::Add)) => {
                self.position += 1;
                self.enter()?;
                let operand = self.parse_unary()?;
                self.depth -= 1;
                Ok(operand)
            },
            _ => self.parse_primary(),
        }
    }

    /// `Primary ::= Number | "(" Sum ")"`
    fn parse_primary(&mut self) -> Result<Expr, Error> {
        match self.advance() {
            Some(Token::Number(value)) => Ok(Expr::Number(value)),
            Some(Token::OpeningParenthesis) => {
                self.enter()?;
                let expr = self.parse_sum()?;
                self.depth -= 1;
                match self.advance() {
                    Some(Token::ClosingParenthesis) => Ok(expr),
                    Some(token) => {
                        log::debug!("Expected closing parenthesis, found {token:?}");
                        Err(Error::UnexpectedToken)
                    },
                    None => Err(Error::UnexpectedEndOfInput),
                }
            },
            Some(token) => {
                log::debug!("Expected a number or an opening parenthesis, found {token:?}");
                Err(Error::UnexpectedToken)
            },
            None => Err(Error::UnexpectedEndOfInput),
        }
    }
}

pub(crate) fn parse(tokens: &[Token]) -> Result<Expr, Error> {
    let mut parser = Parser {
        tokens,
        position: 0,
        depth: 0,
    };
    let expr = parser.parse_sum()?;
    if let Some(token) = parser.peek() {
        log::debug!("Unexpected trailing token {token:?}");
        return Err(Error::UnexpectedToken);
    }
    Ok(expr)
}
