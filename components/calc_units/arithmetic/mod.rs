/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Reduction of unit-free arithmetic: decimal literals combined with
//! `+ - * /`, unary signs and parentheses.

use std::fmt;

mod parser;
mod tokenizer;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    /// A character that cannot start any token, typically the suffix of a
    /// length whose unit was not recognized.
    IllegalCharacter,
    InvalidNumericLiteral,
    /// A token that does not fit the grammar at its position, such as an
    /// operator without a right-hand side or an unmatched `)`.
    UnexpectedToken,
    /// The input ended inside an expression, e.g. with an unclosed `(`.
    UnexpectedEndOfInput,
    NestingTooDeep,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let description = match *self {
            Error::IllegalCharacter => "illegal character",
            Error::InvalidNumericLiteral => "invalid numeric literal",
            Error::UnexpectedToken => "unexpected token",
            Error::UnexpectedEndOfInput => "unexpected end of input",
            Error::NestingTooDeep => "parentheses nested too deeply",
        };
        f.write_str(description)
    }
}

/// Evaluates `input` with the usual precedence rules.
pub fn evaluate(input: &str) -> Result<f64, Error> {
    let tokens = tokenizer::tokenize(input)?;
    let expr = parser::parse(&tokens)?;
    Ok(expr.evaluate())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evaluates_with_precedence() {
        assert_eq!(evaluate("(100 - 20) / 4 + 2 * 3"), Ok(26.));
        assert_eq!(evaluate("((1.5))"), Ok(1.5));
        assert_eq!(evaluate("10-5"), Ok(5.));
    }

    #[test]
    fn division_by_zero_is_not_a_syntax_error() {
        assert_eq!(evaluate("1 / 0"), Ok(f64::INFINITY));
    }

    #[test]
    fn rejects_non_arithmetic_content() {
        assert_eq!(evaluate("alert(1)"), Err(Error::IllegalCharacter));
        assert_eq!(evaluate("1 % 2"), Err(Error::IllegalCharacter));
    }
}
