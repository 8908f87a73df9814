/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use super::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum OperatorToken {
    Add,
    Subtract,
    Multiply,
    Divide,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Token {
    Number(f64),
    Operator(OperatorToken),
    /// `(`
    OpeningParenthesis,
    /// `)`
    ClosingParenthesis,
}

struct Tokenizer<'a> {
    remaining: &'a str,
}

impl<'a> Tokenizer<'a> {
    /// Parses a single token from the beginning and updates the remaining input accordingly.
    ///
    /// ## Panics
    /// Panics when the remaining input is empty.
    fn consume_single_token(&mut self) -> Result<Token, Error> {
        let first = self
            .remaining
            .chars()
            .next()
            .expect("consume_single_token called with empty input");

        let token = match first {
            '0'..='9' | '.' => return self.consume_numeric_literal().map(Token::Number),
            '+' => Token::Operator(OperatorToken::Add),
            '-' => Token::Operator(OperatorToken::Subtract),
            '*' => Token::Operator(OperatorToken::Multiply),
            '/' => Token::Operator(OperatorToken::Divide),
            '(' => Token::OpeningParenthesis,
            ')' => Token::ClosingParenthesis,
            other => {
                log::debug!("Illegal character in calc expression: {other:?}");
                return Err(Error::IllegalCharacter);
            },
        };

        self.remaining = &self.remaining[first.len_utf8()..];
        Ok(token)
    }

    /// Consumes `digits [ "." digits ] [ ("e" | "E") [ "+" | "-" ] digits ]`, where
    /// either the integer or the fractional digits may be empty but not both.
    ///
    /// An exponent marker that is not followed by digits is left in the input.
    fn consume_numeric_literal(&mut self) -> Result<f64, Error> {
        let bytes = self.remaining.as_bytes();
        let skip_digits = |mut index: usize| {
            while bytes.get(index).is_some_and(u8::is_ascii_digit) {
                index += 1;
            }
            index
        };

        let integer_end = skip_digits(0);
        let mut end = integer_end;
        if bytes.get(end) == Some(&b'.') {
            end = skip_digits(end + 1);
        }

        // A lone "." is not a number.
        if end == 1 && integer_end == 0 {
            return Err(Error::InvalidNumericLiteral);
        }

        if matches!(bytes.get(end), Some(b'e' | b'E')) {
            let mut exponent_start = end + 1;
            if matches!(bytes.get(exponent_start), Some(b'+' | b'-')) {
                exponent_start += 1;
            }
            let exponent_end = skip_digits(exponent_start);
            if exponent_end > exponent_start {
                end = exponent_end;
            }
        }

        let (literal, remaining) = self.remaining.split_at(end);
        let value = literal.parse().map_err(|error| {
            log::warn!(
                "Failed to parse numeric literal ({literal:?}) that looked valid: {error:?}"
            );
            Error::InvalidNumericLiteral
        })?;
        self.remaining = remaining;
        Ok(value)
    }

    fn skip_whitespace(&mut self) {
        self.remaining = self
            .remaining
            .trim_start_matches(|c: char| c.is_ascii_whitespace());
    }
}

pub(crate) fn tokenize(input: &str) -> Result<Vec<Token>, Error> {
    let mut tokenizer = Tokenizer { remaining: input };
    let mut tokens = vec![];

    tokenizer.skip_whitespace();
    while !tokenizer.remaining.is_empty() {
        tokens.push(tokenizer.consume_single_token()?);
        tokenizer.skip_whitespace();
    }

    Ok(tokens)
}
