/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use std::fmt;

use crate::arithmetic;
use crate::units::ContainerUnit;

/// The ways evaluating a calc expression can fail.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CalcError {
    /// What was left after substituting lengths was not a valid arithmetic
    /// expression. Unrecognized unit suffixes end up here too, since they are
    /// never substituted.
    Syntax(arithmetic::Error),
    /// The unit table has no entry for a unit used by the expression.
    UnresolvedUnit(ContainerUnit),
    /// The expression reduced to infinity or NaN, e.g. by dividing by zero.
    NonFiniteResult,
}

impl std::error::Error for CalcError {}

impl fmt::Display for CalcError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            CalcError::Syntax(error) => write!(f, "Invalid calc expression: {error}"),
            CalcError::UnresolvedUnit(unit) => {
                write!(f, "No resolved length for unit `{}`", unit.as_str())
            },
            CalcError::NonFiniteResult => {
                f.write_str("Calc expression did not reduce to a finite length")
            },
        }
    }
}

impl From<arithmetic::Error> for CalcError {
    fn from(error: arithmetic::Error) -> Self {
        CalcError::Syntax(error)
    }
}
