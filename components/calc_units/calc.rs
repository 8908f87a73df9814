/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! [Calc expressions][calc] reduced to a single pixel length.
//!
//! Every `<number><unit>` in the expression is replaced by the number of
//! pixels it stands for, and what remains is plain arithmetic.
//!
//! [calc]: https://drafts.csswg.org/css-values/#calc-notation

use std::sync::LazyLock;

use log::{debug, trace};
use regex::Regex;
use strum::IntoEnumIterator;

use crate::arithmetic;
use crate::error::CalcError;
use crate::resolver::UnitSource;
use crate::units::{AbsoluteUnit, Axis, ContainerUnit, LengthUnit, UnitTable};

/// Matches an unsigned number, with an optional fraction and exponent,
/// followed by one of the suffixes we can substitute. Literals without a
/// suffix are left for the arithmetic.
static LENGTH_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    let units: Vec<&'static str> = ContainerUnit::iter()
        .map(ContainerUnit::as_str)
        .chain(AbsoluteUnit::iter().map(AbsoluteUnit::as_str))
        .chain(["%", "px"])
        .collect();
    Regex::new(&format!(
        r"(\d+(?:\.\d+)?(?:[eE][+-]?\d+)?|\.\d+(?:[eE][+-]?\d+)?)({})",
        units.join("|")
    ))
    .expect("length token pattern should compile")
});

/// Whether `c` would merge with a substituted number into a different token.
fn is_glued(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '.'
}

/// Replaces each length in `expression` with its size in pixels.
///
/// A length that touches another number, a letter or a period, such as the
/// second half of `2px3px` or the tail of `1.2.5em`, is rejected rather than
/// substituted.
fn substitute_lengths(
    expression: &str,
    units: &UnitTable,
    axis: Axis,
) -> Result<String, CalcError> {
    let mut output = String::with_capacity(expression.len());
    let mut last_end = 0;

    for captures in LENGTH_TOKEN.captures_iter(expression) {
        let (Some(whole), Some(number), Some(suffix)) =
            (captures.get(0), captures.get(1), captures.get(2))
        else {
            continue;
        };
        let Some(unit) = LengthUnit::from_suffix(suffix.as_str()) else {
            continue;
        };
        let before = expression[..whole.start()].chars().next_back();
        let after = expression[whole.end()..].chars().next();
        if before.is_some_and(is_glued) || after.is_some_and(is_glued) {
            debug!("Length {:?} is not separated from its neighbours", whole.as_str());
            return Err(CalcError::Syntax(arithmetic::Error::UnexpectedToken));
        }
        let number: f64 = number
            .as_str()
            .parse()
            .map_err(|_| CalcError::Syntax(arithmetic::Error::InvalidNumericLiteral))?;
        let px = number * units.px_per_unit(unit, axis)?;
        trace!("Substituting {} with {px}", whole.as_str());

        output.push_str(&expression[last_end..whole.start()]);
        output.push_str(&px.to_string());
        last_end = whole.end();
    }

    output.push_str(&expression[last_end..]);
    Ok(output)
}

/// Evaluates `expression` to a number of pixels.
///
/// The leading `calc` is optional. Percentages are resolved along `axis`.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(skip(source), level = "trace")
)]
pub fn evaluate_calc_px<'a>(
    expression: &str,
    source: impl UnitSource<'a>,
    axis: Axis,
) -> Result<f64, CalcError> {
    let units = source.unit_table();

    let trimmed = expression.trim();
    let arguments = trimmed.strip_prefix("calc").unwrap_or(trimmed);
    let unit_free = substitute_lengths(arguments, &units, axis)?;

    let px = arithmetic::evaluate(&unit_free)?;
    if !px.is_finite() {
        return Err(CalcError::NonFiniteResult);
    }

    debug!("{expression:?} evaluated to {px}px");
    Ok(px)
}

/// Evaluates `expression` and serializes the result as a `px` length.
pub fn evaluate_calc<'a>(
    expression: &str,
    source: impl UnitSource<'a>,
    axis: Axis,
) -> Result<String, CalcError> {
    evaluate_calc_px(expression, source, axis).map(|px| format!("{px}px"))
}
