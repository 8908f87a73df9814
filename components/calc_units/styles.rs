/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Evaluation of every `calc()` value in a map of style properties.

use std::borrow::Cow;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::calc::evaluate_calc;
use crate::error::CalcError;
use crate::resolver::UnitSource;
use crate::units::Axis;

/// Style property names mapped to their values, in declaration order.
pub type StyleMap = IndexMap<String, String>;

/// Properties whose percentages refer to the height of the containing block.
/// Both the CSS and the script spelling are listed.
static VERTICAL_PROPERTIES: &[&str] = &[
    "top",
    "bottom",
    "height",
    "min-height",
    "minHeight",
    "max-height",
    "maxHeight",
];

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct StyleOptions {
    /// Rewrite the given map instead of returning an evaluated copy.
    pub mutate: bool,
}

pub fn is_vertical_property(name: &str) -> bool {
    VERTICAL_PROPERTIES.contains(&name)
}

pub fn is_calc(value: &str) -> bool {
    value.starts_with("calc(")
}

/// The axis percentages of `property` resolve along.
pub fn axis_for_property(property: &str) -> Axis {
    if is_vertical_property(property) {
        Axis::Vertical
    } else {
        Axis::Horizontal
    }
}

/// Replaces every `calc()` value of `styles` with the pixel length it
/// evaluates to. Other values are kept as they are.
///
/// Units are resolved once for the whole map, and only if some value needs
/// them. Either every value is evaluated or the error of the first failing one
/// is returned and nothing is written.
///
/// `styles` is borrowed mutably even when `options.mutate` is false, so that
/// both modes share one signature and the rewritten map can be handed back as
/// [`Cow::Borrowed`]. Copy-mode callers get an owned map and their input is
/// left as it was.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(skip_all, level = "trace")
)]
pub fn evaluate_styles<'s, 'a>(
    styles: &'s mut StyleMap,
    source: impl UnitSource<'a>,
    options: StyleOptions,
) -> Result<Cow<'s, StyleMap>, CalcError> {
    let evaluated = if styles.values().any(|value| is_calc(value)) {
        let units = source.unit_table();
        styles
            .iter()
            .filter(|(_, value)| is_calc(value))
            .map(|(name, value)| {
                evaluate_calc(value, &*units, axis_for_property(name)).map(|px| (name.clone(), px))
            })
            .collect::<Result<Vec<_>, _>>()?
    } else {
        vec![]
    };

    if options.mutate {
        styles.extend(evaluated);
        return Ok(Cow::Borrowed(styles));
    }

    let mut copy = styles.clone();
    copy.extend(evaluated);
    Ok(Cow::Owned(copy))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::UnitTable;

    fn styles(entries: &[(&str, &str)]) -> StyleMap {
        entries
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn vertical_properties() {
        assert!(is_vertical_property("top"));
        assert!(is_vertical_property("height"));
        assert!(is_vertical_property("maxHeight"));
        assert!(!is_vertical_property("left"));
        assert!(!is_vertical_property("margin-top"));
        assert_eq!(axis_for_property("bottom"), Axis::Vertical);
        assert_eq!(axis_for_property("width"), Axis::Horizontal);
    }

    #[test]
    fn calc_detection_is_a_prefix_check() {
        assert!(is_calc("calc(1px)"));
        assert!(!is_calc(" calc(1px)"));
        assert!(!is_calc("10px"));
        assert!(!is_calc("calculate"));
    }

    #[test]
    fn percentages_follow_the_property() {
        let table = UnitTable::new(2., 3.);
        let mut input = styles(&[
            ("top", "calc(10%)"),
            ("left", "calc(10%)"),
            ("color", "red"),
        ]);
        let output = evaluate_styles(&mut input, &table, StyleOptions::default()).unwrap();
        assert_eq!(
            output.into_owned(),
            styles(&[("top", "30px"), ("left", "20px"), ("color", "red")])
        );
    }

    #[test]
    fn failure_leaves_mutated_map_untouched() {
        let table = UnitTable::new(2., 3.);
        let mut input = styles(&[("top", "calc(10%)"), ("left", "calc(1 +)")]);
        let before = input.clone();
        assert!(evaluate_styles(&mut input, &table, StyleOptions { mutate: true }).is_err());
        assert_eq!(input, before);
    }
}
