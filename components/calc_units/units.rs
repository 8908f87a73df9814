/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Length units recognized inside `calc()` and the per-container table of
//! their pixel ratios.
//!
//! <https://drafts.csswg.org/css-values/#lengths>

use std::str::FromStr;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use strum::{EnumIter, EnumString, IntoStaticStr};

use crate::error::CalcError;

/// Number of CSS pixels in an inch.
pub const PX_PER_IN: f64 = 96.;
/// Number of CSS pixels in a centimeter.
pub const PX_PER_CM: f64 = PX_PER_IN / 2.54;
/// Number of CSS pixels in a millimeter.
pub const PX_PER_MM: f64 = PX_PER_IN / 25.4;
/// Number of CSS pixels in a point.
pub const PX_PER_PT: f64 = PX_PER_IN / 72.;

/// A unit whose size depends on the measuring context (the viewport, the
/// container's font or the root font), and which therefore has to be measured
/// rather than computed.
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    EnumIter,
    EnumString,
    Eq,
    Hash,
    IntoStaticStr,
    PartialEq,
    Serialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ContainerUnit {
    Em,
    Ex,
    Ch,
    Rem,
    Vh,
    Vw,
    Vmin,
    Vmax,
}

impl ContainerUnit {
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// A physical unit with a fixed ratio to CSS pixels.
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    EnumIter,
    EnumString,
    Eq,
    Hash,
    IntoStaticStr,
    PartialEq,
    Serialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AbsoluteUnit {
    Mm,
    Cm,
    In,
    Pt,
}

impl AbsoluteUnit {
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    /// The number of CSS pixels in one of this unit. Never depends on a
    /// container.
    pub fn px_per_unit(self) -> f64 {
        match self {
            AbsoluteUnit::Mm => PX_PER_MM,
            AbsoluteUnit::Cm => PX_PER_CM,
            AbsoluteUnit::In => PX_PER_IN,
            AbsoluteUnit::Pt => PX_PER_PT,
        }
    }
}

/// Every suffix a numeric literal may carry inside a calc expression.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LengthUnit {
    /// `px`, already in pixels.
    Px,
    /// `%`, resolved against the container's width or height.
    Percent,
    Absolute(AbsoluteUnit),
    Container(ContainerUnit),
}

impl LengthUnit {
    /// Maps a literal's suffix to its unit, if the suffix is one we know.
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix {
            "px" => Some(LengthUnit::Px),
            "%" => Some(LengthUnit::Percent),
            _ => AbsoluteUnit::from_str(suffix)
                .map(LengthUnit::Absolute)
                .or_else(|_| ContainerUnit::from_str(suffix).map(LengthUnit::Container))
                .ok(),
        }
    }
}

/// The axis a percentage is resolved along.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum Axis {
    /// Percentages are fractions of the container's width.
    #[default]
    Horizontal,
    /// Percentages are fractions of the container's height, as for `top` or
    /// `height`.
    Vertical,
}

/// How many pixels one unit of each context-dependent unit measured to, for
/// one container at one point in time.
///
/// Serialized with the unit names as keys, plus `h%` and `v%` for the pixels in
/// one percent of the container's width and height.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct UnitTable {
    #[serde(flatten)]
    container_units: FxHashMap<ContainerUnit, f64>,
    #[serde(rename = "h%")]
    horizontal_percent: f64,
    #[serde(rename = "v%")]
    vertical_percent: f64,
}

impl UnitTable {
    /// A table that only knows the container's percentages. Container units
    /// have to be added with [`UnitTable::with_unit`] before they can be
    /// looked up.
    pub fn new(horizontal_percent: f64, vertical_percent: f64) -> Self {
        UnitTable {
            container_units: FxHashMap::default(),
            horizontal_percent,
            vertical_percent,
        }
    }

    pub fn with_unit(mut self, unit: ContainerUnit, px_per_unit: f64) -> Self {
        self.container_units.insert(unit, px_per_unit);
        self
    }

    pub fn get(&self, unit: ContainerUnit) -> Option<f64> {
        self.container_units.get(&unit).copied()
    }

    /// Pixels in one percent of the container along `axis`.
    pub fn percent(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.horizontal_percent,
            Axis::Vertical => self.vertical_percent,
        }
    }

    /// Pixels in one `unit`. Absolute units bypass the table entirely.
    pub fn px_per_unit(&self, unit: LengthUnit, axis: Axis) -> Result<f64, CalcError> {
        match unit {
            LengthUnit::Px => Ok(1.),
            LengthUnit::Percent => Ok(self.percent(axis)),
            LengthUnit::Absolute(absolute) => Ok(absolute.px_per_unit()),
            LengthUnit::Container(unit) => self.get(unit).ok_or(CalcError::UnresolvedUnit(unit)),
        }
    }
}
