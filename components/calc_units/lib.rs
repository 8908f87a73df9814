/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Resolution of `calc()` expressions that mix absolute, font-relative,
//! viewport-relative and percentage lengths into a single pixel length,
//! relative to a container at a given point in time.
//!
//! Units whose size depends on context are measured by laying out hidden
//! probes in the container through a [`LayoutHost`]. The resulting
//! [`UnitTable`] can be reused for any number of evaluations against the same
//! container, which avoids a layout round-trip per expression.

#![deny(unsafe_code)]

pub mod arithmetic;
mod calc;
mod error;
mod host;
mod resolver;
mod styles;
mod units;

pub use crate::calc::{evaluate_calc, evaluate_calc_px};
pub use crate::error::CalcError;
pub use crate::host::{LayoutHost, ProbeStyle};
pub use crate::resolver::{
    Container, DEFAULT_CALIBRATION, PROBE_LOCAL_NAME, ProbeConfig, UnitSource,
    resolve_container_units, resolve_container_units_with,
};
pub use crate::styles::{
    StyleMap, StyleOptions, axis_for_property, evaluate_styles, is_calc, is_vertical_property,
};
pub use crate::units::{
    AbsoluteUnit, Axis, ContainerUnit, LengthUnit, PX_PER_CM, PX_PER_IN, PX_PER_MM, PX_PER_PT,
    UnitTable,
};
