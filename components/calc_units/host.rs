/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! The part of a DOM and its layout engine that unit resolution relies on.

use app_units::Au;
use euclid::default::Size2D;

use crate::units::ContainerUnit;

/// The inline style of an element created for measuring.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ProbeStyle {
    /// The invisible element that hosts every probe. It covers the container
    /// exactly, without painting anything or displacing the container's
    /// content.
    Host,
    /// A probe that is `value` `unit`s wide.
    Width { value: f64, unit: ContainerUnit },
    /// A probe that fills its parent in both directions.
    FillContainer,
}

impl ProbeStyle {
    /// The declarations of this style as they would appear in a `style`
    /// attribute.
    pub fn to_css(&self) -> String {
        match *self {
            ProbeStyle::Host => concat!(
                "display:block;visibility:hidden;position:absolute;",
                "top:0;left:0;width:100%;height:100%"
            )
            .to_owned(),
            ProbeStyle::Width { value, unit } => format!("width:{value}{}", unit.as_str()),
            ProbeStyle::FillContainer => "width:100%;height:100%".to_owned(),
        }
    }
}

/// Element creation, tree mutation and synchronous size queries, as offered by
/// whatever owns the container being measured.
///
/// Sizes must reflect the tree as it is when queried, so implementations
/// backed by an incremental layout engine need to flush pending layout first.
pub trait LayoutHost {
    type Node: Clone;

    /// Creates a detached element with the given local name and style.
    fn create_element(&mut self, local_name: &str, style: ProbeStyle) -> Self::Node;

    fn append_child(&mut self, parent: &Self::Node, child: &Self::Node);

    /// Inserts `child` before the current first child of `parent`.
    fn insert_first_child(&mut self, parent: &Self::Node, child: &Self::Node);

    fn remove_child(&mut self, parent: &Self::Node, child: &Self::Node);

    /// The rendered size of the padding box of `node`, like `clientWidth` and
    /// `clientHeight`. Nodes that are not laid out report zero.
    fn client_size(&self, node: &Self::Node) -> Size2D<Au>;
}
