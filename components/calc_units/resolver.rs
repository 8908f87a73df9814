/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Measures what the context-dependent units are worth inside a container.
//!
//! A hidden subtree of probes is inserted as the container's first child, one
//! probe per unit plus one that fills the container, and their rendered sizes
//! are read back before the subtree is removed again.

use std::borrow::Cow;

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::host::{LayoutHost, ProbeStyle};
use crate::units::{ContainerUnit, UnitTable};

/// How many units wide each unit probe is. Sizes are read back in whole
/// pixels by most hosts, so measuring a hundred units and dividing keeps two
/// decimals of the per-unit size.
pub const DEFAULT_CALIBRATION: f64 = 100.;

/// A tag that no author stylesheet will have selectors for.
pub const PROBE_LOCAL_NAME: &str = "calc-units-probe";

/// Tunables of the measurement.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// The number of units each unit probe is sized to. Must be positive.
    pub calibration: f64,
    /// The local name of the element hosting the probes.
    pub local_name: String,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        ProbeConfig {
            calibration: DEFAULT_CALIBRATION,
            local_name: PROBE_LOCAL_NAME.to_owned(),
        }
    }
}

/// The probe subtree while it is attached to the container. Dropping it
/// detaches the subtree, whichever way the measuring code is left.
struct AttachedProbes<'a, H: LayoutHost> {
    host: &'a mut H,
    container: H::Node,
    root: H::Node,
    unit_probes: Vec<(ContainerUnit, H::Node)>,
    percent_probe: H::Node,
}

impl<'a, H: LayoutHost> AttachedProbes<'a, H> {
    fn attach(host: &'a mut H, container: &H::Node, config: &ProbeConfig) -> Self {
        let root = host.create_element(&config.local_name, ProbeStyle::Host);
        let unit_probes: Vec<_> = ContainerUnit::iter()
            .map(|unit| {
                let probe = host.create_element(
                    "div",
                    ProbeStyle::Width {
                        value: config.calibration,
                        unit,
                    },
                );
                host.append_child(&root, &probe);
                (unit, probe)
            })
            .collect();
        let percent_probe = host.create_element("div", ProbeStyle::FillContainer);
        host.append_child(&root, &percent_probe);

        host.insert_first_child(container, &root);
        AttachedProbes {
            host,
            container: container.clone(),
            root,
            unit_probes,
            percent_probe,
        }
    }

    fn measure(&self, calibration: f64) -> UnitTable {
        let percent_size = self.host.client_size(&self.percent_probe);
        let mut table = UnitTable::new(
            percent_size.width.to_f64_px() / 100.,
            percent_size.height.to_f64_px() / 100.,
        );
        if percent_size.width.0 == 0 || percent_size.height.0 == 0 {
            warn!("Container measured as {percent_size:?}, percentages will resolve to zero");
        }

        for (unit, probe) in &self.unit_probes {
            let width = self.host.client_size(probe).width;
            if width.0 == 0 {
                warn!("Probe for `{}` measured zero pixels wide", unit.as_str());
            }
            table = table.with_unit(*unit, width.to_f64_px() / calibration);
        }
        table
    }
}

impl<H: LayoutHost> Drop for AttachedProbes<'_, H> {
    fn drop(&mut self) {
        self.host.remove_child(&self.container, &self.root);
    }
}

/// Resolves the pixel size of every container-relative unit and of one
/// percent along each axis of `container`, with the default [`ProbeConfig`].
///
/// The container must be laid out; otherwise the host's degenerate sizes
/// (usually zero) end up in the table unchecked.
pub fn resolve_container_units<H: LayoutHost>(host: &mut H, container: &H::Node) -> UnitTable {
    resolve_container_units_with(host, container, &ProbeConfig::default())
}

#[cfg_attr(
    feature = "tracing",
    tracing::instrument(name = "resolve_container_units", skip_all, level = "trace")
)]
pub fn resolve_container_units_with<H: LayoutHost>(
    host: &mut H,
    container: &H::Node,
    config: &ProbeConfig,
) -> UnitTable {
    let calibration = if config.calibration > 0. {
        config.calibration
    } else {
        warn!(
            "Ignoring non-positive probe calibration {}, using {DEFAULT_CALIBRATION}",
            config.calibration
        );
        DEFAULT_CALIBRATION
    };
    let config = ProbeConfig {
        calibration,
        ..config.clone()
    };

    let probes = AttachedProbes::attach(host, container, &config);
    let table = probes.measure(calibration);
    drop(probes);

    debug!("Resolved container units: {table:?}");
    table
}

/// Somewhere to get a [`UnitTable`] from: either one resolved earlier, or a
/// container to measure on demand.
pub trait UnitSource<'a> {
    fn unit_table(self) -> Cow<'a, UnitTable>;
}

impl<'a> UnitSource<'a> for &'a UnitTable {
    fn unit_table(self) -> Cow<'a, UnitTable> {
        Cow::Borrowed(self)
    }
}

/// A container in a [`LayoutHost`], measured each time it is used as a
/// [`UnitSource`].
///
/// Resolution is bound by layout, so when evaluating several expressions
/// against the same container prefer calling [`Container::resolve_units`] once
/// and passing the table around.
pub struct Container<'h, H: LayoutHost> {
    host: &'h mut H,
    node: H::Node,
    config: Option<&'h ProbeConfig>,
}

impl<'h, H: LayoutHost> Container<'h, H> {
    pub fn new(host: &'h mut H, node: H::Node) -> Self {
        Container {
            host,
            node,
            config: None,
        }
    }

    pub fn with_config(mut self, config: &'h ProbeConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn resolve_units(&mut self) -> UnitTable {
        match self.config {
            Some(config) => resolve_container_units_with(&mut *self.host, &self.node, config),
            None => resolve_container_units(&mut *self.host, &self.node),
        }
    }
}

impl<'a, H: LayoutHost> UnitSource<'a> for Container<'_, H> {
    fn unit_table(mut self) -> Cow<'a, UnitTable> {
        Cow::Owned(self.resolve_units())
    }
}
