/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

#![allow(dead_code)]

use std::cell::{Cell, RefCell};

use app_units::Au;
use calc_units::{ContainerUnit, LayoutHost, ProbeStyle};
use euclid::default::Size2D;

pub type NodeId = usize;

pub const VIEWPORT_WIDTH: f64 = 1024.;
pub const VIEWPORT_HEIGHT: f64 = 768.;
pub const ROOT_FONT_SIZE: f64 = 16.;
pub const FONT_SIZE: f64 = 20.;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

struct NodeData {
    local_name: String,
    style: Option<ProbeStyle>,
    /// Only meaningful for author elements, probes size themselves.
    size: Size2D<f64>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// A document with fixed viewport and font metrics. Sizes are reported in
/// whole pixels, the way `clientWidth` reports them.
pub struct FakeLayoutHost {
    nodes: Vec<NodeData>,
    pub created_styles: Vec<ProbeStyle>,
    pub panic_on_measure: bool,
    pub size_queries: Cell<usize>,
    pub first_child_while_measuring: RefCell<Option<String>>,
}

impl FakeLayoutHost {
    pub fn new() -> Self {
        FakeLayoutHost {
            nodes: vec![NodeData {
                local_name: "html".to_owned(),
                style: None,
                size: Size2D::new(VIEWPORT_WIDTH, VIEWPORT_HEIGHT),
                parent: None,
                children: vec![],
            }],
            created_styles: vec![],
            panic_on_measure: false,
            size_queries: Cell::new(0),
            first_child_while_measuring: RefCell::new(None),
        }
    }

    pub fn document(&self) -> NodeId {
        0
    }

    fn push_node(
        &mut self,
        local_name: &str,
        style: Option<ProbeStyle>,
        size: Size2D<f64>,
    ) -> NodeId {
        self.nodes.push(NodeData {
            local_name: local_name.to_owned(),
            style,
            size,
            parent: None,
            children: vec![],
        });
        self.nodes.len() - 1
    }

    /// Creates an author element with a fixed size and appends it to `parent`.
    pub fn add_element(
        &mut self,
        parent: NodeId,
        local_name: &str,
        width: f64,
        height: f64,
    ) -> NodeId {
        let node = self.detached_element(local_name, width, height);
        self.append_child(&parent, &node);
        node
    }

    pub fn detached_element(&mut self, local_name: &str, width: f64, height: f64) -> NodeId {
        self.push_node(local_name, None, Size2D::new(width, height))
    }

    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.nodes[node].children.clone()
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node].parent
    }

    pub fn local_name(&self, node: NodeId) -> &str {
        &self.nodes[node].local_name
    }

    fn is_attached(&self, mut node: NodeId) -> bool {
        loop {
            if node == self.document() {
                return true;
            }
            match self.nodes[node].parent {
                Some(parent) => node = parent,
                None => return false,
            }
        }
    }

    /// Pixels in a hundred of `unit`, which keeps viewport units exact.
    fn px_per_hundred(unit: ContainerUnit) -> f64 {
        match unit {
            ContainerUnit::Em => FONT_SIZE * 100.,
            ContainerUnit::Ex | ContainerUnit::Ch => FONT_SIZE * 50.,
            ContainerUnit::Rem => ROOT_FONT_SIZE * 100.,
            ContainerUnit::Vw => VIEWPORT_WIDTH,
            ContainerUnit::Vh => VIEWPORT_HEIGHT,
            ContainerUnit::Vmin => VIEWPORT_WIDTH.min(VIEWPORT_HEIGHT),
            ContainerUnit::Vmax => VIEWPORT_WIDTH.max(VIEWPORT_HEIGHT),
        }
    }

    fn layout_size(&self, node: NodeId) -> Size2D<f64> {
        if !self.is_attached(node) {
            return Size2D::zero();
        }
        let data = &self.nodes[node];
        match data.style {
            None => data.size,
            Some(ProbeStyle::Host) | Some(ProbeStyle::FillContainer) => data
                .parent
                .map_or(Size2D::zero(), |parent| self.layout_size(parent)),
            Some(ProbeStyle::Width { value, unit }) => {
                Size2D::new(value * Self::px_per_hundred(unit) / 100., 0.)
            },
        }
    }
}

impl LayoutHost for FakeLayoutHost {
    type Node = NodeId;

    fn create_element(&mut self, local_name: &str, style: ProbeStyle) -> NodeId {
        self.created_styles.push(style);
        self.push_node(local_name, Some(style), Size2D::zero())
    }

    fn append_child(&mut self, parent: &NodeId, child: &NodeId) {
        assert!(self.nodes[*child].parent.is_none(), "appending an attached node");
        self.nodes[*parent].children.push(*child);
        self.nodes[*child].parent = Some(*parent);
    }

    fn insert_first_child(&mut self, parent: &NodeId, child: &NodeId) {
        assert!(self.nodes[*child].parent.is_none(), "inserting an attached node");
        self.nodes[*parent].children.insert(0, *child);
        self.nodes[*child].parent = Some(*parent);
    }

    fn remove_child(&mut self, parent: &NodeId, child: &NodeId) {
        self.nodes[*parent].children.retain(|node| node != child);
        self.nodes[*child].parent = None;
    }

    fn client_size(&self, node: &NodeId) -> Size2D<Au> {
        self.size_queries.set(self.size_queries.get() + 1);
        if self.panic_on_measure {
            panic!("layout went away");
        }

        if let Some(parent) = self.nodes[*node].parent {
            let container = self.nodes[parent].parent.unwrap_or(parent);
            let first_child = self.nodes[container]
                .children
                .first()
                .map(|first| self.nodes[*first].local_name.clone());
            *self.first_child_while_measuring.borrow_mut() = first_child;
        }

        let size = self.layout_size(*node);
        Size2D::new(
            Au::from_f64_px(size.width.floor()),
            Au::from_f64_px(size.height.floor()),
        )
    }
}
