//! Tree layout.
//!
//! The engine turns a [`SizedTree`] into center coordinates for every member
//! box, the bounding box of the drawing, and the generation label sidebar.
//!
//! # Passes
//!
//! ```text
//! SizedTree
//!    │ width::layout_widths      post-order, memoized per node
//!    ▼
//! layout widths
//!    │ position::assign_x        pre-order slots, then post-order centers
//!    │ position::assign_y        one y per depth
//!    ▼
//! positions
//!    │ bounds::tree_bounds
//!    │ bounds::generation_labels
//!    ▼
//! Layout
//! ```
//!
//! Layout space uses the upward Y axis of [`pedigree_core::geometry`]: the
//! root sits at the configured origin and deeper generations get smaller `y`.
//! Each node owns a horizontal *slot* `[x0, x0 + layout_width]`. Slots of
//! siblings never overlap. A parent of several children is clamped into its
//! slot; a parent of one child sits directly above it, which keeps the box
//! inside the slot as long as the parent's box is no wider than the child's
//! slot allows (true for the default box sizes).

mod bounds;
mod position;
mod width;

use std::fmt;

use log::{debug, info, trace};

use pedigree_core::geometry::{Bounds, Point, Size};

use crate::{
    config::LayoutConfig,
    tree::{NodeId, SizedTree},
};

/// Calculates layouts with one fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    config: LayoutConfig,
}

impl Engine {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Positions every member of `tree`.
    ///
    /// Layout cannot fail: the tree has a root and fixed box sizes, and
    /// every division is by a non-empty child count.
    pub fn calculate(&self, tree: SizedTree) -> Layout {
        info!(
            nodes = tree.len(),
            generations = tree.generation_count(),
            centering:? = self.config.centering(),
            leaf_width:? = self.config.leaf_width();
            "Calculating layout"
        );

        let layout_widths = width::layout_widths(&tree, &self.config);
        trace!(layout_widths:?; "Layout widths");

        let horizontal = position::assign_x(&tree, &layout_widths, &self.config);
        let ys = position::assign_y(&tree, &self.config);

        let positions: Vec<Point> = horizontal
            .xs
            .iter()
            .zip(&ys)
            .map(|(x, y)| Point::new(*x, *y))
            .collect();

        let bounds = bounds::tree_bounds(&tree, &positions, self.config.bounds_padding());
        let labels = bounds::generation_labels(&tree, &positions, bounds, &self.config);
        debug!(
            min_x = bounds.min_x(),
            max_x = bounds.max_x(),
            min_y = bounds.min_y(),
            max_y = bounds.max_y(),
            labels = labels.len();
            "Layout bounds calculated"
        );

        Layout {
            tree,
            positions,
            layout_widths,
            slot_starts: horizontal.slot_starts,
            bounds,
            labels,
        }
    }
}

/// A sidebar tag naming the generation of one depth level.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationLabel {
    depth: usize,
    y: f32,
    text: String,
    bounds: Bounds,
}

impl GenerationLabel {
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// The shared `y` of all members at this depth.
    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// The label's background box.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }
}

/// A fully positioned family tree.
#[derive(Debug, Clone)]
pub struct Layout {
    tree: SizedTree,
    positions: Vec<Point>,
    layout_widths: Vec<f32>,
    slot_starts: Vec<f32>,
    bounds: Bounds,
    labels: Vec<GenerationLabel>,
}

impl Layout {
    pub fn tree(&self) -> &SizedTree {
        &self.tree
    }

    pub fn root(&self) -> LayoutNode<'_> {
        self.node(self.tree.root())
    }

    pub fn node(&self, id: NodeId) -> LayoutNode<'_> {
        LayoutNode { layout: self, id }
    }

    /// All members, parents before children.
    pub fn nodes(&self) -> impl Iterator<Item = LayoutNode<'_>> {
        self.tree
            .tree()
            .pre_order()
            .into_iter()
            .map(|id| self.node(id))
    }

    /// Every parent and child pair, in pre-order of the child.
    pub fn connections(&self) -> impl Iterator<Item = (LayoutNode<'_>, LayoutNode<'_>)> {
        self.nodes()
            .filter_map(|child| child.parent().map(|parent| (parent, child)))
    }

    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Extent of every member box, padded on all sides.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Generation labels in increasing depth order.
    pub fn labels(&self) -> &[GenerationLabel] {
        &self.labels
    }

    /// The area to draw: [`Layout::bounds`] plus every generation label.
    pub fn canvas_bounds(&self) -> Bounds {
        self.labels
            .iter()
            .fold(self.bounds, |acc, label| acc.merge(&label.bounds))
    }
}

/// A member together with its computed geometry.
#[derive(Clone, Copy)]
pub struct LayoutNode<'a> {
    layout: &'a Layout,
    id: NodeId,
}

impl fmt::Debug for LayoutNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayoutNode")
            .field("id", &self.id)
            .field("name", &self.name())
            .field("position", &self.position())
            .finish()
    }
}

impl<'a> LayoutNode<'a> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn name(&self) -> &'a str {
        self.layout.tree.node(self.id).name()
    }

    pub fn depth(&self) -> usize {
        self.layout.tree.node(self.id).depth()
    }

    /// Box size.
    pub fn size(&self) -> Size {
        self.layout.tree.node(self.id).size()
    }

    /// Box center.
    pub fn position(&self) -> Point {
        self.layout.positions[self.id.index()]
    }

    /// Horizontal footprint of this member and all descendants.
    pub fn layout_width(&self) -> f32 {
        self.layout.layout_widths[self.id.index()]
    }

    /// The `(min_x, max_x)` range reserved for this subtree.
    pub fn slot(&self) -> (f32, f32) {
        let start = self.layout.slot_starts[self.id.index()];
        (start, start + self.layout_width())
    }

    /// The member's box.
    pub fn bounds(&self) -> Bounds {
        Bounds::new_from_center(self.position(), self.size())
    }

    pub fn is_leaf(&self) -> bool {
        self.layout.tree.node(self.id).is_leaf()
    }

    pub fn parent(&self) -> Option<LayoutNode<'a>> {
        self.layout
            .tree
            .node(self.id)
            .parent()
            .map(|id| self.layout.node(id))
    }

    /// Children in left-to-right order.
    pub fn children(&self) -> impl Iterator<Item = LayoutNode<'a>> + use<'a> {
        let layout = self.layout;
        layout
            .tree
            .node(self.id)
            .children()
            .iter()
            .map(move |id| layout.node(*id))
    }
}
