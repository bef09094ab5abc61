//! Horizontal and vertical position assignment.

use crate::{
    config::{Centering, LayoutConfig},
    tree::SizedTree,
};

use super::width::children_span;

/// Box centers and slot starts along x, indexed by node.
pub(super) struct Horizontal {
    pub(super) xs: Vec<f32>,
    pub(super) slot_starts: Vec<f32>,
}

/// Assigns every node a slot and a center x, then moves the root to the origin.
///
/// Slots are handed out top-down: each parent lays its children left to
/// right inside its own slot, centering them when its box is wider than they
/// are. Centers are then computed bottom-up from the children's centers.
pub(super) fn assign_x(tree: &SizedTree, widths: &[f32], config: &LayoutConfig) -> Horizontal {
    let spacing = config.horizontal_spacing();
    let mut slot_starts = vec![0.0; tree.len()];

    for id in tree.tree().pre_order() {
        let children = tree.node(id).children();
        if children.is_empty() {
            continue;
        }
        let span = children_span(children, widths, spacing);
        let mut cursor = slot_starts[id.index()] + (widths[id.index()] - span) / 2.0;
        for child in children {
            slot_starts[child.index()] = cursor;
            cursor += widths[child.index()] + spacing;
        }
    }

    let mut xs = vec![0.0; tree.len()];
    for id in tree.tree().post_order() {
        let node = tree.node(id);
        let start = slot_starts[id.index()];
        let width = widths[id.index()];

        xs[id.index()] = match node.children() {
            [] => start + width / 2.0,
            [only] => xs[only.index()],
            children => {
                let x = match config.centering() {
                    Centering::Midpoint => {
                        let first = xs[children[0].index()];
                        let last = xs[children[children.len() - 1].index()];
                        (first + last) / 2.0
                    }
                    Centering::Mean => {
                        let sum: f32 = children.iter().map(|c| xs[c.index()]).sum();
                        sum / children.len() as f32
                    }
                };
                // Keep the box inside the slot
                let half_box = node.size().width() / 2.0;
                let (low, high) = (start + half_box, start + width - half_box);
                if low <= high { x.clamp(low, high) } else { x }
            }
        };
    }

    let (origin_x, _) = config.origin();
    let shift = origin_x - xs[tree.root().index()];
    for x in xs.iter_mut().chain(slot_starts.iter_mut()) {
        *x += shift;
    }

    Horizontal { xs, slot_starts }
}

/// Assigns every node the y of its depth level.
pub(super) fn assign_y(tree: &SizedTree, config: &LayoutConfig) -> Vec<f32> {
    let (_, origin_y) = config.origin();
    let mut ys = vec![0.0; tree.len()];
    for id in tree.tree().pre_order() {
        ys[id.index()] = level_y(tree.node(id).depth(), origin_y, config);
    }
    ys
}

/// `y = y_start - depth * spacing(depth)`.
pub(super) fn level_y(depth: usize, y_start: f32, config: &LayoutConfig) -> f32 {
    y_start - depth as f32 * config.vertical_spacing(depth)
}
