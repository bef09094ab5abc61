//! Bottom-up layout width aggregation.

use crate::{
    config::{LayoutConfig, LeafWidth},
    tree::{NodeId, SizedTree},
};

/// Computes the layout width of every node, indexed by [`NodeId::index`].
///
/// A leaf takes its box width (or the unit width). An internal node takes
/// the combined footprint of its children, never less than its own box.
pub(super) fn layout_widths(tree: &SizedTree, config: &LayoutConfig) -> Vec<f32> {
    let mut widths = vec![0.0; tree.len()];
    for id in tree.tree().post_order() {
        let node = tree.node(id);
        widths[id.index()] = if node.is_leaf() {
            match config.leaf_width() {
                LeafWidth::BoxWidth => node.size().width(),
                LeafWidth::Unit => config.unit_width(),
            }
        } else {
            children_span(node.children(), &widths, config.horizontal_spacing())
                .max(node.size().width())
        };
    }
    widths
}

/// Width of `children` placed side by side with `spacing` between them.
pub(super) fn children_span(children: &[NodeId], widths: &[f32], spacing: f32) -> f32 {
    let total: f32 = children.iter().map(|child| widths[child.index()]).sum();
    let gaps = children.len().saturating_sub(1) as f32;
    total + gaps * spacing
}
