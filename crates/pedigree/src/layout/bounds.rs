//! Bounding box and generation label placement.

use std::collections::BTreeMap;

use pedigree_core::geometry::{Bounds, Insets, Point, Size};

use crate::{config::LayoutConfig, tree::SizedTree};

use super::GenerationLabel;

/// Extent of every member box, padded by `padding` on each side.
pub(super) fn tree_bounds(tree: &SizedTree, positions: &[Point], padding: f32) -> Bounds {
    let root = tree.root();
    let first = Bounds::new_from_center(positions[root.index()], tree.node(root).size());
    tree.tree()
        .pre_order()
        .into_iter()
        .skip(1)
        .map(|id| Bounds::new_from_center(positions[id.index()], tree.node(id).size()))
        .fold(first, |acc, bounds| acc.merge(&bounds))
        .add_padding(Insets::uniform(padding))
}

/// One label per depth present in the tree that has a generation name.
///
/// Labels sit in a column left of `bounds`, each as tall as the boxes of
/// its depth tier and centered on that depth's `y`.
pub(super) fn generation_labels(
    tree: &SizedTree,
    positions: &[Point],
    bounds: Bounds,
    config: &LayoutConfig,
) -> Vec<GenerationLabel> {
    let generations = tree.tree().generations();
    if generations.is_empty() {
        return Vec::new();
    }

    // Every node at a depth shares its y and box size, so the first one seen
    // represents the level
    let mut levels: BTreeMap<usize, (f32, Size)> = BTreeMap::new();
    for id in tree.tree().pre_order() {
        let node = tree.node(id);
        levels
            .entry(node.depth())
            .or_insert((positions[id.index()].y(), node.size()));
    }

    let left = bounds.min_x() - config.label_offset();
    levels
        .into_iter()
        .filter_map(|(depth, (y, size))| {
            let text = generations.get(depth)?;
            let center = Point::new(left + config.label_width() / 2.0, y);
            Some(GenerationLabel {
                depth,
                y,
                text: text.clone(),
                bounds: Bounds::new_from_center(
                    center,
                    Size::new(config.label_width(), size.height()),
                ),
            })
        })
        .collect()
}
