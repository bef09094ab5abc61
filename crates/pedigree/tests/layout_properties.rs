//! Layout invariants checked over generated family trees.

use float_cmp::approx_eq;
use proptest::prelude::*;

use pedigree::{
    config::{Centering, LayoutConfig},
    geometry::Point,
    layout::{Engine, Layout},
    record::FamilyRecord,
    tree::TreeBuilder,
};

const EPSILON: f32 = 1e-3;

fn layout_with(record: &FamilyRecord, config: LayoutConfig) -> Layout {
    let tree = TreeBuilder::from_record(record)
        .expect("generated records are valid")
        .measure(&config.size_policy());
    Engine::new(config).calculate(tree)
}

fn positions(layout: &Layout) -> Vec<Point> {
    layout.nodes().map(|node| node.position()).collect()
}

// ===================
// Strategies
// ===================

fn family_strategy() -> impl Strategy<Value = FamilyRecord> {
    let leaf = "[a-z]{1,3}".prop_map(FamilyRecord::new);
    leaf.prop_recursive(6, 64, 5, |inner| {
        ("[a-z]{1,3}", prop::collection::vec(inner, 0..5)).prop_map(|(name, children)| {
            FamilyRecord {
                name,
                children,
                generations: Vec::new(),
            }
        })
    })
}

fn centering_strategy() -> impl Strategy<Value = Centering> {
    prop_oneof![Just(Centering::Midpoint), Just(Centering::Mean)]
}

// ===================
// Property Test Functions
// ===================

/// Depths follow the parent links.
fn check_depths(layout: &Layout) -> Result<(), TestCaseError> {
    for node in layout.nodes() {
        match node.parent() {
            Some(parent) => prop_assert_eq!(node.depth(), parent.depth() + 1),
            None => prop_assert_eq!(node.depth(), 0),
        }
    }
    Ok(())
}

/// A subtree is never narrower than the box at its top.
fn check_layout_width_covers_box(layout: &Layout) -> Result<(), TestCaseError> {
    for node in layout.nodes() {
        prop_assert!(
            node.layout_width() + EPSILON >= node.size().width(),
            "{} has layout width {} below its box width {}",
            node.name(),
            node.layout_width(),
            node.size().width()
        );
    }
    Ok(())
}

/// Siblings run left to right in disjoint slots.
fn check_siblings_ordered(layout: &Layout) -> Result<(), TestCaseError> {
    for node in layout.nodes() {
        let children: Vec<_> = node.children().collect();
        for pair in children.windows(2) {
            let (left, right) = (pair[0], pair[1]);
            prop_assert!(left.position().x() < right.position().x());
            prop_assert!(
                left.slot().1 <= right.slot().0 + EPSILON,
                "slots of {} {:?} and {} {:?} overlap",
                left.name(),
                left.slot(),
                right.name(),
                right.slot()
            );
        }
    }
    Ok(())
}

/// Boxes at one depth share a y and never collide.
fn check_levels(layout: &Layout) -> Result<(), TestCaseError> {
    let max_depth = layout.nodes().map(|node| node.depth()).max().unwrap_or(0);
    for depth in 0..=max_depth {
        let mut level: Vec<_> = layout.nodes().filter(|node| node.depth() == depth).collect();
        let y = level[0].position().y();
        prop_assert!(level.iter().all(|node| node.position().y() == y));

        level.sort_by(|a, b| a.position().x().total_cmp(&b.position().x()));
        for pair in level.windows(2) {
            prop_assert!(
                pair[0].bounds().max_x() <= pair[1].bounds().min_x() + EPSILON,
                "boxes of {} and {} overlap at depth {depth}",
                pair[0].name(),
                pair[1].name()
            );
        }
    }
    Ok(())
}

fn check_bounds_contain_boxes(layout: &Layout) -> Result<(), TestCaseError> {
    let bounds = layout.bounds();
    for node in layout.nodes() {
        prop_assert!(bounds.contains(&node.bounds()), "{} is outside the bounds", node.name());
    }
    Ok(())
}

// ===================
// Proptest Wrappers
// ===================

proptest! {
    #[test]
    fn layout_invariants_hold(record in family_strategy(), centering in centering_strategy()) {
        let layout = layout_with(&record, LayoutConfig::default().with_centering(centering));
        prop_assert_eq!(layout.len(), record.count_members());
        check_depths(&layout)?;
        check_layout_width_covers_box(&layout)?;
        check_siblings_ordered(&layout)?;
        check_levels(&layout)?;
        check_bounds_contain_boxes(&layout)?;
    }

    #[test]
    fn layout_is_deterministic(record in family_strategy()) {
        let first = layout_with(&record, LayoutConfig::default());
        let second = layout_with(&record, LayoutConfig::default());
        prop_assert_eq!(positions(&first), positions(&second));
        prop_assert_eq!(first.bounds(), second.bounds());
    }

    #[test]
    fn root_sits_at_origin(record in family_strategy(), x in -100.0f32..100.0, y in -100.0f32..100.0) {
        let layout = layout_with(&record, LayoutConfig::default().with_origin(x, y));
        let root = layout.root().position();
        prop_assert!(approx_eq!(f32, root.x(), x, epsilon = EPSILON));
        prop_assert!(approx_eq!(f32, root.y(), y, epsilon = EPSILON));
    }
}

// ===================
// Scenarios
// ===================

#[test]
fn test_single_root() {
    let layout = layout_with(&FamilyRecord::new("文达"), LayoutConfig::default());

    assert_eq!(layout.root().position(), Point::new(0.0, 0.0));
    let bounds = layout.bounds();
    // Wide box 2 x 1 plus one unit of padding on every side
    assert!(approx_eq!(f32, bounds.width(), 4.0));
    assert!(approx_eq!(f32, bounds.height(), 3.0));
    assert!(approx_eq!(f32, bounds.center().x(), 0.0));
}

#[test]
fn test_three_leaves_are_evenly_spaced() {
    let record = FamilyRecord::new("r")
        .with_child(FamilyRecord::new("a"))
        .with_child(FamilyRecord::new("b"))
        .with_child(FamilyRecord::new("c"));

    for centering in [Centering::Midpoint, Centering::Mean] {
        let layout = layout_with(&record, LayoutConfig::default().with_centering(centering));
        let xs: Vec<f32> = layout.root().children().map(|c| c.position().x()).collect();

        // Box width 2 plus spacing 0.5
        assert!(approx_eq!(f32, xs[1] - xs[0], 2.5));
        assert!(approx_eq!(f32, xs[2] - xs[1], 2.5));
        assert!(approx_eq!(f32, xs[0] + xs[2], 0.0));
        assert!(approx_eq!(f32, layout.root().position().x(), xs[1]));
    }
}

#[test]
fn test_chain_descends_straight_down() {
    let record = FamilyRecord::new("文达").with_child(
        FamilyRecord::new("明圣")
            .with_child(FamilyRecord::new("俊盛").with_child(FamilyRecord::new("永盛"))),
    );
    let layout = layout_with(&record, LayoutConfig::default());

    let nodes: Vec<_> = layout.nodes().collect();
    assert_eq!(nodes.len(), 4);
    for pair in nodes.windows(2) {
        assert!(approx_eq!(f32, pair[0].position().x(), pair[1].position().x()));
        assert!(pair[1].position().y() < pair[0].position().y());
    }
}

#[test]
fn test_short_generation_list_labels_known_depths_only() {
    let record = FamilyRecord::new("文达")
        .with_child(
            FamilyRecord::new("明圣")
                .with_child(FamilyRecord::new("俊盛").with_child(FamilyRecord::new("永盛"))),
        )
        .with_generations(["文", "明"]);
    let layout = layout_with(&record, LayoutConfig::default());

    let labels: Vec<_> = layout.labels().iter().map(|l| (l.depth(), l.text())).collect();
    assert_eq!(labels, vec![(0, "文"), (1, "明")]);
}
