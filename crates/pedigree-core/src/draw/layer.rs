//! Layer-based rendering system for SVG output.
//!
//! Drawables place each SVG node on a [`RenderLayer`]; [`LayeredOutput`]
//! collects them and emits one `<g data-layer="...">` group per non-empty
//! layer, bottom to top.
//!
//! # Example
//!
//! ```
//! # use pedigree_core::draw::{RenderLayer, LayeredOutput};
//! # use svg::node::element::{Path, Rectangle};
//!
//! let mut output = LayeredOutput::new();
//!
//! // Member boxes are produced before the lines that join them...
//! output.add_to_layer(RenderLayer::Node, Box::new(Rectangle::new()));
//! output.add_to_layer(RenderLayer::Connector, Box::new(Path::new()));
//!
//! // ...but the connector group still renders first.
//! let svg_nodes = output.render();
//! assert_eq!(svg_nodes.len(), 2);
//! ```

use svg::node::element as svg_element;

/// Type alias for boxed SVG nodes.
pub type SvgNode = Box<dyn svg::Node>;

/// Defines the rendering layers for SVG output.
///
/// Layers are rendered from bottom to top in the order defined by variant declaration.
/// The `Ord` derive uses declaration order, so the first variant renders first (bottom),
/// and the last variant renders last (top).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RenderLayer {
    /// Canvas fill - renders first
    Background,
    /// Elbow lines between parents and children
    Connector,
    /// Generation label boxes in the sidebar; above connectors, below members
    GenerationLabel,
    /// Member boxes
    Node,
    /// Member names, generation names and the title
    Text,
}

impl RenderLayer {
    /// Returns a human-readable name for this layer.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::Connector => "connector",
            Self::GenerationLabel => "generation-label",
            Self::Node => "node",
            Self::Text => "text",
        }
    }
}

/// Represents SVG nodes grouped by rendering layer.
#[derive(Debug, Default)]
pub struct LayeredOutput {
    items: Vec<(RenderLayer, SvgNode)>,
}

impl LayeredOutput {
    /// Creates a new empty `LayeredOutput`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a single node to the specified layer.
    ///
    /// Nodes are kept in insertion order within a layer.
    pub fn add_to_layer(&mut self, layer: RenderLayer, node: SvgNode) {
        self.items.push((layer, node));
    }

    /// Merges all layers from another `LayeredOutput` into this one.
    pub fn merge(&mut self, other: LayeredOutput) {
        self.items.extend(other.items);
    }

    /// Returns `true` if there are no nodes in any layer.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of nodes placed on `layer`.
    pub fn count_in_layer(&self, layer: RenderLayer) -> usize {
        self.items.iter().filter(|(l, _)| *l == layer).count()
    }

    /// Renders all layers to SVG groups, consuming the output.
    ///
    /// Each non-empty layer becomes an SVG `<g>` element with a `data-layer`
    /// attribute identifying the layer. Empty layers are skipped.
    pub fn render(mut self) -> Vec<SvgNode> {
        if self.is_empty() {
            return Vec::new();
        }

        // Stable sort keeps insertion order inside each layer
        self.items.sort_by_key(|(layer, _)| *layer);

        let mut result = Vec::new();
        let mut current_layer = self.items[0].0;
        let mut current_group = svg_element::Group::new().set("data-layer", current_layer.name());

        for (layer, node) in self.items {
            if layer != current_layer {
                result.push(Box::new(current_group) as SvgNode);

                current_layer = layer;
                current_group = svg_element::Group::new().set("data-layer", layer.name());
            }

            current_group = current_group.add(node);
        }

        result.push(Box::new(current_group) as SvgNode);

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use svg::node::element::Rectangle;

    #[test]
    fn test_render_layer_order() {
        assert!(RenderLayer::Background < RenderLayer::Connector);
        assert!(RenderLayer::Connector < RenderLayer::GenerationLabel);
        assert!(RenderLayer::GenerationLabel < RenderLayer::Node);
        assert!(RenderLayer::Node < RenderLayer::Text);
    }

    #[test]
    fn test_layered_output_add_and_count() {
        let mut output = LayeredOutput::new();
        assert!(output.is_empty());

        output.add_to_layer(RenderLayer::Node, Box::new(Rectangle::new()));
        output.add_to_layer(RenderLayer::Node, Box::new(Rectangle::new()));
        output.add_to_layer(RenderLayer::Text, Box::new(Rectangle::new()));

        assert!(!output.is_empty());
        assert_eq!(output.count_in_layer(RenderLayer::Node), 2);
        assert_eq!(output.count_in_layer(RenderLayer::Connector), 0);
    }

    #[test]
    fn test_layered_output_merge() {
        let mut output1 = LayeredOutput::new();
        output1.add_to_layer(RenderLayer::Node, Box::new(Rectangle::new()));

        let mut output2 = LayeredOutput::new();
        output2.add_to_layer(RenderLayer::Node, Box::new(Rectangle::new()));
        output2.add_to_layer(RenderLayer::GenerationLabel, Box::new(Rectangle::new()));

        output1.merge(output2);

        // Two distinct layers, same-layer nodes share a group
        assert_eq!(output1.render().len(), 2);
    }

    #[test]
    fn test_layered_output_render_groups_in_layer_order() {
        let mut output = LayeredOutput::new();
        output.add_to_layer(RenderLayer::Text, Box::new(Rectangle::new()));
        output.add_to_layer(RenderLayer::Background, Box::new(Rectangle::new()));
        output.add_to_layer(RenderLayer::Connector, Box::new(Rectangle::new()));

        let rendered: Vec<String> = output.render().iter().map(|n| n.to_string()).collect();

        assert_eq!(rendered.len(), 3);
        assert!(rendered[0].contains(r#"data-layer="background""#));
        assert!(rendered[1].contains(r#"data-layer="connector""#));
        assert!(rendered[2].contains(r#"data-layer="text""#));
    }

    #[test]
    fn test_layered_output_render_empty() {
        assert!(LayeredOutput::new().render().is_empty());
    }
}
