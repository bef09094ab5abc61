//! Elbow connectors between a parent box and a child box.

use svg::node::element::{Path, path::Data};

use crate::{
    apply_stroke,
    draw::{LayeredOutput, RenderLayer, StrokeDefinition},
    geometry::Point,
};

/// A three-segment line from the bottom of a parent box to the top of a child box.
///
/// The line drops from `from` to the vertical midpoint, runs horizontally to
/// the child's x, then drops again to `to`. Siblings share the horizontal run,
/// which gives the usual "bus" look of a family tree.
///
/// ```
/// # use pedigree_core::draw::Connector;
/// # use pedigree_core::geometry::Point;
/// let connector = Connector::new(Point::new(100.0, 40.0), Point::new(60.0, 120.0));
/// assert_eq!(
///     connector.waypoints(),
///     [
///         Point::new(100.0, 40.0),
///         Point::new(100.0, 80.0),
///         Point::new(60.0, 80.0),
///         Point::new(60.0, 120.0),
///     ]
/// );
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Connector {
    from: Point,
    to: Point,
}

impl Connector {
    /// Creates a connector from a parent's bottom-center to a child's top-center.
    pub fn new(from: Point, to: Point) -> Self {
        Self { from, to }
    }

    /// Returns the four points the connector passes through.
    pub fn waypoints(&self) -> [Point; 4] {
        let mid_y = (self.from.y() + self.to.y()) / 2.0;
        [
            self.from,
            self.from.with_y(mid_y),
            self.to.with_y(mid_y),
            self.to,
        ]
    }

    /// Renders the connector on the [`RenderLayer::Connector`] layer.
    pub fn render_to_layers(&self, stroke: &StrokeDefinition) -> LayeredOutput {
        let [start, elbow_a, elbow_b, end] = self.waypoints();
        let data = Data::new()
            .move_to((start.x(), start.y()))
            .line_to((elbow_a.x(), elbow_a.y()))
            .line_to((elbow_b.x(), elbow_b.y()))
            .line_to((end.x(), end.y()));

        let path = apply_stroke!(Path::new().set("d", data).set("fill", "none"), stroke);

        let mut output = LayeredOutput::new();
        output.add_to_layer(RenderLayer::Connector, Box::new(path));
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    #[test]
    fn test_straight_connector_keeps_x() {
        let connector = Connector::new(Point::new(10.0, 0.0), Point::new(10.0, 20.0));
        for point in connector.waypoints() {
            assert_eq!(point.x(), 10.0);
        }
    }

    #[test]
    fn test_render_to_connector_layer() {
        let stroke = StrokeDefinition::new(Color::new("black").unwrap(), 1.5);
        let output = Connector::new(Point::new(0.0, 0.0), Point::new(30.0, 40.0))
            .render_to_layers(&stroke);

        assert_eq!(output.count_in_layer(RenderLayer::Connector), 1);
        let rendered = output.render()[0].to_string();
        assert!(rendered.contains("<path"));
        assert!(rendered.contains(r#"fill="none""#));
        assert!(rendered.contains(r#"stroke-width="1.5""#));
    }
}
