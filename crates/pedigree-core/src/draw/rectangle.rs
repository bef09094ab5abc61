//! Rectangles for member boxes and generation label backgrounds.

use svg::node::element as svg_element;

use crate::{
    apply_stroke,
    color::Color,
    draw::{Drawable, LayeredOutput, RenderLayer, StrokeDefinition},
    geometry::{Point, Size},
};

/// Fill, border and corner rounding shared by many rectangles.
#[derive(Debug, Clone)]
pub struct RectangleDefinition {
    fill_color: Option<Color>,
    fill_opacity: f32,
    stroke: Option<StrokeDefinition>,
    corner_radius: f32,
}

impl RectangleDefinition {
    /// Creates an unfilled, unstroked, square-cornered definition.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the fill color. `None` leaves the rectangle unfilled.
    pub fn set_fill_color(&mut self, color: Option<Color>) {
        self.fill_color = color;
    }

    /// Sets the fill opacity in `[0, 1]`, multiplied with the color's own alpha.
    pub fn set_fill_opacity(&mut self, opacity: f32) {
        self.fill_opacity = opacity.clamp(0.0, 1.0);
    }

    /// Sets the border stroke. `None` draws no border.
    pub fn set_stroke(&mut self, stroke: Option<StrokeDefinition>) {
        self.stroke = stroke;
    }

    /// Sets the corner radius in pixels.
    pub fn set_corner_radius(&mut self, radius: f32) {
        self.corner_radius = radius.max(0.0);
    }

    pub fn fill_color(&self) -> Option<&Color> {
        self.fill_color.as_ref()
    }

    pub fn corner_radius(&self) -> f32 {
        self.corner_radius
    }
}

impl Default for RectangleDefinition {
    fn default() -> Self {
        Self {
            fill_color: None,
            fill_opacity: 1.0,
            stroke: None,
            corner_radius: 0.0,
        }
    }
}

/// A sized rectangle placed on a render layer.
#[derive(Debug, Clone)]
pub struct Rectangle<'a> {
    definition: &'a RectangleDefinition,
    size: Size,
    layer: RenderLayer,
}

impl<'a> Rectangle<'a> {
    /// Creates a rectangle on the [`RenderLayer::Node`] layer.
    pub fn new(definition: &'a RectangleDefinition, size: Size) -> Self {
        Self {
            definition,
            size,
            layer: RenderLayer::Node,
        }
    }

    /// Moves the rectangle to another layer.
    pub fn with_layer(mut self, layer: RenderLayer) -> Self {
        self.layer = layer;
        self
    }
}

impl Drawable for Rectangle<'_> {
    fn render_to_layers(&self, position: Point) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        let bounds = position.to_bounds(self.size);

        let mut rect = svg_element::Rectangle::new()
            .set("x", bounds.min_x())
            .set("y", bounds.min_y())
            .set("width", bounds.width())
            .set("height", bounds.height());

        rect = match self.definition.fill_color() {
            Some(color) => rect
                .set("fill", color.to_string())
                .set("fill-opacity", color.alpha() * self.definition.fill_opacity),
            None => rect.set("fill", "none"),
        };

        if self.definition.corner_radius() > 0.0 {
            rect = rect.set("rx", self.definition.corner_radius());
        }

        if let Some(stroke) = &self.definition.stroke {
            rect = apply_stroke!(rect, stroke);
        }

        output.add_to_layer(self.layer, Box::new(rect));
        output
    }

    fn size(&self) -> Size {
        self.size
    }
}
