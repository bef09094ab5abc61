//! SVG rendering of family tree layouts.

use std::io;

use log::{debug, info};
use svg::Document;

use pedigree_core::{
    draw::{
        Connector, Drawable, LayeredOutput, Rectangle, RectangleDefinition, RenderLayer,
        StrokeCap, StrokeDefinition, StrokeJoin, Text, TextDefinition, TextOrientation,
    },
    geometry::{Bounds, Point, Size},
};

use crate::{
    config::StyleConfig,
    export::{self, Exporter},
    layout::{GenerationLabel, Layout, LayoutNode},
};

/// Share of a box that its name may fill.
const TEXT_FILL: f32 = 0.85;

/// Label corner radius in layout units.
const LABEL_CORNER_RADIUS: f32 = 0.1;

/// Renders layouts as SVG documents.
///
/// Layout space has Y pointing up and is measured in layout units; the
/// exporter flips Y and scales by [`StyleConfig::pixels_per_unit`].
#[derive(Debug, Clone)]
pub struct SvgExporter {
    background: RectangleDefinition,
    node_box: RectangleDefinition,
    label_box: RectangleDefinition,
    connector: StrokeDefinition,
    name_text: TextDefinition,
    label_text: TextDefinition,
    title_text: TextDefinition,
    pixels_per_unit: f32,
    title: Option<String>,
}

impl SvgExporter {
    /// Creates an exporter from style settings.
    ///
    /// # Errors
    ///
    /// Returns [`export::Error::Render`] if a configured color is invalid.
    pub fn new(style: &StyleConfig) -> Result<Self, export::Error> {
        let render_err = export::Error::Render;

        let mut background = RectangleDefinition::new();
        background.set_fill_color(Some(style.background_color().map_err(render_err)?));

        let mut node_box = RectangleDefinition::new();
        node_box.set_fill_color(Some(style.node_fill_color().map_err(render_err)?));
        node_box.set_fill_opacity(style.node_fill_opacity());
        node_box.set_stroke(Some(StrokeDefinition::new(
            style.node_stroke_color().map_err(render_err)?,
            style.stroke_width(),
        )));

        let mut label_box = RectangleDefinition::new();
        label_box.set_fill_color(Some(style.label_background_color().map_err(render_err)?));
        label_box.set_fill_opacity(style.label_opacity());
        label_box.set_corner_radius(LABEL_CORNER_RADIUS * style.pixels_per_unit());

        let mut connector = StrokeDefinition::new(
            style.connector_color().map_err(render_err)?,
            style.connector_width(),
        );
        connector.set_cap(StrokeCap::Round);
        connector.set_join(StrokeJoin::Round);

        let mut name_text = TextDefinition::new();
        name_text.set_font_family(style.font_family());
        name_text.set_font_size(style.font_size());
        name_text.set_min_font_size(style.min_font_size());
        name_text.set_color(Some(style.text_color().map_err(render_err)?));

        let mut label_text = name_text.clone();
        label_text.set_color(Some(style.label_text_color().map_err(render_err)?));

        let mut title_text = name_text.clone();
        title_text.set_font_size(style.title_font_size());

        Ok(Self {
            background,
            node_box,
            label_box,
            connector,
            name_text,
            label_text,
            title_text,
            pixels_per_unit: style.pixels_per_unit(),
            title: None,
        })
    }

    /// Sets the heading drawn above the tree. Blank titles are ignored.
    pub fn with_title(mut self, title: Option<&str>) -> Self {
        self.title = title
            .map(str::trim)
            .filter(|title| !title.is_empty())
            .map(str::to_string);
        self
    }

    /// Renders the complete layout to an SVG document.
    pub fn render(&self, layout: &Layout) -> Document {
        let canvas = Canvas::new(layout.canvas_bounds(), self.pixels_per_unit, self.title_height());
        let size = canvas.size();
        debug!(width = size.width(), height = size.height(); "SVG canvas");

        let mut output = LayeredOutput::new();

        let background = Rectangle::new(&self.background, size).with_layer(RenderLayer::Background);
        output.merge(background.render_to_layers(Point::new(size.width() / 2.0, size.height() / 2.0)));

        for (parent, child) in layout.connections() {
            output.merge(self.render_connection(&canvas, parent, child));
        }
        for label in layout.labels() {
            output.merge(self.render_label(&canvas, label));
        }
        for node in layout.nodes() {
            output.merge(self.render_node(&canvas, node));
        }
        if let Some(title) = &self.title {
            let heading = Text::new(&self.title_text, title)
                .fit_within(Size::new(size.width() * TEXT_FILL, self.title_height()));
            output.merge(heading.render_to_layers(Point::new(size.width() / 2.0, self.title_height() / 2.0)));
        }

        let mut doc = Document::new()
            .set("viewBox", format!("0 0 {} {}", size.width(), size.height()))
            .set("width", size.width())
            .set("height", size.height());
        for group in output.render() {
            doc = doc.add(group);
        }
        doc
    }

    fn title_height(&self) -> f32 {
        if self.title.is_some() {
            self.title_text.font_size() * 2.0
        } else {
            0.0
        }
    }

    fn render_connection(
        &self,
        canvas: &Canvas,
        parent: LayoutNode<'_>,
        child: LayoutNode<'_>,
    ) -> LayeredOutput {
        let parent_bottom = parent.position().with_y(parent.bounds().min_y());
        let child_top = child.position().with_y(child.bounds().max_y());
        Connector::new(canvas.to_pixels(parent_bottom), canvas.to_pixels(child_top))
            .render_to_layers(&self.connector)
    }

    fn render_node(&self, canvas: &Canvas, node: LayoutNode<'_>) -> LayeredOutput {
        let center = canvas.to_pixels(node.position());
        let size = node.size().scale(self.pixels_per_unit);

        let mut output = Rectangle::new(&self.node_box, size).render_to_layers(center);

        // Tall boxes belong to the deep tiers, whose names run top to bottom
        let orientation = if size.height() > size.width() {
            TextOrientation::Vertical
        } else {
            TextOrientation::Horizontal
        };
        let name = Text::new(&self.name_text, node.name())
            .with_orientation(orientation)
            .fit_within(size.scale(TEXT_FILL));
        output.merge(name.render_to_layers(center));
        output
    }

    fn render_label(&self, canvas: &Canvas, label: &GenerationLabel) -> LayeredOutput {
        let center = canvas.to_pixels(label.bounds().center());
        let size = label.bounds().to_size().scale(self.pixels_per_unit);

        let mut output = Rectangle::new(&self.label_box, size)
            .with_layer(RenderLayer::GenerationLabel)
            .render_to_layers(center);
        let text = Text::new(&self.label_text, label.text()).fit_within(size.scale(TEXT_FILL));
        output.merge(text.render_to_layers(center));
        output
    }
}

impl Exporter for SvgExporter {
    fn export_layout(
        &mut self,
        layout: &Layout,
        writer: &mut dyn io::Write,
    ) -> Result<(), export::Error> {
        let doc = self.render(layout);
        debug!("SVG document rendered");

        write!(writer, "{doc}")?;
        info!(nodes = layout.len(); "SVG exported");
        Ok(())
    }
}

/// Maps layout space onto the pixel canvas.
#[derive(Debug, Clone, Copy)]
struct Canvas {
    bounds: Bounds,
    scale: f32,
    top_margin: f32,
}

impl Canvas {
    fn new(bounds: Bounds, scale: f32, top_margin: f32) -> Self {
        Self {
            bounds,
            scale,
            top_margin,
        }
    }

    fn size(&self) -> Size {
        let scaled = self.bounds.to_size().scale(self.scale);
        Size::new(scaled.width(), scaled.height() + self.top_margin)
    }

    /// Converts a layout point to SVG pixels, flipping the Y axis.
    fn to_pixels(&self, point: Point) -> Point {
        Point::new(
            (point.x() - self.bounds.min_x()) * self.scale,
            (self.bounds.max_y() - point.y()) * self.scale + self.top_margin,
        )
    }
}
