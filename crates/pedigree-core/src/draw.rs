//! Drawable primitives for family tree diagrams.
//!
//! Every visual element implements [`Drawable`], which renders the element
//! centered at a position and reports the size it occupies. Output is collected
//! into a [`LayeredOutput`] so that the exporter can emit elements in a fixed
//! z-order regardless of the order they were produced in.
//!
//! All coordinates handled here are SVG pixel coordinates (Y pointing down).

mod connector;
mod layer;
mod rectangle;
mod stroke;
mod text;

pub use connector::Connector;
pub use layer::{LayeredOutput, RenderLayer, SvgNode};
pub use rectangle::{Rectangle, RectangleDefinition};
pub use stroke::{StrokeCap, StrokeDefinition, StrokeJoin};
pub use text::{Text, TextDefinition, TextOrientation};

use crate::geometry::{Point, Size};

/// An element that can render itself into layered SVG output.
pub trait Drawable: std::fmt::Debug {
    /// Renders the element centered at `position`.
    fn render_to_layers(&self, position: Point) -> LayeredOutput;

    /// Returns the size the element occupies once rendered.
    fn size(&self) -> Size;
}
