//! Stroke definitions for box borders and connector lines.
//!
//! Use the [`apply_stroke!`](crate::apply_stroke!) macro to apply every
//! stroke attribute to an SVG element at once:
//!
//! ```
//! use pedigree_core::draw::StrokeDefinition;
//! use pedigree_core::color::Color;
//! use svg::node::element as svg_element;
//!
//! let stroke = StrokeDefinition::new(Color::new("black").unwrap(), 1.5);
//! let rect = svg_element::Rectangle::new()
//!     .set("width", 80)
//!     .set("height", 40);
//!
//! let rect = pedigree_core::apply_stroke!(rect, &stroke);
//! ```

use crate::color::Color;

/// Line endpoint style, the SVG `stroke-linecap`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum StrokeCap {
    /// Flat cap at the exact endpoint (SVG default)
    #[default]
    Butt,
    /// Rounded cap extending beyond the endpoint by half the stroke width
    Round,
    /// Square cap extending beyond the endpoint by half the stroke width
    Square,
}

impl StrokeCap {
    /// Returns the SVG stroke-linecap value
    pub fn to_svg_value(&self) -> &'static str {
        match self {
            Self::Butt => "butt",
            Self::Round => "round",
            Self::Square => "square",
        }
    }
}

/// Corner style, the SVG `stroke-linejoin`. Elbow connectors turn twice, so
/// this shapes every connector.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum StrokeJoin {
    /// Sharp corner with mitered point (SVG default)
    #[default]
    Miter,
    /// Rounded corner
    Round,
    /// Beveled (cut-off) corner
    Bevel,
}

impl StrokeJoin {
    /// Returns the SVG stroke-linejoin value
    pub fn to_svg_value(&self) -> &'static str {
        match self {
            Self::Miter => "miter",
            Self::Round => "round",
            Self::Bevel => "bevel",
        }
    }
}

/// A stroke definition for rendering lines and borders.
#[derive(Debug, Clone)]
pub struct StrokeDefinition {
    color: Color,
    width: f32,
    cap: StrokeCap,
    join: StrokeJoin,
}

impl StrokeDefinition {
    /// Creates a new stroke with the given color and width, butt caps and miter joins.
    pub fn new(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            cap: StrokeCap::default(),
            join: StrokeJoin::default(),
        }
    }

    /// Returns the stroke color.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Returns the stroke width.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Returns the stroke cap style.
    pub fn cap(&self) -> StrokeCap {
        self.cap
    }

    /// Returns the stroke join style.
    pub fn join(&self) -> StrokeJoin {
        self.join
    }

    /// Sets the stroke cap style.
    pub fn set_cap(&mut self, cap: StrokeCap) {
        self.cap = cap;
    }

    /// Sets the stroke join style.
    pub fn set_join(&mut self, join: StrokeJoin) {
        self.join = join;
    }
}

/// Apply all stroke attributes to an SVG element.
#[macro_export]
macro_rules! apply_stroke {
    ($element:expr, $stroke:expr) => {{
        $element
            .set("stroke", $stroke.color().to_string())
            .set("stroke-opacity", $stroke.color().alpha())
            .set("stroke-width", $stroke.width())
            .set("stroke-linecap", $stroke.cap().to_svg_value())
            .set("stroke-linejoin", $stroke.join().to_svg_value())
    }};
}
