//! Configuration types for Pedigree rendering.
//!
//! This module provides configuration structures that control how family
//! trees are laid out and styled. All types implement [`serde::Deserialize`]
//! with defaults for every field, so a configuration file only needs to name
//! the values it changes.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level application configuration combining layout and style settings.
//! - [`LayoutConfig`] - Box dimensions per depth tier, spacing, and the [`Centering`] and
//!   [`LeafWidth`] policies.
//! - [`StyleConfig`] - Colors, fonts and output scaling.
//!
//! Layout values are in abstract layout units. The SVG exporter turns them
//! into pixels with [`StyleConfig::pixels_per_unit`].
//!
//! # Example
//!
//! ```
//! # use pedigree::config::{AppConfig, Centering};
//! // Use default configuration
//! let config = AppConfig::default();
//! assert!(config.validate().is_ok());
//! assert_eq!(config.layout().centering(), Centering::Midpoint);
//! ```

use serde::Deserialize;

use pedigree_core::{color::Color, geometry::Size};

use crate::tree::SizePolicy;

/// Top-level application configuration combining layout and style settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified layout and style configurations.
    pub fn new(layout: LayoutConfig, style: StyleConfig) -> Self {
        Self { layout, style }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Checks both sections.
    ///
    /// # Errors
    ///
    /// Returns a message naming the first invalid value.
    pub fn validate(&self) -> Result<(), String> {
        self.layout.validate()?;
        self.style.validate()
    }
}

/// How a parent is placed above its children.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Centering {
    /// Halfway between the leftmost and the rightmost child
    #[default]
    Midpoint,
    /// The arithmetic mean of all children's centers
    Mean,
}

/// The layout width a leaf contributes to its parent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeafWidth {
    /// The leaf's own box width
    #[default]
    BoxWidth,
    /// [`LayoutConfig::unit_width`] regardless of box size.
    ///
    /// Leaves whose box is wider than the unit may overlap their neighbours.
    Unit,
}

/// Geometry of the tree layout.
///
/// | Setting | Default |
/// |---------|---------|
/// | Wide box (depth < `deep_threshold`) | 2.0 × 1.0 |
/// | Narrow box | 1.0 × 3.0 |
/// | `deep_threshold` | 2 |
/// | `horizontal_spacing` | 0.5 |
/// | `level_spacing` | 2.0 |
/// | `vertical_padding` | 0.5 |
/// | `deep_level_floor` | 2.5 |
/// | `bounds_padding` | 1.0 |
/// | `label_offset` / `label_width` | 4.0 / 3.5 |
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    wide_box_width: f32,
    wide_box_height: f32,
    narrow_box_width: f32,
    narrow_box_height: f32,
    /// First depth that uses the narrow box.
    deep_threshold: usize,
    horizontal_spacing: f32,
    level_spacing: f32,
    vertical_padding: f32,
    deep_level_floor: f32,
    bounds_padding: f32,
    label_offset: f32,
    label_width: f32,
    unit_width: f32,
    origin_x: f32,
    origin_y: f32,
    centering: Centering,
    leaf_width: LeafWidth,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            wide_box_width: 2.0,
            wide_box_height: 1.0,
            narrow_box_width: 1.0,
            narrow_box_height: 3.0,
            deep_threshold: 2,
            horizontal_spacing: 0.5,
            level_spacing: 2.0,
            vertical_padding: 0.5,
            deep_level_floor: 2.5,
            bounds_padding: 1.0,
            label_offset: 4.0,
            label_width: 3.5,
            unit_width: 1.0,
            origin_x: 0.0,
            origin_y: 0.0,
            centering: Centering::default(),
            leaf_width: LeafWidth::default(),
        }
    }
}

impl LayoutConfig {
    /// Sets the parent centering policy.
    pub fn with_centering(mut self, centering: Centering) -> Self {
        self.centering = centering;
        self
    }

    /// Sets the leaf width policy.
    pub fn with_leaf_width(mut self, leaf_width: LeafWidth) -> Self {
        self.leaf_width = leaf_width;
        self
    }

    /// Sets the box sizes of both depth tiers.
    pub fn with_box_sizes(mut self, wide: Size, narrow: Size) -> Self {
        self.wide_box_width = wide.width();
        self.wide_box_height = wide.height();
        self.narrow_box_width = narrow.width();
        self.narrow_box_height = narrow.height();
        self
    }

    /// Sets the first depth that uses the narrow box.
    pub fn with_deep_threshold(mut self, depth: usize) -> Self {
        self.deep_threshold = depth;
        self
    }

    /// Sets the gap between adjacent sibling subtrees.
    pub fn with_horizontal_spacing(mut self, spacing: f32) -> Self {
        self.horizontal_spacing = spacing;
        self
    }

    /// Sets where the root box is centered.
    pub fn with_origin(mut self, x: f32, y: f32) -> Self {
        self.origin_x = x;
        self.origin_y = y;
        self
    }

    pub fn centering(&self) -> Centering {
        self.centering
    }

    pub fn leaf_width(&self) -> LeafWidth {
        self.leaf_width
    }

    pub fn horizontal_spacing(&self) -> f32 {
        self.horizontal_spacing
    }

    pub fn level_spacing(&self) -> f32 {
        self.level_spacing
    }

    pub fn vertical_padding(&self) -> f32 {
        self.vertical_padding
    }

    pub fn deep_level_floor(&self) -> f32 {
        self.deep_level_floor
    }

    pub fn bounds_padding(&self) -> f32 {
        self.bounds_padding
    }

    /// Distance from the left edge of the tree bounds to the left edge of a
    /// generation label.
    pub fn label_offset(&self) -> f32 {
        self.label_offset
    }

    pub fn label_width(&self) -> f32 {
        self.label_width
    }

    pub fn unit_width(&self) -> f32 {
        self.unit_width
    }

    pub fn deep_threshold(&self) -> usize {
        self.deep_threshold
    }

    /// Returns the position of the root box center.
    pub fn origin(&self) -> (f32, f32) {
        (self.origin_x, self.origin_y)
    }

    /// Returns the box size rule derived from the tier dimensions.
    pub fn size_policy(&self) -> SizePolicy {
        SizePolicy::new(
            Size::new(self.wide_box_width, self.wide_box_height),
            Size::new(self.narrow_box_width, self.narrow_box_height),
            self.deep_threshold,
        )
    }

    /// Vertical distance per depth step at `depth`.
    ///
    /// Deep tiers have tall boxes, so their spacing grows with the narrow box
    /// height but never falls below `deep_level_floor`.
    pub fn vertical_spacing(&self, depth: usize) -> f32 {
        if depth < self.deep_threshold {
            self.level_spacing
        } else {
            (self.narrow_box_height + 2.0 * self.vertical_padding).max(self.deep_level_floor)
        }
    }

    /// Checks that every dimension is usable.
    ///
    /// # Errors
    ///
    /// Returns a message naming the first invalid value.
    pub fn validate(&self) -> Result<(), String> {
        let positive = [
            ("wide_box_width", self.wide_box_width),
            ("wide_box_height", self.wide_box_height),
            ("narrow_box_width", self.narrow_box_width),
            ("narrow_box_height", self.narrow_box_height),
            ("unit_width", self.unit_width),
            ("label_width", self.label_width),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(format!("layout.{name} must be a positive number, got {value}"));
            }
        }

        let non_negative = [
            ("horizontal_spacing", self.horizontal_spacing),
            ("level_spacing", self.level_spacing),
            ("vertical_padding", self.vertical_padding),
            ("deep_level_floor", self.deep_level_floor),
            ("bounds_padding", self.bounds_padding),
            ("label_offset", self.label_offset),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(format!("layout.{name} must not be negative, got {value}"));
            }
        }

        if !(self.origin_x.is_finite() && self.origin_y.is_finite()) {
            return Err("layout.origin_x and layout.origin_y must be finite".to_string());
        }

        Ok(())
    }
}

/// Visual styling configuration for rendered trees.
///
/// Colors are CSS color strings; they are checked by [`StyleConfig::validate`]
/// and parsed into [`Color`] values by the accessors.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    background_color: String,
    node_fill_color: String,
    node_fill_opacity: f32,
    node_stroke_color: String,
    stroke_width: f32,
    connector_color: String,
    connector_width: f32,
    text_color: String,
    label_background_color: String,
    label_opacity: f32,
    label_text_color: String,
    font_family: String,
    font_size: f32,
    min_font_size: f32,
    title_font_size: f32,
    pixels_per_unit: f32,
    png_scale: f32,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            background_color: "white".to_string(),
            node_fill_color: "lightblue".to_string(),
            node_fill_opacity: 0.8,
            node_stroke_color: "black".to_string(),
            stroke_width: 1.5,
            connector_color: "black".to_string(),
            connector_width: 1.5,
            text_color: "black".to_string(),
            label_background_color: "#f0f0f0".to_string(),
            label_opacity: 0.8,
            label_text_color: "#333333".to_string(),
            font_family: "sans-serif".to_string(),
            font_size: 16.0,
            min_font_size: 8.0,
            title_font_size: 24.0,
            pixels_per_unit: 40.0,
            png_scale: 2.0,
        }
    }
}

impl StyleConfig {
    /// Sets the font family used for every text element.
    pub fn with_font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = family.into();
        self
    }

    /// Sets the size of one layout unit in pixels.
    pub fn with_pixels_per_unit(mut self, pixels: f32) -> Self {
        self.pixels_per_unit = pixels;
        self
    }

    /// Sets the background color string.
    pub fn with_background_color(mut self, color: impl Into<String>) -> Self {
        self.background_color = color.into();
        self
    }

    /// Returns the parsed background [`Color`].
    pub fn background_color(&self) -> Result<Color, String> {
        parse_color("background_color", &self.background_color)
    }

    pub fn node_fill_color(&self) -> Result<Color, String> {
        parse_color("node_fill_color", &self.node_fill_color)
    }

    pub fn node_stroke_color(&self) -> Result<Color, String> {
        parse_color("node_stroke_color", &self.node_stroke_color)
    }

    pub fn connector_color(&self) -> Result<Color, String> {
        parse_color("connector_color", &self.connector_color)
    }

    pub fn text_color(&self) -> Result<Color, String> {
        parse_color("text_color", &self.text_color)
    }

    pub fn label_background_color(&self) -> Result<Color, String> {
        parse_color("label_background_color", &self.label_background_color)
    }

    pub fn label_text_color(&self) -> Result<Color, String> {
        parse_color("label_text_color", &self.label_text_color)
    }

    pub fn node_fill_opacity(&self) -> f32 {
        self.node_fill_opacity
    }

    pub fn label_opacity(&self) -> f32 {
        self.label_opacity
    }

    pub fn stroke_width(&self) -> f32 {
        self.stroke_width
    }

    pub fn connector_width(&self) -> f32 {
        self.connector_width
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn min_font_size(&self) -> f32 {
        self.min_font_size
    }

    pub fn title_font_size(&self) -> f32 {
        self.title_font_size
    }

    /// Size of one layout unit in pixels.
    pub fn pixels_per_unit(&self) -> f32 {
        self.pixels_per_unit
    }

    /// Rasterization scale for PNG output.
    pub fn png_scale(&self) -> f32 {
        self.png_scale
    }

    /// Checks colors and numeric values.
    ///
    /// # Errors
    ///
    /// Returns a message naming the first invalid value.
    pub fn validate(&self) -> Result<(), String> {
        self.background_color()?;
        self.node_fill_color()?;
        self.node_stroke_color()?;
        self.connector_color()?;
        self.text_color()?;
        self.label_background_color()?;
        self.label_text_color()?;

        let positive = [
            ("font_size", self.font_size),
            ("min_font_size", self.min_font_size),
            ("title_font_size", self.title_font_size),
            ("pixels_per_unit", self.pixels_per_unit),
            ("png_scale", self.png_scale),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(format!("style.{name} must be a positive number, got {value}"));
            }
        }

        let unit_interval = [
            ("node_fill_opacity", self.node_fill_opacity),
            ("label_opacity", self.label_opacity),
        ];
        for (name, value) in unit_interval {
            if !(0.0..=1.0).contains(&value) {
                return Err(format!("style.{name} must be between 0 and 1, got {value}"));
            }
        }

        for (name, value) in [
            ("stroke_width", self.stroke_width),
            ("connector_width", self.connector_width),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(format!("style.{name} must not be negative, got {value}"));
            }
        }

        Ok(())
    }
}

fn parse_color(field: &str, value: &str) -> Result<Color, String> {
    Color::new(value).map_err(|err| format!("Invalid {field} in config: {err}"))
}
