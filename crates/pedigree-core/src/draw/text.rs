//! Text rendering for member names, generation labels and titles.
//!
//! # Overview
//!
//! - [`TextDefinition`] - Reusable text style configuration
//! - [`TextOrientation`] - Horizontal lines, or one character per line
//! - [`Text`] - A renderable text element combining content with a [`TextDefinition`]
//!
//! Shallow generations get wide boxes and horizontal names; deep generations
//! get narrow, tall boxes, so their names are stacked vertically one
//! character per line. [`Text::fit_within`] shrinks the font until the
//! measured text fits a box, stopping at the definition's minimum size.
//!
//! ```
//! # use pedigree_core::draw::{Text, TextDefinition, TextOrientation};
//! # use pedigree_core::geometry::Size;
//! let style = TextDefinition::new();
//! let name = Text::new(&style, "永盛")
//!     .with_orientation(TextOrientation::Vertical)
//!     .fit_within(Size::new(40.0, 120.0));
//! assert!(name.font_size() <= style.font_size());
//! assert_eq!(name.lines(), vec!["永", "盛"]);
//! ```

use std::sync::{Mutex, OnceLock, PoisonError};

use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping};
use log::{debug, info};
use svg::{self, node::Text as SvgText, node::element as svg_element};

use crate::{
    color::Color,
    draw::{Drawable, LayeredOutput, RenderLayer},
    geometry::{Point, Size},
};

/// Line height relative to the font size.
const LINE_HEIGHT_FACTOR: f32 = 1.15;

/// Step used when shrinking text to fit.
const SHRINK_STEP: f32 = 1.0;

/// Direction in which the characters of a text run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextOrientation {
    /// Lines of text laid out left to right
    #[default]
    Horizontal,
    /// Each character on its own line, top to bottom
    Vertical,
}

/// Defines the visual style for text elements.
///
/// # Default Values
///
/// | Property | Default |
/// |----------|---------|
/// | Font family | `"sans-serif"` |
/// | Font size | `16` px |
/// | Minimum font size | `8` px |
/// | Text color | `None` (SVG default, typically black) |
#[derive(Debug, Clone)]
pub struct TextDefinition {
    font_family: String,
    font_size: f32,
    min_font_size: f32,
    color: Option<Color>,
}

impl TextDefinition {
    /// Creates a new text definition with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the font size in pixels.
    pub fn set_font_size(&mut self, size: f32) {
        self.font_size = size;
    }

    /// Sets the smallest font size [`Text::fit_within`] may shrink to.
    pub fn set_min_font_size(&mut self, size: f32) {
        self.min_font_size = size;
    }

    /// Sets the font family for the text.
    pub fn set_font_family(&mut self, family: &str) {
        self.font_family = family.to_string();
    }

    /// Sets the text color. `None` uses the SVG default.
    pub fn set_color(&mut self, color: Option<Color>) {
        self.color = color;
    }

    /// Returns the configured font size in pixels.
    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    /// Returns the minimum font size in pixels.
    pub fn min_font_size(&self) -> f32 {
        self.min_font_size
    }

    /// Returns the font family name.
    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    fn color(&self) -> Option<&Color> {
        self.color.as_ref()
    }
}

impl Default for TextDefinition {
    fn default() -> Self {
        Self {
            font_family: "sans-serif".to_string(),
            font_size: 16.0,
            min_font_size: 8.0,
            color: None,
        }
    }
}

/// A renderable text element combining content with styling.
#[derive(Debug, Clone)]
pub struct Text<'a> {
    definition: &'a TextDefinition,
    content: &'a str,
    orientation: TextOrientation,
    font_size: f32,
}

impl<'a> Text<'a> {
    /// Creates a horizontal text element at the definition's font size.
    pub fn new(definition: &'a TextDefinition, content: &'a str) -> Self {
        Self {
            definition,
            content,
            orientation: TextOrientation::Horizontal,
            font_size: definition.font_size(),
        }
    }

    /// Sets the orientation, returning the modified text.
    pub fn with_orientation(mut self, orientation: TextOrientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Returns the text content of this element.
    pub fn content(&self) -> &str {
        self.content
    }

    /// Returns the font size this text renders at.
    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    /// Returns the rendered lines.
    ///
    /// Vertical text puts every non-whitespace character on its own line.
    pub fn lines(&self) -> Vec<String> {
        match self.orientation {
            TextOrientation::Horizontal => self.content.lines().map(str::to_string).collect(),
            TextOrientation::Vertical => self
                .content
                .chars()
                .filter(|c| !c.is_whitespace())
                .map(String::from)
                .collect(),
        }
    }

    /// Shrinks the font size until the text fits `available`.
    ///
    /// The font never drops below the definition's minimum size, so very long
    /// names may still overflow their box.
    pub fn fit_within(mut self, available: Size) -> Self {
        let min = self.definition.min_font_size().min(self.font_size);
        let mut size = self.calculate_size();
        while (size.width() > available.width() || size.height() > available.height())
            && self.font_size > min
        {
            self.font_size = (self.font_size - SHRINK_STEP).max(min);
            size = self.calculate_size();
        }
        if self.font_size < self.definition.font_size() {
            debug!(content = self.content, font_size = self.font_size; "Shrunk text to fit box");
        }
        self
    }

    /// Calculate the size required to display this text.
    pub fn calculate_size(&self) -> Size {
        let joined = self.lines().join("\n");
        TEXT_MANAGER.get_or_init(TextManager::new).calculate_text_size(
            &joined,
            self.definition.font_family(),
            self.font_size,
        )
    }

    fn line_height(&self) -> f32 {
        self.font_size * LINE_HEIGHT_FACTOR
    }
}

impl Drawable for Text<'_> {
    fn render_to_layers(&self, position: Point) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        let lines = self.lines();
        if lines.is_empty() {
            return output;
        }

        let line_height = self.line_height();
        let total_height = line_height * lines.len() as f32;
        // The first tspan advances by one line height before drawing
        let y_offset = -(total_height + line_height) / 2.0;

        let mut rendered_text = svg_element::Text::new("")
            .set("x", position.x())
            .set("y", position.y() + y_offset)
            .set("text-anchor", "middle")
            .set("dominant-baseline", "central")
            .set("font-family", self.definition.font_family())
            .set("font-size", self.font_size);

        if let Some(color) = self.definition.color() {
            rendered_text = rendered_text
                .set("fill", color.to_string())
                .set("fill-opacity", color.alpha());
        }

        for line in &lines {
            let tspan = svg_element::TSpan::new("")
                .set("x", position.x())
                .set("dy", line_height)
                .add(SvgText::new(line.as_str()));
            rendered_text = rendered_text.add(tspan);
        }

        output.add_to_layer(RenderLayer::Text, Box::new(rendered_text));
        output
    }

    fn size(&self) -> Size {
        self.calculate_size()
    }
}

/// Measures text with a shared cosmic-text `FontSystem`.
///
/// Loading system fonts is slow, so one instance is created lazily and reused.
struct TextManager {
    font_system: Mutex<FontSystem>,
}

impl TextManager {
    fn new() -> Self {
        info!("Initializing FontSystem");
        Self {
            font_system: Mutex::new(FontSystem::new()),
        }
    }

    /// Calculate the size of `text` in pixels from real font metrics and shaping.
    ///
    /// Falls back to an estimate when shaping produces no layout runs.
    fn calculate_text_size(&self, text: &str, font_family: &str, font_size: f32) -> Size {
        if text.is_empty() {
            return Size::default();
        }

        let mut font_system = self
            .font_system
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let metrics = Metrics::new(font_size, font_size * LINE_HEIGHT_FACTOR);

        let mut buffer = Buffer::new(&mut font_system, metrics);
        let mut buffer = buffer.borrow_with(&mut font_system);

        let attrs = Attrs::new().family(Family::Name(font_family));

        buffer.set_size(None, None);
        buffer.set_text(text, &attrs, Shaping::Advanced, None);
        buffer.shape_until_scroll(true);

        let mut max_width: f32 = 0.0;
        let mut total_height: f32 = 0.0;

        let layout_runs: Vec<_> = buffer.layout_runs().collect();
        if !layout_runs.is_empty() {
            for last in layout_runs.iter().map(|run| run.glyphs.last()) {
                if let Some(last) = last {
                    max_width = max_width.max(last.x + last.w);
                }
                total_height += metrics.line_height;
            }
        } else {
            let longest = text.lines().map(|l| l.chars().count()).max().unwrap_or(0);
            max_width = longest as f32 * font_size;
            total_height = text.lines().count() as f32 * metrics.line_height;
        }

        Size::new(max_width, total_height)
    }
}

static TEXT_MANAGER: OnceLock<TextManager> = OnceLock::new();
