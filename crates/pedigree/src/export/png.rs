//! PNG output through `resvg`.
//!
//! The SVG produced by [`SvgExporter`] is parsed back with `usvg` and
//! rasterized onto a `tiny-skia` pixmap at [`StyleConfig::png_scale`].

use std::{
    io,
    sync::{Arc, OnceLock},
};

use log::{debug, info};
use resvg::{
    tiny_skia::{Pixmap, Transform},
    usvg::{self, fontdb},
};

use crate::{
    config::StyleConfig,
    export::{self, Exporter, svg::SvgExporter},
    layout::Layout,
};

/// System fonts, loaded once per process.
static FONT_DATABASE: OnceLock<Arc<fontdb::Database>> = OnceLock::new();

fn font_database() -> Arc<fontdb::Database> {
    Arc::clone(FONT_DATABASE.get_or_init(|| {
        info!("Loading system fonts for rasterization");
        let mut database = fontdb::Database::new();
        database.load_system_fonts();
        Arc::new(database)
    }))
}

/// Rasterizes an SVG document to PNG bytes.
///
/// `font_family` is used for text without a resolvable family.
///
/// # Errors
///
/// Returns [`export::Error::Render`] if the SVG cannot be parsed, the scaled
/// image would be empty or too large, or encoding fails.
pub fn rasterize(svg: &str, scale: f32, font_family: &str) -> Result<Vec<u8>, export::Error> {
    if !(scale.is_finite() && scale > 0.0) {
        return Err(export::Error::Render(format!(
            "PNG scale must be a positive number, got {scale}"
        )));
    }

    let mut options = usvg::Options {
        fontdb: font_database(),
        ..usvg::Options::default()
    };
    options.font_family = font_family.to_string();

    let tree = usvg::Tree::from_str(svg, &options).map_err(|err| {
        export::Error::Render(format!("failed to parse generated SVG: {err}"))
    })?;

    let size = tree.size();
    let width = (size.width() * scale).ceil();
    let height = (size.height() * scale).ceil();
    if !(width >= 1.0 && height >= 1.0 && width <= u32::MAX as f32 && height <= u32::MAX as f32) {
        return Err(export::Error::Render(format!(
            "scaled image size {width}x{height} is out of range"
        )));
    }

    let (width, height) = (width as u32, height as u32);
    let mut pixmap = Pixmap::new(width, height).ok_or_else(|| {
        export::Error::Render(format!("failed to allocate a {width}x{height} image"))
    })?;
    debug!(width, height, scale; "Rasterizing SVG");

    resvg::render(&tree, Transform::from_scale(scale, scale), &mut pixmap.as_mut());

    pixmap
        .encode_png()
        .map_err(|err| export::Error::Render(format!("failed to encode PNG: {err}")))
}

/// Renders layouts as PNG images.
#[derive(Debug, Clone)]
pub struct PngExporter {
    svg: SvgExporter,
    scale: f32,
    font_family: String,
}

impl PngExporter {
    /// Creates an exporter from style settings.
    ///
    /// # Errors
    ///
    /// Returns [`export::Error::Render`] if a configured color is invalid.
    pub fn new(style: &StyleConfig) -> Result<Self, export::Error> {
        Ok(Self {
            svg: SvgExporter::new(style)?,
            scale: style.png_scale(),
            font_family: style.font_family().to_string(),
        })
    }

    /// Sets the heading drawn above the tree.
    pub fn with_title(mut self, title: Option<&str>) -> Self {
        self.svg = self.svg.with_title(title);
        self
    }
}

impl Exporter for PngExporter {
    fn export_layout(
        &mut self,
        layout: &Layout,
        writer: &mut dyn io::Write,
    ) -> Result<(), export::Error> {
        let svg = self.svg.render(layout).to_string();
        let png = rasterize(&svg, self.scale, &self.font_family)?;
        writer.write_all(&png)?;
        info!(bytes = png.len(); "PNG exported");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_SIGNATURE: &[u8] = &[0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

    const SQUARE: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="20" height="10" viewBox="0 0 20 10"><rect width="20" height="10" fill="lightblue"/></svg>"#;

    #[test]
    fn test_rasterize_produces_png() {
        let png = rasterize(SQUARE, 2.0, "sans-serif").unwrap();
        assert!(png.starts_with(PNG_SIGNATURE));
    }

    #[test]
    fn test_rasterize_rejects_bad_scale() {
        assert!(rasterize(SQUARE, 0.0, "sans-serif").is_err());
        assert!(rasterize(SQUARE, f32::NAN, "sans-serif").is_err());
    }

    #[test]
    fn test_rasterize_rejects_invalid_svg() {
        let err = rasterize("not svg at all", 1.0, "sans-serif").unwrap_err();
        assert!(err.to_string().contains("parse"));
    }
}
