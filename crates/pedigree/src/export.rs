//! Export of calculated layouts to image formats.
//!
//! This module provides the [`Exporter`] trait and the two exporters that
//! implement it: [`svg::SvgExporter`] and [`png::PngExporter`]. Both write
//! to any [`io::Write`], so the same code renders into memory and into
//! files.
//!
//! # Pipeline Position
//!
//! ```text
//! Outline text / JSON
//!     ↓ parse
//! FamilyRecord
//!     ↓ tree + measure
//! SizedTree
//!     ↓ layout
//! Layout
//!     ↓ export (this module)
//! SVG / PNG bytes
//! ```
//!
//! Exporters never change geometry. The same [`Layout`] always yields the
//! same SVG text; PNG pixels additionally depend on the fonts and the
//! rasterizer version available at run time.

pub mod png;
pub mod svg;

use std::{fmt, io, path::Path};

use crate::layout::Layout;

/// Renders a [`Layout`] into an output stream.
pub trait Exporter {
    /// Writes the complete rendering of `layout` to `writer`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] when the drawing cannot be produced and
    /// [`Error::Io`] when writing fails.
    fn export_layout(&mut self, layout: &Layout, writer: &mut dyn io::Write) -> Result<(), Error>;
}

/// Errors that can occur during export.
#[derive(Debug)]
pub enum Error {
    /// Rendering the drawing failed.
    Render(String),
    /// Writing the output failed.
    Io(io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Render(msg) => write!(f, "Render error: {msg}"),
            Self::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Render(_) => None,
            Self::Io(err) => Some(err),
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

/// Output image format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Svg,
    Png,
}

impl Format {
    /// Picks the format from a file extension, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns a message when the extension is missing or unsupported.
    ///
    /// # Examples
    ///
    /// ```
    /// # use std::path::Path;
    /// # use pedigree::export::Format;
    /// assert_eq!(Format::from_path(Path::new("tree.PNG")), Ok(Format::Png));
    /// assert!(Format::from_path(Path::new("tree.pdf")).is_err());
    /// ```
    pub fn from_path(path: &Path) -> Result<Self, String> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("svg") => Ok(Self::Svg),
            Some("png") => Ok(Self::Png),
            Some(other) => Err(format!(
                "unsupported output format `.{other}` for `{}`, expected .svg or .png",
                path.display()
            )),
            None => Err(format!(
                "output path `{}` has no extension, expected .svg or .png",
                path.display()
            )),
        }
    }

    /// The file extension without a dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Png => "png",
        }
    }
}

impl std::str::FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "svg" => Ok(Self::Svg),
            "png" => Ok(Self::Png),
            other => Err(format!("unknown format `{other}`, expected svg or png")),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_path() {
        assert_eq!(Format::from_path(Path::new("out/家谱.svg")), Ok(Format::Svg));
        assert_eq!(Format::from_path(Path::new("a.Png")), Ok(Format::Png));
        assert!(Format::from_path(Path::new("a")).unwrap_err().contains("no extension"));
        assert!(Format::from_path(Path::new("a.jpg")).unwrap_err().contains(".jpg"));
    }

    #[test]
    fn test_format_from_str_and_display() {
        assert_eq!("SVG".parse::<Format>(), Ok(Format::Svg));
        assert!("gif".parse::<Format>().is_err());
        assert_eq!(Format::Png.to_string(), "png");
    }

    #[test]
    fn test_error_display_and_source() {
        use std::error::Error as _;

        let err = Error::Render("bad".to_string());
        assert_eq!(err.to_string(), "Render error: bad");
        assert!(err.source().is_none());

        let err: Error = io::Error::other("disk full").into();
        assert!(err.to_string().starts_with("I/O error"));
        assert!(err.source().is_some());
    }
}
