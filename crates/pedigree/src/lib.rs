//! Pedigree - genealogy tree diagrams from indented outlines.
//!
//! Parsing, layout, and rendering for family trees written as Markdown-style
//! outlines (or the equivalent JSON records). Each generation is one level of
//! the outline; the layout engine places every member so that no two boxes
//! collide and labels each generation with its 字辈 name.

pub mod config;
pub mod export;
pub mod layout;
pub mod render;
pub mod tree;

mod error;

pub use pedigree_core::{color, geometry, record};
pub use pedigree_parser::Outline;

pub use error::PedigreeError;

use std::{
    fs,
    io::Write as _,
    path::{Path, PathBuf},
};

use log::{debug, info, trace};

use config::AppConfig;
use export::{Exporter, Format, png::PngExporter, svg::SvgExporter};
use layout::{Engine, Layout};
use record::FamilyRecord;
use tree::TreeBuilder;

/// A loaded family tree ready to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Heading drawn above the tree.
    pub title: Option<String>,
    /// The root member, carrying the generation names.
    pub root: FamilyRecord,
}

impl Document {
    pub fn new(title: Option<String>, root: FamilyRecord) -> Self {
        Self { title, root }
    }

    /// Turns a parsed outline into a document.
    ///
    /// # Errors
    ///
    /// Returns [`PedigreeError::EmptyTree`] if the outline has no entries.
    pub fn from_outline(outline: Outline) -> Result<Self, PedigreeError> {
        let root = outline.root.ok_or(PedigreeError::EmptyTree)?;
        Ok(Self {
            title: outline.title,
            root,
        })
    }
}

/// Builder for parsing and rendering family trees.
///
/// This provides an API for processing family trees through parsing,
/// layout, and rendering stages.
///
/// # Examples
///
/// ```rust,no_run
/// use pedigree::{PedigreeBuilder, config::AppConfig};
///
/// let source = "# 何氏家谱\n## 字辈: 文,明\n- 文达\n  - 明圣\n  - 明德\n";
///
/// let builder = PedigreeBuilder::new(AppConfig::default());
///
/// // Parse the outline
/// let outline = builder.parse(source).expect("Failed to parse");
/// let root = outline.root.expect("Outline has members");
///
/// // Lay the tree out and render it to SVG
/// let layout = builder.layout(&root).expect("Failed to lay out");
/// let svg = builder
///     .render_svg(&layout, outline.title.as_deref())
///     .expect("Failed to render");
/// ```
#[derive(Debug, Default)]
pub struct PedigreeBuilder {
    config: AppConfig,
}

impl PedigreeBuilder {
    /// Create a new builder with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Application configuration including layout and style settings
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse outline text.
    ///
    /// # Errors
    ///
    /// Returns [`PedigreeError::Parse`] with every problem found in the
    /// outline.
    pub fn parse(&self, source: &str) -> Result<Outline, PedigreeError> {
        info!("Parsing outline");

        let outline = pedigree_parser::parse(source)
            .map_err(|err| PedigreeError::new_parse_error(err, source))?;

        debug!(
            title:? = outline.title,
            members = outline.root.as_ref().map_or(0, FamilyRecord::count_members);
            "Outline parsed successfully"
        );
        trace!(outline:?; "Parsed outline");

        Ok(outline)
    }

    /// Parse a JSON family record.
    ///
    /// # Errors
    ///
    /// Returns [`PedigreeError::MalformedInput`] if the JSON is invalid or a
    /// record has no `name`.
    pub fn parse_json(&self, source: &str) -> Result<FamilyRecord, PedigreeError> {
        info!("Parsing JSON family record");
        let record: FamilyRecord = serde_json::from_str(source)?;
        debug!(members = record.count_members(); "JSON record parsed successfully");
        Ok(record)
    }

    /// Read a document from disk.
    ///
    /// Files ending in `.json` are read as a JSON record, everything else as
    /// an outline.
    ///
    /// # Errors
    ///
    /// Returns I/O errors, parse errors, and [`PedigreeError::EmptyTree`] for
    /// outlines without members.
    pub fn load(&self, path: &Path) -> Result<Document, PedigreeError> {
        info!(path:? = path; "Loading document");
        let source = fs::read_to_string(path)?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            let root = self.parse_json(&source)?;
            return Ok(Document::new(None, root));
        }

        Document::from_outline(self.parse(&source)?)
    }

    /// Lay out a family tree.
    ///
    /// Builds the typed tree, assigns depths and box sizes, then runs the
    /// layout engine.
    ///
    /// # Errors
    ///
    /// Returns [`PedigreeError::Config`] for unusable layout settings and
    /// [`PedigreeError::MalformedInput`] for members without a name.
    pub fn layout(&self, root: &FamilyRecord) -> Result<Layout, PedigreeError> {
        let layout_config = self.config.layout();
        layout_config.validate().map_err(PedigreeError::Config)?;

        info!(root = root.name.as_str(); "Building family tree");
        let tree = TreeBuilder::from_record(root)?.measure(&layout_config.size_policy());
        debug!(members = tree.len(); "Tree built successfully");

        let layout = Engine::new(layout_config.clone()).calculate(tree);
        info!(members = layout.len(), labels = layout.labels().len(); "Layout calculated");
        Ok(layout)
    }

    /// Render a layout to an SVG string.
    ///
    /// # Errors
    ///
    /// Returns [`PedigreeError::Config`] for invalid style settings.
    pub fn render_svg(&self, layout: &Layout, title: Option<&str>) -> Result<String, PedigreeError> {
        let bytes = self.export(layout, title, Format::Svg)?;
        String::from_utf8(bytes).map_err(|err| PedigreeError::Export(Box::new(err)))
    }

    /// Render a layout to PNG bytes.
    ///
    /// # Errors
    ///
    /// Returns [`PedigreeError::Config`] for invalid style settings and
    /// [`PedigreeError::Export`] if rasterization fails.
    pub fn render_png(&self, layout: &Layout, title: Option<&str>) -> Result<Vec<u8>, PedigreeError> {
        self.export(layout, title, Format::Png)
    }

    /// Run the whole pipeline for `document` and write the image to `output`.
    ///
    /// The format follows the extension of `output`. The image is written
    /// to a temporary file next to `output` and moved over it only once
    /// complete, so a failed render never leaves a partial file behind.
    ///
    /// # Errors
    ///
    /// Returns [`PedigreeError::Config`] for unsupported extensions, and any
    /// layout, export or I/O error.
    pub fn render_to_file(&self, document: &Document, output: &Path) -> Result<(), PedigreeError> {
        let format = Format::from_path(output).map_err(PedigreeError::Config)?;
        let layout = self.layout(&document.root)?;
        let bytes = self.export(&layout, document.title.as_deref(), format)?;

        let directory = match output.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let mut temp_file = tempfile::NamedTempFile::new_in(&directory)?;
        temp_file.write_all(&bytes)?;
        temp_file.as_file().sync_all()?;
        temp_file
            .persist(output)
            .map_err(|err| PedigreeError::Io(err.error))?;

        info!(output:? = output, format:% = format, bytes = bytes.len(); "Image written");
        Ok(())
    }

    fn export(
        &self,
        layout: &Layout,
        title: Option<&str>,
        format: Format,
    ) -> Result<Vec<u8>, PedigreeError> {
        let style = self.config.style();
        style.validate().map_err(PedigreeError::Config)?;

        let mut exporter: Box<dyn Exporter> = match format {
            Format::Svg => Box::new(SvgExporter::new(style)?.with_title(title)),
            Format::Png => Box::new(PngExporter::new(style)?.with_title(title)),
        };

        info!(format:% = format; "Rendering image");
        let mut bytes = Vec::new();
        exporter.export_layout(layout, &mut bytes)?;
        Ok(bytes)
    }
}
