//! CLI logic for the Pedigree family tree tool.
//!
//! This module contains the subcommands behind the `pedigree` binary:
//! rendering trees to images, summarizing a tree, and creating a new
//! outline from a template.

pub mod error_adapter;

mod args;
mod config;
mod summary;
mod template;

pub use args::{Args, Command, InfoArgs, NewArgs, RenderArgs};

use std::{
    collections::HashSet,
    fs,
    io::{self, Write as _},
    path::{Path, PathBuf},
};

use log::{info, warn};

use pedigree::{
    Document, PedigreeBuilder, PedigreeError, export::Format, render::BackgroundRenderer,
};

use summary::Summary;

/// Run the Pedigree CLI application
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `PedigreeError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Parsing errors
/// - Layout errors
/// - Rendering errors
pub fn run(args: &Args) -> Result<(), PedigreeError> {
    match &args.command {
        Command::Render(render_args) => {
            let builder = PedigreeBuilder::new(config::load_config(args.config.as_ref())?);
            render(builder, render_args)
        }
        Command::Info(info_args) => {
            let builder = PedigreeBuilder::new(config::load_config(args.config.as_ref())?);
            describe(&builder, info_args)
        }
        Command::New(new_args) => create(new_args).map(|_| ()),
    }
}

/// Renders every input, concurrently when there are several.
fn render(builder: PedigreeBuilder, args: &RenderArgs) -> Result<(), PedigreeError> {
    if args.output.is_some() && args.inputs.len() > 1 {
        return Err(PedigreeError::Config(
            "--output can only be used with a single input, use --output-dir instead".to_string(),
        ));
    }

    let mut jobs = Vec::with_capacity(args.inputs.len());
    for input in &args.inputs {
        info!(input:? = input; "Processing family tree");
        let document = builder.load(input)?;
        let output = match &args.output {
            Some(output) => output.clone(),
            None => output_path(&document, input, &args.output_dir, args.format),
        };
        jobs.push((document, output));
    }

    let mut outputs = HashSet::new();
    for (_, output) in &jobs {
        if !outputs.insert(output) {
            return Err(PedigreeError::Config(format!(
                "more than one input would be written to `{}`",
                output.display()
            )));
        }
    }

    if args.output.is_none() {
        fs::create_dir_all(&args.output_dir)?;
    }

    let mut renderer = BackgroundRenderer::new(builder);
    for (document, output) in jobs {
        renderer.submit(document, output)?;
    }

    let mut first_error = None;
    for outcome in renderer.wait_all() {
        match outcome.into_result() {
            Ok(path) => info!(output:? = path; "Family tree rendered"),
            Err(err) => {
                // The renderer has logged it already
                first_error.get_or_insert(err);
            }
        }
    }
    first_error.map_or(Ok(()), Err)
}

/// `<title or file stem>.<format>` inside `dir`.
fn output_path(document: &Document, input: &Path, dir: &Path, format: Format) -> PathBuf {
    let stem = document
        .title
        .as_deref()
        .map(str::trim)
        .filter(|title| !title.is_empty())
        .map(|title| title.replace(['/', '\\', ':', '*', '?', '"', '<', '>', '|'], "_"))
        .or_else(|| {
            input
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
        })
        .unwrap_or_else(|| "pedigree".to_string());
    dir.join(format!("{stem}.{}", format.extension()))
}

/// Prints a summary of one family tree to stdout.
fn describe(builder: &PedigreeBuilder, args: &InfoArgs) -> Result<(), PedigreeError> {
    let document = builder.load(&args.input)?;
    let fallback = args
        .input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut stdout = io::stdout().lock();
    write!(stdout, "{}", Summary::new(&document, &fallback))?;
    stdout.flush()?;
    Ok(())
}

/// Writes a template outline and returns its path.
fn create(args: &NewArgs) -> Result<PathBuf, PedigreeError> {
    let stem = template::file_stem(&args.name).ok_or_else(|| {
        PedigreeError::Config("the family tree name must not be empty".to_string())
    })?;
    let path = args.dir.join(format!("{stem}.md"));

    fs::create_dir_all(&args.dir)?;
    let mut options = fs::OpenOptions::new();
    options.write(true);
    if args.force {
        options.create(true).truncate(true);
    } else {
        options.create_new(true);
    }

    let mut file = options.open(&path).map_err(|err| {
        if err.kind() == io::ErrorKind::AlreadyExists {
            io::Error::new(
                err.kind(),
                format!("`{}` already exists, pass --force to overwrite it", path.display()),
            )
        } else {
            err
        }
    })?;
    if args.force {
        warn!(path:? = path; "Overwriting existing outline");
    }
    file.write_all(template::outline(stem).as_bytes())?;

    info!(path:? = path; "Outline created");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use pedigree::record::FamilyRecord;

    use super::*;

    #[test]
    fn test_output_path_prefers_title() {
        let document = Document::new(Some("何氏/家谱".to_string()), FamilyRecord::new("文达"));
        let path = output_path(&document, Path::new("in/family.md"), Path::new("out"), Format::Png);
        assert_eq!(path, Path::new("out").join("何氏_家谱.png"));

        let untitled = Document::new(Some("  ".to_string()), FamilyRecord::new("文达"));
        let path = output_path(&untitled, Path::new("in/family.md"), Path::new("out"), Format::Svg);
        assert_eq!(path, Path::new("out").join("family.svg"));
    }

    #[test]
    fn test_create_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let args = NewArgs {
            name: "何氏家谱".to_string(),
            dir: dir.path().to_path_buf(),
            force: false,
        };

        let path = create(&args).unwrap();
        assert_eq!(path, dir.path().join("何氏家谱.md"));

        fs::write(&path, "edited").unwrap();
        let err = create(&args).unwrap_err();
        assert!(err.to_string().contains("--force"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "edited");

        let forced = NewArgs { force: true, ..args };
        create(&forced).unwrap();
        assert!(fs::read_to_string(&path).unwrap().starts_with("# 何氏家谱"));
    }

    #[test]
    fn test_create_rejects_blank_name() {
        let dir = tempfile::tempdir().unwrap();
        let args = NewArgs {
            name: "  ".to_string(),
            dir: dir.path().to_path_buf(),
            force: false,
        };
        assert!(matches!(create(&args), Err(PedigreeError::Config(_))));
    }
}
