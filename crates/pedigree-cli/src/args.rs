//! Command-line argument definitions for the Pedigree CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. A subcommand selects the action; configuration file
//! selection and logging verbosity apply to all of them.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use pedigree::export::Format;

/// Command-line arguments for the Pedigree family tree tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Path to configuration file (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info", global = true)]
    pub log_level: String,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render family trees to SVG or PNG images
    Render(RenderArgs),
    /// Summarize a family tree file
    Info(InfoArgs),
    /// Create a new outline from a template
    New(NewArgs),
}

#[derive(clap::Args, Debug)]
pub struct RenderArgs {
    /// Outline (.md) or JSON (.json) files to render
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Output file; the extension selects the format. Only valid with a single input
    #[arg(short, long, conflicts_with_all = ["output_dir", "format"])]
    pub output: Option<PathBuf>,

    /// Directory for images named after each tree's title
    #[arg(long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Image format when writing to the output directory
    #[arg(long, default_value = "svg")]
    pub format: Format,
}

#[derive(clap::Args, Debug)]
pub struct InfoArgs {
    /// Outline (.md) or JSON (.json) file to summarize
    pub input: PathBuf,
}

#[derive(clap::Args, Debug)]
pub struct NewArgs {
    /// Name of the family tree, used as title and file name
    pub name: String,

    /// Directory to create the outline in
    #[arg(long, default_value = ".")]
    pub dir: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_args_are_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_render_defaults() {
        let args = Args::try_parse_from(["pedigree", "render", "a.md", "b.json"]).unwrap();
        let Command::Render(render) = args.command else {
            panic!("expected render");
        };
        assert_eq!(render.inputs.len(), 2);
        assert_eq!(render.format, Format::Svg);
        assert_eq!(render.output_dir, PathBuf::from("."));
        assert_eq!(args.log_level, "info");
    }

    #[test]
    fn test_output_conflicts_with_format() {
        let result = Args::try_parse_from(["pedigree", "render", "a.md", "-o", "a.png", "--format", "png"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_options_after_subcommand() {
        let args =
            Args::try_parse_from(["pedigree", "info", "a.md", "--log-level", "off", "-c", "my.toml"])
                .unwrap();
        assert_eq!(args.log_level, "off");
        assert_eq!(args.config.as_deref(), Some("my.toml"));
        assert!(matches!(args.command, Command::Info(_)));
    }
}
