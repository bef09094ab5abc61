//! Error types for Pedigree operations.
//!
//! This module provides the main error type [`PedigreeError`] which wraps
//! the error conditions that can occur between reading an outline and
//! writing the finished image.

use std::{io, path::PathBuf};

use thiserror::Error;

use pedigree_parser::ParseError;

/// The main error type for Pedigree operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant carries the outline source next to the parser
/// diagnostics, so callers can point at the offending lines.
#[derive(Debug, Error)]
pub enum PedigreeError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("The family tree has no root member")]
    EmptyTree,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error + Send + Sync>),

    #[error("A render to `{}` is already in progress", .0.display())]
    RenderInFlight(PathBuf),
}

impl From<crate::export::Error> for PedigreeError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}

impl From<serde_json::Error> for PedigreeError {
    fn from(error: serde_json::Error) -> Self {
        Self::MalformedInput(error.to_string())
    }
}

impl PedigreeError {
    /// Create a new `Parse` error with the associated source code.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }

    /// Returns true for errors caused by the input document rather than the
    /// environment.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::Parse { .. } | Self::MalformedInput(_) | Self::EmptyTree
        )
    }
}
