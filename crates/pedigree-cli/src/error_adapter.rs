//! Error adapter for converting PedigreeError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.
//!
//! # Multi-Error Support
//!
//! When a [`pedigree_parser::ParseError`] contains multiple diagnostics, each
//! diagnostic is rendered independently against the outline source.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use pedigree::PedigreeError;
use pedigree_parser::{Span, error::Diagnostic};

/// Adapter for a single outline diagnostic.
pub struct DiagnosticAdapter<'a> {
    diag: &'a Diagnostic,
    /// Source code for displaying snippets
    src: &'a str,
}

impl<'a> DiagnosticAdapter<'a> {
    pub fn new(diag: &'a Diagnostic, src: &'a str) -> Self {
        Self { diag, src }
    }
}

impl fmt::Debug for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagnosticAdapter")
            .field("diag", &self.diag)
            .finish()
    }
}

impl fmt::Display for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.diag.message())
    }
}

impl std::error::Error for DiagnosticAdapter<'_> {}

impl MietteDiagnostic for DiagnosticAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diag
            .code()
            .map(|c| Box::new(c.as_str()) as Box<dyn fmt::Display>)
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diag
            .help()
            .map(|h| Box::new(h) as Box<dyn fmt::Display>)
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let labels = self.diag.labels();
        if labels.is_empty() {
            return None;
        }

        Some(Box::new(labels.iter().map(|label| {
            let span = span_to_miette(label.span());
            let message = Some(label.message().to_string());
            if label.is_primary() {
                LabeledSpan::new_primary_with_span(message, span)
            } else {
                LabeledSpan::new_with_span(message, span)
            }
        })))
    }
}

/// Adapter for [`PedigreeError`] variants without source locations.
pub struct ErrorAdapter<'a>(pub &'a PedigreeError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            PedigreeError::Io(_) => "pedigree::io",
            PedigreeError::Parse { .. } => return None,
            PedigreeError::MalformedInput(_) => "pedigree::input",
            PedigreeError::EmptyTree => "pedigree::empty_tree",
            PedigreeError::Config(_) => "pedigree::config",
            PedigreeError::Export(_) => "pedigree::export",
            PedigreeError::RenderInFlight(_) => "pedigree::render",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            PedigreeError::EmptyTree => "add a root entry such as `- 文达` to the outline",
            PedigreeError::RenderInFlight(_) => "wait for the running render to finish",
            _ => return None,
        };
        Some(Box::new(help))
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A rich diagnostic with source location information.
    Diagnostic(DiagnosticAdapter<'a>),
    /// A simple error without source location.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Diagnostic(d) => fmt::Display::fmt(d, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Diagnostic(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Diagnostic(d) => d.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Diagnostic(d) => d.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

fn span_to_miette(span: Span) -> SourceSpan {
    SourceSpan::new(span.start().into(), span.len())
}

/// Convert a [`PedigreeError`] into a list of reportable errors.
///
/// For [`PedigreeError::Parse`], this returns one [`Reportable`] for
/// each diagnostic in the error. For other error variants, this returns a
/// single [`Reportable`].
pub fn to_reportables(err: &PedigreeError) -> Vec<Reportable<'_>> {
    match err {
        PedigreeError::Parse {
            err: parse_err,
            src,
        } => parse_err
            .diagnostics()
            .iter()
            .map(|d| Reportable::Diagnostic(DiagnosticAdapter::new(d, src)))
            .collect(),
        _ => vec![Reportable::Error(ErrorAdapter(err))],
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use pedigree_parser::error::{ErrorCode, ParseError};

    use super::*;

    #[test]
    fn test_each_diagnostic_is_reported() {
        let source = "- 文达\n- 文华\n\t- 明圣\n";
        let err = PedigreeError::new_parse_error(
            pedigree_parser::parse(source).unwrap_err(),
            source,
        );

        let reportables = to_reportables(&err);
        assert_eq!(reportables.len(), 2);
        assert!(
            reportables
                .iter()
                .all(|r| matches!(r, Reportable::Diagnostic(_)) && r.source_code().is_some())
        );
    }

    #[test]
    fn test_diagnostic_code_and_labels() {
        let diag = Diagnostic::error("the outline has more than one root entry")
            .with_code(ErrorCode::E100)
            .with_label(Span::new(10..16), "second root entry")
            .with_secondary_label(Span::new(0..6), "first root entry")
            .with_help("indent this entry");
        let err = PedigreeError::new_parse_error(ParseError::from(diag), "- root\n- other\n");

        let reportables = to_reportables(&err);
        let report = &reportables[0];
        assert_eq!(report.code().unwrap().to_string(), "E100");
        assert_eq!(report.help().unwrap().to_string(), "indent this entry");

        let labels: Vec<_> = report.labels().unwrap().collect();
        assert_eq!(labels.len(), 2);
        assert!(labels[0].primary());
        assert!(!labels[1].primary());
        assert_eq!(labels[1].label(), Some("first root entry"));
    }

    #[test]
    fn test_other_errors_get_a_code() {
        let err = PedigreeError::RenderInFlight(PathBuf::from("tree.svg"));

        let reportables = to_reportables(&err);
        assert_eq!(reportables.len(), 1);
        match &reportables[0] {
            Reportable::Error(e) => {
                assert_eq!(e.code().unwrap().to_string(), "pedigree::render");
                assert!(e.help().is_some());
                assert!(e.to_string().contains("tree.svg"));
            }
            Reportable::Diagnostic(_) => panic!("Expected Error"),
        }

        let err = PedigreeError::EmptyTree;
        assert_eq!(
            to_reportables(&err)[0].code().unwrap().to_string(),
            "pedigree::empty_tree"
        );
    }
}
