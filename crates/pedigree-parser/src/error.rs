//! Error and diagnostic system for the outline parser.
//!
//! The error system is built around the [`Diagnostic`] type, which represents
//! a single error or warning message with optional error code, labeled source
//! spans, and help text. All diagnostics from one parse are wrapped in a
//! [`ParseError`].
//!
//! # Example
//!
//! ```
//! # use pedigree_parser::error::{Diagnostic, ErrorCode};
//! # use pedigree_parser::Span;
//!
//! let diag = Diagnostic::error("the outline has more than one root entry")
//!     .with_code(ErrorCode::E100)
//!     .with_label(Span::new(40..48), "second root entry")
//!     .with_secondary_label(Span::new(10..18), "first root entry")
//!     .with_help("indent this entry to place it under an existing member");
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod label;
mod parse_error;
mod severity;

pub(crate) use collector::DiagnosticCollector;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
pub use parse_error::ParseError;
pub use severity::Severity;
