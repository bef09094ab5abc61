//! # Pedigree Parser
//!
//! Parser for the Pedigree outline format: a Markdown-like list in which each
//! family member is an entry and indentation gives the generation.
//!
//! ## Format
//!
//! ```text
//! # 何氏家谱                    <- title (first `# ` line)
//! ## 字辈: 文,明,俊,永          <- generation names, indexed by depth
//! - 文达                        <- the root, unindented
//!   - 明圣                      <- two spaces per generation
//!     - 俊盛
//!   - 明德
//! ---                           <- everything below is ignored
//! ```
//!
//! ## Usage
//!
//! ```
//! # use pedigree_parser::{parse, ParseError};
//! fn main() -> Result<(), ParseError> {
//!     let outline = parse("# 何氏家谱\n- 文达\n  - 明圣\n  - 明德\n")?;
//!
//!     assert_eq!(outline.title.as_deref(), Some("何氏家谱"));
//!     let root = outline.root.expect("outline has a root");
//!     assert_eq!(root.name, "文达");
//!     assert_eq!(root.children.len(), 2);
//!     Ok(())
//! }
//! ```

pub mod error;
mod line;
mod outline;
mod span;

pub use error::ParseError;
pub use outline::Outline;
pub use span::Span;

/// Parse outline source text into an [`Outline`].
///
/// Every line is classified on its own, then entries are attached to their
/// parents with an indentation stack. Problems are collected rather than
/// reported one at a time, so the returned [`ParseError`] lists every bad
/// line.
///
/// An outline without any entries parses successfully with `root: None`.
pub fn parse(source: &str) -> Result<Outline, ParseError> {
    outline::OutlineReader::new(source).read()
}
