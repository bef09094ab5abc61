//! Assembly of classified lines into a family record.

use log::{debug, trace, warn};

use pedigree_core::record::FamilyRecord;

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError},
    line::{Line, split_generations},
    span::Span,
};

/// Spaces per generation of indentation.
const INDENT_WIDTH: usize = 2;

/// The result of parsing an outline.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Outline {
    /// Text of the first `# ` line, if any.
    pub title: Option<String>,
    /// The root entry with all of its descendants. Generation names, when the
    /// outline declares them, are attached to this record.
    pub root: Option<FamilyRecord>,
}

/// One entry as seen in the source, before nesting.
#[derive(Debug)]
struct Entry {
    name: String,
    span: Span,
    children: Vec<usize>,
}

/// Reads an outline line by line, tracking the chain of open ancestors.
pub(crate) struct OutlineReader<'src> {
    source: &'src str,
    title: Option<String>,
    generations: Vec<String>,
    entries: Vec<Entry>,
    /// Indices into `entries`; `stack[d]` is the open entry at depth `d`
    stack: Vec<usize>,
    root: Option<usize>,
    diagnostics: DiagnosticCollector,
}

impl<'src> OutlineReader<'src> {
    pub(crate) fn new(source: &'src str) -> Self {
        Self {
            source,
            title: None,
            generations: Vec::new(),
            entries: Vec::new(),
            stack: Vec::new(),
            root: None,
            diagnostics: DiagnosticCollector::new(),
        }
    }

    pub(crate) fn read(mut self) -> Result<Outline, ParseError> {
        let source = self.source;
        let mut offset = 0;
        for raw_line in source.split_inclusive('\n') {
            let line_start = offset;
            offset += raw_line.len();

            let line = raw_line.trim_end();
            if line.is_empty() {
                continue;
            }

            match Line::classify(line) {
                Line::Break => {
                    debug!(offset = line_start; "Outline ends at thematic break");
                    break;
                }
                Line::Title(text) => self.read_title(text),
                Line::Generations(list) => {
                    self.generations = split_generations(list);
                    debug!(count = self.generations.len(); "Read generation names");
                }
                Line::Entry { indent, name } => {
                    self.read_entry(line, line_start, indent, name);
                }
                Line::Unmarked { indent, text } => {
                    if !self.check_indentation(line_start, indent) {
                        continue;
                    }
                    let start = line_start + indent.len();
                    self.diagnostics.emit(
                        Diagnostic::error("indented line is not a family entry")
                            .with_code(ErrorCode::E002)
                            .with_label(Span::new(start..start + text.len()), "expected `- name`")
                            .with_help("start the entry with `- `, or remove the indentation"),
                    );
                }
                Line::Other => {
                    trace!(line; "Ignoring line");
                }
            }
        }

        self.diagnostics.finish()?;

        let root = self.root.map(|root| {
            let mut record = assemble(self.entries, root);
            record.generations = self.generations;
            record
        });

        Ok(Outline {
            title: self.title,
            root,
        })
    }

    fn read_title(&mut self, text: &str) {
        let text = text.trim();
        if self.title.is_none() {
            self.title = Some(text.to_string());
        } else {
            trace!(text; "Ignoring later title line");
        }
    }

    /// Reports tabs in `indent`. Returns `true` when the indentation is usable.
    fn check_indentation(&mut self, line_start: usize, indent: &str) -> bool {
        let Some(tab) = indent.find('\t') else {
            return true;
        };
        let start = line_start + tab;
        self.diagnostics.emit(
            Diagnostic::error("tab character in indentation")
                .with_code(ErrorCode::E001)
                .with_label(Span::new(start..start + 1), "tab here")
                .with_help("indent with two spaces per generation"),
        );
        false
    }

    fn read_entry(&mut self, line: &str, line_start: usize, indent: &str, raw_name: &str) {
        if !self.check_indentation(line_start, indent) {
            return;
        }

        let name = raw_name.trim();
        if name.is_empty() {
            warn!(offset = line_start; "Skipping entry without a name");
            return;
        }

        // `raw_name` is a suffix of `line`
        let leading = raw_name.len() - raw_name.trim_start().len();
        let name_start = line_start + line.len() - raw_name.len() + leading;
        let span = Span::new(name_start..name_start + name.len());
        let depth = indent.len() / INDENT_WIDTH;

        if depth == 0 {
            self.read_root(name, span);
            return;
        }

        // Pop back to the parent level of this entry
        self.stack.truncate(depth);
        let Some(&parent) = self.stack.last() else {
            self.diagnostics.emit(
                Diagnostic::error(format!("entry `{name}` has no parent"))
                    .with_code(ErrorCode::E101)
                    .with_label(span, "appears before the root entry")
                    .with_help("add an unindented `- name` line above it for the root"),
            );
            return;
        };
        if self.stack.len() < depth {
            warn!(
                name,
                depth,
                parent = self.entries[parent].name.as_str();
                "Entry skips a generation, attaching to nearest ancestor"
            );
        }

        let index = self.push_entry(name, span);
        self.entries[parent].children.push(index);
        self.stack.push(index);
    }

    fn read_root(&mut self, name: &str, span: Span) {
        if let Some(first) = self.root {
            let first_span = self.entries[first].span;
            self.diagnostics.emit(
                Diagnostic::error("the outline has more than one root entry")
                    .with_code(ErrorCode::E100)
                    .with_label(span, "second root entry")
                    .with_secondary_label(first_span, "first root entry")
                    .with_help("indent this entry to place it under an existing member"),
            );
            return;
        }

        let index = self.push_entry(name, span);
        self.root = Some(index);
        self.stack.clear();
        self.stack.push(index);
    }

    fn push_entry(&mut self, name: &str, span: Span) -> usize {
        self.entries.push(Entry {
            name: name.to_string(),
            span,
            children: Vec::new(),
        });
        self.entries.len() - 1
    }
}

/// Builds the nested record rooted at `root` from the flat entry list.
///
/// Children are always pushed after their parent, so walking the entries
/// backwards finishes every child before its parent needs it.
fn assemble(entries: Vec<Entry>, root: usize) -> FamilyRecord {
    let mut built: Vec<Option<FamilyRecord>> = Vec::with_capacity(entries.len());
    built.resize_with(entries.len(), || None);

    for (index, entry) in entries.into_iter().enumerate().rev() {
        let mut record = FamilyRecord::new(entry.name);
        record.children = entry
            .children
            .iter()
            .filter_map(|&child| built[child].take())
            .collect();
        built[index] = Some(record);
    }

    built[root].take().unwrap_or_default()
}
