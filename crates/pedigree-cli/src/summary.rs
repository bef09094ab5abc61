//! Text summary of a family tree for the `info` command.

use std::fmt;

use pedigree::{Document, record::FamilyRecord};

/// Generations shown in the structure preview.
const PREVIEW_DEPTH: usize = 4;

/// Generation names listed before eliding the rest.
const LISTED_GENERATIONS: usize = 5;

/// Title, counts, generation names and an indented preview of the first
/// generations.
pub struct Summary<'a> {
    document: &'a Document,
    fallback_title: &'a str,
}

impl<'a> Summary<'a> {
    /// `fallback_title` is shown when the document has no title of its own.
    pub fn new(document: &'a Document, fallback_title: &'a str) -> Self {
        Self {
            document,
            fallback_title,
        }
    }
}

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let root = &self.document.root;
        let title = self.document.title.as_deref().unwrap_or(self.fallback_title);

        writeln!(f, "Title: {title}")?;
        writeln!(f, "Members: {}", root.count_members())?;
        writeln!(f, "Generations: {}", root.generation_count())?;

        if root.generations.is_empty() {
            writeln!(f, "Generation names: none")?;
        } else {
            let listed: Vec<&str> = root
                .generations
                .iter()
                .take(LISTED_GENERATIONS)
                .map(String::as_str)
                .collect();
            let more = if root.generations.len() > LISTED_GENERATIONS {
                " ..."
            } else {
                ""
            };
            writeln!(
                f,
                "Generation names ({}): {}{more}",
                root.generations.len(),
                listed.join(" → ")
            )?;
        }

        writeln!(f)?;
        writeln!(f, "Structure:")?;
        write_preview(f, root)
    }
}

fn write_preview(f: &mut fmt::Formatter<'_>, root: &FamilyRecord) -> fmt::Result {
    let mut stack = vec![(root, 0)];
    while let Some((record, depth)) = stack.pop() {
        let indent = "  ".repeat(depth);
        writeln!(f, "{indent}- {}", record.name)?;

        if record.is_leaf() {
            continue;
        }
        if depth + 1 < PREVIEW_DEPTH {
            stack.extend(record.children.iter().rev().map(|child| (child, depth + 1)));
        } else {
            writeln!(f, "{indent}  ... ({} more descendants)", record.count_members() - 1)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain(names: &[&str]) -> FamilyRecord {
        names
            .iter()
            .rev()
            .fold(None, |child: Option<FamilyRecord>, name| {
                let record = FamilyRecord::new(*name);
                Some(match child {
                    Some(child) => record.with_child(child),
                    None => record,
                })
            })
            .unwrap()
    }

    #[test]
    fn test_summary_counts() {
        let root = FamilyRecord::new("文达")
            .with_child(FamilyRecord::new("明圣"))
            .with_child(FamilyRecord::new("明德"))
            .with_generations(["文", "明"]);
        let document = Document::new(Some("何氏家谱".to_string()), root);

        let text = Summary::new(&document, "fallback").to_string();
        assert!(text.contains("Title: 何氏家谱"));
        assert!(text.contains("Members: 3"));
        assert!(text.contains("Generations: 2"));
        assert!(text.contains("Generation names (2): 文 → 明\n"));
        assert!(text.ends_with("- 文达\n  - 明圣\n  - 明德\n"));
    }

    #[test]
    fn test_summary_elides_long_lists() {
        let root = chain(&["a", "b", "c", "d", "e", "f"])
            .with_generations(["1", "2", "3", "4", "5", "6"]);
        let document = Document::new(None, root);

        let text = Summary::new(&document, "family").to_string();
        assert!(text.contains("Title: family"));
        assert!(text.contains("1 → 2 → 3 → 4 → 5 ..."));
        // Four generations, then the remainder is counted
        assert!(text.contains("      - d\n        ... (2 more descendants)\n"));
        assert!(!text.contains("- e"));
    }

    #[test]
    fn test_summary_without_generation_names() {
        let document = Document::new(None, FamilyRecord::new("文达"));
        let text = Summary::new(&document, "x").to_string();
        assert!(text.contains("Generation names: none"));
    }
}
