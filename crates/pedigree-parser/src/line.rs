//! Classification of single outline lines.
//!
//! Each line of an outline is independent of its neighbours at this level;
//! the tree structure is recovered later from the indentation of entries.

use winnow::{
    Parser as _,
    combinator::{alt, eof, preceded},
    error::{ContextError, ErrMode},
    token::take_while,
};

type Input<'src> = &'src str;
type IResult<O> = std::result::Result<O, ErrMode<ContextError>>;

/// Prefix of the generation-name line.
const GENERATIONS_PREFIX: &str = "## 字辈";

/// What a single (right-trimmed) line of an outline is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Line<'src> {
    /// `# <title>`
    Title(&'src str),
    /// `## 字辈: a,b,c` with the raw list text after the colon
    Generations(&'src str),
    /// Three or more dashes; the outline ends here
    Break,
    /// `<indent>- <name>`, `name` untrimmed
    Entry {
        indent: &'src str,
        name: &'src str,
    },
    /// Indented text that is not an entry
    Unmarked { indent: &'src str, text: &'src str },
    /// Any other unindented line
    Other,
}

impl<'src> Line<'src> {
    /// Classifies one line. Trailing whitespace must already be removed.
    pub(crate) fn classify(line: &'src str) -> Self {
        let mut input = line;
        // `rest` always succeeds, so the last alternative makes this infallible
        outline_line.parse_next(&mut input).unwrap_or(Line::Other)
    }
}

/// Everything up to the end of the line.
fn rest<'src>(input: &mut Input<'src>) -> IResult<&'src str> {
    take_while(0.., |_: char| true).parse_next(input)
}

/// Leading spaces and tabs.
fn indentation<'src>(input: &mut Input<'src>) -> IResult<&'src str> {
    take_while(0.., (' ', '\t')).parse_next(input)
}

fn thematic_break(input: &mut Input<'_>) -> IResult<()> {
    (take_while(3.., '-'), eof).void().parse_next(input)
}

fn title<'src>(input: &mut Input<'src>) -> IResult<&'src str> {
    preceded("# ", rest).parse_next(input)
}

fn generations<'src>(input: &mut Input<'src>) -> IResult<&'src str> {
    preceded((GENERATIONS_PREFIX, alt((':', '：'))), rest).parse_next(input)
}

fn entry<'src>(input: &mut Input<'src>) -> IResult<Line<'src>> {
    (indentation, preceded('-', rest))
        .map(|(indent, name)| Line::Entry { indent, name })
        .parse_next(input)
}

fn unmarked<'src>(input: &mut Input<'src>) -> IResult<Line<'src>> {
    (indentation.verify(|indent: &str| !indent.is_empty()), rest)
        .map(|(indent, text)| Line::Unmarked { indent, text })
        .parse_next(input)
}

fn outline_line<'src>(input: &mut Input<'src>) -> IResult<Line<'src>> {
    alt((
        thematic_break.value(Line::Break),
        title.map(Line::Title),
        generations.map(Line::Generations),
        entry,
        unmarked,
        rest.value(Line::Other),
    ))
    .parse_next(input)
}

/// Splits a generation list on ASCII and full-width commas, dropping empty names.
pub(crate) fn split_generations(list: &str) -> Vec<String> {
    list.split([',', '，'])
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_title() {
        assert_eq!(Line::classify("# 何氏家谱"), Line::Title("何氏家谱"));
        assert_eq!(Line::classify("#no-space"), Line::Other);
    }

    #[test]
    fn test_classify_generations_both_colons() {
        assert_eq!(
            Line::classify("## 字辈: 文,明"),
            Line::Generations(" 文,明")
        );
        assert_eq!(
            Line::classify("## 字辈：文，明"),
            Line::Generations("文，明")
        );
        assert_eq!(Line::classify("## 字辈"), Line::Other);
        assert_eq!(Line::classify("## 说明"), Line::Other);
    }

    #[test]
    fn test_classify_break() {
        assert_eq!(Line::classify("---"), Line::Break);
        assert_eq!(Line::classify("------"), Line::Break);
        assert_ne!(Line::classify("--"), Line::Break);
        assert_ne!(Line::classify("--- x"), Line::Break);
    }

    #[test]
    fn test_classify_entries() {
        assert_eq!(
            Line::classify("- 文达"),
            Line::Entry {
                indent: "",
                name: " 文达"
            }
        );
        assert_eq!(
            Line::classify("    - 俊盛"),
            Line::Entry {
                indent: "    ",
                name: " 俊盛"
            }
        );
        assert_eq!(
            Line::classify("\t- tabbed"),
            Line::Entry {
                indent: "\t",
                name: " tabbed"
            }
        );
        assert_eq!(
            Line::classify("--"),
            Line::Entry {
                indent: "",
                name: "-"
            }
        );
    }

    #[test]
    fn test_classify_unmarked_and_other() {
        assert_eq!(
            Line::classify("  stray text"),
            Line::Unmarked {
                indent: "  ",
                text: "stray text"
            }
        );
        assert_eq!(Line::classify("plain prose"), Line::Other);
    }

    #[test]
    fn test_split_generations() {
        assert_eq!(split_generations(" 文, 明，俊 ,, "), vec!["文", "明", "俊"]);
        assert!(split_generations("  ").is_empty());
    }
}
