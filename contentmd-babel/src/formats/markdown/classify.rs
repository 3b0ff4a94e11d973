//! Line classification.
//!
//! Each source line is matched against an ordered list of patterns; the first match wins
//! and anything unmatched is a paragraph.

use crate::model::ListType;
use once_cell::sync::Lazy;
use regex::Regex;

/// Kind of a single source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Heading,
    HorizontalRule,
    Table,
    Blockquote,
    UnorderedList,
    OrderedList,
    Blank,
    Paragraph,
}

impl LineKind {
    /// List line kind for a list type, used when a continuation line joins a list.
    pub fn for_list(list_type: ListType) -> Self {
        match list_type {
            ListType::Ordered => LineKind::OrderedList,
            ListType::Unordered => LineKind::UnorderedList,
        }
    }

    pub fn list_type(self) -> Option<ListType> {
        match self {
            LineKind::OrderedList => Some(ListType::Ordered),
            LineKind::UnorderedList => Some(ListType::Unordered),
            _ => None,
        }
    }
}

fn line_pattern(pattern: &str) -> Regex {
    Regex::new(pattern).expect("line pattern is valid")
}

static LINE_PATTERNS: Lazy<Vec<(Regex, LineKind)>> = Lazy::new(|| {
    vec![
        (line_pattern(r"^#{1,6} "), LineKind::Heading),
        (line_pattern(r"^---$"), LineKind::HorizontalRule),
        (line_pattern(r"^\|.*\|\s*$"), LineKind::Table),
        (line_pattern(r"^>\s"), LineKind::Blockquote),
        (line_pattern(r"^\s*[*\-+] "), LineKind::UnorderedList),
        (line_pattern(r"^\s*\d+\. "), LineKind::OrderedList),
        (line_pattern(r"^\s*$"), LineKind::Blank),
        (line_pattern(r"^[^#\-*\d|]"), LineKind::Paragraph),
    ]
});

/// Classify one line. Total: lines matching no pattern are paragraphs.
pub fn classify_line(line: &str) -> LineKind {
    LINE_PATTERNS
        .iter()
        .find(|(pattern, _)| pattern.is_match(line))
        .map(|(_, kind)| *kind)
        .unwrap_or(LineKind::Paragraph)
}
