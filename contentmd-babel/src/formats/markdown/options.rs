//! Options for Markdown import and export.

use crate::error::FormatError;
use crate::model::{BlockFormat, Direction};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Pattern splitting the source into lines when none is configured.
pub const DEFAULT_SPLIT_LINES_PATTERN: &str = r"\r\n|\r|\n";

/// Separator appended after each top-level paragraph on export.
pub const DEFAULT_BLOCK_SEPARATOR: &str = "\n\n";

static DEFAULT_SPLIT_LINES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(DEFAULT_SPLIT_LINES_PATTERN).expect("default line split pattern is valid")
});

/// How blank lines in the source turn into empty paragraphs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmptyLinePolicy {
    /// Every blank line becomes an empty paragraph.
    Preserve,
    /// Blank lines are dropped.
    Remove,
    /// The first blank line ends the block, the second one becomes an empty paragraph,
    /// further ones are absorbed.
    #[default]
    Merge,
}

impl FromStr for EmptyLinePolicy {
    type Err = FormatError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "preserve" => Ok(EmptyLinePolicy::Preserve),
            "remove" => Ok(EmptyLinePolicy::Remove),
            "merge" => Ok(EmptyLinePolicy::Merge),
            _ => Err(FormatError::invalid_option("empty-line", value)),
        }
    }
}

impl FromStr for Direction {
    type Err = FormatError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "ltr" => Ok(Direction::Ltr),
            "rtl" => Ok(Direction::Rtl),
            _ => Err(FormatError::invalid_option("direction", value)),
        }
    }
}

/// Markdown → model options.
#[derive(Debug, Clone)]
pub struct ImportOptions {
    pub split_lines_pattern: Regex,
    pub empty_line: EmptyLinePolicy,
    pub direction: Direction,
}

impl ImportOptions {
    /// Replace the line split pattern. Fails when the pattern is not a valid regex.
    pub fn with_split_lines_pattern(mut self, pattern: &str) -> Result<Self, FormatError> {
        self.split_lines_pattern = Regex::new(pattern)
            .map_err(|_| FormatError::invalid_option("split-lines-pattern", pattern))?;
        Ok(self)
    }

    pub fn with_empty_line(mut self, policy: EmptyLinePolicy) -> Self {
        self.empty_line = policy;
        self
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Direction to stamp on created blocks; left-to-right stays implicit.
    pub fn block_direction(&self) -> Option<Direction> {
        match self.direction {
            Direction::Rtl => Some(Direction::Rtl),
            Direction::Ltr => None,
        }
    }

    /// Format given to every paragraph this import creates.
    pub fn paragraph_format(&self) -> BlockFormat {
        BlockFormat {
            direction: self.block_direction(),
            ..Default::default()
        }
    }
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            split_lines_pattern: DEFAULT_SPLIT_LINES.clone(),
            empty_line: EmptyLinePolicy::default(),
            direction: Direction::default(),
        }
    }
}

/// Model → Markdown options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    /// Appended after every top-level paragraph, divider and table.
    pub block_separator: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            block_separator: DEFAULT_BLOCK_SEPARATOR.to_string(),
        }
    }
}

/// Both directions of the Markdown format.
#[derive(Debug, Clone, Default)]
pub struct MarkdownOptions {
    pub import: ImportOptions,
    pub export: ExportOptions,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_split_pattern_handles_all_line_endings() {
        let options = ImportOptions::default();
        let lines: Vec<&str> = options.split_lines_pattern.split("a\r\nb\rc\nd").collect();
        assert_eq!(lines, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn invalid_split_pattern_is_rejected() {
        let result = ImportOptions::default().with_split_lines_pattern("(");
        assert!(matches!(result, Err(FormatError::InvalidOption { .. })));
    }

    #[test]
    fn policies_and_directions_parse_case_insensitively() {
        assert_eq!("Merge".parse::<EmptyLinePolicy>().unwrap(), EmptyLinePolicy::Merge);
        assert_eq!("remove".parse::<EmptyLinePolicy>().unwrap(), EmptyLinePolicy::Remove);
        assert!("collapse".parse::<EmptyLinePolicy>().is_err());
        assert_eq!("RTL".parse::<Direction>().unwrap(), Direction::Rtl);
        assert!("up".parse::<Direction>().is_err());
    }

    #[test]
    fn ltr_is_not_stamped_on_blocks() {
        assert_eq!(ImportOptions::default().paragraph_format(), BlockFormat::default());
        let rtl = ImportOptions::default().with_direction(Direction::Rtl);
        assert_eq!(rtl.paragraph_format().direction, Some(Direction::Rtl));
    }
}
