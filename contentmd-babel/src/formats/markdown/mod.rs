//! Markdown format implementation
//!
//! Bidirectional conversion between a line-oriented Markdown dialect and the content
//! model. The dialect is deliberately small: every construct fits on one line, and block
//! groups (lists, quotes, tables) are runs of consecutive lines.
//!
//! # Element Mapping Table
//!
//! | Markdown                 | Content model                                  | Notes                                    |
//! |--------------------------|------------------------------------------------|------------------------------------------|
//! | `# ` … `###### `         | Paragraph with heading decorator               | Prefix removed from the text             |
//! | `---`                    | Divider (`hr`)                                 | Exactly three dashes                     |
//! | `\| a \| b \|` rows      | Table                                          | Needs header, divider and a body row     |
//! | `> text`                 | Blockquote format container                    | Space after `>` kept in the text         |
//! | `- `, `* `, `+ `         | List item, unordered level                     | Leading whitespace nests one level       |
//! | `1. `                    | List item, ordered level                       | Numbers are not kept                     |
//! | Blank line               | Closes open groups; empty paragraph per policy | See [`EmptyLinePolicy`]                  |
//! | Anything else            | Paragraph                                      | Continues an open list or quote          |
//! | `**b**`, `*i*`, `~~s~~`  | Text segment format                            | Markers toggle, they never pair up       |
//! | `[t](https://…)`         | Text segment with link                         | Only absolute http(s) URLs               |
//! | `![a](https://…)`        | Image segment                                  | Only absolute http(s) URLs               |
//!
//! # Lossy Conversions
//!
//! - List numbering is regenerated on export
//! - `*` and `+` bullets are exported as `-`
//! - Links or images with other URLs stay literal text
//! - A `|` inside table cell text is written as is and splits the cell when read back
//! - A trailing empty paragraph at the very end of a document is not kept by
//!   Markdown → model → Markdown when export trims the last line break
//!
//! # Options
//!
//! Import: `empty-line` (preserve, remove, merge), `direction` (ltr, rtl) and
//! `split-lines-pattern` (a regex). Export: `block-separator`, where `\n` escapes are
//! expanded.

pub mod blocks;
pub mod classify;
pub mod constants;
pub mod context;
pub mod inline;
pub mod options;
pub mod parser;
pub mod serializer;

pub use options::{EmptyLinePolicy, ExportOptions, ImportOptions, MarkdownOptions};

use crate::error::FormatError;
use crate::format::Format;
use crate::model::ContentModelDocument;
use std::collections::HashMap;

/// Format implementation for Markdown
#[derive(Debug, Clone, Default)]
pub struct MarkdownFormat {
    options: MarkdownOptions,
}

impl MarkdownFormat {
    pub fn new(options: MarkdownOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &MarkdownOptions {
        &self.options
    }

    /// Import options with per-call overrides applied.
    pub fn import_options(
        &self,
        overrides: &HashMap<String, String>,
    ) -> Result<ImportOptions, FormatError> {
        let mut options = self.options.import.clone();
        for (key, value) in overrides {
            match key.as_str() {
                "empty-line" => options.empty_line = value.parse()?,
                "direction" => options.direction = value.parse()?,
                "split-lines-pattern" => {
                    options = options.with_split_lines_pattern(&unescape(value))?
                }
                _ => return Err(FormatError::invalid_option(key.as_str(), value.as_str())),
            }
        }
        Ok(options)
    }

    /// Export options with per-call overrides applied.
    pub fn export_options(
        &self,
        overrides: &HashMap<String, String>,
    ) -> Result<ExportOptions, FormatError> {
        let mut options = self.options.export.clone();
        for (key, value) in overrides {
            match key.as_str() {
                "block-separator" => options.block_separator = unescape(value),
                _ => return Err(FormatError::invalid_option(key.as_str(), value.as_str())),
            }
        }
        Ok(options)
    }
}

/// Expand `\n`, `\r` and `\t` escapes typed on a command line.
fn unescape(value: &str) -> String {
    value
        .replace("\\n", "\n")
        .replace("\\r", "\r")
        .replace("\\t", "\t")
}

impl Format for MarkdownFormat {
    fn name(&self) -> &str {
        "markdown"
    }

    fn description(&self) -> &str {
        "Line-oriented Markdown"
    }

    fn file_extensions(&self) -> &[&str] {
        &["md", "markdown"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<ContentModelDocument, FormatError> {
        Ok(parser::parse_from_markdown(source, &self.options.import))
    }

    fn serialize(&self, doc: &ContentModelDocument) -> Result<String, FormatError> {
        Ok(serializer::serialize_to_markdown(doc, &self.options.export))
    }

    fn parse_with_options(
        &self,
        source: &str,
        options: &HashMap<String, String>,
    ) -> Result<ContentModelDocument, FormatError> {
        let options = self.import_options(options)?;
        Ok(parser::parse_from_markdown(source, &options))
    }

    fn serialize_with_options(
        &self,
        doc: &ContentModelDocument,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        let options = self.export_options(options)?;
        Ok(serializer::serialize_to_markdown(doc, &options))
    }
}
