//! Markdown parsing (Markdown → content model)
//!
//! The source is split into lines with the configured pattern, each line is classified
//! and fed through [`MarkdownContext`], and the blocks it completes are appended to the
//! document in order. Parsing never fails: anything unrecognised is a paragraph.

use super::context::MarkdownContext;
use super::options::ImportOptions;
use crate::model::ContentModelDocument;
use log::debug;

/// Parse a Markdown string into a content model document.
pub fn parse_from_markdown(source: &str, options: &ImportOptions) -> ContentModelDocument {
    let mut document = ContentModelDocument::new();
    let mut context = MarkdownContext::new();

    for line in options.split_lines_pattern.split(source) {
        let transition = context.advance(line, options);
        document.blocks.extend(transition.emitted);
        context = transition.context;
    }
    document.blocks.extend(context.finish(options));

    debug!("parsed markdown into {} top-level block(s)", document.blocks.len());
    document
}
