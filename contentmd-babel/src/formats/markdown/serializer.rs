//! Markdown serialization (content model → Markdown)
//!
//! Writes the Markdown dialect the parser reads, so that parsing the output gives back
//! the same model for anything the parser produced. Top-level paragraphs, dividers and
//! tables are followed by the block separator. List runs, blockquotes and table cells use
//! single line breaks, and list runs and quotes end with one blank line.

use super::classify::{classify_line, LineKind};
use super::constants::{
    heading_prefix, ALIGN_CENTER_DIVIDER, ALIGN_END_DIVIDER, ALIGN_START_DIVIDER,
};
use super::options::ExportOptions;
use crate::model::{
    Block, BlockGroup, ContentModelDocument, FormatContainer, ListItem, ListType, Paragraph,
    Segment, SegmentFormat, Table, TableCell, TextAlign,
};
use log::debug;

const NESTED_INDENT: &str = "    ";

/// A paragraph line that reads back with no segments at all; a blank line would read
/// back as an empty line instead.
const NO_SEGMENTS_LINE: &str = RUN_BREAK;

/// Numbering state for ordered lists.
#[derive(Debug, Default)]
struct ListCounters {
    list_item_count: usize,
    sub_list_item_count: usize,
    top_level_type: Option<ListType>,
    /// Outermost level type of the item written last in the current run.
    previous_outer: Option<ListType>,
}

impl ListCounters {
    fn reset(&mut self) {
        *self = Self::default();
    }
}

struct MarkdownWriter<'a> {
    options: &'a ExportOptions,
    counters: ListCounters,
    output: String,
}

/// Serialize a content model document to Markdown.
pub fn serialize_to_markdown(doc: &ContentModelDocument, options: &ExportOptions) -> String {
    let mut writer = MarkdownWriter {
        options,
        counters: ListCounters::default(),
        output: String::new(),
    };

    let mut blocks = doc.blocks.iter().peekable();
    while let Some(block) = blocks.next() {
        let next_is_list = blocks.peek().is_some_and(|b| b.as_list_item().is_some());
        writer.write_block(block, next_is_list);
    }

    let mut output = writer.output;
    if output.ends_with('\n') {
        output.pop();
    }
    debug!("serialized {} top-level block(s) to markdown", doc.blocks.len());
    output
}

impl MarkdownWriter<'_> {
    fn write_block(&mut self, block: &Block, next_is_list: bool) {
        match block {
            Block::BlockGroup(BlockGroup::ListItem(item)) => {
                self.write_list_item(item);
                if !next_is_list {
                    self.output.push('\n');
                }
                return;
            }
            Block::Paragraph(paragraph) if paragraph.is_empty_line() => {
                let blank = if self.output.is_empty() { "\n\n" } else { "\n" };
                self.output.push_str(blank);
            }
            Block::Paragraph(paragraph) => {
                self.output.push_str(&paragraph_to_markdown(paragraph));
                self.output.push_str(&self.options.block_separator);
            }
            Block::Divider(_) => {
                self.output.push_str("---");
                self.output.push_str(&self.options.block_separator);
            }
            Block::Table(table) => {
                if !table.rows.is_empty() {
                    self.output.push_str(&table_to_markdown(table));
                    self.output.push_str(&self.options.block_separator);
                }
            }
            Block::BlockGroup(BlockGroup::FormatContainer(container)) => {
                self.output.push_str(&quote_to_markdown(container));
                self.output.push('\n');
            }
        }
        self.counters.reset();
    }

    fn write_list_item(&mut self, item: &ListItem) {
        let depth = item.depth().max(1);
        let list_type = item
            .innermost()
            .map(|level| level.list_type)
            .unwrap_or(ListType::Unordered);

        // A nested item only inherits its outer level from a list it directly follows,
        // so a mismatching outer level needs the run to be closed first.
        let outer = item.levels.first().map(|level| level.list_type);
        if depth > 1 && self.counters.previous_outer.is_some_and(|prev| Some(prev) != outer) {
            self.output.push('\n');
            self.counters.reset();
        }
        self.counters.previous_outer = outer;

        let mut lines = item_lines(item);
        if lines.is_empty() {
            lines.push(String::new());
        }

        if item.is_dummy() {
            for line in lines {
                self.output.push_str(&line);
                self.output.push('\n');
            }
            return;
        }

        let number = if depth == 1 {
            if self.counters.top_level_type != Some(list_type) {
                self.counters.list_item_count = 0;
                self.counters.top_level_type = Some(list_type);
            }
            self.counters.list_item_count += 1;
            self.counters.sub_list_item_count = 0;
            self.counters.list_item_count
        } else {
            self.counters.sub_list_item_count += 1;
            self.counters.sub_list_item_count
        };

        let indent = NESTED_INDENT.repeat(depth - 1);
        let marker = match list_type {
            ListType::Unordered => "- ".to_string(),
            ListType::Ordered => format!("{}. ", number),
        };
        for (index, line) in lines.iter().enumerate() {
            if index == 0 {
                self.output.push_str(&indent);
                self.output.push_str(&marker);
            } else {
                self.output.push_str(&indent);
                self.output.push_str(NESTED_INDENT);
            }
            self.output.push_str(line);
            self.output.push('\n');
        }
    }
}

/// Lines of a list item's content, without marker or indentation.
fn item_lines(item: &ListItem) -> Vec<String> {
    let mut lines = Vec::new();
    for block in &item.blocks {
        lines.extend(nested_block_lines(block));
    }
    lines
}

/// Lines of a block nested inside a list item, cell or quote.
fn nested_block_lines(block: &Block) -> Vec<String> {
    match block {
        Block::Paragraph(paragraph) => paragraph_lines(paragraph),
        Block::Divider(_) => vec!["---".to_string()],
        Block::Table(table) => table_to_markdown(table).lines().map(str::to_string).collect(),
        Block::BlockGroup(BlockGroup::FormatContainer(container)) => {
            quote_to_markdown(container).lines().map(str::to_string).collect()
        }
        Block::BlockGroup(BlockGroup::ListItem(item)) => item_lines(item),
    }
}

fn paragraph_lines(paragraph: &Paragraph) -> Vec<String> {
    if paragraph.is_empty_line() {
        return vec![String::new()];
    }
    paragraph_to_markdown(paragraph)
        .split('\n')
        .map(str::to_string)
        .collect()
}

/// Heading prefix plus inline Markdown of a paragraph.
pub fn paragraph_to_markdown(paragraph: &Paragraph) -> String {
    if paragraph.segments.is_empty() && paragraph.decorator.is_none() {
        return NO_SEGMENTS_LINE.to_string();
    }
    let mut text = String::new();
    if let Some(decorator) = &paragraph.decorator {
        text.push_str(heading_prefix(decorator.tag_name));
    }
    text.push_str(&segments_to_markdown(&paragraph.segments));
    text
}

/// Emphasis flags open at the current write position.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct Emphasis {
    bold: bool,
    italic: bool,
    strikethrough: bool,
}

/// Two bold toggles: no style change, but a run boundary when read back.
const RUN_BREAK: &str = "****";

impl Emphasis {
    fn of(format: &SegmentFormat) -> Self {
        Self {
            bold: format.bold,
            italic: format.italic,
            strikethrough: format.strikethrough,
        }
    }

    /// Write the markers that toggle `self` into `next`.
    ///
    /// Bold goes before italic so a `***` cluster reads back as both.
    fn switch_to(&mut self, next: Emphasis, out: &mut String) {
        let bold_or_italic = self.bold != next.bold || self.italic != next.italic;
        if self.strikethrough != next.strikethrough && !bold_or_italic && out.ends_with('~') {
            // `~` + `~~` would read back as `~~` + `~`
            out.push_str(RUN_BREAK);
        }
        if self.bold != next.bold {
            out.push_str("**");
        }
        if self.italic != next.italic {
            out.push('*');
        }
        if self.strikethrough != next.strikethrough {
            out.push_str("~~");
        }
        *self = next;
    }

    fn close(&mut self, out: &mut String) {
        self.switch_to(Emphasis::default(), out);
    }
}

/// Inline Markdown for a run of segments.
///
/// Markers are written where the emphasis changes between runs, since the reader
/// toggles on every marker rather than pairing them. Neighbouring runs with the same
/// emphasis are kept apart by a pair of bold toggles. Links, images and line breaks
/// start a fresh emphasis state on the way back in, so everything open is closed
/// before them.
pub fn segments_to_markdown(segments: &[Segment]) -> String {
    let mut text = String::new();
    let mut open = Emphasis::default();
    let mut after_run = false;
    for segment in segments {
        match segment {
            Segment::Text(run) if run.text.is_empty() => {}
            Segment::Text(run) => match &run.link {
                Some(link) => {
                    open.close(&mut text);
                    text.push_str(&format!("[{}]({})", run.text, link.href));
                    after_run = false;
                }
                None => {
                    let next = Emphasis::of(&run.format);
                    if after_run && next == open {
                        text.push_str(RUN_BREAK);
                    }
                    open.switch_to(next, &mut text);
                    text.push_str(&run.text);
                    after_run = true;
                }
            },
            Segment::Image(image) => {
                open.close(&mut text);
                text.push_str(&format!("![{}]({})", image.alt, image.src));
                after_run = false;
            }
            Segment::Br => {
                open.close(&mut text);
                text.push('\n');
                after_run = false;
            }
        }
    }
    open.close(&mut text);
    text
}

/// Table rows with the divider after the first row; no trailing line break.
fn table_to_markdown(table: &Table) -> String {
    let mut lines = Vec::new();
    for (index, row) in table.rows.iter().enumerate() {
        let cells: Vec<String> = row.cells.iter().map(cell_text).collect();
        lines.push(format!("| {} |", cells.join(" | ")));

        if index == 0 {
            let dividers: Vec<&str> = row
                .cells
                .iter()
                .map(|cell| match cell.format.text_align {
                    Some(TextAlign::Center) => ALIGN_CENTER_DIVIDER,
                    Some(TextAlign::End) => ALIGN_END_DIVIDER,
                    _ => ALIGN_START_DIVIDER,
                })
                .collect();
            lines.push(format!("| {} |", dividers.join(" | ")));
        }
    }
    lines.join("\n")
}

/// Cell content on one line. A `|` in the text is written as is and splits the cell
/// when read back.
fn cell_text(cell: &TableCell) -> String {
    cell.blocks
        .iter()
        .flat_map(|block| match block {
            // a blank cell already reads back without segments
            Block::Paragraph(p) if p.segments.is_empty() && p.decorator.is_none() => Vec::new(),
            _ => nested_block_lines(block),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Quote lines, each ending in a line break.
///
/// Text that already starts with whitespace is written right after `>`. Later paragraphs
/// that would read back as plain paragraph lines are written bare, continuing the quote.
fn quote_to_markdown(container: &FormatContainer) -> String {
    let mut output = String::new();
    let mut first_line = true;
    for block in &container.blocks {
        for line in nested_block_lines(block) {
            let quoted = if line.starts_with(char::is_whitespace) {
                format!(">{}", line)
            } else if !first_line && classify_line(&line) == LineKind::Paragraph {
                line
            } else if line.is_empty() {
                ">".to_string()
            } else {
                format!("> {}", line)
            };
            output.push_str(&quoted);
            output.push('\n');
            first_line = false;
        }
    }
    output
}
