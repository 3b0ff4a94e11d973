//! Parser state threaded from one line to the next.
//!
//! [`MarkdownContext::advance`] consumes the state and one line and returns the next
//! state along with the blocks that line completed. Open blockquotes and list items live
//! in the context until a line closes them, then they are handed over as finished blocks.

use super::blocks::{
    create_blockquote_from_markdown, create_list_from_markdown, create_paragraph_from_markdown,
    create_table_from_markdown, is_table_divider,
};
use super::classify::{classify_line, LineKind};
use super::options::{EmptyLinePolicy, ImportOptions};
use crate::model::{Block, Divider, FormatContainer, ListItem, ListType, Paragraph};
use log::{debug, trace};

/// Progress through a run of blank lines, used by [`EmptyLinePolicy::Merge`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EmptyLineState {
    /// The previous line had content.
    #[default]
    NotEmpty,
    /// One blank line has ended the previous block.
    LineEnded,
    /// An empty paragraph has been emitted for this run.
    Empty,
}

/// A block group that later lines can still extend.
#[derive(Debug, Clone, PartialEq)]
pub enum OpenGroup {
    Quote(FormatContainer),
    List(ListItem),
}

impl OpenGroup {
    fn into_block(self) -> Block {
        match self {
            OpenGroup::Quote(quote) => quote.into(),
            OpenGroup::List(item) => item.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarkdownContext {
    pub open_group: Option<OpenGroup>,
    pub empty_line_state: EmptyLineState,
    pub table_lines: Vec<String>,
}

/// Result of feeding one line to the context.
#[derive(Debug)]
pub struct Transition {
    pub context: MarkdownContext,
    pub emitted: Vec<Block>,
}

impl MarkdownContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// The blockquote later lines would extend, if any.
    pub fn last_quote(&self) -> Option<&FormatContainer> {
        match &self.open_group {
            Some(OpenGroup::Quote(quote)) => Some(quote),
            _ => None,
        }
    }

    /// The list item later lines would follow, if any.
    pub fn last_list(&self) -> Option<&ListItem> {
        match &self.open_group {
            Some(OpenGroup::List(item)) => Some(item),
            _ => None,
        }
    }

    /// Kind a line takes in this state. Paragraph lines continue an open group.
    pub fn effective_kind(&self, line: &str) -> LineKind {
        let kind = classify_line(line);
        if kind != LineKind::Paragraph {
            return kind;
        }
        match &self.open_group {
            Some(OpenGroup::Quote(_)) => LineKind::Blockquote,
            Some(OpenGroup::List(item)) => {
                let list_type = item
                    .innermost()
                    .map(|level| level.list_type)
                    .unwrap_or(ListType::Unordered);
                LineKind::for_list(list_type)
            }
            None => kind,
        }
    }

    /// Feed one source line.
    pub fn advance(mut self, line: &str, options: &ImportOptions) -> Transition {
        let kind = self.effective_kind(line);
        trace!("{:?}: {:?}", kind, line);
        let mut emitted = Vec::new();

        let mut table_closed = false;
        if kind != LineKind::Table && !self.table_lines.is_empty() {
            emitted.extend(flush_table(std::mem::take(&mut self.table_lines), options));
            table_closed = true;
        }

        match kind {
            LineKind::Blank => {
                if let Some(group) = self.open_group.take() {
                    emitted.push(group.into_block());
                    table_closed = true;
                }
                if table_closed {
                    self.empty_line_state = EmptyLineState::LineEnded;
                } else {
                    self.blank_line(&mut emitted, options);
                }
                return Transition {
                    context: self,
                    emitted,
                };
            }
            LineKind::Table => {
                self.close_group(&mut emitted);
                self.table_lines.push(line.to_string());
            }
            LineKind::Heading | LineKind::Paragraph => {
                self.close_group(&mut emitted);
                emitted.push(
                    create_paragraph_from_markdown(line, &options.paragraph_format()).into(),
                );
            }
            LineKind::HorizontalRule => {
                self.close_group(&mut emitted);
                let mut divider = Divider::hr();
                divider.format = options.paragraph_format();
                emitted.push(divider.into());
            }
            LineKind::Blockquote => match self.open_group.take() {
                Some(OpenGroup::Quote(mut quote)) => {
                    create_blockquote_from_markdown(line, Some(&mut quote), options);
                    self.open_group = Some(OpenGroup::Quote(quote));
                }
                other => {
                    if let Some(group) = other {
                        emitted.push(group.into_block());
                    }
                    self.open_group = create_blockquote_from_markdown(line, None, options)
                        .map(OpenGroup::Quote);
                }
            },
            LineKind::UnorderedList | LineKind::OrderedList => {
                let list_type = kind.list_type().unwrap_or(ListType::Unordered);
                let previous = match self.open_group.take() {
                    Some(OpenGroup::List(item)) => Some(item),
                    Some(other) => {
                        emitted.push(other.into_block());
                        None
                    }
                    None => None,
                };
                let item = create_list_from_markdown(line, list_type, previous.as_ref(), options);
                if let Some(previous) = previous {
                    emitted.push(previous.into());
                }
                self.open_group = Some(OpenGroup::List(item));
            }
        }

        self.empty_line_state = EmptyLineState::NotEmpty;
        Transition {
            context: self,
            emitted,
        }
    }

    /// Close whatever is still open at the end of the input.
    pub fn finish(mut self, options: &ImportOptions) -> Vec<Block> {
        let mut emitted = flush_table(std::mem::take(&mut self.table_lines), options);
        self.close_group(&mut emitted);
        emitted
    }

    fn close_group(&mut self, emitted: &mut Vec<Block>) {
        if let Some(group) = self.open_group.take() {
            emitted.push(group.into_block());
        }
    }

    fn blank_line(&mut self, emitted: &mut Vec<Block>, options: &ImportOptions) {
        let empty = || Block::from(Paragraph::empty_line(options.paragraph_format()));
        match options.empty_line {
            EmptyLinePolicy::Remove => {}
            EmptyLinePolicy::Preserve => emitted.push(empty()),
            EmptyLinePolicy::Merge => match self.empty_line_state {
                EmptyLineState::NotEmpty => self.empty_line_state = EmptyLineState::LineEnded,
                EmptyLineState::LineEnded => {
                    emitted.push(empty());
                    self.empty_line_state = EmptyLineState::Empty;
                }
                EmptyLineState::Empty => {}
            },
        }
    }
}

/// Turn buffered table lines into a table, or into plain paragraphs when they do not
/// form one: at least a header, a divider and one body row are needed.
fn flush_table(lines: Vec<String>, options: &ImportOptions) -> Vec<Block> {
    if lines.is_empty() {
        return Vec::new();
    }
    if lines.len() >= 3 && is_table_divider(&lines[1]) {
        return vec![create_table_from_markdown(&lines, options).into()];
    }
    debug!(
        "{} pipe-delimited line(s) without a divider row, keeping them as paragraphs",
        lines.len()
    );
    lines
        .iter()
        .map(|line| Block::from(create_paragraph_from_markdown(line, &options.paragraph_format())))
        .collect()
}
