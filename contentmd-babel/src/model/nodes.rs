//! Core data structures of the Content Model.
//!
//! The tree is rooted at [`ContentModelDocument`]. Blocks occupy their own lines, block
//! groups own further blocks, and paragraphs own a flat run of inline [`Segment`]s.
//!
//! Constructors return fresh, independently owned nodes with empty formats: callers rely on
//! these defaults (no decorator, `is_header == false`, no alignment).

use super::format::*;
use serde::{Deserialize, Serialize};

/// Root of a content model tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentModelDocument {
    pub blocks: Vec<Block>,
}

impl ContentModelDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_blocks(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }
}

/// A structural unit occupying its own line(s).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "blockType")]
pub enum Block {
    Paragraph(Paragraph),
    Divider(Divider),
    Table(Table),
    BlockGroup(BlockGroup),
}

impl Block {
    /// Name used by the visualization formats.
    pub fn node_type(&self) -> &'static str {
        match self {
            Block::Paragraph(_) => "Paragraph",
            Block::Divider(_) => "Divider",
            Block::Table(_) => "Table",
            Block::BlockGroup(BlockGroup::ListItem(_)) => "ListItem",
            Block::BlockGroup(BlockGroup::FormatContainer(_)) => "FormatContainer",
        }
    }

    pub fn as_paragraph(&self) -> Option<&Paragraph> {
        match self {
            Block::Paragraph(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_list_item(&self) -> Option<&ListItem> {
        match self {
            Block::BlockGroup(BlockGroup::ListItem(item)) => Some(item),
            _ => None,
        }
    }

    pub fn as_format_container(&self) -> Option<&FormatContainer> {
        match self {
            Block::BlockGroup(BlockGroup::FormatContainer(container)) => Some(container),
            _ => None,
        }
    }

    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Block::Table(table) => Some(table),
            _ => None,
        }
    }
}

impl From<Paragraph> for Block {
    fn from(paragraph: Paragraph) -> Self {
        Block::Paragraph(paragraph)
    }
}

impl From<ListItem> for Block {
    fn from(item: ListItem) -> Self {
        Block::BlockGroup(BlockGroup::ListItem(item))
    }
}

impl From<FormatContainer> for Block {
    fn from(container: FormatContainer) -> Self {
        Block::BlockGroup(BlockGroup::FormatContainer(container))
    }
}

impl From<Table> for Block {
    fn from(table: Table) -> Self {
        Block::Table(table)
    }
}

impl From<Divider> for Block {
    fn from(divider: Divider) -> Self {
        Block::Divider(divider)
    }
}

/// A block that owns further blocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "blockGroupType")]
pub enum BlockGroup {
    ListItem(ListItem),
    FormatContainer(FormatContainer),
}

/// Heading tag of a paragraph decorator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeadingTag {
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
}

impl HeadingTag {
    pub const ALL: [HeadingTag; 6] = [
        HeadingTag::H1,
        HeadingTag::H2,
        HeadingTag::H3,
        HeadingTag::H4,
        HeadingTag::H5,
        HeadingTag::H6,
    ];

    /// Heading level, 1 to 6.
    pub fn level(self) -> usize {
        match self {
            HeadingTag::H1 => 1,
            HeadingTag::H2 => 2,
            HeadingTag::H3 => 3,
            HeadingTag::H4 => 4,
            HeadingTag::H5 => 5,
            HeadingTag::H6 => 6,
        }
    }

    pub fn tag_name(self) -> &'static str {
        match self {
            HeadingTag::H1 => "h1",
            HeadingTag::H2 => "h2",
            HeadingTag::H3 => "h3",
            HeadingTag::H4 => "h4",
            HeadingTag::H5 => "h5",
            HeadingTag::H6 => "h6",
        }
    }

    /// Default font size browsers apply to this heading.
    pub fn font_size(self) -> &'static str {
        match self {
            HeadingTag::H1 => "2em",
            HeadingTag::H2 => "1.5em",
            HeadingTag::H3 => "1.17em",
            HeadingTag::H4 => "1em",
            HeadingTag::H5 => "0.83em",
            HeadingTag::H6 => "0.67em",
        }
    }
}

/// Heading metadata attached to a paragraph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Decorator {
    pub tag_name: HeadingTag,
    #[serde(default)]
    pub format: DecoratorFormat,
}

impl Decorator {
    /// Decorator for a heading with bold weight and the tag's font size.
    pub fn heading(tag: HeadingTag) -> Self {
        Self {
            tag_name: tag,
            format: DecoratorFormat {
                font_weight: Some("bold".to_string()),
                font_size: Some(tag.font_size().to_string()),
            },
        }
    }
}

/// A run of inline segments.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paragraph {
    pub segments: Vec<Segment>,
    #[serde(default)]
    pub format: BlockFormat,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decorator: Option<Decorator>,
}

impl Paragraph {
    pub fn new(format: BlockFormat) -> Self {
        Self {
            segments: Vec::new(),
            format,
            decorator: None,
        }
    }

    /// Paragraph made of one unstyled text segment.
    pub fn from_text(text: impl Into<String>) -> Self {
        let mut paragraph = Self::default();
        paragraph.segments.push(Segment::Text(Text::new(text)));
        paragraph
    }

    /// Paragraph standing for a blank line.
    pub fn empty_line(format: BlockFormat) -> Self {
        let mut paragraph = Self::new(format);
        paragraph.segments.push(Segment::Br);
        paragraph
    }

    /// True when the paragraph only holds line breaks.
    pub fn is_empty_line(&self) -> bool {
        !self.segments.is_empty() && self.segments.iter().all(|s| matches!(s, Segment::Br))
    }

    /// Concatenated text of every text segment, ignoring styles.
    pub fn plain_text(&self) -> String {
        let mut text = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Text(t) => text.push_str(&t.text),
                Segment::Image(image) => text.push_str(&image.alt),
                Segment::Br => text.push('\n'),
            }
        }
        text
    }
}

/// An inline unit within a paragraph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "segmentType")]
pub enum Segment {
    Text(Text),
    Image(Image),
    Br,
}

/// A styled text run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Text {
    pub text: String,
    #[serde(default)]
    pub format: SegmentFormat,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<Link>,
}

impl Text {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            format: SegmentFormat::default(),
            link: None,
        }
    }

    pub fn with_format(text: impl Into<String>, format: SegmentFormat) -> Self {
        Self {
            text: text.into(),
            format,
            link: None,
        }
    }
}

/// Hyperlink attached to a text segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    pub href: String,
    #[serde(default)]
    pub underline: bool,
}

/// An inline image.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub src: String,
    pub alt: String,
    #[serde(default)]
    pub format: SegmentFormat,
}

impl Image {
    pub fn new(src: impl Into<String>, alt: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            alt: alt.into(),
            format: SegmentFormat::default(),
        }
    }
}

/// A horizontal rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Divider {
    pub tag_name: String,
    #[serde(default)]
    pub format: BlockFormat,
}

impl Divider {
    pub fn hr() -> Self {
        Self {
            tag_name: "hr".to_string(),
            format: BlockFormat::default(),
        }
    }
}

/// Kind of a list level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ListType {
    #[serde(rename = "OL")]
    Ordered,
    #[serde(rename = "UL")]
    Unordered,
}

/// One nesting level of a list item, outermost first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListLevel {
    pub list_type: ListType,
    #[serde(default)]
    pub format: ListLevelFormat,
}

impl ListLevel {
    pub fn new(list_type: ListType) -> Self {
        Self {
            list_type,
            format: ListLevelFormat::default(),
        }
    }
}

/// A list item. Its level count is its nesting depth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListItem {
    pub levels: Vec<ListLevel>,
    pub blocks: Vec<Block>,
    #[serde(default)]
    pub format: BlockFormat,
}

impl ListItem {
    pub fn new(levels: Vec<ListLevel>) -> Self {
        Self {
            levels,
            blocks: Vec::new(),
            format: BlockFormat::default(),
        }
    }

    pub fn depth(&self) -> usize {
        self.levels.len()
    }

    /// The innermost level, which decides marker and numbering.
    pub fn innermost(&self) -> Option<&ListLevel> {
        self.levels.last()
    }

    /// True when the item was written without a visible marker.
    pub fn is_dummy(&self) -> bool {
        self.innermost()
            .is_some_and(|level| level.format.display_for_dummy_item.is_some())
    }
}

/// A generic block container, used for blockquotes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatContainer {
    pub tag_name: String,
    pub blocks: Vec<Block>,
    #[serde(default)]
    pub format: ContainerFormat,
}

impl FormatContainer {
    pub fn new(tag_name: impl Into<String>, format: ContainerFormat) -> Self {
        Self {
            tag_name: tag_name.into(),
            blocks: Vec::new(),
            format,
        }
    }

    pub fn is_blockquote(&self) -> bool {
        self.tag_name == "blockquote"
    }
}

/// A table. The first row is the header row when `format.has_header_row` is set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    pub rows: Vec<TableRow>,
    #[serde(default)]
    pub format: TableFormat,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRow {
    pub cells: Vec<TableCell>,
}

/// A table cell; cells are small block containers of their own.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableCell {
    pub blocks: Vec<Block>,
    #[serde(default)]
    pub is_header: bool,
    #[serde(default)]
    pub format: TableCellFormat,
}

impl TableCell {
    pub fn new(is_header: bool, format: TableCellFormat) -> Self {
        Self {
            blocks: Vec::new(),
            is_header,
            format,
        }
    }
}
