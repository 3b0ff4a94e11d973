//! Treeviz formatter for content model documents
//!
//! Treeviz is a visual representation of the model tree. Each node is one line, nested
//! under its parent with box-drawing connectors:
//!
//! <prefix><connector> <icon> <label> (labels truncated to 30 characters)
//!
//! Example:
//!
//! ```text
//! ⧉ Document (3 blocks)
//! ├─ § h1 Title
//! ├─ • UL
//! │ └─ ¶ first item
//! └─ ❝ blockquote (2 blocks)
//!   ├─ ¶  quoted
//!   └─ ¶ continued
//! ```
//!
//! With `show-formats=true`, paragraph segments are listed with their styles and block
//! formats are appended to the labels.

use super::icons::get_icon;
use crate::error::FormatError;
use crate::format::{bool_option, Format};
use crate::model::{
    Block, BlockGroup, ContentModelDocument, ListType, Paragraph, Segment, SegmentFormat, Table,
};
use std::collections::HashMap;

const LABEL_WIDTH: usize = 30;

fn truncate(text: &str) -> String {
    let flat = text.replace('\n', "↵");
    if flat.chars().count() <= LABEL_WIDTH {
        flat
    } else {
        let head: String = flat.chars().take(LABEL_WIDTH - 1).collect();
        format!("{head}…")
    }
}

fn style_names(format: &SegmentFormat) -> Vec<&'static str> {
    let mut names = Vec::new();
    if format.bold {
        names.push("bold");
    }
    if format.italic {
        names.push("italic");
    }
    if format.strikethrough {
        names.push("strikethrough");
    }
    if format.underline {
        names.push("underline");
    }
    names
}

fn with_format<T: serde::Serialize>(label: String, format: &T, show_formats: bool) -> String {
    if !show_formats {
        return label;
    }
    match serde_json::to_string(format) {
        Ok(json) if json != "{}" => format!("{label} {json}"),
        _ => label,
    }
}

fn paragraph_label(paragraph: &Paragraph) -> (&'static str, String) {
    if paragraph.is_empty_line() {
        return (get_icon("Br"), "(empty line)".to_string());
    }
    match &paragraph.decorator {
        Some(decorator) => (
            get_icon("Heading"),
            format!(
                "{} {}",
                decorator.tag_name.tag_name(),
                truncate(&paragraph.plain_text())
            ),
        ),
        None => (get_icon("Paragraph"), truncate(&paragraph.plain_text())),
    }
}

fn list_label(levels: &[crate::model::ListLevel], dummy: bool) -> String {
    let path: Vec<&str> = levels
        .iter()
        .map(|level| match level.list_type {
            ListType::Ordered => "OL",
            ListType::Unordered => "UL",
        })
        .collect();
    let mut label = path.join(" › ");
    if dummy {
        label.push_str(" (continuation)");
    }
    label
}

fn table_label(table: &Table) -> String {
    let columns = table.rows.first().map(|row| row.cells.len()).unwrap_or(0);
    format!("{} rows × {} columns", table.rows.len(), columns)
}

/// Format a single block node and everything under it
fn format_block(
    block: &Block,
    prefix: &str,
    child_index: usize,
    child_count: usize,
    show_formats: bool,
) -> String {
    let is_last = child_index == child_count - 1;
    let connector = if is_last { "└─" } else { "├─" };
    let child_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });

    let (icon, label) = match block {
        Block::Paragraph(p) => {
            let (icon, label) = paragraph_label(p);
            (icon, with_format(label, &p.format, show_formats))
        }
        Block::Divider(d) => (
            get_icon(block.node_type()),
            with_format(d.tag_name.clone(), &d.format, show_formats),
        ),
        Block::Table(t) => (
            get_icon(block.node_type()),
            with_format(table_label(t), &t.format, show_formats),
        ),
        Block::BlockGroup(BlockGroup::ListItem(item)) => (
            get_icon(block.node_type()),
            with_format(list_label(&item.levels, item.is_dummy()), &item.format, show_formats),
        ),
        Block::BlockGroup(BlockGroup::FormatContainer(c)) => (
            get_icon(block.node_type()),
            with_format(
                format!("{} ({} blocks)", c.tag_name, c.blocks.len()),
                &c.format,
                show_formats,
            ),
        ),
    };

    let mut output = format!("{prefix}{connector} {icon} {label}\n");

    match block {
        Block::Paragraph(p) if show_formats && !p.is_empty_line() => {
            output.push_str(&format_segments(&p.segments, &child_prefix));
        }
        Block::Table(t) => {
            for (row_index, row) in t.rows.iter().enumerate() {
                let row_last = row_index == t.rows.len() - 1;
                output.push_str(&format!(
                    "{}{} {} row {}\n",
                    child_prefix,
                    if row_last { "└─" } else { "├─" },
                    get_icon("TableRow"),
                    row_index + 1
                ));
                let row_prefix = format!("{}{}", child_prefix, if row_last { "  " } else { "│ " });
                for (cell_index, cell) in row.cells.iter().enumerate() {
                    let cell_last = cell_index == row.cells.len() - 1;
                    let kind = if cell.is_header { "header" } else { "cell" };
                    output.push_str(&format!(
                        "{}{} {} {}\n",
                        row_prefix,
                        if cell_last { "└─" } else { "├─" },
                        get_icon("TableCell"),
                        with_format(kind.to_string(), &cell.format, show_formats)
                    ));
                    let cell_prefix =
                        format!("{}{}", row_prefix, if cell_last { "  " } else { "│ " });
                    output.push_str(&format_children(&cell.blocks, &cell_prefix, show_formats));
                }
            }
        }
        Block::BlockGroup(BlockGroup::ListItem(item)) => {
            output.push_str(&format_children(&item.blocks, &child_prefix, show_formats));
        }
        Block::BlockGroup(BlockGroup::FormatContainer(c)) => {
            output.push_str(&format_children(&c.blocks, &child_prefix, show_formats));
        }
        _ => {}
    }
    output
}

fn format_segments(segments: &[Segment], prefix: &str) -> String {
    let mut output = String::new();
    for (i, segment) in segments.iter().enumerate() {
        let connector = if i == segments.len() - 1 { "└─" } else { "├─" };
        let (icon, label) = match segment {
            Segment::Text(text) => {
                let mut label = format!("{:?}", text.text);
                let styles = style_names(&text.format);
                if !styles.is_empty() {
                    label.push_str(&format!(" [{}]", styles.join(", ")));
                }
                match &text.link {
                    Some(link) => (get_icon("Link"), format!("{label} → {}", link.href)),
                    None => (get_icon("Text"), label),
                }
            }
            Segment::Image(image) => (get_icon("Image"), format!("{:?} ({})", image.alt, image.src)),
            Segment::Br => (get_icon("Br"), "br".to_string()),
        };
        output.push_str(&format!("{prefix}{connector} {icon} {label}\n"));
    }
    output
}

fn format_children(children: &[Block], prefix: &str, show_formats: bool) -> String {
    let mut output = String::new();
    let child_count = children.len();
    for (i, child) in children.iter().enumerate() {
        output.push_str(&format_block(child, prefix, i, child_count, show_formats));
    }
    output
}

pub fn to_treeviz_str(doc: &ContentModelDocument) -> String {
    render(doc, false)
}

/// Convert a document to treeviz string with optional parameters
///
/// # Parameters
///
/// - `"show-formats"`: When `"true"`, lists paragraph segments with their styles and
///   appends non-default block formats to the labels.
pub fn to_treeviz_str_with_params(
    doc: &ContentModelDocument,
    params: &HashMap<String, String>,
) -> Result<String, FormatError> {
    for key in params.keys() {
        if key != "show-formats" {
            return Err(FormatError::invalid_option(key.as_str(), params[key].as_str()));
        }
    }
    let show_formats = bool_option(params, "show-formats")?.unwrap_or(false);
    Ok(render(doc, show_formats))
}

fn render(doc: &ContentModelDocument, show_formats: bool) -> String {
    let icon = get_icon("Document");
    let output = format!("{} Document ({} blocks)\n", icon, doc.blocks.len());
    output + &format_children(&doc.blocks, "", show_formats)
}

/// Format implementation for treeviz format
pub struct TreevizFormat;

impl Format for TreevizFormat {
    fn name(&self) -> &str {
        "treeviz"
    }

    fn description(&self) -> &str {
        "Visual tree representation with indentation and Unicode icons"
    }

    fn file_extensions(&self) -> &[&str] {
        &["tree", "treeviz"]
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, doc: &ContentModelDocument) -> Result<String, FormatError> {
        Ok(to_treeviz_str(doc))
    }

    fn serialize_with_options(
        &self,
        doc: &ContentModelDocument,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        to_treeviz_str_with_params(doc, options)
    }
}
