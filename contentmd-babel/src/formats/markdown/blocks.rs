//! Builders turning classified lines into model blocks.

use super::constants::{blockquote_format, BLOCKQUOTE_TAG};
use super::inline::{
    apply_heading_format, apply_image, apply_link, apply_text_formatting, detect_heading,
    split_paragraph_segments, SpanKind,
};
use super::options::ImportOptions;
use crate::model::{
    Block, BlockFormat, Decorator, DisplayForDummyItem, FormatContainer, ListItem, ListLevel,
    ListLevelFormat, ListType, Paragraph, Segment, Table, TableCell, TableCellFormat, TableRow,
    Text, TextAlign,
};
use once_cell::sync::Lazy;
use regex::Regex;

/// Build a paragraph from one line of inline Markdown.
///
/// Headings get a decorator and lose their `#` prefix. Links, images and emphasis
/// become segments.
pub fn create_paragraph_from_markdown(text: &str, format: &BlockFormat) -> Paragraph {
    let mut paragraph = Paragraph::new(format.clone());
    paragraph.decorator = detect_heading(text).map(Decorator::heading);

    for span in split_paragraph_segments(text) {
        match span.kind {
            SpanKind::Text => paragraph.segments.extend(
                apply_text_formatting(Text::new(span.text))
                    .into_iter()
                    .map(Segment::Text),
            ),
            SpanKind::Link => paragraph.segments.push(Segment::Text(apply_link(&span))),
            SpanKind::Image => paragraph.segments.push(Segment::Image(apply_image(&span))),
        }
    }

    apply_heading_format(&mut paragraph);
    paragraph
}

/// What the first token of a list line turned out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListMarker {
    Bullet,
    Ordered,
    NotAMarker,
}

/// Classify the first whitespace-delimited token of a list line.
pub fn classify_marker(token: &str) -> ListMarker {
    match token {
        "*" | "-" | "+" => ListMarker::Bullet,
        _ => match token.strip_suffix('.') {
            Some(digits) if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) => {
                ListMarker::Ordered
            }
            _ => ListMarker::NotAMarker,
        },
    }
}

/// Build a list item from a list line or a continuation line.
///
/// `previous` is the item still open before this line. A line whose first token is not
/// a marker becomes a dummy item that mirrors the open item's levels and keeps the whole
/// line as its text. Leading whitespace before a real marker nests the item one level
/// under the open list.
pub fn create_list_from_markdown(
    text: &str,
    list_type: ListType,
    previous: Option<&ListItem>,
    options: &ImportOptions,
) -> ListItem {
    let direction = options.block_direction();
    let level = |list_type| ListLevel {
        list_type,
        format: ListLevelFormat {
            direction,
            ..Default::default()
        },
    };

    let trimmed = text.trim_start();
    let token = trimmed.split(' ').next().unwrap_or_default();

    let (levels, body) = match classify_marker(token) {
        ListMarker::NotAMarker => {
            let mut levels: Vec<ListLevel> = previous
                .map(|item| item.levels.iter().map(|l| level(l.list_type)).collect())
                .unwrap_or_default();
            if levels.is_empty() {
                levels.push(level(list_type));
            }
            if let Some(innermost) = levels.last_mut() {
                innermost.format.display_for_dummy_item = Some(DisplayForDummyItem::Block);
            }
            (levels, text)
        }
        ListMarker::Bullet | ListMarker::Ordered => {
            let body = trimmed[token.len()..].trim_start_matches(' ');
            let nested = text.starts_with(char::is_whitespace);
            let levels = if nested {
                let outer = previous
                    .and_then(|item| item.levels.first())
                    .map(|l| l.list_type)
                    .unwrap_or(list_type);
                vec![level(outer), level(list_type)]
            } else {
                vec![level(list_type)]
            };
            (levels, body)
        }
    };

    let mut item = ListItem::new(levels);
    item.format = options.paragraph_format();
    item.blocks.push(Block::Paragraph(create_paragraph_from_markdown(
        body,
        &options.paragraph_format(),
    )));
    item
}

/// Add a `>` line to a blockquote.
///
/// With an open quote the line is appended to it and `None` is returned. Otherwise a new
/// styled container is returned for the caller to keep open. Only the leading `>` is
/// removed; the whitespace after it stays in the text.
pub fn create_blockquote_from_markdown(
    text: &str,
    open: Option<&mut FormatContainer>,
    options: &ImportOptions,
) -> Option<FormatContainer> {
    let body = text.strip_prefix('>').unwrap_or(text);
    let paragraph =
        Block::Paragraph(create_paragraph_from_markdown(body, &options.paragraph_format()));
    match open {
        Some(quote) => {
            quote.blocks.push(paragraph);
            None
        }
        None => {
            let mut quote =
                FormatContainer::new(BLOCKQUOTE_TAG, blockquote_format(options.block_direction()));
            quote.blocks.push(paragraph);
            Some(quote)
        }
    }
}

static DIVIDER_CELL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^:?-+:?$").expect("divider cell pattern is valid"));

/// Split a table row into raw cell texts, without the outer pipes.
pub fn split_table_row(line: &str) -> Vec<&str> {
    let mut cells: Vec<&str> = line.trim().split('|').collect();
    if cells.first().is_some_and(|c| c.is_empty()) {
        cells.remove(0);
    }
    if cells.last().is_some_and(|c| c.is_empty()) {
        cells.pop();
    }
    cells
}

/// True for a `| --- | :-: |` style row.
pub fn is_table_divider(line: &str) -> bool {
    let cells = split_table_row(line);
    !cells.is_empty() && cells.iter().all(|cell| DIVIDER_CELL.is_match(cell.trim()))
}

/// Column alignment from a divider cell.
pub fn parse_alignment(cell: &str) -> TextAlign {
    let cell = cell.trim();
    if cell.starts_with(':') && cell.ends_with(':') && cell.len() > 1 {
        TextAlign::Center
    } else if cell.ends_with(':') {
        TextAlign::End
    } else {
        TextAlign::Start
    }
}

/// Build a table from buffered row lines; the second line is the divider row.
pub fn create_table_from_markdown(lines: &[String], options: &ImportOptions) -> Table {
    let alignments: Vec<TextAlign> = lines
        .get(1)
        .map(|divider| split_table_row(divider).into_iter().map(parse_alignment).collect())
        .unwrap_or_default();
    let direction = options.block_direction();

    let mut table = Table::default();
    for (index, line) in lines.iter().enumerate() {
        if index == 1 {
            continue;
        }
        let mut row = TableRow::default();
        for (column, raw) in split_table_row(line).into_iter().enumerate() {
            let align = alignments.get(column).copied().unwrap_or(TextAlign::Start);
            let mut cell = TableCell::new(
                false,
                TableCellFormat {
                    text_align: Some(align),
                    direction,
                    ..Default::default()
                },
            );
            cell.blocks.push(Block::Paragraph(create_paragraph_from_markdown(
                raw.trim(),
                &options.paragraph_format(),
            )));
            row.cells.push(cell);
        }
        table.rows.push(row);
    }

    apply_table_format(&mut table);
    table.format.direction = direction;
    table
}

/// Mark the first row as the header and apply the table-wide format.
pub fn apply_table_format(table: &mut Table) {
    if let Some(header) = table.rows.first_mut() {
        for cell in &mut header.cells {
            cell.is_header = true;
            cell.format.font_weight = Some("bold".to_string());
        }
    }
    table.format.border_collapse = true;
    table.format.use_border_box = true;
    table.format.has_header_row = true;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Direction, HeadingTag};

    fn options() -> ImportOptions {
        ImportOptions::default()
    }

    #[test]
    fn heading_paragraph_has_decorator_and_clean_text() {
        let paragraph = create_paragraph_from_markdown("### Third", &BlockFormat::default());
        assert_eq!(paragraph.decorator, Some(Decorator::heading(HeadingTag::H3)));
        assert_eq!(paragraph.plain_text(), "Third");
    }

    #[test]
    fn paragraph_without_heading_has_no_decorator() {
        let paragraph = create_paragraph_from_markdown("#hashtag", &BlockFormat::default());
        assert!(paragraph.decorator.is_none());
        assert_eq!(paragraph.plain_text(), "#hashtag");
    }

    #[test]
    fn markers() {
        assert_eq!(classify_marker("-"), ListMarker::Bullet);
        assert_eq!(classify_marker("*"), ListMarker::Bullet);
        assert_eq!(classify_marker("+"), ListMarker::Bullet);
        assert_eq!(classify_marker("10."), ListMarker::Ordered);
        assert_eq!(classify_marker("."), ListMarker::NotAMarker);
        assert_eq!(classify_marker("etc."), ListMarker::NotAMarker);
        assert_eq!(classify_marker("text"), ListMarker::NotAMarker);
    }

    #[test]
    fn bullet_item_strips_marker() {
        let item = create_list_from_markdown("-   spaced", ListType::Unordered, None, &options());
        assert_eq!(item.levels, vec![ListLevel::new(ListType::Unordered)]);
        assert_eq!(item.blocks[0].as_paragraph().unwrap().plain_text(), "spaced");
    }

    #[test]
    fn indented_marker_nests_under_open_list() {
        let open = create_list_from_markdown("1. one", ListType::Ordered, None, &options());
        let item =
            create_list_from_markdown("    - inner", ListType::Unordered, Some(&open), &options());
        let types: Vec<ListType> = item.levels.iter().map(|l| l.list_type).collect();
        assert_eq!(types, vec![ListType::Ordered, ListType::Unordered]);
        assert_eq!(item.blocks[0].as_paragraph().unwrap().plain_text(), "inner");
    }

    #[test]
    fn continuation_becomes_dummy_item() {
        let open = create_list_from_markdown("- text", ListType::Unordered, None, &options());
        let item = create_list_from_markdown("more", ListType::Unordered, Some(&open), &options());
        assert!(item.is_dummy());
        assert_eq!(item.depth(), 1);
        assert_eq!(item.blocks[0].as_paragraph().unwrap().plain_text(), "more");
        assert!(!open.is_dummy());
    }

    #[test]
    fn rtl_is_stamped_on_items() {
        let options = options().with_direction(Direction::Rtl);
        let item = create_list_from_markdown("- a", ListType::Unordered, None, &options);
        assert_eq!(item.format.direction, Some(Direction::Rtl));
        assert_eq!(item.levels[0].format.direction, Some(Direction::Rtl));
        let paragraph = item.blocks[0].as_paragraph().unwrap();
        assert_eq!(paragraph.format.direction, Some(Direction::Rtl));
    }

    #[test]
    fn quote_keeps_space_after_marker() {
        let mut quote = create_blockquote_from_markdown("> text", None, &options()).unwrap();
        assert!(quote.is_blockquote());
        assert_eq!(quote.format, blockquote_format(None));
        let appended = create_blockquote_from_markdown("next", Some(&mut quote), &options());
        assert!(appended.is_none());
        let texts: Vec<String> = quote
            .blocks
            .iter()
            .map(|b| b.as_paragraph().unwrap().plain_text())
            .collect();
        assert_eq!(texts, vec![" text", "next"]);
    }

    #[test]
    fn row_splitting_drops_outer_pipes() {
        assert_eq!(split_table_row("| a | b |"), vec![" a ", " b "]);
        assert_eq!(split_table_row("  |x|  "), vec!["x"]);
    }

    #[test]
    fn divider_rows() {
        assert!(is_table_divider("| --- | :-: | --: |"));
        assert!(is_table_divider("|:---|"));
        assert!(!is_table_divider("| a | --- |"));
        assert!(!is_table_divider("||"));
    }

    #[test]
    fn alignments() {
        assert_eq!(parse_alignment(":---:"), TextAlign::Center);
        assert_eq!(parse_alignment(" ---: "), TextAlign::End);
        assert_eq!(parse_alignment(":---"), TextAlign::Start);
        assert_eq!(parse_alignment("---"), TextAlign::Start);
    }

    #[test]
    fn table_from_lines() {
        let lines: Vec<String> = ["| H1 | H2 |", "| :-: | --: |", "| a | b |"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let table = create_table_from_markdown(&lines, &options());
        assert_eq!(table.rows.len(), 2);
        assert!(table.format.has_header_row);
        assert!(table.format.border_collapse);
        assert!(table.format.use_border_box);

        let header = &table.rows[0].cells;
        assert!(header.iter().all(|c| c.is_header));
        assert_eq!(header[0].format.font_weight.as_deref(), Some("bold"));
        assert_eq!(header[0].format.text_align, Some(TextAlign::Center));

        let body = &table.rows[1].cells;
        assert!(!body[1].is_header);
        assert_eq!(body[1].format.text_align, Some(TextAlign::End));
        assert_eq!(body[1].blocks[0].as_paragraph().unwrap().plain_text(), "b");
    }
}
