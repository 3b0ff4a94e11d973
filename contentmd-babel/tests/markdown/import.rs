//! Import tests for Markdown format (Markdown → content model)

use crate::common::{fixture, md_to_model};
use contentmd_babel::format::Format;
use contentmd_babel::formats::markdown::MarkdownFormat;
use contentmd_babel::model::{
    Block, DisplayForDummyItem, HeadingTag, ListType, Paragraph, Segment, TextAlign,
};
use std::collections::HashMap;

fn text_of(block: &Block) -> String {
    block
        .as_paragraph()
        .map(Paragraph::plain_text)
        .unwrap_or_else(|| panic!("Expected paragraph, got {block:?}"))
}

#[test]
fn test_kitchensink_structure() {
    let doc = md_to_model(&fixture("kitchensink.md"));
    let kinds: Vec<&str> = doc.blocks.iter().map(Block::node_type).collect();
    assert_eq!(
        kinds,
        vec![
            "Paragraph",
            "Paragraph",
            "Paragraph",
            "ListItem",
            "ListItem",
            "ListItem",
            "ListItem",
            "ListItem",
            "ListItem",
            "ListItem",
            "FormatContainer",
            "Table",
            "Divider",
            "Paragraph",
            "Paragraph",
            "Paragraph",
        ]
    );
}

#[test]
fn test_kitchensink_headings() {
    let doc = md_to_model(&fixture("kitchensink.md"));
    let title = doc.blocks[0].as_paragraph().unwrap();
    assert_eq!(title.decorator.as_ref().unwrap().tag_name, HeadingTag::H1);
    assert_eq!(title.plain_text(), "Kitchen Sink");
    let lists = doc.blocks[2].as_paragraph().unwrap();
    assert_eq!(lists.decorator.as_ref().unwrap().tag_name, HeadingTag::H2);
}

#[test]
fn test_kitchensink_lists() {
    let doc = md_to_model(&fixture("kitchensink.md"));
    let items: Vec<_> = doc.blocks[3..10]
        .iter()
        .map(|b| b.as_list_item().unwrap())
        .collect();

    let depths: Vec<usize> = items.iter().map(|i| i.depth()).collect();
    assert_eq!(depths, vec![1, 1, 2, 2, 2, 1, 1]);

    assert_eq!(items[2].levels[0].list_type, ListType::Unordered);
    assert_eq!(items[2].levels[1].list_type, ListType::Ordered);

    let continuation = items[4];
    assert!(continuation.is_dummy());
    assert_eq!(
        continuation.levels[1].format.display_for_dummy_item,
        Some(DisplayForDummyItem::Block)
    );
    assert_eq!(text_of(&continuation.blocks[0]), "continued line");

    assert_eq!(items[5].levels[0].list_type, ListType::Ordered);
    assert_eq!(text_of(&items[6].blocks[0]), "beta");
}

#[test]
fn test_kitchensink_quote_table_and_inline() {
    let doc = md_to_model(&fixture("kitchensink.md"));

    let quote = doc.blocks[10].as_format_container().unwrap();
    let lines: Vec<String> = quote.blocks.iter().map(text_of).collect();
    assert_eq!(lines, vec![" quoted line", "still quoted"]);
    assert_eq!(
        quote.format.border_left.as_deref(),
        Some("3px solid rgb(200, 200, 200)")
    );

    let table = doc.blocks[11].as_table().unwrap();
    assert_eq!(table.rows.len(), 3);
    assert!(table.rows[0].cells.iter().all(|c| c.is_header));
    assert_eq!(table.rows[2].cells[1].format.text_align, Some(TextAlign::End));
    assert_eq!(text_of(&table.rows[2].cells[0].blocks[0]), "Bob");

    let links = doc.blocks[13].as_paragraph().unwrap();
    assert!(links.segments.iter().any(|s| matches!(
        s,
        Segment::Text(t) if t.link.as_ref().is_some_and(|l| l.href == "https://example.com/docs")
    )));
    assert!(links
        .segments
        .iter()
        .any(|s| matches!(s, Segment::Image(i) if i.src == "https://example.com/logo.png")));

    assert!(doc.blocks[14].as_paragraph().unwrap().is_empty_line());
    assert_eq!(text_of(&doc.blocks[15]), "Last paragraph.");
}

#[test]
fn test_emphasis_segments() {
    let doc = md_to_model("A paragraph with **bold**, *italic* and ~~struck~~ text.");
    let paragraph = doc.blocks[0].as_paragraph().unwrap();
    let styled: Vec<(&str, bool, bool, bool)> = paragraph
        .segments
        .iter()
        .map(|s| match s {
            Segment::Text(t) => (
                t.text.as_str(),
                t.format.bold,
                t.format.italic,
                t.format.strikethrough,
            ),
            other => panic!("Unexpected segment {other:?}"),
        })
        .collect();
    assert_eq!(
        styled,
        vec![
            ("A paragraph with ", false, false, false),
            ("bold", true, false, false),
            (", ", false, false, false),
            ("italic", false, true, false),
            (" and ", false, false, false),
            ("struck", false, false, true),
            (" text.", false, false, false),
        ]
    );
}

#[test]
fn test_invalid_links_stay_text() {
    let doc = md_to_model("[link](ht3tps://www.example.com/with)");
    let paragraph = doc.blocks[0].as_paragraph().unwrap();
    assert_eq!(paragraph.segments.len(), 1);
    assert_eq!(paragraph.plain_text(), "[link](ht3tps://www.example.com/with)");

    let doc = md_to_model("![image](http3s://www.example.com/with)");
    assert!(doc.blocks[0]
        .as_paragraph()
        .unwrap()
        .segments
        .iter()
        .all(|s| matches!(s, Segment::Text(_))));
}

#[test]
fn test_windows_line_endings() {
    let doc = md_to_model("# Title\r\n\r\ntext\r\n");
    assert_eq!(doc.blocks.len(), 2);
    assert_eq!(text_of(&doc.blocks[1]), "text");
}

#[test]
fn test_extra_parameters() {
    let mut params = HashMap::new();
    params.insert("empty-line".to_string(), "preserve".to_string());
    let doc = MarkdownFormat::default()
        .parse_with_options("a\n\n\nb", &params)
        .expect("Should parse markdown");
    assert_eq!(doc.blocks.len(), 4);

    params.insert("direction".to_string(), "sideways".to_string());
    assert!(MarkdownFormat::default()
        .parse_with_options("a", &params)
        .is_err());
}
