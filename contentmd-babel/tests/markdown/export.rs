//! Export tests for Markdown format (content model → Markdown)

use crate::common::{fixture, md_to_model, model_to_md};
use contentmd_babel::format::Format;
use contentmd_babel::formats::markdown::MarkdownFormat;
use contentmd_babel::model::{
    Block, ContentModelDocument, Decorator, FormatContainer, HeadingTag, ListItem, ListLevel,
    ListType, Paragraph,
};
use insta::assert_snapshot;
use std::collections::HashMap;

fn list_item(levels: &[ListType], text: &str) -> Block {
    let mut item = ListItem::new(levels.iter().copied().map(ListLevel::new).collect());
    item.blocks.push(Paragraph::from_text(text).into());
    item.into()
}

#[test]
fn test_kitchensink_export() {
    let doc = md_to_model(&fixture("kitchensink.md"));
    assert_snapshot!("kitchensink_export", model_to_md(&doc));
}

#[test]
fn test_heading_levels() {
    let blocks: Vec<Block> = HeadingTag::ALL
        .iter()
        .map(|tag| {
            let mut paragraph = Paragraph::from_text("h");
            paragraph.decorator = Some(Decorator::heading(*tag));
            Block::from(paragraph)
        })
        .collect();
    let output = model_to_md(&ContentModelDocument::with_blocks(blocks));
    assert_eq!(
        output,
        "# h\n\n## h\n\n### h\n\n#### h\n\n##### h\n\n###### h\n"
    );
}

#[test]
fn test_ordered_numbering_per_run() {
    let doc = ContentModelDocument::with_blocks(vec![
        list_item(&[ListType::Ordered], "a"),
        list_item(&[ListType::Ordered, ListType::Ordered], "a.1"),
        list_item(&[ListType::Ordered, ListType::Ordered], "a.2"),
        list_item(&[ListType::Ordered], "b"),
        list_item(&[ListType::Ordered, ListType::Unordered], "b.x"),
        list_item(&[ListType::Ordered], "c"),
    ]);
    assert_eq!(
        model_to_md(&doc),
        "1. a\n    1. a.1\n    2. a.2\n2. b\n    - b.x\n3. c\n"
    );
}

#[test]
fn test_quote_after_list_is_separated() {
    let mut quote = FormatContainer::new("blockquote", Default::default());
    quote.blocks.push(Paragraph::from_text(" q").into());
    let doc = ContentModelDocument::with_blocks(vec![
        list_item(&[ListType::Unordered], "a"),
        quote.into(),
        Paragraph::from_text("p").into(),
    ]);
    assert_eq!(model_to_md(&doc), "- a\n\n> q\n\np\n");
}

#[test]
fn test_block_separator_parameter() {
    let doc = md_to_model("a\n\nb\n\n---");
    let mut params = HashMap::new();
    params.insert("block-separator".to_string(), "\\n".to_string());
    let output = MarkdownFormat::default()
        .serialize_with_options(&doc, &params)
        .expect("Should serialize markdown");
    assert_eq!(output, "a\nb\n---");
}
