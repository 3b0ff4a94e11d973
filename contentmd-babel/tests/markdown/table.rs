use crate::common::{md_to_model, model_to_md};
use contentmd_babel::model::{Block, TextAlign};

#[test]
fn test_table_round_trip() {
    let md = "| Header 1 | Header 2 |\n| :--- | :---: |\n| Cell 1 | Cell 2 |\n| Cell 3 | Cell 4 |\n";

    let doc = md_to_model(md);
    let output = model_to_md(&doc);

    assert_eq!(
        output,
        "| Header 1 | Header 2 |\n| --- | :---: |\n| Cell 1 | Cell 2 |\n| Cell 3 | Cell 4 |\n"
    );
    assert_eq!(md_to_model(&output), doc);
}

#[test]
fn test_table_alignment_import() {
    let md = "| Left | Center | Right |\n| :--- | :----: | ----: |\n| L    | C      | R     |\n";

    let doc = md_to_model(md);
    let table = doc.blocks[0].as_table().expect("Expected a table");

    let aligns: Vec<Option<TextAlign>> = table.rows[1]
        .cells
        .iter()
        .map(|c| c.format.text_align)
        .collect();
    assert_eq!(
        aligns,
        vec![
            Some(TextAlign::Start),
            Some(TextAlign::Center),
            Some(TextAlign::End)
        ]
    );

    let texts: Vec<String> = table.rows[1]
        .cells
        .iter()
        .map(|c| c.blocks[0].as_paragraph().unwrap().plain_text())
        .collect();
    assert_eq!(texts, vec!["L", "C", "R"]);
}

#[test]
fn test_header_row_formatting() {
    let doc = md_to_model("| **H** |\n| --- |\n| b |");
    let table = doc.blocks[0].as_table().unwrap();
    let header = &table.rows[0].cells[0];
    assert!(header.is_header);
    assert_eq!(header.format.font_weight.as_deref(), Some("bold"));
    assert!(!table.rows[1].cells[0].is_header);
    assert!(table.rows[1].cells[0].format.font_weight.is_none());
}

#[test]
fn test_two_line_table_is_not_a_table() {
    let doc = md_to_model("| a |\n| --- |\n\nnext");
    assert!(doc.blocks.iter().all(|b| matches!(b, Block::Paragraph(_))));
    assert_eq!(doc.blocks.len(), 3);
}

#[test]
fn test_table_closes_open_list() {
    let doc = md_to_model("- item\n| a |\n| - |\n| b |");
    assert!(doc.blocks[0].as_list_item().is_some());
    assert!(doc.blocks[1].as_table().is_some());
}
