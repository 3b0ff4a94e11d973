//! JSON format tests

use crate::common::{fixture, md_to_model};
use contentmd_babel::FormatRegistry;

#[test]
fn test_kitchensink_json_round_trip() {
    let registry = FormatRegistry::default();
    let doc = md_to_model(&fixture("kitchensink.md"));

    let json = registry.serialize(&doc, "json").expect("Should serialize json");
    let back = registry.parse(&json, "json").expect("Should parse json");
    assert_eq!(back, doc);
}

#[test]
fn test_json_shape() {
    let registry = FormatRegistry::default();
    let doc = registry.parse("> q\n\n- a", "markdown").unwrap();
    let json = registry.serialize(&doc, "json").unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    let quote = &value["blocks"][0];
    assert_eq!(quote["blockType"], "BlockGroup");
    assert_eq!(quote["blockGroupType"], "FormatContainer");
    assert_eq!(quote["tagName"], "blockquote");
    assert_eq!(quote["format"]["paddingLeft"], "10px");

    let item = &value["blocks"][1];
    assert_eq!(item["blockGroupType"], "ListItem");
    assert_eq!(item["levels"][0]["listType"], "UL");
    assert_eq!(item["blocks"][0]["segments"][0]["text"], "a");
}

#[test]
fn test_markdown_to_json_to_markdown() {
    let registry = FormatRegistry::default();
    let md = "# T\n\n1. a\n2. b\n";
    let doc = registry.parse(md, "markdown").unwrap();
    let json = registry.serialize(&doc, "json").unwrap();
    let back = registry.parse(&json, "json").unwrap();
    assert_eq!(registry.serialize(&back, "markdown").unwrap(), md);
}
