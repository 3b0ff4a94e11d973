//! Markdown → model → Markdown → model gives back the first model.

use crate::common::{fixture, md_to_model, model_to_md};
use proptest::prelude::*;

fn assert_stable(md: &str) {
    let first = md_to_model(md);
    let second = md_to_model(&model_to_md(&first));
    assert_eq!(first, second, "model changed for input {md:?}");
}

#[test]
fn test_kitchensink_is_stable() {
    assert_stable(&fixture("kitchensink.md"));
}

#[test]
fn test_blank_line_runs_are_stable() {
    assert_stable("\n\nleading");
    assert_stable("a\n\n\n\nb");
    assert_stable("- a\n\n\n\nb");
    assert_stable("> q\n\n\n| a |");
    assert_stable("trailing\n\n\n");
}

#[test]
fn test_nested_list_after_blank_is_stable() {
    assert_stable("1. one\n\n    - nested");
    assert_stable("- one\n\n  2. deep\ncontinued");
}

#[test]
fn test_serialized_output_is_a_fixed_point() {
    let once = model_to_md(&md_to_model(&fixture("kitchensink.md")));
    let twice = model_to_md(&md_to_model(&once));
    assert_eq!(once, twice);
}

#[test]
fn test_nested_emphasis_is_stable() {
    assert_stable("*a ~~b~~*");
    assert_stable("*a **b***");
    assert_stable("**a~~b**c~~");
    assert_stable("a****b");
    assert_stable("a~**~~**b");
    assert_stable("- *a ~~b~~*\n**a~~b**c~~");
}

#[test]
fn test_marker_only_lines_are_stable() {
    assert_stable("a\n****\nb");
    assert_stable("a\n*\nb");
    assert_stable("- a\n****\n*");
    assert_stable("> q\n****");
}

const LINES: &[&str] = &[
    "plain text",
    "**bold** and *it*",
    "*a ~~b~~*",
    "*a **b***",
    "**a~~b**c~~",
    "****",
    "*",
    "# Heading",
    "## Sub",
    "---",
    "- bullet",
    "* star",
    "1. one",
    "    - nested",
    "  2. deep",
    "> quote",
    "continued",
    "| a | b |",
    "| --- | :-: |",
    "see [l](https://example.com/x) ![i](https://example.com/i.png)",
    "",
    "",
];

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_markdown_round_trip_is_stable(
        lines in prop::collection::vec(prop::sample::select(LINES), 0..24)
    ) {
        let md = lines.join("\n");
        let first = md_to_model(&md);
        let second = md_to_model(&model_to_md(&first));
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_inline_markers_round_trip(text in "[ab *~]{0,16}") {
        // leading letter keeps the line a paragraph
        let md = format!("x{text}");
        let first = md_to_model(&md);
        let second = md_to_model(&model_to_md(&first));
        prop_assert_eq!(first, second);
    }
}
