//! Shared helpers for the integration tests.

use contentmd_babel::{
    content_model_to_markdown, markdown_to_content_model, ContentModelDocument, ExportOptions,
    ImportOptions,
};
use std::path::PathBuf;

/// Read a fixture from `tests/fixtures`.
pub fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"))
}

/// Parse with default options.
pub fn md_to_model(md: &str) -> ContentModelDocument {
    markdown_to_content_model(md, &ImportOptions::default())
}

/// Serialize with default options.
pub fn model_to_md(doc: &ContentModelDocument) -> String {
    content_model_to_markdown(doc, &ExportOptions::default())
}
