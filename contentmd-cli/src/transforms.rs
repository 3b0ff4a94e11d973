//! CLI-specific transforms
//!
//! The inspect command parses a Markdown file into the content model and renders the
//! model in one of a few debugging views:
//!
//! - `model-treeviz`: Tree visualization with Unicode icons (default)
//! - `model-json`: The model as JSON
//!
//! ## Extra Parameters
//!
//! - `show-formats`: treeviz lists text segments and non-default formats
//! - `pretty`: JSON output is indented (on by default)
//!
//! Example: `contentmd inspect notes.md --extra-show-formats`

use contentmd_babel::format::Format;
use contentmd_babel::formats::markdown::parser::parse_from_markdown;
use contentmd_babel::formats::treeviz::to_treeviz_str_with_params;
use contentmd_babel::formats::JsonFormat;
use contentmd_babel::ImportOptions;
use std::collections::HashMap;

/// All available CLI transforms
pub const AVAILABLE_TRANSFORMS: &[&str] = &["model-treeviz", "model-json"];

pub const DEFAULT_TRANSFORM: &str = "model-treeviz";

/// Execute a named transform on Markdown source with optional extra parameters
///
/// Returns the rendered view, or an error message naming the failing step.
pub fn execute_transform(
    source: &str,
    transform_name: &str,
    import: &ImportOptions,
    extra_params: &HashMap<String, String>,
) -> Result<String, String> {
    let doc = parse_from_markdown(source, import);

    match transform_name {
        "model-treeviz" => to_treeviz_str_with_params(&doc, extra_params)
            .map_err(|e| format!("Treeviz rendering failed: {e}")),
        "model-json" => JsonFormat::default()
            .serialize_with_options(&doc, extra_params)
            .map_err(|e| format!("JSON serialization failed: {e}")),
        other => Err(format!("Unknown transform: {other}")),
    }
}
