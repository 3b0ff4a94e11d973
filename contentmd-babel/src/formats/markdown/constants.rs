//! Fixed tables shared by the Markdown parser and serializer.

use crate::model::{ContainerFormat, Direction, HeadingTag};

/// Source prefix of each heading level.
pub fn heading_prefix(tag: HeadingTag) -> &'static str {
    match tag {
        HeadingTag::H1 => "# ",
        HeadingTag::H2 => "## ",
        HeadingTag::H3 => "### ",
        HeadingTag::H4 => "#### ",
        HeadingTag::H5 => "##### ",
        HeadingTag::H6 => "###### ",
    }
}

/// Tag name of the container built for `>` lines.
pub const BLOCKQUOTE_TAG: &str = "blockquote";

/// Style applied to a blockquote container when it is created.
pub fn blockquote_format(direction: Option<Direction>) -> ContainerFormat {
    ContainerFormat {
        direction,
        border_left: Some("3px solid rgb(200, 200, 200)".to_string()),
        text_color: Some("rgb(102, 102, 102)".to_string()),
        margin_top: Some("1em".to_string()),
        margin_bottom: Some("1em".to_string()),
        margin_left: Some("40px".to_string()),
        margin_right: Some("40px".to_string()),
        padding_left: Some("10px".to_string()),
    }
}

/// Divider row cell for an alignment, as written on export.
pub const ALIGN_CENTER_DIVIDER: &str = ":---:";
pub const ALIGN_END_DIVIDER: &str = "---:";
pub const ALIGN_START_DIVIDER: &str = "---";
