//! Icon mapping for the tree visualization format

/// Get the Unicode icon for a model node type
///
/// Returns a single Unicode character that visually represents the node type.
pub fn get_icon(node_type: &str) -> &'static str {
    match node_type {
        "Document" => "⧉",
        "Paragraph" => "¶",
        "Heading" => "§",
        "Divider" => "⎯",
        "Table" => "▦",
        "TableRow" => "☰",
        "TableCell" => "▢",
        "ListItem" => "•",
        "FormatContainer" => "❝",
        "Text" => "◦",
        "Link" => "⊕",
        "Image" => "▣",
        "Br" => "↵",
        _ => "○",
    }
}
