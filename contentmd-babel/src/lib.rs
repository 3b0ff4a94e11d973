//! Markdown ⇄ Content Model conversion
//!
//!     This crate converts between a small, line-oriented Markdown dialect and the Content Model,
//!     a typed block/segment tree used by rich text editors. Both directions are pure functions of
//!     their input and options: parsing never fails, and serializing writes the dialect the parser
//!     reads, so Markdown → model → Markdown → model gives back the first model.
//!
//!     This is a pure lib, that is, it powers the contentmd cli but is shell agnostic: no code
//!     here should suppose a shell environment, be it std printing, env vars etc.
//!
//!     The file structure :
//!     .
//!     ├── error.rs
//!     ├── format.rs               # Format trait definition
//!     ├── registry.rs             # FormatRegistry for discovery and selection
//!     ├── model                   # The Content Model tree and its formats
//!     ├── formats
//!     │   ├── markdown
//!     │   │   ├── options.rs      # Import/export options
//!     │   │   ├── constants.rs    # Heading prefixes, quote format, table dividers
//!     │   │   ├── classify.rs     # Line kinds
//!     │   │   ├── context.rs      # Per-line parser state
//!     │   │   ├── blocks.rs       # Paragraph, list, quote and table builders
//!     │   │   ├── inline.rs       # Links, images, emphasis and heading prefixes
//!     │   │   ├── parser.rs
//!     │   │   ├── serializer.rs
//!     │   │   └── mod.rs
//!     │   ├── json                # serde representation of the model
//!     │   ├── treeviz             # Visual tree, serialization only
//!     │   └── icons.rs
//!     └── lib.rs
//!
//! Testing
//!     tests
//!     └── <format>
//!         ├── <testname>.rs
//!         └── fixtures
//!
//!     Note that rust does not by default discover tests in subdirectories, so we need to include these
//!     in the mod.
//!
//! Core Algorithm
//!
//!     Parsing classifies each line on its own (heading, rule, table row, quote, list item, blank or
//!     paragraph) and threads a small state from line to line: the open blockquote or list item that
//!     paragraph lines continue, the buffered table rows, and where we are in a run of blank lines.
//!     Serialization walks the tree once, numbering ordered lists as it goes.

pub mod error;
pub mod format;
pub mod formats;
pub mod model;
pub mod registry;

pub use error::FormatError;
pub use format::Format;
pub use formats::markdown::{EmptyLinePolicy, ExportOptions, ImportOptions, MarkdownOptions};
pub use model::ContentModelDocument;
pub use registry::FormatRegistry;

/// Converts Markdown text into a content model document.
pub fn markdown_to_content_model(source: &str, options: &ImportOptions) -> ContentModelDocument {
    formats::markdown::parser::parse_from_markdown(source, options)
}

/// Converts a content model document into Markdown text.
pub fn content_model_to_markdown(doc: &ContentModelDocument, options: &ExportOptions) -> String {
    formats::markdown::serializer::serialize_to_markdown(doc, options)
}
