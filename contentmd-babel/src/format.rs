//! Format trait definition
//!
//! This module defines the core Format trait that all format implementations must implement.
//! The trait provides a uniform interface for parsing and serializing content models.

use crate::error::FormatError;
use crate::model::ContentModelDocument;
use std::collections::HashMap;

/// Trait for document formats
///
/// Implementors provide conversion between a string representation and the content model.
/// Formats can support parsing, serialization, or both.
///
/// # Examples
///
/// ```ignore
/// struct MyFormat;
///
/// impl Format for MyFormat {
///     fn name(&self) -> &str {
///         "my-format"
///     }
///
///     fn supports_serialization(&self) -> bool {
///         true
///     }
///
///     fn serialize(&self, doc: &ContentModelDocument) -> Result<String, FormatError> {
///         todo!()
///     }
/// }
/// ```
pub trait Format: Send + Sync {
    /// The name of this format (e.g., "markdown", "json")
    fn name(&self) -> &str;

    /// Optional description of this format
    fn description(&self) -> &str {
        ""
    }

    /// File extensions associated with this format (e.g., ["md", "markdown"])
    ///
    /// Returns a slice of file extensions without the leading dot.
    /// Used for automatic format detection from filenames.
    fn file_extensions(&self) -> &[&str] {
        &[]
    }

    /// Whether this format supports parsing (source → content model)
    fn supports_parsing(&self) -> bool {
        false
    }

    /// Whether this format supports serialization (content model → source)
    fn supports_serialization(&self) -> bool {
        false
    }

    /// Parse source text into a content model
    ///
    /// Default implementation returns NotSupported error.
    fn parse(&self, _source: &str) -> Result<ContentModelDocument, FormatError> {
        Err(FormatError::NotSupported(format!(
            "Format '{}' does not support parsing",
            self.name()
        )))
    }

    /// Serialize a content model into source text
    ///
    /// Default implementation returns NotSupported error.
    fn serialize(&self, _doc: &ContentModelDocument) -> Result<String, FormatError> {
        Err(FormatError::NotSupported(format!(
            "Format '{}' does not support serialization",
            self.name()
        )))
    }

    /// Parse, optionally using extra parameters.
    ///
    /// Formats without tunable parsing rely on the default implementation, which delegates
    /// to [`Format::parse`] and rejects any parameter.
    fn parse_with_options(
        &self,
        source: &str,
        options: &HashMap<String, String>,
    ) -> Result<ContentModelDocument, FormatError> {
        reject_options(self.name(), options)?;
        self.parse(source)
    }

    /// Serialize, optionally using extra parameters.
    fn serialize_with_options(
        &self,
        doc: &ContentModelDocument,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        reject_options(self.name(), options)?;
        self.serialize(doc)
    }
}

fn reject_options(name: &str, options: &HashMap<String, String>) -> Result<(), FormatError> {
    if options.is_empty() {
        Ok(())
    } else {
        Err(FormatError::NotSupported(format!(
            "Format '{name}' does not support extra parameters"
        )))
    }
}

/// Reads a boolean extra parameter, accepting the usual spellings.
pub fn bool_option(options: &HashMap<String, String>, key: &str) -> Result<Option<bool>, FormatError> {
    match options.get(key) {
        None => Ok(None),
        Some(raw) => match raw.to_lowercase().as_str() {
            "true" | "1" | "yes" | "y" => Ok(Some(true)),
            "false" | "0" | "no" | "n" => Ok(Some(false)),
            _ => Err(FormatError::invalid_option(key, raw.as_str())),
        },
    }
}
