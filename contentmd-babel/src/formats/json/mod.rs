//! JSON format: the content model as its serde representation
//!
//! Blocks, block groups and segments carry `blockType`, `blockGroupType` and
//! `segmentType` tags; every other field is camelCase.

use crate::error::FormatError;
use crate::format::{bool_option, Format};
use crate::model::ContentModelDocument;
use std::collections::HashMap;

/// Format implementation for JSON
#[derive(Debug, Clone)]
pub struct JsonFormat {
    pretty: bool,
}

impl JsonFormat {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    fn write(&self, doc: &ContentModelDocument, pretty: bool) -> Result<String, FormatError> {
        let result = if pretty {
            serde_json::to_string_pretty(doc)
        } else {
            serde_json::to_string(doc)
        };
        result.map_err(|e| FormatError::SerializationError(e.to_string()))
    }
}

impl Default for JsonFormat {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Format for JsonFormat {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "Content model as JSON"
    }

    fn file_extensions(&self) -> &[&str] {
        &["json"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<ContentModelDocument, FormatError> {
        serde_json::from_str(source).map_err(|e| FormatError::ParseError(e.to_string()))
    }

    fn serialize(&self, doc: &ContentModelDocument) -> Result<String, FormatError> {
        self.write(doc, self.pretty)
    }

    fn serialize_with_options(
        &self,
        doc: &ContentModelDocument,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        if let Some(key) = options.keys().find(|key| key.as_str() != "pretty") {
            return Err(FormatError::invalid_option(key.as_str(), options[key].as_str()));
        }
        let pretty = bool_option(options, "pretty")?.unwrap_or(self.pretty);
        self.write(doc, pretty)
    }
}
