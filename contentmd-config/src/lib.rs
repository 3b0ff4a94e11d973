//! Shared configuration loader for the contentmd toolchain.
//!
//! `defaults/contentmd.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`ContentmdConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use contentmd_babel::formats::markdown::{
    EmptyLinePolicy, ExportOptions, ImportOptions, MarkdownOptions,
};
use contentmd_babel::model::Direction;
use contentmd_babel::FormatError;
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/contentmd.default.toml");

/// Top-level configuration consumed by contentmd applications.
#[derive(Debug, Clone, Deserialize)]
pub struct ContentmdConfig {
    pub markdown: MarkdownConfig,
    pub inspect: InspectConfig,
    pub convert: ConvertConfig,
}

/// Markdown import and export groups.
#[derive(Debug, Clone, Deserialize)]
pub struct MarkdownConfig {
    pub import: MarkdownImportConfig,
    pub export: MarkdownExportConfig,
}

/// Mirrors the knobs exposed by the Markdown parser.
#[derive(Debug, Clone, Deserialize)]
pub struct MarkdownImportConfig {
    pub empty_line: EmptyLinePolicy,
    pub direction: Direction,
    pub split_lines_pattern: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MarkdownExportConfig {
    pub block_separator: String,
}

impl TryFrom<&MarkdownImportConfig> for ImportOptions {
    type Error = FormatError;

    fn try_from(config: &MarkdownImportConfig) -> Result<Self, Self::Error> {
        Ok(ImportOptions::default()
            .with_split_lines_pattern(&config.split_lines_pattern)?
            .with_empty_line(config.empty_line)
            .with_direction(config.direction))
    }
}

impl From<&MarkdownExportConfig> for ExportOptions {
    fn from(config: &MarkdownExportConfig) -> Self {
        ExportOptions {
            block_separator: config.block_separator.clone(),
        }
    }
}

impl TryFrom<&MarkdownConfig> for MarkdownOptions {
    type Error = FormatError;

    fn try_from(config: &MarkdownConfig) -> Result<Self, Self::Error> {
        Ok(MarkdownOptions {
            import: ImportOptions::try_from(&config.import)?,
            export: ExportOptions::from(&config.export),
        })
    }
}

/// Controls model inspect output.
#[derive(Debug, Clone, Deserialize)]
pub struct InspectConfig {
    pub treeviz: TreevizConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TreevizConfig {
    pub show_formats: bool,
}

/// Format-specific conversion knobs.
#[derive(Debug, Clone, Deserialize)]
pub struct ConvertConfig {
    pub json: JsonConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JsonConfig {
    pub pretty: bool,
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<ContentmdConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<ContentmdConfig, ConfigError> {
    Loader::new().build()
}
