//! Layered configuration for prismic-babel hosts.
//!
//! `defaults/prismic.default.toml` is embedded into every binary so that docs
//! and runtime behavior stay in sync. Applications layer user-specific files on
//! top of those defaults via [`Loader`] before deserializing into
//! [`PrismicConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use prismic_babel::{CodecOptions, FormatRegistry, WireShape};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/prismic.default.toml");

/// Top-level configuration consumed by prismic-babel hosts.
#[derive(Debug, Clone, Deserialize)]
pub struct PrismicConfig {
    pub codec: CodecOptions,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub shape: WireShape,
}

impl PrismicConfig {
    /// A registry whose formats use the configured codec options
    pub fn registry(&self) -> FormatRegistry {
        FormatRegistry::with_options(&self.codec)
    }

    /// Name of the format matching the configured output shape
    pub fn default_format(&self) -> &'static str {
        self.output.shape.format_name()
    }
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

    /// Layer TOML text, e.g. a `[codec]` table read by the host.
    pub fn with_toml(mut self, toml: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(toml, FileFormat::Toml));
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
    pub fn build(self) -> Result<PrismicConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<PrismicConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use prismic_babel::ir::nodes::{Document, Node};

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.codec, CodecOptions::default());
        assert_eq!(config.output.shape, WireShape::Nested);
        assert_eq!(config.default_format(), "nested");
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("output.shape", "flattened")
            .expect("override to apply")
            .set_override("codec.max_heading_level", 3_i64)
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.output.shape, WireShape::Flattened);
        assert_eq!(config.codec.max_heading_level, 3);
        assert!(config.codec.sort_spans);
    }

    #[test]
    fn layers_partial_toml() {
        let config = Loader::new()
            .with_toml("[codec]\nembed_tags = [\"iframe\", \"video\"]\npretty = true\n")
            .build()
            .expect("config to build");
        assert!(config.codec.is_embed_tag("VIDEO"));
        assert!(config.codec.pretty);
        assert_eq!(config.codec.embed_type, "link");
    }

    #[test]
    fn missing_optional_file_is_ignored() {
        let config = Loader::new()
            .with_optional_file("/nonexistent/prismic.toml")
            .build()
            .expect("config to build");
        assert_eq!(config.output.shape, WireShape::Nested);
    }

    #[test]
    fn missing_required_file_is_an_error() {
        assert!(Loader::new()
            .with_file("/nonexistent/prismic.toml")
            .build()
            .is_err());
    }

    #[test]
    fn registry_uses_configured_options() {
        let config = Loader::new()
            .set_override("codec.max_heading_level", 2_i64)
            .expect("override to apply")
            .build()
            .expect("config to build");
        let doc = Document::new(vec![Node::heading(4, vec![Node::text("deep")])]);

        let output = config
            .registry()
            .serialize(&doc, config.default_format())
            .expect("serialization to succeed");
        assert!(output.value.contains("\"heading2\""), "{}", output.value);
        assert_eq!(output.diagnostics.len(), 1);
    }
}
