//! Settings for the outline tools
//!
//! Three tables: `[detection]` (threshold, forced genre, verbose logging), `[query]`
//! (deduplication of nested matches) and `[output]` (format name). The values shipped in
//! `defaults/outline.default.toml` are compiled in, so a missing user file still yields a
//! complete [`OutlineConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use outline_parser::outline::{Detector, OutlineResult, QueryMode};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/outline.default.toml");

/// Top-level configuration consumed by outline applications.
#[derive(Debug, Clone, Deserialize)]
pub struct OutlineConfig {
    pub detection: DetectionConfig,
    pub query: QueryConfig,
    pub output: OutputConfig,
}

/// Genre selection knobs.
#[derive(Debug, Clone, Deserialize)]
pub struct DetectionConfig {
    pub confidence_threshold: f64,
    pub verbose: bool,
    /// Skip detection and use this genre
    #[serde(default)]
    pub genre: Option<String>,
}

impl DetectionConfig {
    /// Detector using the configured threshold; out-of-range values are rejected.
    pub fn detector(&self) -> OutlineResult<Detector> {
        Detector::with_threshold(self.confidence_threshold)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct QueryConfig {
    pub deduplicate: bool,
}

impl QueryConfig {
    pub fn mode(&self) -> QueryMode {
        if self.deduplicate {
            QueryMode::Deduplicated
        } else {
            QueryMode::Faithful
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub format: String,
}

/// File looked up in the working directory when no explicit file is given
pub const LOCAL_FILE: &str = "outline.toml";

/// Builds an [`OutlineConfig`] from the embedded defaults, at most a few TOML files and the
/// settings given on the command line, later layers winning.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    pub fn new() -> Self {
        let defaults = File::from_str(DEFAULT_TOML, FileFormat::Toml);
        Self {
            builder: Config::builder().add_source(defaults),
        }
    }

    fn layer(mut self, path: &Path, required: bool) -> Self {
        let file = File::from(path).format(FileFormat::Toml).required(required);
        self.builder = self.builder.add_source(file);
        self
    }

    /// Layer a file the user asked for; `build` fails when it is missing.
    pub fn with_file(self, path: impl AsRef<Path>) -> Self {
        self.layer(path.as_ref(), true)
    }

    /// Layer a file only if it exists.
    pub fn with_optional_file(self, path: impl AsRef<Path>) -> Self {
        self.layer(path.as_ref(), false)
    }

    /// Layer `dir/outline.toml` when present.
    pub fn with_local_file(self, dir: impl AsRef<Path>) -> Self {
        self.layer(&dir.as_ref().join(LOCAL_FILE), false)
    }

    /// Raw `section.key` override
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Skip detection and build with this genre.
    pub fn genre(self, name: &str) -> Result<Self, ConfigError> {
        self.set_override("detection.genre", name)
    }

    pub fn threshold(self, threshold: f64) -> Result<Self, ConfigError> {
        self.set_override("detection.confidence_threshold", threshold)
    }

    pub fn verbose(self, verbose: bool) -> Result<Self, ConfigError> {
        self.set_override("detection.verbose", verbose)
    }

    pub fn deduplicate(self, deduplicate: bool) -> Result<Self, ConfigError> {
        self.set_override("query.deduplicate", deduplicate)
    }

    pub fn format(self, name: &str) -> Result<Self, ConfigError> {
        self.set_override("output.format", name)
    }

    pub fn build(self) -> Result<OutlineConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// The embedded defaults alone
pub fn load_defaults() -> Result<OutlineConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use outline_parser::outline::{OutlineError, DEFAULT_CONFIDENCE_THRESHOLD};

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(
            config.detection.confidence_threshold,
            DEFAULT_CONFIDENCE_THRESHOLD
        );
        assert!(!config.detection.verbose);
        assert_eq!(config.detection.genre, None);
        assert_eq!(config.query.mode(), QueryMode::Faithful);
        assert_eq!(config.output.format, "treeviz");
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .genre("journal")
            .and_then(|l| l.deduplicate(true))
            .and_then(|l| l.format("json"))
            .expect("overrides to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.detection.genre.as_deref(), Some("journal"));
        assert_eq!(config.query.mode(), QueryMode::Deduplicated);
        assert_eq!(config.output.format, "json");
    }

    #[test]
    fn detector_rejects_out_of_range_threshold() {
        let config = Loader::new()
            .threshold(1.5)
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert!(matches!(
            config.detection.detector(),
            Err(OutlineError::InvalidArgument(_))
        ));
    }

    #[test]
    fn missing_required_file_is_an_error() {
        let result = Loader::new().with_file("/definitely/not/here.toml").build();
        assert!(result.is_err());
    }

    #[test]
    fn local_file_is_layered_under_overrides() {
        let dir = tempfile::tempdir().expect("temp dir");
        std::fs::write(
            dir.path().join(LOCAL_FILE),
            "[output]\nformat = \"yaml\"\n[query]\ndeduplicate = true\n",
        )
        .expect("local file");

        let config = Loader::new()
            .with_local_file(dir.path())
            .format("metadata")
            .expect("override to apply")
            .build()
            .expect("config to build");

        assert_eq!(config.output.format, "metadata");
        assert_eq!(config.query.mode(), QueryMode::Deduplicated);
        assert_eq!(config.detection.genre, None);
    }

    #[test]
    fn optional_file_may_be_absent() {
        let config = Loader::new()
            .with_optional_file("/definitely/not/here.toml")
            .build()
            .expect("config to build");
        assert_eq!(config.output.format, "treeviz");
    }
}
