//! Harness Configuration
//!
//! Which renderer to use and which query parameters gate a run. Every field
//! has a default, and partial JSON/YAML documents take defaults for the
//! fields they omit.

use crate::renderer::RendererKind;
use crate::result::{PageTestError, PageTestResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default query parameter that must equal `"1"` to run tests
pub const DEFAULT_RUN_TESTS_PARAM: &str = "run_tests";
/// Default query parameter holding the test name filter
pub const DEFAULT_RUN_ONLY_PARAM: &str = "run_only";

/// Configuration for a test run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    /// Renderer used to display outcomes
    pub renderer: RendererKind,
    /// Query parameter toggling execution
    pub run_tests_param: String,
    /// Query parameter holding the name filter
    pub run_only_param: String,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            renderer: RendererKind::Console,
            run_tests_param: DEFAULT_RUN_TESTS_PARAM.to_string(),
            run_only_param: DEFAULT_RUN_ONLY_PARAM.to_string(),
        }
    }
}

impl HarnessConfig {
    /// Create a new builder
    #[must_use]
    pub fn builder() -> HarnessConfigBuilder {
        HarnessConfigBuilder::default()
    }

    /// Parse a JSON document
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not valid JSON or names are empty
    pub fn from_json_str(json: &str) -> PageTestResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a YAML document
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not valid YAML or names are empty
    pub fn from_yaml_str(yaml: &str) -> PageTestResult<Self> {
        let config: Self = serde_yaml_ng::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a `.json`, `.yaml` or `.yml` file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, has an unknown extension,
    /// or does not parse
    pub fn load(path: &Path) -> PageTestResult<Self> {
        let text = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&text),
            Some("yaml" | "yml") => Self::from_yaml_str(&text),
            _ => Err(PageTestError::config(format!(
                "unsupported config file '{}': expected .json, .yaml or .yml",
                path.display()
            ))),
        }
    }

    /// Check that parameter names are usable
    ///
    /// # Errors
    ///
    /// Returns an error if a parameter name is empty or both names are equal
    pub fn validate(&self) -> PageTestResult<()> {
        if self.run_tests_param.is_empty() {
            return Err(PageTestError::config("run_tests_param must not be empty"));
        }
        if self.run_only_param.is_empty() {
            return Err(PageTestError::config("run_only_param must not be empty"));
        }
        if self.run_tests_param == self.run_only_param {
            return Err(PageTestError::config(format!(
                "run_tests_param and run_only_param are both '{}'",
                self.run_tests_param
            )));
        }
        Ok(())
    }
}

/// Builder for `HarnessConfig`
#[derive(Debug, Clone, Default)]
pub struct HarnessConfigBuilder {
    config: HarnessConfig,
}

impl HarnessConfigBuilder {
    /// Set the renderer
    #[must_use]
    pub fn renderer(mut self, renderer: RendererKind) -> Self {
        self.config.renderer = renderer;
        self
    }

    /// Set the run toggle parameter name
    #[must_use]
    pub fn run_tests_param(mut self, name: impl Into<String>) -> Self {
        self.config.run_tests_param = name.into();
        self
    }

    /// Set the filter parameter name
    #[must_use]
    pub fn run_only_param(mut self, name: impl Into<String>) -> Self {
        self.config.run_only_param = name.into();
        self
    }

    /// Build the configuration
    #[must_use]
    pub fn build(self) -> HarnessConfig {
        self.config
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = HarnessConfig::default();
        assert_eq!(config.renderer, RendererKind::Console);
        assert_eq!(config.run_tests_param, "run_tests");
        assert_eq!(config.run_only_param, "run_only");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_chain() {
        let config = HarnessConfig::builder()
            .renderer(RendererKind::Table)
            .run_tests_param("t")
            .run_only_param("only")
            .build();
        assert_eq!(config.renderer, RendererKind::Table);
        assert_eq!(config.run_tests_param, "t");
        assert_eq!(config.run_only_param, "only");
    }

    #[test]
    fn test_builder_starts_from_defaults() {
        assert_eq!(HarnessConfig::builder().build(), HarnessConfig::default());
    }

    #[test]
    fn test_json_partial_takes_defaults() {
        let config = HarnessConfig::from_json_str(r#"{"renderer": "table"}"#).unwrap();
        assert_eq!(config.renderer, RendererKind::Table);
        assert_eq!(config.run_tests_param, "run_tests");
        assert_eq!(config.run_only_param, "run_only");
    }

    #[test]
    fn test_json_empty_object_is_default() {
        let config = HarnessConfig::from_json_str("{}").unwrap();
        assert_eq!(config, HarnessConfig::default());
    }

    #[test]
    fn test_yaml_overrides() {
        let config = HarnessConfig::from_yaml_str("run_only_param: only\n").unwrap();
        assert_eq!(config.run_only_param, "only");
        assert_eq!(config.renderer, RendererKind::Console);
    }

    #[test]
    fn test_unknown_renderer_rejected() {
        let err = HarnessConfig::from_json_str(r#"{"renderer": "pdf"}"#).unwrap_err();
        assert!(matches!(err, PageTestError::Json(_)));
    }

    #[test]
    fn test_validate_empty_param() {
        let config = HarnessConfig::builder().run_tests_param("").build();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_same_params() {
        let config = HarnessConfig::builder()
            .run_tests_param("x")
            .run_only_param("x")
            .build();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("'x'"));
    }

    #[test]
    fn test_load_yaml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pagetest.yaml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "renderer: table\nrun_tests_param: selftest").unwrap();

        let config = HarnessConfig::load(&path).unwrap();
        assert_eq!(config.renderer, RendererKind::Table);
        assert_eq!(config.run_tests_param, "selftest");
    }

    #[test]
    fn test_load_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pagetest.toml");
        std::fs::write(&path, "renderer = 'table'").unwrap();
        let err = HarnessConfig::load(&path).unwrap_err();
        assert!(matches!(err, PageTestError::Config { .. }));
    }

    #[test]
    fn test_serialization_roundtrip() {
        let config = HarnessConfig::builder().renderer(RendererKind::Table).build();
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"table\""));
        assert_eq!(HarnessConfig::from_json_str(&json).unwrap(), config);
    }
}
