//! Engine configuration.
//!
//! Options are plain serde structs with builder-style setters and can be
//! loaded from YAML.
use crate::common::{Error, Result};
use crate::style::ResolutionStrategy;
use serde::{Deserialize, Serialize};

/// Highest heading level recognized from a `headingN` style by default.
pub const DEFAULT_MAX_HEADING_LEVEL: u8 = 6;

/// Options for document-structure analysis.
///
/// # Examples
///
/// ```rust
/// use docmodel::AnalyzerOptions;
///
/// let options = AnalyzerOptions::new()
///     .with_max_heading_level(3)
///     .with_bold_runs_are_headings(false);
/// assert_eq!(options.max_heading_level, 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerOptions {
    /// Largest N accepted from a `headingN` style; larger values fall back to 1
    pub max_heading_level: u8,
    /// Title of the section holding body text that precedes the first heading
    pub preamble_title: String,
    /// Whether a paragraph with a bold, non-blank run counts as a heading
    pub bold_runs_are_headings: bool,
    /// Title of the generated outline
    pub outline_title: String,
}

impl Default for AnalyzerOptions {
    fn default() -> Self {
        Self {
            max_heading_level: DEFAULT_MAX_HEADING_LEVEL,
            preamble_title: "Preamble".to_string(),
            bold_runs_are_headings: true,
            outline_title: "Document Outline".to_string(),
        }
    }
}

impl AnalyzerOptions {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the largest accepted heading level (clamped to 1..=9).
    #[inline]
    pub fn with_max_heading_level(mut self, level: u8) -> Self {
        self.max_heading_level = level.clamp(1, 9);
        self
    }

    #[inline]
    pub fn with_preamble_title(mut self, title: impl Into<String>) -> Self {
        self.preamble_title = title.into();
        self
    }

    #[inline]
    pub fn with_bold_runs_are_headings(mut self, enabled: bool) -> Self {
        self.bold_runs_are_headings = enabled;
        self
    }

    #[inline]
    pub fn with_outline_title(mut self, title: impl Into<String>) -> Self {
        self.outline_title = title.into();
        self
    }
}

/// Top-level configuration.
///
/// # Examples
///
/// ```rust
/// use docmodel::{EngineConfig, ResolutionStrategy};
///
/// let config = EngineConfig::from_yaml_str(
///     "resolution_strategy: keep_original\nanalyzer:\n  max_heading_level: 4\n",
/// )?;
/// assert_eq!(config.resolution_strategy, ResolutionStrategy::KeepOriginal);
/// assert_eq!(config.analyzer.max_heading_level, 4);
/// assert!(config.analyzer.bold_runs_are_headings);
/// # Ok::<(), docmodel::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Strategy applied when a style id is registered twice
    pub resolution_strategy: ResolutionStrategy,
    pub analyzer: AnalyzerOptions,
}

impl EngineConfig {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_resolution_strategy(mut self, strategy: ResolutionStrategy) -> Self {
        self.resolution_strategy = strategy;
        self
    }

    #[inline]
    pub fn with_analyzer(mut self, analyzer: AnalyzerOptions) -> Self {
        self.analyzer = analyzer;
        self
    }

    /// Parse a configuration from YAML; missing keys take their defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_saphyr::from_str(yaml)
            .map_err(|e| Error::Config(format!("Failed to parse configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration to YAML.
    pub fn to_yaml_string(&self) -> Result<String> {
        serde_saphyr::to_string(self)
            .map_err(|e| Error::Config(format!("Failed to serialize configuration: {}", e)))
    }

    fn validate(&self) -> Result<()> {
        if !(1..=9).contains(&self.analyzer.max_heading_level) {
            return Err(Error::Config(format!(
                "max_heading_level must be between 1 and 9, got {}",
                self.analyzer.max_heading_level
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.resolution_strategy, ResolutionStrategy::Merge);
        assert_eq!(config.analyzer.max_heading_level, DEFAULT_MAX_HEADING_LEVEL);
        assert!(config.analyzer.bold_runs_are_headings);
    }

    #[test]
    fn test_yaml_round_trip() {
        let config = EngineConfig::new()
            .with_resolution_strategy(ResolutionStrategy::UserChoice)
            .with_analyzer(AnalyzerOptions::new().with_preamble_title("Front matter"));

        let yaml = config.to_yaml_string().unwrap();
        assert_eq!(EngineConfig::from_yaml_str(&yaml).unwrap(), config);
    }

    #[test]
    fn test_invalid_yaml() {
        let err = EngineConfig::from_yaml_str("resolution_strategy: sometimes\n").unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        let err = EngineConfig::from_yaml_str("analyzer:\n  max_heading_level: 0\n").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_builder_clamps_level() {
        assert_eq!(AnalyzerOptions::new().with_max_heading_level(42).max_heading_level, 9);
        assert_eq!(AnalyzerOptions::new().with_max_heading_level(0).max_heading_level, 1);
    }
}
