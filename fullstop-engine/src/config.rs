//! Segmenter configuration

use crate::error::{EngineError, Result};
use std::path::PathBuf;

/// Language used when none is requested
pub const DEFAULT_LANGUAGE: &str = "en";

/// Configuration for a [`crate::Segmenter`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Default language code for `process`
    pub language: String,
    /// Fail on unknown codes instead of falling back
    pub strict: bool,
    /// External language TOML files registered before first use
    pub language_files: Vec<PathBuf>,
    /// Worker threads for batch work (`None` uses the global rayon pool)
    pub threads: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            strict: false,
            language_files: Vec::new(),
            threads: None,
        }
    }
}

impl Config {
    /// Create a builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Configuration builder
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the default language
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.config.language = language.into();
        self
    }

    /// Enable or disable strict language resolution
    pub fn strict(mut self, strict: bool) -> Self {
        self.config.strict = strict;
        self
    }

    /// Register an external language file
    pub fn language_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.language_files.push(path.into());
        self
    }

    /// Set thread count for batch segmentation
    pub fn threads(mut self, threads: Option<usize>) -> Self {
        self.config.threads = threads;
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<Config> {
        if self.config.language.trim().is_empty() {
            return Err(EngineError::Config("language code required".to_string()));
        }
        if self.config.threads == Some(0) {
            return Err(EngineError::Config(
                "thread count must be at least 1".to_string(),
            ));
        }

        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.language, "en");
        assert!(!config.strict);
        assert!(config.language_files.is_empty());
        assert_eq!(config.threads, None);
    }

    #[test]
    fn test_builder() {
        let config = Config::builder()
            .language("pa")
            .strict(true)
            .language_file("rules/klingon.toml")
            .threads(Some(2))
            .build()
            .unwrap();
        assert_eq!(config.language, "pa");
        assert!(config.strict);
        assert_eq!(config.language_files, vec![PathBuf::from("rules/klingon.toml")]);
        assert_eq!(config.threads, Some(2));
    }

    #[test]
    fn test_builder_rejects_empty_language() {
        assert!(matches!(
            Config::builder().language("  ").build(),
            Err(EngineError::Config(_))
        ));
    }

    #[test]
    fn test_builder_rejects_zero_threads() {
        assert!(Config::builder().threads(Some(0)).build().is_err());
    }
}
