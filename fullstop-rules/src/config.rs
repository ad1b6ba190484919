//! TOML language configuration
//!
//! One document per language. Only `[metadata]` and `[terminators]` are
//! required; every other section falls back to the defaults below.

use crate::error::{Result, RulesError};
use fullstop_core::{ContinuationRules, EnclosurePair, LanguageProfile};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageConfig {
    pub metadata: MetadataConfig,
    pub terminators: TerminatorConfig,
    #[serde(default)]
    pub enclosures: EnclosureConfig,
    #[serde(default)]
    pub abbreviations: AbbreviationConfig,
    #[serde(default)]
    pub prefixes: PrefixConfig,
    #[serde(default)]
    pub exclamations: ExclamationConfig,
    #[serde(default)]
    pub numbers: NumberConfig,
    #[serde(default)]
    pub continuation: ContinuationConfig,
    #[serde(default)]
    pub paragraphs: ParagraphConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetadataConfig {
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerminatorConfig {
    pub chars: Vec<char>,
    /// Terminators that end a sentence without following whitespace
    #[serde(default)]
    pub unspaced: Vec<char>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnclosureConfig {
    #[serde(default)]
    pub pairs: Vec<EnclosurePairConfig>,
    #[serde(default)]
    pub split_inside: bool,
    #[serde(default)]
    pub absorb_closing: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnclosurePairConfig {
    pub open: char,
    pub close: char,
    #[serde(default)]
    pub symmetric: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbbreviationConfig {
    #[serde(default = "default_marker")]
    pub marker: char,
    #[serde(flatten)]
    pub categories: BTreeMap<String, Vec<String>>,
}

impl Default for AbbreviationConfig {
    fn default() -> Self {
        Self {
            marker: default_marker(),
            categories: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PrefixConfig {
    #[serde(default)]
    pub non_breaking: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExclamationConfig {
    #[serde(default)]
    pub words: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NumberConfig {
    #[serde(default = "default_true")]
    pub decimal_separator_exempt: bool,
}

impl Default for NumberConfig {
    fn default() -> Self {
        Self {
            decimal_separator_exempt: true,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContinuationConfig {
    #[serde(default)]
    pub lowercase: bool,
    #[serde(default)]
    pub digit: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default)]
    pub words: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParagraphConfig {
    #[serde(default = "default_true")]
    pub break_on_blank_line: bool,
}

impl Default for ParagraphConfig {
    fn default() -> Self {
        Self {
            break_on_blank_line: true,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_marker() -> char {
    '.'
}

impl LanguageConfig {
    /// Parse a TOML document; `source_name` is used in error messages
    pub fn from_toml_str(toml_content: &str, source_name: &str) -> Result<Self> {
        toml::from_str(toml_content).map_err(|e| RulesError::configuration(source_name, e))
    }

    /// Read and parse a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| RulesError::io(path, e))?;
        Self::from_toml_str(&content, &path.display().to_string())
    }

    /// Number of abbreviations over all categories
    pub fn abbreviation_count(&self) -> usize {
        self.abbreviations.categories.values().map(Vec::len).sum()
    }

    /// Build the profile, checking every invariant
    pub fn validate(&self) -> Result<()> {
        self.to_profile().map(|_| ())
    }

    /// Build an immutable [`LanguageProfile`] from this table
    pub fn to_profile(&self) -> Result<LanguageProfile> {
        let code = self.metadata.code.trim();
        if code.is_empty() {
            return Err(RulesError::invalid_rules(code, "metadata.code is empty"));
        }

        let mut continuation = ContinuationRules::new()
            .with_lowercase(self.continuation.lowercase)
            .with_digit(self.continuation.digit)
            .with_words(&self.continuation.words);
        if let Some(pattern) = &self.continuation.pattern {
            continuation = continuation.with_pattern(pattern).map_err(|e| {
                RulesError::invalid_rules(code, format!("continuation.pattern: {e}"))
            })?;
        }

        let pairs = self
            .enclosures
            .pairs
            .iter()
            .map(|pair| {
                if pair.symmetric || pair.open == pair.close {
                    EnclosurePair::symmetric(pair.open)
                } else {
                    EnclosurePair::new(pair.open, pair.close)
                }
            })
            .collect();

        let profile = LanguageProfile::builder(code)
            .name(self.metadata.name.clone())
            .terminators(self.terminators.chars.iter().copied())
            .unspaced_terminators(self.terminators.unspaced.iter().copied())
            .abbreviation_marker(self.abbreviations.marker)
            .abbreviations(self.abbreviations.categories.values().flatten())
            .non_breaking_prefixes(&self.prefixes.non_breaking)
            .exclamation_words(&self.exclamations.words)
            .enclosures(pairs)
            .split_inside_enclosures(self.enclosures.split_inside)
            .absorb_closing_enclosures(self.enclosures.absorb_closing)
            .decimal_separator_exempt(self.numbers.decimal_separator_exempt)
            .continuation(continuation)
            .paragraph_breaks(self.paragraphs.break_on_blank_line)
            .build()
            .map_err(|e| match e {
                fullstop_core::CoreError::InvalidProfile { reason, .. } => {
                    RulesError::invalid_rules(code, reason)
                }
                other => RulesError::invalid_rules(code, other),
            })?;

        Ok(profile)
    }
}
