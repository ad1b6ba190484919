//! Rule repository errors

use fullstop_core::CoreError;
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading or resolving language rules
#[derive(Error, Debug)]
pub enum RulesError {
    /// No profile (and no related fallback language) for the code
    #[error("language '{code}' not supported")]
    UnknownLanguage {
        /// The normalized code that was requested
        code: String,
    },

    /// A TOML document could not be read or parsed
    #[error("configuration error in {source_name}: {message}")]
    Configuration {
        /// File path or embedded config name
        source_name: String,
        /// Parser or I/O message
        message: String,
    },

    /// A parsed rule table violates a profile invariant
    #[error("invalid rules for '{code}': {reason}")]
    InvalidRules {
        /// Language code of the table
        code: String,
        /// What is wrong with it
        reason: String,
    },
}

impl RulesError {
    pub(crate) fn configuration(source_name: impl Into<String>, message: impl ToString) -> Self {
        RulesError::Configuration {
            source_name: source_name.into(),
            message: message.to_string(),
        }
    }

    pub(crate) fn io(path: &Path, err: std::io::Error) -> Self {
        RulesError::configuration(path.display().to_string(), err)
    }

    pub(crate) fn invalid_rules(code: &str, reason: impl ToString) -> Self {
        RulesError::InvalidRules {
            code: code.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Whether this is an unknown-language miss rather than a broken table
    pub fn is_unknown_language(&self) -> bool {
        matches!(self, RulesError::UnknownLanguage { .. })
    }
}

impl From<CoreError> for RulesError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidProfile { code, reason } => RulesError::InvalidRules { code, reason },
            other => RulesError::InvalidRules {
                code: String::new(),
                reason: other.to_string(),
            },
        }
    }
}

/// Result type for rule operations
pub type Result<T> = std::result::Result<T, RulesError>;
