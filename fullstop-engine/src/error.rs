//! Engine error types

use fullstop_core::CoreError;
use fullstop_rules::RulesError;
use thiserror::Error;

/// Errors surfaced by the segmentation engine
#[derive(Error, Debug)]
pub enum EngineError {
    /// Unknown language code in strict mode
    #[error("language '{code}' not supported")]
    UnknownLanguage {
        /// The normalized code that failed to resolve
        code: String,
    },

    /// Byte input that is not valid UTF-8
    #[error("invalid UTF-8 at byte {position}")]
    MalformedEncoding {
        /// Length of the longest valid prefix
        position: usize,
    },

    /// Rule table could not be loaded or validated
    #[error(transparent)]
    Rules(RulesError),

    /// Core algorithm error
    #[error(transparent)]
    Core(CoreError),

    /// Configuration error
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Batch thread pool could not be created
    #[cfg(feature = "parallel")]
    #[error("parallel execution failed: {0}")]
    Parallel(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[cfg(feature = "serde")]
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl From<RulesError> for EngineError {
    fn from(err: RulesError) -> Self {
        match err {
            RulesError::UnknownLanguage { code } => EngineError::UnknownLanguage { code },
            other => EngineError::Rules(other),
        }
    }
}

impl From<CoreError> for EngineError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::MalformedEncoding { position } => EngineError::MalformedEncoding { position },
            other => EngineError::Core(other),
        }
    }
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;
