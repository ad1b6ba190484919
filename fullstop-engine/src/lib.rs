//! Sentence segmentation for many languages
//!
//! The engine ties the rule tables of `fullstop-rules` to the pipeline in
//! `fullstop-core`. Most callers need only [`segment`]:
//!
//! ```rust
//! let sentences = fullstop_engine::segment("en", "Dr. Smith went home. He slept.");
//! assert_eq!(sentences, vec!["Dr. Smith went home.", "He slept."]);
//!
//! // unknown codes fall back to a generic profile
//! assert_eq!(fullstop_engine::segment("zz", "Hello. World.").len(), 2);
//! ```
//!
//! For configuration (strict resolution, external language files, batch
//! thread count) build a [`Segmenter`] from a [`Config`].

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod segmenter;

pub use config::{Config, ConfigBuilder, DEFAULT_LANGUAGE};
pub use error::{EngineError, Result};
pub use fullstop_core::Sentence;
pub use input::Input;
pub use output::{Metadata, Output, SentenceDTO};
pub use segmenter::{Resolved, Segmenter};

use std::sync::OnceLock;

static DEFAULT_SEGMENTER: OnceLock<Segmenter> = OnceLock::new();

/// Process-wide segmenter over the embedded tables
pub fn default_segmenter() -> &'static Segmenter {
    DEFAULT_SEGMENTER.get_or_init(Segmenter::new)
}

/// Split `text` into sentences, falling back to the generic profile for
/// unknown language codes
pub fn segment(language_code: &str, text: &str) -> Vec<String> {
    let resolved = default_segmenter().resolve_or_fallback(language_code);
    fullstop_core::split_sentences(&resolved.profile, text)
        .into_iter()
        .map(|s| s.text.to_string())
        .collect()
}

/// Like [`segment`], but unknown language codes are an error
pub fn segment_strict(language_code: &str, text: &str) -> Result<Vec<String>> {
    let resolved = default_segmenter().resolve_strict(language_code)?;
    Ok(fullstop_core::split_sentences(&resolved.profile, text)
        .into_iter()
        .map(|s| s.text.to_string())
        .collect())
}

/// Validate `bytes` as UTF-8, then [`segment`]
pub fn segment_bytes(language_code: &str, bytes: &[u8]) -> Result<Vec<String>> {
    let text = fullstop_core::decode_utf8(bytes)?;
    Ok(segment(language_code, text))
}
