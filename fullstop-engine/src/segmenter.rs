//! Segmenter: language resolution plus the core pipeline

use crate::config::Config;
use crate::error::{EngineError, Result};
use crate::input::Input;
use crate::output::{sentence_dtos, Metadata, Output};
use fullstop_core::{decode_utf8, split_sentences, LanguageProfile, Sentence};
use fullstop_rules::{normalize_code, ProfileRepository, RuleRepository};
use std::sync::Arc;
use std::time::Instant;

/// A profile chosen for a requested code
#[derive(Debug, Clone)]
pub struct Resolved {
    /// Profile to segment with
    pub profile: Arc<LanguageProfile>,
    /// Whether `profile` is the fallback
    pub fallback_used: bool,
}

/// Main entry point for sentence segmentation
///
/// A `Segmenter` is `Send + Sync`; one instance can serve any number of
/// threads, and profiles are built once per code and then shared.
pub struct Segmenter {
    repository: Arc<dyn RuleRepository>,
    fallback: Arc<LanguageProfile>,
    config: Config,
    #[cfg(feature = "parallel")]
    pool: Option<rayon::ThreadPool>,
}

impl std::fmt::Debug for Segmenter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Segmenter")
            .field("config", &self.config)
            .field("languages", &self.repository.available_languages().len())
            .finish()
    }
}

impl Default for Segmenter {
    fn default() -> Self {
        Self::new()
    }
}

impl Segmenter {
    /// Segmenter over the embedded tables with default configuration
    pub fn new() -> Self {
        Self::from_parts(Arc::new(ProfileRepository::new()), Config::default())
    }

    /// Segmenter with a specific default language
    pub fn with_language(code: &str) -> Result<Self> {
        Self::with_config(Config::builder().language(code).build()?)
    }

    /// Create a segmenter, registering `config.language_files` first
    pub fn with_config(config: Config) -> Result<Self> {
        let mut repository = ProfileRepository::new();
        for path in &config.language_files {
            repository.register_file(path)?;
        }
        Self::with_repository(Arc::new(repository), config)
    }

    /// Segmenter over a caller-supplied repository
    pub fn with_repository(repository: Arc<dyn RuleRepository>, config: Config) -> Result<Self> {
        #[cfg(feature = "parallel")]
        let pool = match config.threads {
            Some(threads) => Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build()
                    .map_err(|e| EngineError::Parallel(e.to_string()))?,
            ),
            None => None,
        };

        let segmenter = Self::from_parts(repository, config);
        #[cfg(feature = "parallel")]
        let segmenter = Self { pool, ..segmenter };
        Ok(segmenter)
    }

    fn from_parts(repository: Arc<dyn RuleRepository>, config: Config) -> Self {
        Self {
            repository,
            fallback: Arc::new(LanguageProfile::fallback()),
            config,
            #[cfg(feature = "parallel")]
            pool: None,
        }
    }

    /// Active configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run `op` inside the configured worker pool, or on the current
    /// thread when no thread count was set. Rayon work started by `op`
    /// stays on that pool.
    #[cfg(feature = "parallel")]
    pub fn install<R, OP>(&self, op: OP) -> R
    where
        R: Send,
        OP: FnOnce() -> R + Send,
    {
        match &self.pool {
            Some(pool) => pool.install(op),
            None => op(),
        }
    }

    /// Codes the underlying repository resolves directly
    pub fn available_languages(&self) -> Vec<String> {
        self.repository.available_languages()
    }

    /// Resolve `code`, honoring the configured strictness
    pub fn resolve(&self, code: &str) -> Result<Resolved> {
        if self.config.strict {
            return self.resolve_strict(code);
        }
        Ok(self.resolve_or_fallback(code))
    }

    /// Resolve `code`, failing with [`EngineError::UnknownLanguage`] when
    /// no table matches
    pub fn resolve_strict(&self, code: &str) -> Result<Resolved> {
        let profile = self.repository.lookup(code)?;
        Ok(Resolved {
            profile,
            fallback_used: false,
        })
    }

    /// Resolve `code`, substituting the fallback profile on any failure
    pub fn resolve_or_fallback(&self, code: &str) -> Resolved {
        match self.repository.lookup(code) {
            Ok(profile) => Resolved {
                profile,
                fallback_used: false,
            },
            Err(err) => {
                if err.is_unknown_language() {
                    log::debug!("no rules for '{}', using fallback profile", normalize_code(code));
                } else {
                    log::warn!("rules for '{code}' unusable, using fallback profile: {err}");
                }
                Resolved {
                    profile: Arc::clone(&self.fallback),
                    fallback_used: true,
                }
            }
        }
    }

    /// Split `text` into trimmed sentence strings
    pub fn segment(&self, code: &str, text: &str) -> Result<Vec<String>> {
        Ok(self
            .segment_spans(code, text)?
            .into_iter()
            .map(|s| s.text.to_string())
            .collect())
    }

    /// Split `text` into borrowed sentences with their spans
    pub fn segment_spans<'a>(&self, code: &str, text: &'a str) -> Result<Vec<Sentence<'a>>> {
        let resolved = self.resolve(code)?;
        Ok(split_sentences(&resolved.profile, text))
    }

    /// Validate `bytes` as UTF-8, then segment
    pub fn segment_bytes(&self, code: &str, bytes: &[u8]) -> Result<Vec<String>> {
        let text = decode_utf8(bytes)?;
        self.segment(code, text)
    }

    /// Process an input in the configured default language
    pub fn process(&self, input: Input) -> Result<Output> {
        let code = self.config.language.clone();
        self.process_with_language(input, &code)
    }

    /// Process an input in a specific language
    pub fn process_with_language(&self, input: Input, code: &str) -> Result<Output> {
        let start = Instant::now();
        let resolved = self.resolve(code)?;
        let text = input.read_text()?;

        let sentences = split_sentences(&resolved.profile, &text);
        Ok(build_output(code, &resolved, &text, &sentences, start))
    }

    /// Process an input treating every line as an independent document;
    /// offsets stay relative to the whole input
    pub fn process_lines(&self, input: Input, code: &str) -> Result<Output> {
        let start = Instant::now();
        let resolved = self.resolve(code)?;
        let text = input.read_text()?;
        let profile = resolved.profile.as_ref();

        let lines: Vec<(usize, &str)> = text
            .split_inclusive('\n')
            .scan(0, |offset, line| {
                let line_start = *offset;
                *offset += line.len();
                Some((line_start, line))
            })
            .collect();

        let sentences: Vec<Sentence<'_>> = self
            .map_batch(&lines, |&(offset, line)| split_line(profile, offset, line))
            .into_iter()
            .flatten()
            .collect();
        Ok(build_output(code, &resolved, &text, &sentences, start))
    }

    /// Segment many independent texts under one language, preserving
    /// input order in the result
    pub fn segment_batch<S>(&self, code: &str, texts: &[S]) -> Result<Vec<Vec<String>>>
    where
        S: AsRef<str> + Sync,
    {
        let resolved = self.resolve(code)?;
        let profile = resolved.profile.as_ref();
        Ok(self.map_batch(texts, |text| {
            split_sentences(profile, text.as_ref())
                .into_iter()
                .map(|s| s.text.to_string())
                .collect::<Vec<_>>()
        }))
    }

    fn map_batch<T, R, F>(&self, items: &[T], f: F) -> Vec<R>
    where
        T: Sync,
        R: Send,
        F: Fn(&T) -> R + Sync + Send,
    {
        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            if items.len() > 1 {
                let run = || items.par_iter().map(&f).collect::<Vec<R>>();
                return match &self.pool {
                    Some(pool) => pool.install(run),
                    None => run(),
                };
            }
        }

        items.iter().map(f).collect()
    }
}

fn split_line<'a>(profile: &LanguageProfile, offset: usize, line: &'a str) -> Vec<Sentence<'a>> {
    split_sentences(profile, line)
        .into_iter()
        .map(|s| Sentence {
            start: s.start + offset,
            end: s.end + offset,
            text_start: s.text_start + offset,
            text: s.text,
        })
        .collect()
}

fn build_output(
    code: &str,
    resolved: &Resolved,
    text: &str,
    sentences: &[Sentence<'_>],
    start: Instant,
) -> Output {
    let metadata = Metadata {
        language_requested: code.to_string(),
        language_resolved: resolved.profile.code().to_string(),
        fallback_used: resolved.fallback_used,
        total_bytes: text.len(),
        total_chars: text.chars().count(),
        processing_time_ms: start.elapsed().as_millis() as u64,
    };

    Output {
        sentences: sentence_dtos(text, sentences),
        metadata,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_english() {
        let segmenter = Segmenter::new();
        assert_eq!(
            segmenter.segment("en", "Dr. Smith went home.").unwrap(),
            vec!["Dr. Smith went home."]
        );
        assert_eq!(
            segmenter.segment("en", "Pi is 3.14 approximately.").unwrap(),
            vec!["Pi is 3.14 approximately."]
        );
    }

    #[test]
    fn test_unknown_language_falls_back() {
        let segmenter = Segmenter::new();
        let resolved = segmenter.resolve("zz").unwrap();
        assert!(resolved.fallback_used);
        assert!(resolved.profile.is_fallback());
        assert_eq!(
            segmenter.segment("zz", "Hello. World.").unwrap(),
            vec!["Hello.", "World."]
        );
    }

    #[test]
    fn test_strict_rejects_unknown_language() {
        let config = Config::builder().strict(true).build().unwrap();
        let segmenter = Segmenter::with_config(config).unwrap();
        match segmenter.segment("zz", "Hello. World.") {
            Err(EngineError::UnknownLanguage { code }) => assert_eq!(code, "zz"),
            other => panic!("expected UnknownLanguage, got {other:?}"),
        }
        assert!(segmenter.segment("pa-IN", "ਹੈ। ਸੀ।").is_ok());
    }

    #[test]
    fn test_segment_bytes_malformed() {
        let segmenter = Segmenter::new();
        let mut bytes = "Hello. ".as_bytes().to_vec();
        bytes.push(0xC3);
        match segmenter.segment_bytes("en", &bytes) {
            Err(EngineError::MalformedEncoding { position }) => assert_eq!(position, 7),
            other => panic!("expected MalformedEncoding, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_input() {
        let segmenter = Segmenter::new();
        assert!(segmenter.segment("en", "").unwrap().is_empty());
        assert!(segmenter.segment_bytes("en", b"").unwrap().is_empty());
    }

    #[test]
    fn test_process_metadata() {
        let segmenter = Segmenter::with_language("ur").unwrap();
        let output = segmenter
            .process(Input::from_text("هذا هو د. سالم. ماذا تقدمون؟"))
            .unwrap();
        assert_eq!(output.metadata.language_requested, "ur");
        assert_eq!(output.metadata.language_resolved, "ar");
        assert!(!output.metadata.fallback_used);
        assert_eq!(output.sentences.len(), 2);
    }

    #[test]
    fn test_segment_batch_preserves_order() {
        let segmenter = Segmenter::new();
        let texts = vec!["One. Two.", "", "Three!", "Four? Five."];
        let batches = segmenter.segment_batch("en", &texts).unwrap();
        assert_eq!(
            batches,
            vec![
                vec!["One.".to_string(), "Two.".to_string()],
                vec![],
                vec!["Three!".to_string()],
                vec!["Four?".to_string(), "Five.".to_string()],
            ]
        );
    }

    #[test]
    fn test_process_lines_forces_line_boundaries() {
        let segmenter = Segmenter::new();
        let text = "first line without stop\nsecond. third\n\nlast";
        let output = segmenter
            .process_lines(Input::from_text(text), "en")
            .unwrap();

        assert_eq!(
            output.texts(),
            vec!["first line without stop", "second.", "third", "last"]
        );
        for sentence in &output.sentences {
            assert_eq!(&text[sentence.byte_start..sentence.byte_end], sentence.text);
        }
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_install_uses_configured_pool() {
        let config = Config::builder().threads(Some(1)).build().unwrap();
        let segmenter = Segmenter::with_config(config).unwrap();
        assert_eq!(segmenter.install(rayon::current_num_threads), 1);

        let nested = segmenter
            .install(|| segmenter.segment_batch("en", &["One. Two.", "Three."]))
            .unwrap();
        assert_eq!(nested, vec![vec!["One.", "Two."], vec!["Three."]]);
    }

    #[test]
    fn test_segmenter_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Segmenter>();
    }
}
