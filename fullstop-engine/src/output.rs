//! Output DTOs

use fullstop_core::Sentence;

/// One sentence with its offsets in the source text
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SentenceDTO {
    /// Trimmed sentence text
    pub text: String,
    /// Byte offset of the first char of `text`
    pub byte_start: usize,
    /// Byte offset one past the last char of `text`
    pub byte_end: usize,
    /// Char offset of the first char of `text`
    pub char_start: usize,
    /// Char offset one past the last char of `text`
    pub char_end: usize,
}

/// Processing metadata
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Metadata {
    /// Language code as requested
    pub language_requested: String,
    /// Code of the profile that was applied
    pub language_resolved: String,
    /// Whether the fallback profile was used
    pub fallback_used: bool,
    /// Total bytes processed
    pub total_bytes: usize,
    /// Total characters processed
    pub total_chars: usize,
    /// Processing time in milliseconds
    pub processing_time_ms: u64,
}

/// Complete output with sentences and metadata
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Output {
    /// Detected sentences, in input order
    pub sentences: Vec<SentenceDTO>,
    /// Processing metadata
    pub metadata: Metadata,
}

impl Output {
    /// Sentence texts only
    pub fn texts(&self) -> Vec<&str> {
        self.sentences.iter().map(|s| s.text.as_str()).collect()
    }

    /// Serialize as pretty JSON
    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Convert borrowed sentences to DTOs, counting chars in one pass over
/// `source`
pub(crate) fn sentence_dtos(source: &str, sentences: &[Sentence<'_>]) -> Vec<SentenceDTO> {
    let mut dtos = Vec::with_capacity(sentences.len());
    let mut byte_cursor = 0;
    let mut char_cursor = 0;

    for sentence in sentences {
        let range = sentence.text_range();
        char_cursor += source[byte_cursor..range.start].chars().count();
        let char_start = char_cursor;
        char_cursor += sentence.text.chars().count();
        byte_cursor = range.end;

        dtos.push(SentenceDTO {
            text: sentence.text.to_string(),
            byte_start: range.start,
            byte_end: range.end,
            char_start,
            char_end: char_cursor,
        });
    }
    dtos
}
