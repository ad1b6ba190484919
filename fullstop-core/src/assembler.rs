//! Sentence assembly
//!
//! Turns accepted boundary offsets into [`Sentence`]s. Spans are contiguous
//! and untrimmed, so concatenating `text[start..end]` over all sentences
//! reproduces the input; `text` is the whitespace-trimmed content.

use std::ops::Range;

/// One sentence of the input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sentence<'a> {
    /// Byte offset where the untrimmed span starts
    pub start: usize,
    /// Byte offset where the untrimmed span ends
    pub end: usize,
    /// Byte offset of the first non-whitespace char
    pub text_start: usize,
    /// Trimmed sentence text
    pub text: &'a str,
}

impl<'a> Sentence<'a> {
    /// Untrimmed span
    pub fn span(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Span of the trimmed text
    pub fn text_range(&self) -> Range<usize> {
        self.text_start..self.text_start + self.text.len()
    }

    /// Whitespace before the text, within this span
    pub fn leading_whitespace<'s>(&self, source: &'s str) -> &'s str {
        &source[self.start..self.text_start]
    }

    /// Whitespace after the text, within this span
    pub fn trailing_whitespace<'s>(&self, source: &'s str) -> &'s str {
        &source[self.text_start + self.text.len()..self.end]
    }
}

/// Split `text` at `boundaries` (byte offsets, ascending). Offsets that do
/// not advance, or fall outside the text, are ignored.
pub fn assemble<'a, I>(text: &'a str, boundaries: I) -> Vec<Sentence<'a>>
where
    I: IntoIterator<Item = usize>,
{
    let mut sentences: Vec<Sentence<'a>> = Vec::new();
    let mut start = 0;

    for end in boundaries
        .into_iter()
        .filter(|b| *b <= text.len())
        .chain(std::iter::once(text.len()))
    {
        if end <= start {
            continue;
        }

        let span = &text[start..end];
        let trimmed = span.trim();
        if trimmed.is_empty() {
            // whitespace-only span: fold into the previous sentence, or
            // keep it as leading whitespace of the next one
            match sentences.last_mut() {
                Some(previous) => previous.end = end,
                None => continue,
            }
        } else {
            let text_start = start + (span.len() - span.trim_start().len());
            sentences.push(Sentence {
                start,
                end,
                text_start,
                text: trimmed,
            });
        }
        start = end;
    }

    sentences
}

/// Concatenate the untrimmed spans; equals the input for any result of
/// [`assemble`] over text that is not whitespace-only
pub fn reconstruct(source: &str, sentences: &[Sentence<'_>]) -> String {
    sentences
        .iter()
        .map(|sentence| &source[sentence.span()])
        .collect()
}
