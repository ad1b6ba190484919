//! Candidate boundary scanner
//!
//! Walks the text once, left to right, and yields a [`Candidate`] for every
//! run of terminator characters (and for every blank-line paragraph break).
//! Enclosure depth is tracked per pair so that the classifier can tell
//! whether a terminator sits inside a quotation or parenthetical.

use crate::profile::LanguageProfile;
use smallvec::SmallVec;
use std::collections::HashSet;

/// Maximum bytes of preceding token / following word exposed to the classifier
pub const CONTEXT_WINDOW: usize = 64;

/// What produced a candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateKind {
    /// A run of terminator characters
    Terminator,
    /// Whitespace containing two or more line breaks
    ParagraphBreak,
}

/// A possible sentence boundary, not yet classified
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate<'a> {
    /// Candidate kind
    pub kind: CandidateKind,
    /// Byte offset of the first terminator char (or of the blank-line run)
    pub start: usize,
    /// Byte offset where the text would be split
    pub position: usize,
    /// First char of the run
    pub terminator: char,
    /// The coalesced terminator run (whitespace for paragraph breaks)
    pub run: &'a str,
    /// Non-whitespace run immediately before the terminator run
    pub preceding_token: &'a str,
    /// Whitespace after the anchor plus the next non-whitespace run
    pub following_context: &'a str,
    /// Char immediately after the run, before anything was absorbed
    pub next_char: Option<char>,
    /// Found while a quotation/bracket was open
    pub inside_bracket: bool,
    /// Anchor is directly followed by a non-whitespace char
    pub glued: bool,
    /// No terminator occurs after the anchor
    pub is_final: bool,
}

impl Candidate<'_> {
    /// Last char of the preceding token
    pub fn prev_char(&self) -> Option<char> {
        self.preceding_token.chars().next_back()
    }
}

/// Scan `text` for candidate boundaries under `profile`
pub fn scan<'a>(text: &'a str, profile: &'a LanguageProfile) -> Scanner<'a> {
    Scanner::new(text, profile)
}

/// Lazy iterator over candidate boundaries; re-create it to restart
#[derive(Debug)]
pub struct Scanner<'a> {
    text: &'a str,
    profile: &'a LanguageProfile,
    cursor: usize,
    depths: SmallVec<[usize; 8]>,
    matched_openers: HashSet<usize>,
    last_terminator: Option<usize>,
    token_start: usize,
    whitespace: Option<WhitespaceRun>,
}

#[derive(Debug, Clone, Copy)]
struct WhitespaceRun {
    start: usize,
    line_breaks: usize,
}

impl<'a> Scanner<'a> {
    /// Create a scanner positioned at the start of `text`
    pub fn new(text: &'a str, profile: &'a LanguageProfile) -> Self {
        let last_terminator = text
            .char_indices()
            .rev()
            .find(|(_, c)| profile.is_terminator(*c))
            .map(|(i, _)| i);

        Self {
            text,
            profile,
            cursor: 0,
            depths: SmallVec::from_elem(0, profile.enclosures().len()),
            matched_openers: matched_openers(text, profile),
            last_terminator,
            token_start: 0,
            whitespace: None,
        }
    }

    fn inside_enclosure(&self) -> bool {
        self.depths.iter().any(|depth| *depth > 0)
    }

    fn track_enclosure(&mut self, offset: usize, ch: char) {
        let Some(info) = self.profile.enclosures().get(ch) else {
            return;
        };
        let depth = &mut self.depths[info.type_id as usize];
        if info.delta > 0 || info.symmetric && self.matched_openers.contains(&offset) {
            if self.matched_openers.contains(&offset) {
                *depth += 1;
            }
        } else if *depth > 0 {
            *depth -= 1;
        }
    }

    /// Consume closing enclosure chars directly after `anchor`
    fn absorb_closers(&mut self, mut anchor: usize) -> usize {
        while let Some(ch) = self.text[anchor..].chars().next() {
            let Some(info) = self.profile.enclosures().get(ch) else {
                break;
            };
            let depth = &mut self.depths[info.type_id as usize];
            let closes = info.delta < 0 || info.symmetric && !self.matched_openers.contains(&anchor);
            if !closes || *depth == 0 {
                break;
            }
            *depth -= 1;
            anchor += ch.len_utf8();
        }
        anchor
    }

    fn terminator_candidate(&mut self, run_start: usize, first: char) -> Candidate<'a> {
        let text = self.text;
        let run_end = run_start
            + text[run_start..]
                .find(|c: char| !self.profile.is_terminator(c))
                .unwrap_or(text.len() - run_start);
        let next_char = text[run_end..].chars().next();

        let mut anchor = run_end;
        if self.profile.absorb_closing_enclosures() {
            anchor = self.absorb_closers(anchor);
        }
        anchor = absorb_citations(text, anchor);

        let candidate = Candidate {
            kind: CandidateKind::Terminator,
            start: run_start,
            position: anchor,
            terminator: first,
            run: &text[run_start..run_end],
            preceding_token: window_tail(text, self.token_start, run_start),
            following_context: following_context(text, anchor),
            next_char,
            inside_bracket: self.inside_enclosure(),
            glued: text[anchor..]
                .chars()
                .next()
                .is_some_and(|c| !c.is_whitespace()),
            is_final: self.last_terminator.map_or(true, |last| last < anchor),
        };

        self.cursor = anchor;
        candidate
    }

    fn paragraph_candidate(
        &mut self,
        run: WhitespaceRun,
        previous_token: usize,
        next_token: usize,
    ) -> Candidate<'a> {
        let text = self.text;
        self.depths.iter_mut().for_each(|depth| *depth = 0);
        Candidate {
            kind: CandidateKind::ParagraphBreak,
            start: run.start,
            position: run.start,
            terminator: '\n',
            run: &text[run.start..next_token],
            preceding_token: window_tail(text, previous_token, run.start),
            following_context: following_context(text, run.start),
            next_char: text[next_token..].chars().next(),
            inside_bracket: false,
            glued: false,
            is_final: self.last_terminator.map_or(true, |last| last < run.start),
        }
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = Candidate<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(ch) = self.text[self.cursor..].chars().next() {
            let offset = self.cursor;

            if ch.is_whitespace() {
                let run = self.whitespace.get_or_insert(WhitespaceRun {
                    start: offset,
                    line_breaks: 0,
                });
                run.line_breaks += line_break_weight(ch);
                self.cursor += ch.len_utf8();
                continue;
            }

            if let Some(run) = self.whitespace.take() {
                let previous_token = std::mem::replace(&mut self.token_start, offset);
                if self.profile.paragraph_breaks() && run.line_breaks >= 2 && run.start > 0 {
                    return Some(self.paragraph_candidate(run, previous_token, offset));
                }
            }

            if self.profile.is_terminator(ch) {
                return Some(self.terminator_candidate(offset, ch));
            }

            self.track_enclosure(offset, ch);
            self.cursor += ch.len_utf8();
        }
        None
    }
}

fn line_break_weight(ch: char) -> usize {
    match ch {
        '\n' | '\u{0B}' | '\u{0C}' | '\u{85}' | '\u{2028}' => 1,
        '\u{2029}' => 2,
        _ => 0,
    }
}

/// Byte offsets of opening enclosure chars that have a matching closer
/// before the paragraph ends. Unmatched openers are ignored by the scanner.
fn matched_openers(text: &str, profile: &LanguageProfile) -> HashSet<usize> {
    let enclosures = profile.enclosures();
    let mut matched = HashSet::new();
    if enclosures.is_empty() {
        return matched;
    }

    let mut stacks: Vec<Vec<usize>> = vec![Vec::new(); enclosures.len()];
    let mut line_breaks = 0;
    for (offset, ch) in text.char_indices() {
        if ch.is_whitespace() {
            line_breaks += line_break_weight(ch);
            continue;
        }
        if line_breaks >= 2 && profile.paragraph_breaks() {
            stacks.iter_mut().for_each(Vec::clear);
        }
        line_breaks = 0;

        let Some(info) = enclosures.get(ch) else {
            continue;
        };
        let stack = &mut stacks[info.type_id as usize];
        if info.delta > 0 || info.symmetric && stack.is_empty() {
            stack.push(offset);
        } else if let Some(opener) = stack.pop() {
            matched.insert(opener);
        }
    }
    matched
}

/// Extend `anchor` over numbered references such as `[7][8]`
fn absorb_citations(text: &str, mut anchor: usize) -> usize {
    loop {
        let rest = &text[anchor..];
        let Some(inner) = rest.strip_prefix('[') else {
            return anchor;
        };
        let digits = inner.len() - inner.trim_start_matches(|c: char| c.is_ascii_digit()).len();
        if digits == 0 || !inner[digits..].starts_with(']') {
            return anchor;
        }
        anchor += digits + 2;
    }
}

/// Whitespace after `anchor` plus the next non-whitespace run, bounded
fn following_context(text: &str, anchor: usize) -> &str {
    let rest = &text[anchor..];
    let word_start = rest.len() - rest.trim_start().len();
    let word = &rest[word_start..];
    let word_len = word
        .char_indices()
        .take_while(|(i, _)| *i < CONTEXT_WINDOW)
        .find(|(_, c)| c.is_whitespace())
        .map(|(i, _)| i)
        .unwrap_or_else(|| floor_char_boundary(word, CONTEXT_WINDOW));
    &rest[..word_start + word_len]
}

/// `text[start..end]` limited to its last `CONTEXT_WINDOW` bytes
fn window_tail(text: &str, start: usize, end: usize) -> &str {
    let start = start.min(end);
    if end - start <= CONTEXT_WINDOW {
        return &text[start..end];
    }
    let mut from = end - CONTEXT_WINDOW;
    while !text.is_char_boundary(from) {
        from += 1;
    }
    &text[from..end]
}

fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }
    let mut index = index;
    while !s.is_char_boundary(index) {
        index -= 1;
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enclosure::EnclosurePair;

    fn latin() -> LanguageProfile {
        LanguageProfile::fallback()
    }

    #[test]
    fn test_simple_candidates() {
        let profile = latin();
        let text = "Hello world. How are you? Fine!";
        let candidates: Vec<_> = scan(text, &profile).collect();

        assert_eq!(candidates.len(), 3);
        assert_eq!(candidates[0].position, 12);
        assert_eq!(candidates[0].preceding_token, "world");
        assert_eq!(candidates[0].following_context, " How");
        assert_eq!(candidates[1].terminator, '?');
        assert!(!candidates[1].is_final);
        assert!(candidates[2].is_final);
        assert_eq!(candidates[2].following_context, "");
    }

    #[test]
    fn test_terminator_runs_coalesce() {
        let profile = latin();
        let text = "Really?! Yes... ok";
        let candidates: Vec<_> = scan(text, &profile).collect();

        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].run, "?!");
        assert_eq!(candidates[0].position, 8);
        assert_eq!(candidates[1].run, "...");
        assert_eq!(candidates[1].position, 15);
    }

    #[test]
    fn test_preceding_token_spans_inner_dots() {
        let profile = latin();
        let text = "the U.S. government";
        let candidates: Vec<_> = scan(text, &profile).collect();

        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].preceding_token, "U");
        assert!(candidates[0].glued);
        assert_eq!(candidates[1].preceding_token, "U.S");
        assert!(!candidates[1].glued);
    }

    #[test]
    fn test_inside_bracket_tagging() {
        let profile = latin();
        let text = "He teaches (he worked. As an engineer.) at school.";
        let candidates: Vec<_> = scan(text, &profile).collect();

        assert_eq!(candidates.len(), 3);
        assert!(candidates[0].inside_bracket);
        assert!(candidates[1].inside_bracket);
        assert!(!candidates[2].inside_bracket);
    }

    #[test]
    fn test_deep_nesting_does_not_overflow() {
        let profile = latin();
        let depth = 70_000;
        let text = format!("Start {}x. y{} end.", "(".repeat(depth), ")".repeat(depth));
        let candidates: Vec<_> = scan(&text, &profile).collect();

        assert_eq!(candidates.len(), 2);
        assert!(candidates[0].inside_bracket);
        assert!(!candidates[1].inside_bracket);
        assert!(candidates[1].is_final);
    }

    #[test]
    fn test_unclosed_bracket_is_ignored() {
        let profile = latin();
        let text = "A stray ( here. Next one.";
        let candidates: Vec<_> = scan(text, &profile).collect();

        assert!(candidates.iter().all(|c| !c.inside_bracket));
    }

    #[test]
    fn test_symmetric_quotes_toggle() {
        let profile = latin();
        let text = "She said \"Stop. Now.\" Then left.";
        let candidates: Vec<_> = scan(text, &profile).collect();

        assert_eq!(candidates.len(), 3);
        assert!(candidates[0].inside_bracket);
        assert!(candidates[1].inside_bracket);
        assert!(candidates[1].glued);
        assert!(!candidates[2].inside_bracket);
    }

    #[test]
    fn test_absorb_closing_quote() {
        let profile = LanguageProfile::builder("xx")
            .terminators(['.'])
            .enclosures(vec![EnclosurePair::new('„', '“')])
            .absorb_closing_enclosures(true)
            .build()
            .unwrap();
        let text = "Er sagte „Halt.“ Dann ging er.";
        let candidates: Vec<_> = scan(text, &profile).collect();

        assert_eq!(candidates.len(), 2);
        assert_eq!(&text[..candidates[0].position], "Er sagte „Halt.“");
        assert!(!candidates[0].inside_bracket);
        assert!(!candidates[0].glued);
    }

    #[test]
    fn test_citations_absorbed() {
        let profile = latin();
        let text = "at large.[7][8] This was";
        let candidates: Vec<_> = scan(text, &profile).collect();

        assert_eq!(candidates.len(), 1);
        assert_eq!(&text[..candidates[0].position], "at large.[7][8]");
        assert!(!candidates[0].glued);
        assert!(!candidates[0].inside_bracket);
    }

    #[test]
    fn test_paragraph_break_candidate() {
        let profile = latin();
        let text = "First line\n\nSecond (open\n\nclosed) line";
        let candidates: Vec<_> = scan(text, &profile).collect();

        assert_eq!(candidates.len(), 2);
        assert!(candidates
            .iter()
            .all(|c| c.kind == CandidateKind::ParagraphBreak));
        assert_eq!(candidates[0].position, 10);
        assert_eq!(candidates[0].preceding_token, "line");
        assert_eq!(candidates[0].following_context, "\n\nSecond");
    }

    #[test]
    fn test_leading_blank_lines_yield_nothing() {
        let profile = latin();
        assert_eq!(scan("\n\n\nHello", &profile).count(), 0);
    }

    #[test]
    fn test_scan_is_restartable() {
        let profile = latin();
        let text = "One. Two. Three.";
        let first: Vec<_> = scan(text, &profile).collect();
        let second: Vec<_> = scan(text, &profile).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_context_window_is_bounded() {
        let profile = latin();
        let long = "x".repeat(500);
        let text = format!("{long}. {long}");
        let candidate = scan(&text, &profile).next().unwrap();

        assert_eq!(candidate.preceding_token.len(), CONTEXT_WINDOW);
        assert_eq!(candidate.following_context.len(), 1 + CONTEXT_WINDOW);
    }

    #[test]
    fn test_gurmukhi_danda() {
        let profile = LanguageProfile::builder("pa")
            .terminators(['।', '.', '?', '!'])
            .unspaced_terminators(['।'])
            .build()
            .unwrap();
        let text = "ਹੋਇਆ ਸੀ। ਉਸ ਦੇ ਪਿਤਾ";
        let candidates: Vec<_> = scan(text, &profile).collect();

        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].terminator, '।');
        assert_eq!(candidates[0].preceding_token, "ਸੀ");
        assert_eq!(candidates[0].following_context, " ਉਸ");
    }
}
