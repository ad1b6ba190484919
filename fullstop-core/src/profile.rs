//! Language profiles
//!
//! A [`LanguageProfile`] is the immutable rule record for one language code.
//! Every language is expressed as data; the scanner and classifier are shared.

use crate::enclosure::{EnclosurePair, EnclosureTable};
use crate::error::{CoreError, Result};
use regex::Regex;
use std::collections::HashSet;

/// Code of the built-in fallback profile (ISO 639 "undetermined")
pub const FALLBACK_CODE: &str = "und";

/// Set of tokens (abbreviations, prefixes, exclamation words)
///
/// Entries are stored as written. A query matches when the token as
/// written, with its first letter lowercased, fully lowercased or fully
/// uppercased equals a stored entry. A listed `etc` covers `Etc` and
/// `ETC`; a listed `No` does not cover the word `no`.
#[derive(Debug, Clone, Default)]
pub struct TokenSet {
    entries: HashSet<String>,
}

impl TokenSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a token; a trailing `.` is not part of the stored form
    pub fn insert(&mut self, token: &str) {
        let token = token.trim().trim_end_matches('.');
        if !token.is_empty() {
            self.entries.insert(token.to_string());
        }
    }

    /// Membership test under the case forms described on [`TokenSet`]
    pub fn contains(&self, token: &str) -> bool {
        if self.entries.is_empty() || token.is_empty() {
            return false;
        }
        if self.entries.contains(token) {
            return true;
        }

        let mut chars = token.chars();
        let first_lowered: String = chars
            .next()
            .into_iter()
            .flat_map(char::to_lowercase)
            .chain(chars)
            .collect();

        [first_lowered, token.to_lowercase(), token.to_uppercase()]
            .iter()
            .any(|form| self.entries.contains(form))
    }

    /// Number of stored tokens
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for TokenSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = TokenSet::new();
        for token in iter {
            set.insert(token.as_ref());
        }
        set
    }
}

/// Rules deciding that the text after a terminator continues the sentence
#[derive(Debug, Clone, Default)]
pub struct ContinuationRules {
    lowercase: bool,
    digit: bool,
    pattern: Option<Regex>,
    words: HashSet<String>,
}

impl ContinuationRules {
    /// No rule configured; nothing continues a sentence
    pub fn new() -> Self {
        Self::default()
    }

    /// Next word starting with a lowercase letter continues the sentence
    pub fn with_lowercase(mut self, enabled: bool) -> Self {
        self.lowercase = enabled;
        self
    }

    /// Next word starting with a digit continues the sentence
    pub fn with_digit(mut self, enabled: bool) -> Self {
        self.digit = enabled;
        self
    }

    /// Set a regex matched against the text right after the terminator,
    /// whitespace included. Use `^\W*` to skip spaces and punctuation.
    pub fn with_pattern(mut self, pattern: &str) -> std::result::Result<Self, regex::Error> {
        self.pattern = Some(Regex::new(pattern)?);
        Ok(self)
    }

    /// Add words (compared case-insensitively) that continue a sentence
    pub fn with_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.words
            .extend(words.into_iter().map(|w| w.as_ref().to_lowercase()));
        self
    }

    /// Whether a lowercase next word continues the sentence
    pub fn lowercase(&self) -> bool {
        self.lowercase
    }

    /// Whether a next word starting with a digit continues the sentence
    pub fn digit(&self) -> bool {
        self.digit
    }

    /// Whether no rule is configured
    pub fn is_empty(&self) -> bool {
        !self.lowercase && !self.digit && self.pattern.is_none() && self.words.is_empty()
    }

    /// Whether `following_context` continues the current sentence
    pub fn matches(&self, following_context: &str) -> bool {
        if self.is_empty() {
            return false;
        }

        if let Some(pattern) = &self.pattern {
            if pattern.is_match(following_context) {
                return true;
            }
        }

        let word = following_context.trim_start_matches(|c: char| !c.is_alphanumeric());
        match word.chars().next() {
            Some(c) if self.lowercase && c.is_lowercase() => return true,
            Some(c) if self.digit && c.is_numeric() => return true,
            Some(_) => {}
            None => return false,
        }

        if self.words.is_empty() {
            return false;
        }
        let end = word
            .find(|c: char| !c.is_alphabetic())
            .unwrap_or(word.len());
        self.words.contains(&word[..end].to_lowercase())
    }
}

/// Immutable per-language rule set
#[derive(Debug, Clone)]
pub struct LanguageProfile {
    code: String,
    name: String,
    terminators: HashSet<char>,
    unspaced_terminators: HashSet<char>,
    abbreviation_marker: char,
    abbreviations: TokenSet,
    non_breaking_prefixes: TokenSet,
    exclamation_words: TokenSet,
    enclosures: EnclosureTable,
    decimal_separator_exempt: bool,
    split_inside_enclosures: bool,
    absorb_closing_enclosures: bool,
    continuation: ContinuationRules,
    paragraph_breaks: bool,
}

impl LanguageProfile {
    /// Start building a profile for `code`
    pub fn builder(code: impl Into<String>) -> ProfileBuilder {
        ProfileBuilder::new(code)
    }

    /// Generic Latin-style rules used for unrecognized language codes:
    /// terminators `. ! ?`, no abbreviation list, decimals protected.
    pub fn fallback() -> Self {
        Self::builder(FALLBACK_CODE)
            .name("Generic")
            .terminators(['.', '!', '?'])
            .enclosures(vec![
                EnclosurePair::new('(', ')'),
                EnclosurePair::new('[', ']'),
                EnclosurePair::new('{', '}'),
                EnclosurePair::symmetric('"'),
            ])
            .build()
            .expect("fallback profile is statically valid")
    }

    /// Normalized language code
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Human readable language name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this is the built-in fallback profile
    pub fn is_fallback(&self) -> bool {
        self.code == FALLBACK_CODE
    }

    /// Is `ch` a sentence terminator?
    #[inline]
    pub fn is_terminator(&self, ch: char) -> bool {
        self.terminators.contains(&ch)
    }

    /// Does `ch` end a sentence even without following whitespace?
    #[inline]
    pub fn is_unspaced_terminator(&self, ch: char) -> bool {
        self.unspaced_terminators.contains(&ch)
    }

    /// All terminators, sorted
    pub fn terminators(&self) -> Vec<char> {
        let mut chars: Vec<char> = self.terminators.iter().copied().collect();
        chars.sort_unstable();
        chars
    }

    /// Terminator run must start with this char for abbreviation checks
    pub fn abbreviation_marker(&self) -> char {
        self.abbreviation_marker
    }

    /// Known abbreviations
    pub fn abbreviations(&self) -> &TokenSet {
        &self.abbreviations
    }

    /// Tokens (initials, titles) that never end a sentence before a terminator
    pub fn is_non_breaking_prefix(&self, token: &str) -> bool {
        self.non_breaking_prefixes.contains(token)
    }

    /// Words that keep their `!` inside the sentence ("Yahoo!")
    pub fn exclamation_words(&self) -> &TokenSet {
        &self.exclamation_words
    }

    /// Enclosure table
    pub fn enclosures(&self) -> &EnclosureTable {
        &self.enclosures
    }

    /// `.` between digits is a decimal separator, not a boundary
    pub fn decimal_separator_exempt(&self) -> bool {
        self.decimal_separator_exempt
    }

    /// Terminators inside quotes/brackets still split
    pub fn split_inside_enclosures(&self) -> bool {
        self.split_inside_enclosures
    }

    /// Closing quotes/brackets right after a terminator stay with the sentence
    pub fn absorb_closing_enclosures(&self) -> bool {
        self.absorb_closing_enclosures
    }

    /// Continuation rules
    pub fn continuation(&self) -> &ContinuationRules {
        &self.continuation
    }

    /// Blank lines always separate sentences
    pub fn paragraph_breaks(&self) -> bool {
        self.paragraph_breaks
    }
}

/// Builder for [`LanguageProfile`]; validation happens in [`ProfileBuilder::build`]
#[derive(Debug, Clone)]
pub struct ProfileBuilder {
    code: String,
    name: Option<String>,
    terminators: HashSet<char>,
    unspaced_terminators: HashSet<char>,
    abbreviation_marker: char,
    abbreviations: TokenSet,
    non_breaking_prefixes: TokenSet,
    exclamation_words: TokenSet,
    enclosures: Vec<EnclosurePair>,
    decimal_separator_exempt: bool,
    split_inside_enclosures: bool,
    absorb_closing_enclosures: bool,
    continuation: ContinuationRules,
    paragraph_breaks: bool,
}

impl ProfileBuilder {
    fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: None,
            terminators: HashSet::new(),
            unspaced_terminators: HashSet::new(),
            abbreviation_marker: '.',
            abbreviations: TokenSet::new(),
            non_breaking_prefixes: TokenSet::new(),
            exclamation_words: TokenSet::new(),
            enclosures: Vec::new(),
            decimal_separator_exempt: true,
            split_inside_enclosures: false,
            absorb_closing_enclosures: false,
            continuation: ContinuationRules::default(),
            paragraph_breaks: true,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn terminators(mut self, chars: impl IntoIterator<Item = char>) -> Self {
        self.terminators.extend(chars);
        self
    }

    pub fn unspaced_terminators(mut self, chars: impl IntoIterator<Item = char>) -> Self {
        self.unspaced_terminators.extend(chars);
        self
    }

    pub fn abbreviation_marker(mut self, marker: char) -> Self {
        self.abbreviation_marker = marker;
        self
    }

    pub fn abbreviations<I, S>(mut self, abbreviations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for abbreviation in abbreviations {
            self.abbreviations.insert(abbreviation.as_ref());
        }
        self
    }

    pub fn non_breaking_prefixes<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for prefix in prefixes {
            self.non_breaking_prefixes.insert(prefix.as_ref());
        }
        self
    }

    pub fn exclamation_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for word in words {
            self.exclamation_words
                .insert(word.as_ref().trim_end_matches('!'));
        }
        self
    }

    pub fn enclosures(mut self, pairs: Vec<EnclosurePair>) -> Self {
        self.enclosures = pairs;
        self
    }

    pub fn decimal_separator_exempt(mut self, exempt: bool) -> Self {
        self.decimal_separator_exempt = exempt;
        self
    }

    pub fn split_inside_enclosures(mut self, split: bool) -> Self {
        self.split_inside_enclosures = split;
        self
    }

    pub fn absorb_closing_enclosures(mut self, absorb: bool) -> Self {
        self.absorb_closing_enclosures = absorb;
        self
    }

    pub fn continuation(mut self, rules: ContinuationRules) -> Self {
        self.continuation = rules;
        self
    }

    pub fn paragraph_breaks(mut self, enabled: bool) -> Self {
        self.paragraph_breaks = enabled;
        self
    }

    /// Validate and freeze the profile
    pub fn build(self) -> Result<LanguageProfile> {
        let code = self.code.trim().to_lowercase();
        if code.is_empty() {
            return Err(CoreError::invalid_profile(&self.code, "empty language code"));
        }
        if !code
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-')
        {
            return Err(CoreError::invalid_profile(
                &code,
                "code must contain only ASCII letters, digits and '-'",
            ));
        }
        if self.terminators.is_empty() {
            return Err(CoreError::invalid_profile(
                &code,
                "no terminator characters defined",
            ));
        }
        if let Some(ch) = self
            .unspaced_terminators
            .iter()
            .find(|c| !self.terminators.contains(*c))
        {
            return Err(CoreError::invalid_profile(
                &code,
                format!("unspaced terminator {ch:?} is not a terminator"),
            ));
        }
        if let Some(ch) = self.terminators.iter().find(|c| c.is_whitespace()) {
            return Err(CoreError::invalid_profile(
                &code,
                format!("whitespace {ch:?} cannot be a terminator"),
            ));
        }

        let enclosures = EnclosureTable::new(self.enclosures)?;
        if let Some(ch) = self.terminators.iter().find(|c| enclosures.contains(**c)) {
            return Err(CoreError::invalid_profile(
                &code,
                format!("{ch:?} is both a terminator and an enclosure"),
            ));
        }

        Ok(LanguageProfile {
            name: self.name.unwrap_or_else(|| code.clone()),
            code,
            terminators: self.terminators,
            unspaced_terminators: self.unspaced_terminators,
            abbreviation_marker: self.abbreviation_marker,
            abbreviations: self.abbreviations,
            non_breaking_prefixes: self.non_breaking_prefixes,
            exclamation_words: self.exclamation_words,
            enclosures,
            decimal_separator_exempt: self.decimal_separator_exempt,
            split_inside_enclosures: self.split_inside_enclosures,
            absorb_closing_enclosures: self.absorb_closing_enclosures,
            continuation: self.continuation,
            paragraph_breaks: self.paragraph_breaks,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_profile() {
        let profile = LanguageProfile::fallback();
        assert_eq!(profile.code(), FALLBACK_CODE);
        assert!(profile.is_fallback());
        assert_eq!(profile.terminators(), vec!['!', '.', '?']);
        assert!(profile.abbreviations().is_empty());
        assert!(profile.decimal_separator_exempt());
        assert!(profile.continuation().is_empty());
    }

    #[test]
    fn test_code_is_normalized() {
        let profile = LanguageProfile::builder(" PA ")
            .terminators(['।'])
            .build()
            .unwrap();
        assert_eq!(profile.code(), "pa");
        assert_eq!(profile.name(), "pa");
    }

    #[test]
    fn test_empty_terminators_rejected() {
        let err = LanguageProfile::builder("xx").build().unwrap_err();
        assert!(matches!(err, CoreError::InvalidProfile { .. }));
    }

    #[test]
    fn test_unspaced_must_be_terminator() {
        let err = LanguageProfile::builder("xx")
            .terminators(['.'])
            .unspaced_terminators(['。'])
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("not a terminator"));
    }

    #[test]
    fn test_terminator_enclosure_overlap_rejected() {
        let err = LanguageProfile::builder("xx")
            .terminators(['.', '"'])
            .enclosures(vec![EnclosurePair::symmetric('"')])
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("both a terminator and an enclosure"));
    }

    #[test]
    fn test_token_set_case_rules() {
        let set: TokenSet = ["Dr", "e.g.", "U.S", "No", "etc"].into_iter().collect();
        assert!(set.contains("Dr"));
        assert!(set.contains("e.g"));
        assert!(set.contains("E.g"));
        assert!(set.contains("U.S"));
        assert!(set.contains("u.s"));
        assert!(set.contains("Etc"));
        assert!(set.contains("ETC"));
        assert!(!set.contains("dr"));
        assert!(!set.contains("no"));
        assert!(!set.contains("Drs"));
        assert!(!set.contains(""));
    }

    #[test]
    fn test_non_breaking_prefixes_follow_case_rules() {
        let profile = LanguageProfile::builder("xx")
            .terminators(['.'])
            .non_breaking_prefixes(["A", "B.", "Prof"])
            .build()
            .unwrap();
        assert!(profile.is_non_breaking_prefix("A"));
        assert!(profile.is_non_breaking_prefix("B"));
        assert!(profile.is_non_breaking_prefix("a"));
        assert!(profile.is_non_breaking_prefix("PROF"));
        assert!(!profile.is_non_breaking_prefix("prof"));
        assert!(!profile.is_non_breaking_prefix("C"));
    }

    #[test]
    fn test_continuation_rules() {
        let rules = ContinuationRules::new()
            .with_lowercase(true)
            .with_digit(true)
            .with_words(["Februar"]);

        assert!(rules.lowercase());
        assert!(rules.digit());
        assert!(rules.matches(" world"));
        assert!(rules.matches(" \"quoted"));
        assert!(rules.matches(" 42 items"));
        assert!(rules.matches(" Februar 1879"));
        assert!(!rules.matches(" World"));
        assert!(!rules.matches(""));
        assert!(!ContinuationRules::new().matches(" world"));
    }

    #[test]
    fn test_continuation_pattern_sees_whitespace() {
        let glued_only = ContinuationRules::new()
            .with_pattern("^[0-9a-zа-я]")
            .unwrap();
        assert!(glued_only.matches("мир"));
        assert!(!glued_only.matches(" мир"));
        assert!(!glued_only.matches("Мир"));

        let skipping = ContinuationRules::new()
            .with_pattern(r"^\W*[0-9a-zа-я]")
            .unwrap();
        assert!(skipping.matches(" «мир"));
        assert!(!skipping.matches(" Мир"));
    }
}
