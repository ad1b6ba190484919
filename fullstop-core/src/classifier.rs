//! Boundary classifier
//!
//! An ordered list of rules; the first rule that matches decides. The
//! classifier is a pure function of the candidate and the profile.

use crate::profile::LanguageProfile;
use crate::scanner::{Candidate, CandidateKind};

/// Why a candidate was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RejectReason {
    /// Inside an open quotation or bracket
    InsideEnclosure,
    /// Preceding token is a known abbreviation
    Abbreviation,
    /// Preceding token is a non-breaking prefix (initial, title)
    NonBreakingPrefix,
    /// Preceding token keeps its `!` ("Yahoo!")
    ExclamationWord,
    /// `.` between two digits
    DecimalNumber,
    /// Terminator directly followed by text, e.g. `example.com`
    Glued,
    /// Following word continues the sentence
    Continuation,
    /// Nothing follows the anchor but the candidate is not the last one.
    /// The built-in scanner never yields this combination (an anchor at the
    /// end of the text is always final); it guards hand-built candidates.
    DanglingTerminator,
}

/// Decision about a candidate boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Real sentence boundary
    Accept,
    /// Not a boundary
    Reject(RejectReason),
}

impl Decision {
    /// Whether the candidate was accepted
    pub fn is_accept(&self) -> bool {
        matches!(self, Decision::Accept)
    }
}

/// Classify one candidate
pub fn classify(candidate: &Candidate<'_>, profile: &LanguageProfile) -> Decision {
    if candidate.kind == CandidateKind::ParagraphBreak {
        return Decision::Accept;
    }

    if candidate.inside_bracket && !profile.split_inside_enclosures() {
        return Decision::Reject(RejectReason::InsideEnclosure);
    }

    if let Some(reason) = known_token(candidate, profile) {
        return Decision::Reject(reason);
    }

    if is_decimal(candidate, profile) {
        return Decision::Reject(RejectReason::DecimalNumber);
    }

    if candidate.glued
        && !candidate
            .run
            .chars()
            .any(|c| profile.is_unspaced_terminator(c))
    {
        return Decision::Reject(RejectReason::Glued);
    }

    if profile.continuation().matches(candidate.following_context) {
        return Decision::Reject(RejectReason::Continuation);
    }

    if candidate.following_context.is_empty() && !candidate.is_final {
        return Decision::Reject(RejectReason::DanglingTerminator);
    }

    Decision::Accept
}

fn known_token(candidate: &Candidate<'_>, profile: &LanguageProfile) -> Option<RejectReason> {
    let token = candidate
        .preceding_token
        .trim_start_matches(|c: char| !c.is_alphanumeric());
    if token.is_empty() {
        return None;
    }

    if candidate.run.starts_with(profile.abbreviation_marker()) {
        for form in lookup_forms(token) {
            if profile.abbreviations().contains(form) {
                return Some(RejectReason::Abbreviation);
            }
            if profile.is_non_breaking_prefix(form) {
                return Some(RejectReason::NonBreakingPrefix);
            }
        }
    }

    if candidate.run == "!" && profile.exclamation_words().contains(token) {
        return Some(RejectReason::ExclamationWord);
    }

    None
}

/// The token itself, the part after its last `.`, and the part after its
/// last apostrophe (`dell'Avv`).
fn lookup_forms(token: &str) -> impl Iterator<Item = &str> {
    let after_dot = token.rfind('.').map(|i| &token[i + 1..]);
    let after_apostrophe = token
        .rfind(['\'', '’'])
        .map(|i| &token[i + token[i..].chars().next().map_or(1, char::len_utf8)..]);

    std::iter::once(token)
        .chain(after_dot)
        .chain(after_apostrophe)
        .filter(|form| !form.is_empty())
}

fn is_decimal(candidate: &Candidate<'_>, profile: &LanguageProfile) -> bool {
    profile.decimal_separator_exempt()
        && candidate.terminator == '.'
        && candidate.run == "."
        && candidate.prev_char().is_some_and(char::is_numeric)
        && candidate.next_char.is_some_and(char::is_numeric)
}
