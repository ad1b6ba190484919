//! Rule-driven sentence boundary detection
//!
//! This crate holds the segmentation algorithm, independent of where the
//! language rules come from:
//!
//! - [`LanguageProfile`]: immutable per-language rule record
//! - [`scan`]: lazy single-pass candidate boundary scanner
//! - [`classify`]: ordered accept/reject rules for one candidate
//! - [`assemble`]: accepted boundaries to trimmed, reconstructible sentences
//!
//! # Example
//!
//! ```rust
//! use fullstop_core::{split_sentences, LanguageProfile};
//!
//! let profile = LanguageProfile::builder("en")
//!     .terminators(['.', '!', '?'])
//!     .abbreviations(["Dr"])
//!     .build()
//!     .unwrap();
//!
//! let text = "Dr. Smith went home. He slept.";
//! let sentences = split_sentences(&profile, text);
//!
//! assert_eq!(sentences.len(), 2);
//! assert_eq!(sentences[0].text, "Dr. Smith went home.");
//! ```

pub mod assembler;
pub mod classifier;
pub mod enclosure;
pub mod error;
pub mod profile;
pub mod scanner;

pub use assembler::{assemble, reconstruct, Sentence};
pub use classifier::{classify, Decision, RejectReason};
pub use enclosure::{EnclosureInfo, EnclosurePair, EnclosureTable, MAX_ENCLOSURE_PAIRS};
pub use error::{decode_utf8, CoreError, Result};
pub use profile::{ContinuationRules, LanguageProfile, ProfileBuilder, TokenSet, FALLBACK_CODE};
pub use scanner::{scan, Candidate, CandidateKind, Scanner};

/// Scan, classify and assemble `text` under one profile
pub fn split_sentences<'a>(profile: &LanguageProfile, text: &'a str) -> Vec<Sentence<'a>> {
    if text.is_empty() {
        return Vec::new();
    }

    let boundaries = scan(text, profile).filter_map(|candidate| {
        match classify(&candidate, profile) {
            Decision::Accept => Some(candidate.position),
            Decision::Reject(reason) => {
                log::trace!(
                    "[{}] rejected {:?} at byte {}: {:?}",
                    profile.code(),
                    candidate.run,
                    candidate.start,
                    reason
                );
                None
            }
        }
    });

    assemble(text, boundaries)
}
