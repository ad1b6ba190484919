//! Language rule tables for fullstop
//!
//! Every supported language is a TOML document embedded in the binary
//! (see `configs/languages/`). [`ProfileRepository`] parses a table on first
//! use, validates it into a [`fullstop_core::LanguageProfile`] and caches
//! the result behind an `Arc`.
//!
//! ```rust
//! use fullstop_rules::{ProfileRepository, RuleRepository};
//!
//! let repository = ProfileRepository::new();
//! let profile = repository.lookup("pa-IN").unwrap();
//! assert_eq!(profile.code(), "pa");
//! assert!(profile.is_terminator('।'));
//! ```

pub mod config;
mod embedded;
pub mod error;
pub mod repository;

pub use config::LanguageConfig;
pub use embedded::{normalize_code, resolution_chain};
pub use error::{Result, RulesError};
pub use repository::{ProfileRepository, RuleRepository};

/// Raw embedded TOML for a built-in language code
pub fn embedded_toml(code: &str) -> Option<&'static str> {
    embedded::embedded_config(&normalize_code(code))
}
