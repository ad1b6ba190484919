//! List command implementation

use anyhow::Result;
use fullstop_rules::{ProfileRepository, RuleRepository};

use super::process::OutputFormat;

/// Print every built-in language as `code  name`
pub fn languages() -> Result<()> {
    let repository = ProfileRepository::new();
    let codes = repository.available_languages();

    println!("Available languages:");
    for code in &codes {
        let profile = repository.lookup(code)?;
        println!("  {:<4} {}", code, profile.name());
    }
    println!();
    println!("Unknown codes fall back to generic rules; use --strict to reject them.");
    Ok(())
}

/// Print the supported output formats
pub fn formats() -> Result<()> {
    println!("Available formats:");
    for format in OutputFormat::ALL {
        println!("  {:<9} {}", format.name(), format.description());
    }
    Ok(())
}
