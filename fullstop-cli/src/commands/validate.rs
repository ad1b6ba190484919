//! Validate command implementation

use anyhow::Result;
use clap::Args;
use fullstop_rules::LanguageConfig;
use std::path::PathBuf;

/// Arguments for the validate command
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Path to language configuration file to validate
    #[arg(short = 'c', long, value_name = "FILE", required = true)]
    pub language_config: PathBuf,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> Result<()> {
        println!(
            "Validating language configuration: {}",
            self.language_config.display()
        );

        let checked =
            LanguageConfig::from_file(&self.language_config).and_then(|config| {
                let profile = config.to_profile()?;
                Ok((config, profile))
            });

        match checked {
            Ok((config, profile)) => {
                println!("✓ Configuration is valid!");
                println!("  Language code: {}", profile.code());
                println!("  Language name: {}", profile.name());
                println!("  Terminators: {}", profile.terminators().len());
                println!("  Abbreviations: {}", config.abbreviation_count());
                Ok(())
            }
            Err(e) => {
                println!("✗ Configuration is invalid!");
                println!("  Error: {e}");
                Err(anyhow::anyhow!("Validation failed: {}", e))
            }
        }
    }
}
