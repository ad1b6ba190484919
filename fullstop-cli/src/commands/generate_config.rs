//! Generate config command implementation

use anyhow::{Context, Result};
use clap::Args;
use fullstop_rules::{embedded_toml, normalize_code};
use std::fs;
use std::path::PathBuf;

/// Arguments for the generate-config command
#[derive(Debug, Args)]
pub struct GenerateConfigArgs {
    /// Language code for the new configuration; a built-in code starts
    /// from that language's rules
    #[arg(short = 'l', long, value_name = "CODE", required = true)]
    pub language_code: String,

    /// Output file path
    #[arg(short, long, value_name = "FILE", required = true)]
    pub output: PathBuf,
}

impl GenerateConfigArgs {
    /// Execute the generate-config command
    pub fn execute(&self) -> Result<()> {
        println!("Generating language configuration template...");
        println!("  Language code: {}", self.language_code);
        println!("  Output file: {}", self.output.display());

        let template = self.generate_template();
        fs::write(&self.output, template)
            .with_context(|| format!("Failed to write to {}", self.output.display()))?;

        println!("✓ Configuration template generated successfully!");
        println!();
        println!("Next steps:");
        println!("1. Edit the configuration file to customize language rules");
        println!("2. Validate your configuration:");
        println!(
            "   fullstop validate --language-config {}",
            self.output.display()
        );
        println!("3. Use it for processing:");
        println!(
            "   fullstop process -i input.txt --language-config {}",
            self.output.display()
        );

        Ok(())
    }

    /// Built-in table for known codes, otherwise a commented skeleton
    fn generate_template(&self) -> String {
        let code = normalize_code(&self.language_code);
        if let Some(builtin) = embedded_toml(&code) {
            return format!("# Based on the built-in rules for '{code}'\n\n{builtin}");
        }

        format!(
            r#"# Language configuration for {code}

[metadata]
code = "{code}"
name = "Custom Language"

[terminators]
# Sentence-ending characters
chars = [".", "!", "?"]
# Terminators that may end a sentence with no following space
# (must also appear in chars)
unspaced = []

[enclosures]
# A terminator inside an open pair does not end the sentence
pairs = [
    {{ open = "(", close = ")" }},
    {{ open = "[", close = "]" }},
    {{ open = '"', close = '"', symmetric = true }},
]
# Allow boundaries inside enclosures
split_inside = false
# Keep closing marks right after a terminator with the sentence
absorb_closing = false

[abbreviations]
# Followed by the marker, these words do not end a sentence.
# Category names are arbitrary.
marker = "."
titles = ["Dr", "Mr", "Mrs", "Ms", "Prof"]
common = ["etc", "vs", "e.g", "i.e"]

[prefixes]
# Tokens (such as initials) that never end a sentence
non_breaking = []

[exclamations]
# Words that contain a terminator, e.g. "Yahoo!"
words = []

[numbers]
# "3.14" is not a boundary
decimal_separator_exempt = true

[continuation]
# Reject a boundary when the next word starts lowercase or with a digit
lowercase = false
digit = false
# Regex over the following text; a match rejects the boundary
# pattern = '^\W*[0-9a-z]'
# Next words that continue the sentence
words = []

[paragraphs]
break_on_blank_line = true
"#
        )
    }
}
