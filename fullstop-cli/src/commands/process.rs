//! Process command implementation

use crate::input::{resolve_patterns, InputSource};
use crate::output::create_formatter;
use crate::progress::ProgressReporter;
use anyhow::{Context, Result};
use clap::Args;
use fullstop_engine::{Config, Output, Segmenter, DEFAULT_LANGUAGE};
use fullstop_rules::ProfileRepository;
use rayon::prelude::*;
use std::fs::File;
use std::io::{self, BufRead, BufWriter, Write};
use std::path::PathBuf;
use std::sync::Arc;

/// Arguments for the process command
#[derive(Debug, Args)]
pub struct ProcessArgs {
    /// Input files or patterns (supports glob); reads stdin when omitted
    #[arg(short, long, value_name = "FILE/PATTERN")]
    pub input: Vec<String>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Language code (e.g. en, pa, zh-Hant); defaults to the code of the
    /// first --language-config file, then to English
    #[arg(short, long, value_name = "CODE", env = "FULLSTOP_LANGUAGE")]
    pub language: Option<String>,

    /// External language configuration file (repeatable)
    #[arg(short = 'c', long, value_name = "FILE")]
    pub language_config: Vec<PathBuf>,

    /// Segment every input line independently
    #[arg(long)]
    pub per_line: bool,

    /// Fail on unknown language codes instead of using generic rules
    #[arg(long)]
    pub strict: bool,

    /// Number of worker threads for files and lines (default: all cores)
    #[arg(short, long, value_name = "N")]
    pub threads: Option<usize>,

    /// Read stdin line by line and print sentences as they arrive
    #[arg(short = 'I', long, conflicts_with_all = ["input", "output"])]
    pub interactive: bool,

    /// Suppress progress output and logging
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Plain text with one sentence per line
    Text,
    /// JSON array of documents with sentence offsets and metadata
    Json,
    /// Markdown numbered list
    Markdown,
}

impl OutputFormat {
    /// Every format, in listing order
    pub const ALL: [OutputFormat; 3] = [Self::Text, Self::Json, Self::Markdown];

    /// Name as accepted by `--format`
    pub fn name(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Json => "json",
            Self::Markdown => "markdown",
        }
    }

    /// One-line description
    pub fn description(&self) -> &'static str {
        match self {
            Self::Text => "One sentence per line",
            Self::Json => "Sentences with byte/char offsets and metadata",
            Self::Markdown => "Numbered list with a sentence total",
        }
    }
}

impl ProcessArgs {
    /// Execute the process command
    pub fn execute(&self) -> Result<()> {
        self.init_logging();

        log::info!("Starting text processing");
        log::debug!("Arguments: {:?}", self);

        let (segmenter, language) = self.build_segmenter()?;
        log::info!("Language: {language}");

        if self.interactive {
            let stdin = io::stdin();
            return run_interactive(&segmenter, &language, stdin.lock(), io::stdout().lock());
        }

        let sources = if self.input.is_empty() {
            vec![InputSource::Stdin]
        } else {
            resolve_patterns(&self.input)?
                .into_iter()
                .map(InputSource::File)
                .collect()
        };
        log::info!("Processing {} input(s)", sources.len());

        let progress = ProgressReporter::new(sources.len(), self.quiet);
        let outputs: Vec<Output> = segmenter.install(|| {
            sources
                .par_iter()
                .map(|source| -> Result<Output> {
                    let output = self.process_source(&segmenter, &language, source)?;
                    progress.document_done(&source.name(), output.sentences.len());
                    Ok(output)
                })
                .collect::<Result<Vec<_>>>()
        })?;
        let total = progress.finish();

        let writer: Box<dyn Write + Send + Sync> = match &self.output {
            Some(path) => Box::new(BufWriter::new(
                File::create(path)
                    .with_context(|| format!("Failed to create {}", path.display()))?,
            )),
            None => Box::new(io::stdout()),
        };

        let mut formatter = create_formatter(self.format, writer);
        for (source, output) in sources.iter().zip(&outputs) {
            formatter.write_document(&source.name(), output)?;
        }
        formatter.finish()?;

        log::info!("Wrote {total} sentences");
        Ok(())
    }

    fn process_source(
        &self,
        segmenter: &Segmenter,
        language: &str,
        source: &InputSource,
    ) -> Result<Output> {
        let input = source.to_engine_input();
        let output = if self.per_line {
            segmenter.process_lines(input, language)
        } else {
            segmenter.process_with_language(input, language)
        };
        let output = output.with_context(|| format!("Failed to process {}", source.name()))?;

        if output.metadata.fallback_used {
            log::warn!(
                "{}: no rules for '{}', used generic rules",
                source.name(),
                output.metadata.language_requested
            );
        }
        Ok(output)
    }

    /// Register external language files and build the segmenter; returns
    /// the language code to process with
    fn build_segmenter(&self) -> Result<(Segmenter, String)> {
        let mut repository = ProfileRepository::new();
        let mut first_code = None;
        for path in &self.language_config {
            let profile = repository.register_file(path).with_context(|| {
                format!("Failed to load language config {}", path.display())
            })?;
            log::info!(
                "Loaded external rules '{}' from {}",
                profile.code(),
                path.display()
            );
            first_code.get_or_insert_with(|| profile.code().to_string());
        }

        let language = self
            .language
            .clone()
            .or(first_code)
            .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string());

        let config = Config::builder()
            .language(&language)
            .strict(self.strict)
            .threads(self.threads)
            .build()?;
        let segmenter = Segmenter::with_repository(Arc::new(repository), config)?;
        Ok((segmenter, language))
    }

    /// Initialize logging based on verbosity level
    fn init_logging(&self) {
        if self.quiet {
            return;
        }

        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        let _ = env_logger::Builder::from_env(
            env_logger::Env::default().default_filter_or(log_level),
        )
        .try_init();
    }
}

/// Segment `reader` line by line, flushing each line's sentences to
/// `writer` before reading the next
pub fn run_interactive<R: BufRead, W: Write>(
    segmenter: &Segmenter,
    language: &str,
    reader: R,
    mut writer: W,
) -> Result<()> {
    for line in reader.lines() {
        let line = line.context("Failed to read stdin")?;
        for sentence in segmenter.segment(language, &line)? {
            writeln!(writer, "{sentence}")?;
        }
        writer.flush()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_output_format_names() {
        let names: Vec<_> = OutputFormat::ALL.iter().map(|f| f.name()).collect();
        assert_eq!(names, vec!["text", "json", "markdown"]);
    }

    fn args(threads: Option<usize>) -> ProcessArgs {
        ProcessArgs {
            input: Vec::new(),
            output: None,
            format: OutputFormat::Text,
            language: Some("en".to_string()),
            language_config: Vec::new(),
            per_line: false,
            strict: false,
            threads,
            interactive: false,
            quiet: true,
            verbose: 0,
        }
    }

    #[test]
    fn test_thread_count_bounds_file_workers() {
        let (segmenter, language) = args(Some(1)).build_segmenter().unwrap();
        assert_eq!(language, "en");

        let sources = vec![InputSource::Stdin; 4];
        let workers: Vec<usize> = segmenter.install(|| {
            sources
                .par_iter()
                .map(|_| rayon::current_num_threads())
                .collect()
        });
        assert_eq!(workers, vec![1; 4]);

        let (segmenter, _) = args(Some(3)).build_segmenter().unwrap();
        assert_eq!(segmenter.install(rayon::current_num_threads), 3);
    }

    #[test]
    fn test_run_interactive() {
        let segmenter = Segmenter::new();
        let input = Cursor::new("Dr. Smith came. He left!\n\nOne more\n");
        let mut out = Vec::new();
        run_interactive(&segmenter, "en", input, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Dr. Smith came.\nHe left!\nOne more\n"
        );
    }
}
