//! Markdown output formatter

use super::OutputFormatter;
use anyhow::Result;
use fullstop_engine::Output;
use std::io::Write;

/// Markdown formatter - a heading per document and a numbered list of
/// its sentences
pub struct MarkdownFormatter<W: Write> {
    writer: W,
    sentence_count: usize,
}

impl<W: Write> MarkdownFormatter<W> {
    /// Create a new markdown formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            sentence_count: 0,
        }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for MarkdownFormatter<W> {
    fn write_document(&mut self, source: &str, output: &Output) -> Result<()> {
        writeln!(self.writer, "## {source}")?;
        writeln!(self.writer)?;
        for (index, sentence) in output.sentences.iter().enumerate() {
            writeln!(self.writer, "{}. {}", index + 1, sentence.text)?;
        }
        writeln!(self.writer)?;
        self.sentence_count += output.sentences.len();
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        writeln!(self.writer, "---")?;
        writeln!(self.writer, "*Total sentences: {}*", self.sentence_count)?;
        self.writer.flush()?;
        Ok(())
    }
}
