//! JSON output formatter

use super::OutputFormatter;
use anyhow::Result;
use fullstop_engine::{Metadata, Output, SentenceDTO};
use serde::Serialize;
use std::io::Write;

/// JSON formatter - a pretty-printed array with one object per document
pub struct JsonFormatter<W: Write> {
    writer: W,
    documents: Vec<DocumentData>,
}

/// One document in the JSON array
#[derive(Debug, Serialize)]
pub struct DocumentData {
    /// File path or `<stdin>`
    pub source: String,
    /// Detected sentences with offsets
    pub sentences: Vec<SentenceDTO>,
    /// Language resolution and size statistics
    pub metadata: Metadata,
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            documents: Vec::new(),
        }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for JsonFormatter<W> {
    fn write_document(&mut self, source: &str, output: &Output) -> Result<()> {
        self.documents.push(DocumentData {
            source: source.to_string(),
            sentences: output.sentences.clone(),
            metadata: output.metadata.clone(),
        });
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, &self.documents)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}
