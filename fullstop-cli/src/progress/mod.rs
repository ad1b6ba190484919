//! Progress reporting module

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Per-document progress, shared by the workers that segment documents
pub struct ProgressReporter {
    progress_bar: Option<ProgressBar>,
    sentences: AtomicUsize,
}

impl ProgressReporter {
    /// Reporter for `documents` inputs; the bar is only drawn for more
    /// than one document and never when `quiet`
    pub fn new(documents: usize, quiet: bool) -> Self {
        let progress_bar = (!quiet && documents > 1).then(|| {
            let pb = ProgressBar::with_draw_target(
                Some(documents as u64),
                ProgressDrawTarget::stderr(),
            );
            if let Ok(style) = ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} documents {msg}")
            {
                pb.set_style(style.progress_chars("##-"));
            }
            pb.enable_steady_tick(Duration::from_millis(100));
            pb
        });

        Self {
            progress_bar,
            sentences: AtomicUsize::new(0),
        }
    }

    /// Record a finished document
    pub fn document_done(&self, source: &str, sentences: usize) {
        self.sentences.fetch_add(sentences, Ordering::Relaxed);
        if let Some(pb) = &self.progress_bar {
            pb.set_message(format!("{source}: {sentences} sentences"));
            pb.inc(1);
        }
    }

    /// Clear the bar and return the sentence total
    pub fn finish(&self) -> usize {
        if let Some(pb) = &self.progress_bar {
            pb.finish_and_clear();
        }
        self.sentences.load(Ordering::Relaxed)
    }
}
