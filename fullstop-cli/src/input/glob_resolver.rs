//! Resolution of `--input` arguments to files

use anyhow::{bail, Context, Result};
use glob::glob;
use std::path::{Path, PathBuf};

fn is_pattern(arg: &str) -> bool {
    arg.contains(['*', '?', '['])
}

/// Resolve input arguments to files, sorted and deduplicated.
///
/// A plain path must name an existing file. A glob pattern may match
/// nothing (logged), but all arguments together must yield at least one
/// file.
pub fn resolve_patterns(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for arg in patterns {
        if !is_pattern(arg) {
            let path = Path::new(arg);
            if !path.is_file() {
                bail!("File not found: {arg}");
            }
            files.push(path.to_path_buf());
            continue;
        }

        let matched_before = files.len();
        for entry in glob(arg).with_context(|| format!("Invalid glob pattern: {arg}"))? {
            let path = entry.with_context(|| format!("Error resolving pattern: {arg}"))?;
            if path.is_file() {
                files.push(path);
            }
        }
        if files.len() == matched_before {
            log::warn!("No files match '{arg}'");
        }
    }

    if files.is_empty() {
        bail!("No files found matching the provided patterns");
    }

    files.sort();
    files.dedup();
    Ok(files)
}
