//! Input handling module

pub mod glob_resolver;

pub use glob_resolver::resolve_patterns;

use fullstop_engine::Input;
use std::io;
use std::path::PathBuf;

/// Where one document comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// Standard input, read to EOF
    Stdin,
    /// A file resolved from `--input`
    File(PathBuf),
}

impl InputSource {
    /// Display name used in progress, logs and output headings
    pub fn name(&self) -> String {
        match self {
            InputSource::Stdin => "<stdin>".to_string(),
            InputSource::File(path) => path.display().to_string(),
        }
    }

    /// Engine input that reads this source lazily
    pub fn to_engine_input(&self) -> Input {
        match self {
            InputSource::Stdin => Input::from_reader(io::stdin()),
            InputSource::File(path) => Input::from_file(path.clone()),
        }
    }
}
