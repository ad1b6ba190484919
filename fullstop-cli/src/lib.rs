//! fullstop CLI library
//!
//! Command implementations behind the `fullstop` binary.

pub mod commands;
pub mod input;
pub mod output;
pub mod progress;

pub use commands::{Commands, ListCommands};
