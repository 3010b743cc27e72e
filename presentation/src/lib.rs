//! Presentation layer for editsave
//!
//! This crate contains CLI definitions, form dialogs and output formatters.

pub mod cli;
pub mod config;
pub mod dialog;
pub mod output;

// Re-export commonly used types
pub use cli::commands::{Cli, Command, OutputFormat};
pub use config::OutputConfig;
pub use dialog::{ConsoleDialog, PresetDialog};
pub use output::console::ConsoleFormatter;
pub use output::report::{ObjectSummary, SaveOutcome, SaveReport};
