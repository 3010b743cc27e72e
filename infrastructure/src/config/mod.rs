//! Configuration file loading for editsave
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `--config <path>` specified file
//! 2. Project root: `./editsave.toml` or `./.editsave.toml`
//! 3. XDG config: `$XDG_CONFIG_HOME/editsave/config.toml`
//! 4. Fallback: `~/.config/editsave/config.toml`
//! 5. Default values

mod file_config;
mod loader;
mod validation;

pub use file_config::{
    FileConfig, FileLoggingConfig, FileOutputConfig, FilePolicyConfig, FileSaveConfig,
    FileWorkspaceConfig,
};
pub use loader::ConfigLoader;
pub use validation::{ConfigIssue, ConfigIssueCode, Severity};
