//! CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for save results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human readable summary
    Text,
    /// JSON output
    Json,
}

impl From<OutputFormat> for editsave_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => editsave_domain::OutputFormat::Text,
            OutputFormat::Json => editsave_domain::OutputFormat::Json,
        }
    }
}

/// CLI arguments for editsave
#[derive(Parser, Debug)]
#[command(name = "editsave")]
#[command(author, version, about = "Finish in-place edits: commit existing objects or finalize new ones")]
#[command(long_about = r#"
editsave finishes an editing session on an object in a workspace.

- Editing an object that was saved before commits the edits in place.
- Creating a new object asks for its title, properties and destination,
  then copies it into the chosen container.

Either way the object is shown again in browse mode afterwards.

Configuration files are loaded from (in priority order):
1. --config <path>       Explicit config file
2. ./editsave.toml       Project-level config
3. ~/.config/editsave/config.toml   Global config

Example:
  editsave create --type plot --parent mine
  editsave create --type plot --parent mine --name "Pressure" --yes
  editsave edit --id 3f1c2a --name "Renamed"
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Output format (overrides [output] format)
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only print errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Also write logs to daily files in this directory
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Create a new object and save it into a container
    Create {
        /// Type key of the new object
        #[arg(short = 't', long = "type", value_name = "TYPE")]
        type_key: String,

        /// Container the object is created in
        #[arg(short, long, value_name = "ID")]
        parent: String,

        /// Title to use instead of the default
        #[arg(short, long)]
        name: Option<String>,

        /// Accept the form without prompting
        #[arg(short, long)]
        yes: bool,
    },

    /// Rename an existing object and commit the edit
    Edit {
        /// Id of the object to edit
        #[arg(long, value_name = "ID")]
        id: String,

        /// New title
        #[arg(short, long)]
        name: String,
    },
}
