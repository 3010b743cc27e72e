//! Workspace configuration from TOML (`[workspace]` section)

use editsave_domain::ObjectId;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Id of the root container created when the workspace has none.
pub const DEFAULT_ROOT: &str = "mine";

/// Raw workspace configuration from TOML
///
/// # Example
///
/// ```toml
/// [workspace]
/// path = "workspace.json"
/// root = "mine"
/// write_back = true
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileWorkspaceConfig {
    /// JSON file seeding the object store
    pub path: Option<PathBuf>,
    /// Root container; created as "My Items" if missing
    pub root: ObjectId,
    /// Write the store back to `path` after a save
    pub write_back: bool,
}

impl Default for FileWorkspaceConfig {
    fn default() -> Self {
        Self {
            path: None,
            root: ObjectId::new(DEFAULT_ROOT),
            write_back: false,
        }
    }
}
