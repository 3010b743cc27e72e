//! Save workflow configuration from TOML (`[save]` section)

use editsave_application::SaveBehavior;
use serde::{Deserialize, Serialize};

/// Raw save configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSaveConfig {
    /// Ask for a destination when finalizing a new object
    pub prompt_location: bool,
}

impl Default for FileSaveConfig {
    fn default() -> Self {
        Self {
            prompt_location: true,
        }
    }
}

impl FileSaveConfig {
    pub fn to_behavior(&self) -> SaveBehavior {
        SaveBehavior {
            prompt_location: self.prompt_location,
        }
    }
}
