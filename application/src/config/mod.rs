//! Behaviour configuration for the save workflow.

use serde::{Deserialize, Serialize};

/// Tunable behaviour of [`SaveAction`](crate::SaveAction).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaveBehavior {
    /// Include the "Save In" location row when finalizing a new object.
    pub prompt_location: bool,
}

impl Default for SaveBehavior {
    fn default() -> Self {
        Self {
            prompt_location: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_prompts_for_location() {
        assert!(SaveBehavior::default().prompt_location);
    }
}
