//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod logging;
mod output;
mod policy;
mod save;
mod workspace;

pub use logging::FileLoggingConfig;
pub use output::FileOutputConfig;
pub use policy::FilePolicyConfig;
pub use save::FileSaveConfig;
pub use workspace::FileWorkspaceConfig;

use super::validation::{ConfigIssue, ConfigIssueCode};
use editsave_domain::TypeDefinition;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Object store seed and root container
    pub workspace: FileWorkspaceConfig,
    /// Save workflow behaviour
    pub save: FileSaveConfig,
    /// Type definitions (`[[types]]`)
    pub types: Vec<TypeDefinition>,
    /// Composition rules
    pub policy: FilePolicyConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// Save event log
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// Checks for:
    /// 1. Duplicate type keys
    /// 2. Property keys nested inside other properties of the same type
    /// 3. Property patterns that are not valid regular expressions
    /// 4. Policy entries naming undefined types
    /// 5. `write_back` without a workspace path
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        let mut seen = HashSet::new();
        for definition in &self.types {
            if !seen.insert(definition.key.as_str()) {
                issues.push(ConfigIssue::warning(
                    ConfigIssueCode::DuplicateType {
                        key: definition.key.clone(),
                    },
                    format!(
                        "types: '{}' is defined more than once, the last definition wins",
                        definition.key
                    ),
                ));
            }

            for property in &definition.properties {
                let nested_in = definition.properties.iter().find(|other| {
                    property
                        .key
                        .strip_prefix(other.key.as_str())
                        .is_some_and(|rest| rest.starts_with('.'))
                });
                if let Some(parent) = nested_in {
                    let field = format!("types.{}.{}", definition.key, property.key);
                    issues.push(ConfigIssue::error(
                        ConfigIssueCode::OverlappingProperty {
                            field: field.clone(),
                            parent: parent.key.clone(),
                        },
                        format!(
                            "{}: nested inside property '{}', both cannot be set",
                            field, parent.key
                        ),
                    ));
                }

                let Some(pattern) = &property.pattern else {
                    continue;
                };
                if let Err(e) = Regex::new(pattern) {
                    let field = format!("types.{}.{}.pattern", definition.key, property.key);
                    issues.push(ConfigIssue::error(
                        ConfigIssueCode::InvalidPattern {
                            field: field.clone(),
                            pattern: pattern.clone(),
                        },
                        format!("{}: invalid pattern: {}", field, e),
                    ));
                }
            }
        }

        issues.extend(self.policy.validate(&seen));

        if self.workspace.write_back && self.workspace.path.is_none() {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::MissingWorkspacePath,
                "workspace.write_back is set but workspace.path is not, nothing will be written",
            ));
        }

        issues
    }
}
