//! Composition policy configuration from TOML (`[policy]` section)
//!
//! ```toml
//! [policy.composition]
//! folder = ["folder", "plot"]
//! plot = ["*"]
//! ```

use crate::config::validation::{ConfigIssue, ConfigIssueCode};
use crate::policy::{ANY_TYPE, CompositionPolicy};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Raw policy configuration from TOML
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePolicyConfig {
    /// Container type -> child types it may hold
    pub composition: BTreeMap<String, Vec<String>>,
}

impl FilePolicyConfig {
    pub fn to_policy(&self) -> CompositionPolicy {
        CompositionPolicy::new(&self.composition)
    }

    /// Report entries naming types outside `defined`.
    pub(super) fn validate(&self, defined: &HashSet<&str>) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        for (container, children) in &self.composition {
            let field = format!("policy.composition.{}", container);
            let named = std::iter::once(container).chain(children.iter());
            for key in named.filter(|k| *k != ANY_TYPE && !defined.contains(k.as_str())) {
                issues.push(ConfigIssue::warning(
                    ConfigIssueCode::UndefinedType {
                        field: field.clone(),
                        key: key.clone(),
                    },
                    format!("{}: type '{}' is not defined in [[types]]", field, key),
                ));
            }
        }
        issues
    }
}
