//! Composition policy driven by the `[policy]` config section.

use editsave_application::{PolicyCategory, PolicyService};
use editsave_domain::DomainObject;
use std::collections::{BTreeMap, HashMap, HashSet};

/// Wildcard entry allowing any child type.
pub const ANY_TYPE: &str = "*";

/// Allow-list of which types each container type may hold.
///
/// With no rules at all, every composition is allowed. Once rules exist,
/// container types without an entry hold nothing.
#[derive(Debug, Clone, Default)]
pub struct CompositionPolicy {
    rules: HashMap<String, HashSet<String>>,
}

impl CompositionPolicy {
    pub fn new(rules: &BTreeMap<String, Vec<String>>) -> Self {
        Self {
            rules: rules
                .iter()
                .map(|(parent, children)| (parent.clone(), children.iter().cloned().collect()))
                .collect(),
        }
    }

    pub fn allows(&self, container_type: &str, child_type: &str) -> bool {
        if self.rules.is_empty() {
            return true;
        }
        self.rules
            .get(container_type)
            .is_some_and(|allowed| allowed.contains(child_type) || allowed.contains(ANY_TYPE))
    }
}

impl PolicyService for CompositionPolicy {
    fn allow(
        &self,
        category: PolicyCategory,
        candidate: &DomainObject,
        context: &DomainObject,
    ) -> bool {
        match category {
            PolicyCategory::Composition => self.allows(&candidate.type_key(), &context.type_key()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules(entries: &[(&str, &[&str])]) -> BTreeMap<String, Vec<String>> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.iter().map(|s| s.to_string()).collect()))
            .collect()
    }

    #[test]
    fn test_empty_policy_allows_everything() {
        let policy = CompositionPolicy::default();
        assert!(policy.allows("plot", "folder"));
    }

    #[test]
    fn test_rules_restrict_children() {
        let policy = CompositionPolicy::new(&rules(&[("folder", &["plot", "folder"])]));
        assert!(policy.allows("folder", "plot"));
        assert!(!policy.allows("folder", "generator"));
        assert!(!policy.allows("plot", "folder"));
    }

    #[test]
    fn test_wildcard_allows_any_child() {
        let policy = CompositionPolicy::new(&rules(&[("folder", &["*"])]));
        assert!(policy.allows("folder", "generator"));
    }
}
