//! Policy port: decides whether an operation is permitted.

use editsave_domain::DomainObject;

/// Category of policy decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolicyCategory {
    /// May `candidate` (a container) contain `context` (a child)?
    Composition,
}

/// Port for policy decisions.
pub trait PolicyService: Send + Sync {
    fn allow(&self, category: PolicyCategory, candidate: &DomainObject, context: &DomainObject)
    -> bool;
}

/// Policy that permits everything.
pub struct AllowAllPolicy;

impl PolicyService for AllowAllPolicy {
    fn allow(
        &self,
        _category: PolicyCategory,
        _candidate: &DomainObject,
        _context: &DomainObject,
    ) -> bool {
        true
    }
}
