//! Location capability: originals versus links.

use super::entity::DomainObject;
use crate::core::id::ObjectId;

/// View over an object's declared and contextual location.
///
/// An object is *original* when the parent it was reached through is the
/// parent it declares in its model. An object reached through any other
/// container is a link to an object living elsewhere. Objects reached
/// without a context (looked up directly) count as originals.
#[derive(Debug, Clone, Copy)]
pub struct LocationCapability<'a> {
    object: &'a DomainObject,
}

impl<'a> LocationCapability<'a> {
    pub(crate) fn new(object: &'a DomainObject) -> Self {
        Self { object }
    }

    pub fn is_original(&self) -> bool {
        match self.object.context() {
            None => true,
            Some(context) => self.original_location() == Some(context),
        }
    }

    pub fn is_link(&self) -> bool {
        !self.is_original()
    }

    /// Location declared in the object's model.
    pub fn original_location(&self) -> Option<ObjectId> {
        self.object.location_id()
    }

    /// Parent the object was reached through, if any.
    pub fn contextual_location(&self) -> Option<ObjectId> {
        self.object.context()
    }
}

#[cfg(test)]
mod tests {
    use crate::{DomainObject, ObjectId, ObjectModel};

    fn object_in(location: &str) -> DomainObject {
        DomainObject::new(
            ObjectId::new("child"),
            ObjectModel::new("Child", "folder").with_location(ObjectId::new(location)),
        )
    }

    #[test]
    fn test_without_context_is_original() {
        assert!(object_in("mine").location().is_original());
    }

    #[test]
    fn test_reached_through_declared_parent_is_original() {
        let object = object_in("mine").with_context(ObjectId::new("mine"));
        let location = object.location();
        assert!(location.is_original());
        assert_eq!(location.contextual_location(), Some(ObjectId::new("mine")));
    }

    #[test]
    fn test_reached_through_other_parent_is_link() {
        let object = object_in("mine").with_context(ObjectId::new("elsewhere"));
        assert!(object.location().is_link());
    }
}
