//! Copy port: duplicating an object into a new parent.

use async_trait::async_trait;
use editsave_domain::{DomainObject, ObjectHandle, ObjectId};
use thiserror::Error;

/// Predicate deciding which objects get copied (rather than linked).
pub type ObjectFilter = dyn Fn(&DomainObject) -> bool + Send + Sync;

/// Errors that can occur while copying.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CopyError {
    #[error("Object {0} was rejected by the copy filter")]
    Filtered(ObjectId),

    #[error("Cannot copy {object} into {parent}: {reason}")]
    Invalid {
        object: ObjectId,
        parent: ObjectId,
        reason: String,
    },

    #[error("Persistence failed: {0}")]
    Persistence(String),
}

/// Port for the clone engine.
#[async_trait]
pub trait CopyService: Send + Sync {
    /// Copy `object` (and the parts of its composition accepted by `filter`)
    /// into `parent`, returning the newly persisted copy.
    ///
    /// `object` itself must pass `filter`; composition members that do not
    /// pass are kept as links to the existing objects. A copy the engine
    /// refuses to place in `parent` fails with [`CopyError::Invalid`].
    async fn perform(
        &self,
        object: &ObjectHandle,
        parent: &ObjectHandle,
        filter: &ObjectFilter,
    ) -> Result<ObjectHandle, CopyError>;
}
