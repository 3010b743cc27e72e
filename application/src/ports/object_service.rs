//! Object lookup port.
//!
//! Resolves identifiers to domain objects. The save workflow needs it to find
//! the parent container of a new object, but the service is usually owned by
//! the same host that creates the workflow. [`LazyObjectService`] breaks that
//! construction-order cycle by resolving the service on first use.

use async_trait::async_trait;
use editsave_domain::{ObjectHandle, ObjectId};
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur during object lookup.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ObjectServiceError {
    #[error("Object not found: {0}")]
    NotFound(ObjectId),

    #[error("Storage error: {0}")]
    Storage(String),
}

/// Port for looking up domain objects by id.
#[async_trait]
pub trait ObjectService: Send + Sync {
    /// Look up several objects at once.
    ///
    /// Ids that cannot be resolved are absent from the returned map; only
    /// storage-level failures are reported as errors.
    async fn get_objects(
        &self,
        ids: &[ObjectId],
    ) -> Result<HashMap<ObjectId, ObjectHandle>, ObjectServiceError>;

    /// Look up a single object, failing with `NotFound` when it is absent.
    async fn get_object(&self, id: &ObjectId) -> Result<ObjectHandle, ObjectServiceError> {
        let mut objects = self.get_objects(std::slice::from_ref(id)).await?;
        objects
            .remove(id)
            .ok_or_else(|| ObjectServiceError::NotFound(id.clone()))
    }
}

type ObjectServiceFactory = Box<dyn Fn() -> Arc<dyn ObjectService> + Send + Sync>;

/// Object service handle that is resolved on first use.
pub struct LazyObjectService {
    factory: ObjectServiceFactory,
    resolved: OnceLock<Arc<dyn ObjectService>>,
}

impl LazyObjectService {
    /// Defer resolution to `factory`, which runs at most once.
    pub fn new(factory: impl Fn() -> Arc<dyn ObjectService> + Send + Sync + 'static) -> Self {
        Self {
            factory: Box::new(factory),
            resolved: OnceLock::new(),
        }
    }

    /// Wrap a service that is already available.
    pub fn resolved(service: Arc<dyn ObjectService>) -> Self {
        let cell = OnceLock::new();
        let _ = cell.set(Arc::clone(&service));
        Self {
            factory: Box::new(move || Arc::clone(&service)),
            resolved: cell,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved.get().is_some()
    }

    pub fn get(&self) -> &Arc<dyn ObjectService> {
        self.resolved.get_or_init(|| {
            debug!("Resolving object service on first use");
            (self.factory)()
        })
    }
}

#[async_trait]
impl ObjectService for LazyObjectService {
    async fn get_objects(
        &self,
        ids: &[ObjectId],
    ) -> Result<HashMap<ObjectId, ObjectHandle>, ObjectServiceError> {
        self.get().get_objects(ids).await
    }
}
