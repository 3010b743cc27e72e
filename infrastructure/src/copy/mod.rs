//! Store-backed copy engine.
//!
//! Copies an object into a new parent under a fresh id. Members of the
//! object's composition are copied recursively when they pass the filter and
//! kept as links otherwise.

use crate::store::InMemoryObjectStore;
use async_trait::async_trait;
use chrono::Utc;
use editsave_application::{CopyError, CopyService, ObjectFilter, PolicyCategory, PolicyService};
use editsave_domain::{DomainObject, ObjectHandle, ObjectId, ObjectModel};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Copy engine writing copies into an [`InMemoryObjectStore`].
pub struct StoreCopyService {
    store: Arc<InMemoryObjectStore>,
    policy: Arc<dyn PolicyService>,
}

impl StoreCopyService {
    pub fn new(store: Arc<InMemoryObjectStore>, policy: Arc<dyn PolicyService>) -> Self {
        Self { store, policy }
    }

    /// Whether `object` may be copied into `parent` at all.
    pub fn validate(&self, object: &DomainObject, parent: &DomainObject) -> bool {
        object.id() != parent.id()
            && self
                .policy
                .allow(PolicyCategory::Composition, parent, object)
    }

    /// Copy `model` (belonging to `source_id`) into `location`, returning
    /// the id of the stored copy.
    fn copy_model(
        &self,
        source_id: &ObjectId,
        mut model: ObjectModel,
        location: &ObjectId,
        filter: &ObjectFilter,
        visited: &mut HashSet<ObjectId>,
    ) -> ObjectId {
        let clone_id = self.store.generate_id();

        let mut composition = Vec::with_capacity(model.composition.len());
        for child_id in &model.composition {
            let Some(child_model) = self.store.model(child_id) else {
                warn!("Composition member {} of {} is missing", child_id, source_id);
                composition.push(child_id.clone());
                continue;
            };

            let child = self.store.instantiate(
                child_id.clone(),
                child_model.clone(),
                Some(source_id.clone()),
            );
            if visited.insert(child_id.clone()) && filter(child.as_ref()) {
                let copied = self.copy_model(child_id, child_model, &clone_id, filter, visited);
                composition.push(copied);
            } else {
                debug!("Linking {} instead of copying it", child_id);
                composition.push(child_id.clone());
            }
        }

        let now = Utc::now();
        model.composition = composition;
        model.location = Some(location.clone());
        model.persisted = Some(now);
        model.modified = Some(now);
        self.store.insert(clone_id.clone(), model);

        clone_id
    }
}

#[async_trait]
impl CopyService for StoreCopyService {
    async fn perform(
        &self,
        object: &ObjectHandle,
        parent: &ObjectHandle,
        filter: &ObjectFilter,
    ) -> Result<ObjectHandle, CopyError> {
        if !filter(object.as_ref()) {
            return Err(CopyError::Filtered(object.id().clone()));
        }
        if !self.validate(object, parent) {
            return Err(CopyError::Invalid {
                object: object.id().clone(),
                parent: parent.id().clone(),
                reason: format!(
                    "a {} cannot be placed in a {}",
                    object.type_key(),
                    parent.type_key()
                ),
            });
        }

        let mut visited = HashSet::from([object.id().clone()]);
        let clone_id = self.copy_model(
            object.id(),
            object.model(),
            parent.id(),
            filter,
            &mut visited,
        );

        parent.mutate(|model| model.composition.push(clone_id.clone()));
        self.store.persist(parent);

        let model = self.store.model(&clone_id).ok_or_else(|| {
            CopyError::Persistence(format!("copy {} was not stored", clone_id))
        })?;
        info!("Copied {} into {} as {}", object.id(), parent.id(), clone_id);

        Ok(self
            .store
            .instantiate(clone_id, model, Some(parent.id().clone())))
    }
}
