//! The domain object entity.

use super::capability::{
    ActionCapability, Capabilities, CapabilityKind, EditorCapability,
};
use super::location::LocationCapability;
use super::model::ObjectModel;
use crate::core::id::ObjectId;
use crate::types::TypeDefinition;
use chrono::Utc;
use std::fmt;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Shared handle to a domain object.
pub type ObjectHandle = Arc<DomainObject>;

/// An editable, persistable item.
///
/// The model sits behind a lock so that handles can be shared between the
/// editing UI and the save workflow; every mutation goes through
/// [`mutate`](DomainObject::mutate), which also stamps `modified`.
pub struct DomainObject {
    id: ObjectId,
    model: RwLock<ObjectModel>,
    /// Parent this object was reached through (its contextual location).
    context: RwLock<Option<ObjectId>>,
    capabilities: Capabilities,
}

impl DomainObject {
    pub fn new(id: ObjectId, model: ObjectModel) -> Self {
        Self {
            id,
            model: RwLock::new(model),
            context: RwLock::new(None),
            capabilities: Capabilities::new(),
        }
    }

    pub fn with_context(mut self, parent: ObjectId) -> Self {
        self.context = RwLock::new(Some(parent));
        self
    }

    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    pub fn into_handle(self) -> ObjectHandle {
        Arc::new(self)
    }

    pub fn id(&self) -> &ObjectId {
        &self.id
    }

    pub fn context(&self) -> Option<ObjectId> {
        self.context
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Snapshot of the current model.
    pub fn model(&self) -> ObjectModel {
        self.read().clone()
    }

    /// Borrow the model for the duration of `f`.
    pub fn with_model<R>(&self, f: impl FnOnce(&ObjectModel) -> R) -> R {
        f(&self.read())
    }

    /// Mutate the model in place and stamp `modified`.
    pub fn mutate<R>(&self, f: impl FnOnce(&mut ObjectModel) -> R) -> R {
        let mut model = self.write();
        let result = f(&mut model);
        model.modified = Some(Utc::now());
        result
    }

    /// Place the object in `parent`: both its declared and its contextual
    /// location now point there.
    pub fn relocate(&self, parent: ObjectId) {
        *self
            .context
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(parent.clone());
        self.mutate(|model| model.location = Some(parent));
    }

    pub fn name(&self) -> String {
        self.read().name.clone()
    }

    pub fn type_key(&self) -> String {
        self.read().type_key.clone()
    }

    /// Declared location (the `location` field of the model).
    pub fn location_id(&self) -> Option<ObjectId> {
        self.read().location.clone()
    }

    pub fn is_persisted(&self) -> bool {
        self.read().is_persisted()
    }

    pub fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    pub fn has_capability(&self, kind: CapabilityKind) -> bool {
        self.capabilities.has(kind)
    }

    pub fn editor(&self) -> Option<Arc<dyn EditorCapability>> {
        self.capabilities.editor().cloned()
    }

    pub fn action(&self) -> Option<Arc<dyn ActionCapability>> {
        self.capabilities.action().cloned()
    }

    pub fn type_definition(&self) -> Option<&TypeDefinition> {
        self.capabilities.type_definition()
    }

    pub fn location(&self) -> LocationCapability<'_> {
        LocationCapability::new(self)
    }

    fn read(&self) -> RwLockReadGuard<'_, ObjectModel> {
        self.model.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, ObjectModel> {
        self.model.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl fmt::Debug for DomainObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DomainObject")
            .field("id", &self.id)
            .field("model", &*self.read())
            .field("context", &self.context())
            .field("capabilities", &self.capabilities)
            .finish()
    }
}
